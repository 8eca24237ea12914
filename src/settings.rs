//! User settings persisted next to the week data.

use crate::calendar::WeekStartDay;
use crate::error::TrackerError;
use crate::storage::{KeyValueStore, DATA_KEY};

/// Stringified 0–6 week start day
pub const WEEK_START_DAY_KEY: &str = "weeklyTrackerWeekStartDay";
/// Display name shown in the header
pub const USER_NAME_KEY: &str = "weeklyTrackerUser";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub week_start_day: WeekStartDay,
    pub user_name: Option<String>,
}

impl Settings {
    /// Read settings, falling back to defaults for anything missing or unreadable.
    pub fn load(backend: &dyn KeyValueStore) -> Self {
        let week_start_day = match backend.get(WEEK_START_DAY_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
                log::warn!("Ignoring saved week start day: {e}");
                WeekStartDay::default()
            }),
            Ok(None) => WeekStartDay::default(),
            Err(e) => {
                log::warn!("Failed to read week start day: {e}");
                WeekStartDay::default()
            }
        };

        let user_name = match backend.get(USER_NAME_KEY) {
            Ok(name) => name.filter(|n| !n.trim().is_empty()),
            Err(e) => {
                log::warn!("Failed to read user name: {e}");
                None
            }
        };

        Self {
            week_start_day,
            user_name,
        }
    }

    pub fn save_week_start_day(
        &mut self,
        backend: &mut dyn KeyValueStore,
        day: WeekStartDay,
    ) -> Result<(), TrackerError> {
        self.week_start_day = day;
        backend.set(WEEK_START_DAY_KEY, &day.index().to_string())
    }

    /// Store the display name. Blank names clear it.
    pub fn save_user_name(
        &mut self,
        backend: &mut dyn KeyValueStore,
        name: &str,
    ) -> Result<(), TrackerError> {
        let name = name.trim();
        if name.is_empty() {
            self.user_name = None;
            return backend.remove(USER_NAME_KEY);
        }
        self.user_name = Some(name.to_string());
        backend.set(USER_NAME_KEY, name)
    }
}

/// Delete all tracking data and the user name. The week start day is kept.
pub fn reset_progress(backend: &mut dyn KeyValueStore) -> Result<(), TrackerError> {
    backend.remove(DATA_KEY)?;
    backend.remove(USER_NAME_KEY)?;
    log::info!("Reset all tracking progress");
    Ok(())
}
