use chrono::NaiveDate;

use crate::calendar::{current_week_number, week_date_range_label, WeekStartDay};
use crate::error::TrackerError;
use crate::heatmap::{year_overview, YearOverview};
use crate::settings::{self, Settings};
use crate::storage::{FileStore, KeyValueStore, DATA_KEY};
use crate::store::WeekStore;
use crate::types::{WeekRecord, WeekUpdate};

/// Tracker state owned by whatever drives the UI
///
/// Everything is loaded once at construction and written back after each
/// change. Write failures are logged and never undo the in-memory change.
pub struct Tracker<S: KeyValueStore> {
    backend: S,
    store: WeekStore,
    settings: Settings,
}

impl Tracker<FileStore> {
    /// Open the tracker stored under `~/.weekly-tracker/`.
    pub fn open_default() -> Result<Self, TrackerError> {
        Ok(Self::load(FileStore::open_default()?))
    }
}

impl<S: KeyValueStore> Tracker<S> {
    pub fn load(backend: S) -> Self {
        let store = match backend.get(DATA_KEY) {
            Ok(Some(payload)) => WeekStore::from_json(&payload),
            Ok(None) => WeekStore::new(),
            Err(e) => {
                log::warn!("Failed to read week data: {e}. Starting empty.");
                WeekStore::new()
            }
        };
        let settings = Settings::load(&backend);
        log::info!(
            "Tracker loaded: {} weeks, week starts {}",
            store.len(),
            settings.week_start_day
        );

        Self {
            backend,
            store,
            settings,
        }
    }

    pub fn store(&self) -> &WeekStore {
        &self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn week_start_day(&self) -> WeekStartDay {
        self.settings.week_start_day
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn week(&self, week: i32) -> WeekRecord {
        self.store.get(week)
    }

    pub fn update_week(&mut self, week: i32, update: WeekUpdate) -> Result<(), TrackerError> {
        self.edit(|store| store.update(week, update))
    }

    /// Run an edit against the store and persist if it succeeded.
    pub fn edit<T>(
        &mut self,
        f: impl FnOnce(&mut WeekStore) -> Result<T, TrackerError>,
    ) -> Result<T, TrackerError> {
        let value = f(&mut self.store)?;
        self.persist();
        Ok(value)
    }

    pub fn current_week(&self, date: NaiveDate) -> i32 {
        current_week_number(date, self.settings.week_start_day)
    }

    /// Week number of today's local date
    pub fn today_week(&self) -> i32 {
        self.current_week(chrono::Local::now().date_naive())
    }

    pub fn week_label(&self, week: i32, year: i32) -> Result<String, TrackerError> {
        week_date_range_label(week, self.settings.week_start_day, year)
    }

    pub fn year_overview(&self, year: i32) -> YearOverview {
        year_overview(&self.store, year, self.settings.week_start_day)
    }

    pub fn set_week_start_day(&mut self, day: WeekStartDay) {
        if let Err(e) = self.settings.save_week_start_day(&mut self.backend, day) {
            log::warn!("Failed to save week start day: {e}");
        }
    }

    pub fn set_user_name(&mut self, name: &str) {
        if let Err(e) = self.settings.save_user_name(&mut self.backend, name) {
            log::warn!("Failed to save user name: {e}");
        }
    }

    /// Clear all weeks and the user name. The week start day survives.
    pub fn reset_progress(&mut self) -> Result<(), TrackerError> {
        self.store.clear();
        self.settings.user_name = None;
        settings::reset_progress(&mut self.backend)
    }

    /// Write the week collection (fire and forget)
    fn persist(&mut self) {
        let result = self
            .store
            .to_json()
            .and_then(|payload| self.backend.set(DATA_KEY, &payload));
        if let Err(e) = result {
            log::warn!("Failed to save week data: {e}");
        }
    }
}
