//! Week record store with cross-week task propagation.
//!
//! A week's next-week plans and the following week's current-week tasks are
//! the same list seen from two weeks. `update` keeps the two sides equal by
//! writing the new value into the neighbouring week whenever either side
//! changes. Records are kept unique by week number and sorted ascending.

use crate::error::TrackerError;
use crate::types::{copy_with_fresh_ids, WeekRecord, WeekUpdate};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekStore {
    records: Vec<WeekRecord>,
}

impl WeekStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records in any order. Later duplicates win.
    pub fn from_records(records: Vec<WeekRecord>) -> Self {
        let mut store = Self::new();
        for record in records {
            store.upsert(record);
        }
        store
    }

    /// Load the persisted collection, tolerating older or damaged payloads.
    ///
    /// Records that fail to decode or carry a week below 1 are skipped. A
    /// payload that is not a JSON array yields an empty store.
    pub fn from_json(payload: &str) -> Self {
        let values: Vec<serde_json::Value> = match serde_json::from_str(payload) {
            Ok(values) => values,
            Err(e) => {
                log::warn!("Failed to parse week data, starting empty: {e}");
                return Self::new();
            }
        };

        let mut records = Vec::with_capacity(values.len());
        for (i, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<WeekRecord>(value) {
                Ok(record) if record.week < 1 => {
                    log::warn!("Skipping record for invalid week {}", record.week);
                }
                Ok(mut record) => {
                    if record.tripti_index > crate::types::MAX_TRIPTI_INDEX {
                        log::warn!(
                            "Week {} has Tripti Index {}, treating as unrated",
                            record.week,
                            record.tripti_index
                        );
                        record.tripti_index = 0;
                    }
                    records.push(record);
                }
                Err(e) => log::warn!("Skipping unreadable week record at index {i}: {e}"),
            }
        }
        log::debug!("Loaded {} week records", records.len());
        Self::from_records(records)
    }

    pub fn to_json(&self) -> Result<String, TrackerError> {
        Ok(serde_json::to_string(&self.records)?)
    }

    /// All stored records, ascending by week
    pub fn records(&self) -> &[WeekRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, week: i32) -> bool {
        self.position(week).is_ok()
    }

    /// Stored record for `week`, without synthesizing a default
    pub fn stored(&self, week: i32) -> Option<&WeekRecord> {
        self.position(week).ok().map(|i| &self.records[i])
    }

    /// Record for `week`. Weeks never saved get an unrated default whose
    /// current-week tasks are copies of the previous week's plans, each under
    /// a new id. The default is not stored.
    pub fn get(&self, week: i32) -> WeekRecord {
        if let Some(record) = self.stored(week) {
            return record.clone();
        }
        let mut record = WeekRecord::empty(week);
        if let Some(previous) = self.previous(week) {
            record.current_week_tasks = copy_with_fresh_ids(&previous.next_week_plans);
        }
        record
    }

    /// Merge `update` into the record for `week` and propagate task lists to
    /// the neighbouring weeks.
    pub fn update(&mut self, week: i32, update: WeekUpdate) -> Result<(), TrackerError> {
        if week < 1 {
            return Err(TrackerError::InvalidWeek(week));
        }
        update.validate()?;

        let mut merged = self.materialize(week);
        update.apply_to(&mut merged);

        if let Some(tasks) = &update.current_week_tasks {
            // Week 0 does not exist; week 1 has no previous week to link to.
            if week > 1 {
                self.entry(week - 1).next_week_plans = tasks.clone();
            }
        }
        if let (Some(tasks), Some(next)) = (&update.next_week_plans, week.checked_add(1)) {
            self.entry(next).current_week_tasks = tasks.clone();
        }

        self.upsert(merged);
        Ok(())
    }

    /// Remove every record. Used by "reset all progress".
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Starting point for an update. Unlike `get`, a week that was never
    /// saved inherits the previous week's plans as-is, so the stored pair
    /// stays equal once the week is written.
    pub(crate) fn materialize(&self, week: i32) -> WeekRecord {
        if let Some(record) = self.stored(week) {
            return record.clone();
        }
        let mut record = WeekRecord::empty(week);
        if let Some(previous) = self.previous(week) {
            record.current_week_tasks = previous.next_week_plans.clone();
        }
        record
    }

    fn previous(&self, week: i32) -> Option<&WeekRecord> {
        week.checked_sub(1).and_then(|w| self.stored(w))
    }

    fn position(&self, week: i32) -> Result<usize, usize> {
        self.records.binary_search_by_key(&week, |r| r.week)
    }

    fn entry(&mut self, week: i32) -> &mut WeekRecord {
        let index = match self.position(week) {
            Ok(i) => i,
            Err(i) => {
                self.records.insert(i, WeekRecord::empty(week));
                i
            }
        };
        &mut self.records[index]
    }

    fn upsert(&mut self, record: WeekRecord) {
        match self.position(record.week) {
            Ok(i) => self.records[i] = record,
            Err(i) => self.records.insert(i, record),
        }
    }
}
