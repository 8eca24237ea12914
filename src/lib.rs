//! Weekly planning and retrospective tracker.
//!
//! Each calendar week gets a record holding a Tripti Index rating, positive and
//! negative notes, the tasks for that week and the plans for the week after.
//! A week's plans and the next week's tasks are kept identical whichever side
//! is edited. Week numbers are computed from a user-chosen week start day.

pub mod calendar;
pub mod error;
pub mod heatmap;
mod planning;
pub mod settings;
pub mod state;
pub mod storage;
pub mod store;
pub mod types;

pub use calendar::{current_week_number, week_date_range_label, week_start_date, WeekStartDay};
pub use error::TrackerError;
pub use state::Tracker;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::WeekStore;
pub use types::{Frequency, Task, WeekRecord, WeekUpdate};
