use serde::{Deserialize, Deserializer, Serialize};

use crate::error::TrackerError;

/// Highest Tripti Index a user can give a week. 0 means unrated.
pub const MAX_TRIPTI_INDEX: u8 = 5;

/// How often a planned task should happen during the week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Once,
    Twice,
    Thrice,
    Four,
    Five,
    Six,
    Alt,
}

impl Frequency {
    pub const ALL: [Frequency; 8] = [
        Frequency::Daily,
        Frequency::Once,
        Frequency::Twice,
        Frequency::Thrice,
        Frequency::Four,
        Frequency::Five,
        Frequency::Six,
        Frequency::Alt,
    ];

    /// Parse the persisted lowercase tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "daily" => Some(Frequency::Daily),
            "once" => Some(Frequency::Once),
            "twice" => Some(Frequency::Twice),
            "thrice" => Some(Frequency::Thrice),
            "four" => Some(Frequency::Four),
            "five" => Some(Frequency::Five),
            "six" => Some(Frequency::Six),
            "alt" => Some(Frequency::Alt),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Once => "Once a week",
            Frequency::Twice => "Twice a week",
            Frequency::Thrice => "Three times a week",
            Frequency::Four => "Four times a week",
            Frequency::Five => "Five times a week",
            Frequency::Six => "Six times a week",
            Frequency::Alt => "Alternate days",
        }
    }
}

/// Tags written by older versions load as daily rather than failing the record.
impl<'de> Deserialize<'de> for Frequency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Frequency::from_tag(&tag).unwrap_or_else(|| {
            log::warn!("Unknown task frequency {tag:?}, treating as daily");
            Frequency::Daily
        }))
    }
}

/// A recurring task planned for a week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub frequency: Frequency,
}

impl Task {
    /// Create a task from user input. The description is trimmed and must not be empty.
    pub fn new(description: &str, frequency: Frequency) -> Result<Self, TrackerError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(TrackerError::EmptyTaskDescription);
        }
        Ok(Self {
            id: new_task_id(),
            description: description.to_string(),
            frequency,
        })
    }

    /// Same task under a freshly generated id.
    pub fn with_fresh_id(&self) -> Self {
        Self {
            id: new_task_id(),
            ..self.clone()
        }
    }
}

fn new_task_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Copy a task list so that none of the copies share an id with the source.
pub fn copy_with_fresh_ids(tasks: &[Task]) -> Vec<Task> {
    tasks.iter().map(Task::with_fresh_id).collect()
}

/// Everything recorded for one tracked week
///
/// List fields default to empty so records written before a field existed
/// (e.g. without `currentWeekTasks`) still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekRecord {
    pub week: i32,
    #[serde(default)]
    pub tripti_index: u8,
    #[serde(default)]
    pub positives: Vec<String>,
    #[serde(default)]
    pub negatives: Vec<String>,
    #[serde(default)]
    pub next_week_plans: Vec<Task>,
    #[serde(default)]
    pub current_week_tasks: Vec<Task>,
}

impl WeekRecord {
    /// Unrated week with no notes or tasks
    pub fn empty(week: i32) -> Self {
        Self {
            week,
            tripti_index: 0,
            positives: Vec::new(),
            negatives: Vec::new(),
            next_week_plans: Vec::new(),
            current_week_tasks: Vec::new(),
        }
    }

    pub fn is_rated(&self) -> bool {
        self.tripti_index > 0
    }

    pub fn tripti_label(&self) -> Option<&'static str> {
        tripti_label(self.tripti_index)
    }
}

/// Display label for a Tripti Index. `None` for 0 (unrated) or anything above 5.
pub fn tripti_label(index: u8) -> Option<&'static str> {
    match index {
        1 => Some("Needs Improvement"),
        2 => Some("Getting There"),
        3 => Some("Good"),
        4 => Some("Great"),
        5 => Some("Excellent"),
        _ => None,
    }
}

/// Partial update of a [`WeekRecord`]. Only fields set to `Some` are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekUpdate {
    pub tripti_index: Option<u8>,
    pub positives: Option<Vec<String>>,
    pub negatives: Option<Vec<String>>,
    pub next_week_plans: Option<Vec<Task>>,
    pub current_week_tasks: Option<Vec<Task>>,
}

impl WeekUpdate {
    pub fn tripti_index(mut self, value: u8) -> Self {
        self.tripti_index = Some(value);
        self
    }

    pub fn positives(mut self, value: Vec<String>) -> Self {
        self.positives = Some(value);
        self
    }

    pub fn negatives(mut self, value: Vec<String>) -> Self {
        self.negatives = Some(value);
        self
    }

    pub fn next_week_plans(mut self, value: Vec<Task>) -> Self {
        self.next_week_plans = Some(value);
        self
    }

    pub fn current_week_tasks(mut self, value: Vec<Task>) -> Self {
        self.current_week_tasks = Some(value);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == WeekUpdate::default()
    }

    pub(crate) fn validate(&self) -> Result<(), TrackerError> {
        match self.tripti_index {
            Some(value) if value > MAX_TRIPTI_INDEX => Err(TrackerError::InvalidTriptiIndex(value)),
            _ => Ok(()),
        }
    }

    /// Merge the present fields into `record`.
    pub(crate) fn apply_to(&self, record: &mut WeekRecord) {
        if let Some(value) = self.tripti_index {
            record.tripti_index = value;
        }
        if let Some(value) = &self.positives {
            record.positives = value.clone();
        }
        if let Some(value) = &self.negatives {
            record.negatives = value.clone();
        }
        if let Some(value) = &self.next_week_plans {
            record.next_week_plans = value.clone();
        }
        if let Some(value) = &self.current_week_tasks {
            record.current_week_tasks = value.clone();
        }
    }
}
