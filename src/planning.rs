//! Task and note edits for a single week.
//!
//! Each helper reads the record `update` will store, builds the new list and
//! writes it back through [`WeekStore::update`], so cross-week propagation
//! applies to every edit. For a week never saved, the inherited tasks keep the
//! ids of the previous week's plans, so they can be removed by those ids.

use crate::error::TrackerError;
use crate::store::WeekStore;
use crate::types::{copy_with_fresh_ids, Frequency, Task, WeekUpdate};

impl WeekStore {
    /// Add a task to week `week`'s plans for the following week. Returns the new task.
    pub fn add_planned_task(
        &mut self,
        week: i32,
        description: &str,
        frequency: Frequency,
    ) -> Result<Task, TrackerError> {
        let task = Task::new(description, frequency)?;
        let mut plans = self.materialize(week).next_week_plans;
        plans.push(task.clone());
        self.update(week, WeekUpdate::default().next_week_plans(plans))?;
        Ok(task)
    }

    /// Remove a planned task by id. Returns whether anything was removed.
    pub fn remove_planned_task(&mut self, week: i32, task_id: &str) -> Result<bool, TrackerError> {
        let mut plans = self.materialize(week).next_week_plans;
        let before = plans.len();
        plans.retain(|t| t.id != task_id);
        if plans.len() == before {
            return Ok(false);
        }
        self.update(week, WeekUpdate::default().next_week_plans(plans))?;
        Ok(true)
    }

    pub fn add_current_task(
        &mut self,
        week: i32,
        description: &str,
        frequency: Frequency,
    ) -> Result<Task, TrackerError> {
        let task = Task::new(description, frequency)?;
        let mut tasks = self.materialize(week).current_week_tasks;
        tasks.push(task.clone());
        self.update(week, WeekUpdate::default().current_week_tasks(tasks))?;
        Ok(task)
    }

    pub fn remove_current_task(&mut self, week: i32, task_id: &str) -> Result<bool, TrackerError> {
        let mut tasks = self.materialize(week).current_week_tasks;
        let before = tasks.len();
        tasks.retain(|t| t.id != task_id);
        if tasks.len() == before {
            return Ok(false);
        }
        self.update(week, WeekUpdate::default().current_week_tasks(tasks))?;
        Ok(true)
    }

    /// Append copies of this week's tasks to next week's plans. Returns how many were copied.
    pub fn carry_over_current_tasks(&mut self, week: i32) -> Result<usize, TrackerError> {
        let record = self.materialize(week);
        if record.current_week_tasks.is_empty() {
            return Ok(0);
        }
        let copies = copy_with_fresh_ids(&record.current_week_tasks);
        let count = copies.len();
        let mut plans = record.next_week_plans;
        plans.extend(copies);
        self.update(week, WeekUpdate::default().next_week_plans(plans))?;
        Ok(count)
    }

    /// Append a positive note. Blank text is ignored.
    pub fn add_positive(&mut self, week: i32, text: &str) -> Result<(), TrackerError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }
        let mut positives = self.materialize(week).positives;
        positives.push(text.to_string());
        self.update(week, WeekUpdate::default().positives(positives))
    }

    /// Append a negative note. Blank text is ignored.
    pub fn add_negative(&mut self, week: i32, text: &str) -> Result<(), TrackerError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }
        let mut negatives = self.materialize(week).negatives;
        negatives.push(text.to_string());
        self.update(week, WeekUpdate::default().negatives(negatives))
    }

    pub fn remove_positive(&mut self, week: i32, index: usize) -> Result<(), TrackerError> {
        let mut positives = self.materialize(week).positives;
        if index >= positives.len() {
            return Ok(());
        }
        positives.remove(index);
        self.update(week, WeekUpdate::default().positives(positives))
    }

    pub fn remove_negative(&mut self, week: i32, index: usize) -> Result<(), TrackerError> {
        let mut negatives = self.materialize(week).negatives;
        if index >= negatives.len() {
            return Ok(());
        }
        negatives.remove(index);
        self.update(week, WeekUpdate::default().negatives(negatives))
    }

    pub fn set_tripti_index(&mut self, week: i32, value: u8) -> Result<(), TrackerError> {
        self.update(week, WeekUpdate::default().tripti_index(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_planned_task_reaches_next_week() {
        let mut store = WeekStore::new();
        let task = store.add_planned_task(7, "Cook at home", Frequency::Five).unwrap();
        assert_eq!(store.get(7).next_week_plans, vec![task.clone()]);
        assert_eq!(store.get(8).current_week_tasks, vec![task]);
    }

    #[test]
    fn test_add_planned_task_rejects_blank() {
        let mut store = WeekStore::new();
        assert!(store.add_planned_task(7, "  ", Frequency::Daily).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_current_task_updates_previous_plans() {
        let mut store = WeekStore::new();
        let keep = store.add_planned_task(3, "Keep", Frequency::Daily).unwrap();
        let drop = store.add_planned_task(3, "Drop", Frequency::Once).unwrap();

        assert!(store.remove_current_task(4, &drop.id).unwrap());
        assert_eq!(store.get(3).next_week_plans, vec![keep.clone()]);
        assert_eq!(store.get(4).current_week_tasks, vec![keep]);
    }

    #[test]
    fn test_remove_unknown_task_is_noop() {
        let mut store = WeekStore::new();
        store.add_planned_task(3, "Only", Frequency::Daily).unwrap();
        let snapshot = store.clone();
        assert!(!store.remove_planned_task(3, "missing").unwrap());
        assert!(!store.remove_current_task(9, "missing").unwrap());
        assert_eq!(store, snapshot);
    }

    #[test]
    fn test_remove_inherited_task_from_unsaved_week() {
        let payload = r#"[{"week": 5, "nextWeekPlans": [
            {"id": "a", "description": "Run", "frequency": "daily"},
            {"id": "b", "description": "Read", "frequency": "once"}
        ]}]"#;
        let mut store = WeekStore::from_json(payload);
        assert!(!store.contains(6));

        assert!(store.remove_current_task(6, "a").unwrap());
        let week5 = store.get(5);
        let remaining: Vec<&str> = week5
            .next_week_plans
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(remaining, vec!["b"]);
        assert_eq!(store.get(6).current_week_tasks, store.get(5).next_week_plans);
    }

    #[test]
    fn test_add_current_task_to_unsaved_week_keeps_inherited_ids() {
        let payload = r#"[{"week": 5, "nextWeekPlans": [
            {"id": "a", "description": "Run", "frequency": "daily"}
        ]}]"#;
        let mut store = WeekStore::from_json(payload);
        let added = store.add_current_task(6, "Swim", Frequency::Twice).unwrap();

        let ids: Vec<String> = store
            .get(5)
            .next_week_plans
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["a".to_string(), added.id]);
    }

    #[test]
    fn test_add_current_task_reaches_previous_week() {
        let mut store = WeekStore::new();
        let task = store.add_current_task(12, "Piano", Frequency::Alt).unwrap();
        assert_eq!(store.get(11).next_week_plans, vec![task]);
    }

    #[test]
    fn test_carry_over_copies_with_new_ids() {
        let mut store = WeekStore::new();
        let current = store.add_current_task(5, "Walk", Frequency::Daily).unwrap();
        let planned = store.add_planned_task(5, "Read", Frequency::Twice).unwrap();

        assert_eq!(store.carry_over_current_tasks(5).unwrap(), 1);
        let plans = store.get(5).next_week_plans;
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0], planned);
        assert_eq!(plans[1].description, current.description);
        assert_ne!(plans[1].id, current.id);
        assert_eq!(store.get(6).current_week_tasks, plans);
    }

    #[test]
    fn test_carry_over_without_tasks_is_noop() {
        let mut store = WeekStore::new();
        assert_eq!(store.carry_over_current_tasks(5).unwrap(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_notes_add_and_remove() {
        let mut store = WeekStore::new();
        store.add_positive(2, " Finished the book ").unwrap();
        store.add_positive(2, "Slept well").unwrap();
        store.add_positive(2, "   ").unwrap();
        store.add_negative(2, "Skipped gym").unwrap();

        let record = store.get(2);
        assert_eq!(record.positives, vec!["Finished the book", "Slept well"]);
        assert_eq!(record.negatives, vec!["Skipped gym"]);

        store.remove_positive(2, 0).unwrap();
        store.remove_negative(2, 5).unwrap();
        let record = store.get(2);
        assert_eq!(record.positives, vec!["Slept well"]);
        assert_eq!(record.negatives, vec!["Skipped gym"]);
    }

    #[test]
    fn test_set_tripti_index() {
        let mut store = WeekStore::new();
        store.set_tripti_index(30, 4).unwrap();
        assert_eq!(store.get(30).tripti_label(), Some("Great"));
        assert!(store.set_tripti_index(30, 7).is_err());
        assert_eq!(store.get(30).tripti_index, 4);
    }
}
