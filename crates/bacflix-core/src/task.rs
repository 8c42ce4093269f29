//! Study tasks and the in-memory task store.
//!
//! A task is one (day, slot) cell of the weekly grid. Its id is derived
//! from the cell, so the id alone identifies the cell.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ValidationError;

/// Highest confidence rating a task can carry.
pub const MAX_CONFIDENCE: u8 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    /// Subject name captured at generation time.
    pub subj: String,
    pub done: bool,
    /// Self-rated confidence, 0 (unrated) to 5.
    pub conf: u8,
    /// Slot start time, "HH:MM".
    pub time: String,
    pub day: u8,
    pub slot: u8,
}

impl Task {
    pub fn new(day: u8, slot: u8, subj: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            id: task_id(day, slot),
            subj: subj.into(),
            done: false,
            conf: 0,
            time: time.into(),
            day,
            slot,
        }
    }
}

/// Build the id of the task at (day, slot).
pub fn task_id(day: u8, slot: u8) -> String {
    format!("task_{day}_{slot}")
}

/// Split a task id back into (day, slot).
pub fn parse_task_id(id: &str) -> Option<(u8, u8)> {
    let rest = id.strip_prefix("task_")?;
    let (day, slot) = rest.split_once('_')?;
    Some((day.parse().ok()?, slot.parse().ok()?))
}

/// Outcome of a done-toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggled {
    pub done: bool,
    /// True only on a false -> true transition.
    pub completed: bool,
}

/// Mapping of task id to task.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct TaskStore {
    tasks: BTreeMap<String, Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        Self {
            tasks: tasks.into_iter().map(|t| (t.id.clone(), t)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Task in the given grid cell.
    pub fn at(&self, day: u8, slot: u8) -> Option<&Task> {
        self.tasks.get(&task_id(day, slot))
    }

    /// Tasks ordered by (day, slot).
    pub fn ordered(&self) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.values().collect();
        tasks.sort_by_key(|t| (t.day, t.slot));
        tasks
    }

    /// Replace every task. Prior progress is discarded.
    pub fn replace(&mut self, other: TaskStore) {
        self.tasks = other.tasks;
    }

    /// Flip `done`. Unknown ids are ignored.
    pub fn toggle(&mut self, id: &str) -> Option<Toggled> {
        let task = self.tasks.get_mut(id)?;
        task.done = !task.done;
        Some(Toggled {
            done: task.done,
            completed: task.done,
        })
    }

    /// Set the confidence rating of a task.
    ///
    /// Values above [`MAX_CONFIDENCE`] are rejected before the lookup; an
    /// unknown id is a silent no-op and yields `Ok(None)`.
    pub fn set_confidence(&mut self, id: &str, value: u8) -> Result<Option<&Task>, ValidationError> {
        validate_confidence(value)?;
        let Some(task) = self.tasks.get_mut(id) else {
            return Ok(None);
        };
        task.conf = value;
        Ok(Some(task))
    }

    pub fn done_count(&self) -> usize {
        self.tasks.values().filter(|t| t.done).count()
    }

    /// Rounded completion percentage, 0 when empty.
    pub fn progress(&self) -> u8 {
        let total = self.tasks.len();
        if total == 0 {
            return 0;
        }
        let done = self.done_count();
        // round-half-up in integers
        ((200 * done + total) / (2 * total)) as u8
    }
}

pub fn validate_confidence(value: u8) -> Result<(), ValidationError> {
    if value > MAX_CONFIDENCE {
        return Err(ValidationError::InvalidValue {
            field: "conf".into(),
            message: format!("must be between 0 and {MAX_CONFIDENCE}, got {value}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(n: u8) -> TaskStore {
        TaskStore::from_tasks((0..n).map(|slot| Task::new(0, slot, "math", "08:30")))
    }

    #[test]
    fn task_id_roundtrip() {
        assert_eq!(task_id(3, 2), "task_3_2");
        assert_eq!(parse_task_id("task_3_2"), Some((3, 2)));
        assert_eq!(parse_task_id("task_3"), None);
        assert_eq!(parse_task_id("job_1_1"), None);
        assert_eq!(parse_task_id("task_a_1"), None);
    }

    #[test]
    fn toggle_flips_and_reports_completion() {
        let mut store = store_with(1);
        let first = store.toggle("task_0_0").unwrap();
        assert!(first.done && first.completed);
        let second = store.toggle("task_0_0").unwrap();
        assert!(!second.done && !second.completed);
    }

    #[test]
    fn toggle_unknown_id_is_noop() {
        let mut store = store_with(2);
        let before = store.clone();
        assert!(store.toggle("task_9_9").is_none());
        assert_eq!(store, before);
    }

    #[test]
    fn set_confidence_validates_range() {
        let mut store = store_with(1);
        assert_eq!(store.set_confidence("task_0_0", 4).unwrap().unwrap().conf, 4);
        assert!(store.set_confidence("task_0_0", 6).is_err());
        assert_eq!(store.get("task_0_0").unwrap().conf, 4);
        assert!(store.set_confidence("task_0_0", 0).is_ok());
    }

    #[test]
    fn set_confidence_unknown_id_is_noop() {
        let mut store = store_with(1);
        assert_eq!(store.set_confidence("nope", 3).unwrap(), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn progress_empty_is_zero() {
        assert_eq!(TaskStore::new().progress(), 0);
    }

    #[test]
    fn progress_three_of_four() {
        let mut store = store_with(4);
        for slot in 0..3 {
            store.toggle(&task_id(0, slot));
        }
        assert_eq!(store.progress(), 75);
    }

    #[test]
    fn progress_rounds_half_up() {
        let mut store = store_with(3);
        store.toggle("task_0_0");
        assert_eq!(store.progress(), 33);
        store.toggle("task_0_1");
        assert_eq!(store.progress(), 67);

        let mut store = store_with(8);
        store.toggle("task_0_0");
        // 12.5 rounds to 13
        assert_eq!(store.progress(), 13);
    }

    #[test]
    fn at_looks_up_by_cell() {
        let store = TaskStore::from_tasks(vec![
            Task::new(0, 1, "a", "10:30"),
            Task::new(5, 3, "b", "16:30"),
        ]);
        assert_eq!(store.at(5, 3).map(|t| t.subj.as_str()), Some("b"));
        assert_eq!(store.at(0, 1).map(|t| t.id.as_str()), Some("task_0_1"));
        assert!(store.at(1, 0).is_none());
        assert!(store.at(6, 0).is_none());
    }

    #[test]
    fn ordered_sorts_by_day_then_slot() {
        let store = TaskStore::from_tasks(vec![
            Task::new(1, 0, "b", "08:30"),
            Task::new(0, 3, "a", "16:30"),
            Task::new(0, 1, "a", "10:30"),
        ]);
        let ids: Vec<&str> = store.ordered().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["task_0_1", "task_0_3", "task_1_0"]);
    }

    #[test]
    fn serializes_as_plain_map() {
        let store = store_with(1);
        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json["task_0_0"]["subj"], "math");
        assert_eq!(json["task_0_0"]["done"], false);
    }
}
