//! Weekly plan generation.
//!
//! The week is a fixed grid of [`DAYS_PER_WEEK`] days by [`SLOTS_PER_DAY`]
//! slots. Subjects are ranked (weakest mastery first, then heaviest
//! coefficient) and dealt into the grid round-robin, row by row.

use tracing::debug;

use crate::catalog::Subject;
use crate::error::ValidationError;
use crate::task::{Task, TaskStore};

pub const DAYS_PER_WEEK: u8 = 6;
pub const SLOTS_PER_DAY: u8 = 4;
pub const SLOT_TIMES: [&str; SLOTS_PER_DAY as usize] = ["08:30", "10:30", "14:00", "16:30"];

/// Subjects in generation order.
///
/// Stable: subjects with equal mastery and coefficient keep their input order.
pub fn prioritize(subjects: &[Subject]) -> Vec<&Subject> {
    let mut pool: Vec<&Subject> = subjects.iter().collect();
    pool.sort_by(|a, b| {
        b.lvl
            .rank()
            .cmp(&a.lvl.rank())
            .then_with(|| b.coeff.cmp(&a.coeff))
    });
    pool
}

/// Build a fresh week of tasks from the given subjects.
///
/// # Errors
/// Returns [`ValidationError::EmptyCollection`] if `subjects` is empty.
pub fn generate_plan(subjects: &[Subject]) -> Result<TaskStore, ValidationError> {
    if subjects.is_empty() {
        return Err(ValidationError::EmptyCollection("subjects".into()));
    }

    let pool = prioritize(subjects);
    let mut tasks = Vec::with_capacity(usize::from(DAYS_PER_WEEK * SLOTS_PER_DAY));
    for day in 0..DAYS_PER_WEEK {
        for slot in 0..SLOTS_PER_DAY {
            let cell = usize::from(day * SLOTS_PER_DAY + slot);
            let subject = pool[cell % pool.len()];
            tasks.push(Task::new(
                day,
                slot,
                subject.name.clone(),
                SLOT_TIMES[usize::from(slot)],
            ));
        }
    }

    debug!(subjects = pool.len(), tasks = tasks.len(), "generated weekly plan");
    Ok(TaskStore::from_tasks(tasks))
}
