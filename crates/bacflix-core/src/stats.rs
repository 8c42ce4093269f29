//! Weekly statistics derived from the task store.

use serde::{Deserialize, Serialize};

use crate::catalog::DAY_LABELS;
use crate::plan::DAYS_PER_WEEK;
use crate::progression::Progression;
use crate::task::{Task, TaskStore};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectStats {
    pub subject: String,
    pub planned: usize,
    pub done: usize,
    /// Mean over rated tasks only; `None` when nothing is rated.
    pub avg_confidence: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayStats {
    pub day: u8,
    pub label: String,
    pub planned: usize,
    pub done: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyStats {
    pub total: usize,
    pub done: usize,
    pub progress: u8,
    pub avg_confidence: Option<f64>,
    pub xp: u64,
    pub level: u32,
    pub streak: u32,
    pub level_progress_pct: u8,
    pub subjects: Vec<SubjectStats>,
    pub days: Vec<DayStats>,
}

impl WeeklyStats {
    pub fn compute(tasks: &TaskStore, progression: &Progression) -> Self {
        let ordered = tasks.ordered();

        let mut subjects: Vec<SubjectStats> = Vec::new();
        for task in &ordered {
            let pos = match subjects.iter().position(|s| s.subject == task.subj) {
                Some(pos) => pos,
                None => {
                    subjects.push(SubjectStats {
                        subject: task.subj.clone(),
                        planned: 0,
                        done: 0,
                        avg_confidence: None,
                    });
                    subjects.len() - 1
                }
            };
            subjects[pos].planned += 1;
            if task.done {
                subjects[pos].done += 1;
            }
        }
        for entry in &mut subjects {
            entry.avg_confidence =
                mean_confidence(ordered.iter().copied().filter(|t| t.subj == entry.subject));
        }

        let days = (0..DAYS_PER_WEEK)
            .map(|day| {
                let of_day = ordered.iter().filter(|t| t.day == day);
                DayStats {
                    day,
                    label: DAY_LABELS[usize::from(day)].to_string(),
                    planned: of_day.clone().count(),
                    done: of_day.filter(|t| t.done).count(),
                }
            })
            .collect();

        Self {
            total: tasks.len(),
            done: tasks.done_count(),
            progress: tasks.progress(),
            avg_confidence: mean_confidence(ordered.iter().copied()),
            xp: progression.xp,
            level: progression.level,
            streak: progression.streak,
            level_progress_pct: progression.level_progress_pct(),
            subjects,
            days,
        }
    }
}

fn mean_confidence<'a>(tasks: impl Iterator<Item = &'a Task>) -> Option<f64> {
    let (sum, count) = tasks
        .filter(|t| t.conf > 0)
        .fold((0u32, 0u32), |(sum, count), t| (sum + u32::from(t.conf), count + 1));
    (count > 0).then(|| f64::from(sum) / f64::from(count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Mastery, Subject};
    use crate::plan::generate_plan;

    fn two_subject_week() -> TaskStore {
        generate_plan(&[
            Subject::new("maths", 7, Mastery::Low),
            Subject::new("philo", 2, Mastery::High),
        ])
        .unwrap()
    }

    #[test]
    fn empty_store() {
        let stats = WeeklyStats::compute(&TaskStore::new(), &Progression::default());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.progress, 0);
        assert!(stats.subjects.is_empty());
        assert_eq!(stats.days.len(), 6);
        assert!(stats.days.iter().all(|d| d.planned == 0));
        assert_eq!(stats.avg_confidence, None);
    }

    #[test]
    fn per_subject_and_per_day_counts() {
        let mut tasks = two_subject_week();
        tasks.toggle("task_0_0");
        tasks.toggle("task_0_1");
        tasks.set_confidence("task_0_0", 4).unwrap();
        tasks.set_confidence("task_2_0", 2).unwrap();

        let stats = WeeklyStats::compute(&tasks, &Progression::default());
        assert_eq!(stats.total, 24);
        assert_eq!(stats.done, 2);
        assert_eq!(stats.progress, 8);

        assert_eq!(stats.subjects[0].subject, "maths");
        assert_eq!(stats.subjects[0].planned, 12);
        assert_eq!(stats.subjects[0].done, 1);
        assert_eq!(stats.subjects[0].avg_confidence, Some(3.0));
        assert_eq!(stats.subjects[1].subject, "philo");
        assert_eq!(stats.subjects[1].avg_confidence, None);

        assert_eq!(stats.days[0].planned, 4);
        assert_eq!(stats.days[0].done, 2);
        assert_eq!(stats.days[0].label, DAY_LABELS[0]);
        assert_eq!(stats.avg_confidence, Some(3.0));
    }
}
