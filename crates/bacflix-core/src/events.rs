use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Mastery;
use crate::planner::Tab;
use crate::timer::TimerMode;

/// Every state change in the system produces an Event.
/// The CLI prints them; a GUI layer would render from them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Event {
    BranchSelected {
        branch_id: String,
        subjects: usize,
        at: DateTime<Utc>,
    },
    SubjectLevelChanged {
        subject: String,
        lvl: Mastery,
        at: DateTime<Utc>,
    },
    /// A new week replaced every previous task.
    PlanGenerated {
        tasks: usize,
        xp_awarded: u64,
        at: DateTime<Utc>,
    },
    TaskToggled {
        id: String,
        done: bool,
        xp_awarded: u64,
        at: DateTime<Utc>,
    },
    ConfidenceSet {
        id: String,
        conf: u8,
        at: DateTime<Utc>,
    },
    TimerStarted {
        mode: TimerMode,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: TimerMode,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: TimerMode,
        at: DateTime<Utc>,
    },
    /// The countdown hit zero and switched mode.
    SessionCompleted {
        finished: TimerMode,
        next: TimerMode,
        remaining_secs: u32,
        xp_awarded: u64,
        at: DateTime<Utc>,
    },
    CardChanged {
        subject: Option<String>,
        index: usize,
        flipped: bool,
        at: DateTime<Utc>,
    },
    QuoteRotated {
        quote: String,
        at: DateTime<Utc>,
    },
    TabSelected {
        tab: Tab,
        at: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = Event::TaskToggled {
            id: "task_0_0".into(),
            done: true,
            xp_awarded: 15,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "TaskToggled");
        assert_eq!(json["xp_awarded"], 15);
    }
}
