//! Focus/break interval timer.
//!
//! A second-granular state machine. It owns no thread: the caller drives
//! it with [`IntervalTimer::tick`] once per elapsed second, or with
//! [`IntervalTimer::catch_up`] after the state was reloaded from storage.
//!
//! ## State Transitions
//!
//! ```text
//! Focus(idle) <-> Focus(active) --0s--> Break(idle) <-> Break(active) --0s--> Focus(idle)
//! ```
//!
//! Reaching zero always leaves the timer inactive; the user starts the
//! next session explicitly.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

use crate::events::Event;
use crate::progression::Reward;

pub const DEFAULT_FOCUS_SECS: u32 = 25 * 60;
pub const DEFAULT_BREAK_SECS: u32 = 5 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    Focus,
    Break,
}

impl TimerMode {
    pub fn flipped(&self) -> Self {
        match self {
            TimerMode::Focus => TimerMode::Break,
            TimerMode::Break => TimerMode::Focus,
        }
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerMode::Focus => f.write_str("focus"),
            TimerMode::Break => f.write_str("break"),
        }
    }
}

/// Session lengths in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durations {
    pub focus_secs: u32,
    pub break_secs: u32,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            focus_secs: DEFAULT_FOCUS_SECS,
            break_secs: DEFAULT_BREAK_SECS,
        }
    }
}

impl Durations {
    pub fn of(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Focus => self.focus_secs,
            TimerMode::Break => self.break_secs,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntervalTimer {
    remaining_secs: u32,
    mode: TimerMode,
    active: bool,
    #[serde(default)]
    durations: Durations,
    /// Wall-clock instant (ms since epoch) up to which elapsed time has been
    /// counted. Only set while active.
    #[serde(default)]
    anchor_epoch_ms: Option<u64>,
}

impl Default for IntervalTimer {
    fn default() -> Self {
        Self::new(Durations::default())
    }
}

impl IntervalTimer {
    pub fn new(durations: Durations) -> Self {
        Self {
            remaining_secs: durations.focus_secs,
            mode: TimerMode::Focus,
            active: false,
            durations,
            anchor_epoch_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn durations(&self) -> Durations {
        self.durations
    }

    /// Remaining time as `M:SS`.
    pub fn formatted(&self) -> String {
        format_clock(self.remaining_secs)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Change session lengths. Takes effect at the next refill.
    pub fn set_durations(&mut self, durations: Durations) {
        self.durations = durations;
    }

    /// Start/pause button.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.active {
            self.pause()
        } else {
            self.start()
        }
    }

    pub fn start(&mut self) -> Option<Event> {
        self.start_at(now_ms())
    }

    pub fn start_at(&mut self, now_ms: u64) -> Option<Event> {
        if self.active {
            return None;
        }
        self.active = true;
        self.anchor_epoch_ms = Some(now_ms);
        Some(Event::TimerStarted {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.active {
            return None;
        }
        self.active = false;
        self.anchor_epoch_ms = None;
        Some(Event::TimerPaused {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop and refill a full focus length. The mode is left as is.
    pub fn reset(&mut self) -> Event {
        self.active = false;
        self.anchor_epoch_ms = None;
        self.remaining_secs = self.durations.focus_secs;
        Event::TimerReset {
            mode: self.mode,
            at: Utc::now(),
        }
    }

    /// Account for one elapsed second.
    ///
    /// Returns `Some(Event::SessionCompleted)` when the countdown hits zero.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.active {
            return None;
        }
        if let Some(anchor) = self.anchor_epoch_ms.as_mut() {
            *anchor = anchor.saturating_add(1000);
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            return Some(self.complete());
        }
        None
    }

    /// Apply every whole second elapsed since the anchor, as of now.
    pub fn catch_up(&mut self) -> Option<Event> {
        self.catch_up_at(now_ms())
    }

    /// Apply every whole second elapsed between the anchor and `now_ms`.
    ///
    /// Stops at the first completion; seconds past zero are dropped since
    /// the timer is inactive from then on. If the wall clock went backwards
    /// the anchor is moved back to `now_ms` and counting resumes from there.
    pub fn catch_up_at(&mut self, now_ms: u64) -> Option<Event> {
        if !self.active {
            return None;
        }
        let anchor = *self.anchor_epoch_ms.get_or_insert(now_ms);
        if now_ms < anchor {
            self.anchor_epoch_ms = Some(now_ms);
            return None;
        }
        let elapsed_secs = now_ms.saturating_sub(anchor) / 1000;
        if elapsed_secs == 0 {
            return None;
        }
        if elapsed_secs < u64::from(self.remaining_secs) {
            self.remaining_secs -= elapsed_secs as u32;
            self.anchor_epoch_ms = Some(anchor + elapsed_secs * 1000);
            return None;
        }
        self.remaining_secs = 1;
        self.tick()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete(&mut self) -> Event {
        let finished = self.mode;
        let next = finished.flipped();
        self.active = false;
        self.anchor_epoch_ms = None;
        self.mode = next;
        self.remaining_secs = self.durations.of(next);

        let xp_awarded = match finished {
            TimerMode::Focus => Reward::FocusCompleted.xp(),
            TimerMode::Break => 0,
        };
        info!(%finished, %next, xp_awarded, "interval session completed");
        Event::SessionCompleted {
            finished,
            next,
            remaining_secs: self.remaining_secs,
            xp_awarded,
            at: Utc::now(),
        }
    }
}

/// Render seconds as `M:SS`.
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
