//! The study planner controller.
//!
//! [`Planner`] is the single owner of all mutable state: active branch and
//! subjects, the task store, progression counters, the interval timer, the
//! flashcard viewer, the quote and the selected tab. Rendering layers call
//! its operations and display the returned [`Event`]s.
//!
//! Persistence happens inside each operation:
//! - the envelope (`tasks`, `xp`, `level`, `streak`) is saved whenever any
//!   of it changes;
//! - the UI session (branch, subjects, tab, timer, viewer) is saved when
//!   it changes, except for plain timer ticks, which are flushed with
//!   [`Planner::save_session`] by the driving loop.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

use crate::catalog::{Catalog, Flashcard, Mastery, Subject};
use crate::error::{Result, ValidationError};
use crate::events::Event;
use crate::flashcards::FlashcardViewer;
use crate::plan;
use crate::progression::{Progression, Reward};
use crate::quotes::QuoteRotation;
use crate::stats::WeeklyStats;
use crate::storage::{Config, KeyValueStore, PersistedState, StateStore, SESSION_KEY};
use crate::task::TaskStore;
use crate::timer::{IntervalTimer, TimerMode};

/// Top-level view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Plan,
    Stats,
    Cards,
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tab::Plan => f.write_str("plan"),
            Tab::Stats => f.write_str("stats"),
            Tab::Cards => f.write_str("cards"),
        }
    }
}

impl FromStr for Tab {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plan" => Ok(Tab::Plan),
            "stats" => Ok(Tab::Stats),
            "cards" => Ok(Tab::Cards),
            other => Err(ValidationError::InvalidValue {
                field: "tab".into(),
                message: format!("expected one of plan, stats, cards; got '{other}'"),
            }),
        }
    }
}

/// Transient UI state kept between runs under [`SESSION_KEY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub branch_id: String,
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub tab: Tab,
    #[serde(default)]
    pub timer: IntervalTimer,
    #[serde(default)]
    pub viewer: FlashcardViewer,
}

/// Read-only summary for status displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub branch_id: String,
    pub tab: Tab,
    pub tasks: usize,
    pub progress: u8,
    pub xp: u64,
    pub level: u32,
    pub streak: u32,
    pub level_progress_pct: u8,
    pub timer: TimerSnapshot,
    pub quote: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub mode: TimerMode,
    pub active: bool,
    pub remaining_secs: u32,
    pub clock: String,
}

impl From<&IntervalTimer> for TimerSnapshot {
    fn from(timer: &IntervalTimer) -> Self {
        Self {
            mode: timer.mode(),
            active: timer.is_active(),
            remaining_secs: timer.remaining_secs(),
            clock: timer.formatted(),
        }
    }
}

pub struct Planner<S> {
    catalog: Catalog,
    store: StateStore<S>,
    branch_id: String,
    subjects: Vec<Subject>,
    tasks: TaskStore,
    progression: Progression,
    timer: IntervalTimer,
    viewer: FlashcardViewer,
    quotes: QuoteRotation,
    tab: Tab,
}

impl<S: KeyValueStore> Planner<S> {
    /// Build the planner from whatever `kv` holds.
    ///
    /// Missing or unreadable data falls back to defaults: empty tasks,
    /// xp 0, level 1, streak 0, and the configured default branch.
    ///
    /// # Errors
    /// Returns an error if the catalog has no branch to start from.
    pub fn open(kv: S, catalog: Catalog, config: &Config) -> Result<Self> {
        let store = StateStore::new(kv);
        let state = store.load_or_default();
        let session = store
            .load_json::<Session>(SESSION_KEY)
            .filter(|s| catalog.branch(&s.branch_id).is_some());

        let session = match session {
            Some(mut session) => {
                session.timer.set_durations(config.durations());
                session
            }
            None => {
                let branch = catalog
                    .branch(&config.plan.default_branch)
                    .or_else(|| catalog.default_branch())
                    .ok_or_else(|| ValidationError::EmptyCollection("branches".into()))?;
                Session {
                    branch_id: branch.id.clone(),
                    subjects: branch.subjects.clone(),
                    tab: Tab::default(),
                    timer: IntervalTimer::new(config.durations()),
                    viewer: FlashcardViewer::new(),
                }
            }
        };

        debug!(
            branch = %session.branch_id,
            tasks = state.tasks.len(),
            xp = state.xp,
            "planner opened"
        );
        let progression = state.progression();
        Ok(Self {
            catalog,
            store,
            branch_id: session.branch_id,
            subjects: session.subjects,
            tasks: state.tasks,
            progression,
            timer: session.timer,
            viewer: session.viewer,
            quotes: QuoteRotation::default(),
            tab: session.tab,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn branch_id(&self) -> &str {
        &self.branch_id
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn tasks(&self) -> &TaskStore {
        &self.tasks
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn timer(&self) -> &IntervalTimer {
        &self.timer
    }

    pub fn viewer(&self) -> &FlashcardViewer {
        &self.viewer
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn quote(&self) -> &str {
        self.quotes.current()
    }

    pub fn store(&self) -> &StateStore<S> {
        &self.store
    }

    /// Completion percentage of the current week.
    pub fn progress(&self) -> u8 {
        self.tasks.progress()
    }

    pub fn stats(&self) -> WeeklyStats {
        WeeklyStats::compute(&self.tasks, &self.progression)
    }

    /// The card under the viewer's cursor.
    pub fn current_card(&self) -> Option<&Flashcard> {
        let deck = self.catalog.deck(self.viewer.selected_subject()?)?;
        self.viewer.current(deck)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            branch_id: self.branch_id.clone(),
            tab: self.tab,
            tasks: self.tasks.len(),
            progress: self.progress(),
            xp: self.progression.xp,
            level: self.progression.level,
            streak: self.progression.streak,
            level_progress_pct: self.progression.level_progress_pct(),
            timer: TimerSnapshot::from(&self.timer),
            quote: self.quote().to_string(),
        }
    }

    // ── Subjects ─────────────────────────────────────────────────────

    /// Switch branch. Replaces the subject list, dropping mastery edits.
    pub fn select_branch(&mut self, id: &str) -> Result<Event> {
        let branch = self
            .catalog
            .branch(id)
            .ok_or_else(|| ValidationError::unknown("branch", id))?;
        self.branch_id = branch.id.clone();
        self.subjects = branch.subjects.clone();
        self.save_session()?;
        Ok(Event::BranchSelected {
            branch_id: self.branch_id.clone(),
            subjects: self.subjects.len(),
            at: Utc::now(),
        })
    }

    pub fn set_subject_level(&mut self, name: &str, lvl: Mastery) -> Result<Event> {
        let subject = self
            .subjects
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| ValidationError::unknown("subject", name))?;
        subject.lvl = lvl;
        self.save_session()?;
        Ok(Event::SubjectLevelChanged {
            subject: name.to_string(),
            lvl,
            at: Utc::now(),
        })
    }

    // ── Plan & tasks ─────────────────────────────────────────────────

    /// Generate a new week from the active subjects.
    ///
    /// Replaces every task, discarding done flags and ratings, and awards
    /// plan-generation xp every time.
    pub fn generate_plan(&mut self) -> Result<Event> {
        let tasks = plan::generate_plan(&self.subjects)?;
        self.tasks.replace(tasks);
        let xp_awarded = self.progression.award(Reward::PlanGenerated);
        self.persist()?;
        info!(branch = %self.branch_id, tasks = self.tasks.len(), "plan generated");
        Ok(Event::PlanGenerated {
            tasks: self.tasks.len(),
            xp_awarded,
            at: Utc::now(),
        })
    }

    /// Flip a task's done flag. Unknown ids are ignored.
    ///
    /// Completing awards xp; un-completing refunds nothing.
    pub fn toggle_task(&mut self, id: &str) -> Result<Option<Event>> {
        let Some(toggled) = self.tasks.toggle(id) else {
            debug!(id, "toggle ignored, no such task");
            return Ok(None);
        };
        let xp_awarded = if toggled.completed {
            self.progression.award(Reward::TaskCompleted)
        } else {
            0
        };
        self.persist()?;
        Ok(Some(Event::TaskToggled {
            id: id.to_string(),
            done: toggled.done,
            xp_awarded,
            at: Utc::now(),
        }))
    }

    /// Rate a task 0..=5. Unknown ids are ignored.
    pub fn set_confidence(&mut self, id: &str, value: u8) -> Result<Option<Event>> {
        let Some(task) = self.tasks.set_confidence(id, value)? else {
            debug!(id, "rating ignored, no such task");
            return Ok(None);
        };
        let event = Event::ConfidenceSet {
            id: task.id.clone(),
            conf: task.conf,
            at: Utc::now(),
        };
        self.persist()?;
        Ok(Some(event))
    }

    // ── Timer ────────────────────────────────────────────────────────

    pub fn timer_toggle(&mut self) -> Result<Option<Event>> {
        let event = self.timer.toggle();
        self.save_session()?;
        Ok(event)
    }

    pub fn timer_start(&mut self) -> Result<Option<Event>> {
        let event = self.timer.start();
        self.save_session()?;
        Ok(event)
    }

    pub fn timer_pause(&mut self) -> Result<Option<Event>> {
        let event = self.timer.pause();
        self.save_session()?;
        Ok(event)
    }

    pub fn timer_reset(&mut self) -> Result<Event> {
        let event = self.timer.reset();
        self.save_session()?;
        Ok(event)
    }

    /// One elapsed second. Persists only when a session completes.
    pub fn timer_tick(&mut self) -> Result<Option<Event>> {
        match self.timer.tick() {
            Some(event) => self.on_session_completed(event).map(Some),
            None => Ok(None),
        }
    }

    /// Account for wall-clock time elapsed since the timer state was saved.
    pub fn timer_catch_up(&mut self) -> Result<Option<Event>> {
        match self.timer.catch_up() {
            Some(event) => self.on_session_completed(event).map(Some),
            None => {
                if self.timer.is_active() {
                    self.save_session()?;
                }
                Ok(None)
            }
        }
    }

    fn on_session_completed(&mut self, event: Event) -> Result<Event> {
        if let Event::SessionCompleted {
            finished: TimerMode::Focus,
            ..
        } = event
        {
            self.progression.award(Reward::FocusCompleted);
            self.persist()?;
        }
        self.save_session()?;
        Ok(event)
    }

    // ── Flashcards ───────────────────────────────────────────────────

    /// Open a subject's deck, or close the viewer with `None`.
    pub fn select_flashcards(&mut self, subject: Option<&str>) -> Result<Event> {
        let deck = match subject {
            Some(name) => Some(
                self.catalog
                    .deck(name)
                    .ok_or_else(|| ValidationError::unknown("flashcard deck", name))?,
            ),
            None => None,
        };
        self.viewer.select(deck);
        self.card_changed()
    }

    pub fn next_card(&mut self) -> Result<Event> {
        self.viewer.next();
        self.card_changed()
    }

    pub fn prev_card(&mut self) -> Result<Event> {
        self.viewer.prev();
        self.card_changed()
    }

    pub fn flip_card(&mut self) -> Result<Event> {
        self.viewer.flip();
        self.card_changed()
    }

    fn card_changed(&mut self) -> Result<Event> {
        self.save_session()?;
        Ok(Event::CardChanged {
            subject: self.viewer.selected_subject().map(str::to_string),
            index: self.viewer.index(),
            flipped: self.viewer.is_flipped(),
            at: Utc::now(),
        })
    }

    // ── Chrome ───────────────────────────────────────────────────────

    pub fn rotate_quote(&mut self) -> Event {
        let quote = self.quotes.rotate().to_string();
        Event::QuoteRotated {
            quote,
            at: Utc::now(),
        }
    }

    pub fn select_tab(&mut self, tab: Tab) -> Result<Event> {
        self.tab = tab;
        self.save_session()?;
        Ok(Event::TabSelected {
            tab,
            at: Utc::now(),
        })
    }

    // ── Persistence ──────────────────────────────────────────────────

    /// Save the envelope.
    pub fn persist(&self) -> Result<()> {
        let state = PersistedState::from_parts(self.tasks.clone(), self.progression);
        self.store.save(&state)
    }

    /// Save the UI session.
    pub fn save_session(&self) -> Result<()> {
        let session = Session {
            branch_id: self.branch_id.clone(),
            subjects: self.subjects.clone(),
            tab: self.tab,
            timer: self.timer.clone(),
            viewer: self.viewer.clone(),
        };
        self.store.save_json(SESSION_KEY, &session)
    }
}
