//! # BacFlix Core Library
//!
//! Business logic of the BacFlix exam study planner. Every operation is
//! available without a rendering layer; the `bacflix` CLI is one thin
//! front end over this crate.
//!
//! ## Architecture
//!
//! - **Catalog**: branches, subjects, flashcards and quotes (static data)
//! - **Plan**: deterministic round-robin weekly plan generation
//! - **Task store**: completion, confidence ratings, progress
//! - **Progression**: experience points, level, streak
//! - **Timer**: second-granular focus/break state machine
//! - **Storage**: JSON envelope in a key-value store, TOML configuration
//! - **Scheduler**: cancelable periodic ticks on tokio
//!
//! ## Key Components
//!
//! - [`Planner`]: owns all state and persists it on every mutation
//! - [`IntervalTimer`]: focus/break countdown
//! - [`StateStore`]: envelope persistence over any [`KeyValueStore`]
//! - [`Config`]: application configuration

pub mod catalog;
pub mod error;
pub mod events;
pub mod flashcards;
pub mod plan;
pub mod planner;
pub mod progression;
pub mod quotes;
pub mod scheduler;
pub mod stats;
pub mod storage;
pub mod task;
pub mod timer;

pub use catalog::{Branch, Catalog, Flashcard, FlashcardDeck, Mastery, Subject};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use flashcards::FlashcardViewer;
pub use plan::generate_plan;
pub use planner::{Planner, Session, Snapshot, Tab};
pub use progression::{Progression, Reward};
pub use scheduler::{PeriodicTask, Scheduler, Signal};
pub use stats::WeeklyStats;
pub use storage::{Config, Database, KeyValueStore, MemoryStore, PersistedState, StateStore};
pub use task::{Task, TaskStore};
pub use timer::{Durations, IntervalTimer, TimerMode};
