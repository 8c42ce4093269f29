//! Persistence of the application state.
//!
//! The durable state is one JSON envelope `{tasks, xp, level, streak}`
//! stored under [`STATE_KEY`]. It is rewritten whole on every change.
//! Unreadable data is never an error: it is logged and replaced with the
//! defaults. Fields are decoded one by one, so a single bad task or counter
//! only loses itself.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::kv::KeyValueStore;
use crate::error::Result;
use crate::progression::Progression;
use crate::task::{Task, TaskStore, MAX_CONFIDENCE};

/// Key of the persisted envelope.
pub const STATE_KEY: &str = "bacflix_data";

/// Key of the transient UI session kept between CLI invocations.
pub const SESSION_KEY: &str = "bacflix_session";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default, deserialize_with = "lenient_tasks")]
    pub tasks: TaskStore,
    #[serde(default, deserialize_with = "lenient_count")]
    pub xp: u64,
    #[serde(default = "default_level", deserialize_with = "lenient_count")]
    pub level: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub streak: u32,
}

fn default_level() -> u32 {
    1
}

/// Decode the task map entry by entry, dropping entries that don't decode.
fn lenient_tasks<'de, D>(deserializer: D) -> Result<TaskStore, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(entries) = Value::deserialize(deserializer)? else {
        warn!("stored tasks are not a map, starting empty");
        return Ok(TaskStore::new());
    };
    let tasks = entries
        .into_iter()
        .filter_map(|(id, raw)| match serde_json::from_value::<Task>(raw) {
            Ok(mut task) => {
                if task.conf > MAX_CONFIDENCE {
                    warn!(id = %id, conf = task.conf, "clamping stored confidence");
                    task.conf = MAX_CONFIDENCE;
                }
                Some(task)
            }
            Err(e) => {
                warn!(id = %id, error = %e, "dropping unreadable stored task");
                None
            }
        });
    Ok(TaskStore::from_tasks(tasks))
}

/// Non-negative integer, or zero when the stored value is anything else.
fn lenient_count<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64> + Default,
{
    let value = Value::deserialize(deserializer)?;
    match value.as_u64().and_then(|n| T::try_from(n).ok()) {
        Some(n) => Ok(n),
        None => {
            warn!(%value, "ignoring invalid stored counter");
            Ok(T::default())
        }
    }
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            tasks: TaskStore::new(),
            xp: 0,
            level: default_level(),
            streak: 0,
        }
    }
}

impl PersistedState {
    pub fn progression(&self) -> Progression {
        Progression {
            xp: self.xp,
            level: self.level,
            streak: self.streak,
        }
    }

    pub fn from_parts(tasks: TaskStore, progression: Progression) -> Self {
        Self {
            tasks,
            xp: progression.xp,
            level: progression.level,
            streak: progression.streak,
        }
    }

    fn normalized(mut self) -> Self {
        if self.level == 0 {
            self.level = default_level();
        }
        self
    }
}

/// Typed access to the key-value store.
pub struct StateStore<S> {
    kv: S,
}

impl<S: KeyValueStore> StateStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// Read the envelope. `None` when absent or unreadable.
    pub fn load(&self) -> Option<PersistedState> {
        self.load_json::<PersistedState>(STATE_KEY)
            .map(PersistedState::normalized)
    }

    /// Read the envelope, falling back to the empty defaults.
    pub fn load_or_default(&self) -> PersistedState {
        self.load().unwrap_or_default()
    }

    pub fn save(&self, state: &PersistedState) -> Result<()> {
        self.save_json(STATE_KEY, state)?;
        debug!(tasks = state.tasks.len(), xp = state.xp, "saved state");
        Ok(())
    }

    /// Read and decode any JSON value under `key`.
    ///
    /// Storage failures and decode failures are both treated as absent.
    pub fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.kv.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "failed to read stored value, using defaults");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "stored value is malformed, using defaults");
                None
            }
        }
    }

    pub fn save_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.kv.set(key, &json)?;
        Ok(())
    }
}
