//! Integration tests for planner persistence on SQLite.

use bacflix_core::storage::{StateStore, STATE_KEY};
use bacflix_core::{Catalog, Config, Database, KeyValueStore, Planner, PersistedState};

fn open(path: &std::path::Path) -> Planner<Database> {
    let db = Database::open_at(path).unwrap();
    Planner::open(db, Catalog::builtin(), &Config::default()).unwrap()
}

#[test]
fn state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bacflix.db");

    {
        let mut planner = open(&path);
        planner.generate_plan().unwrap();
        planner.toggle_task("task_0_0").unwrap();
        planner.toggle_task("task_0_1").unwrap();
        planner.toggle_task("task_0_2").unwrap();
        planner.set_confidence("task_0_0", 4).unwrap();
    }

    let planner = open(&path);
    assert_eq!(planner.tasks().len(), 24);
    assert_eq!(planner.tasks().done_count(), 3);
    assert_eq!(planner.tasks().get("task_0_0").unwrap().conf, 4);
    assert_eq!(planner.progression().xp, 20 + 3 * 15);
    assert_eq!(planner.progress(), 13);
}

#[test]
fn corrupted_envelope_recovers_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bacflix.db");
    {
        let db = Database::open_at(&path).unwrap();
        db.set(STATE_KEY, "{\"tasks\": garbage").unwrap();
    }

    let mut planner = open(&path);
    assert!(planner.tasks().is_empty());
    assert_eq!(planner.progression().xp, 0);
    assert_eq!(planner.progression().level, 1);
    assert_eq!(planner.progression().streak, 0);

    // next save overwrites the corrupt blob
    planner.generate_plan().unwrap();
    let db = Database::open_at(&path).unwrap();
    let state = StateStore::new(db).load().unwrap();
    assert_eq!(state.xp, 20);
}

#[test]
fn level_and_streak_are_carried_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bacflix.db");
    {
        let db = Database::open_at(&path).unwrap();
        let state = PersistedState {
            xp: 990,
            level: 7,
            streak: 12,
            ..PersistedState::default()
        };
        StateStore::new(db).save(&state).unwrap();
    }

    let mut planner = open(&path);
    planner.generate_plan().unwrap();
    planner.toggle_task("task_5_3").unwrap();
    assert_eq!(planner.progression().xp, 1025);
    assert_eq!(planner.progression().level, 7);
    assert_eq!(planner.progression().streak, 12);
}

#[test]
fn corrupted_session_falls_back_to_configured_branch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bacflix.db");
    {
        let db = Database::open_at(&path).unwrap();
        db.set("bacflix_session", "[]").unwrap();
    }
    let mut config = Config::default();
    config.set("plan.default_branch", "tech").unwrap();
    let planner =
        Planner::open(Database::open_at(&path).unwrap(), Catalog::builtin(), &config).unwrap();
    assert_eq!(planner.branch_id(), "tech");
}

#[test]
fn zero_duration_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(&config_path, "[timer]\nfocus_minutes = 0\nbreak_minutes = 0\n").unwrap();
    let config = Config::load_from(&config_path).unwrap_or_default();

    let db = Database::open_at(&dir.path().join("bacflix.db")).unwrap();
    let mut planner = Planner::open(db, Catalog::builtin(), &config).unwrap();
    assert_eq!(planner.timer().remaining_secs(), 1500);

    planner.timer_start().unwrap();
    assert!(planner.timer_tick().unwrap().is_none());
    assert_eq!(planner.timer().remaining_secs(), 1499);
    assert_eq!(planner.progression().xp, 0);
}
