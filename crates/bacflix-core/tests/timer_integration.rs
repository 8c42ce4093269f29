//! Integration tests driving the planner from the periodic scheduler.

use std::time::Duration;

use bacflix_core::{
    Catalog, Config, Durations, Event, MemoryStore, Planner, Scheduler, Signal, TimerMode,
};

fn short_config() -> Config {
    let mut config = Config::default();
    config.set("timer.focus_minutes", "1").unwrap();
    config.set("timer.break_minutes", "1").unwrap();
    config
}

#[tokio::test(start_paused = true)]
async fn scheduler_drives_focus_to_break() {
    let config = short_config();
    let mut planner = Planner::open(MemoryStore::new(), Catalog::builtin(), &config).unwrap();
    assert_eq!(
        planner.timer().durations(),
        Durations {
            focus_secs: 60,
            break_secs: 60
        }
    );
    planner.timer_start().unwrap();

    let mut scheduler = Scheduler::start(Duration::from_secs(1), config.quote_period());
    let mut completed = None;
    let mut rotations = 0;
    while completed.is_none() {
        match scheduler.next().await {
            Some(Signal::TimerTick) => completed = planner.timer_tick().unwrap(),
            Some(Signal::RotateQuote) => {
                planner.rotate_quote();
                rotations += 1;
            }
            None => break,
        }
    }
    scheduler.shutdown();
    planner.save_session().unwrap();

    assert!(matches!(
        completed,
        Some(Event::SessionCompleted {
            finished: TimerMode::Focus,
            next: TimerMode::Break,
            ..
        })
    ));
    assert_eq!(planner.progression().xp, 50);
    assert!(!planner.timer().is_active());
    assert!(rotations >= 5);
}

#[tokio::test(start_paused = true)]
async fn paused_timer_ignores_ticks() {
    let config = short_config();
    let mut planner = Planner::open(MemoryStore::new(), Catalog::builtin(), &config).unwrap();
    let mut scheduler = Scheduler::start(Duration::from_secs(1), config.quote_period());

    for _ in 0..120 {
        if let Some(Signal::TimerTick) = scheduler.next().await {
            assert!(planner.timer_tick().unwrap().is_none());
        }
    }
    assert_eq!(planner.timer().remaining_secs(), 60);
    assert_eq!(planner.progression().xp, 0);
}
