use std::future::Future;
use std::time::Duration;

use bacflix_core::planner::TimerSnapshot;
use bacflix_core::{Config, Database, Event, KeyValueStore, Planner, Scheduler, Signal};
use clap::Subcommand;
use tracing::info;

use super::{open_planner, print_json, CmdResult};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Start if paused, pause if running
    Toggle,
    /// Stop and refill a full focus session
    Reset,
    /// Print current timer state as JSON
    Status,
    /// Run the countdown in the foreground until Ctrl-C
    Run,
}

/// Open the planner and apply the time elapsed since the last command.
fn open_caught_up() -> Result<Planner<Database>, Box<dyn std::error::Error>> {
    let mut planner = open_planner()?;
    if let Some(event) = planner.timer_catch_up()? {
        print_json(&event)?;
    }
    Ok(planner)
}

fn print_optional(event: Option<Event>, planner: &Planner<Database>) -> CmdResult {
    match event {
        Some(event) => print_json(&event),
        None => print_json(&TimerSnapshot::from(planner.timer())),
    }
}

pub fn run(action: TimerAction) -> CmdResult {
    match action {
        TimerAction::Start => {
            let mut planner = open_caught_up()?;
            let event = planner.timer_start()?;
            print_optional(event, &planner)?;
        }
        TimerAction::Pause => {
            let mut planner = open_caught_up()?;
            let event = planner.timer_pause()?;
            print_optional(event, &planner)?;
        }
        TimerAction::Toggle => {
            let mut planner = open_caught_up()?;
            let event = planner.timer_toggle()?;
            print_optional(event, &planner)?;
        }
        TimerAction::Reset => {
            let mut planner = open_caught_up()?;
            let event = planner.timer_reset()?;
            print_json(&event)?;
        }
        TimerAction::Status => {
            let planner = open_caught_up()?;
            print_json(&planner.snapshot())?;
        }
        TimerAction::Run => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(run_foreground())?;
        }
    }
    Ok(())
}

async fn run_foreground() -> CmdResult {
    let config = Config::load_or_default();
    let mut planner = open_caught_up()?;
    let scheduler = Scheduler::start(Duration::from_secs(1), config.quote_period());
    drive(&mut planner, scheduler, tokio::signal::ctrl_c()).await
}

/// Run the countdown until it completes, the scheduler stops, or
/// `shutdown` resolves. Shutdown pauses the timer.
async fn drive<S, F>(planner: &mut Planner<S>, mut scheduler: Scheduler, shutdown: F) -> CmdResult
where
    S: KeyValueStore,
    F: Future,
{
    if let Some(event) = planner.timer_start()? {
        print_json(&event)?;
    }
    eprintln!("{} {}  (Ctrl-C to stop)", planner.timer().mode(), planner.timer().formatted());

    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            signal = scheduler.next() => match signal {
                Some(Signal::TimerTick) => {
                    if let Some(event) = planner.timer_tick()? {
                        print_json(&event)?;
                        break;
                    }
                    eprint!("\r{} {}  ", planner.timer().mode(), planner.timer().formatted());
                }
                Some(Signal::RotateQuote) => {
                    planner.rotate_quote();
                    eprintln!("\r{}", planner.quote());
                }
                None => break,
            },
            _ = &mut shutdown => {
                info!("interrupted, pausing timer");
                eprintln!();
                if let Some(event) = planner.timer_pause()? {
                    print_json(&event)?;
                }
                break;
            }
        }
    }

    scheduler.shutdown();
    planner.save_session()?;
    Ok(())
}
