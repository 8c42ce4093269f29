use bacflix_core::catalog::DAY_LABELS;
use clap::Subcommand;

use super::{open_planner, print_json, CmdResult};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Generate a new week (replaces the current one)
    Generate,
    /// Show the current week
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: PlanAction) -> CmdResult {
    let mut planner = open_planner()?;

    match action {
        PlanAction::Generate => {
            let event = planner.generate_plan()?;
            print_json(&event)?;
        }
        PlanAction::Show { json } => {
            let tasks = planner.tasks().ordered();
            if json {
                print_json(&tasks)?;
                return Ok(());
            }
            if tasks.is_empty() {
                println!("No plan yet. Run `bacflix plan generate`.");
                return Ok(());
            }
            let mut current_day = None;
            for task in tasks {
                if current_day != Some(task.day) {
                    current_day = Some(task.day);
                    let label = DAY_LABELS.get(usize::from(task.day)).copied().unwrap_or("?");
                    println!("{label}");
                }
                let mark = if task.done { "x" } else { " " };
                let stars = "*".repeat(usize::from(task.conf));
                println!("  [{mark}] {} {}  {}  {stars}", task.time, task.id, task.subj);
            }
            println!("progress: {}%", planner.progress());
        }
    }
    Ok(())
}
