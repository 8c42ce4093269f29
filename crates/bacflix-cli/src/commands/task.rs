use clap::Subcommand;
use serde_json::json;

use super::{open_planner, print_json, CmdResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Mark a task done / not done
    Toggle {
        /// Task ID (e.g. task_0_1)
        id: String,
    },
    /// Rate confidence for a task
    Rate {
        /// Task ID
        id: String,
        /// Rating from 0 to 5
        value: u8,
    },
    /// Show one task
    Show {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction) -> CmdResult {
    let mut planner = open_planner()?;

    match action {
        TaskAction::Toggle { id } => match planner.toggle_task(&id)? {
            Some(event) => print_json(&event)?,
            None => print_json(&json!({ "type": "Ignored", "id": id }))?,
        },
        TaskAction::Rate { id, value } => match planner.set_confidence(&id, value)? {
            Some(event) => print_json(&event)?,
            None => print_json(&json!({ "type": "Ignored", "id": id }))?,
        },
        TaskAction::Show { id } => match planner.tasks().get(&id) {
            Some(task) => print_json(task)?,
            None => return Err(format!("task not found: {id}").into()),
        },
    }
    Ok(())
}
