use clap::Subcommand;
use serde_json::json;

use super::{open_planner, print_json, CmdResult};

#[derive(Subcommand)]
pub enum BranchAction {
    /// List available branches
    List,
    /// Switch to a branch (resets subject levels)
    Select {
        /// Branch id (e.g. "math", "science", "tech")
        id: String,
    },
}

pub fn run(action: BranchAction) -> CmdResult {
    let mut planner = open_planner()?;

    match action {
        BranchAction::List => {
            let active = planner.branch_id().to_string();
            let branches: Vec<_> = planner
                .catalog()
                .branches()
                .iter()
                .map(|b| {
                    json!({
                        "id": b.id,
                        "name": b.name,
                        "subjects": b.subjects.len(),
                        "active": b.id == active,
                    })
                })
                .collect();
            print_json(&branches)?;
        }
        BranchAction::Select { id } => {
            let event = planner.select_branch(&id)?;
            print_json(&event)?;
        }
    }
    Ok(())
}
