use bacflix_core::Mastery;
use clap::Subcommand;

use super::{open_planner, print_json, CmdResult};

#[derive(Subcommand)]
pub enum SubjectAction {
    /// List subjects of the active branch
    List,
    /// Set the self-assessed level of a subject
    Level {
        /// Subject name
        name: String,
        /// One of: low, med, high
        level: String,
    },
}

pub fn run(action: SubjectAction) -> CmdResult {
    let mut planner = open_planner()?;

    match action {
        SubjectAction::List => {
            print_json(&planner.subjects())?;
        }
        SubjectAction::Level { name, level } => {
            let lvl: Mastery = level.parse()?;
            let event = planner.set_subject_level(&name, lvl)?;
            print_json(&event)?;
        }
    }
    Ok(())
}
