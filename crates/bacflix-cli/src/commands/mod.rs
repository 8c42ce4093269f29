pub mod branch;
pub mod cards;
pub mod config;
pub mod plan;
pub mod quote;
pub mod stats;
pub mod subject;
pub mod tab;
pub mod task;
pub mod timer;

use bacflix_core::{Catalog, Config, Database, Planner};
use serde::Serialize;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Open the planner over the on-disk store with the user's config.
pub fn open_planner() -> Result<Planner<Database>, Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open()?;
    Ok(Planner::open(db, Catalog::builtin(), &config)?)
}

pub fn print_json<T: Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
