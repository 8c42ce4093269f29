use super::{open_planner, print_json, CmdResult};

pub fn run() -> CmdResult {
    let planner = open_planner()?;
    print_json(&planner.stats())
}
