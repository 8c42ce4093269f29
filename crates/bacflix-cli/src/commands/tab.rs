use bacflix_core::Tab;

use super::{open_planner, print_json, CmdResult};

pub fn run(tab: &str) -> CmdResult {
    let tab: Tab = tab.parse()?;
    let mut planner = open_planner()?;
    let event = planner.select_tab(tab)?;
    print_json(&event)
}
