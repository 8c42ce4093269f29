use super::{open_planner, CmdResult};

pub fn run() -> CmdResult {
    let mut planner = open_planner()?;
    planner.rotate_quote();
    println!("{}", planner.quote());
    Ok(())
}
