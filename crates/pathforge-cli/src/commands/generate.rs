//! Daily protocol generation command.

use crate::common;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (db, mut engine) = common::open()?;
    let events = engine.generate_daily_tasks(common::today());
    common::save(&db, &engine)?;
    if events.is_empty() {
        println!("Nothing generated (already generated today, auto-generation off, or setup incomplete)");
    } else {
        common::print_events(&events);
    }
    Ok(())
}
