//! Reminder scan command.

use pathforge_core::{scan_reminders, FireKind};

use crate::common;

pub fn run(at: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let (_db, engine) = common::open()?;
    let now = at.unwrap_or_else(common::now_hhmm);
    let state = engine.state();

    let fires = scan_reminders(&state.protocols, &state.settings, &now);
    if fires.is_empty() {
        println!("No reminders due at {now}");
        return Ok(());
    }
    for fire in fires {
        let lead = match fire.kind {
            FireKind::Lead => " (heads-up)",
            FireKind::Start => "",
        };
        match fire.tasks_left {
            Some(left) => println!("{}{lead} - {left} tasks left", fire.protocol_name),
            None => println!("{}{lead}", fire.protocol_name),
        }
    }
    Ok(())
}
