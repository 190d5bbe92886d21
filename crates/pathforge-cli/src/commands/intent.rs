//! Daily mission-intent commands.

use clap::Subcommand;
use pathforge_core::MissionIntent;

use crate::common;

#[derive(Subcommand)]
pub enum IntentAction {
    /// Set today's mission intent
    Set {
        /// normal, high-energy, low-energy, or recovery
        intent: String,
    },
    /// Show today's mission intent
    Show,
}

pub fn run(action: IntentAction) -> Result<(), Box<dyn std::error::Error>> {
    let (db, mut engine) = common::open()?;
    let today = common::today();

    match action {
        IntentAction::Set { intent } => {
            let intent: MissionIntent = intent.parse()?;
            let events = engine.set_mission_intent(intent, today);
            common::save(&db, &engine)?;
            common::print_events(&events);
        }
        IntentAction::Show => {
            let state = engine.state();
            println!("Intent: {}", state.mission_intent.as_str());
            if engine.mission_intent_pending(today) {
                println!("Not set yet today");
            }
        }
    }
    Ok(())
}
