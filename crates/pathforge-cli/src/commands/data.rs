//! Data management commands.

use clap::Subcommand;
use pathforge_core::StateStore;

use crate::common;

#[derive(Subcommand)]
pub enum DataAction {
    /// Export the full state snapshot as JSON
    Export,
    /// Wipe all data and return to onboarding
    Wipe {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: DataAction) -> Result<(), Box<dyn std::error::Error>> {
    let (db, mut engine) = common::open()?;

    match action {
        DataAction::Export => {
            println!("{}", serde_json::to_string_pretty(engine.state())?);
        }
        DataAction::Wipe { yes } => {
            if !yes {
                return Err("refusing to wipe without --yes".into());
            }
            let events = engine.wipe();
            db.wipe()?;
            common::print_events(&events);
        }
    }
    Ok(())
}
