//! Day rollover and momentum-check commands.

use clap::Subcommand;
use pathforge_core::FailureReason;

use crate::common;

#[derive(Subcommand)]
pub enum DayAction {
    /// Apply the day-boundary rollover (idempotent per day)
    Roll,
    /// Check whether the momentum check is due
    Momentum,
    /// Record a failure reason from the momentum check
    Failure {
        /// time, motivation, distraction, or overwhelmed
        reason: String,
    },
}

pub fn run(action: DayAction) -> Result<(), Box<dyn std::error::Error>> {
    let (db, mut engine) = common::open()?;
    let today = common::today();

    match action {
        DayAction::Roll => {
            let events = engine.roll_day(today);
            common::save(&db, &engine)?;
            if events.is_empty() {
                println!("Already rolled today");
            } else {
                common::print_events(&events);
            }
        }
        DayAction::Momentum => {
            if engine.needs_momentum_check(today) {
                println!("Momentum check due: no completions for 2+ days");
            } else {
                println!("Momentum intact");
            }
        }
        DayAction::Failure { reason } => {
            let reason: FailureReason = reason.parse()?;
            let events = engine.record_failure_reason(reason, today);
            common::save(&db, &engine)?;
            common::print_events(&events);
        }
    }
    Ok(())
}
