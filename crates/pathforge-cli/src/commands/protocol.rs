//! Protocol management commands.

use clap::Subcommand;
use pathforge_core::{suggestions, NewProtocol, NotificationSettings, TaskType};

use crate::common;

#[derive(Subcommand)]
pub enum ProtocolAction {
    /// Create a protocol
    Add {
        /// Protocol name
        name: String,
        /// Task type (lesson, practice, workout, deepwork, habit, ...)
        #[arg(long, default_value = "habit")]
        task_type: String,
        /// Base XP awarded on completion
        #[arg(long, default_value = "10")]
        xp: u32,
        /// Reset at the day boundary instead of retiring
        #[arg(long)]
        daily: bool,
        /// Scheduled time HH:MM; enables reminders
        #[arg(long)]
        remind_at: Option<String>,
        /// Reminder lead time in minutes
        #[arg(long, default_value = "15")]
        reminder_minutes: u32,
    },
    /// List protocols
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Toggle completion state
    Toggle {
        /// Protocol ID
        id: String,
    },
    /// Remove a protocol
    Remove {
        /// Protocol ID
        id: String,
    },
    /// Quick-create suggestions for the chosen identity
    Suggest,
}

pub fn run(action: ProtocolAction) -> Result<(), Box<dyn std::error::Error>> {
    let (db, mut engine) = common::open()?;

    match action {
        ProtocolAction::Add {
            name,
            task_type,
            xp,
            daily,
            remind_at,
            reminder_minutes,
        } => {
            let task_type: TaskType = task_type.parse()?;
            let mut spec = NewProtocol::new(name, task_type, xp);
            if daily {
                spec = spec.daily();
            }
            if let Some(at) = remind_at {
                spec = spec.with_reminder(
                    at,
                    NotificationSettings {
                        reminder_minutes,
                        ..Default::default()
                    },
                );
            }
            let (_, events) = engine.add_protocol(spec)?;
            common::save(&db, &engine)?;
            common::print_events(&events);
        }
        ProtocolAction::List { json } => {
            let protocols = &engine.state().protocols;
            if json {
                println!("{}", serde_json::to_string_pretty(protocols)?);
            } else if protocols.is_empty() {
                println!("No protocols");
            } else {
                for p in protocols {
                    let mark = if p.completed { "x" } else { " " };
                    println!(
                        "[{mark}] {:<30} {:<14} {:>4} XP  streak {:<3} {}",
                        p.name,
                        p.task_type.label(),
                        p.xp,
                        p.streak,
                        p.id
                    );
                }
            }
        }
        ProtocolAction::Toggle { id } => {
            let events = engine.toggle_protocol(&id, common::today())?;
            common::save(&db, &engine)?;
            common::print_events(&events);
        }
        ProtocolAction::Remove { id } => {
            let events = engine.remove_protocol(&id)?;
            common::save(&db, &engine)?;
            common::print_events(&events);
        }
        ProtocolAction::Suggest => match engine.state().identity {
            Some(path) => {
                for (name, task_type) in suggestions(path) {
                    println!("{:<28} {}", name, task_type.label());
                }
            }
            None => println!("Choose an identity path first: pathforge-cli onboard identity"),
        },
    }
    Ok(())
}
