//! Identity-specific setup commands.

use chrono::NaiveDate;
use clap::Subcommand;
use pathforge_core::identity::{FitnessLevel, FocusType, ModeConfig, TrainingLocation};

use crate::common;

#[derive(Subcommand)]
pub enum SetupAction {
    /// Scholar setup: subjects and study hours
    Scholar {
        /// Comma-separated subjects
        #[arg(long)]
        subjects: String,
        /// Study hours per day
        #[arg(long, default_value = "2")]
        hours_daily: u8,
        /// Exam date (YYYY-MM-DD)
        #[arg(long)]
        exam_date: Option<NaiveDate>,
    },
    /// Warrior setup: fitness level and training plan
    Warrior {
        /// beginner, intermediate, or advanced
        #[arg(long, default_value = "beginner")]
        fitness_level: String,
        /// home or gym
        #[arg(long, default_value = "home")]
        location: String,
        /// Training days per week
        #[arg(long, default_value = "3")]
        days_per_week: u8,
    },
    /// Focus setup: focus type and available hours
    Focus {
        /// student, entrepreneur, or creator
        #[arg(long, default_value = "student")]
        focus_type: String,
        /// Focus hours available per day
        #[arg(long, default_value = "4")]
        hours_available: u8,
    },
    /// Discipline setup: wake time
    Discipline {
        /// Wake time as HH:MM
        #[arg(long, default_value = "06:00")]
        wake_time: String,
    },
    /// Show the current setup configuration
    Show,
}

fn parse_fitness(s: &str) -> Result<FitnessLevel, String> {
    match s.to_ascii_lowercase().as_str() {
        "beginner" => Ok(FitnessLevel::Beginner),
        "intermediate" => Ok(FitnessLevel::Intermediate),
        "advanced" => Ok(FitnessLevel::Advanced),
        other => Err(format!("unknown fitness level '{other}'")),
    }
}

fn parse_location(s: &str) -> Result<TrainingLocation, String> {
    match s.to_ascii_lowercase().as_str() {
        "home" => Ok(TrainingLocation::Home),
        "gym" => Ok(TrainingLocation::Gym),
        other => Err(format!("unknown training location '{other}'")),
    }
}

fn parse_focus_type(s: &str) -> Result<FocusType, String> {
    match s.to_ascii_lowercase().as_str() {
        "student" => Ok(FocusType::Student),
        "entrepreneur" => Ok(FocusType::Entrepreneur),
        "creator" => Ok(FocusType::Creator),
        other => Err(format!("unknown focus type '{other}'")),
    }
}

pub fn run(action: SetupAction) -> Result<(), Box<dyn std::error::Error>> {
    let (db, mut engine) = common::open()?;

    let config = match action {
        SetupAction::Scholar {
            subjects,
            hours_daily,
            exam_date,
        } => ModeConfig::Scholar {
            subjects: subjects
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            hours_daily,
            exam_date,
        },
        SetupAction::Warrior {
            fitness_level,
            location,
            days_per_week,
        } => ModeConfig::Warrior {
            fitness_level: parse_fitness(&fitness_level)?,
            location: parse_location(&location)?,
            days_per_week,
        },
        SetupAction::Focus {
            focus_type,
            hours_available,
        } => ModeConfig::Focus {
            focus_type: parse_focus_type(&focus_type)?,
            hours_available,
        },
        SetupAction::Discipline { wake_time } => ModeConfig::Discipline { wake_time },
        SetupAction::Show => {
            match &engine.state().mode_config {
                Some(config) => println!("{}", serde_json::to_string_pretty(config)?),
                None => println!("Setup not completed yet"),
            }
            return Ok(());
        }
    };

    engine.set_mode_config(config)?;
    common::save(&db, &engine)?;
    println!("Setup saved");
    Ok(())
}
