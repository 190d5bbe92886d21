//! Daily protocol generation.
//!
//! Produces today's protocol set from the identity path, the setup
//! configuration, and the day's mission intent. The structure is
//! deterministic for a given date (ordering is shuffled with a
//! date-seeded PCG so re-generation on another machine agrees), and the
//! engine's same-day guard makes the whole operation idempotent.

use chrono::{Datelike, NaiveDate};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use crate::identity::{IdentityPath, ModeConfig, TrainingLocation};
use crate::protocol::{new_protocol_id, Protocol, ProtocolSource, TaskType};
use crate::settings::DifficultyLevel;

/// Daily self-reported energy level that scales generation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MissionIntent {
    Normal,
    HighEnergy,
    LowEnergy,
    Recovery,
}

impl Default for MissionIntent {
    fn default() -> Self {
        MissionIntent::Normal
    }
}

impl MissionIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissionIntent::Normal => "normal",
            MissionIntent::HighEnergy => "high-energy",
            MissionIntent::LowEnergy => "low-energy",
            MissionIntent::Recovery => "recovery",
        }
    }
}

impl std::str::FromStr for MissionIntent {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(MissionIntent::Normal),
            "high-energy" | "high" => Ok(MissionIntent::HighEnergy),
            "low-energy" | "low" => Ok(MissionIntent::LowEnergy),
            "recovery" => Ok(MissionIntent::Recovery),
            other => Err(crate::error::ValidationError::InvalidValue {
                field: "mission_intent".into(),
                message: format!("unknown mission intent '{other}'"),
            }),
        }
    }
}

/// A template entry the generator draws from.
#[derive(Debug, Clone)]
struct TemplateTask {
    name: String,
    task_type: TaskType,
    base_xp: u32,
}

fn t(name: impl Into<String>, task_type: TaskType, base_xp: u32) -> TemplateTask {
    TemplateTask {
        name: name.into(),
        task_type,
        base_xp,
    }
}

/// Quick-create suggestions per identity path, surfaced by bindings.
pub fn suggestions(path: IdentityPath) -> &'static [(&'static str, TaskType)] {
    match path {
        IdentityPath::Scholar => &[
            ("Read Chapter", TaskType::Lesson),
            ("Solve Problems", TaskType::Practice),
            ("Review Notes", TaskType::Revision),
            ("Take Practice Test", TaskType::Test),
        ],
        IdentityPath::Warrior => &[
            ("Morning Workout", TaskType::Workout),
            ("Cardio Session", TaskType::Cardio),
            ("Strength Training", TaskType::Workout),
            ("Recovery Session", TaskType::Rest),
        ],
        IdentityPath::Focus => &[
            ("Deep Work Session", TaskType::Deepwork),
            ("Focused Task", TaskType::Admin),
            ("Planning Session", TaskType::Planning),
            ("Reflect & Review", TaskType::Reflection),
        ],
        IdentityPath::Discipline => &[
            ("Daily Habit", TaskType::Habit),
            ("Routine Task", TaskType::Admin),
            ("Self-Discipline Challenge", TaskType::Habit),
            ("Evening Reflection", TaskType::Reflection),
        ],
    }
}

/// Build the full template pool for a path, personalized from the setup
/// configuration.
fn template_pool(config: &ModeConfig) -> Vec<TemplateTask> {
    match config {
        ModeConfig::Scholar {
            subjects,
            hours_daily,
            ..
        } => {
            let mut pool: Vec<TemplateTask> = subjects
                .iter()
                .take(4)
                .map(|s| t(format!("Study {s}"), TaskType::Lesson, 15))
                .collect();
            if pool.is_empty() {
                pool.push(t("Read Chapter", TaskType::Lesson, 15));
            }
            pool.push(t("Solve Problems", TaskType::Practice, 15));
            pool.push(t("Review Notes", TaskType::Revision, 10));
            if *hours_daily >= 4 {
                pool.push(t("Active Recall Session", TaskType::Recall, 20));
            }
            pool.push(t("Take Practice Test", TaskType::Test, 20));
            pool
        }
        ModeConfig::Warrior {
            location,
            days_per_week,
            ..
        } => {
            let workout = match location {
                TrainingLocation::Home => "Home Circuit",
                TrainingLocation::Gym => "Gym Session",
            };
            let mut pool = vec![
                t(workout, TaskType::Workout, 20),
                t("Cardio Session", TaskType::Cardio, 15),
                t("Stretch & Mobility", TaskType::Rest, 10),
            ];
            if *days_per_week >= 5 {
                pool.push(t("Strength Training", TaskType::Workout, 20));
            }
            pool.push(t("Meal Prep", TaskType::Admin, 10));
            pool
        }
        ModeConfig::Focus { hours_available, .. } => {
            let mut pool = vec![
                t("Deep Work Session", TaskType::Deepwork, 20),
                t("Plan Tomorrow", TaskType::Planning, 10),
                t("Clear Admin Queue", TaskType::Admin, 10),
            ];
            if *hours_available >= 6 {
                pool.push(t("Second Deep Work Block", TaskType::Deepwork, 20));
            }
            pool.push(t("Reflect & Review", TaskType::Reflection, 10));
            pool
        }
        ModeConfig::Discipline { wake_time } => vec![
            t(format!("Wake at {wake_time}"), TaskType::Habit, 15),
            t("Make Your Bed", TaskType::Habit, 10),
            t("No Snooze Challenge", TaskType::Habit, 15),
            t("Routine Task", TaskType::Admin, 10),
            t("Evening Reflection", TaskType::Reflection, 10),
        ],
    }
}

/// Task count and XP scaling for a mission intent.
fn intent_scaling(intent: MissionIntent, pool_len: usize) -> (usize, f64) {
    match intent {
        MissionIntent::HighEnergy => (pool_len, 1.25),
        MissionIntent::Normal => (pool_len.saturating_sub(1).max(1), 1.0),
        MissionIntent::LowEnergy => (3.min(pool_len), 0.75),
        MissionIntent::Recovery => (1, 0.5),
    }
}

fn difficulty_scaling(difficulty: DifficultyLevel, count: usize, pool_len: usize) -> (usize, f64) {
    match difficulty {
        DifficultyLevel::Easy => (count.saturating_sub(1).max(1), 0.8),
        DifficultyLevel::Normal => (count, 1.0),
        DifficultyLevel::Hard => ((count + 1).min(pool_len), 1.2),
    }
}

/// Generate the day's protocol set.
///
/// Recovery intent prefers the lightest tasks; otherwise the pool is
/// shuffled with a date-seeded RNG and truncated to the scaled count. All
/// generated protocols are daily and carry [`ProtocolSource::Generated`].
pub fn generate_protocols(
    identity: IdentityPath,
    config: &ModeConfig,
    intent: MissionIntent,
    difficulty: DifficultyLevel,
    today: NaiveDate,
) -> Vec<Protocol> {
    let mut pool = template_pool(config);
    let (count, intent_xp) = intent_scaling(intent, pool.len());
    let (count, difficulty_xp) = difficulty_scaling(difficulty, count, pool.len());

    if intent == MissionIntent::Recovery {
        // Lightest task first so truncation keeps the minimal set.
        pool.sort_by_key(|t| t.base_xp);
    } else {
        let mut rng = Pcg64::seed_from_u64(today.num_days_from_ce() as u64);
        pool.shuffle(&mut rng);
    }
    pool.truncate(count);

    pool.into_iter()
        .map(|tpl| Protocol {
            id: new_protocol_id(),
            name: tpl.name,
            category: identity,
            task_type: tpl.task_type,
            xp: scale_xp(tpl.base_xp, intent_xp * difficulty_xp),
            completed: false,
            streak: 0,
            is_daily: true,
            scheduled_time: None,
            remind: false,
            notification_settings: None,
            source: ProtocolSource::Generated,
            last_completed_on: None,
            undo: None,
        })
        .collect()
}

fn scale_xp(base: u32, factor: f64) -> u32 {
    ((base as f64 * factor).round() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn scholar_config() -> ModeConfig {
        ModeConfig::Scholar {
            subjects: vec!["Math".into(), "Physics".into()],
            hours_daily: 3,
            exam_date: None,
        }
    }

    #[test]
    fn scholar_pool_uses_subjects() {
        let protocols = generate_protocols(
            IdentityPath::Scholar,
            &scholar_config(),
            MissionIntent::HighEnergy,
            DifficultyLevel::Normal,
            date(2026, 8, 26),
        );
        assert!(protocols.iter().any(|p| p.name == "Study Math"));
        assert!(protocols.iter().all(|p| p.is_daily));
        assert!(protocols
            .iter()
            .all(|p| p.source == ProtocolSource::Generated));
    }

    #[test]
    fn high_energy_outnumbers_low_energy() {
        let today = date(2026, 8, 26);
        let cfg = scholar_config();
        let high = generate_protocols(
            IdentityPath::Scholar,
            &cfg,
            MissionIntent::HighEnergy,
            DifficultyLevel::Normal,
            today,
        );
        let low = generate_protocols(
            IdentityPath::Scholar,
            &cfg,
            MissionIntent::LowEnergy,
            DifficultyLevel::Normal,
            today,
        );
        assert!(high.len() > low.len());
        assert_eq!(low.len(), 3);
    }

    #[test]
    fn recovery_is_a_single_light_task() {
        let protocols = generate_protocols(
            IdentityPath::Warrior,
            &ModeConfig::Warrior {
                fitness_level: crate::identity::FitnessLevel::Beginner,
                location: TrainingLocation::Home,
                days_per_week: 4,
            },
            MissionIntent::Recovery,
            DifficultyLevel::Normal,
            date(2026, 8, 26),
        );
        assert_eq!(protocols.len(), 1);
        // Lightest template in the warrior pool.
        assert_eq!(protocols[0].task_type, TaskType::Rest);
    }

    #[test]
    fn intent_scales_xp_bands() {
        let today = date(2026, 8, 26);
        let cfg = scholar_config();
        let high = generate_protocols(
            IdentityPath::Scholar,
            &cfg,
            MissionIntent::HighEnergy,
            DifficultyLevel::Normal,
            today,
        );
        let low = generate_protocols(
            IdentityPath::Scholar,
            &cfg,
            MissionIntent::LowEnergy,
            DifficultyLevel::Normal,
            today,
        );
        let high_max = high.iter().map(|p| p.xp).max().unwrap();
        let low_max = low.iter().map(|p| p.xp).max().unwrap();
        assert!(high_max > low_max);
    }

    #[test]
    fn ordering_is_deterministic_per_date() {
        let today = date(2026, 8, 26);
        let cfg = scholar_config();
        let a = generate_protocols(
            IdentityPath::Scholar,
            &cfg,
            MissionIntent::Normal,
            DifficultyLevel::Normal,
            today,
        );
        let b = generate_protocols(
            IdentityPath::Scholar,
            &cfg,
            MissionIntent::Normal,
            DifficultyLevel::Normal,
            today,
        );
        let names_a: Vec<_> = a.iter().map(|p| p.name.clone()).collect();
        let names_b: Vec<_> = b.iter().map(|p| p.name.clone()).collect();
        assert_eq!(names_a, names_b);
    }

    #[test]
    fn hard_difficulty_raises_xp() {
        let today = date(2026, 8, 26);
        let cfg = scholar_config();
        let normal = generate_protocols(
            IdentityPath::Scholar,
            &cfg,
            MissionIntent::Normal,
            DifficultyLevel::Normal,
            today,
        );
        let hard = generate_protocols(
            IdentityPath::Scholar,
            &cfg,
            MissionIntent::Normal,
            DifficultyLevel::Hard,
            today,
        );
        let avg = |ps: &[Protocol]| {
            ps.iter().map(|p| p.xp as f64).sum::<f64>() / ps.len() as f64
        };
        assert!(avg(&hard) > avg(&normal));
    }

    #[test]
    fn suggestions_cover_all_paths() {
        for path in IdentityPath::ALL {
            assert_eq!(suggestions(path).len(), 4);
        }
    }

    #[test]
    fn mission_intent_parses_kebab_case() {
        assert_eq!(
            "high-energy".parse::<MissionIntent>().unwrap(),
            MissionIntent::HighEnergy
        );
        assert_eq!(
            "recovery".parse::<MissionIntent>().unwrap(),
            MissionIntent::Recovery
        );
        assert!("hyper".parse::<MissionIntent>().is_err());
    }
}
