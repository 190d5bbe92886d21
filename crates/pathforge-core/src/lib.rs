//! # Pathforge Core Library
//!
//! This library provides the core business logic for Pathforge, a personal
//! habit gamification client. It implements a CLI-first philosophy where all
//! operations are available via a standalone CLI binary, with any GUI being
//! a thin presentation layer over the same core library.
//!
//! ## Architecture
//!
//! - **Engine**: A single owned state aggregate with explicit transition
//!   methods; callers pass the current calendar date so the engine never
//!   reads the wall clock for day-boundary logic
//! - **Storage**: SQLite-backed key-value persistence of the full state
//!   snapshot, loaded synchronously at startup and written through after
//!   every mutation
//! - **Generator**: Produces today's protocol set from the chosen identity
//!   path, setup configuration, and the day's mission intent
//! - **Reminder**: Read-only minute-granularity scan that surfaces due
//!   protocol notifications to the binding
//!
//! ## Key Components
//!
//! - [`Engine`]: Core state aggregate and mutation surface
//! - [`Database`]: Persistent snapshot storage
//! - [`Progression`]: Level and phase derivation from cumulative XP
//! - [`Event`]: State-change notifications consumed by bindings

pub mod engine;
pub mod error;
pub mod events;
pub mod generator;
pub mod history;
pub mod identity;
pub mod premium;
pub mod progression;
pub mod protocol;
pub mod reminder;
pub mod settings;
pub mod storage;
pub mod strength;
pub mod theme;

pub use engine::{Engine, EngineState};
pub use error::{CoreError, StorageError, ValidationError};
pub use events::Event;
pub use generator::{generate_protocols, suggestions, MissionIntent};
pub use history::{FailureReason, History};
pub use identity::{Gender, IdentityPath, ModeConfig, Profile};
pub use premium::PremiumState;
pub use progression::Progression;
pub use protocol::{NewProtocol, NotificationSettings, Protocol, TaskType};
pub use reminder::{scan_reminders, FireKind, ReminderFire};
pub use settings::{CustomSettings, DifficultyLevel};
pub use storage::{Database, StateStore};
pub use theme::Theme;
