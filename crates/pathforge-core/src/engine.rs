//! The progression/state engine.
//!
//! A single owned aggregate with explicit transition methods. Every
//! mutating call recomputes derived state (level, phase, identity
//! strength, premium unlock flags) before it returns, so a snapshot taken
//! at any point is internally consistent. Calendar-day decisions take the
//! date as a parameter; the engine never reads the wall clock.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, StorageError, ValidationError};
use crate::events::Event;
use crate::generator::{generate_protocols, MissionIntent};
use crate::history::{FailureReason, History};
use crate::identity::{IdentityPath, ModeConfig, Profile};
use crate::premium::{PremiumState, WeekKey};
use crate::progression::Progression;
use crate::protocol::{CompletionUndo, NewProtocol, Protocol, ProtocolSource};
use crate::settings::CustomSettings;
use crate::storage::StateStore;
use crate::strength::identity_strength;
use crate::theme::Theme;

/// Snapshot schema version, bumped on incompatible layout changes.
pub const STATE_VERSION: u32 = 1;

/// The full persisted aggregate. Serialized as one snapshot; unknown or
/// missing fields deserialize to defaults so older snapshots keep loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineState {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub identity: Option<IdentityPath>,
    #[serde(default)]
    pub mode_config: Option<ModeConfig>,
    #[serde(default)]
    pub protocols: Vec<Protocol>,
    #[serde(default)]
    pub total_xp: u64,
    #[serde(default)]
    pub history: History,
    #[serde(default)]
    pub mission_intent: MissionIntent,
    #[serde(default)]
    pub last_mission_intent_date: Option<NaiveDate>,
    #[serde(default)]
    pub daily_tasks_generated: bool,
    #[serde(default)]
    pub last_generated_date: Option<NaiveDate>,
    #[serde(default)]
    pub last_rolled_date: Option<NaiveDate>,
    #[serde(default)]
    pub settings: CustomSettings,
    #[serde(default)]
    pub premium: PremiumState,
    /// Cached identity strength; always reproducible from the registry.
    #[serde(default)]
    pub identity_strength: u8,
    #[serde(default)]
    pub theme: Theme,
}

fn default_version() -> u32 {
    STATE_VERSION
}

impl Default for EngineState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            profile: None,
            identity: None,
            mode_config: None,
            protocols: Vec::new(),
            total_xp: 0,
            history: History::default(),
            mission_intent: MissionIntent::default(),
            last_mission_intent_date: None,
            daily_tasks_generated: false,
            last_generated_date: None,
            last_rolled_date: None,
            settings: CustomSettings::default(),
            premium: PremiumState::default(),
            identity_strength: 0,
            theme: Theme::default(),
        }
    }
}

/// The state engine. Owns [`EngineState`] and exposes the mutation and
/// query surface consumed by bindings.
#[derive(Debug, Default)]
pub struct Engine {
    state: EngineState,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: EngineState) -> Self {
        Engine { state }
    }

    /// Load from a store, falling back to the default state when nothing is
    /// persisted or the snapshot fails to decode (fail-soft first run).
    pub fn load_or_default(store: &dyn StateStore) -> Self {
        match store.load() {
            Ok(Some(state)) => Engine { state },
            Ok(None) | Err(_) => Engine::default(),
        }
    }

    /// Write the current snapshot through to the store.
    pub fn persist(&self, store: &dyn StateStore) -> Result<(), StorageError> {
        store.save(&self.state)
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn into_state(self) -> EngineState {
        self.state
    }

    // ----- queries ---------------------------------------------------------

    pub fn progression(&self) -> Progression {
        Progression::for_xp(self.state.total_xp)
    }

    /// Setup is complete once an identity-specific config exists.
    pub fn has_setup(&self) -> bool {
        self.state.mode_config.is_some()
    }

    pub fn is_premium(&self, today: NaiveDate) -> bool {
        self.state.premium.is_premium(today)
    }

    /// Longest per-protocol streak in the current registry.
    pub fn best_streak(&self) -> u32 {
        self.state.protocols.iter().map(|p| p.streak).max().unwrap_or(0)
    }

    /// Whether the daily mission-intent prompt is still due today.
    pub fn mission_intent_pending(&self, today: NaiveDate) -> bool {
        self.state.last_mission_intent_date != Some(today)
    }

    /// Dashboard trigger for the momentum-check flow.
    pub fn needs_momentum_check(&self, today: NaiveDate) -> bool {
        self.has_setup() && self.state.history.needs_momentum_check(today)
    }

    // ----- onboarding ------------------------------------------------------

    /// Choose the identity path. Allowed only once; there is no transition
    /// rule for changing paths after onboarding.
    pub fn set_identity(&mut self, path: IdentityPath) -> Result<(), ValidationError> {
        match self.state.identity {
            Some(current) => Err(ValidationError::IdentityAlreadySet {
                current: current.as_str().into(),
            }),
            None => {
                self.state.identity = Some(path);
                Ok(())
            }
        }
    }

    /// Replace the profile wholesale. Validation happens in
    /// [`Profile::new`]; a constructed profile is always acceptable.
    pub fn set_profile(&mut self, profile: Profile) {
        self.state.profile = Some(profile);
    }

    /// Store the identity-specific setup configuration.
    pub fn set_mode_config(&mut self, config: ModeConfig) -> Result<(), ValidationError> {
        let identity = self.state.identity.ok_or(ValidationError::IdentityUnset)?;
        if config.path() != identity {
            return Err(ValidationError::InvalidValue {
                field: "mode_config".into(),
                message: format!(
                    "config is for '{}' but identity is '{}'",
                    config.path(),
                    identity
                ),
            });
        }
        self.state.mode_config = Some(config);
        Ok(())
    }

    // ----- settings --------------------------------------------------------

    pub fn settings(&self) -> &CustomSettings {
        &self.state.settings
    }

    pub fn set_setting(&mut self, key: &str, value: &str) -> Result<(), ValidationError> {
        self.state.settings.set(key, value)
    }

    /// Replace the settings wholesale, clamping bounded fields.
    pub fn update_settings(&mut self, settings: CustomSettings) {
        self.state.settings = settings.normalized();
    }

    pub fn reset_settings(&mut self) {
        self.state.settings = CustomSettings::default();
    }

    pub fn set_theme(&mut self, theme: Theme, today: NaiveDate) -> Result<(), ValidationError> {
        let phase = self.progression().phase;
        if !theme.unlocked(phase, self.is_premium(today)) {
            return Err(ValidationError::InvalidValue {
                field: "theme".into(),
                message: format!("theme '{}' is not unlocked yet", theme.as_str()),
            });
        }
        self.state.theme = theme;
        Ok(())
    }

    // ----- protocol registry -----------------------------------------------

    /// Create a user protocol. Base XP is stored as supplied; the settings
    /// multiplier applies at award time only.
    pub fn add_protocol(&mut self, spec: NewProtocol) -> Result<(String, Vec<Event>), CoreError> {
        if spec.name.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: "name".into(),
            }
            .into());
        }
        let identity = self.state.identity.ok_or(ValidationError::IdentityUnset)?;
        let protocol = Protocol::from_new(spec, identity);
        let id = protocol.id.clone();
        let name = protocol.name.clone();
        self.state.protocols.push(protocol);
        self.refresh_strength();
        let events = vec![Event::ProtocolAdded {
            id: id.clone(),
            name,
        }];
        Ok((id, events))
    }

    /// Remove a protocol. Earned XP stays earned; only the registry entry
    /// goes away.
    pub fn remove_protocol(&mut self, id: &str) -> Result<Vec<Event>, ValidationError> {
        let before = self.state.protocols.len();
        self.state.protocols.retain(|p| p.id != id);
        if self.state.protocols.len() == before {
            return Err(ValidationError::UnknownProtocol { id: id.into() });
        }
        self.refresh_strength();
        Ok(vec![Event::ProtocolRemoved { id: id.into() }])
    }

    /// Flip a protocol's completion state.
    ///
    /// Completing awards `round(base_xp * multiplier)`, advances the
    /// protocol streak under the consecutive-day rule, bumps the history
    /// buckets and the account streak, then re-derives level, phase,
    /// strength, and premium flags. Reopening reverses every one of those
    /// effects; toggling twice is a no-op on all derived state.
    pub fn toggle_protocol(
        &mut self,
        id: &str,
        today: NaiveDate,
    ) -> Result<Vec<Event>, CoreError> {
        let idx = self
            .state
            .protocols
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| ValidationError::UnknownProtocol { id: id.into() })?;

        let prev = self.progression();
        let mut events = Vec::new();

        if !self.state.protocols[idx].completed {
            self.complete_protocol(idx, today, &mut events);
        } else {
            self.reopen_protocol(idx, &mut events);
        }

        self.finish_mutation(prev, &mut events);
        Ok(events)
    }

    fn complete_protocol(&mut self, idx: usize, today: NaiveDate, events: &mut Vec<Event>) {
        let award = {
            let p = &self.state.protocols[idx];
            (p.xp as f64 * self.state.settings.xp_multiplier).round() as i64
        };
        let undo = CompletionUndo {
            awarded_xp: award,
            prev_streak: self.state.protocols[idx].streak,
            prev_completed_on: self.state.protocols[idx].last_completed_on,
            prev_consecutive_days: self.state.history.consecutive_days,
            prev_last_completed_date: self.state.history.last_completed_date,
        };

        {
            let p = &mut self.state.protocols[idx];
            // First completion and previous-day completion both continue the
            // streak; any wider gap resets it to 1.
            let continues = match p.last_completed_on {
                None => true,
                Some(d) => d + Days::new(1) >= today,
            };
            p.streak = if continues { p.streak + 1 } else { 1 };
            p.last_completed_on = Some(today);
            p.completed = true;
            p.undo = Some(undo);
        }

        self.state.total_xp += award.max(0) as u64;
        self.state.history.record_completion(today, award);

        // Account streak counts once per calendar day. A pending gap is
        // settled here as well, so an armed protection charge covers the
        // missed day even when no rollover ran in between.
        match self.state.history.last_completed_date {
            Some(d) if d == today => {}
            Some(d) if d + Days::new(1) == today => {
                self.state.history.consecutive_days += 1;
                self.state.history.last_completed_date = Some(today);
            }
            None => {
                self.state.history.consecutive_days += 1;
                self.state.history.last_completed_date = Some(today);
            }
            Some(d) => {
                let missed = d + Days::new(1);
                let absorbed = (today - d).num_days() == 2
                    && self.state.premium.consume_protection(WeekKey::of(missed));
                if absorbed {
                    self.state.history.consecutive_days += 1;
                    events.push(Event::StreakProtectionConsumed { on: missed });
                } else {
                    self.state.history.consecutive_days = 1;
                }
                self.state.history.last_completed_date = Some(today);
            }
        }

        let p = &self.state.protocols[idx];
        events.push(Event::ProtocolCompleted {
            id: p.id.clone(),
            awarded_xp: award,
            streak: p.streak,
            on: today,
        });
    }

    fn reopen_protocol(&mut self, idx: usize, events: &mut Vec<Event>) {
        let (id, completed_on, undo) = {
            let p = &mut self.state.protocols[idx];
            let completed_on = p.last_completed_on;
            let undo = p.undo.take();
            p.completed = false;
            (p.id.clone(), completed_on, undo)
        };

        let Some(undo) = undo else {
            // Legacy snapshot without undo bookkeeping: flip only.
            events.push(Event::ProtocolReopened { id, reverted_xp: 0 });
            return;
        };

        {
            let p = &mut self.state.protocols[idx];
            p.streak = undo.prev_streak;
            p.last_completed_on = undo.prev_completed_on;
        }

        self.state.total_xp = self
            .state
            .total_xp
            .saturating_sub(undo.awarded_xp.max(0) as u64);
        if let Some(on) = completed_on {
            self.state.history.unrecord_completion(on, undo.awarded_xp);

            // Restore account-level streak state only if this was the sole
            // completion of that day; later completions keep their effects.
            let day_still_counted = self
                .state
                .protocols
                .iter()
                .any(|q| q.completed && q.last_completed_on == Some(on));
            if !day_still_counted {
                self.state.history.consecutive_days = undo.prev_consecutive_days;
                self.state.history.last_completed_date = undo.prev_last_completed_date;
            }
        }

        events.push(Event::ProtocolReopened {
            id,
            reverted_xp: undo.awarded_xp,
        });
    }

    // ----- mission intent & generation -------------------------------------

    pub fn set_mission_intent(&mut self, intent: MissionIntent, today: NaiveDate) -> Vec<Event> {
        self.state.mission_intent = intent;
        self.state.last_mission_intent_date = Some(today);
        vec![Event::MissionIntentSet { intent, on: today }]
    }

    /// Generate today's protocol set. A silent no-op (empty event list)
    /// when the same-day guard is already set, auto-generation is disabled,
    /// or setup is incomplete.
    pub fn generate_daily_tasks(&mut self, today: NaiveDate) -> Vec<Event> {
        if self.state.daily_tasks_generated || !self.state.settings.auto_generate_tasks {
            return Vec::new();
        }
        let (identity, config) = match (self.state.identity, self.state.mode_config.clone()) {
            (Some(i), Some(c)) => (i, c),
            _ => return Vec::new(),
        };

        let mut generated = generate_protocols(
            identity,
            &config,
            self.state.mission_intent,
            self.state.settings.difficulty_level,
            today,
        );

        // Carry per-protocol streak continuity across regeneration: a daily
        // template task is the same habit even though its id is fresh.
        let carried: Vec<(String, u32, Option<NaiveDate>)> = self
            .state
            .protocols
            .iter()
            .filter(|p| p.source == ProtocolSource::Generated)
            .map(|p| (p.name.clone(), p.streak, p.last_completed_on))
            .collect();
        for p in &mut generated {
            if let Some((_, streak, last)) = carried.iter().find(|(n, _, _)| *n == p.name) {
                p.streak = *streak;
                p.last_completed_on = *last;
            }
        }

        self.state
            .protocols
            .retain(|p| p.source == ProtocolSource::User);
        let count = generated.len();
        self.state.protocols.extend(generated);
        self.state.daily_tasks_generated = true;
        self.state.last_generated_date = Some(today);
        self.refresh_strength();

        vec![Event::TasksGenerated {
            count,
            intent: self.state.mission_intent,
            on: today,
        }]
    }

    // ----- streaks, failures, premium --------------------------------------

    pub fn record_failure_reason(&mut self, reason: FailureReason, today: NaiveDate) -> Vec<Event> {
        self.state.history.record_failure(reason, today);
        vec![Event::FailureRecorded { reason, on: today }]
    }

    /// Start the 60-day premium trial. `None` when the level gate is unmet
    /// or a trial is already running.
    pub fn start_premium_trial(&mut self, today: NaiveDate) -> Option<Event> {
        let level = self.progression().level;
        if self.state.premium.start_trial(level, today) {
            let ends_on = self.state.premium.trial_end_date?;
            Some(Event::TrialStarted { ends_on })
        } else {
            None
        }
    }

    /// Arm this week's streak protection. `None` outside premium or when
    /// already used this ISO week.
    pub fn use_streak_protection(&mut self, today: NaiveDate) -> Option<Event> {
        if self.state.premium.arm_protection(today) {
            Some(Event::StreakProtectionArmed { on: today })
        } else {
            None
        }
    }

    /// Recompute and cache the identity strength score.
    pub fn update_identity_strength(&mut self) -> u8 {
        self.refresh_strength();
        self.state.identity_strength
    }

    // ----- day rollover -----------------------------------------------------

    /// Apply the local-day rollover. Idempotent per calendar day: clears the
    /// generation guard exactly once, settles the consecutive-day streak
    /// (consuming an armed protection charge for a single missed day), and
    /// carries or retires protocols by their lifecycle.
    pub fn roll_day(&mut self, today: NaiveDate) -> Vec<Event> {
        if self.state.last_rolled_date == Some(today) {
            return Vec::new();
        }
        self.state.last_rolled_date = Some(today);
        self.state.daily_tasks_generated = false;

        let mut events = vec![Event::DayRolled { on: today }];

        // Settle the account streak for any gap that ended today.
        if let Some(last) = self.state.history.last_completed_date {
            let gap = (today - last).num_days();
            if gap >= 2 {
                let missed = last + Days::new(1);
                let absorbed =
                    gap == 2 && self.state.premium.consume_protection(WeekKey::of(missed));
                if absorbed {
                    // Treat the missed day as covered so the next completion
                    // continues the streak instead of resetting it.
                    self.state.history.last_completed_date = Some(missed);
                    events.push(Event::StreakProtectionConsumed { on: missed });
                } else if self.state.history.consecutive_days > 0 {
                    events.push(Event::StreakBroken {
                        was: self.state.history.consecutive_days,
                        on: today,
                    });
                    self.state.history.consecutive_days = 0;
                }
            }
        }

        // Protocol lifecycle: daily user protocols reset, one-shot completed
        // protocols retire, generated protocols are replaced at the next
        // generation run.
        self.state.protocols.retain(|p| {
            p.source == ProtocolSource::Generated || p.is_daily || !p.completed
        });
        for p in &mut self.state.protocols {
            if p.completed && p.last_completed_on != Some(today) {
                p.completed = false;
                p.undo = None;
            }
        }

        self.refresh_strength();
        events
    }

    /// Full data wipe: back to the onboarding default.
    pub fn wipe(&mut self) -> Vec<Event> {
        self.state = EngineState::default();
        vec![Event::DataWiped]
    }

    // ----- derived-state upkeep --------------------------------------------

    fn refresh_strength(&mut self) {
        self.state.identity_strength = identity_strength(
            &self.state.protocols,
            self.state.history.consecutive_days,
        );
    }

    /// Re-derive everything that depends on XP or streak state and emit the
    /// corresponding events. Runs inside every XP-affecting mutation.
    fn finish_mutation(&mut self, prev: Progression, events: &mut Vec<Event>) {
        let now = self.progression();
        if now.level > prev.level {
            events.push(Event::LevelUp {
                from: prev.level,
                to: now.level,
            });
        }
        if now.phase > prev.phase {
            events.push(Event::PhaseAdvanced {
                from: prev.phase,
                to: now.phase,
            });
        }
        for source in self
            .state
            .premium
            .evaluate(self.state.history.consecutive_days, now.level)
        {
            events.push(Event::PremiumUnlocked {
                source: source.to_string(),
            });
        }
        self.refresh_strength();
    }
}
