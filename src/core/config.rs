//! Campaign configuration with documented constants
//!
//! All tunables are collected here with explanations of their purpose
//! and how they interact with each other.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::Result;

/// Configuration for the campaign simulation
///
/// These values have been tuned to produce a reasonable campaign pace.
/// Changing them will affect economy growth and event pressure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignConfig {
    // === RANDOM EVENTS ===
    /// Chance per advanced turn that the generator injects one random event
    ///
    /// At 0.15, a campaign sees roughly one spontaneous event every
    /// 6-7 turns. Set to 0.0 for fully scripted campaigns.
    pub random_event_chance: f64,

    /// Shortest duration (turns) a randomly generated event can have
    pub random_event_min_duration: i32,

    /// Longest duration (turns) a randomly generated event can have
    pub random_event_max_duration: i32,

    /// Registry size at which the generator stops injecting new events
    ///
    /// A hard cap so a long-running campaign cannot accumulate an
    /// unbounded backlog of storms and invasions.
    pub max_events: usize,

    // === HARVEST ===
    /// Flat yield added to every resource entry of a planet with an
    /// active bonus-resources event
    pub event_bonus_yield: i64,

    /// Flat yield subtracted from every resource entry of a planet with
    /// an active debuff event
    pub event_debuff_yield: i64,

    // === ECONOMY ===
    /// Requisition each faction starts the campaign with
    pub starting_requisition: i64,

    /// Materiel each faction starts the campaign with
    pub starting_materiel: i64,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            random_event_chance: 0.15,
            random_event_min_duration: 2,
            random_event_max_duration: 6,
            max_events: 32,

            event_bonus_yield: 3,
            event_debuff_yield: 2,

            starting_requisition: 20,
            starting_materiel: 10,
        }
    }
}

impl CampaignConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file, falling back to defaults for
    /// any field the file omits
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !(0.0..=1.0).contains(&self.random_event_chance) {
            return Err(format!(
                "random_event_chance ({}) must be within 0.0..=1.0",
                self.random_event_chance
            ));
        }

        if self.random_event_min_duration < 1 {
            return Err("random_event_min_duration must be at least 1".into());
        }

        if self.random_event_max_duration < self.random_event_min_duration {
            return Err(format!(
                "random_event_max_duration ({}) should be >= random_event_min_duration ({})",
                self.random_event_max_duration, self.random_event_min_duration
            ));
        }

        if self.event_bonus_yield < 0 || self.event_debuff_yield < 0 {
            return Err("Event yield adjustments must be non-negative".into());
        }

        Ok(())
    }
}
