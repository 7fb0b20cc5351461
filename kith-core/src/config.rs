//! Configuration for the KITH relationship engine.
//!
//! Maps directly to `kith.toml`. Every field has a default, so an empty
//! document (or a missing section) yields the stock tuning.

use serde::{Deserialize, Serialize};

/// Top-level KITH configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KithConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Rank growth, opinion expiry and classification thresholds.
    #[serde(default)]
    pub social: SocialConfig,
    /// Thought magnitudes, durations and stack limits.
    #[serde(default)]
    pub mood: MoodConfig,
    /// Trait/skill compatibility scoring weights.
    #[serde(default)]
    pub compatibility: CompatibilityConfig,
}

impl KithConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `KithError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::KithError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General system settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit JSON-formatted log lines instead of the human-readable format.
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Rank growth and classification tuning for social relations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialConfig {
    /// Rank multiplier applied to interaction quality when compatibility > 0.
    #[serde(default = "default_1_5")]
    pub compatible_growth: f32,
    /// Rank multiplier applied to interaction quality otherwise.
    #[serde(default = "default_0_5")]
    pub incompatible_growth: f32,
    /// Expiry (game-days) of the opinion modifier recorded by a reasoned interaction.
    #[serde(default = "default_30_f32")]
    pub interaction_opinion_expiry_days: f32,
    /// Rank thresholds for the friendly branch of classification.
    #[serde(default)]
    pub thresholds: ClassificationThresholds,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            compatible_growth: 1.5,
            incompatible_growth: 0.5,
            interaction_opinion_expiry_days: 30.0,
            thresholds: ClassificationThresholds::default(),
        }
    }
}

/// Rank cut-offs used by relationship classification.
///
/// Friendly-branch thresholds are exclusive upper bounds evaluated in order;
/// hostile-branch thresholds are exclusive lower bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationThresholds {
    /// Below this: passing acquaintance.
    #[serde(default = "default_5")]
    pub passing_acquaintance: f32,
    /// Below this: long-term acquaintance.
    #[serde(default = "default_15")]
    pub long_term_acquaintance: f32,
    /// Below this: friendly terms.
    #[serde(default = "default_30_f32")]
    pub friendly_terms: f32,
    /// Below this: friend.
    #[serde(default = "default_50")]
    pub friend: f32,
    /// Below this: close friend. At or above: kindred spirit.
    #[serde(default = "default_70")]
    pub close_friend: f32,
    /// Above this (with negative compatibility): grudge.
    #[serde(default = "default_15")]
    pub grudge: f32,
    /// Above this (with negative compatibility): enemy.
    #[serde(default = "default_50")]
    pub enemy: f32,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            passing_acquaintance: 5.0,
            long_term_acquaintance: 15.0,
            friendly_terms: 30.0,
            friend: 50.0,
            close_friend: 70.0,
            grudge: 15.0,
            enemy: 50.0,
        }
    }
}

/// Thought tuning for interaction and death events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodConfig {
    /// Base mood magnitude of a social interaction thought.
    #[serde(default = "default_5")]
    pub interaction_base: f32,
    /// How long an interaction thought lasts (game-days).
    #[serde(default = "default_1_0")]
    pub interaction_duration_days: f32,
    /// How many interaction thoughts with the same id may stack.
    #[serde(default = "default_5_u32")]
    pub interaction_stack_limit: u32,
    /// How long a bereavement thought lasts (game-days).
    #[serde(default = "default_30_f32")]
    pub death_duration_days: f32,
    /// How many bereavement thoughts with the same id may stack.
    #[serde(default = "default_1_u32")]
    pub death_stack_limit: u32,
    /// Mood penalties applied when a related creature dies.
    #[serde(default)]
    pub death_penalties: DeathPenalties,
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            interaction_base: 5.0,
            interaction_duration_days: 1.0,
            interaction_stack_limit: 5,
            death_duration_days: 30.0,
            death_stack_limit: 1,
            death_penalties: DeathPenalties::default(),
        }
    }
}

/// Bereavement mood penalties per relationship category (negative numbers).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeathPenalties {
    /// Spouse died.
    #[serde(default = "default_neg_40")]
    pub spouse: f32,
    /// Lover died.
    #[serde(default = "default_neg_30")]
    pub lover: f32,
    /// Child died.
    #[serde(default = "default_neg_40")]
    pub child: f32,
    /// Parent died.
    #[serde(default = "default_neg_30")]
    pub parent: f32,
    /// Sibling or half-sibling died.
    #[serde(default = "default_neg_25")]
    pub sibling: f32,
    /// Any other kin died.
    #[serde(default = "default_neg_40")]
    pub family: f32,
    /// Pet or bonded animal died.
    #[serde(default = "default_neg_20")]
    pub pet: f32,
    /// Close friend or kindred spirit died.
    #[serde(default = "default_neg_20")]
    pub close_friend: f32,
    /// Friend died.
    #[serde(default = "default_neg_15")]
    pub friend: f32,
    /// Grudge, enemy or rival died.
    #[serde(default = "default_neg_5")]
    pub adversary: f32,
    /// Anyone else died.
    #[serde(default = "default_neg_5")]
    pub other: f32,
}

impl Default for DeathPenalties {
    fn default() -> Self {
        Self {
            spouse: -40.0,
            lover: -30.0,
            child: -40.0,
            parent: -30.0,
            sibling: -25.0,
            family: -40.0,
            pet: -20.0,
            close_friend: -20.0,
            friend: -15.0,
            adversary: -5.0,
            other: -5.0,
        }
    }
}

/// Weights for trait/skill compatibility scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityConfig {
    /// Bonus per trait both creatures have.
    #[serde(default = "default_10")]
    pub shared_trait_bonus: f32,
    /// Penalty per own trait that conflicts with one of the other's traits.
    #[serde(default = "default_15")]
    pub conflicting_trait_penalty: f32,
    /// Bonus per shared skill whose levels are close.
    #[serde(default = "default_5")]
    pub shared_skill_bonus: f32,
    /// Levels must differ by strictly less than this for the skill bonus.
    #[serde(default = "default_3_u8")]
    pub skill_level_tolerance: u8,
    /// Bonus per shared skill with the same non-none passion.
    #[serde(default = "default_15")]
    pub shared_passion_bonus: f32,
}

impl Default for CompatibilityConfig {
    fn default() -> Self {
        Self {
            shared_trait_bonus: 10.0,
            conflicting_trait_penalty: 15.0,
            shared_skill_bonus: 5.0,
            skill_level_tolerance: 3,
            shared_passion_bonus: 15.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_log_level() -> String { "info".to_string() }
fn default_0_5() -> f32 { 0.5 }
fn default_1_0() -> f32 { 1.0 }
fn default_1_5() -> f32 { 1.5 }
fn default_5() -> f32 { 5.0 }
fn default_10() -> f32 { 10.0 }
fn default_15() -> f32 { 15.0 }
fn default_30_f32() -> f32 { 30.0 }
fn default_50() -> f32 { 50.0 }
fn default_70() -> f32 { 70.0 }
fn default_neg_5() -> f32 { -5.0 }
fn default_neg_15() -> f32 { -15.0 }
fn default_neg_20() -> f32 { -20.0 }
fn default_neg_25() -> f32 { -25.0 }
fn default_neg_30() -> f32 { -30.0 }
fn default_neg_40() -> f32 { -40.0 }
fn default_1_u32() -> u32 { 1 }
fn default_5_u32() -> u32 { 5 }
fn default_3_u8() -> u8 { 3 }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = KithConfig::from_toml("").expect("empty config parses");
        assert_eq!(config.general.log_level, "info");
        assert!((config.social.compatible_growth - 1.5).abs() < f32::EPSILON);
        assert!((config.mood.death_penalties.spouse + 40.0).abs() < f32::EPSILON);
        assert_eq!(config.compatibility.skill_level_tolerance, 3);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = KithConfig::from_toml(
            r#"
            [social]
            compatible_growth = 2.0

            [social.thresholds]
            enemy = 60.0

            [mood.death_penalties]
            pet = -35.0
            "#,
        )
        .expect("partial config parses");

        assert!((config.social.compatible_growth - 2.0).abs() < f32::EPSILON);
        assert!((config.social.incompatible_growth - 0.5).abs() < f32::EPSILON);
        assert!((config.social.thresholds.enemy - 60.0).abs() < f32::EPSILON);
        assert!((config.social.thresholds.grudge - 15.0).abs() < f32::EPSILON);
        assert!((config.mood.death_penalties.pet + 35.0).abs() < f32::EPSILON);
        assert!((config.mood.death_penalties.friend + 15.0).abs() < f32::EPSILON);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = KithConfig::from_toml("[social\ncompatible_growth = ")
            .expect_err("malformed TOML must not parse");
        assert!(matches!(err, crate::KithError::Config(_)));
    }
}
