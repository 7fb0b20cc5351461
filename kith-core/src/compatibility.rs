//! Trait/skill compatibility between two creatures.
//!
//! Scoring works on [`CreatureProfile`] snapshots rather than live creature
//! data: callers copy the relevant trait ids and skill levels out before
//! asking for a score.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::config::CompatibilityConfig;
use crate::types::clamp_compatibility;

/// How keen a creature is on a skill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Passion {
    /// No particular interest.
    #[default]
    None,
    /// Interested.
    Minor,
    /// Burning passion.
    Major,
}

/// A personality trait and the traits it clashes with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitProfile {
    /// Trait identifier, e.g. "kind".
    pub id: String,
    /// Identifiers of traits this one conflicts with.
    #[serde(default)]
    pub conflicts_with: BTreeSet<String>,
}

impl TraitProfile {
    /// A trait with no declared conflicts.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            conflicts_with: BTreeSet::new(),
        }
    }

    /// Builder: declare a conflicting trait.
    #[must_use]
    pub fn conflicting_with(mut self, other: impl Into<String>) -> Self {
        self.conflicts_with.insert(other.into());
        self
    }
}

/// Level and passion in one skill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillProfile {
    /// Skill level.
    pub level: u8,
    /// Passion for the skill.
    #[serde(default)]
    pub passion: Passion,
}

/// The slice of a creature that compatibility scoring reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureProfile {
    /// Personality traits.
    #[serde(default)]
    pub traits: Vec<TraitProfile>,
    /// Skills by identifier.
    #[serde(default)]
    pub skills: BTreeMap<String, SkillProfile>,
}

impl CreatureProfile {
    /// An empty profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a trait.
    #[must_use]
    pub fn with_trait(mut self, profile: TraitProfile) -> Self {
        self.traits.push(profile);
        self
    }

    /// Builder: add or replace a skill.
    #[must_use]
    pub fn with_skill(mut self, id: impl Into<String>, level: u8, passion: Passion) -> Self {
        self.skills.insert(id.into(), SkillProfile { level, passion });
        self
    }

    /// Set of trait identifiers.
    #[must_use]
    pub fn trait_ids(&self) -> BTreeSet<&str> {
        self.traits.iter().map(|t| t.id.as_str()).collect()
    }
}

/// Directed compatibility of `own` towards `other`, in [-100, 100].
///
/// - each trait both have: `+shared_trait_bonus`
/// - each own trait whose conflict list names one of `other`'s traits:
///   `-conflicting_trait_penalty`
/// - each shared skill with levels differing by less than the tolerance:
///   `+shared_skill_bonus`
/// - each shared skill where both have the same non-none passion:
///   `+shared_passion_bonus`
///
/// The conflict term only looks at `own`'s conflict lists, so the score is
/// not necessarily symmetric.
#[must_use]
pub fn score(own: &CreatureProfile, other: &CreatureProfile, config: &CompatibilityConfig) -> f32 {
    let own_traits = own.trait_ids();
    let other_traits = other.trait_ids();

    let mut total = 0.0_f32;

    total += own_traits.intersection(&other_traits).count() as f32 * config.shared_trait_bonus;

    let mut seen = BTreeSet::new();
    for t in &own.traits {
        if !seen.insert(t.id.as_str()) {
            continue;
        }
        if t.conflicts_with.iter().any(|c| other_traits.contains(c.as_str())) {
            total -= config.conflicting_trait_penalty;
        }
    }

    for (id, mine) in &own.skills {
        let Some(theirs) = other.skills.get(id) else {
            continue;
        };
        if mine.level.abs_diff(theirs.level) < config.skill_level_tolerance {
            total += config.shared_skill_bonus;
        }
        if mine.passion != Passion::None && mine.passion == theirs.passion {
            total += config.shared_passion_bonus;
        }
    }

    clamp_compatibility(total)
}
