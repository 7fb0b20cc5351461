//! Thoughts: timed mood effects handed to the owning creature.
//!
//! The engine only chooses a thought's content. Stacking, duration and
//! expiry belong to whatever implements [`ThoughtSink`]; [`crate::mood`]
//! ships a reference implementation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::MoodConfig;
use crate::relation::RelationshipType;
use crate::types::{CreatureId, expiry_after};

/// A timed mood effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thought {
    /// Stacking key. Thoughts with the same id stack up to `stack_limit`.
    pub id: String,
    /// Display text.
    pub label: String,
    /// Signed mood change while active.
    pub mood_delta: f32,
    /// How long the thought lasts (game-days).
    pub duration_days: f32,
    /// Maximum simultaneous instances with this id.
    pub stack_limit: u32,
    /// When the thought was issued.
    pub issued_at: DateTime<Utc>,
    /// The creature the thought is about.
    pub about: CreatureId,
}

impl Thought {
    /// When the thought stops affecting mood.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        expiry_after(self.issued_at, self.duration_days)
    }
}

/// Receiver of thoughts, implemented by the owning creature's mood model.
pub trait ThoughtSink {
    /// Integrate a thought into the mood model.
    fn apply_thought(&mut self, thought: Thought);
}

/// Collects thoughts verbatim. Handy for tests and event logs.
impl ThoughtSink for Vec<Thought> {
    fn apply_thought(&mut self, thought: Thought) {
        self.push(thought);
    }
}

/// The thought produced by an interaction with a bond of `kind`.
///
/// Zero (or non-finite) quality produces nothing.
#[must_use]
pub fn interaction_thought(
    kind: RelationshipType,
    quality: f32,
    about: CreatureId,
    now: DateTime<Utc>,
    config: &MoodConfig,
) -> Option<Thought> {
    if !quality.is_finite() || quality == 0.0 {
        return None;
    }
    let positive = quality > 0.0;

    let (multiplier, label) = if positive {
        match kind {
            RelationshipType::KindredSpirit => (2.0, "Spent time with a kindred spirit"),
            RelationshipType::Spouse => (2.0, "Shared a moment with my spouse"),
            RelationshipType::Lover => (2.0, "Shared a moment with my lover"),
            RelationshipType::CloseFriend => (1.5, "Talked with a close friend"),
            _ => (1.0, "Had a pleasant conversation"),
        }
    } else {
        match kind {
            RelationshipType::Enemy => (1.5, "Clashed with an enemy"),
            RelationshipType::Rival => (1.25, "Argued with a rival"),
            RelationshipType::Grudge => (1.2, "Had to deal with someone I resent"),
            _ => (1.0, "Had an unpleasant exchange"),
        }
    };
    let sign = if positive { 1.0 } else { -1.0 };

    Some(Thought {
        id: format!(
            "social_{}_{}",
            if positive { "positive" } else { "negative" },
            kind.as_str()
        ),
        label: label.to_string(),
        mood_delta: sign * config.interaction_base * multiplier,
        duration_days: config.interaction_duration_days,
        stack_limit: config.interaction_stack_limit,
        issued_at: now,
        about,
    })
}

/// The bereavement thought for the death of a creature bonded by `kind`.
///
/// The id is keyed by category and target so repeated notices about the
/// same death collide instead of stacking.
#[must_use]
pub fn death_thought(
    kind: RelationshipType,
    about: CreatureId,
    now: DateTime<Utc>,
    config: &MoodConfig,
) -> Thought {
    let p = &config.death_penalties;
    let (mood_delta, label) = match kind {
        RelationshipType::Spouse => (p.spouse, "My spouse died"),
        RelationshipType::Lover => (p.lover, "My lover died"),
        RelationshipType::Child => (p.child, "My child died"),
        RelationshipType::Parent => (p.parent, "My parent died"),
        RelationshipType::Sibling | RelationshipType::HalfSibling => (p.sibling, "My sibling died"),
        k if k.is_family() => (p.family, "A family member died"),
        RelationshipType::Pet => (p.pet, "My pet died"),
        RelationshipType::BondedAnimal => (p.pet, "My bonded animal died"),
        RelationshipType::CloseFriend => (p.close_friend, "My close friend died"),
        RelationshipType::KindredSpirit => (p.close_friend, "My kindred spirit died"),
        RelationshipType::Friend => (p.friend, "My friend died"),
        k if k.is_adversarial() => (p.adversary, "Someone I clashed with died"),
        _ => (p.other, "Someone I knew died"),
    };

    Thought {
        id: format!("death_{}_{about}", kind.as_str()),
        label: label.to_string(),
        mood_delta,
        duration_days: config.death_duration_days,
        stack_limit: config.death_stack_limit,
        issued_at: now,
        about,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positive(kind: RelationshipType) -> f32 {
        interaction_thought(kind, 10.0, CreatureId::new(), Utc::now(), &MoodConfig::default())
            .map_or(0.0, |t| t.mood_delta)
    }

    fn negative(kind: RelationshipType) -> f32 {
        interaction_thought(kind, -10.0, CreatureId::new(), Utc::now(), &MoodConfig::default())
            .map_or(0.0, |t| t.mood_delta)
    }

    #[test]
    fn positive_multipliers() {
        assert_eq!(positive(RelationshipType::Friend), 5.0);
        assert_eq!(positive(RelationshipType::CloseFriend), 7.5);
        assert_eq!(positive(RelationshipType::KindredSpirit), 10.0);
    }

    #[test]
    fn negative_multipliers() {
        assert_eq!(negative(RelationshipType::Friend), -5.0);
        assert_eq!(negative(RelationshipType::Enemy), -7.5);
        assert_eq!(negative(RelationshipType::Grudge), -6.0);
    }

    #[test]
    fn neutral_interaction_has_no_thought() {
        let t = interaction_thought(
            RelationshipType::Friend,
            0.0,
            CreatureId::new(),
            Utc::now(),
            &MoodConfig::default(),
        );
        assert!(t.is_none());
    }

    #[test]
    fn interaction_id_encodes_sign_and_kind() {
        let t = interaction_thought(
            RelationshipType::CloseFriend,
            3.0,
            CreatureId::new(),
            Utc::now(),
            &MoodConfig::default(),
        )
        .expect("positive quality yields a thought");
        assert_eq!(t.id, "social_positive_close-friend");
        assert_eq!(t.stack_limit, 5);
    }

    #[test]
    fn death_penalty_table() {
        let config = MoodConfig::default();
        let who = CreatureId::new();
        let now = Utc::now();
        let delta = |kind| death_thought(kind, who, now, &config).mood_delta;

        assert_eq!(delta(RelationshipType::Spouse), -40.0);
        assert_eq!(delta(RelationshipType::Lover), -30.0);
        assert_eq!(delta(RelationshipType::Child), -40.0);
        assert_eq!(delta(RelationshipType::Parent), -30.0);
        assert_eq!(delta(RelationshipType::Sibling), -25.0);
        assert_eq!(delta(RelationshipType::Cousin), -40.0);
        assert_eq!(delta(RelationshipType::Pet), -20.0);
        assert_eq!(delta(RelationshipType::KindredSpirit), -20.0);
        assert_eq!(delta(RelationshipType::Friend), -15.0);
        assert_eq!(delta(RelationshipType::Enemy), -5.0);
        assert_eq!(delta(RelationshipType::Deity), -5.0);
    }

    #[test]
    fn death_thought_is_long_and_keyed() {
        let who = CreatureId::new();
        let t = death_thought(RelationshipType::Spouse, who, Utc::now(), &MoodConfig::default());
        assert_eq!(t.id, format!("death_spouse_{who}"));
        assert_eq!(t.duration_days, 30.0);
        assert_eq!(t.stack_limit, 1);
        assert_eq!(t.expires_at() - t.issued_at, chrono::Duration::days(30));
    }
}
