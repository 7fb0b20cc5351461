//! Threshold-based relationship classification.
//!
//! A bond's label follows its rank, on a friendly ladder when the two
//! creatures are compatible and a hostile ladder when they are not. Kin,
//! spiritual and professional bonds keep their label.

use crate::config::ClassificationThresholds;

use super::kind::RelationshipType;

/// Whether a bond of `kind` may be relabelled automatically.
#[must_use]
pub fn is_reclassifiable(kind: RelationshipType, has_family_details: bool) -> bool {
    !(has_family_details || kind.is_family() || kind.is_protected())
}

/// The label a reclassifiable bond should carry, or `None` to keep `current`.
///
/// Friendly ladder (`compatibility >= 0`), first match wins:
/// passing acquaintance, long-term acquaintance, friendly terms, friend,
/// close friend, then kindred spirit for everything at or above the close
/// friend threshold.
///
/// Hostile ladder (`compatibility < 0`): enemy above the enemy threshold,
/// grudge above the grudge threshold, otherwise unchanged.
#[must_use]
pub fn classify(
    current: RelationshipType,
    rank: f32,
    compatibility: f32,
    thresholds: &ClassificationThresholds,
) -> Option<RelationshipType> {
    let next = if compatibility >= 0.0 {
        Some(match rank {
            r if r < thresholds.passing_acquaintance => RelationshipType::PassingAcquaintance,
            r if r < thresholds.long_term_acquaintance => RelationshipType::LongTermAcquaintance,
            r if r < thresholds.friendly_terms => RelationshipType::FriendlyTerms,
            r if r < thresholds.friend => RelationshipType::Friend,
            r if r < thresholds.close_friend => RelationshipType::CloseFriend,
            _ => RelationshipType::KindredSpirit,
        })
    } else if rank > thresholds.enemy {
        Some(RelationshipType::Enemy)
    } else if rank > thresholds.grudge {
        Some(RelationshipType::Grudge)
    } else {
        None
    };

    next.filter(|&kind| kind != current)
}
