//! Social Relation: one creature's directed view of another.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::SocialConfig;
use crate::types::{CreatureId, clamp_compatibility, clamp_rank, expiry_after};

use super::classify::{classify, is_reclassifiable};
use super::kind::RelationshipType;
use super::opinion::{self, OpinionModifier};
use super::variables::{ChannelSet, RelationshipVariables};

/// Kinship metadata. Its presence locks the bond's label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilyDetails {
    /// Whether the creatures share blood (as opposed to marriage or adoption).
    pub is_blood_related: bool,
    /// Generations between the two; positive when the target is older.
    pub generation_difference: i32,
    /// Optional free-text description, e.g. "maternal grandmother".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// What a single [`SocialRelation::interact`] call changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionOutcome {
    /// Rank before the interaction.
    pub rank_before: f32,
    /// Rank after growth and clamping.
    pub rank_after: f32,
    /// The previous label, if classification changed it.
    pub reclassified_from: Option<RelationshipType>,
}

/// A directed bond owned by the source creature.
///
/// `rank` lives in [0, 100] and is the single source for [`Self::value`];
/// serialized data using the field name `value` is accepted on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialRelation {
    /// The creature this bond points at.
    pub target_id: CreatureId,
    /// Current label.
    pub kind: RelationshipType,
    #[serde(alias = "value")]
    rank: f32,
    compatibility: f32,
    #[serde(default)]
    variables: RelationshipVariables,
    #[serde(default)]
    opinion_modifiers: Vec<OpinionModifier>,
    #[serde(default)]
    last_interaction: Option<DateTime<Utc>>,
    #[serde(default)]
    interaction_count: u32,
    /// Kinship metadata for kin-origin bonds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<FamilyDetails>,
}

impl SocialRelation {
    /// A fresh bond with zero rank, zero compatibility and an empty ledger.
    #[must_use]
    pub fn new(target_id: CreatureId, kind: RelationshipType) -> Self {
        Self {
            target_id,
            kind,
            rank: 0.0,
            compatibility: 0.0,
            variables: RelationshipVariables::default(),
            opinion_modifiers: Vec::new(),
            last_interaction: None,
            interaction_count: 0,
            family: None,
        }
    }

    /// Builder: initial rank, clamped to [0, 100].
    #[must_use]
    pub fn with_rank(mut self, rank: f32) -> Self {
        self.set_rank(rank);
        self
    }

    /// Builder: initial compatibility, clamped to [-100, 100].
    #[must_use]
    pub fn with_compatibility(mut self, compatibility: f32) -> Self {
        self.set_compatibility(compatibility);
        self
    }

    /// Builder: kinship metadata.
    #[must_use]
    pub fn with_family(mut self, family: FamilyDetails) -> Self {
        self.family = Some(family);
        self
    }

    /// Relationship strength in [0, 100].
    #[must_use]
    pub fn rank(&self) -> f32 {
        self.rank
    }

    /// Alias of [`Self::rank`].
    #[must_use]
    pub fn value(&self) -> f32 {
        self.rank
    }

    /// Overwrite the rank, clamped to [0, 100]. Does not reclassify.
    pub fn set_rank(&mut self, rank: f32) {
        self.rank = clamp_rank(rank);
    }

    /// Signed affinity in [-100, 100].
    #[must_use]
    pub fn compatibility(&self) -> f32 {
        self.compatibility
    }

    /// Overwrite the compatibility, clamped to [-100, 100].
    pub fn set_compatibility(&mut self, compatibility: f32) {
        self.compatibility = clamp_compatibility(compatibility);
    }

    /// The five opinion channels as of the last recomputation.
    #[must_use]
    pub fn variables(&self) -> &RelationshipVariables {
        &self.variables
    }

    /// The opinion ledger, including entries that expired since the last
    /// recomputation.
    #[must_use]
    pub fn opinion_modifiers(&self) -> &[OpinionModifier] {
        &self.opinion_modifiers
    }

    /// When [`Self::interact`] last ran.
    #[must_use]
    pub fn last_interaction(&self) -> Option<DateTime<Utc>> {
        self.last_interaction
    }

    /// How many times [`Self::interact`] ran.
    #[must_use]
    pub fn interaction_count(&self) -> u32 {
        self.interaction_count
    }

    /// Whether the label is kin-origin (by category or by metadata).
    #[must_use]
    pub fn is_family(&self) -> bool {
        self.kind.is_family() || self.family.is_some()
    }

    /// Record an interaction of the given quality.
    ///
    /// Rank grows by `quality × compatible_growth` when compatibility is
    /// positive and by `quality × incompatible_growth` otherwise, then is
    /// clamped and the label re-evaluated. Quality is unbounded; a
    /// non-finite quality counts as zero.
    pub fn interact(
        &mut self,
        quality: f32,
        now: DateTime<Utc>,
        config: &SocialConfig,
    ) -> InteractionOutcome {
        let quality = if quality.is_finite() { quality } else { 0.0 };
        self.interaction_count = self.interaction_count.saturating_add(1);
        self.last_interaction = Some(now);

        let growth = if self.compatibility > 0.0 {
            config.compatible_growth
        } else {
            config.incompatible_growth
        };
        let rank_before = self.rank;
        self.set_rank(self.rank + quality * growth);
        trace!(
            target_id = %self.target_id,
            quality,
            rank_before,
            rank_after = self.rank,
            "interaction applied"
        );

        InteractionOutcome {
            rank_before,
            rank_after: self.rank,
            reclassified_from: self.classify(config),
        }
    }

    /// Re-evaluate the label from rank and compatibility.
    ///
    /// Returns the previous label when it changed.
    pub fn classify(&mut self, config: &SocialConfig) -> Option<RelationshipType> {
        if !is_reclassifiable(self.kind, self.family.is_some()) {
            return None;
        }
        let next = classify(self.kind, self.rank, self.compatibility, &config.thresholds)?;
        let previous = std::mem::replace(&mut self.kind, next);
        debug!(
            target_id = %self.target_id,
            from = %previous,
            to = %next,
            rank = self.rank,
            "relationship reclassified"
        );
        Some(previous)
    }

    /// Append a modifier tagged with explicit channels, then recompute.
    ///
    /// With `expiry_days`, the entry expires at `now + expiry_days`; an
    /// expiry of zero counts in this recomputation only. Returns how many
    /// expired entries the recomputation dropped.
    pub fn add_opinion_modifier(
        &mut self,
        reason: impl Into<String>,
        value: f32,
        channels: ChannelSet,
        expiry_days: Option<f32>,
        now: DateTime<Utc>,
    ) -> usize {
        self.opinion_modifiers.push(OpinionModifier {
            reason: reason.into(),
            value,
            channels,
            added_at: now,
            expires_at: expiry_days.map(|d| expiry_after(now, d)),
        });
        self.recompute_variables(now)
    }

    /// Append a modifier whose channels are inferred from the reason text.
    ///
    /// See [`ChannelSet::infer_from_reason`].
    pub fn add_opinion_modifier_from_reason(
        &mut self,
        reason: &str,
        value: f32,
        expiry_days: Option<f32>,
        now: DateTime<Utc>,
    ) -> usize {
        let channels = ChannelSet::infer_from_reason(reason);
        self.add_opinion_modifier(reason, value, channels, expiry_days, now)
    }

    /// Drop expired modifiers and rebuild the variable set.
    ///
    /// Returns how many modifiers were dropped.
    pub fn recompute_variables(&mut self, now: DateTime<Utc>) -> usize {
        let (variables, pruned) = opinion::recompute(&mut self.opinion_modifiers, now);
        self.variables = variables;
        pruned
    }
}
