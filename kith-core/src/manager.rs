//! Relationship Manager: the per-creature façade over its social bonds.
//!
//! Every read or write of a creature's social graph goes through here. The
//! manager only ever touches one directed edge per call: it never walks
//! the graph and never creates the reciprocal edge on the target's side.
//!
//! Time (`now`) and randomness (`rng`) are passed in by the caller so a
//! simulation can replay deterministically.

use std::cmp::Reverse;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use rand::Rng;
use tracing::{Level, debug, info, span, warn};

use crate::compatibility::{self, CreatureProfile};
use crate::config::KithConfig;
use crate::error::Result;
use crate::metrics::{self, COUNTERS, SocialCounters};
use crate::relation::{FamilyDetails, RelationshipType, SocialRelation};
use crate::thought::{self, ThoughtSink};
use crate::types::{COMPATIBILITY_MAX, COMPATIBILITY_MIN, CreatureId};

/// Fields for [`RelationshipManager::set_relationship`].
///
/// Omitted numeric fields and family details keep their previous values
/// when the relation already exists, and default to zero / absent when it
/// does not.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipParams {
    /// The other creature.
    pub target_id: CreatureId,
    /// Requested label.
    pub kind: RelationshipType,
    /// Requested rank, clamped to [0, 100].
    pub rank: Option<f32>,
    /// Requested compatibility, clamped to [-100, 100].
    pub compatibility: Option<f32>,
    /// Kinship metadata.
    pub family: Option<FamilyDetails>,
}

impl RelationshipParams {
    /// Params that only set the label.
    #[must_use]
    pub fn new(target_id: CreatureId, kind: RelationshipType) -> Self {
        Self {
            target_id,
            kind,
            rank: None,
            compatibility: None,
            family: None,
        }
    }

    /// Builder: rank.
    #[must_use]
    pub fn with_rank(mut self, rank: f32) -> Self {
        self.rank = Some(rank);
        self
    }

    /// Builder: compatibility.
    #[must_use]
    pub fn with_compatibility(mut self, compatibility: f32) -> Self {
        self.compatibility = Some(compatibility);
        self
    }

    /// Builder: kinship metadata.
    #[must_use]
    pub fn with_family(mut self, family: FamilyDetails) -> Self {
        self.family = Some(family);
        self
    }
}

/// Owner of one creature's outgoing social relations.
#[derive(Debug, Clone)]
pub struct RelationshipManager {
    owner: CreatureId,
    relations: Vec<SocialRelation>,
    config: Arc<KithConfig>,
}

impl RelationshipManager {
    /// An empty manager for `owner`.
    #[must_use]
    pub fn new(owner: CreatureId, config: Arc<KithConfig>) -> Self {
        Self::from_relations(owner, Vec::new(), config)
    }

    /// A manager over relations restored by a persistence collaborator.
    #[must_use]
    pub fn from_relations(
        owner: CreatureId,
        relations: Vec<SocialRelation>,
        config: Arc<KithConfig>,
    ) -> Self {
        Self {
            owner,
            relations,
            config,
        }
    }

    /// Give the relations back, e.g. for saving.
    #[must_use]
    pub fn into_relations(self) -> Vec<SocialRelation> {
        self.relations
    }

    /// Serialize the relation list as JSON save data.
    ///
    /// # Errors
    ///
    /// Returns [`crate::KithError::Serialization`] if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.relations)?)
    }

    /// Restore a manager from JSON written by [`Self::to_json`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::KithError::Serialization`] on malformed input.
    pub fn from_json(owner: CreatureId, json: &str, config: Arc<KithConfig>) -> Result<Self> {
        let relations: Vec<SocialRelation> = serde_json::from_str(json)?;
        Ok(Self::from_relations(owner, relations, config))
    }

    /// The creature whose relations these are.
    #[must_use]
    pub fn owner(&self) -> CreatureId {
        self.owner
    }

    /// The tuning this manager runs with.
    #[must_use]
    pub fn config(&self) -> &KithConfig {
        &self.config
    }

    /// A shared handle to the tuning, for managers of new creatures.
    #[must_use]
    pub fn shared_config(&self) -> Arc<KithConfig> {
        Arc::clone(&self.config)
    }

    /// Number of relations held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    /// Whether no relations are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Every relation, in creation order.
    #[must_use]
    pub fn all_relationships(&self) -> &[SocialRelation] {
        &self.relations
    }

    /// The relation towards `target_id`, if any.
    #[must_use]
    pub fn relationship(&self, target_id: CreatureId) -> Option<&SocialRelation> {
        self.relations.iter().find(|r| r.target_id == target_id)
    }

    fn relationship_mut(&mut self, target_id: CreatureId) -> Option<&mut SocialRelation> {
        self.relations.iter_mut().find(|r| r.target_id == target_id)
    }

    /// Up to `n` relations ordered by rank, strongest first. Ties go to the
    /// relation with more interactions.
    #[must_use]
    pub fn strongest_relationships(&self, n: usize) -> Vec<&SocialRelation> {
        let mut sorted: Vec<&SocialRelation> = self.relations.iter().collect();
        sorted.sort_by_key(|r| Reverse((OrderedFloat(r.rank()), r.interaction_count())));
        sorted.truncate(n);
        sorted
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Insert or update the relation towards `params.target_id`.
    ///
    /// A family label is sticky: asking an existing kin relation to become
    /// a non-kin label keeps the kin label while still applying the other
    /// fields.
    pub fn set_relationship(&mut self, params: RelationshipParams) -> &SocialRelation {
        let index = match self.relations.iter().position(|r| r.target_id == params.target_id) {
            Some(i) => {
                let relation = &mut self.relations[i];
                if relation.kind.is_family() && !params.kind.is_family() {
                    debug!(
                        owner = %self.owner,
                        target_id = %params.target_id,
                        kept = %relation.kind,
                        requested = %params.kind,
                        "family relationship type preserved"
                    );
                } else {
                    relation.kind = params.kind;
                }
                if let Some(rank) = params.rank {
                    relation.set_rank(rank);
                }
                if let Some(compatibility) = params.compatibility {
                    relation.set_compatibility(compatibility);
                }
                if let Some(family) = params.family {
                    relation.family = Some(family);
                }
                i
            }
            None => {
                let mut relation = SocialRelation::new(params.target_id, params.kind)
                    .with_rank(params.rank.unwrap_or(0.0))
                    .with_compatibility(params.compatibility.unwrap_or(0.0));
                relation.family = params.family;
                self.insert(relation)
            }
        };
        &self.relations[index]
    }

    /// Remove and return the relation towards `target_id`.
    pub fn remove_relationship(&mut self, target_id: CreatureId) -> Option<SocialRelation> {
        let index = self.relations.iter().position(|r| r.target_id == target_id)?;
        Some(self.relations.remove(index))
    }

    /// Drop every relation. Returns how many were dropped.
    pub fn clear_relationships(&mut self) -> usize {
        let count = self.relations.len();
        self.relations.clear();
        count
    }

    fn insert(&mut self, relation: SocialRelation) -> usize {
        if relation.target_id == self.owner {
            warn!(owner = %self.owner, "relation created towards its own owner");
        }
        debug!(
            owner = %self.owner,
            target_id = %relation.target_id,
            kind = %relation.kind,
            rank = relation.rank(),
            compatibility = relation.compatibility(),
            "social relation created"
        );
        SocialCounters::add(&COUNTERS.relations_created, 1);
        self.relations.push(relation);
        self.relations.len() - 1
    }

    // -----------------------------------------------------------------------
    // Interactions
    // -----------------------------------------------------------------------

    /// Record an interaction with `target_id` and emit the resulting thought.
    ///
    /// An unknown target gets a new relation with a random compatibility in
    /// [-100, 100]: a passing acquaintance when compatible, a grudge
    /// otherwise, starting at `quality` rank (half of it when negative,
    /// which clamps to zero). Non-finite quality counts as zero throughout.
    /// The interaction is then applied as usual. A
    /// `reason` is also logged as an opinion modifier worth `quality`,
    /// routed by keyword, that expires after the configured number of days.
    pub fn process_interaction<R, S>(
        &mut self,
        target_id: CreatureId,
        quality: f32,
        reason: Option<&str>,
        now: DateTime<Utc>,
        rng: &mut R,
        mood: &mut S,
    ) -> &SocialRelation
    where
        R: Rng + ?Sized,
        S: ThoughtSink + ?Sized,
    {
        let _span = span!(Level::TRACE, metrics::spans::INTERACTION).entered();
        let _timer = metrics::INTERACTION_LATENCY.begin();
        let config = Arc::clone(&self.config);
        let quality = if quality.is_finite() { quality } else { 0.0 };

        let index = match self.relations.iter().position(|r| r.target_id == target_id) {
            Some(i) => i,
            None => {
                let compatibility: f32 = rng.gen_range(COMPATIBILITY_MIN..=COMPATIBILITY_MAX);
                let kind = if compatibility >= 0.0 {
                    RelationshipType::PassingAcquaintance
                } else {
                    RelationshipType::Grudge
                };
                let initial_rank = if quality < 0.0 { quality / 2.0 } else { quality };
                self.insert(
                    SocialRelation::new(target_id, kind)
                        .with_rank(initial_rank)
                        .with_compatibility(compatibility),
                )
            }
        };

        let relation = &mut self.relations[index];
        let outcome = relation.interact(quality, now, &config.social);
        if outcome.reclassified_from.is_some() {
            SocialCounters::add(&COUNTERS.reclassifications, 1);
        }
        if let Some(reason) = reason {
            let pruned = relation.add_opinion_modifier_from_reason(
                reason,
                quality,
                Some(config.social.interaction_opinion_expiry_days),
                now,
            );
            SocialCounters::add(&COUNTERS.modifiers_pruned, pruned as u64);
        }
        SocialCounters::add(&COUNTERS.interactions, 1);

        if let Some(thought) = thought::interaction_thought(relation.kind, quality, target_id, now, &config.mood) {
            mood.apply_thought(thought);
            SocialCounters::add(&COUNTERS.thoughts_emitted, 1);
        }

        &self.relations[index]
    }

    /// Directed compatibility of `own` (this creature) towards `other`.
    ///
    /// Pure: does not read or modify any relation.
    #[must_use]
    pub fn calculate_compatibility(&self, own: &CreatureProfile, other: &CreatureProfile) -> f32 {
        compatibility::score(own, other, &self.config.compatibility)
    }

    /// React to the death of `target_id`.
    ///
    /// No-op without a relation. Otherwise emits one long bereavement
    /// thought chosen by the relation's label; the relation itself is kept.
    /// Returns whether a thought was emitted.
    pub fn process_related_creature_death<S>(
        &self,
        target_id: CreatureId,
        now: DateTime<Utc>,
        mood: &mut S,
    ) -> bool
    where
        S: ThoughtSink + ?Sized,
    {
        let _span = span!(Level::TRACE, metrics::spans::DEATH).entered();
        let Some(relation) = self.relationship(target_id) else {
            return false;
        };

        let thought = thought::death_thought(relation.kind, target_id, now, &self.config.mood);
        info!(
            owner = %self.owner,
            target_id = %target_id,
            kind = %relation.kind,
            mood_delta = thought.mood_delta,
            "related creature died"
        );
        mood.apply_thought(thought);
        SocialCounters::add(&COUNTERS.deaths_processed, 1);
        SocialCounters::add(&COUNTERS.thoughts_emitted, 1);
        true
    }

    /// Recompute every relation's variables at `now`, dropping expired
    /// opinion modifiers. Returns how many modifiers were dropped.
    pub fn prune_expired(&mut self, now: DateTime<Utc>) -> usize {
        let _span = span!(Level::TRACE, metrics::spans::PRUNE).entered();
        let pruned: usize = self
            .relations
            .iter_mut()
            .map(|r| r.recompute_variables(now))
            .sum();
        if pruned > 0 {
            debug!(owner = %self.owner, pruned, "expired opinion modifiers dropped");
        }
        SocialCounters::add(&COUNTERS.modifiers_pruned, pruned as u64);
        pruned
    }

    /// Overwrite the compatibility of an existing relation. Returns whether
    /// the relation existed.
    pub fn set_compatibility(&mut self, target_id: CreatureId, compatibility: f32) -> bool {
        match self.relationship_mut(target_id) {
            Some(relation) => {
                relation.set_compatibility(compatibility);
                true
            }
            None => false,
        }
    }
}
