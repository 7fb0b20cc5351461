//! Creatures and the registry that holds them.
//!
//! The relationship engine works on one directed edge at a time. Anything
//! that touches two creatures at once (reciprocal bonds, introductions,
//! death notices to the whole population) lives here, on top of a
//! [`CreatureRegistry`] that owns the creatures.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{debug, info};

use crate::compatibility::CreatureProfile;
use crate::config::KithConfig;
use crate::error::{KithError, Result};
use crate::manager::{RelationshipManager, RelationshipParams};
use crate::mood::MoodLedger;
use crate::relation::{RelationshipType, SocialRelation};
use crate::types::CreatureId;

/// A simulated creature: identity, compatibility profile, mood and bonds.
#[derive(Debug, Clone)]
pub struct Creature {
    /// Unique id.
    pub id: CreatureId,
    /// Display name.
    pub name: String,
    /// Traits and skills used for compatibility.
    pub profile: CreatureProfile,
    /// Held thoughts.
    pub mood: MoodLedger,
    /// Outgoing relations.
    pub social: RelationshipManager,
}

impl Creature {
    /// A creature with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>, profile: CreatureProfile, config: Arc<KithConfig>) -> Self {
        Self::with_id(CreatureId::new(), name, profile, config)
    }

    /// A creature with a known id, e.g. when restoring a save.
    #[must_use]
    pub fn with_id(
        id: CreatureId,
        name: impl Into<String>,
        profile: CreatureProfile,
        config: Arc<KithConfig>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            profile,
            mood: MoodLedger::new(),
            social: RelationshipManager::new(id, config),
        }
    }

    /// Interact with `other`, feeding the resulting thought into this
    /// creature's own mood.
    ///
    /// # Errors
    ///
    /// Returns [`KithError::SelfRelationship`] if `other` is this creature.
    pub fn interact_with<R: Rng + ?Sized>(
        &mut self,
        other: CreatureId,
        quality: f32,
        reason: Option<&str>,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<&SocialRelation> {
        if other == self.id {
            return Err(KithError::SelfRelationship(self.id));
        }
        Ok(self
            .social
            .process_interaction(other, quality, reason, now, rng, &mut self.mood))
    }

    /// How compatible this creature finds `other`.
    #[must_use]
    pub fn compatibility_with(&self, other: &Creature) -> f32 {
        self.social.calculate_compatibility(&self.profile, &other.profile)
    }

    /// React to the death of `deceased`. Returns whether a thought was
    /// emitted.
    pub fn mourn(&mut self, deceased: CreatureId, now: DateTime<Utc>) -> bool {
        self.social
            .process_related_creature_death(deceased, now, &mut self.mood)
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Lookup service resolving creature ids to creatures.
pub trait CreatureRegistry {
    /// Shared access to a creature.
    fn lookup(&self, id: CreatureId) -> Option<&Creature>;

    /// Exclusive access to a creature.
    fn lookup_mut(&mut self, id: CreatureId) -> Option<&mut Creature>;

    /// Ids of every registered creature.
    fn ids(&self) -> Vec<CreatureId>;
}

/// A [`CreatureRegistry`] backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    creatures: HashMap<CreatureId, Creature>,
}

impl InMemoryRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a creature, replacing any with the same id. Returns the id.
    pub fn insert(&mut self, creature: Creature) -> CreatureId {
        let id = creature.id;
        self.creatures.insert(id, creature);
        id
    }

    /// Unregister a creature.
    pub fn remove(&mut self, id: CreatureId) -> Option<Creature> {
        self.creatures.remove(&id)
    }

    /// Number of registered creatures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }
}

impl CreatureRegistry for InMemoryRegistry {
    fn lookup(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.get(&id)
    }

    fn lookup_mut(&mut self, id: CreatureId) -> Option<&mut Creature> {
        self.creatures.get_mut(&id)
    }

    fn ids(&self) -> Vec<CreatureId> {
        let mut ids: Vec<CreatureId> = self.creatures.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

// ---------------------------------------------------------------------------
// Orchestration
// ---------------------------------------------------------------------------

fn require_pair<G>(registry: &G, a: CreatureId, b: CreatureId) -> Result<()>
where
    G: CreatureRegistry + ?Sized,
{
    if a == b {
        return Err(KithError::SelfRelationship(a));
    }
    for id in [a, b] {
        if registry.lookup(id).is_none() {
            return Err(KithError::CreatureNotFound(id));
        }
    }
    Ok(())
}

/// Create or update both directions of a bond: `a` sees `b` as `a_to_b`
/// and `b` sees `a` as `b_to_a`. Family labels stay sticky on either side.
///
/// # Errors
///
/// [`KithError::SelfRelationship`] if `a == b`, [`KithError::CreatureNotFound`]
/// if either is unregistered. Nothing is written on error.
pub fn bond_reciprocal<G>(
    registry: &mut G,
    a: CreatureId,
    b: CreatureId,
    a_to_b: RelationshipType,
    b_to_a: RelationshipType,
) -> Result<()>
where
    G: CreatureRegistry + ?Sized,
{
    require_pair(registry, a, b)?;
    for (from, to, kind) in [(a, b, a_to_b), (b, a, b_to_a)] {
        let creature = registry.lookup_mut(from).ok_or(KithError::CreatureNotFound(from))?;
        creature.social.set_relationship(RelationshipParams::new(to, kind));
    }
    debug!(%a, %b, %a_to_b, %b_to_a, "reciprocal bond set");
    Ok(())
}

/// Make `a` and `b` aware of each other.
///
/// Each side's compatibility is scored from its own profile. Missing edges
/// are created as passing acquaintances at rank zero; existing edges only
/// have their compatibility refreshed.
///
/// # Errors
///
/// Same as [`bond_reciprocal`].
pub fn introduce<G>(registry: &mut G, a: CreatureId, b: CreatureId) -> Result<()>
where
    G: CreatureRegistry + ?Sized,
{
    require_pair(registry, a, b)?;
    let (a_to_b, b_to_a) = {
        let first = registry.lookup(a).ok_or(KithError::CreatureNotFound(a))?;
        let second = registry.lookup(b).ok_or(KithError::CreatureNotFound(b))?;
        (first.compatibility_with(second), second.compatibility_with(first))
    };

    for (from, to, compatibility) in [(a, b, a_to_b), (b, a, b_to_a)] {
        let social = &mut registry
            .lookup_mut(from)
            .ok_or(KithError::CreatureNotFound(from))?
            .social;
        if !social.set_compatibility(to, compatibility) {
            social.set_relationship(
                RelationshipParams::new(to, RelationshipType::PassingAcquaintance)
                    .with_compatibility(compatibility),
            );
        }
    }
    debug!(%a, %b, a_to_b, b_to_a, "creatures introduced");
    Ok(())
}

/// Tell every other registered creature that `deceased` died. Returns how
/// many of them held a relation and were affected.
pub fn broadcast_death<G>(registry: &mut G, deceased: CreatureId, now: DateTime<Utc>) -> usize
where
    G: CreatureRegistry + ?Sized,
{
    let mut mourners = 0;
    for id in registry.ids() {
        if id == deceased {
            continue;
        }
        if registry.lookup_mut(id).is_some_and(|c| c.mourn(deceased, now)) {
            mourners += 1;
        }
    }
    info!(%deceased, mourners, "death broadcast");
    mourners
}

/// A copy of `source` under a fresh id, with no relations and no thoughts.
#[must_use]
pub fn duplicate_creature(source: &Creature) -> Creature {
    Creature::new(
        source.name.clone(),
        source.profile.clone(),
        source.social.shared_config(),
    )
}
