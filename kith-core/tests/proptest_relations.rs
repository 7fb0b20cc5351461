//! Property-Based Tests for KITH Core
//!
//! Uses `proptest` to check that relation state stays inside its ranges no
//! matter what sequence of interactions, opinions and profiles it sees.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use kith_core::compatibility::{self, CreatureProfile, Passion, TraitProfile};
use kith_core::config::{CompatibilityConfig, KithConfig};
use kith_core::manager::{RelationshipManager, RelationshipParams};
use kith_core::relation::{ChannelSet, RelationshipType, SocialRelation};
use kith_core::thought::Thought;
use kith_core::types::CreatureId;

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_kind() -> impl Strategy<Value = RelationshipType> {
    prop::sample::select(RelationshipType::ALL.to_vec())
}

fn arb_passion() -> impl Strategy<Value = Passion> {
    prop_oneof![Just(Passion::None), Just(Passion::Minor), Just(Passion::Major)]
}

fn arb_profile() -> impl Strategy<Value = CreatureProfile> {
    const TRAITS: [&str; 6] = ["kind", "cruel", "brave", "coward", "greedy", "generous"];
    const SKILLS: [&str; 4] = ["mining", "cooking", "crafting", "medicine"];
    (
        prop::collection::vec((0..TRAITS.len(), prop::option::of(0..TRAITS.len())), 0..6),
        prop::collection::vec((0..SKILLS.len(), 0u8..=20, arb_passion()), 0..4),
    )
        .prop_map(|(traits, skills)| {
            let mut profile = CreatureProfile::new();
            for (t, conflict) in traits {
                let mut trait_profile = TraitProfile::new(TRAITS[t]);
                if let Some(c) = conflict {
                    trait_profile = trait_profile.conflicting_with(TRAITS[c]);
                }
                profile = profile.with_trait(trait_profile);
            }
            for (s, level, passion) in skills {
                profile = profile.with_skill(SKILLS[s], level, passion);
            }
            profile
        })
}

fn finite_or_wild() -> impl Strategy<Value = f32> {
    prop_oneof![
        8 => -500.0f32..500.0,
        1 => Just(f32::NAN),
        1 => Just(f32::INFINITY),
        1 => Just(f32::NEG_INFINITY),
    ]
}

// ---------------------------------------------------------------------------
// Property: rank and compatibility stay in range through any interaction run
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn interactions_keep_scores_in_range(
        seed in any::<u64>(),
        qualities in prop::collection::vec(finite_or_wild(), 1..40),
    ) {
        let mut m = RelationshipManager::new(CreatureId::new(), Arc::new(KithConfig::default()));
        let mut rng = StdRng::seed_from_u64(seed);
        let mut thoughts: Vec<Thought> = Vec::new();
        let other = CreatureId::new();
        let now = Utc.with_ymd_and_hms(1050, 1, 1, 0, 0, 0).single().expect("valid date");

        for q in &qualities {
            let rel = m.process_interaction(other, *q, None, now, &mut rng, &mut thoughts);
            prop_assert!((0.0..=100.0).contains(&rel.rank()));
            prop_assert!((-100.0..=100.0).contains(&rel.compatibility()));
            prop_assert_eq!(rel.rank().to_bits(), rel.value().to_bits());
        }
        prop_assert_eq!(m.len(), 1);
        prop_assert_eq!(
            m.relationship(other).map(SocialRelation::interaction_count),
            Some(u32::try_from(qualities.len()).expect("small vec"))
        );
    }
}

// ---------------------------------------------------------------------------
// Property: set_relationship clamps whatever it is given
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn set_relationship_clamps(
        kind in arb_kind(),
        rank in finite_or_wild(),
        compatibility in finite_or_wild(),
    ) {
        let mut m = RelationshipManager::new(CreatureId::new(), Arc::new(KithConfig::default()));
        let rel = m.set_relationship(
            RelationshipParams::new(CreatureId::new(), kind)
                .with_rank(rank)
                .with_compatibility(compatibility),
        );
        prop_assert_eq!(rel.kind, kind);
        prop_assert!((0.0..=100.0).contains(&rel.rank()));
        prop_assert!((-100.0..=100.0).contains(&rel.compatibility()));
    }
}

// ---------------------------------------------------------------------------
// Property: family labels survive any later request
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn family_label_is_sticky(requested in arb_kind()) {
        let mut m = RelationshipManager::new(CreatureId::new(), Arc::new(KithConfig::default()));
        let sibling = CreatureId::new();
        m.set_relationship(RelationshipParams::new(sibling, RelationshipType::Sibling));
        let rel = m.set_relationship(RelationshipParams::new(sibling, requested));
        prop_assert!(rel.kind.is_family());
        if requested.is_family() {
            prop_assert_eq!(rel.kind, requested);
        } else {
            prop_assert_eq!(rel.kind, RelationshipType::Sibling);
        }
    }
}

// ---------------------------------------------------------------------------
// Property: variables are clamped sums of live modifiers
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn variables_stay_in_range(
        entries in prop::collection::vec((finite_or_wild(), any::<u8>(), prop::option::of(prop_oneof![0.0f32..60.0, 1.0e6f32..f32::MAX])), 0..30),
        elapsed_days in 0i64..90,
    ) {
        let start = Utc.with_ymd_and_hms(1050, 1, 1, 0, 0, 0).single().expect("valid date");
        let mut rel = SocialRelation::new(CreatureId::new(), RelationshipType::Friend);
        for (value, mask, expiry) in &entries {
            let channels = ChannelSet::from_bits_truncate(*mask);
            rel.add_opinion_modifier("event", *value, channels, *expiry, start);
        }
        rel.recompute_variables(start + Duration::days(elapsed_days));

        let v = rel.variables();
        for x in [v.loyalty, v.trust, v.fear, v.love, v.respect] {
            prop_assert!((-100.0..=100.0).contains(&x));
        }
        let now = start + Duration::days(elapsed_days);
        prop_assert!(rel.opinion_modifiers().iter().all(|m| !m.is_expired(now)));
    }
}

// ---------------------------------------------------------------------------
// Property: compatibility is bounded and does not depend on call order
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn compatibility_is_bounded_and_pure(a in arb_profile(), b in arb_profile()) {
        let config = CompatibilityConfig::default();
        let first = compatibility::score(&a, &b, &config);
        let second = compatibility::score(&a, &b, &config);
        prop_assert!((-100.0..=100.0).contains(&first));
        prop_assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn identical_profiles_never_dislike_each_other_without_conflicts(
        skills in prop::collection::vec((0u8..=20, arb_passion()), 0..5),
    ) {
        let mut profile = CreatureProfile::new().with_trait(TraitProfile::new("kind"));
        for (i, (level, passion)) in skills.into_iter().enumerate() {
            profile = profile.with_skill(format!("skill{i}"), level, passion);
        }
        let score = compatibility::score(&profile, &profile, &CompatibilityConfig::default());
        prop_assert!(score >= 10.0);
    }
}
