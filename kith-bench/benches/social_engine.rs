//! KITH Benchmark Suite
//!
//! Performance targets:
//!   process_interaction_existing ..... < 50μs
//!   calculate_compatibility_large .... < 20μs
//!   prune_expired_100_relations ...... < 100μs
//!   death_broadcast_50_creatures ..... < 200μs

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

use kith_core::compatibility::{CreatureProfile, Passion, TraitProfile};
use kith_core::config::KithConfig;
use kith_core::creature::{self, Creature, InMemoryRegistry};
use kith_core::manager::{RelationshipManager, RelationshipParams};
use kith_core::mood::MoodLedger;
use kith_core::relation::RelationshipType;
use kith_core::thought::Thought;
use kith_core::types::CreatureId;

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1050, 1, 1, 0, 0, 0)
        .single()
        .expect("valid date")
}

fn make_profile(seed: usize) -> CreatureProfile {
    const TRAITS: [&str; 12] = [
        "kind", "cruel", "brave", "coward", "greedy", "generous", "lazy", "hardworking", "calm",
        "volatile", "pious", "cynical",
    ];
    let mut profile = CreatureProfile::new();
    for i in 0..10 {
        let id = TRAITS[(seed + i) % TRAITS.len()];
        let conflict = TRAITS[(seed + i + 1) % TRAITS.len()];
        profile = profile.with_trait(TraitProfile::new(id).conflicting_with(conflict));
    }
    for i in 0..20 {
        let passion = match (seed + i) % 3 {
            0 => Passion::None,
            1 => Passion::Minor,
            _ => Passion::Major,
        };
        profile = profile.with_skill(format!("skill_{i}"), ((seed + i) % 20) as u8, passion);
    }
    profile
}

/// Benchmark: Interaction with an already-known creature (target: < 50μs).
fn bench_process_interaction(c: &mut Criterion) {
    let mut manager = RelationshipManager::new(CreatureId::new(), Arc::new(KithConfig::default()));
    let targets: Vec<CreatureId> = (0..100).map(|_| CreatureId::new()).collect();
    for (i, id) in targets.iter().enumerate() {
        manager.set_relationship(
            RelationshipParams::new(*id, RelationshipType::FriendlyTerms)
                .with_rank(i as f32)
                .with_compatibility(25.0),
        );
    }
    let mut rng = StdRng::seed_from_u64(42);
    let mut mood = MoodLedger::new();
    let now = epoch();
    let mut i = 0usize;

    c.bench_function("process_interaction_existing", |b| {
        b.iter(|| {
            let target = targets[i % targets.len()];
            i += 1;
            let rel = manager.process_interaction(
                black_box(target),
                black_box(2.0),
                Some("Shared a secret"),
                now,
                &mut rng,
                &mut mood,
            );
            black_box(rel.rank());
        });
    });
}

/// Benchmark: Compatibility of two full profiles (target: < 20μs).
fn bench_calculate_compatibility(c: &mut Criterion) {
    let manager = RelationshipManager::new(CreatureId::new(), Arc::new(KithConfig::default()));
    let own = make_profile(0);
    let other = make_profile(5);

    c.bench_function("calculate_compatibility_large", |b| {
        b.iter(|| {
            black_box(manager.calculate_compatibility(black_box(&own), black_box(&other)));
        });
    });
}

/// Benchmark: Expiry sweep over 100 relations with 5 modifiers each (target: < 100μs).
fn bench_prune_expired(c: &mut Criterion) {
    let mut manager = RelationshipManager::new(CreatureId::new(), Arc::new(KithConfig::default()));
    let mut rng = StdRng::seed_from_u64(7);
    let mut thoughts: Vec<Thought> = Vec::new();
    let start = epoch();
    for _ in 0..100 {
        let target = CreatureId::new();
        for day in 0..5 {
            manager.process_interaction(
                target,
                3.0,
                Some("Defended me and earned my respect"),
                start + Duration::days(day),
                &mut rng,
                &mut thoughts,
            );
        }
    }
    // Before any modifier expires, so every iteration walks the full ledger.
    let now = start + Duration::days(10);

    c.bench_function("prune_expired_100_relations", |b| {
        b.iter(|| {
            black_box(manager.prune_expired(black_box(now)));
        });
    });
}

/// Benchmark: Death notice delivered to 50 creatures (target: < 200μs).
fn bench_broadcast_death(c: &mut Criterion) {
    let config = Arc::new(KithConfig::default());
    let mut registry = InMemoryRegistry::new();
    let deceased = registry.insert(Creature::new("Elder", make_profile(1), Arc::clone(&config)));
    for i in 0..50 {
        let id = registry.insert(Creature::new(format!("Villager {i}"), make_profile(i), Arc::clone(&config)));
        let kind = if i % 2 == 0 {
            RelationshipType::Friend
        } else {
            RelationshipType::Rival
        };
        creature::bond_reciprocal(&mut registry, id, deceased, kind, kind).expect("both registered");
    }
    let now = epoch();

    c.bench_function("death_broadcast_50_creatures", |b| {
        b.iter(|| {
            black_box(creature::broadcast_death(&mut registry, black_box(deceased), now));
        });
    });
}

criterion_group!(
    benches,
    bench_process_interaction,
    bench_calculate_compatibility,
    bench_prune_expired,
    bench_broadcast_death,
);
criterion_main!(benches);
