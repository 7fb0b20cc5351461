//! # KITH Core Library
//!
//! Relationship simulation for colony and fortress sims.
//!
//! Every creature holds a [`RelationshipManager`] with its directed view of
//! every other creature it knows:
//!
//! - **Rank**: how strong the bond is (0–100)
//! - **Compatibility**: how well their traits and skills mesh (−100–100)
//! - **Type**: one of the [`RelationshipType`] labels, re-derived from
//!   rank and compatibility unless a family, spiritual or professional bond pins it
//! - **Variables**: loyalty, trust, fear, love and respect, recomputed from
//!   a ledger of expiring [`relation::OpinionModifier`]s
//!
//! Interactions and deaths emit [`Thought`]s into whatever [`ThoughtSink`]
//! models the owner's mood; [`MoodLedger`] is a ready-made one.
//!
//! ## Performance Contract
//!
//! - `process_interaction`: < 50μs
//! - `calculate_compatibility` (10 traits, 20 skills): < 20μs
//! - `prune_expired` (100 relations): < 100μs

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod compatibility;
pub mod config;
pub mod creature;
pub mod error;
pub mod manager;
pub mod metrics;
pub mod mood;
pub mod relation;
pub mod telemetry;
pub mod thought;
pub mod types;

pub use compatibility::{CreatureProfile, Passion, TraitProfile};
pub use config::KithConfig;
pub use creature::{Creature, CreatureRegistry, InMemoryRegistry};
pub use error::KithError;
pub use manager::{RelationshipManager, RelationshipParams};
pub use mood::MoodLedger;
pub use relation::{Channel, ChannelSet, FamilyDetails, RelationshipType, SocialRelation};
pub use thought::{Thought, ThoughtSink};
pub use types::*;
