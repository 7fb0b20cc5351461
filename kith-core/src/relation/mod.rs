//! The social bond and its supporting types.
//!
//! A [`SocialRelation`] is one creature's directed view of another. It
//! carries a [`RelationshipType`] label, a rank, a compatibility score, the
//! five-channel [`RelationshipVariables`] and the [`OpinionModifier`] ledger
//! those variables are recomputed from.

pub mod bond;
pub mod classify;
pub mod kind;
pub mod opinion;
pub mod variables;

pub use bond::{FamilyDetails, InteractionOutcome, SocialRelation};
pub use kind::RelationshipType;
pub use opinion::OpinionModifier;
pub use variables::{Channel, ChannelSet, RelationshipVariables};
