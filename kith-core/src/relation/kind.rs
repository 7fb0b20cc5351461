//! Relationship categories.
//!
//! A closed set covering kin, spiritual, professional, animal and non-kin
//! personal bonds. The category decides whether a bond may be reclassified
//! automatically and which thoughts its interactions and deaths produce.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The qualitative label of a directed social bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipType {
    // Kin
    /// Married partner.
    Spouse,
    /// Romantic partner.
    Lover,
    /// The target is this creature's parent.
    Parent,
    /// The target is this creature's child.
    Child,
    /// Full sibling.
    Sibling,
    /// Sibling sharing one parent.
    HalfSibling,
    /// The target is this creature's grandparent.
    Grandparent,
    /// The target is this creature's grandchild.
    Grandchild,
    /// Parent's sibling.
    AuntUncle,
    /// Sibling's child.
    NieceNephew,
    /// Parent's sibling's child.
    Cousin,

    // Spiritual
    /// The target is a deity this creature worships.
    Deity,
    /// The target worships this creature.
    Worshipper,

    // Professional
    /// The target teaches this creature a craft.
    Master,
    /// The target learns a craft from this creature.
    Apprentice,
    /// The target once taught this creature.
    FormerMaster,
    /// The target once learned from this creature.
    FormerApprentice,

    // Animal
    /// The target is this creature's pet.
    Pet,
    /// The target owns this creature.
    Owner,
    /// Deep bond with an animal.
    BondedAnimal,
    /// The target trains this creature.
    AnimalTrainer,

    // Non-kin personal
    /// Strongest friendship.
    KindredSpirit,
    /// Travelling or working companion.
    Companion,
    /// Close friend.
    CloseFriend,
    /// Friend.
    Friend,
    /// Cordial.
    FriendlyTerms,
    /// Known for a long time, not close.
    LongTermAcquaintance,
    /// Barely known.
    PassingAcquaintance,
    /// Held resentment.
    Grudge,
    /// Open hostility.
    Enemy,
    /// Competitive antagonism.
    Rival,
    /// Generic acquaintance.
    Acquaintance,
}

impl RelationshipType {
    /// Every category, in declaration order.
    pub const ALL: [Self; 32] = [
        Self::Spouse,
        Self::Lover,
        Self::Parent,
        Self::Child,
        Self::Sibling,
        Self::HalfSibling,
        Self::Grandparent,
        Self::Grandchild,
        Self::AuntUncle,
        Self::NieceNephew,
        Self::Cousin,
        Self::Deity,
        Self::Worshipper,
        Self::Master,
        Self::Apprentice,
        Self::FormerMaster,
        Self::FormerApprentice,
        Self::Pet,
        Self::Owner,
        Self::BondedAnimal,
        Self::AnimalTrainer,
        Self::KindredSpirit,
        Self::Companion,
        Self::CloseFriend,
        Self::Friend,
        Self::FriendlyTerms,
        Self::LongTermAcquaintance,
        Self::PassingAcquaintance,
        Self::Grudge,
        Self::Enemy,
        Self::Rival,
        Self::Acquaintance,
    ];

    /// Kin-origin categories. Sticky under upserts and never reclassified.
    #[must_use]
    pub fn is_family(self) -> bool {
        matches!(
            self,
            Self::Spouse
                | Self::Lover
                | Self::Parent
                | Self::Child
                | Self::Sibling
                | Self::HalfSibling
                | Self::Grandparent
                | Self::Grandchild
                | Self::AuntUncle
                | Self::NieceNephew
                | Self::Cousin
        )
    }

    /// Spiritual and professional categories, which never reclassify.
    #[must_use]
    pub fn is_protected(self) -> bool {
        matches!(
            self,
            Self::Deity
                | Self::Worshipper
                | Self::Master
                | Self::Apprentice
                | Self::FormerMaster
                | Self::FormerApprentice
        )
    }

    /// Bonds between a creature and an animal.
    #[must_use]
    pub fn is_animal(self) -> bool {
        matches!(
            self,
            Self::Pet | Self::Owner | Self::BondedAnimal | Self::AnimalTrainer
        )
    }

    /// Hostile categories.
    #[must_use]
    pub fn is_adversarial(self) -> bool {
        matches!(self, Self::Grudge | Self::Enemy | Self::Rival)
    }

    /// Stable kebab-case name, used in thought identifiers.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spouse => "spouse",
            Self::Lover => "lover",
            Self::Parent => "parent",
            Self::Child => "child",
            Self::Sibling => "sibling",
            Self::HalfSibling => "half-sibling",
            Self::Grandparent => "grandparent",
            Self::Grandchild => "grandchild",
            Self::AuntUncle => "aunt-uncle",
            Self::NieceNephew => "niece-nephew",
            Self::Cousin => "cousin",
            Self::Deity => "deity",
            Self::Worshipper => "worshipper",
            Self::Master => "master",
            Self::Apprentice => "apprentice",
            Self::FormerMaster => "former-master",
            Self::FormerApprentice => "former-apprentice",
            Self::Pet => "pet",
            Self::Owner => "owner",
            Self::BondedAnimal => "bonded-animal",
            Self::AnimalTrainer => "animal-trainer",
            Self::KindredSpirit => "kindred-spirit",
            Self::Companion => "companion",
            Self::CloseFriend => "close-friend",
            Self::Friend => "friend",
            Self::FriendlyTerms => "friendly-terms",
            Self::LongTermAcquaintance => "long-term-acquaintance",
            Self::PassingAcquaintance => "passing-acquaintance",
            Self::Grudge => "grudge",
            Self::Enemy => "enemy",
            Self::Rival => "rival",
            Self::Acquaintance => "acquaintance",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Spouse => "Spouse",
            Self::Lover => "Lover",
            Self::Parent => "Parent",
            Self::Child => "Child",
            Self::Sibling => "Sibling",
            Self::HalfSibling => "Half-sibling",
            Self::Grandparent => "Grandparent",
            Self::Grandchild => "Grandchild",
            Self::AuntUncle => "Aunt/Uncle",
            Self::NieceNephew => "Niece/Nephew",
            Self::Cousin => "Cousin",
            Self::Deity => "Deity",
            Self::Worshipper => "Worshipper",
            Self::Master => "Master",
            Self::Apprentice => "Apprentice",
            Self::FormerMaster => "Former master",
            Self::FormerApprentice => "Former apprentice",
            Self::Pet => "Pet",
            Self::Owner => "Owner",
            Self::BondedAnimal => "Bonded animal",
            Self::AnimalTrainer => "Animal trainer",
            Self::KindredSpirit => "Kindred spirit",
            Self::Companion => "Companion",
            Self::CloseFriend => "Close friend",
            Self::Friend => "Friend",
            Self::FriendlyTerms => "Friendly terms",
            Self::LongTermAcquaintance => "Long-term acquaintance",
            Self::PassingAcquaintance => "Passing acquaintance",
            Self::Grudge => "Grudge",
            Self::Enemy => "Enemy",
            Self::Rival => "Rival",
            Self::Acquaintance => "Acquaintance",
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_are_disjoint() {
        for kind in RelationshipType::ALL {
            let groups = [kind.is_family(), kind.is_protected(), kind.is_animal()];
            assert!(
                groups.iter().filter(|&&g| g).count() <= 1,
                "{kind} belongs to more than one group"
            );
        }
    }

    #[test]
    fn serde_name_matches_as_str() {
        for kind in RelationshipType::ALL {
            let json = serde_json::to_string(&kind).expect("serialize kind");
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }
}
