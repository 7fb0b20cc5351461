//! Relationship Variable Set: the five opinion channels of a bond.
//!
//! Channels are recomputed from the opinion ledger rather than mutated
//! directly; see [`super::opinion`].

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::types::{VARIABLE_MAX, VARIABLE_MIN, clamp_score};

/// One of the five named channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Willingness to stand by the other.
    Loyalty,
    /// Belief that the other is honest and reliable.
    Trust,
    /// Apprehension of the other.
    Fear,
    /// Affection.
    Love,
    /// Regard for the other's abilities or standing.
    Respect,
}

impl Channel {
    /// All channels in canonical order.
    pub const ALL: [Self; 5] = [
        Self::Loyalty,
        Self::Trust,
        Self::Fear,
        Self::Love,
        Self::Respect,
    ];

    /// The single-channel flag.
    #[must_use]
    pub const fn flag(self) -> ChannelSet {
        match self {
            Self::Loyalty => ChannelSet::LOYALTY,
            Self::Trust => ChannelSet::TRUST,
            Self::Fear => ChannelSet::FEAR,
            Self::Love => ChannelSet::LOVE,
            Self::Respect => ChannelSet::RESPECT,
        }
    }

    /// Lower-case substrings that route a free-text reason into this channel.
    #[must_use]
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Loyalty => &["loyal", "betray", "defend", "protect", "abandon"],
            Self::Trust => &["trust", "lie", "honest", "betray", "secret", "promise"],
            Self::Fear => &["fear", "threat", "attack", "intimidat", "scare"],
            Self::Love => &["love", "romance", "kiss", "gift", "affection"],
            Self::Respect => &["respect", "admire", "skill", "insult", "humiliat"],
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Loyalty => "loyalty",
            Self::Trust => "trust",
            Self::Fear => "fear",
            Self::Love => "love",
            Self::Respect => "respect",
        };
        f.write_str(name)
    }
}

bitflags! {
    /// A set of channels, stored as a bitmask and serialized as a list.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(from = "Vec<Channel>", into = "Vec<Channel>")]
    pub struct ChannelSet: u8 {
        /// Loyalty channel.
        const LOYALTY = 1 << 0;
        /// Trust channel.
        const TRUST = 1 << 1;
        /// Fear channel.
        const FEAR = 1 << 2;
        /// Love channel.
        const LOVE = 1 << 3;
        /// Respect channel.
        const RESPECT = 1 << 4;
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl ChannelSet {
    /// No channels.
    pub const EMPTY: Self = Self::empty();

    /// Set containing exactly `channel`.
    #[must_use]
    pub const fn only(channel: Channel) -> Self {
        channel.flag()
    }

    /// Copy of `self` with `channel` added.
    #[must_use]
    pub const fn with(self, channel: Channel) -> Self {
        self.union(channel.flag())
    }

    /// Whether `channel` is in the set.
    #[must_use]
    pub const fn includes(self, channel: Channel) -> bool {
        self.contains(channel.flag())
    }

    /// Channels in canonical order.
    pub fn channels(self) -> impl Iterator<Item = Channel> {
        Channel::ALL.into_iter().filter(move |c| self.includes(*c))
    }

    /// Infer channels from a free-text reason by case-insensitive keyword
    /// matching. A reason may land in several channels, or in none.
    #[must_use]
    pub fn infer_from_reason(reason: &str) -> Self {
        let lowered = reason.to_lowercase();
        Channel::ALL
            .into_iter()
            .filter(|c| c.keywords().iter().any(|k| lowered.contains(k)))
            .collect()
    }
}

impl FromIterator<Channel> for ChannelSet {
    fn from_iter<I: IntoIterator<Item = Channel>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl From<Vec<Channel>> for ChannelSet {
    fn from(channels: Vec<Channel>) -> Self {
        channels.into_iter().collect()
    }
}

impl From<ChannelSet> for Vec<Channel> {
    fn from(set: ChannelSet) -> Self {
        set.channels().collect()
    }
}

/// The five channels attached to every bond, each in [-100, 100].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipVariables {
    /// Loyalty channel.
    pub loyalty: f32,
    /// Trust channel.
    pub trust: f32,
    /// Fear channel.
    pub fear: f32,
    /// Love channel.
    pub love: f32,
    /// Respect channel.
    pub respect: f32,
}

impl RelationshipVariables {
    /// Read one channel.
    #[must_use]
    pub fn get(&self, channel: Channel) -> f32 {
        match channel {
            Channel::Loyalty => self.loyalty,
            Channel::Trust => self.trust,
            Channel::Fear => self.fear,
            Channel::Love => self.love,
            Channel::Respect => self.respect,
        }
    }

    /// Write one channel, clamped to [-100, 100].
    pub fn set(&mut self, channel: Channel, value: f32) {
        let value = clamp_score(value, VARIABLE_MIN, VARIABLE_MAX);
        match channel {
            Channel::Loyalty => self.loyalty = value,
            Channel::Trust => self.trust = value,
            Channel::Fear => self.fear = value,
            Channel::Love => self.love = value,
            Channel::Respect => self.respect = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_can_hit_several_channels() {
        let set = ChannelSet::infer_from_reason("Betrayed my trust");
        assert!(set.includes(Channel::Trust));
        assert!(set.includes(Channel::Loyalty));
        assert!(!set.includes(Channel::Fear));
        assert_eq!(set, ChannelSet::LOYALTY | ChannelSet::TRUST);
    }

    #[test]
    fn unmatched_reason_is_empty() {
        assert!(ChannelSet::infer_from_reason("shared a meal").is_empty());
    }

    #[test]
    fn keyword_matching_ignores_case() {
        let set = ChannelSet::infer_from_reason("LIED about the ale");
        assert_eq!(set, ChannelSet::only(Channel::Trust));
    }

    #[test]
    fn set_clamps_channel() {
        let mut vars = RelationshipVariables::default();
        vars.set(Channel::Fear, 250.0);
        vars.set(Channel::Love, -250.0);
        assert_eq!(vars.get(Channel::Fear), 100.0);
        assert_eq!(vars.get(Channel::Love), -100.0);
    }

    #[test]
    fn channel_set_serializes_as_list() {
        let set = ChannelSet::only(Channel::Respect).with(Channel::Loyalty);
        let json = serde_json::to_string(&set).expect("serialize");
        assert_eq!(json, r#"["loyalty","respect"]"#);
        let back: ChannelSet = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, set);
        assert_eq!(serde_json::to_string(&ChannelSet::default()).expect("serialize"), "[]");
    }
}
