//! Opinion Modifier Ledger: time-bounded contributions to the variable set.
//!
//! Modifiers are appended and never edited. Expired entries are dropped
//! lazily, the next time the ledger is folded into the variable set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::variables::{Channel, ChannelSet, RelationshipVariables};

/// One ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpinionModifier {
    /// Free-text cause, e.g. "Shared a drink".
    pub reason: String,
    /// Signed contribution to every tagged channel.
    pub value: f32,
    /// Channels this entry contributes to.
    pub channels: ChannelSet,
    /// When the entry was recorded.
    pub added_at: DateTime<Utc>,
    /// When the entry stops counting. `None` lasts forever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl OpinionModifier {
    /// Whether the entry no longer counts at `now`.
    ///
    /// An entry expiring exactly at `now` still counts.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at < now)
    }
}

/// Drop expired entries, then fold the rest into a fresh variable set.
///
/// Each channel is the unweighted sum of the values of entries tagged with
/// it, clamped to [-100, 100]. Returns the variables and how many entries
/// were dropped.
pub fn recompute(
    ledger: &mut Vec<OpinionModifier>,
    now: DateTime<Utc>,
) -> (RelationshipVariables, usize) {
    let before = ledger.len();
    ledger.retain(|m| !m.is_expired(now));
    let pruned = before - ledger.len();

    let mut sums = [0.0_f32; 5];
    for modifier in ledger.iter().filter(|m| m.value.is_finite()) {
        for channel in modifier.channels.channels() {
            sums[channel as usize] += modifier.value;
        }
    }

    let mut variables = RelationshipVariables::default();
    for channel in Channel::ALL {
        variables.set(channel, sums[channel as usize]);
    }
    (variables, pruned)
}
