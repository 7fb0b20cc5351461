//! Mood Ledger: a reference [`ThoughtSink`].
//!
//! Keeps the thoughts a creature currently holds. Thoughts sharing an id
//! stack up to their stack limit; one more replaces the oldest instance.
//! Thoughts stop counting once their duration has elapsed and are dropped
//! on the next [`MoodLedger::expire`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::thought::{Thought, ThoughtSink};

/// Active thoughts of one creature.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoodLedger {
    thoughts: Vec<Thought>,
}

impl MoodLedger {
    /// An empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All held thoughts, expired ones included until [`Self::expire`] runs.
    #[must_use]
    pub fn thoughts(&self) -> &[Thought] {
        &self.thoughts
    }

    /// Thoughts still in effect at `now`.
    pub fn active(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Thought> {
        self.thoughts.iter().filter(move |t| t.expires_at() > now)
    }

    /// Number of held instances with the given id.
    #[must_use]
    pub fn count(&self, id: &str) -> usize {
        self.thoughts.iter().filter(|t| t.id == id).count()
    }

    /// Sum of mood deltas of the thoughts in effect at `now`.
    #[must_use]
    pub fn total_mood(&self, now: DateTime<Utc>) -> f32 {
        self.active(now).map(|t| t.mood_delta).sum()
    }

    /// Drop thoughts whose duration has elapsed. Returns how many.
    pub fn expire(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.thoughts.len();
        self.thoughts.retain(|t| t.expires_at() > now);
        before - self.thoughts.len()
    }
}

impl ThoughtSink for MoodLedger {
    fn apply_thought(&mut self, thought: Thought) {
        let limit = thought.stack_limit.max(1) as usize;
        while self.count(&thought.id) >= limit {
            let oldest = self
                .thoughts
                .iter()
                .enumerate()
                .filter(|(_, t)| t.id == thought.id)
                .min_by_key(|(_, t)| t.issued_at)
                .map(|(i, _)| i);
            match oldest {
                Some(i) => {
                    self.thoughts.remove(i);
                }
                None => break,
            }
        }
        self.thoughts.push(thought);
    }
}
