//! Core type definitions shared across the relationship engine.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Identity Types
// ---------------------------------------------------------------------------

/// Unique identifier for any creature (dwarf, colonist, animal, deity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CreatureId(pub Uuid);

impl CreatureId {
    /// Create a new random creature ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CreatureId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CreatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Numeric Ranges
// ---------------------------------------------------------------------------

/// Lowest relationship rank.
pub const RANK_MIN: f32 = 0.0;
/// Highest relationship rank.
pub const RANK_MAX: f32 = 100.0;

/// Lowest compatibility score.
pub const COMPATIBILITY_MIN: f32 = -100.0;
/// Highest compatibility score.
pub const COMPATIBILITY_MAX: f32 = 100.0;

/// Lowest value of any relationship variable channel.
pub const VARIABLE_MIN: f32 = -100.0;
/// Highest value of any relationship variable channel.
pub const VARIABLE_MAX: f32 = 100.0;

/// Clamp `value` into `[min, max]`, mapping NaN to zero first.
///
/// Infinite inputs saturate at the bounds.
#[must_use]
pub fn clamp_score(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        return 0.0_f32.clamp(min, max);
    }
    value.clamp(min, max)
}

/// Clamp a rank into [`RANK_MIN`, `RANK_MAX`].
#[must_use]
pub fn clamp_rank(rank: f32) -> f32 {
    clamp_score(rank, RANK_MIN, RANK_MAX)
}

/// Clamp a compatibility score into [`COMPATIBILITY_MIN`, `COMPATIBILITY_MAX`].
#[must_use]
pub fn clamp_compatibility(compatibility: f32) -> f32 {
    clamp_score(compatibility, COMPATIBILITY_MIN, COMPATIBILITY_MAX)
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// Longest duration [`days`] will produce, well past chrono's date range.
pub const MAX_DURATION_DAYS: f32 = 100_000_000.0;

/// Convert a (possibly fractional) number of days into a [`Duration`].
///
/// Negative and non-finite inputs become a zero duration; anything longer
/// than [`MAX_DURATION_DAYS`] is capped.
#[must_use]
pub fn days(count: f32) -> Duration {
    if !count.is_finite() || count <= 0.0 {
        return Duration::zero();
    }
    let count = count.min(MAX_DURATION_DAYS);
    Duration::milliseconds((f64::from(count) * 86_400_000.0) as i64)
}

/// Absolute expiry instant for something lasting `duration_days` from `now`.
///
/// Saturates at the latest representable instant.
#[must_use]
pub fn expiry_after(now: DateTime<Utc>, duration_days: f32) -> DateTime<Utc> {
    now.checked_add_signed(days(duration_days))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
