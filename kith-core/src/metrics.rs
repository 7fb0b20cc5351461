//! Runtime Metrics & Instrumentation
//!
//! Lightweight counters and latency histograms for the relationship engine.
//! Counters are lock-free `AtomicU64`s bumped on the hot path; the latency
//! history sits behind a `parking_lot::Mutex` because it is only read for
//! dashboards and benchmarks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use parking_lot::{Mutex, const_mutex};

// ---------------------------------------------------------------------------
// Global Counters (lock-free)
// ---------------------------------------------------------------------------

/// Process-wide counters updated by every [`crate::RelationshipManager`].
pub static COUNTERS: SocialCounters = SocialCounters::new();

/// Process-wide latency history for `process_interaction`.
pub static INTERACTION_LATENCY: LatencyMonitor = LatencyMonitor::new(0.05);

/// Atomic counters for high-frequency engine events.
pub struct SocialCounters {
    /// Interactions processed.
    pub interactions: AtomicU64,
    /// Social relations created (lazily or via upsert).
    pub relations_created: AtomicU64,
    /// Automatic relationship-type changes.
    pub reclassifications: AtomicU64,
    /// Thoughts handed to a mood sink.
    pub thoughts_emitted: AtomicU64,
    /// Death notifications that found a relation.
    pub deaths_processed: AtomicU64,
    /// Opinion modifiers dropped because they expired.
    pub modifiers_pruned: AtomicU64,
}

impl SocialCounters {
    /// Create a new set of zeroed counters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            interactions: AtomicU64::new(0),
            relations_created: AtomicU64::new(0),
            reclassifications: AtomicU64::new(0),
            thoughts_emitted: AtomicU64::new(0),
            deaths_processed: AtomicU64::new(0),
            modifiers_pruned: AtomicU64::new(0),
        }
    }

    /// Add `n` to a counter.
    pub fn add(counter: &AtomicU64, n: u64) {
        counter.fetch_add(n, Ordering::Relaxed);
    }

    /// Snapshot all counters for export.
    #[must_use]
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            interactions: self.interactions.load(Ordering::Relaxed),
            relations_created: self.relations_created.load(Ordering::Relaxed),
            reclassifications: self.reclassifications.load(Ordering::Relaxed),
            thoughts_emitted: self.thoughts_emitted.load(Ordering::Relaxed),
            deaths_processed: self.deaths_processed.load(Ordering::Relaxed),
            modifiers_pruned: self.modifiers_pruned.load(Ordering::Relaxed),
        }
    }
}

impl Default for SocialCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// A snapshot of counter values at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterSnapshot {
    /// Interactions processed.
    pub interactions: u64,
    /// Relations created.
    pub relations_created: u64,
    /// Automatic reclassifications.
    pub reclassifications: u64,
    /// Thoughts emitted.
    pub thoughts_emitted: u64,
    /// Death notifications handled.
    pub deaths_processed: u64,
    /// Expired opinion modifiers dropped.
    pub modifiers_pruned: u64,
}

impl CounterSnapshot {
    /// Format as Prometheus-compatible text.
    #[must_use]
    pub fn to_prometheus(&self) -> String {
        let rows = [
            ("kith_interactions_total", "Interactions processed", self.interactions),
            ("kith_relations_created_total", "Social relations created", self.relations_created),
            ("kith_reclassifications_total", "Automatic relationship type changes", self.reclassifications),
            ("kith_thoughts_emitted_total", "Thoughts handed to mood sinks", self.thoughts_emitted),
            ("kith_deaths_processed_total", "Death notifications handled", self.deaths_processed),
            ("kith_modifiers_pruned_total", "Expired opinion modifiers dropped", self.modifiers_pruned),
        ];
        let mut out = String::new();
        for (name, help, value) in rows {
            out.push_str(&format!(
                "# HELP {name} {help}\n# TYPE {name} counter\n{name} {value}\n"
            ));
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Latency Monitor
// ---------------------------------------------------------------------------

const HISTORY_LEN: usize = 256;

/// Tracks recent timings of one engine operation against a budget.
pub struct LatencyMonitor {
    /// Soft budget in milliseconds.
    budget_ms: f64,
    history: Mutex<LatencyHistory>,
}

/// Ring buffer of recent timings (milliseconds).
struct LatencyHistory {
    timings: Vec<f64>,
    write_idx: usize,
    count: u64,
}

impl LatencyMonitor {
    /// Create a new monitor with the given budget (milliseconds).
    #[must_use]
    pub const fn new(budget_ms: f64) -> Self {
        Self {
            budget_ms,
            history: const_mutex(LatencyHistory {
                timings: Vec::new(),
                write_idx: 0,
                count: 0,
            }),
        }
    }

    /// Begin timing an operation. The guard records elapsed time on drop.
    pub fn begin(&self) -> LatencyGuard<'_> {
        LatencyGuard {
            monitor: self,
            start: Instant::now(),
        }
    }

    /// Record a timing manually (milliseconds).
    pub fn record(&self, ms: f64) {
        let mut h = self.history.lock();
        if h.timings.len() < HISTORY_LEN {
            h.timings.push(ms);
        } else {
            let idx = h.write_idx;
            h.timings[idx] = ms;
        }
        h.write_idx = (h.write_idx + 1) % HISTORY_LEN;
        h.count += 1;
    }

    /// Total number of timings recorded.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.history.lock().count
    }

    /// The configured budget in milliseconds.
    #[must_use]
    pub fn budget_ms(&self) -> f64 {
        self.budget_ms
    }

    /// P50, P95, P99 and max over the retained history (milliseconds).
    #[must_use]
    pub fn percentiles(&self) -> LatencyPercentiles {
        let mut sorted = self.history.lock().timings.clone();
        let n = sorted.len();
        if n == 0 {
            return LatencyPercentiles::default();
        }
        sorted.sort_by(f64::total_cmp);

        let over = sorted.iter().filter(|&&t| t > self.budget_ms).count();
        LatencyPercentiles {
            p50: sorted[n / 2],
            p95: sorted[((n as f64 * 0.95) as usize).min(n - 1)],
            p99: sorted[((n as f64 * 0.99) as usize).min(n - 1)],
            max: sorted[n - 1],
            over_budget_ratio: over as f64 / n as f64,
        }
    }
}

/// RAII guard that records elapsed time when dropped.
pub struct LatencyGuard<'a> {
    monitor: &'a LatencyMonitor,
    start: Instant,
}

impl Drop for LatencyGuard<'_> {
    fn drop(&mut self) {
        self.monitor.record(self.start.elapsed().as_secs_f64() * 1000.0);
    }
}

/// Percentile statistics for operation timings.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatencyPercentiles {
    /// Median in milliseconds.
    pub p50: f64,
    /// 95th percentile in milliseconds.
    pub p95: f64,
    /// 99th percentile in milliseconds.
    pub p99: f64,
    /// Maximum retained timing.
    pub max: f64,
    /// Share of timings above budget (0.0–1.0).
    pub over_budget_ratio: f64,
}

// ---------------------------------------------------------------------------
// Tracing Span Names
// ---------------------------------------------------------------------------

/// Span names used with `tracing::span!`.
pub mod spans {
    /// Interaction processing.
    pub const INTERACTION: &str = "kith::interaction";
    /// Death propagation.
    pub const DEATH: &str = "kith::death";
    /// Expired-modifier pruning pass.
    pub const PRUNE: &str = "kith::prune";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_increment_and_snapshot() {
        let c = SocialCounters::new();
        SocialCounters::add(&c.interactions, 3);
        SocialCounters::add(&c.thoughts_emitted, 2);

        let snap = c.snapshot();
        assert_eq!(snap.interactions, 3);
        assert_eq!(snap.thoughts_emitted, 2);
        assert_eq!(snap.deaths_processed, 0);
    }

    #[test]
    fn prometheus_format_valid() {
        let c = SocialCounters::new();
        SocialCounters::add(&c.reclassifications, 42);
        let prom = c.snapshot().to_prometheus();
        assert!(prom.contains("kith_reclassifications_total 42"));
        assert!(prom.contains("# TYPE kith_interactions_total counter"));
    }

    #[test]
    fn latency_ring_buffer_wraps() {
        let monitor = LatencyMonitor::new(1.0);
        for i in 0..(HISTORY_LEN + 10) {
            monitor.record(i as f64 * 0.01);
        }
        assert_eq!(monitor.count(), (HISTORY_LEN + 10) as u64);

        let pct = monitor.percentiles();
        assert!(pct.p95 >= pct.p50);
        assert!(pct.max >= pct.p99);
        assert!(pct.over_budget_ratio > 0.0);
    }

    #[test]
    fn guard_records_on_drop() {
        let monitor = LatencyMonitor::new(100.0);
        {
            let _guard = monitor.begin();
        }
        assert_eq!(monitor.count(), 1);
        assert!(monitor.percentiles().max < 100.0);
    }
}
