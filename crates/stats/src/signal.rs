//! # Scalar Signal Statistics
//!
//! [`SignalStats`] ingests one scalar per simulation step and keeps only the
//! running aggregates needed to answer every [`StatisticKind`] in O(1):
//! a Welford mean/M2 pair, the sum of squares, and running extrema.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Serialize, Serializer};

use crate::error::StatsError;
use crate::kind::StatisticKind;

/// Running aggregates shared by all statistic kinds.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
struct Accumulator {
    count: u64,
    mean: f64,
    m2: f64,
    sum_sq: f64,
    max_abs: f64,
    max: f64,
    min: f64,
}

impl Accumulator {
    #[inline]
    fn push(&mut self, x: f64) {
        self.count += 1;
        let n = self.count as f64;
        let delta = x - self.mean;
        self.mean += delta / n;
        self.m2 += delta * (x - self.mean);
        self.sum_sq += x * x;
        self.max_abs = self.max_abs.max(x.abs());
        if self.count == 1 {
            self.max = x;
            self.min = x;
        } else {
            self.max = self.max.max(x);
            self.min = self.min.min(x);
        }
    }

    /// Every kind reports 0.0 before the first sample.
    fn value(&self, kind: StatisticKind) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        match kind {
            StatisticKind::MaxAbs => self.max_abs,
            StatisticKind::Mean => self.mean,
            StatisticKind::Variance => {
                if self.count > 1 {
                    self.m2 / (self.count - 1) as f64
                } else {
                    0.0
                }
            }
            StatisticKind::Rms => (self.sum_sq / self.count as f64).sqrt(),
            StatisticKind::MaxPositive => self.max,
            StatisticKind::MaxNegative => self.min,
        }
    }
}

/// Streaming summary statistics over a scalar signal.
///
/// Statistics are enabled by name (see [`StatisticKind`]) and only enabled
/// kinds appear in [`SignalStats::map`]. No sample history is retained.
///
/// ```
/// use stats::{SignalStats, StatisticKind};
///
/// let mut energy = SignalStats::new();
/// energy.insert_statistics("MaxAbs,Variance,Mean").unwrap();
/// energy.extend([1.0, 2.0, 3.0, 4.0]);
/// assert_eq!(energy.value(StatisticKind::Mean), Some(2.5));
/// assert_eq!(energy.value(StatisticKind::Rms), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SignalStats {
    enabled: BTreeSet<StatisticKind>,
    acc: Accumulator,
}

impl SignalStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an accumulator with the comma-separated `names` enabled.
    ///
    /// # Errors
    ///
    /// See [`SignalStats::insert_statistics`].
    pub fn with_statistics(names: &str) -> Result<Self, StatsError> {
        let mut stats = Self::new();
        stats.insert_statistics(names)?;
        Ok(stats)
    }

    /// Enable a single statistic by name. Enabling twice is a no-op.
    ///
    /// # Errors
    ///
    /// [`StatsError::UnknownStatistic`] if `name` is not recognized; the
    /// enabled set is left unchanged.
    pub fn insert_statistic(&mut self, name: &str) -> Result<(), StatsError> {
        let kind = name.parse::<StatisticKind>().map_err(|err| {
            tracing::warn!(%err, "rejected statistic name");
            err
        })?;
        self.enable(kind);
        Ok(())
    }

    /// Enable every statistic in a comma-separated list.
    ///
    /// The list is validated in full first: on error nothing is enabled.
    ///
    /// # Errors
    ///
    /// [`StatsError::EmptyStatisticList`] or [`StatsError::UnknownStatistic`].
    pub fn insert_statistics(&mut self, names: &str) -> Result<(), StatsError> {
        let kinds = StatisticKind::parse_list(names).map_err(|err| {
            tracing::warn!(%err, names, "rejected statistic list");
            err
        })?;
        for kind in kinds {
            self.enable(kind);
        }
        Ok(())
    }

    /// Enable `kind` directly, bypassing name lookup.
    pub fn enable(&mut self, kind: StatisticKind) {
        if self.enabled.insert(kind) {
            tracing::debug!(statistic = %kind, "statistic enabled");
        }
    }

    #[must_use]
    pub fn is_enabled(&self, kind: StatisticKind) -> bool {
        self.enabled.contains(&kind)
    }

    /// Enabled kinds in declaration order.
    pub fn statistics(&self) -> impl Iterator<Item = StatisticKind> + '_ {
        self.enabled.iter().copied()
    }

    /// Ingest one sample.
    #[inline]
    pub fn insert_data(&mut self, x: f64) {
        self.acc.push(x);
    }

    /// Number of samples inserted since construction or the last reset.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.acc.count
    }

    /// Current value of `kind`, or `None` if it is not enabled.
    ///
    /// Returns `Some(0.0)` for an enabled kind before any sample arrives.
    #[must_use]
    pub fn value(&self, kind: StatisticKind) -> Option<f64> {
        self.is_enabled(kind).then(|| self.acc.value(kind))
    }

    /// Snapshot of every enabled statistic.
    #[must_use]
    pub fn map(&self) -> BTreeMap<StatisticKind, f64> {
        self.enabled
            .iter()
            .map(|&kind| (kind, self.acc.value(kind)))
            .collect()
    }

    /// Drop all samples, keeping the enabled statistics.
    pub fn reset(&mut self) {
        self.acc = Accumulator::default();
    }
}

impl Extend<f64> for SignalStats {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for x in iter {
            self.insert_data(x);
        }
    }
}

/// Serializes as the statistic map, e.g. `{"MaxAbs":4.0,"Mean":2.5}`.
impl Serialize for SignalStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.map().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn four_sample_scenario() {
        let mut s = SignalStats::with_statistics("Mean,MaxAbs,Variance").unwrap();
        s.extend([1.0, 2.0, 3.0, 4.0]);

        assert_eq!(s.count(), 4);
        assert!(close(s.value(StatisticKind::Mean).unwrap(), 2.5));
        assert!(close(s.value(StatisticKind::MaxAbs).unwrap(), 4.0));
        assert!(close(s.value(StatisticKind::Variance).unwrap(), 1.6667));
    }

    #[test]
    fn empty_accumulator_reports_zero() {
        let mut s = SignalStats::new();
        for kind in StatisticKind::ALL {
            s.enable(kind);
        }
        for (_, value) in s.map() {
            assert_eq!(value, 0.0);
        }
    }

    #[test]
    fn single_sample_variance_is_zero() {
        let mut s = SignalStats::with_statistics("Variance,Mean").unwrap();
        s.insert_data(-7.5);
        assert_eq!(s.value(StatisticKind::Variance), Some(0.0));
        assert_eq!(s.value(StatisticKind::Mean), Some(-7.5));
    }

    #[test]
    fn extrema_and_rms() {
        let mut s = SignalStats::with_statistics("MaxPositive,MaxNegative,Rms,MaxAbs").unwrap();
        s.extend([-3.0, -1.0, -2.0]);

        assert_eq!(s.value(StatisticKind::MaxPositive), Some(-1.0));
        assert_eq!(s.value(StatisticKind::MaxNegative), Some(-3.0));
        assert_eq!(s.value(StatisticKind::MaxAbs), Some(3.0));
        let rms = s.value(StatisticKind::Rms).unwrap();
        assert!(close(rms, (14.0_f64 / 3.0).sqrt()));
    }

    #[test]
    fn disabled_kinds_are_absent() {
        let mut s = SignalStats::with_statistics("MaxAbs").unwrap();
        s.insert_data(2.0);
        assert_eq!(s.value(StatisticKind::Mean), None);
        assert_eq!(s.map().len(), 1);
    }

    #[test]
    fn duplicate_enabling_is_idempotent() {
        let mut once = SignalStats::new();
        once.insert_statistic("Mean").unwrap();
        let mut twice = SignalStats::new();
        twice.insert_statistic("Mean").unwrap();
        twice.insert_statistics("Mean,mean").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn unknown_name_leaves_configuration_untouched() {
        let mut s = SignalStats::with_statistics("MaxAbs").unwrap();
        assert!(s.insert_statistics("bogus").is_err());
        assert!(s.insert_statistics("Mean,bogus").is_err());
        assert!(s.insert_statistic("").is_err());
        assert_eq!(s.statistics().collect::<Vec<_>>(), vec![StatisticKind::MaxAbs]);
    }

    #[test]
    fn reset_matches_fresh_instance() {
        let mut s = SignalStats::with_statistics("MaxAbs,Variance,Mean").unwrap();
        s.extend([10.0, -20.0, 30.0]);
        s.reset();

        let fresh = SignalStats::with_statistics("MaxAbs,Variance,Mean").unwrap();
        assert_eq!(s, fresh);
        assert_eq!(s.map(), fresh.map());
        assert_eq!(s.count(), 0);
    }

    #[test]
    fn map_does_not_mutate() {
        let mut s = SignalStats::with_statistics("Mean").unwrap();
        s.insert_data(1.0);
        let before = s.clone();
        let _ = s.map();
        let _ = s.value(StatisticKind::Mean);
        assert_eq!(s, before);
    }

    #[test]
    fn serializes_as_named_map() {
        let mut s = SignalStats::with_statistics("MaxAbs,Mean").unwrap();
        s.extend([1.0, -3.0]);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["MaxAbs"], 3.0);
        assert_eq!(json["Mean"], -1.0);
    }
}
