//! # Vector Signal Statistics
//!
//! Per-axis and magnitude statistics for a stream of 3-vectors, so a report
//! can tell uniform per-axis drift apart from the overall drift magnitude.

use std::collections::BTreeMap;

use glam::DVec3;
use serde::{Serialize, Serializer};

use crate::error::StatsError;
use crate::kind::StatisticKind;
use crate::signal::SignalStats;

/// Cartesian component selector.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Four [`SignalStats`] fed from one vector stream: one per axis and one with
/// the Euclidean norm of each sample.
///
/// All four always share the same enabled statistics and sample count; the
/// accumulators are only reachable through shared references.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vector3Stats {
    x: SignalStats,
    y: SignalStats,
    z: SignalStats,
    mag: SignalStats,
}

impl Vector3Stats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// See [`Vector3Stats::insert_statistics`].
    pub fn with_statistics(names: &str) -> Result<Self, StatsError> {
        let mut stats = Self::new();
        stats.insert_statistics(names)?;
        Ok(stats)
    }

    /// # Errors
    ///
    /// [`StatsError::UnknownStatistic`]; no accumulator is modified.
    pub fn insert_statistic(&mut self, name: &str) -> Result<(), StatsError> {
        let kind = name.parse::<StatisticKind>().map_err(|err| {
            tracing::warn!(%err, "rejected vector statistic name");
            err
        })?;
        self.enable(kind);
        Ok(())
    }

    /// Enable a comma-separated list on all four accumulators.
    ///
    /// # Errors
    ///
    /// [`StatsError::EmptyStatisticList`] or [`StatsError::UnknownStatistic`];
    /// no accumulator is modified.
    pub fn insert_statistics(&mut self, names: &str) -> Result<(), StatsError> {
        let kinds = StatisticKind::parse_list(names).map_err(|err| {
            tracing::warn!(%err, names, "rejected vector statistic list");
            err
        })?;
        for kind in kinds {
            self.enable(kind);
        }
        Ok(())
    }

    pub fn enable(&mut self, kind: StatisticKind) {
        for stats in self.all_mut() {
            stats.enable(kind);
        }
    }

    /// Ingest one vector sample.
    pub fn insert_data(&mut self, v: DVec3) {
        self.x.insert_data(v.x);
        self.y.insert_data(v.y);
        self.z.insert_data(v.z);
        self.mag.insert_data(v.length());
    }

    #[must_use]
    pub fn x(&self) -> &SignalStats {
        &self.x
    }

    #[must_use]
    pub fn y(&self) -> &SignalStats {
        &self.y
    }

    #[must_use]
    pub fn z(&self) -> &SignalStats {
        &self.z
    }

    /// Statistics of the sample magnitudes.
    #[must_use]
    pub fn mag(&self) -> &SignalStats {
        &self.mag
    }

    #[must_use]
    pub fn axis(&self, axis: Axis) -> &SignalStats {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.mag.count()
    }

    pub fn reset(&mut self) {
        for stats in self.all_mut() {
            stats.reset();
        }
    }

    #[must_use]
    pub fn summary(&self) -> Vector3Summary {
        Vector3Summary {
            x: self.x.map(),
            y: self.y.map(),
            z: self.z.map(),
            mag: self.mag.map(),
        }
    }

    fn all_mut(&mut self) -> [&mut SignalStats; 4] {
        [&mut self.x, &mut self.y, &mut self.z, &mut self.mag]
    }
}

impl Extend<DVec3> for Vector3Stats {
    fn extend<I: IntoIterator<Item = DVec3>>(&mut self, iter: I) {
        for v in iter {
            self.insert_data(v);
        }
    }
}

/// Snapshot of a [`Vector3Stats`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Vector3Summary {
    pub x: BTreeMap<StatisticKind, f64>,
    pub y: BTreeMap<StatisticKind, f64>,
    pub z: BTreeMap<StatisticKind, f64>,
    pub mag: BTreeMap<StatisticKind, f64>,
}

impl Serialize for Vector3Stats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.summary().serialize(serializer)
    }
}
