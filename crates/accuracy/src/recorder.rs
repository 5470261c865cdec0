//! Named result records produced at the end of a run.

use std::collections::BTreeMap;

use serde::Serialize;
use stats::{SignalStats, StatisticKind};

/// Sink for run results, keyed by name.
pub trait Recorder {
    /// Descriptive run parameter, e.g. the engine name.
    fn record_property(&mut self, key: &str, value: &str);

    fn record_value(&mut self, key: &str, value: f64);

    /// Snapshot of the enabled statistics of `stats`.
    fn record_stats(&mut self, key: &str, stats: &SignalStats);
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Property(String),
    Value(f64),
    Statistics(BTreeMap<StatisticKind, f64>),
}

impl Record {
    #[must_use]
    pub fn as_value(&self) -> Option<f64> {
        match self {
            Record::Value(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn statistic(&self, kind: StatisticKind) -> Option<f64> {
        match self {
            Record::Statistics(map) => map.get(&kind).copied(),
            _ => None,
        }
    }
}

/// In-memory recorder; serializes as a JSON object keyed by record name.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RunRecord {
    entries: BTreeMap<String, Record>,
}

impl RunRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Record> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn insert(&mut self, key: &str, record: Record) {
        tracing::debug!(key, ?record, "recorded");
        self.entries.insert(key.to_string(), record);
    }
}

impl Recorder for RunRecord {
    fn record_property(&mut self, key: &str, value: &str) {
        self.insert(key, Record::Property(value.to_string()));
    }

    fn record_value(&mut self, key: &str, value: f64) {
        self.insert(key, Record::Value(value));
    }

    fn record_stats(&mut self, key: &str, stats: &SignalStats) {
        self.insert(key, Record::Statistics(stats.map()));
    }
}
