//! # Statistic Kinds
//!
//! The closed set of reductions an accumulator can report, together with the
//! name table used by the string-based configuration surface
//! (`"MaxAbs,Variance,Mean"`). Names are resolved once, when a statistic is
//! enabled, so sample insertion never touches strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StatsError;

/// A summary statistic computed over a stream of scalar samples.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatisticKind {
    /// Maximum of `|x|` over all samples.
    MaxAbs,
    /// Arithmetic mean.
    Mean,
    /// Unbiased sample variance (`n - 1` denominator).
    Variance,
    /// Root mean square, `sqrt(sum(x^2) / n)`.
    Rms,
    /// Largest raw sample.
    MaxPositive,
    /// Smallest raw sample.
    MaxNegative,
}

/// Configuration names, matched ASCII case-insensitively.
const NAMES: [(&str, StatisticKind); 6] = [
    ("MaxAbs", StatisticKind::MaxAbs),
    ("Mean", StatisticKind::Mean),
    ("Variance", StatisticKind::Variance),
    ("Rms", StatisticKind::Rms),
    ("MaxPositive", StatisticKind::MaxPositive),
    ("MaxNegative", StatisticKind::MaxNegative),
];

impl StatisticKind {
    pub const ALL: [StatisticKind; 6] = [
        StatisticKind::MaxAbs,
        StatisticKind::Mean,
        StatisticKind::Variance,
        StatisticKind::Rms,
        StatisticKind::MaxPositive,
        StatisticKind::MaxNegative,
    ];

    /// Canonical configuration name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            StatisticKind::MaxAbs => "MaxAbs",
            StatisticKind::Mean => "Mean",
            StatisticKind::Variance => "Variance",
            StatisticKind::Rms => "Rms",
            StatisticKind::MaxPositive => "MaxPositive",
            StatisticKind::MaxNegative => "MaxNegative",
        }
    }

    /// Parse a comma-separated list such as `"MaxAbs, Variance,Mean"`.
    ///
    /// The whole list is validated before anything is returned, so callers can
    /// apply the result atomically.
    ///
    /// # Errors
    ///
    /// [`StatsError::EmptyStatisticList`] for a blank list and
    /// [`StatsError::UnknownStatistic`] for the first entry that is not a
    /// known name (including empty entries such as `"Mean,,MaxAbs"`).
    pub fn parse_list(names: &str) -> Result<Vec<StatisticKind>, StatsError> {
        if names.trim().is_empty() {
            return Err(StatsError::EmptyStatisticList);
        }
        names.split(',').map(str::parse::<StatisticKind>).collect()
    }
}

impl FromStr for StatisticKind {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        NAMES
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|&(_, kind)| kind)
            .ok_or_else(|| StatsError::UnknownStatistic(name.to_string()))
    }
}

impl fmt::Display for StatisticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_round_trips_through_its_name() {
        for kind in StatisticKind::ALL {
            assert_eq!(kind.name().parse::<StatisticKind>(), Ok(kind));
        }
    }

    #[test]
    fn names_ignore_case_and_padding() {
        assert_eq!(" rms ".parse::<StatisticKind>(), Ok(StatisticKind::Rms));
        assert_eq!("MAXABS".parse::<StatisticKind>(), Ok(StatisticKind::MaxAbs));
    }

    #[test]
    fn list_keeps_order() {
        let kinds = StatisticKind::parse_list("MaxAbs,Variance,Mean").unwrap();
        assert_eq!(
            kinds,
            vec![StatisticKind::MaxAbs, StatisticKind::Variance, StatisticKind::Mean]
        );
    }

    #[test]
    fn list_rejects_unknown_and_empty_entries() {
        assert_eq!(
            StatisticKind::parse_list("Mean,bogus"),
            Err(StatsError::UnknownStatistic("bogus".into()))
        );
        assert_eq!(
            StatisticKind::parse_list("Mean,,MaxAbs"),
            Err(StatsError::UnknownStatistic(String::new()))
        );
        assert_eq!(StatisticKind::parse_list("  "), Err(StatsError::EmptyStatisticList));
    }
}
