use thiserror::Error;

/// Configuration errors raised while enabling statistics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("unknown statistic name `{0}`")]
    UnknownStatistic(String),
    #[error("no statistic names given")]
    EmptyStatisticList,
}
