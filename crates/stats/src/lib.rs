#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_precision_loss, clippy::module_name_repetitions)]
//! # Accuracy Statistics
//!
//! Streaming error statistics for simulation accuracy tests.
//!
//! A test driver samples a simulated quantity once per step, subtracts the
//! analytically expected value, and feeds the error into an accumulator. At
//! the end of the run the accumulator reports the configured summary
//! statistics. Nothing is stored per sample, so runs of many thousands of
//! steps cost O(1) memory per tracked quantity.
//!
//! ## Key Components
//!
//! -   [`StatisticKind`]: the closed set of reductions (`MaxAbs`, `Mean`,
//!     `Variance`, `Rms`, `MaxPositive`, `MaxNegative`) and their names.
//! -   [`SignalStats`]: accumulator for a scalar signal.
//! -   [`Vector3Stats`]: per-axis plus magnitude accumulators for a
//!     3-vector signal.
//!
//! ## Conventions
//!
//! Every statistic reports `0.0` before the first sample, and `Variance`
//! reports `0.0` until a second sample arrives. Unknown statistic names are
//! returned as [`StatsError`] values and never abort.
//!
//! ```rust
//! use glam::DVec3;
//! use stats::{StatisticKind, Vector3Stats};
//!
//! let mut drift = Vector3Stats::with_statistics("MaxAbs,Variance,Mean")?;
//! drift.insert_data(DVec3::new(1.0, 0.0, 0.0));
//! drift.insert_data(DVec3::new(0.0, 2.0, 0.0));
//! drift.insert_data(DVec3::new(0.0, 0.0, -2.0));
//! assert_eq!(drift.mag().value(StatisticKind::MaxAbs), Some(2.0));
//! # Ok::<(), stats::StatsError>(())
//! ```

pub mod error;
pub mod kind;
pub mod signal;
pub mod vector3;

pub use error::StatsError;
pub use kind::StatisticKind;
pub use signal::SignalStats;
pub use vector3::{Axis, Vector3Stats, Vector3Summary};
