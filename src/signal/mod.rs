//! Forecast-versus-realized signal decisions.

pub mod decision;
pub mod generator;
pub mod stats;
pub mod table;

pub use decision::{decide, Decision, SignalThresholds};
pub use generator::{SignalGenerator, SignalPoint};
pub use stats::SignalStats;
pub use table::{SignalRow, SignalTable};
