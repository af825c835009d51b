//! Demo data generation.

pub mod chart;

pub use chart::{sample_chart, ChartData, DEFAULT_SAMPLE_POINTS};
