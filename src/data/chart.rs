//! Chart series for the live chart widget.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::util::ValidationError;

/// Number of points generated when the caller does not ask for a count.
pub const DEFAULT_SAMPLE_POINTS: usize = 10;

/// A labelled series of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub chart_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ChartData {
    /// Build a series. `values` must not be empty.
    pub fn new(
        labels: Vec<String>,
        values: Vec<f64>,
        chart_type: impl Into<String>,
        title: Option<String>,
    ) -> Result<Self, ValidationError> {
        if values.is_empty() {
            return Err(ValidationError::Empty { field: "values" });
        }
        Ok(Self {
            labels,
            values,
            chart_type: chart_type.into(),
            title,
        })
    }
}

/// Random line chart with `count` points, values in `[10, 100)`.
pub fn sample_chart(count: usize) -> Result<ChartData, ValidationError> {
    let mut rng = rand::thread_rng();
    let labels = (1..=count).map(|i| format!("Point {}", i)).collect();
    let values = (0..count).map(|_| rng.gen_range(10.0..100.0)).collect();

    ChartData::new(labels, values, "line", Some("Sample Data Chart".to_string()))
}
