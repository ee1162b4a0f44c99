// Error types for the refresh cycle
use crate::domain::chart::{ChartName, PayloadShape};
use thiserror::Error;

/// Failure to obtain a `DashboardData` from the data source
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to data source failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("data source responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("data source returned an unreadable payload: {0}")]
    Decode(String),

    #[error("data source unavailable: {0}")]
    Unavailable(String),
}

/// Failure to draw a single chart. One bad chart never blocks the others.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("no payload for chart {0}")]
    MissingPayload(ChartName),

    #[error("chart {chart} expects a {expected} payload, got {actual}")]
    ShapeMismatch {
        chart: ChartName,
        expected: PayloadShape,
        actual: PayloadShape,
    },

    #[error("container #{0} is not on the page")]
    MissingContainer(String),
}

/// Rejected `/predict` request body
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("Missing employee_id in request body")]
    MissingEmployeeId,

    #[error("Invalid employee_id format")]
    InvalidEmployeeId,
}
