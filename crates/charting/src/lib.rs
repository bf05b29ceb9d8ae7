//! # Propdesk Charting
//!
//! Turns an `AccountRecord` into the point series behind the dashboard's balance chart.
//! Rendering is left to the consumer; this crate only produces the data.

pub mod error;
pub mod projection;
pub mod timeframe;

pub use error::ChartError;
pub use projection::{ChartDataPoint, ChartProjector, project_days};
pub use timeframe::Timeframe;
