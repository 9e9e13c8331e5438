//! Wire schema for the Javelink analysis service. With the `server` feature
//! this crate also carries the axum backend that answers `/api/analyze`.

pub mod schemas;

#[cfg(feature = "server")]
pub mod config;
#[cfg(feature = "server")]
pub mod error;
#[cfg(feature = "server")]
pub mod pipeline;
#[cfg(feature = "server")]
pub mod routes;

pub use schemas::{AnalyzeResponse, Handedness, QcStatus, ScaleMethod, ViewType};
