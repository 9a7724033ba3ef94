//! HTTP API module for the TPS decoder.
//!
//! This module exposes the decoding pipeline over a REST endpoint that
//! accepts export text and returns the decode report as JSON.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{DecodeOptions, DecodeRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
