//! HTTP surface for the TenderX engine

pub mod config;
pub mod rest;

pub use config::{ApiConfig, ApiState};
pub use rest::{ApiError, RestApi};
