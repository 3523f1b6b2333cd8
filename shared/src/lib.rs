//! Shared types and models for the AgriFund Weather Advisory Service
//!
//! This crate contains the domain models, the static advisory reference data
//! (intervention types and alert rules) and the pure rule-evaluation engine
//! shared between the backend and other components of the platform.

pub mod advisory;
pub mod models;
pub mod types;
pub mod validation;

pub use advisory::*;
pub use models::*;
pub use types::*;
pub use validation::*;
