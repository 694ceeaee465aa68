//! # Cirrus API
//!
//! HTTP client for the cloud provider's instance-metadata API.
//! This crate provides the paginated list operations the catalog builder
//! consumes, behind a trait so the builder can be tested without a network.

pub mod client;
pub mod errors;
pub mod metadata;

// Re-export common types for convenience
pub use client::*;
pub use errors::*;
pub use metadata::*;

// Re-export core types that API consumers will need
pub use cirrus_core::{InstanceTypePage, OfferingPage};
