//! # Cirrus
//!
//! Instance-type catalog and constraint filtering for cloud schedulers.
//!
//! The crate discovers the provider's instance-type universe by joining two
//! independent metadata axes (capability records and per-availability-zone
//! offerings), caches the resulting catalog process-wide with a TTL, and
//! narrows it to the subset a workload's placement constraints allow.
//! Instance selection and bin-packing happen downstream.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod provider;

// Re-export main public types
pub use cache::TtlCell;
pub use config::ProviderConfig;
pub use errors::{ProviderError, Result};
pub use provider::InstanceTypeProvider;

// Re-export the domain and client surface callers need
pub use cirrus_api::{ApiError, CirrusApiClient, ComputeMetadata};
pub use cirrus_core::{Constraints, InstanceType};
