//! # Cirrus Core
//!
//! Core domain logic for cirrus instance-type discovery and filtering.
//!
//! This crate contains pure business logic with no I/O dependencies:
//! - Domain models and wire types
//! - The constraint-filter predicate pipeline
//! - Resource-demand aggregation
//!
//! Everything here is infallible given valid inputs; errors only arise at
//! the remote-fetch layer, which lives in the API crate.
//!
//! ## Design Principles
//!
//! - **Pure Functions**: No side effects, easy to test
//! - **Domain-Driven**: Models real-world cloud capacity concepts
//! - **Dependency-Free**: No I/O, networking, or persistence dependencies
//! - **Composable**: Designed for reuse in different contexts

pub mod filter;
pub mod models;
pub mod resources;

// Re-export commonly used types
pub use filter::{filter_instance_types, normalize_architecture};
pub use models::{
    AcceleratorInfo, ApiInstanceTypeRecord, ApiOfferingRecord, Constraints, GpuInfo, InstanceType,
    InstanceTypePage, OfferingPage,
};
pub use resources::{requests_for_pods, ContainerSpec, PodSpec, ResourceRequests};
