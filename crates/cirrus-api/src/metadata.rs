use crate::errors::Result;
use cirrus_core::{InstanceTypePage, OfferingPage};

/// Paginated list operations of the provider's instance-metadata API.
///
/// Each call fetches one page; the caller loops on `next_token` until it is
/// exhausted. Any error is terminal for the whole listing: pages delivered
/// before the failure must be discarded. Retry/backoff, if any, belongs to
/// the implementation behind this trait, never to its callers.
#[async_trait::async_trait]
pub trait ComputeMetadata: Send + Sync {
    /// List instance-type capability records, restricted server-side to
    /// types supporting hardware-assisted virtualization.
    async fn describe_instance_types(&self, next_token: Option<&str>)
        -> Result<InstanceTypePage>;

    /// List (availability zone, instance type) offering pairs.
    async fn describe_instance_type_offerings(
        &self,
        next_token: Option<&str>,
    ) -> Result<OfferingPage>;
}
