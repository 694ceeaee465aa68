use cirrus_api::ApiError;
use thiserror::Error;

/// Errors surfaced by the catalog provider.
///
/// The only failure mode is a remote fetch failing; each variant names the
/// call that failed. Filtering, joining, and cache lookup are infallible.
/// Callers should treat any of these as "catalog unavailable this attempt"
/// and apply their own retry policy.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("fetching instance types: {0}")]
    DescribeInstanceTypes(#[source] ApiError),

    #[error("describing instance type zone offerings: {0}")]
    DescribeOfferings(#[source] ApiError),
}

pub type Result<T> = std::result::Result<T, ProviderError>;
