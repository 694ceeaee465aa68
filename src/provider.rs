use crate::cache::TtlCell;
use crate::catalog;
use crate::config::ProviderConfig;
use crate::errors::Result;
use cirrus_api::ComputeMetadata;
use cirrus_core::{filter_instance_types, Constraints, InstanceType};
use log::debug;
use std::sync::Arc;

/// Process-wide instance-type catalog with constraint filtering.
///
/// One provider owns one catalog cache. `get` is safe to call from any
/// number of concurrent scheduling attempts: a cold cache triggers exactly
/// one remote build (concurrent misses collapse), and a primed cache serves
/// the same immutable snapshot to every reader until the TTL expires.
pub struct InstanceTypeProvider<A> {
    api: A,
    cache: TtlCell<Arc<Vec<InstanceType>>>,
}

impl<A: ComputeMetadata> InstanceTypeProvider<A> {
    pub fn new(api: A) -> Self {
        Self::with_config(api, ProviderConfig::default())
    }

    pub fn with_config(api: A, config: ProviderConfig) -> Self {
        Self {
            api,
            cache: TtlCell::new(config.cache_ttl),
        }
    }

    /// Instance types available per availability zone, narrowed to the
    /// subset satisfying `constraints`.
    ///
    /// `reachable_zones` is the set of zones the caller's network options
    /// can reach; empty means unrestricted. Constraints affect filtering
    /// only, never cache population: every caller shares the one catalog
    /// snapshot. Builder failures propagate; the filter itself cannot fail.
    pub async fn get(
        &self,
        reachable_zones: &[String],
        constraints: &Constraints,
    ) -> Result<Vec<InstanceType>> {
        let snapshot = self
            .cache
            .get_or_try_build(|| async {
                let types = catalog::build_catalog(&self.api).await?;
                debug!("Successfully discovered {} instance types", types.len());
                Ok(Arc::new(types))
            })
            .await?;

        Ok(filter_instance_types(&snapshot, constraints, reachable_zones))
    }

    /// All instance type names, without caller-supplied constraints.
    /// Forces catalog population; the default-type heuristic still applies,
    /// exactly as a `get` with empty constraints.
    pub async fn list_all_type_names(&self) -> Result<Vec<String>> {
        let types = self.get(&[], &Constraints::default()).await?;
        Ok(types.into_iter().map(|it| it.name).collect())
    }
}
