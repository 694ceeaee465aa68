use std::time::Duration;

/// Default time-to-live for a catalog snapshot.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Tunables for the catalog provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// How long a built catalog snapshot stays fresh. An expired snapshot is
    /// treated as a cache miss and rebuilt on next access.
    pub cache_ttl: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

impl ProviderConfig {
    /// Read configuration from the environment, falling back to defaults.
    /// `CIRRUS_CATALOG_TTL_SECS` overrides the cache TTL.
    pub fn from_env() -> Self {
        let cache_ttl = std::env::var("CIRRUS_CATALOG_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_CACHE_TTL);
        Self { cache_ttl }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttl() {
        let config = ProviderConfig::default();
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
    }

    // Single test for all env states: tests in one binary run in parallel
    // and must not race on the variable.
    #[test]
    fn test_from_env_override_and_fallback() {
        std::env::set_var("CIRRUS_CATALOG_TTL_SECS", "90");
        assert_eq!(
            ProviderConfig::from_env().cache_ttl,
            Duration::from_secs(90)
        );

        // Unparseable values fall back to the default.
        std::env::set_var("CIRRUS_CATALOG_TTL_SECS", "soon");
        assert_eq!(ProviderConfig::from_env().cache_ttl, DEFAULT_CACHE_TTL);

        std::env::remove_var("CIRRUS_CATALOG_TTL_SECS");
        assert_eq!(ProviderConfig::from_env().cache_ttl, DEFAULT_CACHE_TTL);
    }
}
