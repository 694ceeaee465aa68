use crate::errors::{ApiError, HttpError, Result};
use crate::metadata::ComputeMetadata;
use cirrus_core::{InstanceTypePage, OfferingPage};
use log::{debug, error, info, trace};
use reqwest::{Client, Response, StatusCode};

/// Trait for providing configuration to the API client
/// This allows the host application to implement config without circular dependencies
pub trait ApiConfig {
    type Error;

    /// Get the API key for authentication
    fn get_api_key(&self) -> std::result::Result<String, Self::Error>;

    /// Get the base URL for the API (optional, defaults to official API)
    fn get_base_url(&self) -> std::result::Result<Option<String>, Self::Error> {
        Ok(None)
    }
}

/// HTTP client for the Cirrus Compute instance-metadata API
#[derive(Debug, Clone)]
pub struct CirrusApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

fn key_prefix(api_key: &str) -> &str {
    &api_key[..4.min(api_key.len())]
}

impl CirrusApiClient {
    /// Create a new API client
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        let client = Client::new();
        let base_url =
            base_url.unwrap_or_else(|| "https://api.cirruscompute.io/v1".to_string());

        debug!("Creating CirrusApiClient");
        debug!("  API Key: {}...", key_prefix(&api_key));
        debug!("  Base URL: {}", base_url);

        Self {
            client,
            api_key,
            base_url,
        }
    }

    /// Create API client from environment variables
    pub fn from_env() -> Result<Self> {
        debug!("Creating CirrusApiClient from environment variables");
        let api_key = std::env::var("CIRRUS_API_KEY").map_err(|_| {
            error!("CIRRUS_API_KEY environment variable not set");
            ApiError::Http(HttpError::Config(
                "CIRRUS_API_KEY environment variable not set".to_string(),
            ))
        })?;

        debug!("Found API key in environment");
        let base_url = std::env::var("CIRRUS_API_URL").ok();
        match base_url {
            Some(url) => Self::with_base_url(api_key, url),
            None => Ok(Self::new(api_key, None)),
        }
    }

    /// Create API client from provided API key (convenience method)
    pub fn from_api_key(api_key: String) -> Self {
        debug!("Creating CirrusApiClient with provided API key");
        Self::new(api_key, None)
    }

    /// Create API client with custom base URL
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self> {
        debug!("Creating CirrusApiClient with custom base URL: {}", base_url);
        url::Url::parse(&base_url).map_err(|e| {
            error!("Invalid base URL {}: {}", base_url, e);
            ApiError::Config(format!("invalid base URL {}: {}", base_url, e))
        })?;
        Ok(Self::new(api_key, Some(base_url)))
    }

    /// Create API client from any configuration implementing ApiConfig trait
    pub fn from_config<C>(config: &C) -> std::result::Result<Self, C::Error>
    where
        C: ApiConfig,
    {
        debug!("Creating CirrusApiClient from config");
        let api_key = config.get_api_key()?;

        debug!("Got API key from config: {}...", key_prefix(&api_key));

        let base_url = config.get_base_url()?;

        if let Some(ref url) = base_url {
            debug!("Got custom base URL from config: {}", url);
        } else {
            debug!("Using default base URL");
        }

        Ok(Self::new(api_key, base_url))
    }

    /// Make a GET request with query parameters
    async fn get(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Response> {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );

        debug!("HTTP GET request to: {}", url);
        trace!("Request headers:");
        trace!("  X-API-Key: {}...", key_prefix(&self.api_key));
        trace!("  Content-Type: application/json");
        trace!("Query parameters: {:?}", query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .header("X-API-Key", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| {
                error!("GET request failed: {:?}", e);
                HttpError::Request(e)
            })?;

        debug!("Response status: {}", response.status());

        self.handle_response(response).await
    }

    /// Handle HTTP response and convert errors
    async fn handle_response(&self, response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            debug!("Request successful with status: {}", status);
            Ok(response)
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            error!("Request failed with status: {}", status);
            debug!("Error response body: {}", error_text);

            let api_error = match status {
                StatusCode::UNAUTHORIZED => {
                    error!("Authentication failed (401 Unauthorized)");
                    HttpError::AuthenticationFailed
                }
                StatusCode::FORBIDDEN => {
                    error!("Invalid API key (403 Forbidden)");
                    HttpError::InvalidApiKey
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    error!("Rate limited (429 Too Many Requests)");
                    HttpError::RateLimited
                }
                StatusCode::SERVICE_UNAVAILABLE => {
                    error!("Service unavailable (503)");
                    HttpError::ServiceUnavailable
                }
                StatusCode::REQUEST_TIMEOUT => {
                    error!("Request timeout (408)");
                    HttpError::Timeout
                }
                _ => {
                    error!("HTTP error with status code: {}", status.as_u16());
                    HttpError::HttpError {
                        status: status.as_u16(),
                        message: error_text,
                    }
                }
            };

            Err(ApiError::Http(api_error))
        }
    }
}

#[async_trait::async_trait]
impl ComputeMetadata for CirrusApiClient {
    /// Fetch one page of instance-type capability records.
    async fn describe_instance_types(
        &self,
        next_token: Option<&str>,
    ) -> Result<InstanceTypePage> {
        debug!("Fetching instance types page (token: {:?})", next_token);

        let mut query = vec![("virtualization-type", "hvm")];
        if let Some(token) = next_token {
            query.push(("next_token", token));
        }

        let response = self.get("instance-types", &query).await?;
        let page: InstanceTypePage = response.json().await.map_err(HttpError::Request)?;

        info!(
            "Successfully fetched {} instance types (more: {})",
            page.instance_types.len(),
            page.next_token.is_some()
        );

        Ok(page)
    }

    /// Fetch one page of zonal offering pairs.
    async fn describe_instance_type_offerings(
        &self,
        next_token: Option<&str>,
    ) -> Result<OfferingPage> {
        debug!("Fetching offerings page (token: {:?})", next_token);

        let mut query = vec![("location-type", "availability-zone")];
        if let Some(token) = next_token {
            query.push(("next_token", token));
        }

        let response = self.get("instance-type-offerings", &query).await?;
        let page: OfferingPage = response.json().await.map_err(HttpError::Request)?;

        info!(
            "Successfully fetched {} offerings (more: {})",
            page.offerings.len(),
            page.next_token.is_some()
        );

        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubConfig {
        base_url: Option<String>,
    }

    impl ApiConfig for StubConfig {
        type Error = std::convert::Infallible;

        fn get_api_key(&self) -> std::result::Result<String, Self::Error> {
            Ok("test-key-1234".to_string())
        }

        fn get_base_url(&self) -> std::result::Result<Option<String>, Self::Error> {
            Ok(self.base_url.clone())
        }
    }

    #[test]
    fn test_from_config_uses_custom_base_url() {
        let client = CirrusApiClient::from_config(&StubConfig {
            base_url: Some("https://metadata.internal/v2".to_string()),
        })
        .unwrap();
        assert_eq!(client.base_url, "https://metadata.internal/v2");
    }

    #[test]
    fn test_from_config_defaults_base_url() {
        let client = CirrusApiClient::from_config(&StubConfig { base_url: None }).unwrap();
        assert_eq!(client.base_url, "https://api.cirruscompute.io/v1");
    }

    #[test]
    fn test_with_base_url_rejects_invalid_url() {
        let result =
            CirrusApiClient::with_base_url("key".to_string(), "not a url".to_string());
        assert!(matches!(result, Err(ApiError::Config(_))));
    }

    #[test]
    fn test_key_prefix_handles_short_keys() {
        assert_eq!(key_prefix("ab"), "ab");
        assert_eq!(key_prefix("abcdef"), "abcd");
    }
}
