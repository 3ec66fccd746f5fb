//! TFE HTTP client for API interactions

use log::Level;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

use crate::error::{Result, TfeError};
use crate::hcp::endpoint_config::EndpointConfig;

/// TFE API client
///
/// Thin wrapper over a `reqwest::Client` whose default headers carry the
/// bearer token and JSON:API content type. Cloning is cheap and shares the
/// connection pool.
#[derive(Clone)]
pub struct TfeClient {
    client: Client,
    config: EndpointConfig,
    base_url: String,
}

impl fmt::Debug for TfeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TfeClient")
            .field("base_url", &self.base_url)
            .field("organization", &self.config.org_name())
            .field("verify", &self.config.verify())
            .finish()
    }
}

impl TfeClient {
    /// Create a new TFE client with optimized connection settings
    pub fn new(config: EndpointConfig) -> Result<Self> {
        let client = Client::builder()
            .default_headers(config.headers().clone())
            .user_agent(format!("tfcaccess/{}", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(!config.verify())
            // Connection pool settings - reuse connections
            .pool_max_idle_per_host(20)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()?;

        let base_url = config.api_v2_base_url();

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    /// Settings this client was built from
    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    /// Organization every organization-scoped call targets
    pub fn organization(&self) -> &str {
        self.config.org_name()
    }

    /// Base URL for v2 API requests (no trailing slash)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Log through the `log` facade, capped at the configured level
    pub(crate) fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        if level <= self.config.log_level() {
            log::log!(level, "{}", args);
        }
    }

    /// Create a GET request builder
    pub(crate) fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client.get(url)
    }

    /// Create a POST request builder
    pub(crate) fn post(&self, url: &str) -> reqwest::RequestBuilder {
        self.client.post(url)
    }

    /// Create a PATCH request builder
    pub(crate) fn patch(&self, url: &str) -> reqwest::RequestBuilder {
        self.client.patch(url)
    }

    /// Create a DELETE request builder
    pub(crate) fn delete(&self, url: &str) -> reqwest::RequestBuilder {
        self.client.delete(url)
    }

    /// Send a request and parse a JSON body, failing on non-success status
    pub(crate) async fn send_json<T>(
        &self,
        request: reqwest::RequestBuilder,
        error_context: &str,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await?;
        let status = response.status();
        self.log(
            Level::Debug,
            format_args!("{} -> {}", error_context, status.as_u16()),
        );

        if !status.is_success() {
            return Err(api_error(response, error_context).await);
        }
        Ok(response.json().await?)
    }

    /// Send a request whose success response carries no meaningful body
    pub(crate) async fn send_empty(
        &self,
        request: reqwest::RequestBuilder,
        error_context: &str,
    ) -> Result<()> {
        let response = request.send().await?;
        let status = response.status();
        self.log(
            Level::Debug,
            format_args!("{} -> {}", error_context, status.as_u16()),
        );

        if !status.is_success() {
            return Err(api_error(response, error_context).await);
        }
        Ok(())
    }
}

/// Convert a non-success response into `TfeError::Api`
///
/// JSON:API error bodies (`{"errors": [{"status", "title", "detail"}]}`)
/// are folded into the message; anything else is appended verbatim.
async fn api_error(response: reqwest::Response, error_context: &str) -> TfeError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    TfeError::Api {
        status,
        message: api_error_message(error_context, &body),
    }
}

fn api_error_message(error_context: &str, body: &str) -> String {
    let details: Vec<String> = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["errors"].as_array().cloned())
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e["detail"].as_str().or_else(|| e["title"].as_str()))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if !details.is_empty() {
        format!("Failed to {}: {}", error_context, details.join("; "))
    } else if body.trim().is_empty() {
        format!("Failed to {}", error_context)
    } else {
        format!("Failed to {}: {}", error_context, body.trim())
    }
}

#[cfg(test)]
impl TfeClient {
    /// Create a test client pointed at a mock server
    pub fn test_client(base_url: &str) -> Self {
        let config = EndpointConfig::new(base_url, "my-org", "test-token")
            .expect("valid test config");
        Self::new(config).expect("valid test client")
    }
}
