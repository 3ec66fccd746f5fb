//! Connection settings shared by every endpoint

use log::LevelFilter;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::config::api;
use crate::error::{Result, TfeError};
use crate::hcp::discovery::WellKnownPaths;

/// Endpoint configuration
///
/// Built once and handed to [`TfeClient::new`](crate::hcp::TfeClient::new),
/// which owns it for the rest of its life. There are no setters on the
/// client, so the settings cannot drift between requests.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    instance_url: String,
    org_name: String,
    headers: HeaderMap,
    well_known_paths: WellKnownPaths,
    verify: bool,
    log_level: LevelFilter,
}

impl EndpointConfig {
    /// Create a configuration for an instance, organization and API token
    ///
    /// `instance_url` may be a bare host (`app.terraform.io`), in which case
    /// `https://` is assumed.
    pub fn new(instance_url: &str, org_name: &str, token: &str) -> Result<Self> {
        if org_name.trim().is_empty() {
            return Err(TfeError::Config(
                "Organization name must not be empty".to_string(),
            ));
        }

        Ok(Self {
            instance_url: normalize_instance_url(instance_url),
            org_name: org_name.to_string(),
            headers: auth_headers(token)?,
            well_known_paths: WellKnownPaths::default(),
            verify: true,
            log_level: LevelFilter::Trace,
        })
    }

    /// Use service paths discovered from the instance
    pub fn with_well_known_paths(mut self, paths: WellKnownPaths) -> Self {
        self.well_known_paths = paths;
        self
    }

    /// Enable or disable TLS certificate verification
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Cap the level of request logging emitted by clients built from this config
    pub fn with_log_level(mut self, level: LevelFilter) -> Self {
        self.log_level = level;
        self
    }

    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }

    pub fn org_name(&self) -> &str {
        &self.org_name
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn well_known_paths(&self) -> &WellKnownPaths {
        &self.well_known_paths
    }

    pub fn verify(&self) -> bool {
        self.verify
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    /// Base URL of the v2 API for this instance
    pub fn api_v2_base_url(&self) -> String {
        self.well_known_paths.api_v2_base_url(&self.instance_url)
    }
}

/// Prefix a bare host with `https://` and drop trailing slashes
pub fn normalize_instance_url(instance_url: &str) -> String {
    let trimmed = instance_url.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Standard headers sent with every API request
fn auth_headers(token: &str) -> Result<HeaderMap> {
    let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| TfeError::Config("API token contains invalid characters".to_string()))?;
    bearer.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(api::CONTENT_TYPE));
    Ok(headers)
}
