//! Terraform service discovery (`/.well-known/terraform.json`)

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::api;
use crate::error::{Result, TfeError};

/// Service-discovery map advertised by a TFE/HCP instance
///
/// Keys are service identifiers (`tfe.v2`, `modules.v1`, `state.v2`, ...),
/// values are paths relative to the instance URL or absolute URLs.
/// Object-valued services such as `login.v1` are skipped.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(
    from = "BTreeMap<String, serde_json::Value>",
    into = "BTreeMap<String, String>"
)]
pub struct WellKnownPaths {
    paths: BTreeMap<String, String>,
}

impl From<BTreeMap<String, serde_json::Value>> for WellKnownPaths {
    fn from(document: BTreeMap<String, serde_json::Value>) -> Self {
        let paths = document
            .into_iter()
            .filter_map(|(service, value)| match value {
                serde_json::Value::String(path) => Some((service, path)),
                _ => None,
            })
            .collect();
        Self { paths }
    }
}

impl From<WellKnownPaths> for BTreeMap<String, String> {
    fn from(paths: WellKnownPaths) -> Self {
        paths.paths
    }
}

impl WellKnownPaths {
    /// Build from an explicit map
    pub fn from_map(paths: BTreeMap<String, String>) -> Self {
        Self { paths }
    }

    /// Look up a service path by identifier
    pub fn get(&self, service: &str) -> Option<&str> {
        self.paths.get(service).map(String::as_str)
    }

    /// Path of the v2 API, falling back to `/api/v2` when not advertised
    pub fn api_v2_path(&self) -> &str {
        self.get(api::WELL_KNOWN_TFE_V2).unwrap_or(api::BASE_PATH)
    }

    /// Resolve the v2 API base URL against an instance URL
    ///
    /// Returned URL never carries a trailing slash.
    pub fn api_v2_base_url(&self, instance_url: &str) -> String {
        let path = self.api_v2_path();
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.trim_end_matches('/').to_string();
        }
        let trimmed = path.trim_matches('/');
        let instance = instance_url.trim_end_matches('/');
        if trimmed.is_empty() {
            instance.to_string()
        } else {
            format!("{}/{}", instance, trimmed)
        }
    }

    /// Fetch the discovery document from an instance
    ///
    /// The document is public, so no credentials are sent.
    pub async fn discover(instance_url: &str, verify: bool) -> Result<Self> {
        let url = format!(
            "{}{}",
            instance_url.trim_end_matches('/'),
            api::WELL_KNOWN_PATH
        );
        debug!("Discovering service paths from: {}", url);

        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(!verify)
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()?;

        let response = client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(TfeError::Api {
                status: response.status().as_u16(),
                message: format!("Failed to fetch service discovery from '{}'", url),
            });
        }

        let body = response.text().await?;
        let paths: WellKnownPaths = serde_json::from_str(&body)?;
        debug!("Discovered {} service path(s)", paths.paths.len());
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn paths(entries: &[(&str, &str)]) -> WellKnownPaths {
        WellKnownPaths::from_map(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_default_api_v2_path() {
        let wk = WellKnownPaths::default();
        assert_eq!(wk.api_v2_path(), "/api/v2");
        assert_eq!(
            wk.api_v2_base_url("https://app.terraform.io"),
            "https://app.terraform.io/api/v2"
        );
    }

    #[test]
    fn test_api_v2_base_url_strips_slashes() {
        let wk = paths(&[("tfe.v2", "/api/v2/")]);
        assert_eq!(
            wk.api_v2_base_url("https://tfe.example.com/"),
            "https://tfe.example.com/api/v2"
        );
    }

    #[test]
    fn test_api_v2_base_url_absolute() {
        let wk = paths(&[("tfe.v2", "https://api.example.com/v2/")]);
        assert_eq!(
            wk.api_v2_base_url("https://tfe.example.com"),
            "https://api.example.com/v2"
        );
    }

    #[test]
    fn test_api_v2_base_url_root_path() {
        let wk = paths(&[("tfe.v2", "/")]);
        assert_eq!(
            wk.api_v2_base_url("http://127.0.0.1:8080"),
            "http://127.0.0.1:8080"
        );
    }

    #[test]
    fn test_deserialize_discovery_document() {
        let wk: WellKnownPaths = serde_json::from_value(serde_json::json!({
            "login.v1": {
                "client": "terraform-cli",
                "grant_types": ["authz_code", "token"],
                "authz": "/app/oauth2/authorize",
                "token": "/oauth2/token",
                "ports": [10000, 10010]
            },
            "modules.v1": "/api/registry/v1/modules/",
            "motd.v1": "/api/terraform/motd",
            "state.v2": "/api/v2/",
            "tfe.v2": "/api/v2/",
            "tfe.v2.1": "/api/v2/",
            "tfe.v2.2": "/api/v2/"
        }))
        .unwrap();
        assert_eq!(wk.get("modules.v1"), Some("/api/registry/v1/modules/"));
        assert_eq!(wk.api_v2_path(), "/api/v2/");
        assert!(wk.get("versions.v1").is_none());
        assert!(wk.get("login.v1").is_none());
    }

    #[test]
    fn test_serialize_keeps_string_paths() {
        let wk = paths(&[("tfe.v2", "/api/v2/")]);
        assert_eq!(
            serde_json::to_value(&wk).unwrap(),
            serde_json::json!({ "tfe.v2": "/api/v2/" })
        );
    }

    #[tokio::test]
    async fn test_discover() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/.well-known/terraform.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "login.v1": {
                    "client": "terraform-cli",
                    "grant_types": ["authz_code", "token"],
                    "authz": "/app/oauth2/authorize",
                    "token": "/oauth2/token",
                    "ports": [10000, 10010]
                },
                "modules.v1": "/api/registry/v1/modules/",
                "tfe.v2": "/api/v2/"
            })))
            .mount(&mock_server)
            .await;

        let wk = WellKnownPaths::discover(&mock_server.uri(), true)
            .await
            .unwrap();
        assert_eq!(wk.api_v2_path(), "/api/v2/");
        assert!(wk.get("login.v1").is_none());
        assert_eq!(
            wk.api_v2_base_url(&mock_server.uri()),
            format!("{}/api/v2", mock_server.uri())
        );
    }

    #[tokio::test]
    async fn test_discover_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/.well-known/terraform.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let result = WellKnownPaths::discover(&mock_server.uri(), true).await;
        match result.unwrap_err() {
            TfeError::Api { status, .. } => assert_eq!(status, 404),
            other => panic!("Expected TfeError::Api, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_discover_malformed_document() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/.well-known/terraform.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&mock_server)
            .await;

        let result = WellKnownPaths::discover(&mock_server.uri(), true).await;
        assert!(matches!(result, Err(TfeError::Json(_))));
    }
}
