//! Generic endpoint base: URL construction, verb dispatch and entitlement gating
//!
//! Every helper runs the entitlement gate before it builds a request, so an
//! organization without the required entitlements never reaches the network.

use log::{warn, Level};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::api;
use crate::error::{Result, TfeError};
use crate::hcp::entitlements::{Entitlement, EntitlementSet};
use crate::hcp::filters::ListOptions;
use crate::hcp::TfeClient;

/// A REST resource reachable under the v2 API
pub trait ApiEndpoint {
    /// Collection path under the API base, e.g. `team-workspaces`
    const PATH: &'static str;

    /// Entitlements the organization must hold to use this resource
    fn required_entitlements() -> &'static [Entitlement];
}

/// Endpoint base shared by resource bindings
#[derive(Debug, Clone)]
pub struct Endpoint {
    client: TfeClient,
    base_url: String,
    required: &'static [Entitlement],
    entitlements: EntitlementSet,
}

impl Endpoint {
    /// Bind the base to resource `E` using an already-fetched entitlement set
    pub fn new<E: ApiEndpoint>(client: TfeClient, entitlements: EntitlementSet) -> Self {
        let base_url = format!("{}/{}", client.base_url(), E::PATH);

        Self {
            client,
            base_url,
            required: E::required_entitlements(),
            entitlements,
        }
    }

    pub fn client(&self) -> &TfeClient {
        &self.client
    }

    /// Collection URL of the bound resource
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a single resource: `base/{id}`
    pub fn resource_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }

    pub fn required_entitlements(&self) -> &'static [Entitlement] {
        self.required
    }

    pub fn entitlements(&self) -> &EntitlementSet {
        &self.entitlements
    }

    /// Fail fast if the organization lacks a required entitlement
    ///
    /// The entitlement set must belong to the organization the client targets.
    pub fn check_entitlements(&self) -> Result<()> {
        if self.entitlements.organization() != self.client.organization() {
            warn!(
                "Entitlement set for '{}' used with client for '{}'",
                self.entitlements.organization(),
                self.client.organization()
            );
            return Err(TfeError::Config(format!(
                "Entitlement set belongs to organization '{}', but requests target '{}'",
                self.entitlements.organization(),
                self.client.organization()
            )));
        }
        self.entitlements.ensure(self.required)
    }

    /// `POST url` with a JSON body
    pub async fn post<B, T>(&self, url: &str, payload: &B, error_context: &str) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.check_entitlements()?;
        self.client.log(Level::Debug, format_args!("POST {}", url));

        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, api::CONTENT_TYPE)
            .json(payload);
        self.client.send_json(request, error_context).await
    }

    /// `GET url?query` for one page of a collection
    pub async fn list<T>(&self, url: &str, options: &ListOptions, error_context: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.check_entitlements()?;
        let url = options.apply_to(url)?;
        self.client.log(Level::Debug, format_args!("GET {}", url));

        self.client.send_json(self.client.get(&url), error_context).await
    }

    /// `GET url` for a single resource
    pub async fn show<T>(&self, url: &str, error_context: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.check_entitlements()?;
        self.client.log(Level::Debug, format_args!("GET {}", url));

        self.client.send_json(self.client.get(url), error_context).await
    }

    /// `PATCH url` with a JSON body
    pub async fn update<B, T>(&self, url: &str, payload: &B, error_context: &str) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.check_entitlements()?;
        self.client.log(Level::Debug, format_args!("PATCH {}", url));

        let request = self
            .client
            .patch(url)
            .header(CONTENT_TYPE, api::CONTENT_TYPE)
            .json(payload);
        self.client.send_json(request, error_context).await
    }

    /// `DELETE url`
    pub async fn delete(&self, url: &str, error_context: &str) -> Result<()> {
        self.check_entitlements()?;
        self.client.log(Level::Debug, format_args!("DELETE {}", url));

        self.client
            .send_empty(self.client.delete(url), error_context)
            .await
    }
}
