//! TFE API client module
//!
//! This module provides the endpoint base and the team access binding for
//! the Terraform Cloud / Enterprise v2 API.

mod client;
mod credentials;
pub mod discovery;
pub mod endpoint;
pub mod endpoint_config;
pub mod entitlements;
pub mod filters;
mod host;
pub mod team_access;
pub mod traits;

use serde::{Deserialize, Serialize};

pub use client::TfeClient;
pub use credentials::TokenResolver;
pub use discovery::WellKnownPaths;
pub use endpoint::{ApiEndpoint, Endpoint};
pub use endpoint_config::EndpointConfig;
pub use entitlements::{Entitlement, EntitlementSet};
pub use filters::{Filter, ListOptions};
pub use host::HostResolver;
pub use team_access::{
    AccessLevel, TeamAccess, TeamAccessPermissions, TeamAccessRequest, TeamWorkspaceAccess,
};
pub use traits::{ApiListResponse, ApiResponse};

/// Pagination metadata from TFE API (shared across resources)
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct PaginationMeta {
    pub pagination: Option<Pagination>,
}

/// Pagination details
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Pagination {
    #[serde(rename = "current-page")]
    pub current_page: u32,
    #[serde(rename = "page-size", default)]
    pub page_size: Option<u32>,
    #[serde(rename = "prev-page", default)]
    pub prev_page: Option<u32>,
    #[serde(rename = "next-page", default)]
    pub next_page: Option<u32>,
    #[serde(rename = "total-pages")]
    pub total_pages: u32,
    #[serde(rename = "total-count")]
    pub total_count: u32,
}
