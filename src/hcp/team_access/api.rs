//! Team access API operations
//!
//! The team access APIs associate a team with permissions on a workspace.
//! A single team-workspace resource holds the relationship between the team
//! and the workspace, including the privileges the team has on it.

use log::debug;
use serde::Serialize;

use crate::config::api;
use crate::error::Result;
use crate::hcp::endpoint::{ApiEndpoint, Endpoint};
use crate::hcp::entitlements::{Entitlement, EntitlementSet};
use crate::hcp::filters::{Filter, ListOptions};
use crate::hcp::traits::{ApiListResponse, ApiResponse};
use crate::hcp::TfeClient;

use super::models::TeamWorkspaceAccess;

/// Binding for `/team-workspaces`
#[derive(Debug, Clone)]
pub struct TeamAccess {
    endpoint: Endpoint,
}

impl ApiEndpoint for TeamAccess {
    const PATH: &'static str = api::TEAM_WORKSPACES;

    fn required_entitlements() -> &'static [Entitlement] {
        &[Entitlement::Teams]
    }
}

impl TeamAccess {
    /// Bind to a client using an already-fetched entitlement set
    pub fn new(client: TfeClient, entitlements: EntitlementSet) -> Self {
        Self {
            endpoint: Endpoint::new::<Self>(client, entitlements),
        }
    }

    /// Fetch the organization's entitlement set, then bind
    pub async fn connect(client: TfeClient) -> Result<Self> {
        let entitlements = client.get_entitlement_set().await?;
        Ok(Self::new(client, entitlements))
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// `POST /team-workspaces`
    pub async fn add_team_access<P>(&self, payload: &P) -> Result<TeamWorkspaceAccess>
    where
        P: Serialize + ?Sized,
    {
        let response: ApiResponse<TeamWorkspaceAccess> = self
            .endpoint
            .post(self.endpoint.base_url(), payload, "create team access")
            .await?;
        debug!("Created team access {}", response.data.id);
        Ok(response.data)
    }

    /// `GET /team-workspaces` (single page)
    ///
    /// The API requires `filter[workspace][id]`; that is left to the server.
    pub async fn list(&self, filters: &[Filter]) -> Result<ApiListResponse<TeamWorkspaceAccess>> {
        self.list_page(&ListOptions::new().with_filters(filters))
            .await
    }

    /// `GET /team-workspaces` with paging, include, search and sort options
    pub async fn list_page(
        &self,
        options: &ListOptions,
    ) -> Result<ApiListResponse<TeamWorkspaceAccess>> {
        let page: ApiListResponse<TeamWorkspaceAccess> = self
            .endpoint
            .list(self.endpoint.base_url(), options, "list team access")
            .await?;
        debug!("Listed {} team access binding(s)", page.data.len());
        Ok(page)
    }

    /// `GET /team-workspaces/:id`
    pub async fn show(&self, access_id: &str) -> Result<TeamWorkspaceAccess> {
        let url = self.endpoint.resource_url(access_id);
        let response: ApiResponse<TeamWorkspaceAccess> = self
            .endpoint
            .show(&url, &format!("show team access '{}'", access_id))
            .await?;
        Ok(response.data)
    }

    /// `PATCH /team-workspaces/:id`
    pub async fn update<P>(&self, access_id: &str, payload: &P) -> Result<TeamWorkspaceAccess>
    where
        P: Serialize + ?Sized,
    {
        let url = self.endpoint.resource_url(access_id);
        let response: ApiResponse<TeamWorkspaceAccess> = self
            .endpoint
            .update(
                &url,
                payload,
                &format!("update team access '{}'", access_id),
            )
            .await?;
        Ok(response.data)
    }

    /// `DELETE /team-workspaces/:id`
    pub async fn remove_team_access(&self, access_id: &str) -> Result<()> {
        let url = self.endpoint.resource_url(access_id);
        self.endpoint
            .delete(&url, &format!("remove team access '{}'", access_id))
            .await?;
        debug!("Removed team access {}", access_id);
        Ok(())
    }
}
