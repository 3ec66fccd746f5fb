//! Entitlement set API operations

use log::debug;

use crate::config::api;
use crate::error::Result;
use crate::hcp::traits::ApiResponse;
use crate::hcp::TfeClient;

use super::models::{EntitlementSet, EntitlementSetResource};

impl TfeClient {
    /// Fetch the entitlement set of the configured organization
    ///
    /// `GET /organizations/:org/entitlement-set`. Not gated itself, since the
    /// gate needs its result.
    pub async fn get_entitlement_set(&self) -> Result<EntitlementSet> {
        let org = self.organization();
        let url = format!(
            "{}/{}/{}/{}",
            self.base_url(),
            api::ORGANIZATIONS,
            urlencoding::encode(org),
            api::ENTITLEMENT_SET
        );
        debug!("Fetching entitlement set from: {}", url);

        let response: ApiResponse<EntitlementSetResource> = self
            .send_json(
                self.get(&url),
                &format!("fetch entitlements for organization '{}'", org),
            )
            .await?;

        Ok(EntitlementSet::from_resource(org, &response.data))
    }
}
