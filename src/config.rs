/// Configuration constants for TFE API
pub mod api {
    /// Base path for TFE API v2 (used when service discovery is skipped)
    pub const BASE_PATH: &str = "/api/v2";

    /// Service discovery document
    pub const WELL_KNOWN_PATH: &str = "/.well-known/terraform.json";

    /// Service discovery key for the v2 API
    pub const WELL_KNOWN_TFE_V2: &str = "tfe.v2";

    /// Organizations endpoint
    pub const ORGANIZATIONS: &str = "organizations";

    /// Entitlement set sub-resource of an organization
    pub const ENTITLEMENT_SET: &str = "entitlement-set";

    /// Team access (team-workspaces) endpoint
    pub const TEAM_WORKSPACES: &str = "team-workspaces";

    /// JSON:API media type sent with every request
    pub const CONTENT_TYPE: &str = "application/vnd.api+json";
}

/// Configuration constants for credentials
pub mod credentials {
    /// Credentials file name
    pub const FILE_NAME: &str = "terraform.d/credentials.tfrc.json";

    /// Path to Terraform credentials file on Unix (relative to HOME)
    pub const FILE_PATH_UNIX: &str = ".terraform.d/credentials.tfrc.json";

    /// Environment variable names for token (checked in order)
    pub const TOKEN_ENV_VARS: &[&str] = &["TFE_TOKEN", "TFC_TOKEN"];
}

/// Configuration constants for host resolution
pub mod host {
    /// Environment variable for the TFE host
    pub const ENV_VAR: &str = "TFE_HOSTNAME";
}

/// Configuration constants for organization selection
pub mod org {
    /// Environment variable for the organization name
    pub const ENV_VAR: &str = "TFE_ORG";
}

/// Default values for CLI
pub mod defaults {
    /// Default TFE host
    pub const HOST: &str = "app.terraform.io";

    /// Default log level
    pub const LOG_LEVEL: &str = "warn";
}
