//! tfcaccess - Manage team access to HCP Terraform / Terraform Enterprise workspaces
//!
//! A typed client for the `team-workspaces` API plus a small CLI on top of it.
//!
//! # Features
//!
//! - Grant, list, show, update and revoke team access bindings
//! - Nested key paths translated to `filter[a][b]=value` query parameters
//! - Organization entitlement check before any team access request
//! - Multiple output formats (table, CSV, JSON, YAML)
//!
//! # Example
//!
//! ```bash
//! # List the teams with access to a workspace
//! tfcaccess list --org my-org -w ws-abc123
//!
//! # Grant write access
//! tfcaccess add --org my-org --team team-xyz -w ws-abc123 --access write
//!
//! # Revoke it again
//! tfcaccess remove --org my-org tws-789 -y
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod hcp;
pub mod output;
pub mod ui;

pub use cli::{Cli, Command, OutputFormat};
pub use error::{Result, TfeError};
pub use hcp::{
    ApiEndpoint, Endpoint, EndpointConfig, Entitlement, EntitlementSet, Filter, HostResolver,
    ListOptions, TeamAccess, TeamAccessPermissions, TeamAccessRequest, TeamWorkspaceAccess,
    TfeClient, TokenResolver, WellKnownPaths,
};
pub use hcp::team_access::run_team_access_command;
