//! Team access module - grant, inspect and revoke team access to workspaces

mod api;
mod commands;
mod models;

pub use api::TeamAccess;
pub use commands::{connect_team_access, list_options, run_team_access_command};
pub use models::{
    AccessLevel, RelationshipData, RelationshipRef, RunsPermission, SentinelMocksPermission,
    StateVersionsPermission, TeamAccessPermissions, TeamAccessRequest, TeamWorkspaceAccess,
    TeamWorkspaceAccessAttributes, TeamWorkspaceAccessRelationships, VariablesPermission,
};
