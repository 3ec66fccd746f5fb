//! Team access (team-workspaces) data models

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Team workspace access binding from TFE API
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct TeamWorkspaceAccess {
    pub id: String,
    #[serde(rename = "type")]
    pub access_type: Option<String>,
    pub attributes: TeamWorkspaceAccessAttributes,
    pub relationships: Option<TeamWorkspaceAccessRelationships>,
}

/// Team workspace access attributes
///
/// Kept as plain strings so values newer than this client still parse.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct TeamWorkspaceAccessAttributes {
    pub access: Option<String>,
    pub runs: Option<String>,
    pub variables: Option<String>,
    #[serde(rename = "state-versions")]
    pub state_versions: Option<String>,
    #[serde(rename = "sentinel-mocks")]
    pub sentinel_mocks: Option<String>,
    #[serde(rename = "workspace-locking")]
    pub workspace_locking: Option<bool>,
    #[serde(rename = "run-tasks")]
    pub run_tasks: Option<bool>,
}

/// Relationships for team workspace access
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct TeamWorkspaceAccessRelationships {
    pub team: Option<RelationshipRef>,
    pub workspace: Option<RelationshipRef>,
}

/// A relationship reference
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RelationshipRef {
    pub data: Option<RelationshipData>,
}

/// Relationship data containing ID and type
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RelationshipData {
    pub id: String,
    #[serde(rename = "type")]
    pub data_type: Option<String>,
}

impl TeamWorkspaceAccess {
    /// Get the access level
    pub fn access(&self) -> &str {
        self.attributes.access.as_deref().unwrap_or("")
    }

    /// Get the team ID from relationships
    pub fn team_id(&self) -> &str {
        self.relationships
            .as_ref()
            .and_then(|r| r.team.as_ref())
            .and_then(|t| t.data.as_ref())
            .map(|d| d.id.as_str())
            .unwrap_or("")
    }

    /// Get the workspace ID from relationships
    pub fn workspace_id(&self) -> &str {
        self.relationships
            .as_ref()
            .and_then(|r| r.workspace.as_ref())
            .and_then(|w| w.data.as_ref())
            .map(|d| d.id.as_str())
            .unwrap_or("")
    }
}

/// Workspace access level
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AccessLevel {
    Read,
    Plan,
    Write,
    Admin,
    Custom,
}

/// Permission on runs (custom access only)
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RunsPermission {
    Read,
    Plan,
    Apply,
}

/// Permission on workspace variables (custom access only)
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum VariablesPermission {
    None,
    Read,
    Write,
}

/// Permission on state versions (custom access only)
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StateVersionsPermission {
    None,
    ReadOutputs,
    Read,
    Write,
}

/// Permission on Sentinel mocks (custom access only)
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SentinelMocksPermission {
    None,
    Read,
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessLevel::Read => write!(f, "read"),
            AccessLevel::Plan => write!(f, "plan"),
            AccessLevel::Write => write!(f, "write"),
            AccessLevel::Admin => write!(f, "admin"),
            AccessLevel::Custom => write!(f, "custom"),
        }
    }
}

/// Attributes sent when creating or updating team access
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamAccessPermissions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<AccessLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runs: Option<RunsPermission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<VariablesPermission>,
    #[serde(rename = "state-versions", skip_serializing_if = "Option::is_none")]
    pub state_versions: Option<StateVersionsPermission>,
    #[serde(rename = "sentinel-mocks", skip_serializing_if = "Option::is_none")]
    pub sentinel_mocks: Option<SentinelMocksPermission>,
    #[serde(rename = "workspace-locking", skip_serializing_if = "Option::is_none")]
    pub workspace_locking: Option<bool>,
    #[serde(rename = "run-tasks", skip_serializing_if = "Option::is_none")]
    pub run_tasks: Option<bool>,
}

impl TeamAccessPermissions {
    pub fn with_access(access: AccessLevel) -> Self {
        Self {
            access: Some(access),
            ..Self::default()
        }
    }

    /// True when no attribute would be sent
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// JSON:API request document for POST/PATCH /team-workspaces
#[derive(Serialize, Debug, Clone)]
pub struct TeamAccessRequest {
    data: TeamAccessRequestData,
}

#[derive(Serialize, Debug, Clone)]
struct TeamAccessRequestData {
    #[serde(rename = "type")]
    resource_type: &'static str,
    attributes: TeamAccessPermissions,
    #[serde(skip_serializing_if = "Option::is_none")]
    relationships: Option<TeamAccessRequestRelationships>,
}

#[derive(Serialize, Debug, Clone)]
struct TeamAccessRequestRelationships {
    workspace: RequestRelationship,
    team: RequestRelationship,
}

#[derive(Serialize, Debug, Clone)]
struct RequestRelationship {
    data: RelationshipData,
}

impl RequestRelationship {
    fn new(data_type: &str, id: &str) -> Self {
        Self {
            data: RelationshipData {
                id: id.to_string(),
                data_type: Some(data_type.to_string()),
            },
        }
    }
}

impl TeamAccessRequest {
    /// Body that grants a team access to a workspace
    pub fn create(team_id: &str, workspace_id: &str, permissions: TeamAccessPermissions) -> Self {
        Self {
            data: TeamAccessRequestData {
                resource_type: crate::config::api::TEAM_WORKSPACES,
                attributes: permissions,
                relationships: Some(TeamAccessRequestRelationships {
                    workspace: RequestRelationship::new("workspaces", workspace_id),
                    team: RequestRelationship::new("teams", team_id),
                }),
            },
        }
    }

    /// Body that changes the permissions of an existing binding
    pub fn update(permissions: TeamAccessPermissions) -> Self {
        Self {
            data: TeamAccessRequestData {
                resource_type: crate::config::api::TEAM_WORKSPACES,
                attributes: permissions,
                relationships: None,
            },
        }
    }
}
