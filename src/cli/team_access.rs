//! Team access command arguments

use clap::{Args, Parser};

use super::common::OutputFormat;
use crate::hcp::filters::Filter;
use crate::hcp::team_access::{
    AccessLevel, RunsPermission, SentinelMocksPermission, StateVersionsPermission,
    TeamAccessPermissions, VariablesPermission,
};

/// Arguments for 'list'
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Workspace ID (ws-xxx) whose bindings to list
    #[arg(short = 'w', long)]
    pub workspace: String,

    /// Extra filter as KEY.PATH=VALUE (sent as filter[KEY][PATH]=VALUE), repeatable
    #[arg(short, long, value_parser = parse_filter)]
    pub filter: Vec<Filter>,

    /// Page number to fetch
    #[arg(long)]
    pub page: Option<u32>,

    /// Page size
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Omit the header row (table and CSV)
    #[arg(long, default_value_t = false)]
    pub no_header: bool,
}

/// Arguments for 'show'
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Team access ID (tws-xxx)
    pub id: String,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

/// Arguments for 'add'
#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Team ID (team-xxx)
    #[arg(long)]
    pub team: String,

    /// Workspace ID (ws-xxx)
    #[arg(short = 'w', long)]
    pub workspace: String,

    #[command(flatten)]
    pub permissions: PermissionArgs,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

/// Arguments for 'update'
#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Team access ID (tws-xxx)
    pub id: String,

    #[command(flatten)]
    pub permissions: PermissionArgs,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

/// Arguments for 'remove'
#[derive(Parser, Debug)]
pub struct RemoveArgs {
    /// Team access ID (tws-xxx)
    pub id: String,

    /// Skip confirmation prompt
    #[arg(short = 'y', long, default_value_t = false)]
    pub yes: bool,
}

/// Permission flags shared by 'add' and 'update'
#[derive(Args, Debug, Clone, Default)]
pub struct PermissionArgs {
    /// Access level
    #[arg(short, long, value_enum)]
    pub access: Option<AccessLevel>,

    /// Runs permission (custom access)
    #[arg(long, value_enum)]
    pub runs: Option<RunsPermission>,

    /// Variables permission (custom access)
    #[arg(long, value_enum)]
    pub variables: Option<VariablesPermission>,

    /// State versions permission (custom access)
    #[arg(long, value_enum)]
    pub state_versions: Option<StateVersionsPermission>,

    /// Sentinel mocks permission (custom access)
    #[arg(long, value_enum)]
    pub sentinel_mocks: Option<SentinelMocksPermission>,

    /// Allow locking the workspace (custom access)
    #[arg(long)]
    pub workspace_locking: Option<bool>,

    /// Allow managing run tasks (custom access)
    #[arg(long)]
    pub run_tasks: Option<bool>,
}

impl From<&PermissionArgs> for TeamAccessPermissions {
    fn from(args: &PermissionArgs) -> Self {
        Self {
            access: args.access,
            runs: args.runs,
            variables: args.variables,
            state_versions: args.state_versions,
            sentinel_mocks: args.sentinel_mocks,
            workspace_locking: args.workspace_locking,
            run_tasks: args.run_tasks,
        }
    }
}

fn parse_filter(s: &str) -> std::result::Result<Filter, String> {
    s.parse::<Filter>().map_err(|e| e.to_string())
}
