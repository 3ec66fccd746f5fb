//! CLI argument parsing

mod common;
mod team_access;

use clap::{Parser, Subcommand};

use crate::config::{defaults, host, org};

pub use common::OutputFormat;
pub use team_access::{AddArgs, ListArgs, PermissionArgs, RemoveArgs, ShowArgs, UpdateArgs};

/// Team access CLI for HCP Terraform / Terraform Enterprise
#[derive(Parser, Debug)]
#[command(name = "tfcaccess")]
#[command(version)]
#[command(
    about = "Manage team access to HCP Terraform / Terraform Enterprise workspaces",
    long_about = None
)]
pub struct Cli {
    /// TFE/HCP host (falls back to TFE_HOSTNAME, then the Terraform credentials file)
    #[arg(short = 'H', long, global = true, env = host::ENV_VAR)]
    pub host: Option<String>,

    /// Organization name
    #[arg(long, global = true, env = org::ENV_VAR)]
    pub org: Option<String>,

    /// API token (overrides env vars and credentials file)
    #[arg(short = 't', long, global = true)]
    pub token: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,

    /// Skip TLS certificate verification
    #[arg(long, global = true, default_value_t = false)]
    pub insecure: bool,

    /// Use the API path advertised by /.well-known/terraform.json
    #[arg(long, global = true, default_value_t = false)]
    pub discover: bool,

    /// Batch mode - no spinners, no interactive prompts
    #[arg(short, long, global = true, default_value_t = false)]
    pub batch: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Team access subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List team access bindings for a workspace (single page)
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show a team access binding
    #[command(visible_alias = "get")]
    Show(ShowArgs),

    /// Grant a team access to a workspace
    #[command(visible_alias = "create")]
    Add(AddArgs),

    /// Change the permissions of a team access binding
    #[command(visible_alias = "set")]
    Update(UpdateArgs),

    /// Revoke a team access binding
    #[command(visible_alias = "delete", visible_alias = "rm")]
    Remove(RemoveArgs),
}
