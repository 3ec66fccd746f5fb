//! Team access output formatter

use super::common::{escape_csv, print_json, print_yaml};
use crate::cli::OutputFormat;
use crate::hcp::team_access::TeamWorkspaceAccess;
use comfy_table::{presets::NOTHING, Table};
use serde::Serialize;

/// Serializable team access for structured output (JSON/YAML)
#[derive(Serialize)]
struct SerializableTeamAccess {
    id: String,
    team_id: String,
    workspace_id: String,
    access: String,
    runs: Option<String>,
    variables: Option<String>,
    state_versions: Option<String>,
    sentinel_mocks: Option<String>,
    workspace_locking: Option<bool>,
    run_tasks: Option<bool>,
}

impl From<&TeamWorkspaceAccess> for SerializableTeamAccess {
    fn from(binding: &TeamWorkspaceAccess) -> Self {
        let attrs = &binding.attributes;
        Self {
            id: binding.id.clone(),
            team_id: binding.team_id().to_string(),
            workspace_id: binding.workspace_id().to_string(),
            access: binding.access().to_string(),
            runs: attrs.runs.clone(),
            variables: attrs.variables.clone(),
            state_versions: attrs.state_versions.clone(),
            sentinel_mocks: attrs.sentinel_mocks.clone(),
            workspace_locking: attrs.workspace_locking,
            run_tasks: attrs.run_tasks,
        }
    }
}

/// Output team access bindings in the specified format
pub fn output_team_access_list(
    bindings: &[TeamWorkspaceAccess],
    format: &OutputFormat,
    no_header: bool,
) {
    match format {
        OutputFormat::Table => println!("{}", render_table(bindings, no_header)),
        OutputFormat::Csv => print!("{}", render_csv(bindings, no_header)),
        OutputFormat::Json => print_json(&serializable(bindings)),
        OutputFormat::Yaml => print_yaml(&serializable(bindings)),
    }
}

/// Output a single team access binding
pub fn output_team_access(binding: &TeamWorkspaceAccess, format: &OutputFormat) {
    match format {
        OutputFormat::Table => println!("{}", render_detail(binding)),
        OutputFormat::Csv => print!("{}", render_csv(std::slice::from_ref(binding), false)),
        OutputFormat::Json => print_json(&SerializableTeamAccess::from(binding)),
        OutputFormat::Yaml => print_yaml(&SerializableTeamAccess::from(binding)),
    }
}

fn serializable(bindings: &[TeamWorkspaceAccess]) -> Vec<SerializableTeamAccess> {
    bindings.iter().map(SerializableTeamAccess::from).collect()
}

fn render_table(bindings: &[TeamWorkspaceAccess], no_header: bool) -> String {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    if !no_header {
        table.set_header(vec!["ID", "TEAM", "WORKSPACE", "ACCESS"]);
    }

    for binding in bindings {
        table.add_row(vec![
            binding.id.as_str(),
            binding.team_id(),
            binding.workspace_id(),
            binding.access(),
        ]);
    }

    table.to_string()
}

fn render_detail(binding: &TeamWorkspaceAccess) -> String {
    let attrs = &binding.attributes;
    let flag = |v: Option<bool>| v.map(|b| b.to_string()).unwrap_or_default();

    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.add_row(vec!["ID", binding.id.as_str()]);
    table.add_row(vec!["Team", binding.team_id()]);
    table.add_row(vec!["Workspace", binding.workspace_id()]);
    table.add_row(vec!["Access", binding.access()]);
    table.add_row(vec!["Runs", attrs.runs.as_deref().unwrap_or("")]);
    table.add_row(vec!["Variables", attrs.variables.as_deref().unwrap_or("")]);
    table.add_row(vec![
        "State versions",
        attrs.state_versions.as_deref().unwrap_or(""),
    ]);
    table.add_row(vec![
        "Sentinel mocks",
        attrs.sentinel_mocks.as_deref().unwrap_or(""),
    ]);
    table.add_row(vec![
        "Workspace locking".to_string(),
        flag(attrs.workspace_locking),
    ]);
    table.add_row(vec!["Run tasks".to_string(), flag(attrs.run_tasks)]);

    table.to_string()
}

fn render_csv(bindings: &[TeamWorkspaceAccess], no_header: bool) -> String {
    let mut out = String::new();
    if !no_header {
        out.push_str("id,team_id,workspace_id,access\n");
    }
    for binding in bindings {
        out.push_str(&format!(
            "{},{},{},{}\n",
            escape_csv(&binding.id),
            escape_csv(binding.team_id()),
            escape_csv(binding.workspace_id()),
            escape_csv(binding.access()),
        ));
    }
    out
}
