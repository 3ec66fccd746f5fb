//! Team access command handlers

use log::debug;

use crate::cli::{AddArgs, Cli, Command, ListArgs, RemoveArgs, ShowArgs, UpdateArgs};
use crate::error::{Result, TfeError};
use crate::hcp::discovery::WellKnownPaths;
use crate::hcp::endpoint_config::{normalize_instance_url, EndpointConfig};
use crate::hcp::filters::{Filter, ListOptions};
use crate::hcp::{HostResolver, TfeClient, TokenResolver};
use crate::output::{output_team_access, output_team_access_list};
use crate::ui::{confirm_action, create_spinner, finish_spinner};

use super::api::TeamAccess;
use super::models::{TeamAccessPermissions, TeamAccessRequest};

/// Resolve host, token and organization, then bind to the team access endpoint
pub async fn connect_team_access(cli: &Cli) -> Result<TeamAccess> {
    let host = HostResolver::resolve(cli.host.as_deref(), cli.batch)?;
    let token = TokenResolver::new(&host).resolve(cli.token.as_deref())?;
    let org = cli.org.as_deref().ok_or_else(|| {
        TfeError::Config("Organization is required. Use --org or set TFE_ORG".to_string())
    })?;

    let level = cli
        .log_level
        .parse::<log::LevelFilter>()
        .map_err(|_| TfeError::Config(format!("Invalid log level '{}'", cli.log_level)))?;

    let instance_url = normalize_instance_url(&host);
    let mut config = EndpointConfig::new(&instance_url, org, &token)?
        .with_verify(!cli.insecure)
        .with_log_level(level);

    if cli.discover {
        let paths = WellKnownPaths::discover(&instance_url, !cli.insecure).await?;
        config = config.with_well_known_paths(paths);
    }

    let client = TfeClient::new(config)?;
    debug!("Using API base URL: {}", client.base_url());

    let spinner = create_spinner(
        &format!("Checking entitlements for '{}'...", org),
        cli.batch,
    );
    let result = TeamAccess::connect(client).await;
    finish_spinner(spinner);
    result
}

/// Dispatch the parsed command
pub async fn run_team_access_command(
    cli: &Cli,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let team_access = connect_team_access(cli).await?;

    match &cli.command {
        Command::List(args) => run_list_command(&team_access, args, cli.batch).await?,
        Command::Show(args) => run_show_command(&team_access, args, cli.batch).await?,
        Command::Add(args) => run_add_command(&team_access, args, cli.batch).await?,
        Command::Update(args) => run_update_command(&team_access, args, cli.batch).await?,
        Command::Remove(args) => run_remove_command(&team_access, args, cli.batch).await?,
    }

    Ok(())
}

/// List options for 'list': the workspace filter first, then user filters
pub fn list_options(args: &ListArgs) -> ListOptions {
    let mut options =
        ListOptions::new().with_filter(Filter::new(["workspace", "id"], &args.workspace));
    for filter in &args.filter {
        options = options.with_filter(filter.clone());
    }
    if let Some(page) = args.page {
        options = options.with_page(page);
    }
    if let Some(size) = args.page_size {
        options = options.with_page_size(size);
    }
    options
}

pub async fn run_list_command(team_access: &TeamAccess, args: &ListArgs, batch: bool) -> Result<()> {
    let spinner = create_spinner(
        &format!("Fetching team access for workspace '{}'...", args.workspace),
        batch,
    );
    let page = team_access.list_page(&list_options(args)).await;
    finish_spinner(spinner);
    let page = page?;

    output_team_access_list(&page.data, &args.output, args.no_header);

    if page.has_next_page() && !batch {
        if let Some(p) = page.pagination() {
            eprintln!(
                "Showing page {} of {} ({} total). Use --page to fetch more.",
                p.current_page, p.total_pages, p.total_count
            );
        }
    }
    Ok(())
}

pub async fn run_show_command(team_access: &TeamAccess, args: &ShowArgs, batch: bool) -> Result<()> {
    let spinner = create_spinner(&format!("Fetching team access '{}'...", args.id), batch);
    let access = team_access.show(&args.id).await;
    finish_spinner(spinner);

    output_team_access(&access?, &args.output);
    Ok(())
}

pub async fn run_add_command(team_access: &TeamAccess, args: &AddArgs, batch: bool) -> Result<()> {
    let permissions = TeamAccessPermissions::from(&args.permissions);
    if permissions.access.is_none() {
        return Err(TfeError::Config(
            "--access is required when granting team access".to_string(),
        ));
    }
    let request = TeamAccessRequest::create(&args.team, &args.workspace, permissions);

    let spinner = create_spinner(
        &format!(
            "Granting team '{}' access to workspace '{}'...",
            args.team, args.workspace
        ),
        batch,
    );
    let created = team_access.add_team_access(&request).await;
    finish_spinner(spinner);

    output_team_access(&created?, &args.output);
    Ok(())
}

pub async fn run_update_command(
    team_access: &TeamAccess,
    args: &UpdateArgs,
    batch: bool,
) -> Result<()> {
    let permissions = TeamAccessPermissions::from(&args.permissions);
    if permissions.is_empty() {
        return Err(TfeError::Config(
            "Nothing to update. Pass --access or a custom permission flag".to_string(),
        ));
    }
    let request = TeamAccessRequest::update(permissions);

    let spinner = create_spinner(&format!("Updating team access '{}'...", args.id), batch);
    let updated = team_access.update(&args.id, &request).await;
    finish_spinner(spinner);

    output_team_access(&updated?, &args.output);
    Ok(())
}

pub async fn run_remove_command(
    team_access: &TeamAccess,
    args: &RemoveArgs,
    batch: bool,
) -> Result<()> {
    if !args.yes && !confirm_action(&format!("Remove team access {}?", args.id), batch) {
        println!("Cancelled");
        return Ok(());
    }

    let spinner = create_spinner(&format!("Removing team access '{}'...", args.id), batch);
    let result = team_access.remove_team_access(&args.id).await;
    finish_spinner(spinner);
    result?;

    println!("✓ Removed team access {}", args.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::cli::PermissionArgs;
    use crate::hcp::entitlements::{Entitlement, EntitlementSet};
    use wiremock::matchers::{any, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn team_access(uri: &str) -> TeamAccess {
        TeamAccess::new(
            TfeClient::test_client(uri),
            EntitlementSet::new("my-org", &[Entitlement::Teams]),
        )
    }

    fn list_args(workspace: &str) -> ListArgs {
        ListArgs {
            workspace: workspace.to_string(),
            filter: vec![],
            page: None,
            page_size: None,
            output: OutputFormat::Json,
            no_header: false,
        }
    }

    #[test]
    fn test_list_options_workspace_first() {
        let mut args = list_args("ws-1");
        args.filter = vec![Filter::new(["team", "id"], "team-a")];
        args.page = Some(3);

        let query = list_options(&args).to_query_string().unwrap();
        assert_eq!(
            query,
            "page[number]=3&filter[workspace][id]=ws-1&filter[team][id]=team-a"
        );
    }

    #[tokio::test]
    async fn test_run_list_command() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/team-workspaces"))
            .and(query_param("filter[workspace][id]", "ws-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{
                    "id": "tws-1",
                    "type": "team-workspaces",
                    "attributes": { "access": "read" }
                }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        run_list_command(&team_access(&mock_server.uri()), &list_args("ws-1"), true)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_run_add_requires_access() {
        let mock_server = MockServer::start().await;

        Mock::given(any())
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&mock_server)
            .await;

        let args = AddArgs {
            team: "team-a".to_string(),
            workspace: "ws-1".to_string(),
            permissions: PermissionArgs::default(),
            output: OutputFormat::Json,
        };
        let result = run_add_command(&team_access(&mock_server.uri()), &args, true).await;
        assert!(matches!(result, Err(TfeError::Config(_))));
    }

    #[tokio::test]
    async fn test_run_update_requires_change() {
        let mock_server = MockServer::start().await;

        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let args = UpdateArgs {
            id: "tws-1".to_string(),
            permissions: PermissionArgs::default(),
            output: OutputFormat::Json,
        };
        let result = run_update_command(&team_access(&mock_server.uri()), &args, true).await;
        assert!(matches!(result, Err(TfeError::Config(_))));
    }

    #[tokio::test]
    async fn test_run_remove_batch_without_yes_cancels() {
        let mock_server = MockServer::start().await;

        Mock::given(any())
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&mock_server)
            .await;

        let args = RemoveArgs {
            id: "tws-1".to_string(),
            yes: false,
        };
        run_remove_command(&team_access(&mock_server.uri()), &args, true)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_run_remove_with_yes() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/v2/team-workspaces/tws-1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let args = RemoveArgs {
            id: "tws-1".to_string(),
            yes: true,
        };
        run_remove_command(&team_access(&mock_server.uri()), &args, true)
            .await
            .unwrap();
    }
}
