//! Host resolution from multiple sources

use dialoguer::{theme::ColorfulTheme, Select};
use log::debug;
use std::path::{Path, PathBuf};

use super::credentials::{default_credentials_path, CredentialsFile};
use crate::config::{defaults, host as host_config};
use crate::error::{Result, TfeError};

/// Host resolution with fallback logic
#[derive(Debug)]
pub struct HostResolver {
    credentials_path: Option<PathBuf>,
    use_env: bool,
}

impl Default for HostResolver {
    fn default() -> Self {
        Self {
            credentials_path: default_credentials_path(),
            use_env: true,
        }
    }
}

impl HostResolver {
    /// Resolve the host using the platform credentials file
    ///
    /// # Arguments
    /// * `cli_host` - Host from CLI argument (--host)
    /// * `batch_mode` - If true, error on multiple hosts instead of interactive selection
    pub fn resolve(cli_host: Option<&str>, batch_mode: bool) -> Result<String> {
        Self::default().select(cli_host, batch_mode)
    }

    /// Read credentials from `path` instead of the platform default
    pub fn with_credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = Some(path.into());
        self
    }

    /// Skip the TFE_HOSTNAME lookup
    pub fn without_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    /// Pick a host, in order:
    /// 1. CLI argument (if provided)
    /// 2. Environment variable (TFE_HOSTNAME)
    /// 3. Credentials file:
    ///    - If 1 host: use it
    ///    - If multiple hosts: interactive selection (or error in batch mode)
    /// 4. app.terraform.io when nothing else is configured
    pub fn select(&self, cli_host: Option<&str>, batch_mode: bool) -> Result<String> {
        if let Some(host) = cli_host.filter(|h| !h.is_empty()) {
            debug!("Using host from CLI argument: {}", host);
            return Ok(host.to_string());
        }

        if self.use_env {
            if let Ok(host) = std::env::var(host_config::ENV_VAR) {
                if !host.is_empty() {
                    debug!(
                        "Using host from {} environment variable: {}",
                        host_config::ENV_VAR,
                        host
                    );
                    return Ok(host);
                }
            }
        }

        debug!(
            "No host in CLI or {}, trying credentials file",
            host_config::ENV_VAR
        );
        self.resolve_from_credentials_file(batch_mode)
    }

    fn resolve_from_credentials_file(&self, batch_mode: bool) -> Result<String> {
        let Some(path) = self.credentials_path.as_deref() else {
            return Ok(Self::default_host());
        };
        let Some(file) = CredentialsFile::load(path)? else {
            return Ok(Self::default_host());
        };

        let hosts = file.hosts();
        match hosts.as_slice() {
            [] => Ok(Self::default_host()),
            [host] => {
                debug!(
                    "Using single host from credentials file {}: {}",
                    path.display(),
                    host
                );
                Ok(host.clone())
            }
            _ if batch_mode => Err(TfeError::HostNotFound(Self::host_not_found_message(
                path, &hosts,
            ))),
            _ => Self::interactive_host_selection(&hosts, path),
        }
    }

    fn default_host() -> String {
        debug!("No host configured, using {}", defaults::HOST);
        defaults::HOST.to_string()
    }

    /// Prompt user to select a host interactively
    fn interactive_host_selection(hosts: &[String], credentials_path: &Path) -> Result<String> {
        eprintln!("\nMultiple hosts found in {}:", credentials_path.display());

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Select a host")
            .items(hosts)
            .default(0)
            .interact()
            .map_err(|e| TfeError::HostNotFound(format!("Failed to select host: {}", e)))?;

        let host = hosts[selection].clone();
        debug!("User selected host: {}", host);
        Ok(host)
    }

    fn host_not_found_message(credentials_path: &Path, available_hosts: &[String]) -> String {
        format!(
            "Multiple hosts configured and --batch prevents choosing one. Please provide a host using one of:\n\
             \n\
             1. CLI argument:      tfcaccess --host <HOST>\n\
             2. Environment var:   export {}=<HOST>\n\
             \n\
             Checked:\n   Credentials file: {} ({} hosts found)\n   Available hosts: {}\n",
            host_config::ENV_VAR,
            credentials_path.display(),
            available_hosts.len(),
            available_hosts.join(", ")
        )
    }
}
