//! API token resolution from the CLI, the environment and the Terraform credentials file

use log::debug;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::credentials;
use crate::error::{Result, TfeError};

/// `credentials.tfrc.json` as written by `terraform login`
#[derive(Deserialize, Debug, Default)]
pub(crate) struct CredentialsFile {
    #[serde(default)]
    pub(crate) credentials: BTreeMap<String, CredentialEntry>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct CredentialEntry {
    #[serde(default)]
    pub(crate) token: Option<String>,
}

impl CredentialsFile {
    /// Load the file at `path`. A missing file yields `Ok(None)`.
    pub(crate) fn load(path: &Path) -> Result<Option<Self>> {
        debug!("Looking for credentials file at: {}", path.display());

        let content = match fs::read_to_string(path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            result => result?,
        };

        let file = serde_json::from_str(&content).inspect_err(|e| {
            debug!("Could not parse credentials file {}: {}", path.display(), e)
        })?;
        Ok(Some(file))
    }

    /// Hosts present in the file, sorted
    pub(crate) fn hosts(&self) -> Vec<String> {
        self.credentials.keys().cloned().collect()
    }

    pub(crate) fn token_for(&self, host: &str) -> Option<&str> {
        self.credentials
            .get(host)
            .and_then(|entry| entry.token.as_deref())
            .filter(|token| !token.is_empty())
    }
}

/// Path to the Terraform credentials file (platform-specific)
/// - Windows: %APPDATA%\terraform.d\credentials.tfrc.json
/// - Linux/macOS: ~/.terraform.d/credentials.tfrc.json
pub(crate) fn default_credentials_path() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        dirs::config_dir().map(|p| p.join(credentials::FILE_NAME))
    }

    #[cfg(not(windows))]
    {
        dirs::home_dir().map(|p| p.join(credentials::FILE_PATH_UNIX))
    }
}

/// Token resolution with fallback logic
#[derive(Debug)]
pub struct TokenResolver {
    host: String,
    credentials_path: Option<PathBuf>,
    use_env: bool,
}

impl TokenResolver {
    /// Create a new token resolver for the given host
    pub fn new(host: &str) -> Self {
        Self {
            host: host.to_string(),
            credentials_path: default_credentials_path(),
            use_env: true,
        }
    }

    /// Read credentials from `path` instead of the platform default
    pub fn with_credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = Some(path.into());
        self
    }

    /// Skip the environment variable lookup
    pub fn without_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    /// Resolve token from multiple sources with fallback:
    /// 1. CLI argument (if provided)
    /// 2. Environment variables (TFE_TOKEN, TFC_TOKEN - in order)
    /// 3. Credentials file entry for the host
    pub fn resolve(&self, cli_token: Option<&str>) -> Result<String> {
        if let Some(token) = cli_token.filter(|t| !t.is_empty()) {
            debug!("Using token from CLI argument");
            return Ok(token.to_string());
        }

        if self.use_env {
            for env_var in credentials::TOKEN_ENV_VARS {
                if let Ok(token) = std::env::var(env_var) {
                    if !token.is_empty() {
                        debug!("Using token from {} environment variable", env_var);
                        return Ok(token);
                    }
                }
            }
        }

        debug!(
            "No token found in environment variables {:?}, trying credentials file",
            credentials::TOKEN_ENV_VARS
        );
        self.read_from_credentials_file()
    }

    fn read_from_credentials_file(&self) -> Result<String> {
        let path = self
            .credentials_path
            .as_deref()
            .ok_or_else(|| TfeError::TokenNotFound(self.token_not_found_message(None)))?;

        let file = CredentialsFile::load(path)?
            .ok_or_else(|| TfeError::TokenNotFound(self.token_not_found_message(Some(path))))?;

        match file.token_for(&self.host) {
            Some(token) => {
                debug!(
                    "Using token from credentials file {} for host: {}",
                    path.display(),
                    self.host
                );
                Ok(token.to_string())
            }
            None => Err(TfeError::TokenNotFound(
                self.token_not_found_message(Some(path)),
            )),
        }
    }

    fn token_not_found_message(&self, credentials_path: Option<&Path>) -> String {
        let env_vars = credentials::TOKEN_ENV_VARS.join(", ");
        let creds_info = credentials_path
            .map(|p| format!(" or in credentials file {}", p.display()))
            .unwrap_or_default();

        format!(
            "No API token found for host '{}'. Please provide a token using one of:\n\
             \n\
             1. CLI argument:      tfcaccess --token <TOKEN>\n\
             2. Environment var:   export TFE_TOKEN=<TOKEN>  (also: TFC_TOKEN)\n\
             3. Terraform login:   terraform login {}\n\
             \n\
             Checked: env vars [{}]{}",
            self.host, self.host, env_vars, creds_info
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn credentials_file(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_resolver_cli_token_takes_precedence() {
        let resolver = TokenResolver::new("test.example.com");
        assert_eq!(resolver.resolve(Some("cli-token-123")).unwrap(), "cli-token-123");
    }

    #[test]
    fn test_resolver_token_from_credentials_file() {
        let file = credentials_file(
            r#"{
                "credentials": {
                    "app.terraform.io": { "token": "test-token-123" },
                    "custom.host.com": { "token": "custom-token-456" }
                }
            }"#,
        );

        let resolver = TokenResolver::new("custom.host.com")
            .with_credentials_path(file.path())
            .without_env();
        assert_eq!(resolver.resolve(None).unwrap(), "custom-token-456");
    }

    #[test]
    fn test_resolver_host_missing_from_file() {
        let file = credentials_file(r#"{"credentials": {"other.host": {"token": "x"}}}"#);

        let resolver = TokenResolver::new("app.terraform.io")
            .with_credentials_path(file.path())
            .without_env();
        let err = resolver.resolve(None).unwrap_err();
        assert!(matches!(err, TfeError::TokenNotFound(_)));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_resolver_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = TokenResolver::new("app.terraform.io")
            .with_credentials_path(dir.path().join("absent.json"))
            .without_env();
        assert!(matches!(
            resolver.resolve(None),
            Err(TfeError::TokenNotFound(_))
        ));
    }

    #[test]
    fn test_resolver_malformed_file() {
        let file = credentials_file("not json");
        let resolver = TokenResolver::new("app.terraform.io")
            .with_credentials_path(file.path())
            .without_env();
        assert!(matches!(resolver.resolve(None), Err(TfeError::Json(_))));
    }

    #[test]
    fn test_resolver_unreadable_path() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = TokenResolver::new("app.terraform.io")
            .with_credentials_path(dir.path())
            .without_env();
        assert!(matches!(
            resolver.resolve(None),
            Err(TfeError::Credentials(_))
        ));
    }

    #[test]
    fn test_token_not_found_message_format() {
        let resolver = TokenResolver::new("app.terraform.io");
        let msg = resolver.token_not_found_message(None);
        assert!(msg.contains("app.terraform.io"));
        assert!(msg.contains("tfcaccess --token"));
        assert!(msg.contains("TFE_TOKEN"));
        assert!(msg.contains("terraform login"));
    }

    #[test]
    fn test_credentials_file_empty_token_ignored() {
        let file: CredentialsFile =
            serde_json::from_str(r#"{"credentials": {"a.host": {"token": ""}, "b.host": {}}}"#)
                .unwrap();
        assert!(file.token_for("a.host").is_none());
        assert!(file.token_for("b.host").is_none());
        assert_eq!(file.hosts(), vec!["a.host", "b.host"]);
    }

    #[test]
    fn test_default_credentials_path() {
        let path = default_credentials_path();
        assert!(path.is_some());
        assert!(path
            .unwrap()
            .to_string_lossy()
            .contains("credentials.tfrc.json"));
    }
}
