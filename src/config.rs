//! Configuration constants and profile loading for rosterline
//!
//! A profile file is an INI document where each section names a profile:
//!
//! ```ini
//! [default]
//! server = http://localhost:8000
//!
//! [staging]
//! server = https://roster.example.com
//! ```

use crate::cmd_args::CommandLineArgs;
use anyhow::{bail, Context, Result};
use ini::Ini;
use reqwest::Url;
use std::ffi::OsString;
use std::path::Path;

/// Default profile file path for rosterline
pub const DEFAULT_PROFILE_PATH: &str = "~/.rosterline/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "ROSTERLINE_PROFILE_PATH";

/// Environment variable holding the log filter directive
pub const LOG_LEVEL_ENV_VAR: &str = "ROSTERLINE_LOG_LEVEL";

/// Environment variable naming a log file when `--log-file` is not given
pub const LOG_FILE_ENV_VAR: &str = "ROSTERLINE_LOG_FILE";

/// Server used when no profile configures one
pub const DEFAULT_SERVER: &str = "http://localhost:8000";

/// Profile key holding the server origin
const SERVER_KEY: &str = "server";

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    profile_path_from(std::env::var_os(PROFILE_PATH_ENV_VAR))
}

fn profile_path_from(value: Option<OsString>) -> String {
    value
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Settings for one rosterline session, resolved from profile and command line
#[derive(Debug, Clone)]
pub struct ClientConfig {
    profile_name: String,
    profile_path: String,
    server: Url,
}

impl ClientConfig {
    /// Resolve the configuration: `--server` wins over the profile, which wins over the default
    pub fn resolve(cmd_args: &CommandLineArgs) -> Result<Self> {
        let profile_name = cmd_args.profile().clone();
        let profile_path = get_profile_path();

        let server = match cmd_args.server() {
            Some(server) => server.to_string(),
            None => load_profile_server(&profile_name, &profile_path)?
                .unwrap_or_else(|| DEFAULT_SERVER.to_string()),
        };

        Ok(Self {
            server: parse_server(&server)?,
            profile_name,
            profile_path,
        })
    }

    pub fn new(profile_name: &str, profile_path: &str, server: &str) -> Result<Self> {
        Ok(Self {
            profile_name: profile_name.to_string(),
            profile_path: profile_path.to_string(),
            server: parse_server(server)?,
        })
    }

    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    pub fn profile_path(&self) -> &str {
        &self.profile_path
    }

    pub fn server(&self) -> &Url {
        &self.server
    }
}

/// Read the `server` entry of a profile. Returns `None` when the file or section is absent.
pub fn load_profile_server(profile_name: &str, profile_path: &str) -> Result<Option<String>> {
    let expanded = shellexpand::tilde(profile_path);
    let path = Path::new(expanded.as_ref());

    if !path.exists() {
        tracing::debug!("Profile file '{}' not found", path.display());
        return Ok(None);
    }

    let ini = Ini::load_from_file(path)
        .with_context(|| format!("Failed to read profile file '{}'", path.display()))?;

    let server = ini
        .section(Some(profile_name))
        .and_then(|section| section.get(SERVER_KEY))
        .map(|server| server.trim().to_string());

    match &server {
        Some(server) => tracing::debug!("Profile '{}' uses server {}", profile_name, server),
        None => tracing::debug!("Profile '{}' has no server entry", profile_name),
    }

    Ok(server)
}

fn parse_server(server: &str) -> Result<Url> {
    let url = Url::parse(server).with_context(|| format!("Invalid server URL '{server}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("Server URL '{server}' must use http or https");
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_profile(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn resolve_should_read_server_from_env_profile_path() {
        let file = write_profile("[default]\nserver = http://localhost:8000\n\n[lab]\nserver = https://lab.example.com:9443\n");
        let path = file.path().to_str().unwrap();
        std::env::set_var(PROFILE_PATH_ENV_VAR, path);

        let args = CommandLineArgs::parse_from(["rosterline", "--profile", "lab"]);
        let config = ClientConfig::resolve(&args);
        std::env::remove_var(PROFILE_PATH_ENV_VAR);

        let config = config.unwrap();
        assert_eq!(config.profile_path(), path);
        assert_eq!(config.profile_name(), "lab");
        assert_eq!(config.server().as_str(), "https://lab.example.com:9443/");
    }

    #[test]
    fn test_profile_path_default() {
        assert_eq!(profile_path_from(None), DEFAULT_PROFILE_PATH);
    }

    #[test]
    fn test_profile_path_env_override() {
        let path = profile_path_from(Some(OsString::from("/custom/profile/path")));
        assert_eq!(path, "/custom/profile/path");
    }

    #[test]
    fn load_profile_server_should_read_named_section() {
        let file = write_profile(
            "[default]\nserver = http://localhost:8000\n\n[staging]\nserver = https://roster.example.com\n",
        );
        let path = file.path().to_str().unwrap();

        assert_eq!(
            load_profile_server("staging", path).unwrap(),
            Some("https://roster.example.com".to_string())
        );
        assert_eq!(
            load_profile_server("default", path).unwrap(),
            Some("http://localhost:8000".to_string())
        );
    }

    #[test]
    fn load_profile_server_should_return_none_for_missing_section() {
        let file = write_profile("[default]\nserver = http://localhost:8000\n");
        let path = file.path().to_str().unwrap();

        assert_eq!(load_profile_server("prod", path).unwrap(), None);
    }

    #[test]
    fn load_profile_server_should_return_none_for_missing_file() {
        let result = load_profile_server("default", "/definitely/not/here/profile").unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn client_config_should_prefer_command_line_server() {
        let args = CommandLineArgs::parse_from(["rosterline", "--server", "http://10.0.0.5:8080"]);
        let config = ClientConfig::resolve(&args).unwrap();
        assert_eq!(config.server().as_str(), "http://10.0.0.5:8080/");
        assert_eq!(config.profile_name(), "default");
    }

    #[test]
    fn client_config_should_reject_non_http_server() {
        let result = ClientConfig::new("default", DEFAULT_PROFILE_PATH, "ftp://files.example.com");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("http or https"));
    }

    #[test]
    fn client_config_should_reject_garbage_server() {
        assert!(ClientConfig::new("default", DEFAULT_PROFILE_PATH, "not a url").is_err());
    }
}
