//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.ohmygpt/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! An empty env var counts as unset: `OHMYGPT_APP_NAME=""` falls back to
//! the default rather than blanking the header.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub endpoint: EndpointConfig,
}

/// Display and theming values for the page chrome.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AppConfig {
    pub name: Option<String>,
    pub logo: Option<String>,
    pub theme_color: Option<String>,
    pub summary: Option<String>,
    pub example_input: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct IdentityConfig {
    pub google_client_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EndpointConfig {
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_APP_NAME: &str = "OhMyGPT";
pub const DEFAULT_THEME_COLOR: &str = "#22c55e";
pub const DEFAULT_SUMMARY: &str = "Ask me any thing you want.";
pub const DEFAULT_EXAMPLE_INPUT: &str = "Ask me any thing.";
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000";
pub const DEFAULT_GOOGLE_CLIENT_ID: &str =
    "1057023803685-1im8k2dv6rcofeunan4986fidsl62p0n.apps.googleusercontent.com";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub app_name: String,
    /// Logo URL. Absent by default; presence only affects header layout.
    pub app_logo: Option<String>,
    /// Theme color as a `#rrggbb` hex string; parsed by the TUI layer.
    pub theme_color: String,
    pub summary: String,
    /// Sent as the prompt when the input field is empty at submit time.
    pub example_input: String,
    pub google_client_id: String,
    pub endpoint: String,
    /// Pre-issued access token for the silent sign-in path (env only).
    pub access_token: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.ohmygpt/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".ohmygpt").join("config.toml"))
}

/// Load config from `~/.ohmygpt/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ClientConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ClientConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ClientConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: ClientConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r##"# OhMyGPT Configuration
# All settings are optional - defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [app]
# name = "OhMyGPT"
# logo = "https://example.com/logo.png"
# theme_color = "#22c55e"
# summary = "Ask me any thing you want."
# example_input = "Ask me any thing."

# [identity]
# google_client_id = "....apps.googleusercontent.com"

# [endpoint]
# base_url = "http://localhost:3000"   # Or set OHMYGPT_ENDPOINT env var
"##;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_endpoint` is from the `--endpoint` flag (None = not specified).
pub fn resolve(config: &ClientConfig, cli_endpoint: Option<&str>) -> ResolvedConfig {
    let app_name = fill_default(
        env_or(config.app.name.clone(), "OHMYGPT_APP_NAME"),
        DEFAULT_APP_NAME,
    );

    // Logo has no default - absence is a valid, layout-affecting state
    let app_logo = env_or(config.app.logo.clone(), "OHMYGPT_APP_LOGO");

    let theme_color = fill_default(
        env_or(config.app.theme_color.clone(), "OHMYGPT_THEME_COLOR"),
        DEFAULT_THEME_COLOR,
    );

    let summary = fill_default(
        env_or(config.app.summary.clone(), "OHMYGPT_SUMMARY"),
        DEFAULT_SUMMARY,
    );

    let example_input = fill_default(
        env_or(config.app.example_input.clone(), "OHMYGPT_EXAMPLE_INPUT"),
        DEFAULT_EXAMPLE_INPUT,
    );

    let google_client_id = fill_default(
        env_or(
            config.identity.google_client_id.clone(),
            "OHMYGPT_GOOGLE_CLIENT_ID",
        ),
        DEFAULT_GOOGLE_CLIENT_ID,
    );

    // Endpoint: CLI → env → config → default
    let endpoint = non_empty(cli_endpoint.map(|s| s.to_string()))
        .or_else(|| env_or(config.endpoint.base_url.clone(), "OHMYGPT_ENDPOINT"))
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    // Access token for silent sign-in: env only, never from the config file
    let access_token = non_empty(std::env::var("OHMYGPT_ACCESS_TOKEN").ok());

    ResolvedConfig {
        app_name,
        app_logo,
        theme_color,
        summary,
        example_input,
        google_client_id,
        endpoint,
        access_token,
    }
}

/// Env var wins over the config-file value; empty values count as unset.
fn env_or(file_value: Option<String>, env_key: &str) -> Option<String> {
    non_empty(std::env::var(env_key).ok()).or_else(|| non_empty(file_value))
}

/// Treats `None` and `Some("")` alike, collapsing to the default.
fn fill_default(value: Option<String>, default: &str) -> String {
    non_empty(value).unwrap_or_else(|| default.to_string())
}

/// Converts an empty or missing string to None, non-empty to Some.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = ClientConfig::default();
        assert!(config.app.name.is_none());
        assert!(config.endpoint.base_url.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = ClientConfig::default();
        let resolved = resolve(&config, None);
        assert_eq!(resolved.app_name, DEFAULT_APP_NAME);
        assert_eq!(resolved.theme_color, DEFAULT_THEME_COLOR);
        assert_eq!(resolved.summary, DEFAULT_SUMMARY);
        assert_eq!(resolved.example_input, DEFAULT_EXAMPLE_INPUT);
        assert_eq!(resolved.endpoint, DEFAULT_ENDPOINT);
        assert!(resolved.app_logo.is_none());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = ClientConfig {
            app: AppConfig {
                name: Some("MyBot".to_string()),
                logo: Some("https://example.com/logo.png".to_string()),
                theme_color: Some("#ff0000".to_string()),
                summary: Some("Custom summary.".to_string()),
                example_input: Some("Try me.".to_string()),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, None);
        assert_eq!(resolved.app_name, "MyBot");
        assert_eq!(resolved.app_logo.as_deref(), Some("https://example.com/logo.png"));
        assert_eq!(resolved.theme_color, "#ff0000");
        assert_eq!(resolved.summary, "Custom summary.");
        assert_eq!(resolved.example_input, "Try me.");
    }

    #[test]
    fn test_resolve_cli_endpoint_wins() {
        let config = ClientConfig {
            endpoint: EndpointConfig {
                base_url: Some("http://config-host:4000".to_string()),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some("http://cli-host:5000"));
        assert_eq!(resolved.endpoint, "http://cli-host:5000");
    }

    #[test]
    fn test_fill_default_treats_empty_as_unset() {
        assert_eq!(fill_default(None, "fallback"), "fallback");
        assert_eq!(fill_default(Some(String::new()), "fallback"), "fallback");
        assert_eq!(fill_default(Some("value".to_string()), "fallback"), "value");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("x".to_string())), Some("x".to_string()));
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r##"
[app]
name = "MyBot"
theme_color = "#3b82f6"

[identity]
google_client_id = "test-client-id"

[endpoint]
base_url = "http://192.168.1.100:3000"
"##;
        let config: ClientConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.app.name.as_deref(), Some("MyBot"));
        assert_eq!(config.app.theme_color.as_deref(), Some("#3b82f6"));
        assert_eq!(config.app.summary, None);
        assert_eq!(
            config.identity.google_client_id.as_deref(),
            Some("test-client-id")
        );
        assert_eq!(
            config.endpoint.base_url.as_deref(),
            Some("http://192.168.1.100:3000")
        );
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing - everything else stays default
        let toml_str = r#"
[app]
summary = "Only this."
"#;
        let config: ClientConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.app.summary.as_deref(), Some("Only this."));
        assert!(config.app.name.is_none());
        assert!(config.identity.google_client_id.is_none());
    }
}
