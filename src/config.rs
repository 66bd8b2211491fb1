use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;
use std::path::Path;

/// API base used when TFC_URL is not set (the public SaaS endpoint).
pub const DEFAULT_TFC_URL: &str = "https://app.terraform.io";

/// Everything the two procedures need from the environment, resolved once at
/// process start and passed down explicitly.
#[derive(Debug, Clone)]
pub struct TfcConfig {
    /// Bearer credential for every API request
    pub token: String,
    /// API base URL
    pub url: String,
    /// Organization that owns the workspaces and projects
    pub organization: String,
    /// Certificate verification toggle, off unless SSL_VERIFY is truthy
    pub ssl_verify: bool,
    /// Project whose workspaces the unlock procedure targets (takes priority)
    pub project: Option<String>,
    /// Explicit workspace names for the unlock procedure
    pub workspaces: Vec<String>,
}

/// Raw view of the environment before validation.
#[derive(Debug, Deserialize)]
struct RawConfig {
    token: Option<String>,
    url: Option<String>,
    organization: Option<String>,
    ssl_verify: Option<String>,
    project: Option<String>,
    workspaces: Option<String>,
}

impl TfcConfig {
    /// Load configuration from environment variables prefixed with TFC_
    /// (TFC_TOKEN, TFC_URL, TFC_ORGANIZATION, TFC_PROJECT, TFC_WORKSPACES).
    /// SSL_VERIFY is historically unprefixed and read separately.
    pub fn load() -> Result<Self> {
        let raw: RawConfig = Config::builder()
            .add_source(Environment::with_prefix("TFC"))
            .build()?
            .try_deserialize()
            .context("Failed to read TFC_* environment variables")?;

        let ssl_verify = std::env::var("SSL_VERIFY")
            .ok()
            .or(raw.ssl_verify)
            .map(|value| is_truthy(&value))
            .unwrap_or(false);

        let token = raw.token.context("TFC_TOKEN must be set")?;
        let organization = raw.organization.context("TFC_ORGANIZATION must be set")?;
        let url = raw
            .url
            .unwrap_or_else(|| DEFAULT_TFC_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let workspaces = raw
            .workspaces
            .as_deref()
            .map(split_workspaces)
            .unwrap_or_default();

        Ok(Self {
            token,
            url,
            organization,
            ssl_verify,
            project: raw.project.filter(|p| !p.is_empty()),
            workspaces,
        })
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::debug!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// TFC_WORKSPACES is a comma-separated list of workspace names.
fn split_workspaces(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}
