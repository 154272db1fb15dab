//! n8n client configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Default timeout for HTTP requests: 30 seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Placeholder instance URL shipped with the deploy tooling.
pub const DEFAULT_N8N_URL: &str = "https://your-n8n-instance.com";

/// Path of the public REST API below the instance root.
const API_SEGMENTS: [&str; 2] = ["api", "v1"];

/// Configuration for the n8n REST API client.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct N8nConfig {
    /// Root URL of the n8n instance (a trailing `/api/v1` is accepted and ignored)
    #[cfg_attr(
        feature = "config",
        arg(long = "n8n-url", env = "N8N_URL", default_value = DEFAULT_N8N_URL)
    )]
    #[serde(default = "default_n8n_url")]
    pub n8n_url: String,

    /// API key used for the X-N8N-API-KEY header
    #[cfg_attr(
        feature = "config",
        arg(long = "n8n-api-key", env = "N8N_API_KEY", hide_env_values = true)
    )]
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// HTTP request timeout in seconds
    #[cfg_attr(
        feature = "config",
        arg(long = "http-timeout", env = "HTTP_TIMEOUT", default_value = "30")
    )]
    #[serde(default = "default_timeout_secs")]
    pub http_timeout: u64,

    /// User-Agent header to send with requests
    #[cfg_attr(
        feature = "config",
        arg(long = "http-user-agent", env = "HTTP_USER_AGENT")
    )]
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_n8n_url() -> String {
    DEFAULT_N8N_URL.to_owned()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl std::fmt::Debug for N8nConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("N8nConfig")
            .field("n8n_url", &self.n8n_url)
            .field("api_key", &"<redacted>")
            .field("http_timeout", &self.http_timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for N8nConfig {
    fn default() -> Self {
        Self {
            n8n_url: default_n8n_url(),
            api_key: String::new(),
            http_timeout: default_timeout_secs(),
            user_agent: None,
        }
    }
}

impl N8nConfig {
    /// Creates a configuration for the given instance and API key.
    pub fn new(n8n_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            n8n_url: n8n_url.into(),
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Replaces the instance URL.
    pub fn with_n8n_url(mut self, n8n_url: impl Into<String>) -> Self {
        self.n8n_url = n8n_url.into();
        self
    }

    /// Returns the effective timeout, using default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.http_timeout == 0 {
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.http_timeout)
        }
    }

    /// Returns the effective user agent, using default if not set.
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("citygraph/{}", env!("CARGO_PKG_VERSION")))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the instance URL is unusable or the
    /// API key is empty.
    pub fn validate(&self) -> Result<()> {
        self.instance_url()?;

        if self.api_key.trim().is_empty() {
            return Err(Error::configuration().with_message("n8n API key must not be empty"));
        }

        Ok(())
    }

    /// Returns the normalized instance root URL.
    ///
    /// Surrounding whitespace, query, fragment, trailing slashes and a trailing
    /// `/api/v1` are removed.
    pub fn instance_url(&self) -> Result<Url> {
        let raw = self.n8n_url.trim();
        let mut url = Url::parse(raw)
            .map_err(|e| Error::from(e).with_message(format!("invalid n8n URL '{raw}'")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::configuration().with_message(format!(
                "n8n URL '{raw}' must use http or https"
            )));
        }

        let path = url.path().trim_end_matches('/');
        let path = path
            .strip_suffix("/api/v1")
            .unwrap_or(path)
            .to_owned();

        url.set_path(&path);
        url.set_query(None);
        url.set_fragment(None);
        Ok(url)
    }

    /// Returns the REST API root, `<instance>/api/v1`.
    pub fn api_url(&self) -> Result<Url> {
        join(&self.instance_url()?, &API_SEGMENTS)
    }

    /// Returns the production webhook URL, `<instance>/webhook/<path>`.
    pub fn webhook_url(&self, path: &str) -> Result<Url> {
        let segments: Vec<&str> = std::iter::once("webhook")
            .chain(path.split('/').filter(|s| !s.is_empty()))
            .collect();

        join(&self.instance_url()?, &segments)
    }
}

/// Appends path segments to a base URL, percent-encoding each one.
pub(crate) fn join(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| {
            Error::configuration().with_message(format!("URL '{base}' cannot carry a path"))
        })?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(config: &N8nConfig, segments: &[&str]) -> Url {
        join(&config.api_url().unwrap(), segments).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = N8nConfig::default();
        assert_eq!(config.http_timeout, 30);
        assert!(config.user_agent.is_none());
        assert_eq!(config.n8n_url, DEFAULT_N8N_URL);
        assert_eq!(config.effective_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_api_url_appends_version() {
        let config = N8nConfig::new("https://n8n.example.com/", "key");
        assert_eq!(
            config.api_url().unwrap().as_str(),
            "https://n8n.example.com/api/v1"
        );
    }

    #[test]
    fn test_api_suffix_is_not_duplicated() {
        let config = N8nConfig::new("https://n8n.example.com/api/v1/", "key");
        assert_eq!(
            endpoint(&config, &["workflows"]).as_str(),
            "https://n8n.example.com/api/v1/workflows"
        );
    }

    #[test]
    fn test_subpath_instance() {
        let config = N8nConfig::new("http://localhost:5678/n8n", "key");
        assert_eq!(
            endpoint(&config, &["workflows", "7", "activate"]).as_str(),
            "http://localhost:5678/n8n/api/v1/workflows/7/activate"
        );
    }

    #[test]
    fn test_webhook_url() {
        let config = N8nConfig::new("https://n8n.example.com/api/v1", "key");
        assert_eq!(
            config.webhook_url("citygraph-webhook").unwrap().as_str(),
            "https://n8n.example.com/webhook/citygraph-webhook"
        );
    }

    #[test]
    fn test_segments_are_encoded() {
        let config = N8nConfig::new("https://n8n.example.com", "key");
        let url = endpoint(&config, &["workflows", "a b/c"]);
        assert_eq!(url.path(), "/api/v1/workflows/a%20b%2Fc");
    }

    #[test]
    fn test_validate() {
        assert!(N8nConfig::new("https://n8n.example.com", "key").validate().is_ok());
        assert!(N8nConfig::new("https://n8n.example.com", "  ").validate().is_err());
        assert!(N8nConfig::new("not a url", "key").validate().is_err());
        assert!(N8nConfig::new("ftp://n8n.example.com", "key").validate().is_err());
    }

    #[test]
    fn test_effective_timeout_uses_default_when_zero() {
        let config = N8nConfig {
            http_timeout: 0,
            ..N8nConfig::default()
        };
        assert_eq!(
            config.effective_timeout(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = N8nConfig::new("https://n8n.example.com", "super-secret");
        assert!(!format!("{config:?}").contains("super-secret"));

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("super-secret"));
    }
}
