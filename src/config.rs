/// Configuration management for multi-authlib
use crate::error::{ProxyError, ProxyResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default base URL of the vendor profile API
pub const DEFAULT_VENDOR_API_URL: &str = "https://api.mojang.com";

/// Default base URL of the vendor session server
pub const DEFAULT_VENDOR_SESSION_URL: &str = "https://sessionserver.mojang.com";

/// One authentication server a player may belong to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSpec {
    pub name: String,
    /// Base URL of a mirror; empty or absent means the vendor
    #[serde(default)]
    pub url: Option<String>,
}

impl ServerSpec {
    pub fn vendor(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: Some(String::new()),
        }
    }

    pub fn mirror(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: Some(url.into()),
        }
    }

    /// Mirror base URL without trailing slash, `None` for the vendor
    pub fn mirror_base(&self) -> Option<&str> {
        self.url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .filter(|url| !url.is_empty())
    }
}

/// Main proxy configuration, read from a JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Seconds an ownership resolution stays valid
    #[serde(default = "default_max_cache_time", alias = "maxCacheTime")]
    pub max_cache_time: f64,

    /// User-Agent sent on every outbound request
    #[serde(default = "default_user_agent", alias = "userAgent")]
    pub useragent: String,

    /// Priority tiers, highest trust first
    #[serde(default)]
    pub servers: Vec<Vec<ServerSpec>>,

    /// Per-call deadline for outbound requests, in seconds
    #[serde(default = "default_request_timeout", alias = "requestTimeout")]
    pub request_timeout: f64,

    #[serde(default = "default_vendor_api_url", alias = "vendorApiUrl")]
    pub vendor_api_url: String,

    #[serde(default = "default_vendor_session_url", alias = "vendorSessionUrl")]
    pub vendor_session_url: String,
}

fn default_max_cache_time() -> f64 {
    3600.0
}

fn default_user_agent() -> String {
    format!(
        "Mozilla/5.0 (compatible; multi-authlib/{}; +https://github.com/isjerryxiao/multi-authlib)",
        env!("CARGO_PKG_VERSION")
    )
}

fn default_request_timeout() -> f64 {
    10.0
}

fn default_vendor_api_url() -> String {
    DEFAULT_VENDOR_API_URL.to_string()
}

fn default_vendor_session_url() -> String {
    DEFAULT_VENDOR_SESSION_URL.to_string()
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            max_cache_time: default_max_cache_time(),
            useragent: default_user_agent(),
            servers: vec![vec![
                ServerSpec::vendor("mojang"),
                ServerSpec::mirror("jerry", "https://bs.meson.cc/api/yggdrasil"),
            ]],
            request_timeout: default_request_timeout(),
            vendor_api_url: default_vendor_api_url(),
            vendor_session_url: default_vendor_session_url(),
        }
    }
}

impl ProxyConfig {
    /// Parse configuration from a JSON document
    pub fn from_json(raw: &str) -> ProxyResult<Self> {
        serde_json::from_str(raw)
            .map_err(|e| ProxyError::Config(format!("Invalid configuration file: {}", e)))
    }

    /// Load configuration from `path`, writing the defaults there first if
    /// the file does not exist yet
    pub fn load_or_bootstrap(path: &Path) -> ProxyResult<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "writing default configuration");
            let config = Self::default();
            std::fs::write(path, serde_json::to_string_pretty(&config)?)?;
            return Ok(config);
        }

        let raw = std::fs::read_to_string(path).map_err(|e| {
            ProxyError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    /// Validate configuration
    pub fn validate(&self) -> ProxyResult<()> {
        if !self.max_cache_time.is_finite() || self.max_cache_time < 0.0 {
            return Err(ProxyError::Config(
                "max_cache_time must be a non-negative number of seconds".to_string(),
            ));
        }

        if !self.request_timeout.is_finite() || self.request_timeout <= 0.0 {
            return Err(ProxyError::Config(
                "request_timeout must be a positive number of seconds".to_string(),
            ));
        }

        if self.useragent.trim().is_empty() {
            return Err(ProxyError::Config("useragent cannot be empty".to_string()));
        }

        for server in self.servers.iter().flatten() {
            if server.name.trim().is_empty() {
                return Err(ProxyError::Config("Server name cannot be empty".to_string()));
            }

            if let Some(base) = server.mirror_base() {
                if !base.starts_with("http://") && !base.starts_with("https://") {
                    return Err(ProxyError::Config(format!(
                        "Server {} has invalid url {}",
                        server.name, base
                    )));
                }
            }
        }

        if self.servers.iter().all(|tier| tier.is_empty()) {
            tracing::warn!("no authentication servers configured, every login will be rejected");
        }

        Ok(())
    }

    /// Cache TTL as a chrono duration
    pub fn max_cache_age(&self) -> chrono::Duration {
        chrono::Duration::milliseconds((self.max_cache_time * 1000.0) as i64)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.request_timeout)
    }
}
