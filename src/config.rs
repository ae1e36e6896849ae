//! Configuration shared by the argo_utils components
//!
//! Paths and endpoints are passed explicitly to the loaders and the backend
//! registry instead of being resolved from process-wide state.

use crate::errors::{ArgoError, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default ERDDAP server used by the `erddap` backend
pub const DEFAULT_ERDDAP_SERVER: &str = "https://www.ifremer.fr/erddap";

/// Environment variable overriding the lookup-table directory
pub const ENV_ASSETS_DIR: &str = "ARGO_ASSETS_DIR";
/// Environment variable overriding the ERDDAP server
pub const ENV_ERDDAP_SERVER: &str = "ARGO_ERDDAP_SERVER";
/// Environment variable pointing at a local copy of the GDAC FTP tree
pub const ENV_LOCAL_FTP: &str = "ARGO_LOCAL_FTP";
/// Environment variable setting the HTTP timeout, in seconds
pub const ENV_HTTP_TIMEOUT: &str = "ARGO_HTTP_TIMEOUT";

/// Configuration for argo_utils
#[derive(Debug, Clone, PartialEq)]
pub struct ArgoConfig {
    /// Directory holding the packaged lookup-table files
    pub assets_dir: PathBuf,
    /// Root URL of the ERDDAP server
    pub erddap_server: String,
    /// Root of a local GDAC FTP mirror, if any
    pub local_ftp: Option<PathBuf>,
    /// Request timeout; `None` waits indefinitely
    pub http_timeout: Option<Duration>,
}

impl Default for ArgoConfig {
    fn default() -> Self {
        Self {
            assets_dir: default_assets_dir(),
            erddap_server: DEFAULT_ERDDAP_SERVER.to_string(),
            local_ftp: None,
            http_timeout: None,
        }
    }
}

impl ArgoConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from the `ARGO_*` environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(dir) = non_empty_var(ENV_ASSETS_DIR) {
            config.assets_dir = PathBuf::from(dir);
        }
        if let Some(server) = non_empty_var(ENV_ERDDAP_SERVER) {
            config.erddap_server = server;
        }
        if let Some(root) = non_empty_var(ENV_LOCAL_FTP) {
            config.local_ftp = Some(PathBuf::from(root));
        }
        if let Some(raw) = non_empty_var(ENV_HTTP_TIMEOUT) {
            config.http_timeout = Some(parse_timeout(&raw)?);
        }

        Ok(config)
    }

    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    pub fn with_erddap_server(mut self, server: impl Into<String>) -> Self {
        self.erddap_server = server.into();
        self
    }

    pub fn with_local_ftp(mut self, root: impl Into<PathBuf>) -> Self {
        self.local_ftp = Some(root.into());
        self
    }

    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = Some(timeout);
        self
    }
}

/// The `assets/` directory shipped next to the crate manifest
pub fn default_assets_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
}

/// Parse a timeout given in (possibly fractional) seconds
pub fn parse_timeout(raw: &str) -> Result<Duration> {
    let secs: f64 = raw.trim().parse().map_err(|_| {
        ArgoError::InvalidArgument(format!("timeout must be a number of seconds, got '{raw}'"))
    })?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(ArgoError::InvalidArgument(format!(
            "timeout must be positive, got '{raw}'"
        )));
    }
    Duration::try_from_secs_f64(secs)
        .map_err(|e| ArgoError::InvalidArgument(format!("timeout '{raw}' is out of range: {e}")))
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ArgoConfig::new();
        assert!(config.assets_dir.ends_with("assets"));
        assert_eq!(config.erddap_server, DEFAULT_ERDDAP_SERVER);
        assert!(config.local_ftp.is_none());
        assert!(config.http_timeout.is_none());
    }

    #[test]
    fn test_builder_methods() {
        let config = ArgoConfig::new()
            .with_assets_dir("/tmp/assets")
            .with_erddap_server("https://erddap.example.org/erddap")
            .with_local_ftp("/data/gdac")
            .with_http_timeout(Duration::from_secs(10));

        assert_eq!(config.assets_dir, PathBuf::from("/tmp/assets"));
        assert_eq!(config.erddap_server, "https://erddap.example.org/erddap");
        assert_eq!(config.local_ftp, Some(PathBuf::from("/data/gdac")));
        assert_eq!(config.http_timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("30").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_timeout(" 1.5 ").unwrap(), Duration::from_millis(1500));
        assert!(matches!(parse_timeout("0"), Err(ArgoError::InvalidArgument(_))));
        assert!(matches!(parse_timeout("-3"), Err(ArgoError::InvalidArgument(_))));
        assert!(matches!(parse_timeout("soon"), Err(ArgoError::InvalidArgument(_))));
        assert!(matches!(parse_timeout("1e300"), Err(ArgoError::InvalidArgument(_))));
    }

    #[test]
    fn test_packaged_assets_dir_exists() {
        assert!(default_assets_dir().join("dict_profilers.json").is_file());
    }
}
