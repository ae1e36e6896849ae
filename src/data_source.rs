//! Registry of the optional data source backends
//!
//! Each known backend is probed in a fixed order. Backends that load are
//! registered under their name; the others are skipped with a warning so the
//! registry degrades instead of failing.

use crate::config::ArgoConfig;
use crate::errors::{ArgoError, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// A data source backend able to serve Argo data
pub trait DataSourceBackend: fmt::Debug + Send + Sync {
    /// Registry key
    fn name(&self) -> &'static str;

    /// Human readable name
    fn long_name(&self) -> &'static str;

    /// Where the backend reads from
    fn location(&self) -> String;
}

/// Fetches data from an ERDDAP server
#[derive(Debug, Clone)]
pub struct ErddapBackend {
    pub server: Url,
}

impl DataSourceBackend for ErddapBackend {
    fn name(&self) -> &'static str {
        "erddap"
    }

    fn long_name(&self) -> &'static str {
        "ERDDAP"
    }

    fn location(&self) -> String {
        self.server.to_string()
    }
}

/// Reads data from a local copy of the GDAC FTP tree
#[derive(Debug, Clone)]
pub struct LocalFtpBackend {
    pub root: Option<PathBuf>,
}

impl DataSourceBackend for LocalFtpBackend {
    fn name(&self) -> &'static str {
        "localftp"
    }

    fn long_name(&self) -> &'static str {
        "local FTP"
    }

    fn location(&self) -> String {
        match &self.root {
            Some(root) => root.display().to_string(),
            None => "(not configured)".to_string(),
        }
    }
}

/// Probe for one backend
pub trait BackendLoader {
    fn name(&self) -> &'static str;

    fn long_name(&self) -> &'static str;

    fn load(&self) -> Result<Arc<dyn DataSourceBackend>>;
}

/// Loads [`ErddapBackend`]; needs the `erddap` feature and a valid server URL
#[derive(Debug, Clone)]
pub struct ErddapLoader {
    pub server: String,
}

impl BackendLoader for ErddapLoader {
    fn name(&self) -> &'static str {
        "erddap"
    }

    fn long_name(&self) -> &'static str {
        "ERDDAP"
    }

    fn load(&self) -> Result<Arc<dyn DataSourceBackend>> {
        if !cfg!(feature = "erddap") {
            return Err(feature_disabled(self.name()));
        }
        let server = Url::parse(&self.server)?;
        Ok(Arc::new(ErddapBackend { server }))
    }
}

/// Loads [`LocalFtpBackend`]; needs the `localftp` feature and, when a root is
/// configured, an existing directory
#[derive(Debug, Clone)]
pub struct LocalFtpLoader {
    pub root: Option<PathBuf>,
}

impl BackendLoader for LocalFtpLoader {
    fn name(&self) -> &'static str {
        "localftp"
    }

    fn long_name(&self) -> &'static str {
        "local FTP"
    }

    fn load(&self) -> Result<Arc<dyn DataSourceBackend>> {
        if !cfg!(feature = "localftp") {
            return Err(feature_disabled(self.name()));
        }
        if let Some(root) = &self.root {
            if !root.is_dir() {
                return Err(ArgoError::BackendUnavailable {
                    name: self.name().to_string(),
                    reason: format!("local FTP root {} is not a directory", root.display()),
                });
            }
        }
        Ok(Arc::new(LocalFtpBackend {
            root: self.root.clone(),
        }))
    }
}

fn feature_disabled(name: &str) -> ArgoError {
    ArgoError::BackendUnavailable {
        name: name.to_string(),
        reason: format!("compiled without the `{name}` feature"),
    }
}

/// Registered backends, keyed by name
pub type AvailableSources = BTreeMap<&'static str, Arc<dyn DataSourceBackend>>;

/// A backend that failed to load
#[derive(Debug)]
pub struct BackendFailure {
    pub name: &'static str,
    pub error: ArgoError,
}

/// Outcome of probing a set of backends
#[derive(Debug, Default)]
pub struct ProbeReport {
    pub available: AvailableSources,
    pub failures: Vec<BackendFailure>,
}

/// The known backends, in probe order
pub fn default_loaders(config: &ArgoConfig) -> Vec<Box<dyn BackendLoader>> {
    vec![
        Box::new(ErddapLoader {
            server: config.erddap_server.clone(),
        }),
        Box::new(LocalFtpLoader {
            root: config.local_ftp.clone(),
        }),
    ]
}

/// Probe `loaders` in order. Never fails: failures are logged and collected.
pub fn probe_backends(loaders: &[Box<dyn BackendLoader>]) -> ProbeReport {
    let mut report = ProbeReport::default();

    for loader in loaders {
        match loader.load() {
            Ok(backend) => {
                let location = backend.location();
                debug!(backend = loader.name(), %location, "data source loaded");
                report.available.insert(loader.name(), backend);
            }
            Err(error) => {
                warn!(
                    "An error occurred while loading the {} data fetcher, \
                     it will not be available !\n{}\n{}",
                    loader.long_name(),
                    error.kind(),
                    error
                );
                report.failures.push(BackendFailure {
                    name: loader.name(),
                    error,
                });
            }
        }
    }

    report
}

/// List all available data sources for `config`
pub fn list_available_data_src_with(config: &ArgoConfig) -> AvailableSources {
    probe_backends(&default_loaders(config)).available
}

/// List all available data sources with the default configuration
pub fn list_available_data_src() -> AvailableSources {
    list_available_data_src_with(&ArgoConfig::default())
}
