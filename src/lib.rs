//! argo_utils: support utilities for Argo float data access
//!
//! A small library backing Argo data fetchers and tooling. It bundles the
//! pieces every fetcher needs but none owns: HTTP retrieval with readable
//! errors, code lookup tables, the registry of data source backends and an
//! environment report for bug reports.
//!
//! ## Module Organization
//!
//! - [`fetcher`]: single-request HTTP fetching with typed status errors
//! - [`lookup`]: packaged lookup tables and `Unknown`-fallback lookups
//! - [`variables`]: fixed lists of Argo variable names
//! - [`data_source`]: registry of the optional `erddap` / `localftp` backends
//! - [`versions`]: host information and dependency version report
//! - [`profile_file`]: variable check of GDAC multi-profile NetCDF files
//! - [`config`]: explicit configuration, read from `ARGO_*` variables
//! - [`errors`]: centralized error handling
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use argo_utils::prelude::*;
//!
//! # async fn run() -> argo_utils::Result<()> {
//! // Fetch a resource; 404 / 500 / other statuses come back as typed errors
//! let data = argo_utils::urlopen("https://www.ifremer.fr/erddap/info/index.csv").await?;
//!
//! // Describe an instrument type, falling back to "Unknown"
//! let profilers = load_dict("profilers")?;
//! println!("{}", profilers.label("846"));
//!
//! // See which backends this build can use
//! for name in list_available_data_src().keys() {
//!     println!("{}", name);
//! }
//!
//! // Print the environment report
//! show_versions()?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data_source;
pub mod errors;
pub mod fetcher;
pub mod lookup;
pub mod profile_file;
pub mod variables;
pub mod versions;

// Direct re-exports for the public API
pub use config::*;
pub use data_source::*;
pub use errors::*;
pub use fetcher::*;
pub use lookup::*;
pub use profile_file::*;
pub use variables::*;
pub use versions::*;

// High-level convenience API
pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::config::ArgoConfig;
    pub use crate::data_source::{list_available_data_src, AvailableSources, DataSourceBackend};
    pub use crate::errors::{ArgoError, Result};
    pub use crate::fetcher::{Fetcher, FetcherConfig};
    pub use crate::lookup::{load_dict, mapp_dict, LookupKind, LookupTable, LookupTables, Mapped};
    pub use crate::variables::{list_multiprofile_file_variables, list_standard_variables};
    pub use crate::versions::show_versions;
}
