//! Packaged lookup tables and dictionary lookups with a fallback
//!
//! Lookup tables map short Argo codes (WMO instrument types, data centre
//! codes) to descriptive labels. They are shipped as JSON objects in the
//! assets directory and re-read on every call.

use crate::config::ArgoConfig;
use crate::errors::{ArgoError, Result};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::hash::{BuildHasher, Hash};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Label returned for codes missing from a table
pub const UNKNOWN: &str = "Unknown";

/// The closed set of packaged tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    /// WMO instrument type -> profiler description
    Profilers,
    /// Data centre code -> institution name
    Institutions,
}

impl LookupKind {
    pub const ALL: [LookupKind; 2] = [LookupKind::Profilers, LookupKind::Institutions];

    pub fn name(&self) -> &'static str {
        match self {
            LookupKind::Profilers => "profilers",
            LookupKind::Institutions => "institutions",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            LookupKind::Profilers => "dict_profilers.json",
            LookupKind::Institutions => "dict_institutions.json",
        }
    }
}

impl FromStr for LookupKind {
    type Err = ArgoError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "profilers" => Ok(LookupKind::Profilers),
            "institutions" => Ok(LookupKind::Institutions),
            other => Err(ArgoError::InvalidArgument(format!(
                "Invalid dictionary file '{}', expected one of: profilers, institutions",
                other
            ))),
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An immutable code -> label mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTable {
    kind: LookupKind,
    entries: HashMap<String, String>,
}

impl LookupTable {
    pub fn kind(&self) -> LookupKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    /// Label for `code`, or [`UNKNOWN`]
    pub fn label(&self, code: &str) -> &str {
        self.get(code).unwrap_or(UNKNOWN)
    }

    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.entries
    }

    /// Entries sorted by code
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort_unstable();
        entries
    }
}

/// Loader bound to an explicit assets directory
#[derive(Debug, Clone)]
pub struct LookupTables {
    assets_dir: PathBuf,
}

impl LookupTables {
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
        }
    }

    pub fn from_config(config: &ArgoConfig) -> Self {
        Self::new(&config.assets_dir)
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    pub fn path_for(&self, kind: LookupKind) -> PathBuf {
        self.assets_dir.join(kind.file_name())
    }

    /// Load a table by name; unknown names fail with `InvalidArgument`.
    pub fn load_dict(&self, name: &str) -> Result<LookupTable> {
        self.load(name.parse()?)
    }

    /// Read and deserialize a table. Nothing is cached between calls.
    pub fn load(&self, kind: LookupKind) -> Result<LookupTable> {
        let path = self.path_for(kind);
        debug!(table = kind.name(), path = %path.display(), "loading lookup table");

        let file = File::open(&path)?;
        let entries: HashMap<String, String> = serde_json::from_reader(BufReader::new(file))?;

        Ok(LookupTable { kind, entries })
    }
}

impl Default for LookupTables {
    fn default() -> Self {
        Self::from_config(&ArgoConfig::default())
    }
}

/// Load a packaged table from the default assets directory.
pub fn load_dict(name: &str) -> Result<LookupTable> {
    LookupTables::default().load_dict(name)
}

/// Result of [`mapp_dict`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mapped<'a, V> {
    Known(&'a V),
    Unknown,
}

impl<'a, V> Mapped<'a, V> {
    pub fn known(self) -> Option<&'a V> {
        match self {
            Mapped::Known(v) => Some(v),
            Mapped::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Mapped::Known(_))
    }
}

impl<V: fmt::Display> fmt::Display for Mapped<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mapped::Known(v) => v.fmt(f),
            Mapped::Unknown => f.write_str(UNKNOWN),
        }
    }
}

/// Look `key` up in `dict`, falling back to [`Mapped::Unknown`].
pub fn mapp_dict<'a, K, V, Q, S>(dict: &'a HashMap<K, V, S>, key: &Q) -> Mapped<'a, V>
where
    K: Borrow<Q> + Hash + Eq,
    Q: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    dict.get(key).map_or(Mapped::Unknown, Mapped::Known)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_lookup_kind_parsing() {
        assert_eq!("profilers".parse::<LookupKind>().unwrap(), LookupKind::Profilers);
        assert_eq!(
            "institutions".parse::<LookupKind>().unwrap(),
            LookupKind::Institutions
        );
        assert!(matches!(
            "Profilers".parse::<LookupKind>(),
            Err(ArgoError::InvalidArgument(_))
        ));
        assert_eq!(LookupKind::Institutions.to_string(), "institutions");
    }

    #[test]
    fn test_mapp_dict_fallback() {
        let mut dict = HashMap::new();
        dict.insert("A".to_string(), 1);

        assert_eq!(mapp_dict(&dict, "A"), Mapped::Known(&1));
        assert_eq!(mapp_dict(&dict, "A").to_string(), "1");
        assert_eq!(mapp_dict(&dict, "B"), Mapped::Unknown);
        assert_eq!(mapp_dict(&dict, "B").to_string(), "Unknown");
        assert!(mapp_dict(&dict, "B").known().is_none());
    }

    #[test]
    fn test_mapp_dict_integer_keys() {
        let dict: HashMap<u32, &str> = [(845, "Webb Research")].into_iter().collect();
        assert!(mapp_dict(&dict, &845).is_known());
        assert_eq!(mapp_dict(&dict, &0).to_string(), UNKNOWN);
    }

    #[test]
    fn test_load_from_custom_dir() {
        let dir = tempdir().expect("Failed to create temp dir");
        fs::write(
            dir.path().join("dict_institutions.json"),
            r#"{"IF": "Ifremer, France", "AO": "AOML, USA"}"#,
        )
        .unwrap();

        let tables = LookupTables::new(dir.path());
        let table = tables.load_dict("institutions").unwrap();
        assert_eq!(table.kind(), LookupKind::Institutions);
        assert_eq!(table.len(), 2);
        assert_eq!(table.label("IF"), "Ifremer, France");
        assert_eq!(table.label("XX"), UNKNOWN);
        assert_eq!(table.sorted()[0], ("AO", "AOML, USA"));
    }

    #[test]
    fn test_load_rereads_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("dict_profilers.json");
        fs::write(&path, r#"{"845": "Webb Research, no conductivity"}"#).unwrap();

        let tables = LookupTables::new(dir.path());
        assert_eq!(tables.load(LookupKind::Profilers).unwrap().len(), 1);

        fs::write(&path, r#"{"845": "a", "846": "b"}"#).unwrap();
        assert_eq!(tables.load(LookupKind::Profilers).unwrap().len(), 2);
    }

    #[test]
    fn test_malformed_table() {
        let dir = tempdir().expect("Failed to create temp dir");
        fs::write(dir.path().join("dict_profilers.json"), "not json").unwrap();

        let err = LookupTables::new(dir.path()).load_dict("profilers").unwrap_err();
        assert!(matches!(err, ArgoError::Json(_)));
    }

    #[test]
    fn test_missing_table_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let err = LookupTables::new(dir.path()).load_dict("profilers").unwrap_err();
        assert!(matches!(err, ArgoError::Io(_)));
    }

    #[test]
    fn test_invalid_name_checked_before_io() {
        let tables = LookupTables::new("/nonexistent/assets");
        assert!(matches!(
            tables.load_dict("floats"),
            Err(ArgoError::InvalidArgument(_))
        ));
    }
}
