//! Host environment and dependency version reporting
//!
//! [`show_versions`] prints the system information followed by one line per
//! declared dependency. Nothing here fails because of a missing tool: every
//! probe degrades to `installed` or `None`.

use crate::errors::Result;
use regex::Regex;
use std::env;
use std::ffi::CStr;
use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::sync::LazyLock;
use std::thread;
use std::time::{Duration, Instant};
use sysinfo::{CpuRefreshKind, RefreshKind, System};
use tracing::debug;

/// Compiler version recorded by the build script
pub const RUSTC_VERSION: &str = env!("ARGO_UTILS_RUSTC_VERSION");

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+(?:\.\d+)+(?:[-+][0-9A-Za-z.]+)?").expect("version pattern is valid")
});

/// How long a version command may run before it is killed
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

const PROBE_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// What a dependency probe found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyStatus {
    Version(String),
    /// Present, version could not be determined
    Installed,
    Missing,
}

impl fmt::Display for DependencyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyStatus::Version(v) => f.write_str(v),
            DependencyStatus::Installed => f.write_str("installed"),
            DependencyStatus::Missing => f.write_str("None"),
        }
    }
}

/// One row of the dependency section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRecord {
    pub name: String,
    pub status: DependencyStatus,
}

/// Detects one optional dependency
pub trait DependencyProbe {
    fn name(&self) -> &str;

    /// Must not panic; failures map to `Installed` or `Missing`.
    fn probe(&self) -> DependencyStatus;
}

/// A dependency whose version is known at build time
#[derive(Debug, Clone)]
pub struct BuiltinProbe {
    pub name: &'static str,
    pub version: &'static str,
}

impl DependencyProbe for BuiltinProbe {
    fn name(&self) -> &str {
        self.name
    }

    fn probe(&self) -> DependencyStatus {
        DependencyStatus::Version(self.version.to_string())
    }
}

/// An external executable located on `PATH` and asked for its version
#[derive(Debug, Clone)]
pub struct CommandProbe {
    pub program: &'static str,
    pub args: &'static [&'static str],
    pub timeout: Duration,
}

impl CommandProbe {
    pub const fn new(program: &'static str, args: &'static [&'static str]) -> Self {
        Self {
            program,
            args,
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run the version command. `None` when it outlived `self.timeout`.
    fn run(&self, path: &Path) -> io::Result<Option<Output>> {
        let mut child = Command::new(path)
            .args(self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let deadline = Instant::now() + self.timeout;
        loop {
            if child.try_wait()?.is_some() {
                return child.wait_with_output().map(Some);
            }
            if Instant::now() >= deadline {
                // Already exited between the two checks is fine.
                let _ = child.kill();
                child.wait()?;
                return Ok(None);
            }
            thread::sleep(PROBE_POLL_INTERVAL);
        }
    }
}

impl DependencyProbe for CommandProbe {
    fn name(&self) -> &str {
        self.program
    }

    fn probe(&self) -> DependencyStatus {
        let Ok(path) = which::which(self.program) else {
            return DependencyStatus::Missing;
        };

        let output = match self.run(&path) {
            Ok(Some(output)) => output,
            Ok(None) => {
                let timeout = self.timeout;
                debug!(program = self.program, ?timeout, "version command timed out");
                return DependencyStatus::Installed;
            }
            Err(e) => {
                debug!(program = self.program, error = %e, "version command failed");
                return DependencyStatus::Installed;
            }
        };

        // Some tools print their version on stderr, some exit non-zero.
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        parse_version(&stdout)
            .or_else(|| parse_version(&stderr))
            .map_or(DependencyStatus::Installed, DependencyStatus::Version)
    }
}

/// First dotted version number found in `text`
pub fn parse_version(text: &str) -> Option<String> {
    VERSION_RE.find(text).map(|m| m.as_str().to_string())
}

/// The declared dependencies, in report order
pub fn declared_dependencies() -> Vec<Box<dyn DependencyProbe>> {
    vec![
        Box::new(BuiltinProbe {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }),
        // NetCDF / HDF5 tooling
        Box::new(CommandProbe::new("nc-config", &["--version"])),
        Box::new(CommandProbe::new("ncdump", &[])),
        Box::new(CommandProbe::new("h5dump", &["--version"])),
        Box::new(CommandProbe::new("ncks", &["--version"])),
        Box::new(CommandProbe::new("cdo", &["--version"])),
        // Geospatial
        Box::new(CommandProbe::new("gdalinfo", &["--version"])),
        Box::new(CommandProbe::new("ogr2ogr", &["--version"])),
        Box::new(CommandProbe::new("proj", &[])),
        Box::new(CommandProbe::new("codes_info", &["-v"])),
        // Analysis environments
        Box::new(CommandProbe::new("python3", &["--version"])),
        Box::new(CommandProbe::new("pip3", &["--version"])),
        Box::new(CommandProbe::new("conda", &["--version"])),
        Box::new(CommandProbe::new("jupyter", &["--version"])),
        Box::new(CommandProbe::new("R", &["--version"])),
        Box::new(CommandProbe::new("julia", &["--version"])),
        Box::new(CommandProbe::new("octave", &["--version"])),
        // Transfer
        Box::new(CommandProbe::new("git", &["--version"])),
        Box::new(CommandProbe::new("curl", &["--version"])),
        Box::new(CommandProbe::new("wget", &["--version"])),
        Box::new(CommandProbe::new("lftp", &["--version"])),
        Box::new(CommandProbe::new("rsync", &["--version"])),
        Box::new(CommandProbe::new("ssh", &["-V"])),
        // Misc.
        Box::new(CommandProbe::new("tar", &["--version"])),
        Box::new(CommandProbe::new("gzip", &["--version"])),
        Box::new(CommandProbe::new("zstd", &["--version"])),
        Box::new(CommandProbe::new("pkg-config", &["--version"])),
    ]
}

/// Run every probe, keeping declaration order
pub fn collect_versions(probes: &[Box<dyn DependencyProbe>]) -> Vec<DependencyRecord> {
    probes
        .iter()
        .map(|probe| DependencyRecord {
            name: probe.name().to_string(),
            status: probe.probe(),
        })
        .collect()
}

/// Host facts as `(key, value)` pairs, in report order
pub fn get_sys_info() -> Vec<(&'static str, Option<String>)> {
    let processor = System::new_with_specifics(
        RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing()),
    )
    .cpus()
    .first()
    .map(|cpu| cpu.brand().trim().to_string())
    .filter(|brand| !brand.is_empty());

    vec![
        ("commit", git_commit()),
        ("rustc", Some(RUSTC_VERSION.to_string())),
        ("rust-bits", Some(usize::BITS.to_string())),
        (
            "OS",
            Some(System::name().unwrap_or_else(|| env::consts::OS.to_string())),
        ),
        ("OS-release", System::kernel_version()),
        ("machine", Some(env::consts::ARCH.to_string())),
        ("processor", processor),
        ("byteorder", Some(byte_order().to_string())),
        ("LC_ALL", Some(env_or_none("LC_ALL"))),
        ("LANG", Some(env_or_none("LANG"))),
        ("LOCALE", Some(current_locale())),
        ("libhdf5", hdf5_library_version()),
        ("libnetcdf", netcdf_library_version()),
    ]
}

/// Version of the HDF5 library linked into this binary
fn hdf5_library_version() -> Option<String> {
    let _guard = hdf5_sys::LOCK.lock();
    let (mut major, mut minor, mut release) = (0, 0, 0);
    // SAFETY: the out-pointers are valid for the duration of the call.
    let status = unsafe { hdf5_sys::h5::H5get_libversion(&mut major, &mut minor, &mut release) };
    (status >= 0).then(|| format!("{major}.{minor}.{release}"))
}

/// Version of the netCDF-C library linked into this binary
fn netcdf_library_version() -> Option<String> {
    let _guard = netcdf_sys::libnetcdf_lock.lock();
    // SAFETY: nc_inq_libvers returns a static NUL-terminated string or null.
    let raw = unsafe { netcdf_sys::nc_inq_libvers() };
    if raw.is_null() {
        return None;
    }
    // SAFETY: checked non-null above; the string lives for the whole program.
    let text = unsafe { CStr::from_ptr(raw) }.to_string_lossy();
    parse_version(&text)
}

/// Full hash of HEAD when run from a checkout; any failure gives `None`.
fn git_commit() -> Option<String> {
    if !Path::new(".git").is_dir() {
        return None;
    }
    let output = Command::new("git")
        .args(["log", "--format=%H", "-n", "1"])
        .stdin(Stdio::null())
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let commit = String::from_utf8(output.stdout).ok()?;
    let commit = commit.trim().trim_matches('"');
    (!commit.is_empty()).then(|| commit.to_string())
}

fn byte_order() -> &'static str {
    if cfg!(target_endian = "little") {
        "little"
    } else {
        "big"
    }
}

fn env_or_none(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| "None".to_string())
}

fn current_locale() -> String {
    let raw = ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .find_map(|key| env::var(key).ok().filter(|v| !v.is_empty()));
    let (language, encoding) = split_locale(raw.as_deref());
    format!(
        "{}.{}",
        language.unwrap_or("None"),
        encoding.unwrap_or("None")
    )
}

/// Split `en_US.UTF-8@euro` into `(Some("en_US"), Some("UTF-8"))`.
/// The `C` and `POSIX` locales have neither part.
pub fn split_locale(raw: Option<&str>) -> (Option<&str>, Option<&str>) {
    let Some(raw) = raw else {
        return (None, None);
    };
    let raw = raw.split('@').next().unwrap_or(raw);
    if raw.is_empty() || raw == "C" || raw == "POSIX" {
        return (None, None);
    }
    match raw.split_once('.') {
        Some((language, encoding)) => (
            Some(language).filter(|l| !l.is_empty()),
            Some(encoding).filter(|e| !e.is_empty()),
        ),
        None => (Some(raw), None),
    }
}

/// Write the report for already collected data
pub fn render_report<W: Write>(
    out: &mut W,
    sys_info: &[(&str, Option<String>)],
    deps: &[DependencyRecord],
) -> io::Result<()> {
    writeln!(out, "\nINSTALLED VERSIONS")?;
    writeln!(out, "------------------")?;

    for (key, value) in sys_info {
        writeln!(out, "{}: {}", key, value.as_deref().unwrap_or("None"))?;
    }

    writeln!(out)?;
    for dep in deps {
        writeln!(out, "{}: {}", dep.name, dep.status)?;
    }

    Ok(())
}

/// Print the versions of argo_utils and its dependencies to `out`
pub fn show_versions_to<W: Write>(out: &mut W) -> Result<()> {
    let sys_info = get_sys_info();
    let deps = collect_versions(&declared_dependencies());
    render_report(out, &sys_info, &deps)?;
    Ok(())
}

/// Print the versions of argo_utils and its dependencies to stdout
pub fn show_versions() -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    show_versions_to(&mut handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProbe(&'static str, DependencyStatus);

    impl DependencyProbe for FixedProbe {
        fn name(&self) -> &str {
            self.0
        }

        fn probe(&self) -> DependencyStatus {
            self.1.clone()
        }
    }

    #[test]
    fn test_parse_version() {
        assert_eq!(parse_version("git version 2.43.0"), Some("2.43.0".to_string()));
        assert_eq!(parse_version("h5dump: Version 1.12.1"), Some("1.12.1".to_string()));
        assert_eq!(parse_version("Python 3.11.4\n"), Some("3.11.4".to_string()));
        assert_eq!(parse_version("zstd v1.5.5-rc1"), Some("1.5.5-rc1".to_string()));
        assert_eq!(parse_version("no digits here"), None);
        assert_eq!(parse_version("build 42"), None);
    }

    #[test]
    fn test_dependency_status_display() {
        assert_eq!(DependencyStatus::Version("1.2".into()).to_string(), "1.2");
        assert_eq!(DependencyStatus::Installed.to_string(), "installed");
        assert_eq!(DependencyStatus::Missing.to_string(), "None");
    }

    #[test]
    fn test_missing_command_probe() {
        let probe = CommandProbe::new("argo-utils-definitely-not-installed", &["--version"]);
        assert_eq!(probe.probe(), DependencyStatus::Missing);
    }

    #[test]
    fn test_collect_versions_keeps_order() {
        let probes: Vec<Box<dyn DependencyProbe>> = vec![
            Box::new(FixedProbe("zarr", DependencyStatus::Missing)),
            Box::new(FixedProbe("argo", DependencyStatus::Version("0.1".into()))),
            Box::new(FixedProbe("cdo", DependencyStatus::Installed)),
        ];
        let records = collect_versions(&probes);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["zarr", "argo", "cdo"]);
        assert_eq!(records[2].status, DependencyStatus::Installed);
    }

    #[test]
    fn test_render_report_layout() {
        let sys_info = vec![("commit", None), ("rust-bits", Some("64".to_string()))];
        let deps = vec![
            DependencyRecord {
                name: "argo_utils".into(),
                status: DependencyStatus::Version("0.1.0".into()),
            },
            DependencyRecord {
                name: "cdo".into(),
                status: DependencyStatus::Missing,
            },
        ];
        let mut out = Vec::new();
        render_report(&mut out, &sys_info, &deps).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            concat!(
                "\nINSTALLED VERSIONS\n------------------\n",
                "commit: None\nrust-bits: 64\n\n",
                "argo_utils: 0.1.0\ncdo: None\n"
            )
        );
    }

    #[test]
    fn test_split_locale() {
        assert_eq!(
            split_locale(Some("en_US.UTF-8")),
            (Some("en_US"), Some("UTF-8"))
        );
        assert_eq!(
            split_locale(Some("de_DE.ISO-8859-1@euro")),
            (Some("de_DE"), Some("ISO-8859-1"))
        );
        assert_eq!(split_locale(Some("fr_FR")), (Some("fr_FR"), None));
        assert_eq!(split_locale(Some("C")), (None, None));
        assert_eq!(split_locale(None), (None, None));
    }

    #[test]
    fn test_sys_info_keys() {
        let keys: Vec<_> = get_sys_info().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            [
                "commit",
                "rustc",
                "rust-bits",
                "OS",
                "OS-release",
                "machine",
                "processor",
                "byteorder",
                "LC_ALL",
                "LANG",
                "LOCALE",
                "libhdf5",
                "libnetcdf"
            ]
        );
    }

    #[test]
    fn test_linked_library_versions() {
        let info = get_sys_info();
        for key in ["libhdf5", "libnetcdf"] {
            let value = info
                .iter()
                .find(|(k, _)| *k == key)
                .and_then(|(_, v)| v.clone())
                .unwrap_or_else(|| panic!("{key} version not reported"));
            assert_eq!(parse_version(&value).as_deref(), Some(value.as_str()));
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_slow_command_is_killed() {
        let probe = CommandProbe::new("sleep", &["30"]).with_timeout(Duration::from_millis(200));
        let started = Instant::now();
        assert_eq!(probe.probe(), DependencyStatus::Installed);
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_default_probe_timeout() {
        let probe = CommandProbe::new("git", &["--version"]);
        assert_eq!(probe.timeout, DEFAULT_PROBE_TIMEOUT);
    }

    #[test]
    fn test_declared_dependencies() {
        let deps = declared_dependencies();
        assert_eq!(deps.len(), 27);
        assert_eq!(deps[0].name(), "argo_utils");
        assert_eq!(
            deps[0].probe(),
            DependencyStatus::Version(env!("CARGO_PKG_VERSION").into())
        );
    }
}
