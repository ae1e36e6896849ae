//! Defines command-line interface options using `clap` for the argo-utils application.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Support tools for Argo float data access
#[derive(Parser, Debug)]
#[command(
    version,
    name = "argo-utils",
    about = "Fetch Argo data, inspect lookup tables and report the environment"
)]
pub struct Args {
    /// Enable verbose output.
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download a URL, reporting HTTP failures with status, body and URL
    Fetch {
        url: String,

        /// Write the body to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Request timeout in seconds. Defaults to ARGO_HTTP_TIMEOUT, or no timeout.
        #[arg(short, long, value_parser = parse_timeout_arg)]
        timeout: Option<std::time::Duration>,
    },

    /// Print a lookup table (profilers or institutions), or the label of one code
    Lookup {
        table: String,
        code: Option<String>,
    },

    /// List the data source backends available in this build
    Sources,

    /// List Argo variable names
    Variables {
        /// List the variables of a GDAC multi-profile file instead
        #[arg(long)]
        multiprofile: bool,
    },

    /// Compare the variables of a multi-profile NetCDF file with the known list
    CheckProfile { file: PathBuf },

    /// Print host information and dependency versions
    ShowVersions,
}

fn parse_timeout_arg(s: &str) -> Result<std::time::Duration, String> {
    argo_utils::config::parse_timeout(s).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fetch() {
        let args = Args::parse_from([
            "argo-utils",
            "fetch",
            "https://example.com/data.csv",
            "--timeout",
            "2.5",
        ]);
        match args.command {
            Command::Fetch { url, output, timeout } => {
                assert_eq!(url, "https://example.com/data.csv");
                assert!(output.is_none());
                assert_eq!(timeout, Some(std::time::Duration::from_millis(2500)));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_lookup_and_verbose() {
        let args = Args::parse_from(["argo-utils", "lookup", "profilers", "845", "-v"]);
        assert!(args.verbose);
        assert!(matches!(
            args.command,
            Command::Lookup { ref table, code: Some(ref code) }
                if table == "profilers" && code == "845"
        ));
    }

    #[test]
    fn test_rejects_bad_timeout() {
        for timeout in ["never", "1e300"] {
            let args = ["argo-utils", "fetch", "https://x.org", "-t", timeout];
            assert!(Args::try_parse_from(args).is_err());
        }
    }
}
