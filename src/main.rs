//! Entry point for the argo-utils application.
//! Handles CLI parsing, logging setup, and dispatches to the library operations.

use argo_utils::{
    check_multiprofile_file, list_available_data_src_with, list_multiprofile_file_variables,
    list_standard_variables, show_versions, ArgoConfig, Fetcher, FetcherConfig, LookupTables,
};
use clap::Parser;
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Args, Command};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = ArgoConfig::from_env()?;

    match args.command {
        Command::Fetch {
            url,
            output,
            timeout,
        } => {
            let fetcher_config =
                FetcherConfig::new().with_optional_timeout(timeout.or(config.http_timeout));
            let mut data = Fetcher::new(&fetcher_config)?.urlopen(&url).await?;

            let mut body = Vec::new();
            data.read_to_end(&mut body)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &body)?;
                    println!("✅ Saved {} bytes to {}", body.len(), path.display());
                }
                None => io::stdout().write_all(&body)?,
            }
        }
        Command::Lookup { table, code } => {
            let table = LookupTables::from_config(&config).load_dict(&table)?;
            match code {
                Some(code) => println!("{}", table.label(&code)),
                None => {
                    for (code, label) in table.sorted() {
                        println!("{}: {}", code, label);
                    }
                }
            }
        }
        Command::Sources => {
            let sources = list_available_data_src_with(&config);
            if sources.is_empty() {
                println!("   (No data sources available)");
            }
            for (name, backend) in &sources {
                println!("- {} ({}): {}", name, backend.long_name(), backend.location());
            }
        }
        Command::Variables { multiprofile } => {
            let names = if multiprofile {
                list_multiprofile_file_variables()
            } else {
                list_standard_variables()
            };
            for name in names {
                println!("{}", name);
            }
        }
        Command::CheckProfile { file } => {
            let report = check_multiprofile_file(&file)?;
            report.print();
            if report.is_complete() {
                println!("\n✅ {} has every multi-profile variable", file.display());
            }
        }
        Command::ShowVersions => show_versions()?,
    }

    Ok(())
}
