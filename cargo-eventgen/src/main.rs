//! CLI entrypoint for `cargo-eventgen`.

mod cli;
mod metadata;

use std::process::ExitCode;

use cargo_eventgen::error::EventgenError;
use cargo_eventgen::resolve::{CargoResolver, DirectoryResolver};
use cargo_eventgen::{Generated, generate_with};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::cli::Args;
use crate::metadata::ModuleSource;

fn main() -> ExitCode {
    let args = cli::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(stage = %err.stage(), error = %err, "cargo-eventgen failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<Generated, EventgenError> {
    let cargo_metadata = cargo_eventgen::resolve::load_metadata(args.manifest_path.as_deref())?;
    let selection = metadata::select_package(&cargo_metadata, args.package.as_deref())?;
    let invocation = metadata::resolve_invocation(args, &selection)?;

    match invocation.source {
        ModuleSource::Package => {
            generate_with(&CargoResolver::new(cargo_metadata), &invocation.options)
        }
        ModuleSource::Directory { crate_name } => {
            let resolver = crate_name.map_or_else(DirectoryResolver::new, DirectoryResolver::with_crate_name);
            generate_with(&resolver, &invocation.options)
        }
    }
}

/// Logs to stderr at `warn`, raised by each `-v`; `RUST_LOG` takes precedence.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
