//! Command-line interface definitions for `cargo-eventgen`.

use std::ffi::OsString;

use camino::Utf8PathBuf;
use clap::{ArgAction, Parser};

/// Name cargo passes as the first argument when run as `cargo eventgen`.
const SUBCOMMAND: &str = "eventgen";

/// Parsed CLI arguments for `cargo-eventgen`.
#[derive(Debug, Parser)]
#[command(name = "cargo-eventgen")]
#[command(about = "Generate a typed event registry from a crate's event declarations")]
#[command(version)]
pub struct Args {
    /// Path to the consumer's `Cargo.toml`.
    #[arg(long, value_name = "path")]
    pub manifest_path: Option<Utf8PathBuf>,
    /// Consumer package whose metadata and output path are used.
    #[arg(long)]
    pub package: Option<String>,
    /// Cargo package declaring the events.
    #[arg(long, conflicts_with = "module_dir")]
    pub module: Option<String>,
    /// Local source directory declaring the events, instead of a package.
    #[arg(long, value_name = "path")]
    pub module_dir: Option<Utf8PathBuf>,
    /// Crate name used in type paths when `--module-dir` is given.
    #[arg(long, requires = "module_dir", conflicts_with = "module")]
    pub crate_name: Option<String>,
    /// Path suffix of the declarations file (default `events.rs`).
    #[arg(long, value_name = "suffix")]
    pub suffix: Option<String>,
    /// Path prefix of the event types in generated code.
    #[arg(long, value_name = "path")]
    pub type_path: Option<String>,
    /// Generated file path (default `src/all_events.rs`).
    #[arg(long, short, value_name = "path")]
    pub output: Option<Utf8PathBuf>,
    /// Fail instead of writing when the generated file is out of date.
    #[arg(long = "check")]
    pub should_check: bool,
    /// Increase log detail (repeatable).
    #[arg(long, short, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Drops the subcommand name cargo inserts after the binary name.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.get(1).is_some_and(|arg| arg == SUBCOMMAND) {
        args.remove(1);
    }
    args
}

/// Parses the process arguments, exiting with usage on error.
pub fn parse() -> Args {
    Args::parse_from(normalize_args(std::env::args_os()))
}
