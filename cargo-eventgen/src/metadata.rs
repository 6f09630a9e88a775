//! Cargo metadata discovery and configuration layering for `cargo-eventgen`.
//!
//! Settings come from three layers: command-line flags, the consumer's
//! `[package.metadata.eventgen]` table, and built-in defaults. Paths given on
//! the command line are taken as-is; paths from the manifest resolve against
//! the consumer package root.

use camino::{Utf8Path, Utf8PathBuf};
use cargo_eventgen::error::EventgenError;
use cargo_eventgen::loader::DEFAULT_SUFFIX;
use cargo_eventgen::{GenerateOptions, OutputMode, resolve_relative};
use cargo_metadata::{Metadata, Package};
use serde::Deserialize;

use crate::cli::Args;

/// Metadata table read from the consumer manifest.
const METADATA_KEY: &str = "eventgen";
/// Output path used when neither layer names one.
const DEFAULT_OUTPUT: &str = "src/all_events.rs";

/// Deserialised `package.metadata.eventgen` defaults.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventgenMetadata {
    /// Cargo package declaring the events.
    pub module: Option<String>,
    /// Local source directory declaring the events.
    pub module_dir: Option<Utf8PathBuf>,
    /// Crate name used in type paths for `module_dir`.
    pub crate_name: Option<String>,
    /// Declarations file suffix.
    pub suffix: Option<String>,
    /// Event type path prefix.
    pub type_path: Option<String>,
    /// Generated file path.
    pub output: Option<Utf8PathBuf>,
}

/// Consumer package the registry is generated for.
#[derive(Debug, Clone)]
pub struct PackageSelection {
    /// Selected Cargo package name.
    pub package_name: String,
    /// Root directory containing the package manifest.
    pub package_root: Utf8PathBuf,
    /// Settings declared in the package manifest.
    pub settings: EventgenMetadata,
}

/// Where the event declarations come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleSource {
    /// A package in the consumer's dependency graph.
    Package,
    /// A local source directory.
    Directory {
        /// Crate name override for type paths.
        crate_name: Option<String>,
    },
}

/// Fully layered inputs for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Resolver to use.
    pub source: ModuleSource,
    /// Pipeline options.
    pub options: GenerateOptions,
}

/// Selects the consumer package and reads its `eventgen` metadata.
pub fn select_package(
    metadata: &Metadata,
    package: Option<&str>,
) -> Result<PackageSelection, EventgenError> {
    let selected = match package {
        Some(name) => find_package(metadata, name)?,
        None => metadata.root_package().ok_or_else(|| {
            EventgenError::Config(
                "no root package in this workspace; pass --package to choose one".to_owned(),
            )
        })?,
    };

    let package_root = selected
        .manifest_path
        .parent()
        .map(Utf8Path::to_path_buf)
        .ok_or_else(|| EventgenError::Config("package manifest has no parent".to_owned()))?;

    Ok(PackageSelection {
        package_name: selected.name.clone(),
        package_root,
        settings: parse_eventgen_metadata(selected)?,
    })
}

fn find_package<'a>(metadata: &'a Metadata, name: &str) -> Result<&'a Package, EventgenError> {
    metadata
        .workspace_packages()
        .into_iter()
        .find(|package| package.name == name)
        .ok_or_else(|| EventgenError::Config(format!("package `{name}` is not a workspace member")))
}

fn parse_eventgen_metadata(package: &Package) -> Result<EventgenMetadata, EventgenError> {
    let Some(value) = package.metadata.get(METADATA_KEY) else {
        return Ok(EventgenMetadata::default());
    };

    serde_json::from_value(value.clone()).map_err(EventgenError::MetadataJson)
}

/// Layers command-line flags over the package settings and defaults.
pub fn resolve_invocation(
    args: &Args,
    selection: &PackageSelection,
) -> Result<Invocation, EventgenError> {
    let settings = &selection.settings;
    let root = &selection.package_root;

    let (module, source) = if let Some(module) = &args.module {
        (module.clone(), ModuleSource::Package)
    } else if let Some(dir) = &args.module_dir {
        let crate_name = args.crate_name.clone().or_else(|| settings.crate_name.clone());
        (dir.to_string(), ModuleSource::Directory { crate_name })
    } else {
        module_from_settings(settings, root)?
    };

    let output = args.output.clone().unwrap_or_else(|| {
        let configured = settings.output.as_deref().unwrap_or(Utf8Path::new(DEFAULT_OUTPUT));
        resolve_relative(root, configured)
    });

    let options = GenerateOptions {
        module,
        suffix: args
            .suffix
            .clone()
            .or_else(|| settings.suffix.clone())
            .unwrap_or_else(|| DEFAULT_SUFFIX.to_owned()),
        type_path: args.type_path.clone().or_else(|| settings.type_path.clone()),
        output,
        mode: if args.should_check {
            OutputMode::Check
        } else {
            OutputMode::Write
        },
    };
    tracing::debug!(package = %selection.package_name, ?source, ?options, "resolved invocation");

    Ok(Invocation { source, options })
}

fn module_from_settings(
    settings: &EventgenMetadata,
    root: &Utf8Path,
) -> Result<(String, ModuleSource), EventgenError> {
    match (&settings.module, &settings.module_dir) {
        (Some(_), Some(_)) => Err(EventgenError::Config(
            "`module` and `module_dir` are mutually exclusive in package.metadata.eventgen"
                .to_owned(),
        )),
        (Some(module), None) => Ok((module.clone(), ModuleSource::Package)),
        (None, Some(dir)) => Ok((
            resolve_relative(root, dir).into_string(),
            ModuleSource::Directory {
                crate_name: settings.crate_name.clone(),
            },
        )),
        (None, None) => Err(EventgenError::Config(
            "no event module configured; pass --module or --module-dir, or set \
             package.metadata.eventgen.module"
                .to_owned(),
        )),
    }
}
