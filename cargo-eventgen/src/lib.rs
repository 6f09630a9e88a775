//! Library interface for `cargo-eventgen`.
//!
//! `cargo-eventgen` reads the event declarations of a crate (by default the
//! public types in its `events.rs`) and generates a registry module exposing
//! them as name constants, an `EventKind` factory, and typed accessors over
//! a type-erased payload. The pipeline runs resolve, load, build, render and
//! write in order and stops at the first failure.
//!
//! Build scripts can call [`generate`] directly, or [`generate_with`] to
//! supply their own [`ModuleResolver`]:
//!
//! ```no_run
//! use cargo_eventgen::GenerateOptions;
//!
//! # fn main() -> Result<(), cargo_eventgen::error::EventgenError> {
//! let options = GenerateOptions::new("gateway_events", "src/all_events.rs");
//! cargo_eventgen::generate(&options)?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod fs_helpers;
pub mod loader;
pub mod model;
pub mod naming;
pub mod output;
pub mod render;
pub mod resolve;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::EventgenError;
use crate::loader::{DEFAULT_SUFFIX, DeclarationUnit};
use crate::model::EventModel;
use crate::output::WriteOutcome;
use crate::render::RenderContext;
use crate::resolve::{ModuleResolver, ResolvedModule};

/// Whether the rendered registry is written or compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Atomically write the output file.
    #[default]
    Write,
    /// Fail when the output file is missing or differs.
    Check,
}

/// Inputs for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Module identifier handed to the resolver.
    pub module: String,
    /// Suffix selecting the declarations file.
    pub suffix: String,
    /// Override for the event type path prefix.
    pub type_path: Option<String>,
    /// Generated file path.
    pub output: Utf8PathBuf,
    /// Write or check.
    pub mode: OutputMode,
}

impl GenerateOptions {
    /// Creates options with the default suffix, derived type paths and write mode.
    #[must_use]
    pub fn new(module: impl Into<String>, output: impl Into<Utf8PathBuf>) -> Self {
        Self {
            module: module.into(),
            suffix: DEFAULT_SUFFIX.to_owned(),
            type_path: None,
            output: output.into(),
            mode: OutputMode::Write,
        }
    }
}

/// Rendered registry and the inputs it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Resolved source module.
    pub module: ResolvedModule,
    /// Declarations file that was parsed.
    pub unit: DeclarationUnit,
    /// Event model derived from the declarations.
    pub model: EventModel,
    /// Generated Rust source.
    pub source: String,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// Declarations file, absolute or relative to the working directory.
    pub source_file: Utf8PathBuf,
    /// Generated file path.
    pub output: Utf8PathBuf,
    /// Number of concrete events, catch-all excluded.
    pub events: usize,
    /// What happened to the output file.
    pub outcome: WriteOutcome,
}

/// Resolves, loads, builds and renders without touching the output file.
///
/// # Errors
///
/// Returns the first stage failure.
pub fn render_with<R>(resolver: &R, options: &GenerateOptions) -> Result<Rendered, EventgenError>
where
    R: ModuleResolver + ?Sized,
{
    let module = resolver.resolve(&options.module)?;
    let unit = loader::load(&module, &options.suffix)?;
    let model = EventModel::build(&unit.declarations)?;

    let type_path = options
        .type_path
        .clone()
        .unwrap_or_else(|| default_type_path(&module.crate_ident, &unit.module_path));
    let context = RenderContext {
        module: &module.name,
        source_file: &unit.path,
        type_path: &type_path,
    };
    let source = render::render(&model, &context)?;

    Ok(Rendered {
        module,
        unit,
        model,
        source,
    })
}

/// Runs the pipeline against the Cargo package in the current directory.
///
/// Build scripts run from their package root, so `options.module` names a
/// dependency of the package being built.
///
/// # Errors
///
/// Returns the first stage failure, including `cargo metadata` failures.
pub fn generate(options: &GenerateOptions) -> Result<Generated, EventgenError> {
    let resolver = resolve::CargoResolver::load(None)?;
    generate_with(&resolver, options)
}

/// Runs the whole pipeline and writes (or checks) the output file.
///
/// # Errors
///
/// Returns the first stage failure.
pub fn generate_with<R>(resolver: &R, options: &GenerateOptions) -> Result<Generated, EventgenError>
where
    R: ModuleResolver + ?Sized,
{
    let rendered = render_with(resolver, options)?;
    let outcome = match options.mode {
        OutputMode::Write => output::write_atomic(&options.output, &rendered.source)?,
        OutputMode::Check => output::check_fresh(&options.output, &rendered.source)?,
    };

    let generated = Generated {
        source_file: rendered.module.root.join(&rendered.unit.path),
        output: options.output.clone(),
        events: rendered.model.external().len(),
        outcome,
    };
    tracing::info!(
        output = %generated.output,
        events = generated.events,
        outcome = ?generated.outcome,
        "event registry generated"
    );
    Ok(generated)
}

/// Absolute path of the declarations module, e.g. `::gateway::events`.
#[must_use]
pub fn default_type_path(crate_ident: &str, module_path: &[String]) -> String {
    let mut path = format!("::{crate_ident}");
    for segment in module_path {
        path.push_str("::");
        path.push_str(segment);
    }
    path
}

/// Joins a configured path onto `base` unless it is already absolute.
#[must_use]
pub fn resolve_relative(base: &Utf8Path, path: &Utf8Path) -> Utf8PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
