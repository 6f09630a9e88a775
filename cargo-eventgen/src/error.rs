//! Error types for `cargo-eventgen`.

use std::fmt;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Pipeline stage an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading CLI arguments and package metadata.
    Configure,
    /// Locating the source module.
    Resolve,
    /// Selecting and parsing the declarations file.
    Load,
    /// Deriving the event model.
    Build,
    /// Rendering the generated source.
    Render,
    /// Writing or checking the generated file.
    Write,
}

impl Stage {
    /// Returns the lowercase stage label used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Configure => "configure",
            Self::Resolve => "resolve",
            Self::Load => "load",
            Self::Build => "build",
            Self::Render => "render",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by the `cargo-eventgen` pipeline.
#[derive(Debug, Error)]
pub enum EventgenError {
    /// `cargo metadata` could not be executed or parsed.
    #[error("cargo metadata failed: {0}")]
    Metadata(#[from] cargo_metadata::Error),

    /// `package.metadata.eventgen` is not a valid table.
    #[error("failed to parse package metadata: {0}")]
    MetadataJson(#[from] serde_json::Error),

    /// Arguments and metadata do not form a usable configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The module identifier does not name a resolvable module.
    #[error("module '{module}' could not be resolved: {reason}")]
    Resolution {
        /// Module identifier as configured.
        module: String,
        /// Human-readable cause.
        reason: String,
    },

    /// No file in the module matches the configured suffix.
    #[error("no file ending in '{suffix}' found in module '{module}'")]
    NotFound {
        /// Module identifier as configured.
        module: String,
        /// Suffix that was searched for.
        suffix: String,
    },

    /// The declarations file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File being read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The declarations file is not valid Rust source.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File being parsed.
        path: Utf8PathBuf,
        /// Parser diagnostic with its span.
        #[source]
        source: syn::Error,
    },

    /// Nothing but the `Event` marker was declared.
    #[error("declaration set holds no events besides the `Event` marker")]
    EmptyDeclarationSet,

    /// The event model could not be rendered into valid source.
    #[error("failed to render event registry: {0}")]
    Render(String),

    /// The generated file could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Target file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Check mode found a missing or outdated generated file.
    #[error("{path} is out of date; rerun cargo eventgen")]
    Stale {
        /// Generated file that needs regenerating.
        path: Utf8PathBuf,
    },
}

impl EventgenError {
    /// Returns the pipeline stage that raised this error.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::MetadataJson(_) | Self::Config(_) => Stage::Configure,
            Self::Metadata(_) | Self::Resolution { .. } => Stage::Resolve,
            Self::NotFound { .. } | Self::Read { .. } | Self::Parse { .. } => Stage::Load,
            Self::EmptyDeclarationSet => Stage::Build,
            Self::Render(_) => Stage::Render,
            Self::Write { .. } | Self::Stale { .. } => Stage::Write,
        }
    }
}
