//! Module resolution: turning a module identifier into a source listing.
//!
//! The generator never walks the dependency graph itself. A
//! [`ModuleResolver`] hands back the module's source root and every `.rs`
//! file beneath it, sorted by relative path so that file selection is stable
//! from one run to the next.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use cargo_metadata::{Metadata, MetadataCommand, Package, Target};

use crate::error::EventgenError;

/// Source listing of a resolved module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModule {
    /// Module identifier, used in diagnostics and the generated header.
    pub name: String,
    /// Crate identifier used to build absolute type paths.
    pub crate_ident: String,
    /// Directory every listed file is relative to.
    pub root: Utf8PathBuf,
    /// Crate root file relative to `root`, when known (for example `lib.rs`).
    pub root_file: Option<Utf8PathBuf>,
    /// Every `.rs` file under `root`, relative and sorted.
    pub files: Vec<Utf8PathBuf>,
}

/// Locates a module and lists its source files.
pub trait ModuleResolver {
    /// Resolves `module` into a source listing.
    ///
    /// # Errors
    ///
    /// Returns [`EventgenError::Resolution`] when the module cannot be found.
    fn resolve(&self, module: &str) -> Result<ResolvedModule, EventgenError>;
}

/// Resolves modules as packages in a Cargo dependency graph.
#[derive(Debug)]
pub struct CargoResolver {
    metadata: Metadata,
}

impl CargoResolver {
    /// Wraps previously loaded metadata.
    #[must_use]
    pub const fn new(metadata: Metadata) -> Self {
        Self { metadata }
    }

    /// Runs `cargo metadata`, dependencies included, for `manifest_path`.
    ///
    /// # Errors
    ///
    /// Returns [`EventgenError::Metadata`] when cargo fails.
    pub fn load(manifest_path: Option<&Utf8Path>) -> Result<Self, EventgenError> {
        Ok(Self::new(load_metadata(manifest_path)?))
    }

    /// Returns the underlying metadata.
    #[must_use]
    pub const fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

/// Loads Cargo metadata, dependencies included.
///
/// # Errors
///
/// Returns [`EventgenError::Metadata`] when cargo fails.
pub fn load_metadata(manifest_path: Option<&Utf8Path>) -> Result<Metadata, EventgenError> {
    let mut command = MetadataCommand::new();
    if let Some(path) = manifest_path {
        command.manifest_path(path);
    }
    Ok(command.exec()?)
}

impl ModuleResolver for CargoResolver {
    fn resolve(&self, module: &str) -> Result<ResolvedModule, EventgenError> {
        let package = select_package(&self.metadata, module)?;
        let target = package
            .targets
            .iter()
            .find(|target| is_library(target))
            .ok_or_else(|| resolution_error(module, "package has no library target"))?;
        let root = target
            .src_path
            .parent()
            .map(Utf8Path::to_path_buf)
            .ok_or_else(|| resolution_error(module, "library source path has no parent"))?;
        let root_file = target.src_path.file_name().map(Utf8PathBuf::from);
        let foreign_roots: Vec<Utf8PathBuf> = package
            .targets
            .iter()
            .filter(|other| other.src_path != target.src_path)
            .filter_map(|other| other.src_path.strip_prefix(&root).ok())
            .map(Utf8Path::to_path_buf)
            .collect();
        let files = list_sources(&root)
            .map(|listing| library_files(listing, &foreign_roots))
            .map_err(|err| resolution_error(module, &err))?;

        tracing::debug!(module, %root, files = files.len(), "resolved cargo package");
        Ok(ResolvedModule {
            name: module.to_owned(),
            crate_ident: target.name.replace('-', "_"),
            root,
            root_file,
            files,
        })
    }
}

fn select_package<'a>(metadata: &'a Metadata, module: &str) -> Result<&'a Package, EventgenError> {
    let mut candidates: Vec<&Package> = metadata
        .packages
        .iter()
        .filter(|package| package.name == module)
        .collect();
    candidates.sort_by(|left, right| left.version.cmp(&right.version));

    let selected = candidates
        .last()
        .copied()
        .ok_or_else(|| resolution_error(module, "package not found in the dependency graph"))?;
    if candidates.len() > 1 {
        let versions: Vec<String> = candidates
            .iter()
            .map(|package| package.version.to_string())
            .collect();
        tracing::warn!(
            module,
            versions = ?versions,
            selected = %selected.version,
            "several versions of the module are in the graph; using the newest"
        );
    }
    Ok(selected)
}

/// Directory cargo reserves for binary targets beside the library root.
const BIN_DIR: &str = "bin";

/// Drops files owned by other targets: everything under `bin/` and the root
/// file of any other target sharing the library's source directory.
fn library_files(files: Vec<Utf8PathBuf>, foreign_roots: &[Utf8PathBuf]) -> Vec<Utf8PathBuf> {
    files
        .into_iter()
        .filter(|file| !file.starts_with(BIN_DIR) && !foreign_roots.contains(file))
        .collect()
}

fn is_library(target: &Target) -> bool {
    target
        .kind
        .iter()
        .any(|kind| matches!(kind.as_str(), "lib" | "rlib" | "dylib" | "proc-macro"))
}

/// Resolves modules given as local source directories.
#[derive(Debug, Default, Clone)]
pub struct DirectoryResolver {
    crate_ident: Option<String>,
}

impl DirectoryResolver {
    /// Creates a resolver deriving crate identifiers from directory names.
    #[must_use]
    pub const fn new() -> Self {
        Self { crate_ident: None }
    }

    /// Uses `crate_name` for generated type paths instead of the directory name.
    #[must_use]
    pub fn with_crate_name(crate_name: impl Into<String>) -> Self {
        Self {
            crate_ident: Some(crate_name.into().replace('-', "_")),
        }
    }
}

impl ModuleResolver for DirectoryResolver {
    fn resolve(&self, module: &str) -> Result<ResolvedModule, EventgenError> {
        let root = Utf8PathBuf::from(module);
        if !root.is_dir() {
            return Err(resolution_error(module, "not a directory"));
        }
        let crate_ident = match &self.crate_ident {
            Some(ident) => ident.clone(),
            None => directory_crate_ident(&root)
                .ok_or_else(|| resolution_error(module, "cannot derive a crate name"))?,
        };
        let files = list_sources(&root).map_err(|err| resolution_error(module, &err))?;
        let root_file = ["lib.rs", "main.rs"]
            .into_iter()
            .map(Utf8PathBuf::from)
            .find(|candidate| files.contains(candidate));

        Ok(ResolvedModule {
            name: crate_ident.clone(),
            crate_ident,
            root,
            root_file,
            files,
        })
    }
}

/// `some-crate/src` names the crate `some_crate`; any other directory names itself.
fn directory_crate_ident(root: &Utf8Path) -> Option<String> {
    let mut components = root.components().rev().map(|component| component.as_str());
    let last = components.next()?;
    let name = if last == "src" {
        components.next().unwrap_or(last)
    } else {
        last
    };
    Some(name.replace('-', "_"))
}

fn resolution_error(module: &str, reason: &(impl ToString + ?Sized)) -> EventgenError {
    EventgenError::Resolution {
        module: module.to_owned(),
        reason: reason.to_string(),
    }
}

/// Lists every `.rs` file under `root`, relative to it and sorted.
///
/// # Errors
///
/// Returns the I/O error from the first unreadable directory.
pub fn list_sources(root: &Utf8Path) -> std::io::Result<Vec<Utf8PathBuf>> {
    let dir = Dir::open_ambient_dir(root, ambient_authority())?;
    let mut files = Vec::new();
    collect_sources(&dir, Utf8Path::new(""), &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_sources(dir: &Dir, base: &Utf8Path, files: &mut Vec<Utf8PathBuf>) -> std::io::Result<()> {
    let mut entries = Vec::new();
    for entry_result in dir.read_dir(".")? {
        let entry = entry_result?;
        entries.push((Utf8PathBuf::from(entry.file_name()?), entry.file_type()?));
    }
    entries.sort_by(|(left, _), (right, _)| left.cmp(right));

    for (name, file_type) in entries {
        let rel = base.join(&name);
        if file_type.is_dir() {
            let subdir = dir.open_dir(&name)?;
            collect_sources(&subdir, &rel, files)?;
        } else if file_type.is_file() && name.extension() == Some("rs") {
            files.push(rel);
        }
    }
    Ok(())
}
