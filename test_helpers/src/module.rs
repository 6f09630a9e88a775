//! Temporary module trees for resolver, loader and pipeline tests.
//!
//! # Examples
//!
//! ```
//! use eventgen_test_helpers::module::TempModule;
//!
//! # fn main() -> anyhow::Result<()> {
//! let module = TempModule::new("gateway-events")
//!     .file("lib.rs", "pub mod events;\n")
//!     .file("events.rs", "pub struct Ready;\n")
//!     .build()?;
//! assert!(module.src_dir().join("events.rs").is_file());
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result, ensure};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Builder for a package directory holding a `src/` tree.
#[derive(Debug, Clone)]
pub struct TempModule {
    name: String,
    manifest: Option<String>,
    files: Vec<(Utf8PathBuf, String)>,
}

impl TempModule {
    /// Starts a module whose package directory is called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            manifest: None,
            files: Vec::new(),
        }
    }

    /// Adds a file at `relative` beneath `src/`.
    #[must_use]
    pub fn file(mut self, relative: impl Into<Utf8PathBuf>, contents: impl Into<String>) -> Self {
        self.files.push((relative.into(), contents.into()));
        self
    }

    /// Writes `contents` to the package's `Cargo.toml`.
    #[must_use]
    pub fn manifest(mut self, contents: impl Into<String>) -> Self {
        self.manifest = Some(contents.into());
        self
    }

    /// Materialises the tree in a fresh temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error when a path escapes `src/` or a write fails.
    pub fn build(self) -> Result<BuiltModule> {
        let tempdir = tempfile::tempdir().context("create temp dir")?;
        let base = Utf8PathBuf::from_path_buf(tempdir.path().to_path_buf())
            .map_err(|path| anyhow::anyhow!("temp dir is not UTF-8: {}", path.display()))?;
        let package_dir = base.join(&self.name);
        let src_dir = package_dir.join("src");
        std::fs::create_dir_all(&src_dir).with_context(|| format!("create {src_dir}"))?;

        if let Some(manifest) = &self.manifest {
            let path = package_dir.join("Cargo.toml");
            std::fs::write(&path, manifest).with_context(|| format!("write {path}"))?;
        }
        for (relative, contents) in &self.files {
            ensure!(
                relative.is_relative() && !relative.as_str().contains(".."),
                "module file `{relative}` must stay inside src/"
            );
            let path = src_dir.join(relative);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
            }
            std::fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        }

        Ok(BuiltModule {
            _tempdir: tempdir,
            package_dir,
            src_dir,
        })
    }
}

/// A materialised module tree, removed when dropped.
#[derive(Debug)]
pub struct BuiltModule {
    _tempdir: TempDir,
    package_dir: Utf8PathBuf,
    src_dir: Utf8PathBuf,
}

impl BuiltModule {
    /// Returns the package directory (the parent of `src/`).
    #[must_use]
    pub fn package_dir(&self) -> &Utf8Path {
        &self.package_dir
    }

    /// Returns the `src/` directory.
    #[must_use]
    pub fn src_dir(&self) -> &Utf8Path {
        &self.src_dir
    }

    /// Returns `relative` joined onto the package directory.
    #[must_use]
    pub fn path(&self, relative: impl AsRef<Utf8Path>) -> Utf8PathBuf {
        self.package_dir.join(relative)
    }

    /// Reads a file relative to the package directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read.
    pub fn read(&self, relative: impl AsRef<Utf8Path>) -> Result<String> {
        let path = self.path(relative);
        std::fs::read_to_string(&path).with_context(|| format!("read {path}"))
    }
}
