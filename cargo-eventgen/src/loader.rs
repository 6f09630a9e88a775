//! Declaration loading: picks the declarations file and parses it.

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use syn::ext::IdentExt;
use syn::{Generics, Ident, Item, Visibility};

use crate::error::EventgenError;
use crate::resolve::ResolvedModule;

/// Default suffix identifying the declarations file inside a module.
pub const DEFAULT_SUFFIX: &str = "events.rs";

/// Kind of a collected type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    /// `pub struct`.
    Struct,
    /// `pub enum`.
    Enum,
    /// `pub union`.
    Union,
    /// `pub type` alias.
    TypeAlias,
}

/// Opaque handle for one declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration {
    kind: DeclarationKind,
}

impl Declaration {
    /// Creates a handle of the given kind.
    #[must_use]
    pub const fn new(kind: DeclarationKind) -> Self {
        Self { kind }
    }

    /// Returns the declaration kind.
    #[must_use]
    pub const fn kind(&self) -> DeclarationKind {
        self.kind
    }
}

/// Declared names of one source file, keyed case-sensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationSet {
    entries: BTreeMap<String, Declaration>,
}

impl DeclarationSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a declaration, returning the previous handle for `name`.
    pub fn insert(&mut self, name: impl Into<String>, declaration: Declaration) -> Option<Declaration> {
        self.entries.insert(name.into(), declaration)
    }

    /// Looks up a declaration by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.entries.get(name)
    }

    /// Iterates over declared names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns the number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing was declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Declaration)> for DeclarationSet {
    fn from_iter<I: IntoIterator<Item = (S, Declaration)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, declaration)| (name.into(), declaration))
                .collect(),
        }
    }
}

/// Parsed declarations file together with where it lives in its crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationUnit {
    /// File path relative to the module root.
    pub path: Utf8PathBuf,
    /// Rust module path of the file inside its crate; empty for the crate root.
    pub module_path: Vec<String>,
    /// Declarations found in the file.
    pub declarations: DeclarationSet,
}

/// Selects the declarations file and parses it.
///
/// # Errors
///
/// Returns [`EventgenError::NotFound`] when no file matches `suffix`,
/// [`EventgenError::Read`] when it cannot be read, and
/// [`EventgenError::Parse`] when it is not valid Rust.
pub fn load(module: &ResolvedModule, suffix: &str) -> Result<DeclarationUnit, EventgenError> {
    let relative = select_file(module, suffix)?;
    let full_path = module.root.join(relative);
    tracing::info!(module = %module.name, path = %full_path, "found declarations file");

    let source = read_source(&module.root, relative)?;
    let declarations = parse_declarations(&full_path, &source)?;
    tracing::debug!(count = declarations.len(), "collected type declarations");

    Ok(DeclarationUnit {
        path: relative.to_path_buf(),
        module_path: module_path_for(relative, module.root_file.as_deref()),
        declarations,
    })
}

/// Returns the first listed file whose trailing components equal `suffix`.
///
/// # Errors
///
/// Returns [`EventgenError::NotFound`] when nothing matches.
pub fn select_file<'a>(module: &'a ResolvedModule, suffix: &str) -> Result<&'a Utf8Path, EventgenError> {
    let mut matches = module
        .files
        .iter()
        .map(Utf8PathBuf::as_path)
        .filter(|path| path.ends_with(suffix));
    let Some(first) = matches.next() else {
        return Err(EventgenError::NotFound {
            module: module.name.clone(),
            suffix: suffix.to_owned(),
        });
    };

    let others: Vec<&Utf8Path> = matches.collect();
    if !others.is_empty() {
        tracing::warn!(
            module = %module.name,
            selected = %first,
            ignored = ?others,
            "several files match the suffix; using the first in path order"
        );
    }
    Ok(first)
}

fn read_source(root: &Utf8Path, relative: &Utf8Path) -> Result<String, EventgenError> {
    let read_error = |source: std::io::Error| EventgenError::Read {
        path: root.join(relative),
        source,
    };
    let dir = Dir::open_ambient_dir(root, ambient_authority()).map_err(read_error)?;
    dir.read_to_string(relative).map_err(read_error)
}

/// Parses `source` and collects its public, non-generic type declarations.
///
/// # Errors
///
/// Returns [`EventgenError::Parse`] when `source` is not a valid Rust file.
pub fn parse_declarations(path: &Utf8Path, source: &str) -> Result<DeclarationSet, EventgenError> {
    let file = syn::parse_file(source).map_err(|err| EventgenError::Parse {
        path: path.to_path_buf(),
        source: err,
    })?;

    let mut declarations = DeclarationSet::new();
    for item in &file.items {
        let Some((ident, vis, generics, kind)) = type_declaration(item) else {
            continue;
        };
        let name = ident.unraw().to_string();
        if !matches!(vis, Visibility::Public(_)) {
            tracing::debug!(name = %name, "skipping non-public declaration");
            continue;
        }
        if generics.params.is_empty() {
            declarations.insert(name, Declaration::new(kind));
        } else {
            tracing::debug!(name = %name, "skipping generic declaration");
        }
    }
    Ok(declarations)
}

fn type_declaration(item: &Item) -> Option<(&Ident, &Visibility, &Generics, DeclarationKind)> {
    match item {
        Item::Struct(item) => Some((&item.ident, &item.vis, &item.generics, DeclarationKind::Struct)),
        Item::Enum(item) => Some((&item.ident, &item.vis, &item.generics, DeclarationKind::Enum)),
        Item::Union(item) => Some((&item.ident, &item.vis, &item.generics, DeclarationKind::Union)),
        Item::Type(item) => Some((&item.ident, &item.vis, &item.generics, DeclarationKind::TypeAlias)),
        _ => None,
    }
}

/// Maps a source file to its module path: `a/events.rs` is `a::events`,
/// `a/mod.rs` is `a`, and the crate root file has an empty path.
fn module_path_for(relative: &Utf8Path, root_file: Option<&Utf8Path>) -> Vec<String> {
    if root_file == Some(relative) {
        return Vec::new();
    }
    let mut segments: Vec<String> = relative
        .parent()
        .into_iter()
        .flat_map(Utf8Path::components)
        .map(|component| component.as_str().to_owned())
        .collect();
    match relative.file_stem() {
        Some("mod") | None => {}
        Some(stem) => segments.push(stem.to_owned()),
    }
    segments
}
