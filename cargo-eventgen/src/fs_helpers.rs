//! Filesystem helpers shared across `cargo-eventgen` modules.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

/// Opens the directory containing `path` and returns it with the file name.
///
/// A bare file name is resolved against the current directory.
///
/// # Errors
///
/// Returns `InvalidInput` when `path` has no file name, or the error from
/// opening the parent directory.
pub fn open_parent(path: &Utf8Path) -> std::io::Result<(Dir, &str)> {
    let file_name = path.file_name().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name")
    })?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Reads `name` from `dir`, returning `None` when it does not exist.
///
/// # Errors
///
/// Returns any I/O error other than `NotFound`.
pub fn read_optional(dir: &Dir, name: &str) -> std::io::Result<Option<String>> {
    match dir.read_to_string(name) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}
