//! Rust source renderer for the event registry.
//!
//! Output is built line by line in a fixed section order (header, constants,
//! registry, factory, accessors) and then re-parsed with `syn`, so a render
//! either yields a syntactically valid Rust file or fails.

mod sections;

use std::collections::BTreeMap;
use std::fmt;

use camino::Utf8Path;
use syn::{Ident, Path};

use crate::error::EventgenError;
use crate::model::{EventDescriptor, EventModel};
use crate::naming::constant_name;

/// Name of the required method on the generated accessor trait.
pub const PAYLOAD_METHOD: &str = "payload";

/// Inputs to the renderer besides the model itself.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Module identifier shown in the generated header.
    pub module: &'a str,
    /// Declarations file, relative to the module root, shown in the header.
    pub source_file: &'a Utf8Path,
    /// Path prefix of the event types, e.g. `::gateway::events`; empty for
    /// types in scope at the include site.
    pub type_path: &'a str,
}

/// Identifiers derived for one external event.
#[derive(Debug)]
pub(crate) struct RenderedEvent<'a> {
    descriptor: &'a EventDescriptor,
    constant: String,
    variant: String,
    accessor: String,
    type_path: String,
}

/// Renders the registry source for `model`.
///
/// # Errors
///
/// Returns [`EventgenError::Render`] when two events collide on a generated
/// identifier, when the type path is invalid, or when the output does not
/// parse as Rust.
pub fn render(model: &EventModel, context: &RenderContext<'_>) -> Result<String, EventgenError> {
    let prefix = type_prefix(context.type_path)?;
    let catch_all = constant_name(model.catch_all().name());
    let events = prepare(model, &catch_all, &prefix)?;

    let mut out = String::with_capacity(1024 + events.len() * 512);
    write_sections(&mut out, model, context, &catch_all, &events)
        .map_err(|_| EventgenError::Render("failed to format generated source".to_owned()))?;

    syn::parse_file(&out)
        .map_err(|err| EventgenError::Render(format!("generated source does not parse: {err}")))?;
    Ok(out)
}

fn write_sections(
    out: &mut String,
    model: &EventModel,
    context: &RenderContext<'_>,
    catch_all: &str,
    events: &[RenderedEvent<'_>],
) -> fmt::Result {
    sections::header(out, context)?;
    sections::constants(out, model.catch_all(), catch_all, events)?;
    sections::registry(out, events)?;
    sections::factory(out, events)?;
    sections::accessors(out, events)
}

fn type_prefix(type_path: &str) -> Result<String, EventgenError> {
    let trimmed = type_path.trim().trim_end_matches("::");
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    syn::parse_str::<Path>(trimmed)
        .map_err(|err| EventgenError::Render(format!("invalid type path `{type_path}`: {err}")))?;
    Ok(format!("{trimmed}::"))
}

fn prepare<'a>(
    model: &'a EventModel,
    catch_all_constant: &str,
    prefix: &str,
) -> Result<Vec<RenderedEvent<'a>>, EventgenError> {
    let mut constants = BTreeMap::from([(catch_all_constant.to_owned(), model.catch_all().name())]);
    let mut proper_names = BTreeMap::from([(
        model.catch_all().proper_name().to_owned(),
        model.catch_all().name(),
    )]);
    let mut accessors = BTreeMap::from([(PAYLOAD_METHOD.to_owned(), "the payload method")]);

    let mut events = Vec::with_capacity(model.external().len());
    for descriptor in model.external() {
        let name = descriptor.name();
        let variant = type_ident(name)?;
        let accessor = method_ident(descriptor.proper_name());
        let constant = constant_name(name);

        claim(&mut constants, &constant, name)?;
        claim(&mut proper_names, descriptor.proper_name(), name)?;
        claim(&mut accessors, &accessor, name)?;

        events.push(RenderedEvent {
            descriptor,
            type_path: format!("{prefix}{variant}"),
            constant,
            variant,
            accessor,
        });
    }
    Ok(events)
}

fn claim<'a>(
    taken: &mut BTreeMap<String, &'a str>,
    ident: &str,
    owner: &'a str,
) -> Result<(), EventgenError> {
    if let Some(previous) = taken.insert(ident.to_owned(), owner) {
        return Err(EventgenError::Render(format!(
            "`{owner}` and `{previous}` both generate `{ident}`"
        )));
    }
    Ok(())
}

/// Words reserved by recent editions that `syn` still accepts as identifiers.
const EDITION_RESERVED: &[&str] = &["gen"];

/// Declared type names are identifiers already; keywords need the raw form.
fn type_ident(name: &str) -> Result<String, EventgenError> {
    if !EDITION_RESERVED.contains(&name) && syn::parse_str::<Ident>(name).is_ok() {
        return Ok(name.to_owned());
    }
    let raw = format!("r#{name}");
    if syn::parse_str::<Ident>(&raw).is_ok() {
        return Ok(raw);
    }
    Err(EventgenError::Render(format!(
        "`{name}` is not usable as a Rust identifier"
    )))
}

/// Method names fall back to a trailing underscore for keywords that cannot
/// be raw identifiers (`self`, `super`, `crate`).
fn method_ident(proper_name: &str) -> String {
    type_ident(proper_name).unwrap_or_else(|_| format!("{proper_name}_"))
}
