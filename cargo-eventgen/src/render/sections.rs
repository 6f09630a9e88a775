//! Section templates for the generated registry.
//!
//! Every section ends with a blank line except the last, so the file ends
//! with exactly one newline.

use std::fmt::{self, Write};

use super::{PAYLOAD_METHOD, RenderContext, RenderedEvent};
use crate::model::EventDescriptor;

const PAYLOAD_TYPE: &str = "::std::boxed::Box<dyn ::std::any::Any + ::core::marker::Send>";
const PAYLOAD_REF: &str = "&(dyn ::std::any::Any + ::core::marker::Send)";
const OPTION: &str = "::core::option::Option";

pub(super) fn header(out: &mut String, context: &RenderContext<'_>) -> fmt::Result {
    writeln!(
        out,
        "// @generated by cargo-eventgen from `{}` ({}). Do not edit.",
        context.module, context.source_file
    )?;
    writeln!(out)
}

pub(super) fn constants(
    out: &mut String,
    catch_all: &EventDescriptor,
    catch_all_constant: &str,
    events: &[RenderedEvent<'_>],
) -> fmt::Result {
    writeln!(out, "/// Catch-all event name matching every event.")?;
    writeln!(
        out,
        "pub const {catch_all_constant}: &str = {:?};",
        catch_all.proper_name()
    )?;
    for event in events {
        writeln!(out, "/// Event name for `{}`.", event.descriptor.name())?;
        writeln!(
            out,
            "pub const {}: &str = {:?};",
            event.constant,
            event.descriptor.proper_name()
        )?;
    }
    writeln!(out)
}

pub(super) fn registry(out: &mut String, events: &[RenderedEvent<'_>]) -> fmt::Result {
    writeln!(out, "/// Names of every concrete event, ordered by type name.")?;
    writeln!(out, "pub const ALL_EVENTS: &[&str] = &[")?;
    for event in events {
        writeln!(out, "    {},", event.constant)?;
    }
    writeln!(out, "];")?;
    writeln!(out)
}

pub(super) fn factory(out: &mut String, events: &[RenderedEvent<'_>]) -> fmt::Result {
    writeln!(out, "/// Type-erased event payload produced by the factory.")?;
    writeln!(out, "pub type EventPayload = {PAYLOAD_TYPE};")?;
    writeln!(out)?;

    writeln!(out, "/// Concrete event kinds, one per declared event type.")?;
    writeln!(
        out,
        "#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]"
    )?;
    writeln!(out, "pub enum EventKind {{")?;
    for event in events {
        writeln!(out, "    /// `{}` event.", event.descriptor.name())?;
        writeln!(out, "    {},", event.variant)?;
    }
    writeln!(out, "}}")?;
    writeln!(out)?;

    writeln!(out, "impl EventKind {{")?;
    writeln!(out, "    /// Every event kind, in registry order.")?;
    writeln!(out, "    pub const ALL: &'static [Self] = &[")?;
    for event in events {
        writeln!(out, "        Self::{},", event.variant)?;
    }
    writeln!(out, "    ];")?;
    writeln!(out)?;

    writeln!(out, "    /// Returns the event name for this kind.")?;
    writeln!(out, "    #[must_use]")?;
    writeln!(out, "    pub const fn name(self) -> &'static str {{")?;
    writeln!(out, "        match self {{")?;
    for event in events {
        writeln!(
            out,
            "            Self::{} => {},",
            event.variant, event.constant
        )?;
    }
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")?;
    writeln!(out)?;

    writeln!(out, "    /// Looks up the kind registered under `name`.")?;
    writeln!(out, "    #[must_use]")?;
    writeln!(
        out,
        "    pub fn from_name(name: &str) -> {OPTION}<Self> {{"
    )?;
    writeln!(out, "        match name {{")?;
    for event in events {
        writeln!(
            out,
            "            {} => {OPTION}::Some(Self::{}),",
            event.constant, event.variant
        )?;
    }
    writeln!(out, "            _ => {OPTION}::None,")?;
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")?;
    writeln!(out)?;

    writeln!(
        out,
        "    /// Builds a fresh, default-initialised payload for this kind."
    )?;
    writeln!(out, "    #[must_use]")?;
    writeln!(out, "    pub fn new_event(self) -> EventPayload {{")?;
    writeln!(out, "        match self {{")?;
    for event in events {
        writeln!(
            out,
            "            Self::{} => ::std::boxed::Box::new(",
            event.variant
        )?;
        writeln!(
            out,
            "                <{} as ::core::default::Default>::default(),",
            event.type_path
        )?;
        writeln!(out, "            ),")?;
    }
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")?;
    writeln!(out)?;

    writeln!(
        out,
        "/// Builds a fresh payload for the event registered under `name`."
    )?;
    writeln!(out, "#[must_use]")?;
    writeln!(
        out,
        "pub fn new_event(name: &str) -> {OPTION}<EventPayload> {{"
    )?;
    writeln!(out, "    EventKind::from_name(name).map(EventKind::new_event)")?;
    writeln!(out, "}}")?;
    writeln!(out)
}

pub(super) fn accessors(out: &mut String, events: &[RenderedEvent<'_>]) -> fmt::Result {
    writeln!(out, "/// Typed accessors over a type-erased event payload.")?;
    writeln!(out, "pub trait EventPayloadExt {{")?;
    writeln!(out, "    /// Returns the type-erased payload.")?;
    writeln!(out, "    fn {PAYLOAD_METHOD}(&self) -> {PAYLOAD_REF};")?;
    for event in events {
        writeln!(out)?;
        writeln!(
            out,
            "    /// Returns the payload as `{}` when it holds one.",
            event.descriptor.name()
        )?;
        writeln!(
            out,
            "    fn {}(&self) -> {OPTION}<&{}> {{",
            event.accessor, event.type_path
        )?;
        writeln!(out, "        self.{PAYLOAD_METHOD}().downcast_ref()")?;
        writeln!(out, "    }}")?;
    }
    writeln!(out, "}}")?;
    writeln!(out)?;

    writeln!(out, "impl EventPayloadExt for EventPayload {{")?;
    writeln!(out, "    fn {PAYLOAD_METHOD}(&self) -> {PAYLOAD_REF} {{")?;
    writeln!(out, "        &**self")?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")
}
