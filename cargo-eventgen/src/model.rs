//! Event model derived from a declaration set.
//!
//! The model is an ordered sequence: the synthetic catch-all descriptor
//! first, then one descriptor per declared type sorted by name. The base
//! `Event` type is a marker rather than an event and never appears.

use std::iter;

use crate::error::EventgenError;
use crate::loader::DeclarationSet;
use crate::naming::proper_name;

/// Name of the synthetic descriptor matching every event.
pub const CATCH_ALL_NAME: &str = "All";

/// Event name of the synthetic catch-all descriptor.
pub const CATCH_ALL_PROPER_NAME: &str = "all";

/// Declared marker type excluded from the model.
pub const MARKER_TYPE: &str = "Event";

/// One generatable event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDescriptor {
    name: String,
    proper_name: String,
    is_external: bool,
}

impl EventDescriptor {
    /// Builds the synthetic catch-all descriptor.
    #[must_use]
    pub fn catch_all() -> Self {
        Self {
            name: CATCH_ALL_NAME.to_owned(),
            proper_name: CATCH_ALL_PROPER_NAME.to_owned(),
            is_external: false,
        }
    }

    /// Builds the descriptor for a declared type.
    #[must_use]
    pub fn external(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            proper_name: proper_name(name),
            is_external: true,
        }
    }

    /// Type name exactly as declared.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Event name in `snake_case`.
    #[must_use]
    pub fn proper_name(&self) -> &str {
        &self.proper_name
    }

    /// `true` unless this is the catch-all descriptor.
    #[must_use]
    pub const fn is_external(&self) -> bool {
        self.is_external
    }
}

/// Ordered descriptors for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventModel {
    catch_all: EventDescriptor,
    external: Vec<EventDescriptor>,
}

impl EventModel {
    /// Derives the model from the declared names.
    ///
    /// # Errors
    ///
    /// Returns [`EventgenError::EmptyDeclarationSet`] when nothing but the
    /// marker type is declared.
    pub fn build(declarations: &DeclarationSet) -> Result<Self, EventgenError> {
        let mut names: Vec<&str> = declarations
            .names()
            .filter(|name| *name != MARKER_TYPE)
            .collect();
        if names.is_empty() {
            return Err(EventgenError::EmptyDeclarationSet);
        }
        names.sort_unstable();

        let external: Vec<EventDescriptor> =
            names.into_iter().map(EventDescriptor::external).collect();
        tracing::debug!(events = external.len(), "built event model");
        Ok(Self {
            catch_all: EventDescriptor::catch_all(),
            external,
        })
    }

    /// Returns the catch-all descriptor, always first in order.
    #[must_use]
    pub const fn catch_all(&self) -> &EventDescriptor {
        &self.catch_all
    }

    /// Returns the declared events, sorted by name.
    #[must_use]
    pub fn external(&self) -> &[EventDescriptor] {
        &self.external
    }

    /// Iterates over every descriptor, catch-all first.
    pub fn descriptors(&self) -> impl Iterator<Item = &EventDescriptor> {
        iter::once(&self.catch_all).chain(&self.external)
    }

    /// Returns the number of descriptors, catch-all included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.external.len() + 1
    }

    /// Always `false`: a model holds at least the catch-all descriptor.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}
