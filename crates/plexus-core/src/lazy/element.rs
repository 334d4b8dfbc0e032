//! Lazy element decorator
//!
//! Wraps a field-empty [`Element`] and a loader. Identifier and property
//! reads go through the loader the first time and are memoized; writes go
//! straight into the wrapped element and mark the slot as loaded.

use parking_lot::{Mutex, MutexGuard};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

use crate::element::{Element, ElementError, ElementKind, ElementView, IdentifierType};
use crate::lazy::loader::{ElementValueLoader, LoadError};
use crate::lazy::properties::LazyProperties;
use crate::value::Value;

/// One load flag per concrete identifier slot.
#[derive(Debug, Clone, Copy, Default)]
struct LoadedSlots {
    vertex: bool,
    source: bool,
    destination: bool,
    directed: bool,
}

impl LoadedSlots {
    fn is_set(&self, slot: IdentifierType) -> bool {
        match slot {
            IdentifierType::Vertex => self.vertex,
            IdentifierType::Source => self.source,
            IdentifierType::Destination => self.destination,
            IdentifierType::Directed => self.directed,
            // group is known eagerly
            _ => true,
        }
    }

    fn mark(&mut self, slot: IdentifierType) {
        match slot {
            IdentifierType::Vertex => self.vertex = true,
            IdentifierType::Source => self.source = true,
            IdentifierType::Destination => self.destination = true,
            IdentifierType::Directed => self.directed = true,
            _ => {}
        }
    }
}

/// An entity or edge whose fields are fetched on first access.
///
/// The lazy element exclusively owns the wrapped element and keeps its own
/// [`LazyProperties`] bag, separate from the wrapped element's bag.
/// Properties written through [`put_property`](Self::put_property) or
/// resolved through the loader are copied into the wrapped element so that
/// [`into_element`](Self::into_element) reflects everything observed.
///
/// At most one loader call per slot is guaranteed under single-threaded
/// (or externally synchronized) access. Concurrent first reads of the same
/// slot may each reach the loader.
pub struct LazyElement {
    kind: ElementKind,
    group: String,
    element: Mutex<Element>,
    properties: LazyProperties,
    loaded: Mutex<LoadedSlots>,
    loader: Arc<dyn ElementValueLoader>,
}

impl LazyElement {
    /// Wrap `element`. None of its identifier slots count as loaded.
    pub fn new(element: impl Into<Element>, loader: Arc<dyn ElementValueLoader>) -> Self {
        let element = element.into();
        Self {
            kind: element.kind(),
            group: element.group().to_string(),
            element: Mutex::new(element),
            properties: LazyProperties::new(loader.clone()),
            loaded: Mutex::new(LoadedSlots::default()),
            loader,
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// The group, known eagerly and never loaded.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// The lazy property bag (not the wrapped element's bag).
    pub fn properties(&self) -> &LazyProperties {
        &self.properties
    }

    /// Map matched-vertex slots onto the edge end they currently refer to.
    fn resolve_slot(&self, identifier: IdentifierType) -> IdentifierType {
        match &*self.element.lock() {
            Element::Edge(edge) => edge.resolve_slot(identifier),
            Element::Entity(_) => identifier,
        }
    }

    /// Whether a read of `identifier` would be served without the loader.
    pub fn is_loaded(&self, identifier: IdentifierType) -> bool {
        if !identifier.applies_to(self.kind) {
            return false;
        }
        let slot = self.resolve_slot(identifier);
        self.loaded.lock().is_set(slot)
    }

    /// Read an identifier slot, loading it on first access.
    ///
    /// Returns `None` for slots that do not apply to this kind of element.
    /// On loader failure the slot stays unloaded and the error is returned.
    pub fn get_identifier(&self, identifier: IdentifierType) -> Result<Option<Value>, ElementError> {
        if identifier == IdentifierType::Group {
            return Ok(Some(Value::Str(self.group.clone())));
        }
        if !identifier.applies_to(self.kind) {
            return Ok(None);
        }

        let slot = self.resolve_slot(identifier);
        let loaded = self.loaded.lock().is_set(slot);
        if loaded {
            return Ok(self.element.lock().identifier(slot));
        }

        trace!("Loading {} for {} in group '{}'", slot, self.kind, self.group);
        let value = self.loader.resolve_identifier(slot, self)?;
        self.element.lock().put_identifier(slot, value.clone())?;
        self.loaded.lock().mark(slot);
        Ok(Some(value))
    }

    /// Write an identifier slot directly, bypassing the loader for good.
    pub fn set_identifier(
        &self,
        identifier: IdentifierType,
        value: impl Into<Value>,
    ) -> Result<(), ElementError> {
        if identifier == IdentifierType::Group {
            return Err(ElementError::GroupImmutable);
        }
        if !identifier.applies_to(self.kind) {
            return Err(ElementError::inapplicable(identifier, self.kind));
        }

        let slot = self.resolve_slot(identifier);
        self.element.lock().put_identifier(slot, value.into())?;
        self.loaded.lock().mark(slot);
        Ok(())
    }

    /// Read a property through the lazy bag.
    ///
    /// A loaded value is also copied into the wrapped element's bag if it
    /// has no value under that name yet.
    pub fn get_property(&self, name: &str) -> Result<Option<Value>, LoadError> {
        let value = self.properties.get(name)?;
        if let Some(value) = &value {
            let mut element = self.element.lock();
            if !element.properties().contains(name) {
                element.put_property(name, value.clone());
            }
        }
        Ok(value)
    }

    /// Write a property into both the lazy bag and the wrapped element.
    pub fn put_property(&self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        self.properties.put(name.clone(), value.clone());
        self.element.lock().put_property(name, value);
    }

    pub fn vertex(&self) -> Result<Option<Value>, ElementError> {
        self.get_identifier(IdentifierType::Vertex)
    }

    pub fn source(&self) -> Result<Option<Value>, ElementError> {
        self.get_identifier(IdentifierType::Source)
    }

    pub fn destination(&self) -> Result<Option<Value>, ElementError> {
        self.get_identifier(IdentifierType::Destination)
    }

    /// Whether the edge is directed; always `false` for an entity.
    pub fn is_directed(&self) -> Result<bool, ElementError> {
        Ok(self
            .get_identifier(IdentifierType::Directed)?
            .and_then(|v| v.as_bool())
            .unwrap_or(false))
    }

    pub fn set_vertex(&self, vertex: impl Into<Value>) -> Result<(), ElementError> {
        self.set_identifier(IdentifierType::Vertex, vertex)
    }

    pub fn set_source(&self, source: impl Into<Value>) -> Result<(), ElementError> {
        self.set_identifier(IdentifierType::Source, source)
    }

    pub fn set_destination(&self, destination: impl Into<Value>) -> Result<(), ElementError> {
        self.set_identifier(IdentifierType::Destination, destination)
    }

    pub fn set_directed(&self, directed: bool) -> Result<(), ElementError> {
        self.set_identifier(IdentifierType::Directed, directed)
    }

    /// The wrapped element itself, not a copy.
    ///
    /// Drop the guard before calling any other method on this lazy element.
    pub fn element(&self) -> MutexGuard<'_, Element> {
        self.element.lock()
    }

    /// Discard lazy semantics and take the wrapped element.
    pub fn into_element(self) -> Element {
        self.element.into_inner()
    }
}

impl ElementView for LazyElement {
    fn kind(&self) -> ElementKind {
        self.kind
    }

    fn group(&self) -> &str {
        &self.group
    }

    fn identifier(&self, identifier: IdentifierType) -> Result<Option<Value>, ElementError> {
        self.get_identifier(identifier)
    }

    fn property(&self, name: &str) -> Result<Option<Value>, ElementError> {
        Ok(self.get_property(name)?)
    }
}

impl fmt::Debug for LazyElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyElement")
            .field("element", &*self.element.lock())
            .field("loaded", &*self.loaded.lock())
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}
