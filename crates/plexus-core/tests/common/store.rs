//! In-memory backing store for lazy element tests.

use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

use plexus_core::{
    Edge, Element, ElementValueLoader, Entity, IdentifierType, LazyElement, LazyProperties,
    LoadError, Value,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Identifier(IdentifierType),
    Property(String),
}

/// Serves fields of one stored element and records every request.
pub struct StoreLoader {
    stored: Element,
    failing_properties: HashSet<String>,
    calls: Mutex<Vec<StoreCall>>,
}

impl StoreLoader {
    pub fn new(stored: Element) -> Self {
        Self {
            stored,
            failing_properties: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on_property(mut self, name: &str) -> Self {
        self.failing_properties.insert(name.to_string());
        self
    }

    /// Wrap a field-empty element of the stored element's kind and group.
    pub fn lazy(self: &Arc<Self>) -> LazyElement {
        let empty: Element = match &self.stored {
            Element::Entity(e) => Entity::builder().group(e.group()).build().into(),
            Element::Edge(e) => Edge::builder().group(e.group()).build().into(),
        };
        LazyElement::new(empty, self.clone())
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().clone()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn property_calls(&self, name: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, StoreCall::Property(n) if n == name))
            .count()
    }

    pub fn identifier_calls(&self, identifier: IdentifierType) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| **c == StoreCall::Identifier(identifier))
            .count()
    }
}

impl ElementValueLoader for StoreLoader {
    fn resolve_identifier(
        &self,
        identifier: IdentifierType,
        _element: &LazyElement,
    ) -> Result<Value, LoadError> {
        self.calls.lock().push(StoreCall::Identifier(identifier));
        self.stored
            .identifier(identifier)
            .ok_or_else(|| LoadError::new(format!("{} not stored", identifier)))
    }

    fn resolve_property(
        &self,
        name: &str,
        _properties: &LazyProperties,
    ) -> Result<Option<Value>, LoadError> {
        self.calls.lock().push(StoreCall::Property(name.to_string()));
        if self.failing_properties.contains(name) {
            return Err(LoadError::new(format!("failed to read property '{}'", name)));
        }
        Ok(self.stored.property(name).cloned())
    }
}
