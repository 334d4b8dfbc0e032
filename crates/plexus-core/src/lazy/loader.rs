//! Value loader capability
//!
//! The storage layer hands each lazy element a loader that knows how to
//! fetch that element's fields. The core never decides how a value is
//! fetched; it only guarantees each field is requested at most once.

use std::error::Error;
use std::fmt;

use crate::element::IdentifierType;
use crate::lazy::{LazyElement, LazyProperties};
use crate::value::Value;

/// Fetches element fields on first access.
///
/// Loaders are built per element, so any context needed to locate the
/// element in the backing store (row key, file offset, ...) lives in the
/// loader itself.
///
/// No lock inside the lazy element is held while a loader runs. A loader
/// may therefore call back into the element or bag it was given, for
/// example to populate several properties from a single fetch before
/// returning the requested one.
pub trait ElementValueLoader: Send + Sync {
    /// Resolve one identifier slot of `element`.
    ///
    /// `identifier` is always a concrete slot (`VERTEX`, `SOURCE`,
    /// `DESTINATION` or `DIRECTED`); matched-vertex slots are resolved to
    /// their end before the loader is asked.
    fn resolve_identifier(
        &self,
        identifier: IdentifierType,
        element: &LazyElement,
    ) -> Result<Value, LoadError>;

    /// Resolve one property. `Ok(None)` means the element has no such
    /// property; that answer is memoized like any other.
    fn resolve_property(
        &self,
        name: &str,
        properties: &LazyProperties,
    ) -> Result<Option<Value>, LoadError>;
}

/// A loader call failed.
#[derive(Debug)]
pub struct LoadError {
    message: String,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

impl LoadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an error raised by the backing store.
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn Error + Send + Sync + 'static>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn Error + 'static))
    }
}
