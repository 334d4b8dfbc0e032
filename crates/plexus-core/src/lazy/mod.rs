//! Lazy loading
//!
//! Storage backends that can fetch element fields individually hand out
//! [`LazyElement`]s instead of fully populated elements. Each identifier
//! slot and each property is requested from the element's
//! [`ElementValueLoader`] on first access and memoized afterwards.

mod element;
mod loader;
mod properties;

pub use element::LazyElement;
pub use loader::{ElementValueLoader, LoadError};
pub use properties::LazyProperties;
