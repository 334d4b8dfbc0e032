//! Plexus Core - graph elements, lazy loading and element filtering
//!
//! This crate provides:
//! - The element model: entities and edges with a group, identifiers and
//!   a property bag
//! - Lazy elements that fetch each field from a storage-supplied loader at
//!   most once
//! - Element predicates and the filter operation with per-group
//!   allow-lists and global tests

pub mod element;
pub mod filter;
pub mod lazy;
pub mod properties;
pub mod value;

// Element re-exports
pub use element::{
    Edge, EdgeBuilder, Element, ElementError, ElementKind, ElementView, Entity, EntityBuilder,
    IdentifierType, MatchedVertex, UnknownIdentifierType, DEFAULT_GROUP,
};

// Lazy loading re-exports
pub use lazy::{ElementValueLoader, LazyElement, LazyProperties, LoadError};

// Filter re-exports
pub use filter::{
    filter_elements, filter_iter, ElementFilter, ElementPredicate, FilterConfig, FilterError,
    FilterStage, PredicateError,
};

pub use properties::Properties;
pub use value::Value;
