//! Element Model
//!
//! Entities and edges are the two kinds of graph element. Both carry a
//! group (the schema-defined type tag), a set of identifiers appropriate to
//! their kind and a [`Properties`] bag.
//!
//! The group is fixed when an element leaves its builder. Edge identifiers
//! (source, destination, directed) are independently settable, in any
//! order, which is what lazy loading relies on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::lazy::LoadError;
use crate::properties::Properties;
use crate::value::Value;

/// Group assigned when a builder is not given one.
pub const DEFAULT_GROUP: &str = "UNKNOWN";

// ============================================================================
// Identifier Types
// ============================================================================

/// Kind of graph element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Entity,
    Edge,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Entity => "Entity",
            ElementKind::Edge => "Edge",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The identifying slots an element exposes.
///
/// Not every slot applies to every kind: `VERTEX` only exists on entities,
/// `SOURCE`, `DESTINATION`, `DIRECTED` and the matched-vertex slots only on
/// edges. `GROUP` exists on both but is never loaded lazily.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdentifierType {
    Vertex,
    Source,
    Destination,
    Directed,
    Group,
    /// The end of an edge that matched the seed of a query.
    MatchedVertex,
    /// The end of an edge opposite the matched vertex.
    AdjacentMatchedVertex,
}

impl IdentifierType {
    pub const ALL: [IdentifierType; 7] = [
        IdentifierType::Vertex,
        IdentifierType::Source,
        IdentifierType::Destination,
        IdentifierType::Directed,
        IdentifierType::Group,
        IdentifierType::MatchedVertex,
        IdentifierType::AdjacentMatchedVertex,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierType::Vertex => "VERTEX",
            IdentifierType::Source => "SOURCE",
            IdentifierType::Destination => "DESTINATION",
            IdentifierType::Directed => "DIRECTED",
            IdentifierType::Group => "GROUP",
            IdentifierType::MatchedVertex => "MATCHED_VERTEX",
            IdentifierType::AdjacentMatchedVertex => "ADJACENT_MATCHED_VERTEX",
        }
    }

    /// Whether this slot exists on elements of the given kind.
    pub fn applies_to(&self, kind: ElementKind) -> bool {
        match self {
            IdentifierType::Group => true,
            IdentifierType::Vertex => kind == ElementKind::Entity,
            IdentifierType::Source
            | IdentifierType::Destination
            | IdentifierType::Directed
            | IdentifierType::MatchedVertex
            | IdentifierType::AdjacentMatchedVertex => kind == ElementKind::Edge,
        }
    }
}

impl fmt::Display for IdentifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdentifierType {
    type Err = UnknownIdentifierType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IdentifierType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownIdentifierType(s.to_string()))
    }
}

/// Returned when a name does not match any [`IdentifierType`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown identifier type '{0}'")]
pub struct UnknownIdentifierType(pub String);

/// Which end of an edge matched the query seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchedVertex {
    Source,
    Destination,
}

// ============================================================================
// Errors
// ============================================================================

/// Errors raised while reading or writing element fields.
#[derive(Debug, Error)]
pub enum ElementError {
    /// A lazy load failed
    #[error("failed to load element field: {0}")]
    Load(#[from] LoadError),

    /// The identifier slot does not exist on this kind of element
    #[error("identifier {identifier} does not apply to {kind}")]
    InapplicableIdentifier {
        identifier: IdentifierType,
        kind: ElementKind,
    },

    /// The value cannot be stored in the identifier slot
    #[error("invalid value for identifier {identifier}: expected {expected}, got {actual}")]
    InvalidIdentifierValue {
        identifier: IdentifierType,
        expected: &'static str,
        actual: &'static str,
    },

    /// Groups are fixed by the builder
    #[error("group is immutable once an element is built")]
    GroupImmutable,
}

impl ElementError {
    pub fn inapplicable(identifier: IdentifierType, kind: ElementKind) -> Self {
        Self::InapplicableIdentifier { identifier, kind }
    }
}

// ============================================================================
// Entity
// ============================================================================

/// An element identified by a single vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    group: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    vertex: Option<Value>,
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    properties: Properties,
}

impl Entity {
    /// Create an entity with no properties.
    pub fn new(group: impl Into<String>, vertex: impl Into<Value>) -> Self {
        Self {
            group: group.into(),
            vertex: Some(vertex.into()),
            properties: Properties::new(),
        }
    }

    pub fn builder() -> EntityBuilder {
        EntityBuilder::default()
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn vertex(&self) -> Option<&Value> {
        self.vertex.as_ref()
    }

    pub fn set_vertex(&mut self, vertex: impl Into<Value>) {
        self.vertex = Some(vertex.into());
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    pub fn identifier(&self, identifier: IdentifierType) -> Option<Value> {
        match identifier {
            IdentifierType::Vertex => self.vertex.clone(),
            IdentifierType::Group => Some(Value::Str(self.group.clone())),
            _ => None,
        }
    }

    pub fn put_identifier(
        &mut self,
        identifier: IdentifierType,
        value: Value,
    ) -> Result<(), ElementError> {
        match identifier {
            IdentifierType::Vertex => {
                self.vertex = Some(value);
                Ok(())
            }
            IdentifierType::Group => Err(ElementError::GroupImmutable),
            other => Err(ElementError::inapplicable(other, ElementKind::Entity)),
        }
    }
}

/// Builder for [`Entity`].
#[derive(Debug, Default)]
pub struct EntityBuilder {
    group: Option<String>,
    vertex: Option<Value>,
    properties: Properties,
}

impl EntityBuilder {
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn vertex(mut self, vertex: impl Into<Value>) -> Self {
        self.vertex = Some(vertex.into());
        self
    }

    pub fn property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.put(name, value);
        self
    }

    pub fn build(self) -> Entity {
        Entity {
            group: self.group.unwrap_or_else(|| DEFAULT_GROUP.to_string()),
            vertex: self.vertex,
            properties: self.properties,
        }
    }
}

// ============================================================================
// Edge
// ============================================================================

/// An element connecting a source and a destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    group: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    destination: Option<Value>,
    #[serde(default)]
    directed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    matched_vertex: Option<MatchedVertex>,
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    properties: Properties,
}

impl Edge {
    /// Create an edge with no properties.
    pub fn new(
        group: impl Into<String>,
        source: impl Into<Value>,
        destination: impl Into<Value>,
        directed: bool,
    ) -> Self {
        Self {
            group: group.into(),
            source: Some(source.into()),
            destination: Some(destination.into()),
            directed,
            matched_vertex: None,
            properties: Properties::new(),
        }
    }

    pub fn builder() -> EdgeBuilder {
        EdgeBuilder::default()
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn source(&self) -> Option<&Value> {
        self.source.as_ref()
    }

    pub fn destination(&self) -> Option<&Value> {
        self.destination.as_ref()
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn matched_vertex(&self) -> Option<MatchedVertex> {
        self.matched_vertex
    }

    pub fn set_source(&mut self, source: impl Into<Value>) {
        self.source = Some(source.into());
    }

    pub fn set_destination(&mut self, destination: impl Into<Value>) {
        self.destination = Some(destination.into());
    }

    pub fn set_directed(&mut self, directed: bool) {
        self.directed = directed;
    }

    pub fn set_matched_vertex(&mut self, matched: Option<MatchedVertex>) {
        self.matched_vertex = matched;
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    /// Resolve the matched-vertex slots to the concrete end they refer to.
    ///
    /// The source is the matched end unless the edge records otherwise.
    /// Every other identifier maps to itself.
    pub fn resolve_slot(&self, identifier: IdentifierType) -> IdentifierType {
        let destination_matched = self.matched_vertex == Some(MatchedVertex::Destination);
        match identifier {
            IdentifierType::MatchedVertex if destination_matched => IdentifierType::Destination,
            IdentifierType::MatchedVertex => IdentifierType::Source,
            IdentifierType::AdjacentMatchedVertex if destination_matched => IdentifierType::Source,
            IdentifierType::AdjacentMatchedVertex => IdentifierType::Destination,
            other => other,
        }
    }

    pub fn identifier(&self, identifier: IdentifierType) -> Option<Value> {
        match self.resolve_slot(identifier) {
            IdentifierType::Source => self.source.clone(),
            IdentifierType::Destination => self.destination.clone(),
            IdentifierType::Directed => Some(Value::Bool(self.directed)),
            IdentifierType::Group => Some(Value::Str(self.group.clone())),
            _ => None,
        }
    }

    pub fn put_identifier(
        &mut self,
        identifier: IdentifierType,
        value: Value,
    ) -> Result<(), ElementError> {
        match self.resolve_slot(identifier) {
            IdentifierType::Source => {
                self.source = Some(value);
                Ok(())
            }
            IdentifierType::Destination => {
                self.destination = Some(value);
                Ok(())
            }
            IdentifierType::Directed => match value {
                Value::Bool(directed) => {
                    self.directed = directed;
                    Ok(())
                }
                other => Err(ElementError::InvalidIdentifierValue {
                    identifier: IdentifierType::Directed,
                    expected: "bool",
                    actual: other.type_name(),
                }),
            },
            IdentifierType::Group => Err(ElementError::GroupImmutable),
            other => Err(ElementError::inapplicable(other, ElementKind::Edge)),
        }
    }
}

/// Builder for [`Edge`].
#[derive(Debug, Default)]
pub struct EdgeBuilder {
    group: Option<String>,
    source: Option<Value>,
    destination: Option<Value>,
    directed: bool,
    matched_vertex: Option<MatchedVertex>,
    properties: Properties,
}

impl EdgeBuilder {
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn source(mut self, source: impl Into<Value>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn dest(mut self, destination: impl Into<Value>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    pub fn matched_vertex(mut self, matched: MatchedVertex) -> Self {
        self.matched_vertex = Some(matched);
        self
    }

    pub fn property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.put(name, value);
        self
    }

    pub fn build(self) -> Edge {
        Edge {
            group: self.group.unwrap_or_else(|| DEFAULT_GROUP.to_string()),
            source: self.source,
            destination: self.destination,
            directed: self.directed,
            matched_vertex: self.matched_vertex,
            properties: self.properties,
        }
    }
}

// ============================================================================
// Element
// ============================================================================

/// An entity or an edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class")]
pub enum Element {
    Entity(Entity),
    Edge(Edge),
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Entity(_) => ElementKind::Entity,
            Element::Edge(_) => ElementKind::Edge,
        }
    }

    pub fn group(&self) -> &str {
        match self {
            Element::Entity(e) => e.group(),
            Element::Edge(e) => e.group(),
        }
    }

    pub fn properties(&self) -> &Properties {
        match self {
            Element::Entity(e) => e.properties(),
            Element::Edge(e) => e.properties(),
        }
    }

    pub fn properties_mut(&mut self) -> &mut Properties {
        match self {
            Element::Entity(e) => e.properties_mut(),
            Element::Edge(e) => e.properties_mut(),
        }
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties().get(name)
    }

    pub fn put_property(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.properties_mut().put(name, value);
    }

    pub fn identifier(&self, identifier: IdentifierType) -> Option<Value> {
        match self {
            Element::Entity(e) => e.identifier(identifier),
            Element::Edge(e) => e.identifier(identifier),
        }
    }

    pub fn put_identifier(
        &mut self,
        identifier: IdentifierType,
        value: Value,
    ) -> Result<(), ElementError> {
        match self {
            Element::Entity(e) => e.put_identifier(identifier, value),
            Element::Edge(e) => e.put_identifier(identifier, value),
        }
    }

    pub fn as_entity(&self) -> Option<&Entity> {
        match self {
            Element::Entity(e) => Some(e),
            Element::Edge(_) => None,
        }
    }

    pub fn as_edge(&self) -> Option<&Edge> {
        match self {
            Element::Edge(e) => Some(e),
            Element::Entity(_) => None,
        }
    }
}

impl From<Entity> for Element {
    fn from(entity: Entity) -> Self {
        Element::Entity(entity)
    }
}

impl From<Edge> for Element {
    fn from(edge: Edge) -> Self {
        Element::Edge(edge)
    }
}

// ============================================================================
// Read Capability
// ============================================================================

/// Read access shared by eager and lazy elements.
///
/// Reads return owned values so that lazy implementations can resolve and
/// memoize behind `&self`. Eager implementations never fail.
pub trait ElementView {
    fn kind(&self) -> ElementKind;

    fn group(&self) -> &str;

    /// Value of an identifier slot; `None` when the slot is unset or does
    /// not apply to this kind.
    fn identifier(&self, identifier: IdentifierType) -> Result<Option<Value>, ElementError>;

    /// Value of a property; `None` when the element has no such property.
    fn property(&self, name: &str) -> Result<Option<Value>, ElementError>;
}

impl ElementView for Element {
    fn kind(&self) -> ElementKind {
        Element::kind(self)
    }

    fn group(&self) -> &str {
        Element::group(self)
    }

    fn identifier(&self, identifier: IdentifierType) -> Result<Option<Value>, ElementError> {
        Ok(Element::identifier(self, identifier))
    }

    fn property(&self, name: &str) -> Result<Option<Value>, ElementError> {
        Ok(Element::property(self, name).cloned())
    }
}

impl ElementView for Entity {
    fn kind(&self) -> ElementKind {
        ElementKind::Entity
    }

    fn group(&self) -> &str {
        Entity::group(self)
    }

    fn identifier(&self, identifier: IdentifierType) -> Result<Option<Value>, ElementError> {
        Ok(Entity::identifier(self, identifier))
    }

    fn property(&self, name: &str) -> Result<Option<Value>, ElementError> {
        Ok(self.properties.get(name).cloned())
    }
}

impl ElementView for Edge {
    fn kind(&self) -> ElementKind {
        ElementKind::Edge
    }

    fn group(&self) -> &str {
        Edge::group(self)
    }

    fn identifier(&self, identifier: IdentifierType) -> Result<Option<Value>, ElementError> {
        Ok(Edge::identifier(self, identifier))
    }

    fn property(&self, name: &str) -> Result<Option<Value>, ElementError> {
        Ok(self.properties.get(name).cloned())
    }
}

impl<T: ElementView + ?Sized> ElementView for &T {
    fn kind(&self) -> ElementKind {
        (**self).kind()
    }

    fn group(&self) -> &str {
        (**self).group()
    }

    fn identifier(&self, identifier: IdentifierType) -> Result<Option<Value>, ElementError> {
        (**self).identifier(identifier)
    }

    fn property(&self, name: &str) -> Result<Option<Value>, ElementError> {
        (**self).property(name)
    }
}

impl<T: ElementView + ?Sized> ElementView for Box<T> {
    fn kind(&self) -> ElementKind {
        (**self).kind()
    }

    fn group(&self) -> &str {
        (**self).group()
    }

    fn identifier(&self, identifier: IdentifierType) -> Result<Option<Value>, ElementError> {
        (**self).identifier(identifier)
    }

    fn property(&self, name: &str) -> Result<Option<Value>, ElementError> {
        (**self).property(name)
    }
}
