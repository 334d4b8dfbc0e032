//! Filter configuration
//!
//! Global tests plus per-group allow-lists for entities and edges. Built
//! once through [`FilterConfigBuilder`] and read-only afterwards.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::element::ElementKind;
use crate::filter::predicate::ElementPredicate;

/// A test shared between clones of a configuration.
pub type SharedPredicate = Arc<dyn ElementPredicate>;

/// Group name to optional test. A registered group without a test accepts
/// every element of that group.
pub type GroupTests = BTreeMap<String, Option<SharedPredicate>>;

/// Which elements a filter operation keeps.
#[derive(Clone, Default)]
pub struct FilterConfig {
    global_elements: Option<SharedPredicate>,
    global_entities: Option<SharedPredicate>,
    global_edges: Option<SharedPredicate>,
    entity_groups: GroupTests,
    edge_groups: GroupTests,
}

impl FilterConfig {
    pub fn builder() -> FilterConfigBuilder {
        FilterConfigBuilder::default()
    }

    /// Test applied to every element.
    pub fn global_elements(&self) -> Option<&SharedPredicate> {
        self.global_elements.as_ref()
    }

    /// Test applied to every entity.
    pub fn global_entities(&self) -> Option<&SharedPredicate> {
        self.global_entities.as_ref()
    }

    /// Test applied to every edge.
    pub fn global_edges(&self) -> Option<&SharedPredicate> {
        self.global_edges.as_ref()
    }

    pub fn entity_groups(&self) -> &GroupTests {
        &self.entity_groups
    }

    pub fn edge_groups(&self) -> &GroupTests {
        &self.edge_groups
    }

    /// Group allow-list for the given kind.
    pub fn groups(&self, kind: ElementKind) -> &GroupTests {
        match kind {
            ElementKind::Entity => &self.entity_groups,
            ElementKind::Edge => &self.edge_groups,
        }
    }

    /// Kind-specific global test.
    pub fn global_for(&self, kind: ElementKind) -> Option<&SharedPredicate> {
        match kind {
            ElementKind::Entity => self.global_entities(),
            ElementKind::Edge => self.global_edges(),
        }
    }

    /// True when no test and no group is configured anywhere.
    pub fn is_unconfigured(&self) -> bool {
        self.global_elements.is_none()
            && self.global_entities.is_none()
            && self.global_edges.is_none()
            && self.entity_groups.is_empty()
            && self.edge_groups.is_empty()
    }
}

fn describe_groups(groups: &GroupTests) -> BTreeMap<&str, bool> {
    groups
        .iter()
        .map(|(group, test)| (group.as_str(), test.is_some()))
        .collect()
}

impl fmt::Debug for FilterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterConfig")
            .field("global_elements", &self.global_elements.is_some())
            .field("global_entities", &self.global_entities.is_some())
            .field("global_edges", &self.global_edges.is_some())
            .field("entity_groups", &describe_groups(&self.entity_groups))
            .field("edge_groups", &describe_groups(&self.edge_groups))
            .finish()
    }
}

/// Builder for [`FilterConfig`].
///
/// Registering a group again replaces the earlier registration.
#[derive(Default)]
pub struct FilterConfigBuilder {
    config: FilterConfig,
}

impl FilterConfigBuilder {
    pub fn global_elements(mut self, test: impl ElementPredicate + 'static) -> Self {
        self.config.global_elements = Some(Arc::new(test));
        self
    }

    pub fn global_entities(mut self, test: impl ElementPredicate + 'static) -> Self {
        self.config.global_entities = Some(Arc::new(test));
        self
    }

    pub fn global_edges(mut self, test: impl ElementPredicate + 'static) -> Self {
        self.config.global_edges = Some(Arc::new(test));
        self
    }

    /// Allow entities of `group` that pass `test`.
    pub fn entity(mut self, group: impl Into<String>, test: impl ElementPredicate + 'static) -> Self {
        self.config
            .entity_groups
            .insert(group.into(), Some(Arc::new(test)));
        self
    }

    /// Allow every entity of `group`.
    pub fn entity_group(mut self, group: impl Into<String>) -> Self {
        self.config.entity_groups.insert(group.into(), None);
        self
    }

    /// Allow edges of `group` that pass `test`.
    pub fn edge(mut self, group: impl Into<String>, test: impl ElementPredicate + 'static) -> Self {
        self.config
            .edge_groups
            .insert(group.into(), Some(Arc::new(test)));
        self
    }

    /// Allow every edge of `group`.
    pub fn edge_group(mut self, group: impl Into<String>) -> Self {
        self.config.edge_groups.insert(group.into(), None);
        self
    }

    pub fn build(self) -> FilterConfig {
        self.config
    }
}
