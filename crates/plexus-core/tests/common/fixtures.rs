//! Element fixtures shared by the filter scenarios.

use plexus_core::{Edge, Element, ElementFilter, Entity};
use plexus_core::filter::IsMoreThan;

pub mod groups {
    pub const EDGE: &str = "BasicEdge";
    pub const EDGE_2: &str = "BasicEdge2";
    pub const EDGE_3: &str = "BasicEdge3";
    pub const ENTITY: &str = "BasicEntity";
    pub const ENTITY_2: &str = "BasicEntity2";
    pub const ENTITY_3: &str = "BasicEntity3";
}

pub const COUNT: &str = "count";

pub fn edge(group: &str, count: i64) -> Element {
    Edge::builder()
        .group(group)
        .source("junctionA")
        .dest("junctionB")
        .directed(true)
        .property(COUNT, count)
        .build()
        .into()
}

pub fn entity(group: &str, vertex: &str, count: i64) -> Element {
    Entity::builder()
        .group(group)
        .vertex(vertex)
        .property(COUNT, count)
        .build()
        .into()
}

/// Four edges: BasicEdge/2, BasicEdge2/1, BasicEdge/4, BasicEdge3/3.
pub fn scenario_edges() -> Vec<Element> {
    vec![
        edge(groups::EDGE, 2),
        edge(groups::EDGE_2, 1),
        edge(groups::EDGE, 4),
        edge(groups::EDGE_3, 3),
    ]
}

/// Two entities: BasicEntity/3, BasicEntity2/4.
pub fn scenario_entities() -> Vec<Element> {
    vec![
        entity(groups::ENTITY, "vertex1", 3),
        entity(groups::ENTITY_2, "vertex2", 4),
    ]
}

/// Edges with counts 2, 1, 4 followed by both entities.
pub fn scenario_elements() -> Vec<Element> {
    let mut elements: Vec<Element> = scenario_edges().into_iter().take(3).collect();
    elements.extend(scenario_entities());
    elements
}

pub fn count_more_than(n: i64) -> ElementFilter {
    ElementFilter::builder()
        .select([COUNT])
        .execute(IsMoreThan::new(n))
        .build()
}
