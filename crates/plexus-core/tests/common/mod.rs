//! Common test utilities for integration tests.
//!
//! Scenario fixtures built from a small junction network, plus a loader
//! backed by an in-memory copy of a fully populated element.

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fixtures;
pub mod store;

pub use fixtures::{count_more_than, groups, scenario_edges, scenario_elements, scenario_entities};
pub use store::{StoreCall, StoreLoader};
