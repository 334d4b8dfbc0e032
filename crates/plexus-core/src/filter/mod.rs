//! Element filtering
//!
//! A [`FilterConfig`] describes which elements to keep; [`filter_elements`]
//! applies it to a sequence of eager or lazy elements.

mod config;
mod engine;
mod error;
mod predicate;

pub use config::{FilterConfig, FilterConfigBuilder, GroupTests, SharedPredicate};
pub use engine::{filter_elements, filter_iter, should_keep, FilterIter};
pub use error::{FilterError, FilterStage, PredicateError};
pub use predicate::{
    from_fn, ElementFilter, ElementFilterBuilder, ElementPredicate, Exists, IsEqual, IsLessThan,
    IsMoreThan, Not, SelectedFields, Selection, ValuePredicate,
};
