//! Error types for predicates and the filter operation.

use std::fmt;
use thiserror::Error;

use crate::element::ElementError;

/// Errors raised while evaluating a test against an element.
#[derive(Debug, Error)]
pub enum PredicateError {
    /// Reading a selected field failed (including a lazy load)
    #[error(transparent)]
    Element(#[from] ElementError),

    /// The selected value and the operand cannot be ordered
    #[error("cannot compare {left} with {right}")]
    Incomparable {
        left: &'static str,
        right: &'static str,
    },

    /// Wrong number of selected values for the predicate
    #[error("{predicate} expects {expected} selected value(s), got {actual}")]
    Arity {
        predicate: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A custom test failed
    #[error("{0}")]
    Failed(String),
}

impl PredicateError {
    /// Create an Incomparable error from the two value type names.
    pub fn incomparable(left: &'static str, right: &'static str) -> Self {
        Self::Incomparable { left, right }
    }

    /// Create an Arity error.
    pub fn arity(predicate: &'static str, expected: usize, actual: usize) -> Self {
        Self::Arity {
            predicate,
            expected,
            actual,
        }
    }

    /// Create a Failed error for a custom test.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Stage of the filter algorithm a test belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterStage {
    /// Per-group allow-list test
    Group,
    GlobalElements,
    GlobalEntities,
    GlobalEdges,
}

impl FilterStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterStage::Group => "group",
            FilterStage::GlobalElements => "global elements",
            FilterStage::GlobalEntities => "global entities",
            FilterStage::GlobalEdges => "global edges",
        }
    }
}

impl fmt::Display for FilterStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that abort a filter operation.
#[derive(Debug, Error)]
pub enum FilterError {
    /// No element sequence was supplied
    #[error("Filter operation has null iterable of elements")]
    MissingInput,

    /// A test failed while evaluating one element
    #[error("{stage} test failed for element in group '{group}': {source}")]
    Predicate {
        group: String,
        stage: FilterStage,
        #[source]
        source: PredicateError,
    },
}

impl FilterError {
    /// Create a Predicate error.
    pub fn predicate(group: impl Into<String>, stage: FilterStage, source: PredicateError) -> Self {
        Self::Predicate {
            group: group.into(),
            stage,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lazy::LoadError;
    use std::error::Error;

    #[test]
    fn test_missing_input_message() {
        assert_eq!(
            FilterError::MissingInput.to_string(),
            "Filter operation has null iterable of elements"
        );
    }

    #[test]
    fn test_predicate_error_display() {
        let err = FilterError::predicate(
            "BasicEdge",
            FilterStage::GlobalEdges,
            PredicateError::incomparable("string", "int"),
        );
        let message = err.to_string();
        assert!(message.contains("global edges"));
        assert!(message.contains("BasicEdge"));
        assert!(message.contains("cannot compare string with int"));
    }

    #[test]
    fn test_load_failure_is_the_source() {
        let load = ElementError::from(LoadError::new("row not found"));
        let err = FilterError::predicate("BasicEntity", FilterStage::Group, load.into());

        let source = err.source().unwrap();
        assert!(source.to_string().contains("row not found"));
        assert!(matches!(
            err,
            FilterError::Predicate {
                source: PredicateError::Element(ElementError::Load(_)),
                ..
            }
        ));
    }

    #[test]
    fn test_arity_error() {
        let err = PredicateError::arity("IsMoreThan", 1, 2);
        assert_eq!(
            err.to_string(),
            "IsMoreThan expects 1 selected value(s), got 2"
        );
    }
}
