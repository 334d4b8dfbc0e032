//! Element tests
//!
//! The filter engine only needs "a fallible boolean test over an element".
//! [`ElementPredicate`] is that capability. [`ElementFilter`] is the stock
//! implementation: a chain of components, each selecting some fields of the
//! element and handing their values to a [`ValuePredicate`].
//!
//! ```ignore
//! let count_over_one = ElementFilter::builder()
//!     .select(["count"])
//!     .execute(IsMoreThan::new(1))
//!     .build();
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::element::{ElementError, ElementView, IdentifierType};
use crate::filter::error::PredicateError;
use crate::value::Value;

// ============================================================================
// Capabilities
// ============================================================================

/// A fallible test over one element.
pub trait ElementPredicate: Send + Sync {
    fn test(&self, element: &dyn ElementView) -> Result<bool, PredicateError>;
}

impl<F> ElementPredicate for F
where
    F: Fn(&dyn ElementView) -> Result<bool, PredicateError> + Send + Sync,
{
    fn test(&self, element: &dyn ElementView) -> Result<bool, PredicateError> {
        self(element)
    }
}

/// Pin a closure to the [`ElementPredicate`] signature so its argument type
/// is inferred.
pub fn from_fn<F>(f: F) -> F
where
    F: Fn(&dyn ElementView) -> Result<bool, PredicateError> + Send + Sync,
{
    f
}

/// A fallible test over the values selected from an element.
///
/// Absent fields are passed as `None`.
pub trait ValuePredicate: Send + Sync + fmt::Debug {
    fn test(&self, values: &[Option<Value>]) -> Result<bool, PredicateError>;
}

// ============================================================================
// Selection
// ============================================================================

/// One field read from an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Identifier(IdentifierType),
    Property(String),
}

impl Selection {
    /// Interpret a field name: identifier names (`"SOURCE"`, ...) select the
    /// identifier, anything else a property.
    pub fn parse(name: &str) -> Self {
        match name.parse::<IdentifierType>() {
            Ok(identifier) => Selection::Identifier(identifier),
            Err(_) => Selection::Property(name.to_string()),
        }
    }

    pub fn select(&self, element: &dyn ElementView) -> Result<Option<Value>, ElementError> {
        match self {
            Selection::Identifier(identifier) => element.identifier(*identifier),
            Selection::Property(name) => element.property(name),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Identifier(identifier) => write!(f, "{}", identifier),
            Selection::Property(name) => f.write_str(name),
        }
    }
}

// ============================================================================
// Element Filter
// ============================================================================

#[derive(Debug, Clone)]
struct Component {
    selection: Vec<Selection>,
    predicate: Arc<dyn ValuePredicate>,
}

/// Select/execute chain, ANDed left to right with short-circuit.
///
/// An empty filter accepts every element.
#[derive(Debug, Clone, Default)]
pub struct ElementFilter {
    components: Vec<Component>,
}

impl ElementFilter {
    pub fn builder() -> ElementFilterBuilder {
        ElementFilterBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl ElementPredicate for ElementFilter {
    fn test(&self, element: &dyn ElementView) -> Result<bool, PredicateError> {
        for component in &self.components {
            let values = component
                .selection
                .iter()
                .map(|selection| selection.select(element))
                .collect::<Result<Vec<_>, _>>()?;
            if !component.predicate.test(&values)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Builder for [`ElementFilter`].
#[derive(Debug, Default)]
pub struct ElementFilterBuilder {
    components: Vec<Component>,
}

impl ElementFilterBuilder {
    /// Select the fields the next predicate runs over.
    pub fn select<I, S>(self, names: I) -> SelectedFields
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        SelectedFields {
            builder: self,
            selection: names.into_iter().map(|n| Selection::parse(n.as_ref())).collect(),
        }
    }

    pub fn build(self) -> ElementFilter {
        ElementFilter {
            components: self.components,
        }
    }
}

/// A selection waiting for its predicate.
#[derive(Debug)]
pub struct SelectedFields {
    builder: ElementFilterBuilder,
    selection: Vec<Selection>,
}

impl SelectedFields {
    pub fn execute(mut self, predicate: impl ValuePredicate + 'static) -> ElementFilterBuilder {
        self.builder.components.push(Component {
            selection: self.selection,
            predicate: Arc::new(predicate),
        });
        self.builder
    }
}

// ============================================================================
// Built-in Value Predicates
// ============================================================================

fn single<'a>(
    predicate: &'static str,
    values: &'a [Option<Value>],
) -> Result<Option<&'a Value>, PredicateError> {
    match values {
        [value] => Ok(value.as_ref()),
        _ => Err(PredicateError::arity(predicate, 1, values.len())),
    }
}

fn order(actual: &Value, operand: &Value) -> Result<Ordering, PredicateError> {
    actual
        .compare(operand)
        .ok_or_else(|| PredicateError::incomparable(actual.type_name(), operand.type_name()))
}

/// Selected value is greater than (or equal to) the operand.
#[derive(Debug, Clone, PartialEq)]
pub struct IsMoreThan {
    value: Value,
    or_equal_to: bool,
}

impl IsMoreThan {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            or_equal_to: false,
        }
    }

    pub fn or_equal_to(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            or_equal_to: true,
        }
    }
}

impl ValuePredicate for IsMoreThan {
    fn test(&self, values: &[Option<Value>]) -> Result<bool, PredicateError> {
        let Some(actual) = single("IsMoreThan", values)? else {
            return Ok(false);
        };
        Ok(match order(actual, &self.value)? {
            Ordering::Greater => true,
            Ordering::Equal => self.or_equal_to,
            Ordering::Less => false,
        })
    }
}

/// Selected value is less than (or equal to) the operand.
#[derive(Debug, Clone, PartialEq)]
pub struct IsLessThan {
    value: Value,
    or_equal_to: bool,
}

impl IsLessThan {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            or_equal_to: false,
        }
    }

    pub fn or_equal_to(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            or_equal_to: true,
        }
    }
}

impl ValuePredicate for IsLessThan {
    fn test(&self, values: &[Option<Value>]) -> Result<bool, PredicateError> {
        let Some(actual) = single("IsLessThan", values)? else {
            return Ok(false);
        };
        Ok(match order(actual, &self.value)? {
            Ordering::Less => true,
            Ordering::Equal => self.or_equal_to,
            Ordering::Greater => false,
        })
    }
}

/// Selected value equals the operand. Numbers compare across int and float.
#[derive(Debug, Clone, PartialEq)]
pub struct IsEqual {
    value: Value,
}

impl IsEqual {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl ValuePredicate for IsEqual {
    fn test(&self, values: &[Option<Value>]) -> Result<bool, PredicateError> {
        let Some(actual) = single("IsEqual", values)? else {
            return Ok(false);
        };
        Ok(match actual.compare(&self.value) {
            Some(ordering) => ordering == Ordering::Equal,
            None => *actual == self.value,
        })
    }
}

/// Selected field is present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exists;

impl ValuePredicate for Exists {
    fn test(&self, values: &[Option<Value>]) -> Result<bool, PredicateError> {
        Ok(single("Exists", values)?.is_some())
    }
}

/// Negates another value predicate. Errors pass through.
#[derive(Debug, Clone)]
pub struct Not {
    inner: Arc<dyn ValuePredicate>,
}

impl Not {
    pub fn new(inner: impl ValuePredicate + 'static) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }
}

impl ValuePredicate for Not {
    fn test(&self, values: &[Option<Value>]) -> Result<bool, PredicateError> {
        Ok(!self.inner.test(values)?)
    }
}
