//! Filter engine
//!
//! Each element passes through two stages, combined with AND:
//!
//! 1. Group stage. If any group is registered for the element's kind, the
//!    element's group must be one of them and must pass that group's test
//!    (a group registered without a test passes). If no group is
//!    registered for the kind, every element of that kind passes.
//! 2. Global stage. `global_elements`, then the kind-specific global test.
//!    Absent tests pass.
//!
//! Evaluation short-circuits in that order. A configuration with nothing in
//! it keeps nothing. A failing test aborts the whole operation.

use tracing::{debug, trace};

use crate::element::{ElementKind, ElementView};
use crate::filter::config::{FilterConfig, SharedPredicate};
use crate::filter::error::{FilterError, FilterStage};

/// Keep the elements of `elements` that pass `config`, in input order.
///
/// `None` input is rejected with [`FilterError::MissingInput`] before
/// anything else is checked.
pub fn filter_elements<I, E>(elements: Option<I>, config: &FilterConfig) -> Result<Vec<E>, FilterError>
where
    I: IntoIterator<Item = E>,
    E: ElementView,
{
    let elements = elements.ok_or(FilterError::MissingInput)?;

    if config.is_unconfigured() {
        debug!("Filter has no tests or groups configured, keeping nothing");
        return Ok(Vec::new());
    }

    let mut seen = 0usize;
    let mut kept = Vec::new();
    for element in elements {
        seen += 1;
        if should_keep(&element, config)? {
            kept.push(element);
        }
    }

    debug!("Filter kept {} of {} elements", kept.len(), seen);
    Ok(kept)
}

/// Streaming form of [`filter_elements`].
///
/// Yields kept elements in input order. After the first error nothing more
/// is yielded.
pub fn filter_iter<I>(elements: I, config: &FilterConfig) -> FilterIter<'_, I::IntoIter>
where
    I: IntoIterator,
    I::Item: ElementView,
{
    let done = config.is_unconfigured();
    if done {
        debug!("Filter has no tests or groups configured, keeping nothing");
    }
    FilterIter {
        inner: elements.into_iter(),
        config,
        done,
    }
}

/// Iterator returned by [`filter_iter`].
#[derive(Debug)]
pub struct FilterIter<'a, I> {
    inner: I,
    config: &'a FilterConfig,
    done: bool,
}

impl<I> Iterator for FilterIter<'_, I>
where
    I: Iterator,
    I::Item: ElementView,
{
    type Item = Result<I::Item, FilterError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        for element in self.inner.by_ref() {
            match should_keep(&element, self.config) {
                Ok(true) => return Some(Ok(element)),
                Ok(false) => continue,
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
        self.done = true;
        None
    }
}

/// Decide whether one element is kept.
///
/// Does not apply the empty-configuration rule; callers that use this
/// directly decide that themselves.
pub fn should_keep(element: &dyn ElementView, config: &FilterConfig) -> Result<bool, FilterError> {
    let kind = element.kind();
    let group = element.group();

    let groups = config.groups(kind);
    if !groups.is_empty() {
        match groups.get(group) {
            None => {
                trace!("Rejected {} in unregistered group '{}'", kind, group);
                return Ok(false);
            }
            Some(None) => {}
            Some(Some(test)) => {
                if !run(test, element, FilterStage::Group)? {
                    trace!("Rejected {} in group '{}' at group test", kind, group);
                    return Ok(false);
                }
            }
        }
    }

    if let Some(test) = config.global_elements() {
        if !run(test, element, FilterStage::GlobalElements)? {
            trace!("Rejected {} in group '{}' at global elements test", kind, group);
            return Ok(false);
        }
    }

    let stage = match kind {
        ElementKind::Entity => FilterStage::GlobalEntities,
        ElementKind::Edge => FilterStage::GlobalEdges,
    };
    if let Some(test) = config.global_for(kind) {
        if !run(test, element, stage)? {
            trace!("Rejected {} in group '{}' at {} test", kind, group, stage);
            return Ok(false);
        }
    }

    Ok(true)
}

fn run(test: &SharedPredicate, element: &dyn ElementView, stage: FilterStage) -> Result<bool, FilterError> {
    test.test(element)
        .map_err(|source| FilterError::predicate(element.group(), stage, source))
}
