//! Lazy property bag
//!
//! Starts empty and falls back to the element's loader on a miss. Every
//! answer the loader gives, including "no such property", is memoized so a
//! name is resolved at most once.

use parking_lot::Mutex;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

use crate::lazy::loader::{ElementValueLoader, LoadError};
use crate::properties::Properties;
use crate::value::Value;

/// Resolved state, protected by the bag's mutex.
#[derive(Default)]
struct BagState {
    /// Values resolved so far (loaded or written)
    values: Properties,
    /// Names the loader reported as absent
    absent: HashSet<String>,
}

impl BagState {
    fn lookup(&self, name: &str) -> Option<Option<Value>> {
        if let Some(value) = self.values.get(name) {
            Some(Some(value.clone()))
        } else if self.absent.contains(name) {
            Some(None)
        } else {
            None
        }
    }
}

/// Property bag that loads on first read.
///
/// All methods take `&self` so a loader holding a reference to the bag can
/// populate it while a read is in flight.
pub struct LazyProperties {
    state: Mutex<BagState>,
    loader: Arc<dyn ElementValueLoader>,
}

impl LazyProperties {
    /// Create an empty bag backed by `loader`.
    pub fn new(loader: Arc<dyn ElementValueLoader>) -> Self {
        Self {
            state: Mutex::new(BagState::default()),
            loader,
        }
    }

    /// Read a property, asking the loader on first access.
    ///
    /// A loader failure is returned unchanged and nothing is memoized, so a
    /// later read asks again.
    pub fn get(&self, name: &str) -> Result<Option<Value>, LoadError> {
        let cached = self.state.lock().lookup(name);
        if let Some(resolved) = cached {
            return Ok(resolved);
        }

        trace!("Loading property '{}'", name);
        let loaded = self.loader.resolve_property(name, self)?;

        let mut state = self.state.lock();
        match &loaded {
            Some(value) => {
                state.values.put(name, value.clone());
                state.absent.remove(name);
            }
            None => {
                state.values.remove(name);
                state.absent.insert(name.to_string());
            }
        }
        Ok(loaded)
    }

    /// Write a property without involving the loader.
    ///
    /// The name counts as resolved afterwards. Returns the value it replaced.
    pub fn put(&self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let name = name.into();
        let mut state = self.state.lock();
        state.absent.remove(&name);
        state.values.put(name, value)
    }

    /// Whether a read of `name` would be served without calling the loader.
    pub fn is_resolved(&self, name: &str) -> bool {
        self.state.lock().lookup(name).is_some()
    }

    /// Copy of every value resolved so far.
    pub fn snapshot(&self) -> Properties {
        self.state.lock().values.clone()
    }

    /// Number of resolved values, not counting names resolved as absent.
    pub fn len(&self) -> usize {
        self.state.lock().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for LazyProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("LazyProperties")
            .field("values", &state.values)
            .field("absent", &state.absent)
            .finish_non_exhaustive()
    }
}
