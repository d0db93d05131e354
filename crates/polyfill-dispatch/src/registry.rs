//! Polyfill registry
//!
//! Maps each protocol version to a constructor for the polyfiller that
//! bridges that version and the next. Entries are kept ordered by version,
//! so selection for a caller is a single range scan.
//!
//! # Example
//!
//! ```ignore
//! use polyfill_dispatch::{PolyfillRegistry, ProtocolVersion};
//!
//! let mut registry = PolyfillRegistry::new();
//! registry.register(ProtocolVersion(1), ChatChannelPolyfill::default)?;
//! registry.register_default::<NestedPositionPolyfill>(ProtocolVersion(2))?;
//! ```

use polyfill_core::{PolyfillError, Polyfiller, ProtocolVersion, Result};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use tracing::debug;

/// Builds a fresh polyfiller instance
pub type PolyfillConstructor = Box<dyn Fn() -> Box<dyn Polyfiller> + Send + Sync>;

/// A polyfiller instantiated for one dispatch call
pub struct Selected {
    /// Version the polyfiller was registered at
    pub version: ProtocolVersion,
    /// The fresh instance
    pub polyfiller: Box<dyn Polyfiller>,
}

impl fmt::Debug for Selected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selected")
            .field("version", &self.version)
            .field("polyfiller", &self.polyfiller.name())
            .finish()
    }
}

/// Ordered registry of polyfill constructors, one per version
#[derive(Default)]
pub struct PolyfillRegistry {
    entries: BTreeMap<ProtocolVersion, PolyfillConstructor>,
}

impl PolyfillRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor for the polyfiller at `version`
    pub fn register<P, F>(&mut self, version: ProtocolVersion, constructor: F) -> Result<()>
    where
        P: Polyfiller + 'static,
        F: Fn() -> P + Send + Sync + 'static,
    {
        match self.entries.entry(version) {
            Entry::Occupied(_) => Err(PolyfillError::DuplicateVersion(version)),
            Entry::Vacant(slot) => {
                slot.insert(Box::new(move || Box::new(constructor()) as Box<dyn Polyfiller>));
                debug!(%version, "Registered polyfiller");
                Ok(())
            }
        }
    }

    /// Register a polyfiller type that can be built with `Default`
    pub fn register_default<P>(&mut self, version: ProtocolVersion) -> Result<()>
    where
        P: Polyfiller + Default + 'static,
    {
        self.register(version, P::default)
    }

    /// Builder-style [`register`](Self::register)
    pub fn with<P, F>(mut self, version: ProtocolVersion, constructor: F) -> Result<Self>
    where
        P: Polyfiller + 'static,
        F: Fn() -> P + Send + Sync + 'static,
    {
        self.register(version, constructor)?;
        Ok(self)
    }

    /// Instantiate every polyfiller registered at or above `caller`,
    /// ascending by version
    pub fn instantiate_from(&self, caller: ProtocolVersion) -> Vec<Selected> {
        self.entries
            .range(caller..)
            .map(|(&version, construct)| Selected {
                version,
                polyfiller: construct(),
            })
            .collect()
    }

    /// Registered versions, ascending
    pub fn versions(&self) -> Vec<ProtocolVersion> {
        self.entries.keys().copied().collect()
    }

    /// Registered versions paired with their polyfiller names
    pub fn describe(&self) -> Vec<(ProtocolVersion, String)> {
        self.entries
            .iter()
            .map(|(&version, construct)| (version, construct().name().to_string()))
            .collect()
    }

    /// Lowest registered version
    pub fn earliest(&self) -> Option<ProtocolVersion> {
        self.entries.keys().next().copied()
    }

    /// Highest registered version
    pub fn latest(&self) -> Option<ProtocolVersion> {
        self.entries.keys().next_back().copied()
    }

    /// Whether a polyfiller is registered at `version`
    pub fn contains(&self, version: ProtocolVersion) -> bool {
        self.entries.contains_key(&version)
    }

    /// Number of registered polyfillers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for PolyfillRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolyfillRegistry")
            .field("versions", &self.versions())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Rejecting, marker_a, marker_b};

    fn names(selected: &[Selected]) -> Vec<&str> {
        selected.iter().map(|s| s.polyfiller.name()).collect()
    }

    #[test]
    fn test_register_and_list() {
        let mut registry = PolyfillRegistry::new();
        registry.register(ProtocolVersion(3), marker_b).unwrap();
        registry.register(ProtocolVersion(1), marker_a).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.versions(), vec![ProtocolVersion(1), ProtocolVersion(3)]);
        assert_eq!(registry.earliest(), Some(ProtocolVersion(1)));
        assert_eq!(registry.latest(), Some(ProtocolVersion(3)));
        assert!(registry.contains(ProtocolVersion(3)));
        assert!(!registry.contains(ProtocolVersion(2)));
    }

    #[test]
    fn test_duplicate_version_rejected() {
        let mut registry = PolyfillRegistry::new();
        registry.register(ProtocolVersion(2), marker_a).unwrap();

        let err = registry.register(ProtocolVersion(2), marker_b).unwrap_err();
        assert_eq!(err, PolyfillError::DuplicateVersion(ProtocolVersion(2)));

        // Original entry survives
        assert_eq!(registry.describe(), vec![(ProtocolVersion(2), "a".to_string())]);
    }

    #[test]
    fn test_instantiate_from_is_inclusive_and_ordered() {
        let registry = PolyfillRegistry::new()
            .with(ProtocolVersion(5), marker_b)
            .unwrap()
            .with(ProtocolVersion(1), marker_a)
            .unwrap()
            .with(ProtocolVersion(3), || Rejecting)
            .unwrap();

        let all = registry.instantiate_from(ProtocolVersion(0));
        assert_eq!(names(&all), vec!["a", "rejecting", "b"]);

        let from_three = registry.instantiate_from(ProtocolVersion(3));
        assert_eq!(names(&from_three), vec!["rejecting", "b"]);
        assert_eq!(from_three[0].version, ProtocolVersion(3));

        assert!(registry.instantiate_from(ProtocolVersion(6)).is_empty());
    }

    #[test]
    fn test_empty_registry() {
        let registry = PolyfillRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.latest(), None);
        assert!(registry.instantiate_from(ProtocolVersion(0)).is_empty());
    }
}
