//! Name-indexed catalog of analyzer prototypes.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use super::builtin;
use super::Analyzer;

/// Analyzer prototypes keyed by name.
///
/// Prototypes are never run directly; callers take a fresh
/// [`instantiate`](Catalog::instantiate) clone and bind arguments on it.
#[derive(Default)]
pub struct Catalog {
    analyzers: BTreeMap<&'static str, Box<dyn Analyzer>>,
}

static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    let mut catalog = Catalog::new();
    for analyzer in builtin::all() {
        catalog.register(analyzer);
    }
    catalog
});

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The immutable catalog of builtin analyzers.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Register a prototype, returning the one it replaces, if any.
    pub fn register(&mut self, analyzer: Box<dyn Analyzer>) -> Option<Box<dyn Analyzer>> {
        self.analyzers.insert(analyzer.name(), analyzer)
    }

    pub fn get(&self, name: &str) -> Option<&dyn Analyzer> {
        self.analyzers.get(name).map(|a| a.as_ref())
    }

    /// Fresh, unbound clone of the named prototype.
    pub fn instantiate(&self, name: &str) -> Option<Box<dyn Analyzer>> {
        self.get(name).map(|a| a.clone_box())
    }

    /// Prototypes in name order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Analyzer> {
        self.analyzers.values().map(|a| a.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.analyzers.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 22);
        for name in [
            "is-there-a-race",
            "my-apm",
            "my-race",
            "my-race-is",
            "date",
            "my-name",
            "replay-name",
            "replay-path",
            "my-win",
            "my-game",
            "map-name",
            "is-1v1",
            "is-2v2",
            "duration-minutes",
            "duration-minutes-is-greater-than",
            "duration-minutes-is-lower-than",
            "matchup",
            "my-matchup",
            "matchup-is",
            "my-matchup-is",
            "my-first-specific-unit-seconds",
            "my-spawning-pool-seconds",
        ] {
            assert!(catalog.get(name).is_some(), "missing {name}");
        }
    }

    #[test]
    fn test_names_are_ordered() {
        let names: Vec<&str> = Catalog::builtin().names().collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_flag_kinds() {
        let catalog = Catalog::builtin();
        let race_is = catalog.get("my-race-is").unwrap();
        assert!(race_is.is_string_flag());
        assert!(race_is.is_boolean_result());

        let apm = catalog.get("my-apm").unwrap();
        assert!(!apm.is_string_flag());
        assert!(!apm.is_boolean_result());

        assert!(catalog.get("is-1v1").unwrap().is_boolean_result());
        assert!(catalog.get("my-race-is").unwrap().depends_on().is_empty());
    }

    #[test]
    fn test_instantiate_does_not_touch_prototype() {
        let catalog = Catalog::builtin();
        let mut instance = catalog.instantiate("my-race-is").unwrap();
        instance.set_arguments(&["Zerg".to_string()]).unwrap();
        assert_eq!(catalog.get("my-race-is").unwrap().is_done(), ("", false));
        assert!(catalog.instantiate("no-such-analyzer").is_none());
    }

    #[test]
    fn test_register_replaces() {
        let mut catalog = Catalog::new();
        assert!(catalog.is_empty());
        assert!(catalog
            .register(Catalog::builtin().instantiate("map-name").unwrap())
            .is_none());
        assert!(catalog
            .register(Catalog::builtin().instantiate("map-name").unwrap())
            .is_some());
        assert_eq!(catalog.len(), 1);
    }
}
