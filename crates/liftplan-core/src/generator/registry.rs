//! Generator registry -- a named collection of available generators.
//!
//! The CLI resolves the configured generator kind (e.g. `"command"`) to an
//! implementation through the registry.

use std::collections::HashMap;
use std::sync::Arc;

use super::trait_def::PlanGenerator;

/// A collection of registered [`PlanGenerator`] implementations, keyed by
/// name.
///
/// # Example
///
/// ```ignore
/// let mut registry = GeneratorRegistry::new();
/// registry.register(CommandGenerator::new());
/// let generator = registry.get("command").unwrap();
/// ```
#[derive(Default)]
pub struct GeneratorRegistry {
    generators: HashMap<String, Arc<dyn PlanGenerator>>,
}

impl GeneratorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a generator under the name returned by
    /// [`PlanGenerator::name`].
    ///
    /// If a generator with the same name is already registered, it is
    /// replaced and the old one is returned.
    pub fn register(
        &mut self,
        generator: impl PlanGenerator + 'static,
    ) -> Option<Arc<dyn PlanGenerator>> {
        let name = generator.name().to_string();
        self.generators.insert(name, Arc::new(generator))
    }

    /// Look up a generator by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn PlanGenerator>> {
        self.generators.get(name).cloned()
    }

    /// List the names of all registered generators, sorted.
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.generators.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("generators", &self.list())
            .finish()
    }
}
