use crate::core::engine::traits::Mutator;

/// Fixed catalog of mutators a language engine iterates over
pub struct MutatorRegistry {
    mutators: Vec<Box<dyn Mutator>>,
}

impl MutatorRegistry {
    pub fn new() -> Self {
        Self {
            mutators: Vec::new(),
        }
    }

    /// Register a mutator. Names are unique; a later registration with a known name is ignored.
    pub fn register<T: Mutator + 'static>(&mut self, mutator: T) {
        if self.get(mutator.name()).is_some() {
            log::warn!("Mutator {} is already registered", mutator.name());
            return;
        }
        self.mutators.push(Box::new(mutator));
    }

    /// Look up a mutator by its stable name
    pub fn get(&self, name: &str) -> Option<&dyn Mutator> {
        self.mutators
            .iter()
            .find(|m| m.name() == name)
            .map(|m| m.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Mutator> {
        self.mutators.iter().map(|m| m.as_ref())
    }

    /// All mutator names in registration order
    pub fn names(&self) -> Vec<&'static str> {
        self.mutators.iter().map(|m| m.name()).collect()
    }

    /// Resolve a list of names, skipping (and reporting) unknown ones
    pub fn select(&self, names: &[&str]) -> Vec<&dyn Mutator> {
        names
            .iter()
            .filter_map(|name| {
                let found = self.get(name);
                if found.is_none() {
                    log::warn!("Unknown mutator: {name}");
                }
                found
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.mutators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutators.is_empty()
    }
}

impl Default for MutatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
