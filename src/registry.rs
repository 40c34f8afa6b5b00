//! Name → star lookup, keyed per component of a multiple system.

use std::collections::HashMap;

/// Index of a star in a [`crate::StarCatalog`].
pub type StarId = usize;

/// Stars registered under one name.
///
/// `primary` holds the star registered with component 0 (the whole system, or a
/// record without component letters). `components[k - 1]` holds the star for
/// component `k`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameSlot {
    pub primary: Option<StarId>,
    pub components: Vec<Option<StarId>>,
}

impl NameSlot {
    /// Find the star this name refers to for component `comp`.
    ///
    /// A specific component falls back to the primary only while the name has no
    /// per-component entries. A whole-system lookup falls back to the component
    /// entries when they all refer to the same star.
    pub fn resolve(&self, comp: u32) -> Option<StarId> {
        if comp > 0 {
            match self.components.get(comp as usize - 1).copied().flatten() {
                Some(id) => Some(id),
                None if self.components.iter().all(Option::is_none) => self.primary,
                None => None,
            }
        } else {
            self.primary.or_else(|| self.single_component_star())
        }
    }

    /// The one distinct star among the component entries, if there is exactly one.
    fn single_component_star(&self) -> Option<StarId> {
        let mut stars = self.components.iter().flatten();
        let first = *stars.next()?;
        stars.all(|id| *id == first).then_some(first)
    }

    /// Whether any entry refers to a star other than `id`.
    pub fn references_other_than(&self, id: StarId) -> bool {
        self.stars().any(|other| other != id)
    }

    /// Every star id held by this slot, primary first.
    pub fn stars(&self) -> impl Iterator<Item = StarId> + '_ {
        self.primary
            .into_iter()
            .chain(self.components.iter().flatten().copied())
    }

    fn entry_mut(&mut self, comp: u32) -> &mut Option<StarId> {
        if comp == 0 {
            return &mut self.primary;
        }
        let index = comp as usize - 1;
        if self.components.len() <= index {
            self.components.resize(index + 1, None);
        }
        &mut self.components[index]
    }
}

/// Map from every known name to the stars registered under it.
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    slots: HashMap<String, NameSlot>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&NameSlot> {
        self.slots.get(name)
    }

    /// Resolve `name` for component `comp`; see [`NameSlot::resolve`].
    pub fn resolve(&self, name: &str, comp: u32) -> Option<StarId> {
        self.slots.get(name).and_then(|slot| slot.resolve(comp))
    }

    /// Record that `name` with component `comp` refers to star `id`.
    ///
    /// Entries are never overwritten with a different star; the merge engine checks
    /// for conflicts before registering.
    pub fn register(&mut self, name: &str, comp: u32, id: StarId) {
        let entry = self.slots.entry(name.to_string()).or_default().entry_mut(comp);
        debug_assert!(
            entry.map_or(true, |existing| existing == id),
            "{name} component {comp} already refers to another star"
        );
        if entry.is_none() {
            *entry = Some(id);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All names registered, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_system_name() {
        let mut reg = NameRegistry::new();
        reg.register("HD 48915", 0, 7);
        assert_eq!(reg.resolve("HD 48915", 0), Some(7));
        // without per-component entries any component resolves to the system
        assert_eq!(reg.resolve("HD 48915", 1), Some(7));
        assert_eq!(reg.resolve("HD 48915", 3), Some(7));
        assert_eq!(reg.resolve("HD 1", 0), None);
    }

    #[test]
    fn component_entries() {
        let mut reg = NameRegistry::new();
        reg.register("ADS 5423", 1, 3);
        reg.register("ADS 5423", 2, 4);
        assert_eq!(reg.resolve("ADS 5423", 1), Some(3));
        assert_eq!(reg.resolve("ADS 5423", 2), Some(4));
        assert_eq!(reg.resolve("ADS 5423", 3), None);
        // two distinct components: the system is ambiguous
        assert_eq!(reg.resolve("ADS 5423", 0), None);

        let slot = reg.get("ADS 5423").unwrap();
        assert!(slot.references_other_than(3));
        assert_eq!(slot.stars().collect::<Vec<_>>(), vec![3, 4]);
    }

    #[test]
    fn component_entries_hide_the_primary() {
        let mut reg = NameRegistry::new();
        reg.register("Gl 244", 0, 1);
        reg.register("Gl 244", 2, 5);
        assert_eq!(reg.resolve("Gl 244", 0), Some(1));
        assert_eq!(reg.resolve("Gl 244", 2), Some(5));
        assert_eq!(reg.resolve("Gl 244", 1), None);
    }

    #[test]
    fn single_component_resolves_the_system() {
        let mut reg = NameRegistry::new();
        reg.register("Gl 559", 2, 9);
        assert_eq!(reg.resolve("Gl 559", 0), Some(9));
        assert!(!reg.get("Gl 559").unwrap().references_other_than(9));
        assert_eq!(reg.get("Gl 559").unwrap().components, vec![None, Some(9)]);
    }

    #[test]
    fn re_registering_the_same_star_is_harmless() {
        let mut reg = NameRegistry::new();
        reg.register("Sirius", 0, 2);
        reg.register("Sirius", 0, 2);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.resolve("Sirius", 0), Some(2));
        assert_eq!(reg.names().collect::<Vec<_>>(), vec!["Sirius"]);
    }
}
