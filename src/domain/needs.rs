use std::collections::{BTreeMap, btree_map};

use crate::domain::Need;

/// The needs of one documentation build, keyed by ID.
///
/// Iteration is in ascending ID order, so everything derived from a [`Needs`]
/// is deterministic regardless of the order the needs were declared in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Needs {
    needs: BTreeMap<String, Need>,
}

impl Needs {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            needs: BTreeMap::new(),
        }
    }

    /// Inserts a need, keyed by its ID.
    ///
    /// Returns the need previously stored under the same ID, if any.
    pub fn insert(&mut self, need: Need) -> Option<Need> {
        self.needs.insert(need.id().to_string(), need)
    }

    /// Looks up a need by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Need> {
        self.needs.get(id)
    }

    /// Whether a need with the given ID exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.needs.contains_key(id)
    }

    /// The number of needs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.needs.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.needs.is_empty()
    }

    /// Iterates over the needs in ID order.
    pub fn iter(&self) -> btree_map::Values<'_, String, Need> {
        self.needs.values()
    }
}

impl FromIterator<Need> for Needs {
    fn from_iter<T: IntoIterator<Item = Need>>(iter: T) -> Self {
        let mut needs = Self::new();
        needs.extend(iter);
        needs
    }
}

impl Extend<Need> for Needs {
    fn extend<T: IntoIterator<Item = Need>>(&mut self, iter: T) {
        for need in iter {
            if let Some(replaced) = self.insert(need) {
                tracing::debug!("Duplicate need ID {}, keeping the last one", replaced.id());
            }
        }
    }
}

impl<'a> IntoIterator for &'a Needs {
    type Item = &'a Need;
    type IntoIter = btree_map::Values<'a, String, Need>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
