//! Ordered, deduplicating record of every icon discovered in a build.

use indexmap::IndexSet;
use parking_lot::Mutex;

use crate::icon::IconName;

/// Every icon name discovered so far, in order of first discovery.
///
/// Owned by a [`crate::build::Build`]; a fresh build starts empty.
/// All methods take `&self` and are safe to call from several threads.
#[derive(Debug, Default)]
pub struct Accumulator {
    names: Mutex<IndexSet<IconName>>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one name. Returns `true` if it was not already present.
    pub fn insert(&self, name: impl Into<IconName>) -> bool {
        self.names.lock().insert(name.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.lock().contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.lock().is_empty()
    }

    /// Copy of all names in accumulation order.
    pub fn snapshot(&self) -> Vec<IconName> {
        self.names.lock().iter().cloned().collect()
    }

    /// Admit the candidates of one scan and return the ones that are new.
    ///
    /// `seed` is staged first, but only if nothing has been accumulated
    /// yet. `found` follows in the order given. The emptiness check, the
    /// membership tests and the insertions share one lock acquisition, so
    /// two concurrent scans can never both admit the same name or both
    /// apply the seed.
    pub fn admit<'a, S, F>(&self, seed: S, found: F) -> Vec<IconName>
    where
        S: IntoIterator<Item = &'a str>,
        F: IntoIterator<Item = &'a str>,
    {
        let mut names = self.names.lock();
        let seeding = names.is_empty();

        let staged = seed
            .into_iter()
            .filter(|_| seeding)
            .chain(found);

        let mut admitted = Vec::new();
        for candidate in staged {
            if names.insert(IconName::from(candidate)) {
                admitted.push(IconName::from(candidate));
            }
        }
        admitted
    }
}
