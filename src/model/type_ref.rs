//! Deferred references to registered types.
//!
//! A [`TypeRef`] is either *bound* to a [`TypeId`] from the start, or *pending*
//! on a lookup key. A pending reference is resolved through a [`TypeLookup`]
//! the first time it is asked for its target; success is memoized in a
//! single-assignment cell, failure leaves it pending so it can be retried once
//! more of the schema is defined.
//!
//! ```text
//! PENDING --lookup hit--> BOUND    (terminal)
//! PENDING --lookup miss-> PENDING  (retryable)
//! ```
use once_cell::sync::OnceCell;

use crate::error::UnresolvedReferenceError;
use crate::registry::{TypeId, TypeLookup};

#[derive(Debug, Clone)]
pub struct TypeRef(Slot);

#[derive(Debug, Clone)]
enum Slot {
    Bound(TypeId),
    Pending { key: String, target: OnceCell<TypeId> },
}

impl TypeRef {
    /// Eager reference to a type that is already registered.
    pub fn bound(id: TypeId) -> Self {
        Self(Slot::Bound(id))
    }

    /// Lazy reference, looked up by `key` on first use.
    pub fn named(key: impl Into<String>) -> Self {
        Self(Slot::Pending {
            key: key.into(),
            target: OnceCell::new(),
        })
    }

    /// Lookup key of a lazy reference; `None` for eager ones.
    pub fn key(&self) -> Option<&str> {
        match &self.0 {
            Slot::Bound(_) => None,
            Slot::Pending { key, .. } => Some(key),
        }
    }

    /// Target if already known, without attempting a lookup.
    pub fn bound_target(&self) -> Option<TypeId> {
        match &self.0 {
            Slot::Bound(id) => Some(*id),
            Slot::Pending { target, .. } => target.get().copied(),
        }
    }

    pub fn is_bound(&self) -> bool {
        self.bound_target().is_some()
    }

    /// Target of this reference, looking it up through `lookup` if still
    /// pending.
    ///
    /// Once this returns `Ok(id)`, every later call returns the same `id`
    /// without consulting `lookup` again. Concurrent first resolutions race on
    /// the cell and all observe the winner.
    pub fn resolve<L>(&self, lookup: &L) -> Result<TypeId, UnresolvedReferenceError>
    where
        L: TypeLookup + ?Sized,
    {
        match &self.0 {
            Slot::Bound(id) => Ok(*id),
            Slot::Pending { key, target } => target
                .get_or_try_init(|| match lookup.lookup(key) {
                    Some(id) => {
                        log::debug!("bound type reference `{key}` to {id}");
                        Ok(id)
                    }
                    None => {
                        log::trace!("type reference `{key}` still pending");
                        Err(UnresolvedReferenceError::new(key.as_str()))
                    }
                })
                .copied(),
        }
    }
}

impl From<TypeId> for TypeRef {
    fn from(id: TypeId) -> Self {
        TypeRef::bound(id)
    }
}

impl From<&str> for TypeRef {
    fn from(key: &str) -> Self {
        TypeRef::named(key)
    }
}

impl From<String> for TypeRef {
    fn from(key: String) -> Self {
        TypeRef::named(key)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::HashMap;

    use super::*;

    /// Lookup table that counts how often it is consulted.
    struct Counting {
        table: HashMap<&'static str, TypeId>,
        hits: Cell<usize>,
    }

    impl TypeLookup for Counting {
        fn lookup(&self, key: &str) -> Option<TypeId> {
            self.hits.set(self.hits.get() + 1);
            self.table.get(key).copied()
        }
    }

    fn counting(entries: &[(&'static str, u32)]) -> Counting {
        Counting {
            table: entries.iter().map(|(k, i)| (*k, TypeId::new(*i))).collect(),
            hits: Cell::new(0),
        }
    }

    #[test]
    fn bound_reference_never_looks_up() {
        let lookup = counting(&[]);
        let r = TypeRef::bound(TypeId::new(3));
        assert!(r.is_bound());
        assert_eq!(r.key(), None);
        assert_eq!(r.resolve(&lookup), Ok(TypeId::new(3)));
        assert_eq!(lookup.hits.get(), 0);
    }

    #[test]
    fn named_reference_is_memoized() {
        let lookup = counting(&[("Foo", 7)]);
        let r = TypeRef::named("Foo");
        assert!(!r.is_bound());
        assert_eq!(r.resolve(&lookup), Ok(TypeId::new(7)));
        assert_eq!(r.resolve(&lookup), Ok(TypeId::new(7)));
        assert_eq!(lookup.hits.get(), 1);
        assert_eq!(r.bound_target(), Some(TypeId::new(7)));
    }

    #[test]
    fn bound_target_does_not_change_with_a_different_lookup() {
        let first = counting(&[("Foo", 1)]);
        let second = counting(&[("Foo", 2)]);
        let r = TypeRef::named("Foo");
        assert_eq!(r.resolve(&first), Ok(TypeId::new(1)));
        assert_eq!(r.resolve(&second), Ok(TypeId::new(1)));
        assert_eq!(second.hits.get(), 0);
    }

    #[test]
    fn miss_leaves_reference_pending() {
        let empty = counting(&[]);
        let r = TypeRef::named("Foo");
        assert_eq!(r.resolve(&empty), Err(UnresolvedReferenceError::new("Foo")));
        assert!(!r.is_bound());

        let later = counting(&[("Foo", 4)]);
        assert_eq!(r.resolve(&later), Ok(TypeId::new(4)));
    }
}
