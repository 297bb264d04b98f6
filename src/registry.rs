//! Owner of every type in a schema, and the lookup that lazy references
//! resolve against.
//!
//! Types are stored in definition order in an [`IndexMap`] keyed by name; a
//! [`TypeId`] is the entry's index. References never own their targets, so a
//! `TypeId` or a resolved [`TypeRef`](crate::TypeRef) is only meaningful for
//! the registry that produced it.
use std::collections::HashMap;
use std::fmt;

use indexmap::{IndexMap, IndexSet};
use once_cell::sync::Lazy;

use crate::error::{Result, SchemaError, UnresolvedReferenceError};
use crate::model::{PrimitiveKind, PrimitiveType, TypeDef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// `None` past `u32::MAX`; a registry never holds more types than that.
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(Self)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Maps a lookup key to a registered type.
pub trait TypeLookup {
    fn lookup(&self, key: &str) -> Option<TypeId>;
}

impl<T: TypeLookup + ?Sized> TypeLookup for &T {
    fn lookup(&self, key: &str) -> Option<TypeId> {
        (**self).lookup(key)
    }
}

impl TypeLookup for HashMap<String, TypeId> {
    fn lookup(&self, key: &str) -> Option<TypeId> {
        self.get(key).copied()
    }
}

impl TypeLookup for IndexMap<String, TypeId> {
    fn lookup(&self, key: &str) -> Option<TypeId> {
        self.get(key).copied()
    }
}

static BUILTIN_PRIMITIVES: Lazy<Vec<PrimitiveType>> =
    Lazy::new(|| PrimitiveKind::ALL.into_iter().map(PrimitiveType::new).collect());

/// A reference that could not be resolved, and the type holding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved {
    pub owner: TypeId,
    pub key: String,
}

#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: IndexMap<String, TypeDef>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in primitives (`null`, `boolean`, `int`,
    /// `long`, `float`, `double`, `bytes`, `string`) already defined.
    pub fn with_primitives() -> Self {
        let mut registry = Self::new();
        for p in BUILTIN_PRIMITIVES.iter() {
            registry
                .types
                .insert(p.kind().canonical_name().to_owned(), TypeDef::Primitive(p.clone()));
        }
        registry
    }

    /// Add a type. Names are unique per registry.
    ///
    /// Every element already bound to an id must point at a type in this
    /// registry, or at the id the new type is about to receive.
    pub fn define(&mut self, def: impl Into<TypeDef>) -> Result<TypeId> {
        let def = def.into();
        if self.types.contains_key(def.name()) {
            return Err(SchemaError::DuplicateDefinition {
                name: def.name().to_owned(),
            });
        }
        let id = TypeId::from_index(self.types.len()).ok_or(SchemaError::RegistryFull)?;
        let dangling = def
            .element_refs()
            .iter()
            .filter_map(|r| r.bound_target())
            .find(|target| *target > id);
        if let Some(target) = dangling {
            return Err(SchemaError::DanglingReference {
                owner: def.name().to_owned(),
                target,
            });
        }
        self.types.insert(def.name().to_owned(), def);
        log::debug!("defined type `{}` as {id}", self.types[id.index()].name());
        Ok(id)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn get(&self, id: TypeId) -> Result<&TypeDef> {
        self.types
            .get_index(id.index())
            .map(|(_, def)| def)
            .ok_or(SchemaError::UnknownType(id))
    }

    pub fn by_name(&self, name: &str) -> Option<(TypeId, &TypeDef)> {
        let (index, _, def) = self.types.get_full(name)?;
        Some((id_at(index), def))
    }

    pub fn name_of(&self, id: TypeId) -> Result<&str> {
        Ok(self.get(id)?.name())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Every type, in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeDef)> {
        self.types
            .values()
            .enumerate()
            .map(|(index, def)| (id_at(index), def))
    }

    /// Resolved element types of `id`, in stored order. Non-composite types
    /// have none.
    pub fn element_types(&self, id: TypeId) -> Result<Vec<TypeId>> {
        match self.get(id)?.as_composite() {
            Some(composite) => Ok(composite.element_types(self)?),
            None => Ok(Vec::new()),
        }
    }

    /// Like [`element_types`](Self::element_types), but returning the
    /// definitions themselves.
    pub fn element_defs(&self, id: TypeId) -> Result<Vec<&TypeDef>> {
        self.element_types(id)?
            .into_iter()
            .map(|elem| self.get(elem))
            .collect()
    }

    /// Every reference that currently fails to resolve, in definition order
    /// of the owning type and then element order.
    pub fn unresolved(&self) -> Vec<Unresolved> {
        let mut out = Vec::new();
        for (owner, def) in self.iter() {
            for r in def.element_refs() {
                if let Err(UnresolvedReferenceError { key }) = r.resolve(self) {
                    out.push(Unresolved { owner, key });
                }
            }
        }
        out
    }

    /// Ok when every reference in the registry resolves.
    pub fn check(&self) -> Result<(), UnresolvedReferenceError> {
        let missing = self.unresolved();
        for Unresolved { owner, key } in &missing {
            let owner = self.name_of(*owner).unwrap_or("?");
            log::warn!("type `{owner}` references undefined type `{key}`");
        }
        match missing.into_iter().next() {
            Some(Unresolved { key, .. }) => Err(UnresolvedReferenceError { key }),
            None => Ok(()),
        }
    }

    /// Types reachable from `root` through element references, each listed
    /// once in depth-first discovery order, `root` first.
    pub fn reachable(&self, root: TypeId) -> Result<Vec<TypeId>> {
        let mut seen = IndexSet::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            let elems = self.element_types(id)?;
            stack.extend(elems.into_iter().rev().filter(|e| !seen.contains(e)));
        }
        Ok(seen.into_iter().collect())
    }
}

impl TypeLookup for TypeRegistry {
    fn lookup(&self, key: &str) -> Option<TypeId> {
        self.types.get_index_of(key).map(id_at)
    }
}

// Indices below `len()` always fit: `define` refuses to grow past `u32::MAX`.
fn id_at(index: usize) -> TypeId {
    TypeId(index as u32)
}

// ------------------------------- Tests ------------------------------------ //
