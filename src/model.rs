//! Type descriptors.
//!
//! - [`Type`]: a name plus a [`Category`] tag, the base of every descriptor.
//! - [`TypeRef`]: a deferred handle to a type, bound eagerly or by name.
//! - [`CompositeType`]: a type built from an ordered, fixed list of `TypeRef`s.
//! - [`defs`]: the concrete variants and the closed [`TypeDef`] sum over them.
pub mod category;
pub mod composite;
pub mod defs;
pub mod type_ref;

pub use category::Category;
pub use composite::CompositeType;
pub use defs::{
    ArrayType, EnumType, MapType, PrimitiveKind, PrimitiveType, RecordType, TypeDef, UnionType,
};
pub use type_ref::TypeRef;

use crate::error::ConstructionError;

/// Name and kind of a schema type. Immutable once built.
///
/// No `PartialEq`: two types are the same type only when they are the same
/// registry entry, which is compared through [`TypeId`](crate::TypeId).
#[derive(Debug, Clone)]
pub struct Type {
    name: String,
    category: Category,
}

impl Type {
    pub fn new(name: impl Into<String>, category: Category) -> Result<Self, ConstructionError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConstructionError::EmptyName);
        }
        Ok(Self { name, category })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

// ------------------------------- Tests ------------------------------------ //
