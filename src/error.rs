use thiserror::Error;

use crate::model::Category;
use crate::registry::TypeId;

/// Invalid arguments to a type constructor. The type is never created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("type name must not be empty")]
    EmptyName,

    #[error("`{name}`: {category} is not a composite category")]
    NotComposite { name: String, category: Category },

    #[error("{category} type `{name}` takes {expected} element type(s), got {found}")]
    ElementCount {
        name: String,
        category: Category,
        expected: &'static str,
        found: usize,
    },

    #[error("record `{record}` has a field with an empty name")]
    EmptyFieldName { record: String },

    #[error("record `{record}` declares field `{field}` more than once")]
    DuplicateField { record: String, field: String },

    #[error("enum `{name}` declares symbol `{symbol}` more than once")]
    DuplicateSymbol { name: String, symbol: String },
}

/// A lazy reference whose key has no matching type at resolution time.
///
/// Recoverable: the reference stays pending and a later call may succeed once
/// the key is defined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unresolved type reference `{key}`")]
pub struct UnresolvedReferenceError {
    pub key: String,
}

impl UnresolvedReferenceError {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error(transparent)]
    Unresolved(#[from] UnresolvedReferenceError),

    #[error("type `{name}` is already defined")]
    DuplicateDefinition { name: String },

    #[error("type `{owner}` is bound to {target}, which is not in this registry")]
    DanglingReference { owner: String, target: TypeId },

    #[error("registry cannot hold more than {} types", u32::MAX as u64 + 1)]
    RegistryFull,

    #[error("no type with id {0} in this registry")]
    UnknownType(TypeId),

    #[error("invalid schema document ({source_name}) at {path}: {message}")]
    Document {
        source_name: String,
        path: String,
        message: String,
    },
}

pub type Result<T, E = SchemaError> = std::result::Result<T, E>;
