//! In-memory type graph for schema descriptions.
//!
//! Types live in a [`TypeRegistry`] and are addressed by [`TypeId`]. Composite
//! types (records, arrays, maps, unions) never embed the types they are built
//! from; they hold [`TypeRef`]s that are resolved against the registry on
//! demand. That indirection is what lets a record mention itself, or two
//! records mention each other, while the graph is still being defined.
//!
//! ```
//! use horatio_model::{RecordType, TypeDef, TypeRef, TypeRegistry};
//!
//! let mut registry = TypeRegistry::with_primitives();
//! let node = RecordType::new("Node", [
//!     ("value", TypeRef::named("long")),
//!     ("next", TypeRef::named("Node")),
//! ]).unwrap();
//! let node = registry.define(TypeDef::Record(node)).unwrap();
//!
//! let elems = registry.element_types(node).unwrap();
//! assert_eq!(elems[1], node);
//! ```
pub mod document;
pub mod emit;
pub mod error;
pub mod model;
pub mod path_de;
pub mod registry;

pub use document::{FieldDecl, SchemaDocument, TypeDecl};
pub use emit::emit_schema;
pub use error::{ConstructionError, SchemaError, UnresolvedReferenceError};
pub use model::{
    ArrayType, Category, CompositeType, EnumType, MapType, PrimitiveKind, PrimitiveType,
    RecordType, Type, TypeDef, TypeRef, UnionType,
};
pub use registry::{TypeId, TypeLookup, TypeRegistry, Unresolved};
