//! JSON schema documents.
//!
//! A document is a flat list of type declarations. Every type mentioned by a
//! declaration is referenced lazily by name, so declarations may appear in any
//! order, refer to themselves, or refer to types from a document loaded later.
//!
//! ```json
//! { "types": [
//!   { "name": "Node", "kind": "record",
//!     "fields": [ { "name": "value", "type": "long" },
//!                 { "name": "next",  "type": "Node" } ] },
//!   { "name": "Nodes", "kind": "array", "items": "Node" }
//! ] }
//! ```
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};
use crate::model::{
    ArrayType, EnumType, MapType, PrimitiveKind, PrimitiveType, RecordType, TypeDef, TypeRef,
    UnionType,
};
use crate::registry::{TypeId, TypeRegistry};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDocument {
    pub types: Vec<TypeDecl>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", deny_unknown_fields)]
pub enum TypeDecl {
    /// Alias of a built-in primitive under a new name.
    Primitive { name: String, primitive: PrimitiveKind },
    Record {
        name: String,
        #[serde(default)]
        fields: Vec<FieldDecl>,
    },
    Array { name: String, items: String },
    Map { name: String, values: String },
    Union { name: String, of: Vec<String> },
    Enum { name: String, symbols: Vec<String> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl TypeDecl {
    pub fn name(&self) -> &str {
        match self {
            TypeDecl::Primitive { name, .. }
            | TypeDecl::Record { name, .. }
            | TypeDecl::Array { name, .. }
            | TypeDecl::Map { name, .. }
            | TypeDecl::Union { name, .. }
            | TypeDecl::Enum { name, .. } => name,
        }
    }

    pub fn to_def(&self) -> Result<TypeDef> {
        let def = match self {
            TypeDecl::Primitive { name, primitive } => {
                TypeDef::from(PrimitiveType::alias(name.as_str(), *primitive)?)
            }
            TypeDecl::Record { name, fields } => TypeDef::from(RecordType::new(
                name.as_str(),
                fields.iter().map(|f| (f.name.as_str(), TypeRef::named(f.ty.as_str()))),
            )?),
            TypeDecl::Array { name, items } => {
                TypeDef::from(ArrayType::new(name.as_str(), TypeRef::named(items.as_str()))?)
            }
            TypeDecl::Map { name, values } => {
                TypeDef::from(MapType::new(name.as_str(), TypeRef::named(values.as_str()))?)
            }
            TypeDecl::Union { name, of } => TypeDef::from(UnionType::new(
                name.as_str(),
                of.iter().map(|alt| TypeRef::named(alt.as_str())),
            )?),
            TypeDecl::Enum { name, symbols } => {
                TypeDef::from(EnumType::new(name.as_str(), symbols.iter().map(String::as_str))?)
            }
        };
        Ok(def)
    }
}

impl SchemaDocument {
    pub fn from_json_str(src: &str, source_name: &str) -> Result<Self> {
        crate::path_de::from_str_with_path(src, source_name)
    }

    pub fn from_json_slice(bytes: &[u8], source_name: &str) -> Result<Self> {
        crate::path_de::from_slice_with_path(bytes, source_name)
    }

    /// Define every declaration in document order.
    ///
    /// All declarations are validated before the first one is defined, so a
    /// failing document leaves `registry` untouched. References are not
    /// checked here; call [`TypeRegistry::check`] once every document is in.
    pub fn load_into(&self, registry: &mut TypeRegistry) -> Result<Vec<TypeId>> {
        let mut names = HashSet::with_capacity(self.types.len());
        for decl in &self.types {
            if registry.contains(decl.name()) || !names.insert(decl.name()) {
                return Err(SchemaError::DuplicateDefinition {
                    name: decl.name().to_owned(),
                });
            }
        }
        let defs = self
            .types
            .iter()
            .map(TypeDecl::to_def)
            .collect::<Result<Vec<_>>>()?;
        let ids = defs
            .into_iter()
            .map(|def| registry.define(def))
            .collect::<Result<Vec<_>>>()?;
        log::debug!("loaded {} type declaration(s)", ids.len());
        Ok(ids)
    }
}

// ------------------------------- Tests ------------------------------------ //
