//! Concrete type variants.
//!
//! Each composite variant gives its own meaning to the element list of the
//! underlying [`CompositeType`]: one item type for arrays, one value type for
//! maps, one type per field for records, one per alternative for unions.
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Category, CompositeType, Type, TypeRef};
use crate::error::{ConstructionError, UnresolvedReferenceError};
use crate::registry::{TypeId, TypeLookup};

// ------------------------------ Primitives -------------------------------- //

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::Null,
        PrimitiveKind::Boolean,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
        PrimitiveKind::Bytes,
        PrimitiveKind::String,
    ];

    /// Name the type is registered under by default.
    pub fn canonical_name(self) -> &'static str {
        match self {
            PrimitiveKind::Null => "null",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Bytes => "bytes",
            PrimitiveKind::String => "string",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PrimitiveType {
    ty: Type,
    kind: PrimitiveKind,
}

impl PrimitiveType {
    pub fn new(kind: PrimitiveKind) -> Self {
        Self {
            ty: Type {
                name: kind.canonical_name().to_owned(),
                category: Category::Primitive,
            },
            kind,
        }
    }

    /// A primitive registered under another name, e.g. `timestamp` for `long`.
    pub fn alias(name: impl Into<String>, kind: PrimitiveKind) -> Result<Self, ConstructionError> {
        Ok(Self {
            ty: Type::new(name, Category::Primitive)?,
            kind,
        })
    }

    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }
}

// --------------------------------- Enums ---------------------------------- //

#[derive(Debug, Clone)]
pub struct EnumType {
    ty: Type,
    symbols: Box<[String]>,
}

impl EnumType {
    pub fn new<S>(name: impl Into<String>, symbols: impl IntoIterator<Item = S>) -> Result<Self, ConstructionError>
    where
        S: Into<String>,
    {
        let ty = Type::new(name, Category::Enum)?;
        let symbols: Box<[String]> = symbols.into_iter().map(Into::into).collect();
        if symbols.is_empty() {
            return Err(ConstructionError::ElementCount {
                name: ty.name,
                category: Category::Enum,
                expected: "at least 1",
                found: 0,
            });
        }
        if let Some(dup) = first_duplicate(&symbols) {
            return Err(ConstructionError::DuplicateSymbol {
                name: ty.name,
                symbol: dup.to_owned(),
            });
        }
        Ok(Self { ty, symbols })
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn ordinal(&self, symbol: &str) -> Option<usize> {
        self.symbols.iter().position(|s| s == symbol)
    }
}

// --------------------------------- Arrays --------------------------------- //

#[derive(Debug, Clone)]
pub struct ArrayType {
    composite: CompositeType,
}

impl ArrayType {
    pub fn new(name: impl Into<String>, items: impl Into<TypeRef>) -> Result<Self, ConstructionError> {
        Self::from_composite(CompositeType::new(name, Category::Array, [items.into()])?)
    }

    pub fn from_composite(composite: CompositeType) -> Result<Self, ConstructionError> {
        expect_category(&composite, Category::Array)?;
        expect_exactly_one(&composite)?;
        Ok(Self { composite })
    }

    pub fn items(&self) -> &TypeRef {
        &self.composite.element_refs()[0]
    }

    pub fn item_type<L>(&self, lookup: &L) -> Result<TypeId, UnresolvedReferenceError>
    where
        L: TypeLookup + ?Sized,
    {
        self.items().resolve(lookup)
    }
}

// ---------------------------------- Maps ---------------------------------- //

/// String-keyed map; the single element is the value type.
#[derive(Debug, Clone)]
pub struct MapType {
    composite: CompositeType,
}

impl MapType {
    pub fn new(name: impl Into<String>, values: impl Into<TypeRef>) -> Result<Self, ConstructionError> {
        Self::from_composite(CompositeType::new(name, Category::Map, [values.into()])?)
    }

    pub fn from_composite(composite: CompositeType) -> Result<Self, ConstructionError> {
        expect_category(&composite, Category::Map)?;
        expect_exactly_one(&composite)?;
        Ok(Self { composite })
    }

    pub fn values(&self) -> &TypeRef {
        &self.composite.element_refs()[0]
    }

    pub fn value_type<L>(&self, lookup: &L) -> Result<TypeId, UnresolvedReferenceError>
    where
        L: TypeLookup + ?Sized,
    {
        self.values().resolve(lookup)
    }
}

// -------------------------------- Records --------------------------------- //

/// Named fields; field `i` has element type `i`.
#[derive(Debug, Clone)]
pub struct RecordType {
    composite: CompositeType,
    field_names: Box<[String]>,
}

impl RecordType {
    pub fn new<N, R>(name: impl Into<String>, fields: impl IntoIterator<Item = (N, R)>) -> Result<Self, ConstructionError>
    where
        N: Into<String>,
        R: Into<TypeRef>,
    {
        let (field_names, refs): (Vec<String>, Vec<TypeRef>) = fields
            .into_iter()
            .map(|(n, r)| (n.into(), r.into()))
            .unzip();
        let composite = CompositeType::new(name, Category::Record, refs)?;
        Self::from_composite(composite, field_names)
    }

    pub fn from_composite(
        composite: CompositeType,
        field_names: impl IntoIterator<Item = String>,
    ) -> Result<Self, ConstructionError> {
        expect_category(&composite, Category::Record)?;
        let field_names: Box<[String]> = field_names.into_iter().collect();
        if field_names.len() != composite.len() {
            return Err(ConstructionError::ElementCount {
                name: composite.name().to_owned(),
                category: Category::Record,
                expected: "one per field name",
                found: composite.len(),
            });
        }
        if field_names.iter().any(String::is_empty) {
            return Err(ConstructionError::EmptyFieldName {
                record: composite.name().to_owned(),
            });
        }
        if let Some(dup) = first_duplicate(&field_names) {
            return Err(ConstructionError::DuplicateField {
                record: composite.name().to_owned(),
                field: dup.to_owned(),
            });
        }
        Ok(Self { composite, field_names })
    }

    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    pub fn field_ref(&self, field: &str) -> Option<&TypeRef> {
        let index = self.field_names.iter().position(|f| f == field)?;
        self.composite.element_refs().get(index)
    }

    /// `(field name, field type)` in declaration order; all-or-nothing like
    /// [`CompositeType::element_types`].
    pub fn fields<L>(&self, lookup: &L) -> Result<Vec<(&str, TypeId)>, UnresolvedReferenceError>
    where
        L: TypeLookup + ?Sized,
    {
        let types = self.composite.element_types(lookup)?;
        Ok(self.field_names.iter().map(String::as_str).zip(types).collect())
    }
}

// --------------------------------- Unions --------------------------------- //

#[derive(Debug, Clone)]
pub struct UnionType {
    composite: CompositeType,
}

impl UnionType {
    pub fn new<R>(name: impl Into<String>, alternatives: impl IntoIterator<Item = R>) -> Result<Self, ConstructionError>
    where
        R: Into<TypeRef>,
    {
        let refs = alternatives.into_iter().map(Into::into);
        Self::from_composite(CompositeType::new(name, Category::Union, refs)?)
    }

    pub fn from_composite(composite: CompositeType) -> Result<Self, ConstructionError> {
        expect_category(&composite, Category::Union)?;
        if composite.is_empty() {
            return Err(ConstructionError::ElementCount {
                name: composite.name().to_owned(),
                category: Category::Union,
                expected: "at least 1",
                found: 0,
            });
        }
        Ok(Self { composite })
    }

    pub fn alternatives(&self) -> &[TypeRef] {
        self.composite.element_refs()
    }
}

// -------------------------------- TypeDef --------------------------------- //

/// Every kind of type a registry can hold.
#[derive(Debug, Clone)]
pub enum TypeDef {
    Primitive(PrimitiveType),
    Enum(EnumType),
    Array(ArrayType),
    Map(MapType),
    Record(RecordType),
    Union(UnionType),
}

impl TypeDef {
    pub fn as_type(&self) -> &Type {
        match self {
            TypeDef::Primitive(p) => &p.ty,
            TypeDef::Enum(e) => &e.ty,
            TypeDef::Array(a) => a.composite.as_type(),
            TypeDef::Map(m) => m.composite.as_type(),
            TypeDef::Record(r) => r.composite.as_type(),
            TypeDef::Union(u) => u.composite.as_type(),
        }
    }

    pub fn name(&self) -> &str {
        self.as_type().name()
    }

    pub fn category(&self) -> Category {
        self.as_type().category()
    }

    pub fn as_composite(&self) -> Option<&CompositeType> {
        match self {
            TypeDef::Primitive(_) | TypeDef::Enum(_) => None,
            TypeDef::Array(a) => Some(&a.composite),
            TypeDef::Map(m) => Some(&m.composite),
            TypeDef::Record(r) => Some(&r.composite),
            TypeDef::Union(u) => Some(&u.composite),
        }
    }

    /// Stored element references; empty for non-composite types.
    pub fn element_refs(&self) -> &[TypeRef] {
        self.as_composite().map(CompositeType::element_refs).unwrap_or(&[])
    }
}

impl From<PrimitiveType> for TypeDef {
    fn from(p: PrimitiveType) -> Self {
        TypeDef::Primitive(p)
    }
}

impl From<EnumType> for TypeDef {
    fn from(e: EnumType) -> Self {
        TypeDef::Enum(e)
    }
}

impl From<ArrayType> for TypeDef {
    fn from(a: ArrayType) -> Self {
        TypeDef::Array(a)
    }
}

impl From<MapType> for TypeDef {
    fn from(m: MapType) -> Self {
        TypeDef::Map(m)
    }
}

impl From<RecordType> for TypeDef {
    fn from(r: RecordType) -> Self {
        TypeDef::Record(r)
    }
}

impl From<UnionType> for TypeDef {
    fn from(u: UnionType) -> Self {
        TypeDef::Union(u)
    }
}

// ------------------------------- Utilities -------------------------------- //

fn expect_category(composite: &CompositeType, category: Category) -> Result<(), ConstructionError> {
    if composite.category() == category {
        return Ok(());
    }
    Err(ConstructionError::NotComposite {
        name: composite.name().to_owned(),
        category: composite.category(),
    })
}

fn expect_exactly_one(composite: &CompositeType) -> Result<(), ConstructionError> {
    if composite.len() == 1 {
        return Ok(());
    }
    Err(ConstructionError::ElementCount {
        name: composite.name().to_owned(),
        category: composite.category(),
        expected: "exactly 1",
        found: composite.len(),
    })
}

fn first_duplicate(names: &[String]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(names.len());
    names.iter().map(String::as_str).find(|n| !seen.insert(*n))
}

// ------------------------------- Tests ------------------------------------ //
