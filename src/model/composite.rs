use super::{Category, Type, TypeRef};
use crate::error::{ConstructionError, UnresolvedReferenceError};
use crate::registry::{TypeId, TypeLookup};

/// A type built from other types.
///
/// The element references are fixed at construction: never reordered, never
/// replaced. What they point at is only known once they are resolved, so the
/// resolved view is rebuilt on every [`element_types`](Self::element_types)
/// call.
#[derive(Debug, Clone)]
pub struct CompositeType {
    ty: Type,
    elem_types: Box<[TypeRef]>,
}

impl CompositeType {
    pub fn new(
        name: impl Into<String>,
        category: Category,
        elem_types: impl IntoIterator<Item = TypeRef>,
    ) -> Result<Self, ConstructionError> {
        let ty = Type::new(name, category)?;
        if !category.is_composite() {
            return Err(ConstructionError::NotComposite {
                name: ty.name().to_owned(),
                category,
            });
        }
        Ok(Self {
            ty,
            elem_types: elem_types.into_iter().collect(),
        })
    }

    pub fn as_type(&self) -> &Type {
        &self.ty
    }

    pub fn name(&self) -> &str {
        self.ty.name()
    }

    pub fn category(&self) -> Category {
        self.ty.category()
    }

    /// The stored references, in construction order.
    pub fn element_refs(&self) -> &[TypeRef] {
        &self.elem_types
    }

    pub fn len(&self) -> usize {
        self.elem_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elem_types.is_empty()
    }

    /// Resolve every element reference, in order.
    ///
    /// Either every reference resolves or the first failure is returned; a
    /// partial list is never produced.
    pub fn element_types<L>(&self, lookup: &L) -> Result<Vec<TypeId>, UnresolvedReferenceError>
    where
        L: TypeLookup + ?Sized,
    {
        self.elem_types.iter().map(|r| r.resolve(lookup)).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn table(entries: &[(&str, u32)]) -> HashMap<String, TypeId> {
        entries
            .iter()
            .map(|(k, i)| (k.to_string(), TypeId::new(*i)))
            .collect()
    }

    #[test]
    fn elements_keep_length_and_order() {
        let lookup = table(&[("a", 0), ("b", 1), ("c", 2)]);
        let c = CompositeType::new(
            "U",
            Category::Union,
            [
                TypeRef::named("c"),
                TypeRef::named("a"),
                TypeRef::bound(TypeId::new(9)),
                TypeRef::named("b"),
                TypeRef::named("a"),
            ],
        )
        .unwrap();
        let ids = c.element_types(&lookup).unwrap();
        assert_eq!(ids.len(), c.len());
        assert_eq!(
            ids,
            [2, 0, 9, 1, 0].map(TypeId::new).to_vec(),
        );
    }

    #[test]
    fn empty_element_list_is_allowed() {
        let c = CompositeType::new("Empty", Category::Record, []).unwrap();
        assert!(c.is_empty());
        assert_eq!(c.element_types(&table(&[])).unwrap(), vec![]);
    }

    #[test]
    fn one_miss_fails_the_whole_call() {
        let lookup = table(&[("a", 0)]);
        let c = CompositeType::new(
            "R",
            Category::Record,
            [TypeRef::named("a"), TypeRef::named("missing"), TypeRef::named("a")],
        )
        .unwrap();
        let err = c.element_types(&lookup).unwrap_err();
        assert_eq!(err.key, "missing");
        // the hit before the miss is still memoized on its own reference
        assert!(c.element_refs()[0].is_bound());
        assert!(!c.element_refs()[1].is_bound());
    }

    #[test]
    fn non_composite_category_is_rejected() {
        let err = CompositeType::new("Color", Category::Enum, []).unwrap_err();
        assert!(matches!(err, ConstructionError::NotComposite { .. }));
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = CompositeType::new("", Category::Array, [TypeRef::named("int")]).unwrap_err();
        assert_eq!(err, ConstructionError::EmptyName);
    }
}
