//! JSON view of a registry.
//!
//! One entry per type, keyed by name in definition order. Element types are
//! written by name rather than inlined, so recursive types print finitely.
//! A reference that does not resolve is written as `{"$unresolved": key}`.
use serde_json::{json, Map, Value};

use crate::model::{TypeDef, TypeRef};
use crate::registry::TypeRegistry;

pub fn emit_schema(registry: &TypeRegistry) -> Value {
    let mut out = Map::new();
    for (_, def) in registry.iter() {
        out.insert(def.name().to_owned(), emit_type(registry, def));
    }
    Value::Object(out)
}

pub fn emit_type(registry: &TypeRegistry, def: &TypeDef) -> Value {
    let kind = def.category().as_str();
    match def {
        TypeDef::Primitive(p) => json!({
            "kind": kind,
            "primitive": p.kind(),
        }),
        TypeDef::Enum(e) => json!({
            "kind": kind,
            "symbols": e.symbols(),
        }),
        TypeDef::Array(a) => json!({
            "kind": kind,
            "items": emit_ref(registry, a.items()),
        }),
        TypeDef::Map(m) => json!({
            "kind": kind,
            "values": emit_ref(registry, m.values()),
        }),
        TypeDef::Record(r) => {
            let fields: Vec<Value> = r
                .field_names()
                .iter()
                .zip(def.element_refs())
                .map(|(name, ty)| json!({ "name": name, "type": emit_ref(registry, ty) }))
                .collect();
            json!({ "kind": kind, "fields": fields })
        }
        TypeDef::Union(u) => json!({
            "kind": kind,
            "of": u.alternatives().iter().map(|alt| emit_ref(registry, alt)).collect::<Vec<_>>(),
        }),
    }
}

fn emit_ref(registry: &TypeRegistry, r: &TypeRef) -> Value {
    match r.resolve(registry) {
        // `define` only admits bound ids that exist in `registry`
        Ok(id) => registry.name_of(id).map_or(Value::Null, Value::from),
        Err(err) => json!({ "$unresolved": err.key }),
    }
}

// ------------------------------- Tests ------------------------------------ //
