use horatio_model::{Category, SchemaDocument, SchemaError, TypeRegistry, emit_schema};
use pretty_assertions::assert_eq;
use serde_json::json;

const LINKED: &str = r#"{ "types": [
    { "name": "Node", "kind": "record",
      "fields": [ { "name": "value", "type": "long" },
                  { "name": "next",  "type": "MaybeNode" } ] },
    { "name": "MaybeNode", "kind": "union", "of": ["null", "Node"] },
    { "name": "Nodes", "kind": "array", "items": "Node" },
    { "name": "Index", "kind": "map", "values": "Node" }
] }"#;

#[test]
fn cyclic_document_loads_and_emits() {
    let mut registry = TypeRegistry::with_primitives();
    let doc = SchemaDocument::from_json_str(LINKED, "linked.json").unwrap();
    let ids = doc.load_into(&mut registry).unwrap();
    assert_eq!(ids.len(), 4);
    registry.check().unwrap();

    let schema = emit_schema(&registry);
    assert_eq!(
        schema["Node"],
        json!({
            "kind": "record",
            "fields": [
                { "name": "value", "type": "long" },
                { "name": "next", "type": "MaybeNode" },
            ],
        })
    );
    assert_eq!(schema["MaybeNode"], json!({ "kind": "union", "of": ["null", "Node"] }));
    assert_eq!(schema["Nodes"], json!({ "kind": "array", "items": "Node" }));
    assert_eq!(schema["Index"], json!({ "kind": "map", "values": "Node" }));
}

#[test]
fn later_document_satisfies_earlier_forward_reference() {
    let first = SchemaDocument::from_json_str(
        r#"{ "types": [ { "name": "Order", "kind": "record",
                          "fields": [ { "name": "customer", "type": "Customer" } ] } ] }"#,
        "orders.json",
    )
    .unwrap();
    let second = SchemaDocument::from_json_str(
        r#"{ "types": [ { "name": "Customer", "kind": "record",
                          "fields": [ { "name": "orders", "type": "Orders" } ] },
                        { "name": "Orders", "kind": "array", "items": "Order" } ] }"#,
        "customers.json",
    )
    .unwrap();

    let mut registry = TypeRegistry::with_primitives();
    let order = first.load_into(&mut registry).unwrap()[0];
    assert_eq!(registry.check().unwrap_err().key, "Customer");

    second.load_into(&mut registry).unwrap();
    registry.check().unwrap();

    let reachable: Vec<_> = registry
        .reachable(order)
        .unwrap()
        .into_iter()
        .map(|id| registry.name_of(id).unwrap().to_owned())
        .collect();
    assert_eq!(reachable, ["Order", "Customer", "Orders"]);
}

#[test]
fn redefinition_across_documents_is_rejected() {
    let mut registry = TypeRegistry::with_primitives();
    let doc = SchemaDocument::from_json_str(LINKED, "linked.json").unwrap();
    doc.load_into(&mut registry).unwrap();
    let before = registry.len();

    let err = doc.load_into(&mut registry).unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateDefinition { ref name } if name == "Node"));
    assert_eq!(registry.len(), before);
}

#[test]
fn primitive_aliases_and_enums() {
    let doc = SchemaDocument::from_json_str(
        r#"{ "types": [
            { "name": "Timestamp", "kind": "primitive", "primitive": "long" },
            { "name": "Level", "kind": "enum", "symbols": ["LOW", "HIGH"] },
            { "name": "Event", "kind": "record",
              "fields": [ { "name": "at", "type": "Timestamp" },
                          { "name": "level", "type": "Level" } ] }
        ] }"#,
        "events.json",
    )
    .unwrap();
    let mut registry = TypeRegistry::new();
    let ids = doc.load_into(&mut registry).unwrap();
    let categories: Vec<_> = registry
        .element_defs(ids[2])
        .unwrap()
        .into_iter()
        .map(|d| d.category())
        .collect();
    assert_eq!(categories, [Category::Primitive, Category::Enum]);

    assert_eq!(
        emit_schema(&registry),
        json!({
            "Timestamp": { "kind": "primitive", "primitive": "long" },
            "Level": { "kind": "enum", "symbols": ["LOW", "HIGH"] },
            "Event": {
                "kind": "record",
                "fields": [
                    { "name": "at", "type": "Timestamp" },
                    { "name": "level", "type": "Level" },
                ],
            },
        })
    );
}

#[test]
fn unknown_kind_is_a_document_error() {
    let err = SchemaDocument::from_json_str(
        r#"{ "types": [ { "name": "T", "kind": "tuple" } ] }"#,
        "bad.json",
    )
    .unwrap_err();
    assert!(matches!(err, SchemaError::Document { .. }));
    assert!(err.to_string().contains("bad.json"));
}

#[test]
fn misspelled_keys_are_document_errors() {
    for (src, bad_key) in [
        (
            r#"{ "types": [ { "name": "P", "kind": "record",
                              "feilds": [ { "name": "x", "type": "Nope" } ] } ] }"#,
            "feilds",
        ),
        (
            r#"{ "types": [ { "name": "P", "kind": "record",
                              "fields": [ { "name": "x", "typ": "Nope" } ] } ] }"#,
            "typ",
        ),
        (r#"{ "types": [], "version": 2 }"#, "version"),
    ] {
        let err = SchemaDocument::from_json_str(src, "typo.json").unwrap_err();
        match err {
            SchemaError::Document { source_name, path, message } => {
                assert_eq!(source_name, "typo.json");
                assert!(message.contains(bad_key), "message was {message}");
                if bad_key != "version" {
                    assert!(path.starts_with("types[0]"), "path was {path}");
                }
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
