use schemax::{compile, Compiler, SchemaError};
use serde_json::{json, Value};

fn assert_invalid_schema(schema: Value) {
    assert!(
        compile(&schema).is_err(),
        "expected schema to be rejected: {}",
        schema
    );
}

#[test]
fn test_wrong_keyword_value() {
    assert_invalid_schema(json!({"minItems": -1}));
    assert!(compile(&json!({"minItems": 0})).is_ok());
    assert!(compile(&json!({"minItems": 1})).is_ok());

    assert_invalid_schema(json!({"type": "everything"}));
    assert_invalid_schema(json!({"required": [1]}));
    assert_invalid_schema(json!({"multipleOf": 0}));
}

#[test]
fn test_wrong_ref() {
    assert_invalid_schema(json!({
        "properties": {"a": {"$ref": "#/no_exist_pointer"}}
    }));

    assert_invalid_schema(json!({
        "properties": {"a": {"$ref": "#/definitions/no_exist_definition"}},
        "definitions": {"int": {"type": "integer"}}
    }));
    assert!(compile(&json!({
        "properties": {"a": {"$ref": "#/definitions/int"}},
        "definitions": {"int": {"type": "integer"}}
    }))
    .is_ok());

    assert_invalid_schema(json!({
        "properties": {"a": {"$ref": "#/myDefinitions/4"}},
        "myDefinitions": [
            {"type": "integer"},
            {"type": "string"},
            {"type": "boolean"}
        ]
    }));
    assert!(compile(&json!({
        "properties": {"a": {"$ref": "#/myDefinitions/2"}},
        "myDefinitions": [
            {"type": "integer"},
            {"type": "string"},
            {"type": "boolean"}
        ]
    }))
    .is_ok());
}

#[test]
fn test_pure_reference_cycles() {
    assert_invalid_schema(json!({"$ref": "#"}));

    assert_invalid_schema(json!({
        "definitions": {
            "a": {"$ref": "#/definitions/b"},
            "b": {"$ref": "#/definitions/a"}
        },
        "$ref": "#/definitions/a"
    }));

    // Recursion through a keyword node stays compilable.
    assert!(compile(&json!({
        "properties": {"child": {"$ref": "#"}}
    }))
    .is_ok());
}

#[test]
fn test_unresolvable_remote() {
    let result = compile(&json!({"$ref": "http://localhost:1234/never-registered.json"}));
    match result {
        Err(SchemaError::UnresolvableRef { uri }) => {
            assert_eq!(uri, "http://localhost:1234/never-registered.json");
        }
        other => panic!("expected UnresolvableRef, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_invalid_pattern() {
    assert!(compile(&json!({"pattern": "a("})).is_err());
    assert!(compile(&json!({"pattern": "a+"})).is_ok());
}

#[test]
fn test_check_schema_can_be_disabled() {
    // Without meta-validation a structurally broken keyword value is still a
    // compile error, but one the compiler reports itself.
    let compiler = Compiler::new().check_schema(false);
    assert!(compiler.compile(&json!({"minItems": -1})).is_ok());
    assert!(compiler.compile(&json!({"type": 12})).is_err());
    assert!(compiler.compile(&json!({"enum": []})).is_err());
}
