use schemax::domain::pointer;
use serde_json::{json, Value};

fn rfc6901_document() -> Value {
    json!({
        "foo": ["bar", "baz"],
        "": 0,
        "a/b": 1,
        "c%d": 2,
        "e^f": 3,
        "g|h": 4,
        "i\\j": 5,
        "k\"l": 6,
        " ": 7,
        "m~n": 8
    })
}

#[test]
fn test_rfc6901_plain_pointers() {
    let doc = rfc6901_document();

    let cases: Vec<(&str, Value)> = vec![
        ("", doc.clone()),
        ("/foo", json!(["bar", "baz"])),
        ("/foo/0", json!("bar")),
        ("/", json!(0)),
        ("/a~1b", json!(1)),
        ("/c%d", json!(2)),
        ("/e^f", json!(3)),
        ("/g|h", json!(4)),
        ("/i\\j", json!(5)),
        ("/k\"l", json!(6)),
        ("/ ", json!(7)),
        ("/m~0n", json!(8)),
    ];

    for (ptr, expected) in cases {
        assert_eq!(
            pointer::evaluate(&doc, ptr),
            Some(&expected),
            "pointer {:?}",
            ptr
        );
    }
}

#[test]
fn test_rfc6901_fragment_pointers() {
    let doc = rfc6901_document();

    let cases: Vec<(&str, Value)> = vec![
        ("#", doc.clone()),
        ("#/foo", json!(["bar", "baz"])),
        ("#/foo/0", json!("bar")),
        ("#/", json!(0)),
        ("#/a~1b", json!(1)),
        ("#/c%25d", json!(2)),
        ("#/e%5Ef", json!(3)),
        ("#/g%7Ch", json!(4)),
        ("#/i%5Cj", json!(5)),
        ("#/k%22l", json!(6)),
        ("#/%20", json!(7)),
        ("#/m~0n", json!(8)),
    ];

    for (ptr, expected) in cases {
        assert_eq!(
            pointer::evaluate(&doc, ptr),
            Some(&expected),
            "pointer {:?}",
            ptr
        );
    }
}

#[test]
fn test_escape_order() {
    // RFC 6901: ~1 must be rewritten before ~0, so "~01" becomes the key
    // "~1" rather than "/".
    let doc = json!({"~1": 1, "/": 2});
    assert_eq!(pointer::evaluate(&doc, "~01"), Some(&json!(1)));
}

#[test]
fn test_unresolved_pointers() {
    let doc = rfc6901_document();
    assert_eq!(pointer::evaluate(&doc, "/missing"), None);
    assert_eq!(pointer::evaluate(&doc, "/foo/2"), None);
    assert_eq!(pointer::evaluate(&doc, "/foo/bar"), None);
    assert_eq!(pointer::evaluate(&doc, "/foo/0/deeper"), None);
}
