use serde::Serialize;
use serde_json::json;
use xmlmaker::{Key, Node, Result, Scalar, Value, XmlMakerError};

#[derive(Serialize)]
struct Address {
    street: String,
    city: String,
}

#[derive(Serialize)]
struct Person {
    name: String,
    age: u32,
    active: bool,
    nickname: Option<String>,
    address: Address,
    phones: Vec<String>,
}

fn sample_person() -> Person {
    Person {
        name: "Ada".to_string(),
        age: 36,
        active: true,
        nickname: None,
        address: Address {
            street: "1 Main St".to_string(),
            city: "London".to_string(),
        },
        phones: vec!["123".to_string(), "456".to_string()],
    }
}

#[test]
fn test_scalar_read_back() -> Result<()> {
    let mut node = Node::default();
    node.set("text", "hello")?;
    node.set("number", &7)?;
    node.set("float", &0.25)?;
    node.set("yes", &true)?;
    node.set("nothing", &None::<u8>)?;

    assert_eq!(node["text"], "hello");
    assert_eq!(node["number"], 7);
    assert_eq!(node["float"], 0.25);
    assert_eq!(node["yes"], true);
    assert!(node["nothing"].is_null());

    // reading a stored null does not turn it into a node
    assert!(node.get("nothing").is_null());

    Ok(())
}

#[test]
fn test_implicit_creation_returns_same_node() -> Result<()> {
    let mut node = Node::new("doc");

    node.child("a")?.insert("first", 1);
    node.child("a")?.insert("second", 2);

    assert_eq!(node.len(), 1);
    let a = node.peek("a").and_then(Value::as_node).expect("a is a node");
    assert_eq!(a.len(), 2);
    assert_eq!(a.root_name(), "doc");

    Ok(())
}

#[test]
fn test_live_reference_mutation() {
    let mut node = Node::default();
    {
        let handle = node.get("a");
        if let Value::Node(child) = handle {
            child.insert("x", "1");
        }
    }
    assert_eq!(node["a"]["x"], "1");

    node.attributes_mut().insert("id".to_string(), Scalar::from("5"));
    assert_eq!(node.attributes()["id"], Scalar::from("5"));
}

#[test]
fn test_has_and_remove_do_not_create() {
    let mut node = Node::default();
    assert!(!node.has("ghost"));
    assert!(node.remove("ghost").is_none());
    assert!(node.peek("ghost").is_none());
    assert!(node.is_empty());
}

#[test]
fn test_set_struct() -> Result<()> {
    let node = Node::from_serialize("person", &sample_person())?;

    assert_eq!(node["name"], "Ada");
    assert_eq!(node["age"], 36);
    assert!(node["nickname"].is_null());
    assert_eq!(node["address"]["city"], "London");
    assert_eq!(node["phones"][0], "123");
    assert_eq!(node["phones"][1], "456");

    let keys: Vec<String> = node.keys().map(ToString::to_string).collect();
    assert_eq!(
        keys,
        vec!["name", "age", "active", "nickname", "address", "phones"]
    );

    Ok(())
}

#[test]
fn test_last_write_wins_including_type() -> Result<()> {
    let mut node = Node::default();
    node.set("field", &json!({"nested": 1}))?;
    assert!(node["field"].is_node());

    node.set("field", "scalar")?;
    assert_eq!(node["field"], "scalar");

    node["field"] = Node::new("other").into();
    assert!(node["field"].is_node());
    assert_eq!(node.len(), 1);

    Ok(())
}

#[test]
fn test_bracket_set_and_field_set_disagree_on_unsupported_values() {
    let mut bad = std::collections::BTreeMap::new();
    bad.insert(vec![1u8], "x");

    let mut node = Node::default();
    let err = node.set("map", &bad).unwrap_err();
    assert!(matches!(err, XmlMakerError::UnsupportedValue { .. }));
    assert!(!node.has("map"));

    node.offset_set("map", &bad);
    assert!(node["map"].as_node().is_some_and(Node::is_empty));
}

#[test]
fn test_to_plain_is_pure() {
    let mut node = Node::default();
    node["a"]["b"] = 1.into();
    node.add_item("row", json!({"x": 1}));
    let snapshot = node.clone();

    let first = node.to_plain();
    let second = node.to_plain();

    assert_eq!(first, second);
    assert_eq!(node, snapshot);
}

#[test]
fn test_parse_round_trip() -> Result<()> {
    let mut original = Node::new("doc");
    original.set_attribute("lang", "en");
    original.set("person", &sample_person())?;
    original["meta"]["created"] = "today".into();
    original
        .child("meta")?
        .set_attribute("source", "test")
        .set_attribute("rev", 3);

    let plain = original.to_json_value()?;
    println!("plain form:\n{}", serde_json::to_string_pretty(&plain)?);

    let mut rebuilt = Node::new("doc");
    rebuilt.parse(&plain);
    assert_eq!(rebuilt, original);

    Ok(())
}

#[test]
fn test_parsed_items_render_as_items() -> Result<()> {
    let mut original = Node::default();
    original.add_item("row", "x").add_item("row", json!({"a": 1}));

    let mut rebuilt = Node::default();
    rebuilt.parse(&original.to_json_value()?);

    // stored as an ordinary child node
    let items = rebuilt.peek("@items").expect("@items present");
    assert!(items.as_items().is_none());
    assert_eq!(rebuilt["@items"]["row"][0], "x");

    assert_eq!(rebuilt.to_plain(), original.to_plain());
    assert_eq!(rebuilt.to_xml()?, original.to_xml()?);
    assert!(rebuilt.to_xml()?.contains("<root><row/><row><a>1</a></row></root>"));

    Ok(())
}

#[test]
fn test_item_root_names() -> Result<()> {
    let mut node = Node::new("doc");
    node.add_item_value("row", &json!({"a": 1}))?;
    node.add_item("raw", json!({"a": 1}));

    let groups = node.peek("@items").and_then(Value::as_items).expect("item groups");
    assert_eq!(groups["row"][0].as_node().expect("parsed row").root_name(), "doc");
    assert_eq!(groups["raw"][0].as_node().expect("converted row").root_name(), "root");

    // the root name of a payload never shows up in the parent's document
    assert!(node.to_xml()?.contains("<doc><row><a>1</a></row><raw><a>1</a></raw></doc>"));

    Ok(())
}

#[test]
fn test_json_output() -> Result<()> {
    let mut node = Node::default();
    node.set_attribute("id", "1");
    node.insert("name", "Test");
    node.insert(Key::Index(0), "zero");
    node.add_item("row", json!({"a": 1}));

    assert_eq!(
        node.to_json_string()?,
        r#"{"@attributes":{"id":"1"},"name":"Test","0":"zero","@items":{"row":[{"a":1}]}}"#
    );

    Ok(())
}
