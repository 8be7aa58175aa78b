use std::rc::Rc;

use indexmap::IndexMap;

use form_tree::model::record::Record;
use form_tree::structure::error::StructureError;
use form_tree::structure::namespace::Namespace;
use form_tree::structure::namespace_collection::{Collection, NestMany};
use form_tree::value::value_model::Value;

mod common;

use common::fixtures::{list, map};

fn address(street: &str) -> Value {
    map(vec![("street", Value::from(street))])
}

// ============================================================================
// Positional collections
// ============================================================================

#[test]
fn one_namespace_per_element_in_order() {
    let root = Namespace::root(
        "user",
        map(vec![(
            "addresses",
            list(vec![address("1 Main St"), address("2 Side St")]),
        )]),
    );
    let mut seen = Vec::new();

    let addresses = root
        .nest_many(
            "addresses",
            NestMany::each_item(|item| {
                let street = item.field("street").unwrap();
                seen.push((
                    item.key().to_string(),
                    street.dom_name().to_string(),
                    street.value().to_display(),
                ));
            }),
        )
        .unwrap();

    assert_eq!(
        seen,
        vec![
            (
                "0".to_string(),
                "user[addresses][0][street]".to_string(),
                "1 Main St".to_string()
            ),
            (
                "1".to_string(),
                "user[addresses][1][street]".to_string(),
                "2 Side St".to_string()
            ),
        ]
    );
    assert_eq!(addresses.len(), 2);
    assert_eq!(addresses.key().as_str(), "addresses");
}

#[test]
fn items_stay_reachable_after_building() {
    let root = Namespace::root(
        "user",
        map(vec![("addresses", list(vec![address("A"), address("B")]))]),
    );
    let addresses = root
        .nest_many(
            "addresses",
            NestMany::each_item(|item| {
                item.field("street").unwrap();
            }),
        )
        .unwrap();

    let second = addresses.get("1").unwrap();
    let street = second.get("street").unwrap();
    assert_eq!(
        street.as_field().unwrap().value(),
        &Value::from("B"),
        "fields built in the callback are memoized in the item"
    );
    let keys: Vec<&str> = addresses.iter().map(|ns| ns.key().as_str()).collect();
    assert_eq!(keys, vec!["0", "1"]);
}

#[test]
fn items_of_records_carry_their_objects() {
    let root = Namespace::root(
        "order",
        map(vec![(
            "lines",
            list(vec![
                Record::new("Line").with_id(5).attr("qty", 2).into_value(),
                Record::new("Line").attr("qty", 1).into_value(),
            ]),
        )]),
    );
    let mut quantities = Vec::new();

    root.nest_many(
        "lines",
        NestMany::each_item(|line| {
            quantities.push(line.field("qty").unwrap().value().clone());
        }),
    )
    .unwrap();

    assert_eq!(quantities, vec![Value::from(2), Value::from(1)]);
}

// ============================================================================
// Keyed collections
// ============================================================================

#[test]
fn keyed_collections_use_element_keys() {
    let root = Namespace::root(
        "user",
        map(vec![(
            "addresses",
            map(vec![("home", address("Home St")), ("work", address("Work Ave"))]),
        )]),
    );
    let mut names = Vec::new();

    root.nest_many(
        "addresses",
        NestMany::each_item(|item| {
            names.push(item.field("street").unwrap().dom_name().to_string());
        }),
    )
    .unwrap();

    assert_eq!(
        names,
        vec!["user[addresses][home][street]", "user[addresses][work][street]"]
    );
}

#[test]
fn keyed_collections_keep_insertion_order() {
    let root = Namespace::root(
        "user",
        map(vec![(
            "addresses",
            map(vec![
                ("work", address("Work Ave")),
                ("home", address("Home St")),
                ("10", address("Tenth St")),
                ("2", address("Second St")),
            ]),
        )]),
    );
    let collection = root
        .nest_many("addresses", NestMany::each_item(|_| {}))
        .unwrap();

    let keys: Vec<String> = collection.iter().map(|item| item.key().to_string()).collect();
    assert_eq!(keys, vec!["work", "home", "10", "2"], "items follow the source map, not key order");
}

// ============================================================================
// Collection sources
// ============================================================================

#[test]
fn explicit_collection_overrides_source() {
    let root = Namespace::root(
        "user",
        map(vec![("addresses", list(vec![address("Ignored")]))]),
    );
    let collection = root
        .nest_many(
            "addresses",
            NestMany::each_item(|_| {}).collection(vec![address("X"), address("Y"), address("Z")]),
        )
        .unwrap();

    assert_eq!(collection.len(), 3);
}

#[test]
fn default_collection_when_source_is_empty() {
    let root = Namespace::root("user", map(vec![("addresses", Value::Null)]));
    let collection = root
        .nest_many(
            "addresses",
            NestMany::each_item(|_| {}).default_to(vec![address("blank")]),
        )
        .unwrap();

    assert_eq!(collection.len(), 1);
    assert_eq!(
        collection.collection(),
        &Collection::List(vec![address("blank")])
    );
}

#[test]
fn missing_source_is_an_empty_collection() {
    let root = Namespace::root("user", Value::Null);
    let mut calls = 0;
    let collection = root
        .nest_many("addresses", NestMany::each_item(|_| calls += 1))
        .unwrap();

    assert!(collection.is_empty());
    assert_eq!(calls, 0);
}

#[test]
fn scalar_source_is_a_single_element() {
    let root = Namespace::root("user", map(vec![("emails", Value::from("a@b.c"))]));
    let collection = root
        .nest_many("emails", NestMany::each_item(|_| {}))
        .unwrap();

    assert_eq!(collection.len(), 1);
    assert_eq!(
        collection.namespaces()[0].object(),
        Some(&Value::from("a@b.c"))
    );
}

#[test]
fn as_key_renames_the_collection() {
    let root = Namespace::root(
        "user",
        map(vec![("addresses", list(vec![address("A")]))]),
    );
    let mut name = String::new();

    root.nest_many(
        "addresses",
        NestMany::each_item(|item| {
            name = item.field("street").unwrap().dom_name().to_string();
        })
        .as_key("addresses_attributes"),
    )
    .unwrap();

    assert_eq!(name, "user[addresses_attributes][0][street]");
    assert!(root.get("addresses_attributes").is_some());
}

#[test]
fn callbacks_can_nest_further() {
    let root = Namespace::root(
        "survey",
        map(vec![(
            "questions",
            list(vec![map(vec![(
                "answers",
                list(vec![
                    map(vec![("text", Value::from("yes"))]),
                    map(vec![("text", Value::from("no"))]),
                ]),
            )])]),
        )]),
    );
    let mut names = Vec::new();

    root.nest_many(
        "questions",
        NestMany::each_item(|question| {
            question
                .nest_many(
                    "answers",
                    NestMany::each_item(|answer| {
                        names.push(answer.field("text").unwrap().dom_name().to_string());
                    }),
                )
                .unwrap();
        }),
    )
    .unwrap();

    assert_eq!(
        names,
        vec![
            "survey[questions][0][answers][0][text]",
            "survey[questions][0][answers][1][text]",
        ]
    );
}

// ============================================================================
// Missing callback
// ============================================================================

#[test]
fn missing_item_callback_is_a_configuration_error() {
    let root = Namespace::root(
        "user",
        map(vec![("addresses", list(vec![address("A")]))]),
    );

    let err = root.nest_many("addresses", NestMany::new()).unwrap_err();

    assert_eq!(
        err,
        StructureError::MissingItemCallback {
            key: "addresses".to_string()
        }
    );
    assert!(root.get("addresses").is_none(), "nothing is stored on failure");
    assert!(err.to_string().contains("requires a per-item callback"));
}

// ============================================================================
// Coercion
// ============================================================================

#[test]
fn coerce_normalizes_sources() {
    assert_eq!(Collection::coerce(Value::Null), Collection::List(vec![]));
    assert_eq!(
        Collection::coerce(Value::from(3)),
        Collection::List(vec![Value::from(3)])
    );

    let mut keyed = IndexMap::new();
    keyed.insert("a".to_string(), Value::from(1));
    assert_eq!(
        Collection::coerce(Value::Map(keyed.clone())),
        Collection::Keyed(keyed)
    );
}

#[test]
fn entries_stringify_positions() {
    let collection = Collection::from(vec![Value::from("x"), Value::from("y")]);
    let keys: Vec<String> = collection
        .entries()
        .into_iter()
        .map(|(key, _)| key.to_string())
        .collect();
    assert_eq!(keys, vec!["0", "1"]);
}

#[test]
fn item_namespaces_share_the_parent_context() {
    let root = Namespace::root("user", map(vec![("tags", list(vec![Value::from("a")]))]));
    let collection = root
        .nest_many("tags", NestMany::each_item(|_| {}))
        .unwrap();

    assert!(Rc::ptr_eq(
        collection.namespaces()[0].context(),
        root.context()
    ));
}
