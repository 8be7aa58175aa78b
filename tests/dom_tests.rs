use std::rc::Rc;

use form_tree::model::record::Record;
use form_tree::structure::context::{FormContext, LeafChildNaming, NamingPolicy};
use form_tree::structure::field::FieldOptions;
use form_tree::structure::namespace::{Namespace, NestOne, RootOptions};
use form_tree::structure::namespace_collection::NestMany;
use form_tree::value::value_model::Value;

mod common;

use common::fixtures::{list, map, user};

fn plain_user() -> Value {
    map(vec![
        ("name", Value::from("Alice")),
        ("age", Value::from(36)),
        ("profile", map(vec![("bio", Value::from("Hello"))])),
        (
            "addresses",
            list(vec![
                map(vec![("street", Value::from("1 Main St"))]),
                map(vec![("street", Value::from("2 Side St"))]),
            ]),
        ),
    ])
}

// ============================================================================
// Names and ids from lineage
// ============================================================================

#[test]
fn root_field_name_and_id() {
    let root = Namespace::root("user", plain_user());
    let name = root.field("name").unwrap();

    assert_eq!(name.dom_id(), "user_name");
    assert_eq!(name.dom_name(), "user[name]");
    assert_eq!(name.dom_value(), "Alice");
}

#[test]
fn nested_namespace_field() {
    let root = Namespace::root("user", plain_user());
    let bio = root.nest_one("profile").unwrap().field("bio").unwrap();

    assert_eq!(bio.dom_name(), "user[profile][bio]");
    assert_eq!(bio.dom_id(), "user_profile_bio");
    assert_eq!(bio.dom_value(), "Hello");
}

#[test]
fn collection_item_fields_use_positional_keys() {
    let root = Namespace::root("user", plain_user());
    let mut names = Vec::new();
    let mut ids = Vec::new();

    root.nest_many(
        "addresses",
        NestMany::each_item(|address| {
            let street = address.field("street").unwrap();
            names.push(street.dom_name().to_string());
            ids.push(street.dom_id().to_string());
        }),
    )
    .unwrap();

    assert_eq!(
        names,
        vec!["user[addresses][0][street]", "user[addresses][1][street]"]
    );
    assert_eq!(ids, vec!["user_addresses_0_street", "user_addresses_1_street"]);
}

#[test]
fn persisted_root_heads_ids_with_its_identifier() {
    let root = Namespace::root("user", user());
    let name = root.field("name").unwrap();

    assert_eq!(root.dom_id(), "user_42");
    assert_eq!(name.dom_id(), "user_42_name");
    assert_eq!(name.dom_name(), "user[name]", "names never carry the identifier");
}

#[test]
fn only_the_root_contributes_its_identifier() {
    let profile = Record::new("Profile").with_id(7).attr("bio", "Hi").into_value();
    let root = Namespace::root("user", user());
    let nested = root
        .nest_one_with("profile", NestOne::new().object(profile))
        .unwrap();
    let bio = nested.field("bio").unwrap();

    assert_eq!(nested.dom_id(), "profile_7");
    assert_eq!(bio.dom_id(), "user_42_profile_bio");
    assert_eq!(bio.dom_name(), "user[profile][bio]");
}

#[test]
fn root_dom_id_override() {
    let root = Namespace::root_with(
        "user",
        user(),
        RootOptions {
            dom_id: Some("signup".to_string()),
            ..RootOptions::default()
        },
    );
    let email = root.field("email").unwrap();

    assert_eq!(root.dom_id(), "signup");
    assert_eq!(email.dom_id(), "signup_email");
    assert_eq!(email.dom_name(), "user[email]");
}

#[test]
fn namespace_dom_path() {
    let root = Namespace::root("user", plain_user());
    assert_eq!(root.dom().name(), "user");
    assert_eq!(root.dom().id(), "user");
    assert_eq!(root.dom().value(), "");

    let profile = root.nest_one("profile").unwrap();
    assert_eq!(profile.dom().name(), "user[profile]");
    assert_eq!(profile.dom().id(), "user_profile");
}

#[test]
fn lineage_runs_root_first() {
    let root = Namespace::root("user", plain_user());
    let bio = root.nest_one("profile").unwrap().field("bio").unwrap();
    let keys: Vec<&str> = bio
        .dom()
        .lineage()
        .iter()
        .map(|node| node.key().as_str())
        .collect();

    assert_eq!(keys, vec!["user", "profile", "bio"]);
}

// ============================================================================
// Values
// ============================================================================

#[test]
fn dom_values_are_stringified() {
    let root = Namespace::root("user", plain_user());
    assert_eq!(root.field("age").unwrap().dom_value(), "36");
    assert_eq!(root.field("missing").unwrap().dom_value(), "");
}

// ============================================================================
// Children of leaf fields
// ============================================================================

fn post() -> Value {
    map(vec![(
        "tags",
        list(vec![Value::from("rust"), Value::from("forms")]),
    )])
}

#[test]
fn leaf_children_add_nothing_to_names_by_default() {
    let root = Namespace::root("post", post());
    let tags = root.field("tags").unwrap();
    let mut names = Vec::new();
    let mut ids = Vec::new();

    tags.repeated(tags.value().clone()).each(|item| {
        let tag = item.field(FieldOptions::new());
        names.push(tag.dom_name().to_string());
        ids.push(tag.dom_id().to_string());
    });

    assert_eq!(names, vec!["post[tags]", "post[tags]"]);
    assert_eq!(ids, vec!["post_tags_rust", "post_tags_forms"]);
}

#[test]
fn leaf_children_can_use_empty_brackets() {
    let context = FormContext::new().with_naming(NamingPolicy {
        leaf_children: LeafChildNaming::EmptyBrackets,
    });
    let root = Namespace::root_with(
        "post",
        post(),
        RootOptions {
            context: Some(Rc::new(context)),
            ..RootOptions::default()
        },
    );
    let tags = root.field("tags").unwrap();
    let names: Vec<String> = tags
        .repeated(tags.value().clone())
        .items()
        .map(|item| item.field(FieldOptions::new()).dom_name().to_string())
        .collect();

    assert_eq!(names, vec!["post[tags][]", "post[tags][]"]);
    assert_eq!(tags.dom_name(), "post[tags]", "the leaf itself is unaffected");
}

#[test]
fn dom_path_debug_shows_all_three_parts() {
    let root = Namespace::root("user", plain_user());
    let name = root.field("name").unwrap();
    assert_eq!(
        format!("{:?}", name.dom()),
        r#"<DomPath id="user_name" name="user[name]" value="Alice"/>"#
    );
}
