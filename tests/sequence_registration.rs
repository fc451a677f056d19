//! Integration tests for sequence registration.
//!
//! A failing element stops the sequence but does not undo the elements
//! registered before it.

use field_registry::{
    DefinitionRegistry, RegistryError, TypeDefinition, TypeInput, WrapperOptions, TRANSCLUDE_TAG,
};
use serde_json::json;

#[test]
fn test_type_sequence_keeps_earlier_elements() {
    let mut registry = DefinitionRegistry::new();

    let err = registry
        .set_type(vec![
            TypeDefinition::new("a").with_template("a"),
            TypeDefinition::new("b"),
            TypeDefinition::new("c").with_template("c"),
        ])
        .unwrap_err();

    assert!(matches!(err, RegistryError::MissingContent { .. }));
    assert!(registry.get_type("a").is_some());
    assert!(registry.get_type("b").is_none());
    assert!(registry.get_type("c").is_none());
}

#[test]
fn test_nested_type_sequences() {
    let mut registry = DefinitionRegistry::new();

    registry
        .set_type(TypeInput::Many(vec![
            TypeDefinition::new("a").with_template("a").into(),
            TypeInput::Many(vec![
                TypeDefinition::new("b").with_template("b").into(),
                json!({"name": "c", "templateUrl": "c.html"}).into(),
            ]),
        ]))
        .unwrap();

    let names: Vec<_> = registry.types().filter_map(TypeDefinition::name).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn test_json_type_sequence_stops_at_invalid_element() {
    let mut registry = DefinitionRegistry::new();

    let err = registry
        .set_type(json!([{"name": "a", "template": "a"}, 7, {"name": "b", "template": "b"}]))
        .unwrap_err();

    assert!(matches!(err, RegistryError::InvalidArgument { .. }));
    assert!(registry.get_type("a").is_some());
    assert!(registry.get_type("b").is_none());
}

#[test]
fn test_wrapper_sequence_keeps_earlier_elements() {
    let mut registry = DefinitionRegistry::new();
    let template = format!("<div>{TRANSCLUDE_TAG}</div>");

    let err = registry
        .set_wrapper(
            vec![
                WrapperOptions::template(template.as_str()).named("first"),
                WrapperOptions::template("<div></div>").named("second"),
                WrapperOptions::template(template.as_str()).named("third"),
            ],
            None,
        )
        .unwrap_err();

    assert!(matches!(err, RegistryError::MissingTransclude { .. }));
    assert!(registry.get_wrapper(Some("first")).is_some());
    assert!(registry.get_wrapper(Some("second")).is_none());
    assert!(registry.get_wrapper(Some("third")).is_none());
}

#[test]
fn test_separate_registries_are_isolated() {
    let mut forms = DefinitionRegistry::new();
    let mut admin = DefinitionRegistry::new();

    forms
        .set_type(TypeDefinition::new("input").with_template("<input>"))
        .unwrap();
    admin
        .set_type(TypeDefinition::new("input").with_template("<input class=\"admin\">"))
        .unwrap();

    assert_eq!(
        forms.get_type("input").unwrap().template.as_deref(),
        Some("<input>")
    );
    assert_eq!(
        admin.get_type("input").unwrap().template.as_deref(),
        Some("<input class=\"admin\">")
    );
}
