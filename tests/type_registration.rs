//! Integration tests for field type registration and lookup.

use field_registry::{DefinitionRegistry, RegistryError, TypeDefinition};
use serde_json::json;

#[test]
fn test_registered_type_is_returned_unchanged() {
    let mut registry = DefinitionRegistry::new();
    let def = TypeDefinition::new("input")
        .with_template("<input ng-model=\"model[options.key]\">")
        .with_wrapper("label");

    registry.set_type(def.clone()).unwrap();

    assert_eq!(registry.get_type("input"), Some(&def));
}

#[test]
fn test_overwrite_ok_is_stripped() {
    let mut registry = DefinitionRegistry::new();
    let def = TypeDefinition::new("input").with_template_url("input.html");

    registry.set_type(def.clone().overwrite_ok()).unwrap();

    let stored = registry.get_type("input").unwrap();
    assert!(!stored.overwrite_ok);
    assert_eq!(stored, &def);
}

#[test]
fn test_default_options_only_is_valid() {
    let mut registry = DefinitionRegistry::new();
    registry
        .set_type(
            TypeDefinition::new("email")
                .extends("input")
                .with_default_options(json!({"templateOptions": {"type": "email"}})),
        )
        .unwrap();

    let stored = registry.get_type("email").unwrap();
    assert_eq!(stored.extends.as_deref(), Some("input"));
}

#[test]
fn test_missing_name() {
    let mut registry = DefinitionRegistry::new();

    let err = registry.set_type(TypeDefinition::default()).unwrap_err();
    assert!(matches!(err, RegistryError::MissingName { .. }));

    let err = registry
        .set_type(TypeDefinition::new("").with_template("t"))
        .unwrap_err();
    assert!(matches!(err, RegistryError::MissingName { .. }));
}

#[test]
fn test_missing_content() {
    let mut registry = DefinitionRegistry::new();
    let err = registry.set_type(TypeDefinition::new("x")).unwrap_err();

    assert!(matches!(err, RegistryError::MissingContent { .. }));
    assert!(registry.get_type("x").is_none());
}

#[test]
fn test_ambiguous_content() {
    let mut registry = DefinitionRegistry::new();
    let err = registry
        .set_type(
            TypeDefinition::new("x")
                .with_template("t")
                .with_template_url("u"),
        )
        .unwrap_err();

    assert!(matches!(err, RegistryError::AmbiguousContent { .. }));
    assert!(err.to_string().contains("You provided both"));
}

#[test]
fn test_name_is_checked_before_content() {
    let mut registry = DefinitionRegistry::new();
    let err = registry
        .set_type(json!({"template": "t", "templateUrl": "u"}))
        .unwrap_err();

    assert!(matches!(err, RegistryError::MissingName { .. }));
}

#[test]
fn test_json_object_and_array() {
    let mut registry = DefinitionRegistry::new();
    registry
        .set_type(json!([
            {"name": "input", "template": "<input>"},
            {"name": "checkbox", "templateUrl": "checkbox.html"}
        ]))
        .unwrap();

    assert_eq!(
        registry.get_type("checkbox").unwrap().template_url.as_deref(),
        Some("checkbox.html")
    );
    assert_eq!(registry.types().count(), 2);
}

#[test]
fn test_json_scalar_is_invalid_argument() {
    let mut registry = DefinitionRegistry::new();

    let err = registry.set_type(json!("input")).unwrap_err();
    assert!(matches!(
        err,
        RegistryError::InvalidArgument {
            operation: "setType",
            ..
        }
    ));
    assert!(err.to_string().ends_with("You provided: \"input\""));

    let err = registry.set_type(json!(null)).unwrap_err();
    assert!(matches!(err, RegistryError::InvalidArgument { .. }));
}

#[test]
fn test_get_type_with_empty_name() {
    let registry = DefinitionRegistry::new();

    assert!(registry.get_type("").is_none());
    assert!(registry.require_type("", &json!({"key": "a"})).unwrap().is_none());
}

#[test]
fn test_require_type_reports_context() {
    let mut registry = DefinitionRegistry::new();
    registry
        .set_type(TypeDefinition::new("input").with_template("<input>"))
        .unwrap();

    assert!(registry
        .require_type("input", &json!({}))
        .unwrap()
        .is_some());

    let err = registry
        .require_type("missing", &json!({"key": "firstName"}))
        .unwrap_err();
    match &err {
        RegistryError::UnknownType { name, context } => {
            assert_eq!(name, "missing");
            assert_eq!(context, r#"{"key":"firstName"}"#);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("firstName"));
}

#[test]
fn test_get_type_missing_without_error() {
    let registry = DefinitionRegistry::new();
    assert!(registry.get_type("missing").is_none());
}

#[test]
fn test_json_validation_order_before_shape() {
    let mut registry = DefinitionRegistry::new();

    let err = registry.set_type(json!({"template": 5})).unwrap_err();
    assert!(matches!(err, RegistryError::MissingName { .. }));

    let err = registry
        .set_type(json!({"name": "x", "wrapper": 5}))
        .unwrap_err();
    assert!(matches!(err, RegistryError::MissingContent { .. }));

    let err = registry
        .set_type(json!({"name": "x", "template": 5, "templateUrl": "x.html"}))
        .unwrap_err();
    assert!(matches!(err, RegistryError::AmbiguousContent { .. }));
}

#[test]
fn test_json_wrong_property_shape_is_malformed() {
    let mut registry = DefinitionRegistry::new();

    let err = registry
        .set_type(json!({"name": "x", "template": 5}))
        .unwrap_err();
    assert!(matches!(err, RegistryError::MalformedDefinition { .. }));
    assert!(registry.get_type("x").is_none());
}

#[test]
fn test_json_wrapper_name_may_be_a_string() {
    let mut registry = DefinitionRegistry::new();
    registry
        .set_type(json!({"name": "x", "template": "t", "wrapper": "bootstrapLabel"}))
        .unwrap();

    let wrapper = registry.get_type("x").unwrap().wrapper.as_ref().unwrap();
    assert_eq!(wrapper.iter().collect::<Vec<_>>(), vec!["bootstrapLabel"]);
}

#[test]
fn test_json_type_round_trip_keeps_unknown_properties() {
    let mut registry = DefinitionRegistry::new();
    let raw = json!({
        "name": "x",
        "template": "t",
        "wrapper": ["label", "errors"],
        "controller": "XCtrl",
        "data": {"a": 1}
    });

    registry.set_type(raw.clone()).unwrap();

    let stored = registry.get_type("x").unwrap();
    assert_eq!(serde_json::to_value(stored).unwrap(), raw);
}

#[test]
fn test_json_overwrite_ok_is_not_kept_as_extra() {
    let mut registry = DefinitionRegistry::new();
    registry
        .set_type(json!({"name": "x", "template": "t", "overwriteOk": true, "link": "fn"}))
        .unwrap();

    assert_eq!(
        serde_json::to_value(registry.get_type("x").unwrap()).unwrap(),
        json!({"name": "x", "template": "t", "link": "fn"})
    );
}
