//! Field type and template wrapper definitions.
//!
//! Types are stored as given (minus the `overwrite_ok` marker). Wrappers are
//! registered from [`WrapperOptions`] and stored as normalized
//! [`WrapperDefinition`]s whose name is resolved and whose `types` is always a list.
//!
//! Registration calls take [`TypeInput`] / [`WrapperInput`], which cover the
//! single, sequence, bare-template and raw JSON forms of an argument.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::registry_error::{describe, RegistryError, Result};

fn is_false(value: &bool) -> bool {
    !*value
}

/// An empty string counts as absent.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Whether a JSON property counts as set: missing, `null`, `false`, `0` and
/// `""` do not.
pub(crate) fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64() != Some(0.0),
        Some(_) => true,
    }
}

// -------------------------------------------------------------------------------------------------
// Field types
// -------------------------------------------------------------------------------------------------

/// A named, reusable field specification consumed by the rendering engine.
///
/// A stored type always has a name and at least one content source
/// (`default_options`, `template` or `template_url`), and never both a
/// `template` and a `template_url`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_options: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_url: Option<String>,

    /// Name of another type this one builds on. Resolved by the renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    /// Wrapper names applied around fields of this type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrapper: Option<WrapperTypes>,

    /// Suppresses the overwrite warning for this registration. Never stored.
    #[serde(default, skip_serializing_if = "is_false")]
    pub overwrite_ok: bool,

    /// Properties the registry does not interpret (controller, validators, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TypeDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn with_template_url(mut self, url: impl Into<String>) -> Self {
        self.template_url = Some(url.into());
        self
    }

    pub fn with_default_options(mut self, options: Value) -> Self {
        self.default_options = Some(options);
        self
    }

    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    /// Appends a wrapper name.
    pub fn with_wrapper(mut self, wrapper: impl Into<String>) -> Self {
        let mut names = self
            .wrapper
            .take()
            .map(WrapperTypes::into_vec)
            .unwrap_or_default();
        names.push(wrapper.into());
        self.wrapper = Some(WrapperTypes::Many(names));
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn overwrite_ok(mut self) -> Self {
        self.overwrite_ok = true;
        self
    }

    /// The name, if present and non-empty.
    pub fn name(&self) -> Option<&str> {
        present(&self.name)
    }

    pub(crate) fn has_default_options(&self) -> bool {
        truthy(self.default_options.as_ref())
    }
}

// -------------------------------------------------------------------------------------------------
// Template wrappers
// -------------------------------------------------------------------------------------------------

/// One name or a list of names, as supplied by the caller.
///
/// Used for a wrapper's type tags and for a type's wrapper names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WrapperTypes {
    One(String),
    Many(Vec<String>),
}

impl WrapperTypes {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            WrapperTypes::One(tag) => vec![tag],
            WrapperTypes::Many(tags) => tags,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let names: &[String] = match self {
            WrapperTypes::One(tag) => std::slice::from_ref(tag),
            WrapperTypes::Many(tags) => tags,
        };
        names.iter().map(String::as_str)
    }
}

impl From<&str> for WrapperTypes {
    fn from(tag: &str) -> Self {
        WrapperTypes::One(tag.to_string())
    }
}

impl From<String> for WrapperTypes {
    fn from(tag: String) -> Self {
        WrapperTypes::One(tag)
    }
}

impl From<Vec<String>> for WrapperTypes {
    fn from(tags: Vec<String>) -> Self {
        WrapperTypes::Many(tags)
    }
}

impl From<Vec<&str>> for WrapperTypes {
    fn from(tags: Vec<&str>) -> Self {
        WrapperTypes::Many(tags.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for WrapperTypes {
    fn from(tags: [&str; N]) -> Self {
        WrapperTypes::Many(tags.iter().map(|t| t.to_string()).collect())
    }
}

/// A wrapper registration request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrapperOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<WrapperTypes>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_url: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub overwrite_ok: bool,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WrapperOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a wrapper with an inline template.
    pub fn template(template: impl Into<String>) -> Self {
        Self {
            template: Some(template.into()),
            ..Self::default()
        }
    }

    pub fn with_template_url(mut self, url: impl Into<String>) -> Self {
        self.template_url = Some(url.into());
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn for_types(mut self, types: impl Into<WrapperTypes>) -> Self {
        self.types = Some(types.into());
        self
    }

    pub fn overwrite_ok(mut self) -> Self {
        self.overwrite_ok = true;
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Splits a JSON wrapper object into options and its raw `types` property.
///
/// `types` is held back so it can be validated after the wrapper checks.
/// Other properties of the wrong shape fail with
/// [`RegistryError::InvalidWrapper`].
pub(crate) fn wrapper_options_from_json(
    mut object: Map<String, Value>,
) -> Result<(WrapperOptions, Option<Value>)> {
    let types = object.remove("types");
    let value = Value::Object(object);
    let provided = describe(&value);
    let options = serde_json::from_value(value).map_err(|e| RegistryError::InvalidWrapper {
        reason: e.to_string(),
        wrapper: provided,
    })?;
    Ok((options, types))
}

/// Normalizes raw JSON `types` into tags.
///
/// Returns the tags plus the raw value when it is not a string or a list of
/// strings. Non-string list elements still contribute their JSON text to the
/// tags so the wrapper can be named.
pub(crate) fn normalize_json_types(raw: Value) -> (Vec<String>, Option<Value>) {
    match raw {
        Value::Null => (Vec::new(), None),
        Value::String(tag) => (vec![tag], None),
        Value::Array(items) if items.iter().all(Value::is_string) => (
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(tag) => Some(tag),
                    _ => None,
                })
                .collect(),
            None,
        ),
        Value::Array(items) => {
            let tags = items
                .iter()
                .map(|item| item.as_str().map(str::to_owned).unwrap_or_else(|| item.to_string()))
                .collect();
            (tags, Some(Value::Array(items)))
        }
        other => (Vec::new(), Some(other)),
    }
}

/// A normalized wrapper as held by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrapperDefinition {
    pub name: String,

    pub types: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_url: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WrapperDefinition {
    /// Whether this wrapper is tagged for the given field type.
    pub fn applies_to(&self, field_type: &str) -> bool {
        self.types.iter().any(|t| t == field_type)
    }
}

// -------------------------------------------------------------------------------------------------
// Registration inputs
// -------------------------------------------------------------------------------------------------

/// Argument accepted by `set_type`.
#[derive(Debug, Clone)]
pub enum TypeInput {
    One(TypeDefinition),
    Many(Vec<TypeInput>),
    /// Raw JSON: objects are definitions, arrays are sequences.
    Json(Value),
}

impl From<TypeDefinition> for TypeInput {
    fn from(def: TypeDefinition) -> Self {
        TypeInput::One(def)
    }
}

impl From<Vec<TypeDefinition>> for TypeInput {
    fn from(defs: Vec<TypeDefinition>) -> Self {
        TypeInput::Many(defs.into_iter().map(TypeInput::One).collect())
    }
}

impl From<Value> for TypeInput {
    fn from(value: Value) -> Self {
        TypeInput::Json(value)
    }
}

/// Argument accepted by `set_wrapper`.
#[derive(Debug, Clone)]
pub enum WrapperInput {
    One(WrapperOptions),
    Many(Vec<WrapperInput>),
    /// Bare template, expanded to `{template, name}`.
    Template(String),
    /// Raw JSON: objects are options, arrays are sequences, strings are templates.
    Json(Value),
}

impl From<WrapperOptions> for WrapperInput {
    fn from(options: WrapperOptions) -> Self {
        WrapperInput::One(options)
    }
}

impl From<Vec<WrapperOptions>> for WrapperInput {
    fn from(options: Vec<WrapperOptions>) -> Self {
        WrapperInput::Many(options.into_iter().map(WrapperInput::One).collect())
    }
}

impl From<&str> for WrapperInput {
    fn from(template: &str) -> Self {
        WrapperInput::Template(template.to_string())
    }
}

impl From<String> for WrapperInput {
    fn from(template: String) -> Self {
        WrapperInput::Template(template)
    }
}

impl From<Value> for WrapperInput {
    fn from(value: Value) -> Self {
        WrapperInput::Json(value)
    }
}
