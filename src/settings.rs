//! Registry-wide settings and render-time template manipulators.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::registry_error::Result;

/// Name used for a wrapper when nothing else names it, and by
/// `get_wrapper(None)`.
pub const DEFAULT_WRAPPER_NAME: &str = "default";

/// Global registry settings.
///
/// All fields default, so a partial JSON document is enough:
///
/// ```rust
/// use field_registry::RegistrySettings;
///
/// let settings = RegistrySettings::from_json(r#"{ "disableWarnings": true }"#).unwrap();
/// assert!(settings.disable_warnings);
/// assert_eq!(settings.default_wrapper_name, "default");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrySettings {
    /// Suppresses overwrite warnings entirely.
    pub disable_warnings: bool,

    pub default_wrapper_name: String,

    pub extras: Extras,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            disable_warnings: false,
            default_wrapper_name: DEFAULT_WRAPPER_NAME.to_string(),
            extras: Extras::default(),
        }
    }
}

impl RegistrySettings {
    /// Parses settings from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Flags read by the rendering engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Extras {
    /// Turns off the engine's model-attribute manipulation.
    pub disable_ng_model_attrs_manipulator: bool,
}

/// A render-time hook: `(template, field options, scope) -> template`.
pub type Manipulator = Arc<dyn Fn(&str, &Value, &Value) -> String + Send + Sync>;

/// Ordered hooks the rendering engine runs before and after applying
/// wrappers. The registry stores them but never calls them.
#[derive(Clone, Default)]
pub struct TemplateManipulators {
    pub pre_wrapper: Vec<Manipulator>,
    pub post_wrapper: Vec<Manipulator>,
}

impl TemplateManipulators {
    pub fn add_pre_wrapper(
        &mut self,
        manipulator: impl Fn(&str, &Value, &Value) -> String + Send + Sync + 'static,
    ) {
        self.pre_wrapper.push(Arc::new(manipulator));
    }

    pub fn add_post_wrapper(
        &mut self,
        manipulator: impl Fn(&str, &Value, &Value) -> String + Send + Sync + 'static,
    ) {
        self.post_wrapper.push(Arc::new(manipulator));
    }
}

impl fmt::Debug for TemplateManipulators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateManipulators")
            .field("pre_wrapper", &self.pre_wrapper.len())
            .field("post_wrapper", &self.post_wrapper.len())
            .finish()
    }
}
