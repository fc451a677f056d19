//! The definition registry.
//!
//! Holds two independent keyed stores, one for field types and one for
//! template wrappers, plus the settings and manipulator lists the rendering
//! engine reads. Stores iterate in insertion order; replacing an entry keeps
//! its position.
//!
//! The registry is an owned value. Build one at startup and hand a reference
//! to whatever needs it; tests build a fresh one each.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::check::{StandardWrapperCheck, WrapperCheck};
use crate::definition::{
    normalize_json_types, present, truthy, wrapper_options_from_json, TypeDefinition, TypeInput,
    WrapperDefinition, WrapperInput, WrapperOptions, WrapperTypes,
};
use crate::registry_error::{describe, RegistryError, Result};
use crate::registry_event::{RegistryEvent, Store};
use crate::settings::{Extras, RegistrySettings, TemplateManipulators};

/// Type alias for the user-supplied trace callback.
///
/// The callback receives every [`RegistryEvent`] the registry emits.
pub type TraceCallback = dyn Fn(&RegistryEvent) + Send + Sync + 'static;

/// Result of a wrapper registration, mirroring the shape of the input.
#[derive(Debug, Clone, PartialEq)]
pub enum Registered {
    One(WrapperDefinition),
    Many(Vec<Registered>),
}

impl Registered {
    /// The single registered wrapper, if the input was a single definition.
    pub fn into_one(self) -> Option<WrapperDefinition> {
        match self {
            Registered::One(wrapper) => Some(wrapper),
            Registered::Many(_) => None,
        }
    }

    /// All registered wrappers in registration order, flattening sequences.
    pub fn into_vec(self) -> Vec<WrapperDefinition> {
        match self {
            Registered::One(wrapper) => vec![wrapper],
            Registered::Many(items) => items.into_iter().flat_map(Registered::into_vec).collect(),
        }
    }
}

/// Builder for [`DefinitionRegistry`].
pub struct RegistryBuilder {
    settings: RegistrySettings,
    checker: Box<dyn WrapperCheck>,
    trace: Option<Arc<TraceCallback>>,
}

impl RegistryBuilder {
    /// Replaces all settings at once.
    pub fn settings(mut self, settings: RegistrySettings) -> Self {
        self.settings = settings;
        self
    }

    /// Turns overwrite warnings off (or back on).
    pub fn disable_warnings(mut self, disable: bool) -> Self {
        self.settings.disable_warnings = disable;
        self
    }

    /// Name given to otherwise unnamed wrappers and used by `get_wrapper(None)`.
    pub fn default_wrapper_name(mut self, name: impl Into<String>) -> Self {
        self.settings.default_wrapper_name = name.into();
        self
    }

    /// Replaces the wrapper checker.
    pub fn checker(mut self, checker: impl WrapperCheck + 'static) -> Self {
        self.checker = Box::new(checker);
        self
    }

    /// Callback receiving every [`RegistryEvent`].
    pub fn trace_callback(
        mut self,
        callback: impl Fn(&RegistryEvent) + Send + Sync + 'static,
    ) -> Self {
        self.trace = Some(Arc::new(callback));
        self
    }

    /// An empty registry with the configured settings.
    pub fn build(self) -> DefinitionRegistry {
        DefinitionRegistry {
            types: IndexMap::new(),
            wrappers: IndexMap::new(),
            settings: self.settings,
            manipulators: TemplateManipulators::default(),
            checker: self.checker,
            trace: self.trace,
        }
    }
}

/// Registry of field types and template wrappers.
pub struct DefinitionRegistry {
    types: IndexMap<String, TypeDefinition>,
    wrappers: IndexMap<String, WrapperDefinition>,
    settings: RegistrySettings,
    manipulators: TemplateManipulators,
    checker: Box<dyn WrapperCheck>,
    trace: Option<Arc<TraceCallback>>,
}

impl Default for DefinitionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DefinitionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefinitionRegistry")
            .field("types", &self.types.keys().collect::<Vec<_>>())
            .field("wrappers", &self.wrappers.keys().collect::<Vec<_>>())
            .field("settings", &self.settings)
            .field("manipulators", &self.manipulators)
            .field("traced", &self.trace.is_some())
            .finish()
    }
}

impl DefinitionRegistry {
    /// An empty registry with default settings and the standard checker.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder {
            settings: RegistrySettings::default(),
            checker: Box::new(StandardWrapperCheck),
            trace: None,
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Set a trace callback for registry operations.
    ///
    /// Replaces any callback set earlier, including one given to the builder.
    pub fn set_trace_callback(&mut self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        self.trace = Some(Arc::new(callback));
    }

    /// Clear the trace callback. Overwrite warnings still reach `tracing`.
    pub fn clear_trace_callback(&mut self) {
        self.trace = None;
    }

    fn emit_event(&self, event: RegistryEvent) {
        if let Some(callback) = self.trace.as_ref() {
            callback(&event);
        }
    }

    /// Reports a replaced entry unless warnings are disabled.
    fn warn_overwrite(&self, store: Store, name: &str, current: &str, replacement: &impl Serialize) {
        if self.settings.disable_warnings {
            return;
        }

        let warning = format!(
            "Attempting to overwrite {name} on {store} which is currently {current} with {} \
             To suppress this warning, specify the property \"overwriteOk: true\"",
            describe(replacement)
        );
        warn!(%store, name, "{warning}");
        self.emit_event(RegistryEvent::Overwrite {
            store,
            name: name.to_string(),
            warning,
        });
    }

    // -------------------------------------------------------------------------------------------------
    // Field types
    // -------------------------------------------------------------------------------------------------

    /// Register one field type or a sequence of them.
    ///
    /// Sequences are applied element by element. If an element fails, the
    /// elements before it stay registered.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidArgument`] for JSON that is neither an object nor an array
    /// - [`RegistryError::MissingName`], [`RegistryError::MissingContent`] and
    ///   [`RegistryError::AmbiguousContent`], checked in that order
    /// - [`RegistryError::MalformedDefinition`] for a JSON object that passes those
    ///   checks but has a property of the wrong shape
    pub fn set_type(&mut self, input: impl Into<TypeInput>) -> Result<()> {
        match input.into() {
            TypeInput::One(def) => self.store_type(def),
            TypeInput::Many(items) => items.into_iter().try_for_each(|item| self.set_type(item)),
            TypeInput::Json(Value::Array(items)) => {
                items.into_iter().try_for_each(|item| self.set_type(item))
            }
            TypeInput::Json(Value::Object(object)) => {
                check_type_shape(
                    truthy(object.get("name")),
                    truthy(object.get("defaultOptions")),
                    truthy(object.get("template")),
                    truthy(object.get("templateUrl")),
                    || describe(&object),
                )?;

                let value = Value::Object(object);
                let provided = describe(&value);
                let def = serde_json::from_value(value).map_err(|e| {
                    RegistryError::MalformedDefinition {
                        reason: e.to_string(),
                        provided,
                    }
                })?;
                self.store_type(def)
            }
            TypeInput::Json(other) => Err(RegistryError::InvalidArgument {
                operation: "setType",
                provided: describe(&other),
            }),
        }
    }

    fn store_type(&mut self, mut def: TypeDefinition) -> Result<()> {
        let name = def.name().map(str::to_owned);
        check_type_shape(
            name.is_some(),
            def.has_default_options(),
            present(&def.template).is_some(),
            present(&def.template_url).is_some(),
            || describe(&def),
        )?;
        let name = name.unwrap_or_default();

        if def.overwrite_ok {
            def.overwrite_ok = false;
        } else if let Some(current) = self.types.get(&name).map(describe) {
            self.warn_overwrite(Store::Types, &name, &current, &def);
        }

        debug!(name = %name, extends = ?def.extends, "registered field type");
        self.types.insert(name.clone(), def);
        self.emit_event(RegistryEvent::TypeRegistered { name });
        Ok(())
    }

    /// Look up a field type. An empty name is never found.
    pub fn get_type(&self, name: &str) -> Option<&TypeDefinition> {
        if name.is_empty() {
            return None;
        }
        self.types.get(name)
    }

    /// Look up a field type that must exist.
    ///
    /// An empty name still yields `Ok(None)`. `context` is serialized into the
    /// error to tell the caller which field asked for the type.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownType`] when no type is registered under `name`.
    pub fn require_type(
        &self,
        name: &str,
        context: &impl Serialize,
    ) -> Result<Option<&TypeDefinition>> {
        if name.is_empty() {
            return Ok(None);
        }
        match self.types.get(name) {
            Some(def) => Ok(Some(def)),
            None => Err(RegistryError::UnknownType {
                name: name.to_string(),
                context: describe(context),
            }),
        }
    }

    /// All field types in registration order.
    pub fn types(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types.values()
    }

    // -------------------------------------------------------------------------------------------------
    // Template wrappers
    // -------------------------------------------------------------------------------------------------

    /// Register a wrapper, a sequence of wrappers, or a bare template.
    ///
    /// `name` names a single wrapper or bare template; sequence elements are
    /// registered without it. Returns the normalized definitions in the shape
    /// of the input. As with [`set_type`](Self::set_type), a failing element
    /// leaves earlier elements registered.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidArgument`] for JSON that is not an object, array or string
    /// - any error from the configured [`WrapperCheck`], including
    ///   [`RegistryError::InvalidWrapper`] for JSON properties of the wrong shape
    /// - [`RegistryError::InvalidTypesField`] for JSON `types` that is not a string or
    ///   strings, reported after the checker and the overwrite warning
    pub fn set_wrapper(
        &mut self,
        input: impl Into<WrapperInput>,
        name: Option<&str>,
    ) -> Result<Registered> {
        match input.into() {
            WrapperInput::One(options) => {
                self.store_wrapper(options, None, name).map(Registered::One)
            }
            WrapperInput::Many(items) => items
                .into_iter()
                .map(|item| self.set_wrapper(item, None))
                .collect::<Result<Vec<_>>>()
                .map(Registered::Many),
            WrapperInput::Template(template) => {
                let mut options = WrapperOptions::template(template);
                options.name = name.map(str::to_owned);
                self.set_wrapper(options, None)
            }
            WrapperInput::Json(Value::String(template)) => {
                self.set_wrapper(WrapperInput::Template(template), name)
            }
            WrapperInput::Json(Value::Array(items)) => items
                .into_iter()
                .map(|item| self.set_wrapper(item, None))
                .collect::<Result<Vec<_>>>()
                .map(Registered::Many),
            WrapperInput::Json(Value::Object(object)) => {
                let (options, types) = wrapper_options_from_json(object)?;
                self.store_wrapper(options, types, name).map(Registered::One)
            }
            WrapperInput::Json(other) => Err(RegistryError::InvalidArgument {
                operation: "setWrapper",
                provided: describe(&other),
            }),
        }
    }

    /// `raw_types` carries JSON `types`, which override `options.types` and
    /// are only validated once the checker and overwrite check have run.
    fn store_wrapper(
        &mut self,
        options: WrapperOptions,
        raw_types: Option<Value>,
        name: Option<&str>,
    ) -> Result<WrapperDefinition> {
        let WrapperOptions {
            name: explicit,
            types,
            template,
            template_url,
            overwrite_ok,
            extra,
        } = options;

        let (types, invalid_types) = match raw_types {
            Some(raw) => normalize_json_types(raw),
            None => (types.map(WrapperTypes::into_vec).unwrap_or_default(), None),
        };
        let name = self.resolve_wrapper_name(present(&explicit), name, &types);
        let wrapper = WrapperDefinition {
            name,
            types,
            template,
            template_url,
            extra,
        };

        self.checker.check_wrapper(&wrapper)?;
        if let Some(template) = present(&wrapper.template) {
            self.checker.check_wrapper_template(template, &wrapper)?;
        }

        if !overwrite_ok {
            if let Some(current) = self.wrappers.get(&wrapper.name).map(describe) {
                self.warn_overwrite(Store::Wrappers, &wrapper.name, &current, &wrapper);
            }
        }

        if let Some(raw) = invalid_types {
            return Err(RegistryError::InvalidTypesField {
                provided: describe(&raw),
            });
        }

        debug!(name = %wrapper.name, types = ?wrapper.types, "registered template wrapper");
        self.wrappers.insert(wrapper.name.clone(), wrapper.clone());
        self.emit_event(RegistryEvent::WrapperRegistered {
            name: wrapper.name.clone(),
        });
        Ok(wrapper)
    }

    /// Explicit name, then the call's name, then the joined type tags, then
    /// the default wrapper name.
    fn resolve_wrapper_name(
        &self,
        explicit: Option<&str>,
        argument: Option<&str>,
        types: &[String],
    ) -> String {
        if let Some(name) = explicit.or(argument.filter(|n| !n.is_empty())) {
            return name.to_string();
        }
        let joined = types.join(" ");
        if joined.is_empty() {
            self.settings.default_wrapper_name.clone()
        } else {
            joined
        }
    }

    /// Look up a wrapper, falling back to the default wrapper name.
    pub fn get_wrapper(&self, name: Option<&str>) -> Option<&WrapperDefinition> {
        let name = name
            .filter(|n| !n.is_empty())
            .unwrap_or(self.settings.default_wrapper_name.as_str());
        self.wrappers.get(name)
    }

    /// All wrappers tagged with `field_type`, in registration order.
    pub fn get_wrapper_by_type(&self, field_type: &str) -> Vec<&WrapperDefinition> {
        self.wrappers
            .values()
            .filter(|wrapper| wrapper.applies_to(field_type))
            .collect()
    }

    /// Remove a wrapper by name, returning it if it was registered.
    pub fn remove_wrapper_by_name(&mut self, name: &str) -> Option<WrapperDefinition> {
        let removed = self.wrappers.shift_remove(name)?;
        debug!(name, "removed template wrapper");
        self.emit_event(RegistryEvent::WrapperRemoved {
            name: name.to_string(),
        });
        Some(removed)
    }

    /// Remove every wrapper tagged with `field_type` and return them.
    pub fn remove_wrappers_for_type(&mut self, field_type: &str) -> Vec<WrapperDefinition> {
        let names: Vec<String> = self
            .get_wrapper_by_type(field_type)
            .into_iter()
            .map(|wrapper| wrapper.name.clone())
            .collect();

        names
            .iter()
            .filter_map(|name| self.remove_wrapper_by_name(name))
            .collect()
    }

    /// All wrappers in registration order.
    pub fn wrappers(&self) -> impl Iterator<Item = &WrapperDefinition> {
        self.wrappers.values()
    }

    // -------------------------------------------------------------------------------------------------
    // Settings
    // -------------------------------------------------------------------------------------------------

    pub fn settings(&self) -> &RegistrySettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut RegistrySettings {
        &mut self.settings
    }

    pub fn set_disable_warnings(&mut self, disable: bool) {
        self.settings.disable_warnings = disable;
    }

    pub fn extras(&self) -> &Extras {
        &self.settings.extras
    }

    pub fn extras_mut(&mut self) -> &mut Extras {
        &mut self.settings.extras
    }

    pub fn template_manipulators(&self) -> &TemplateManipulators {
        &self.manipulators
    }

    pub fn template_manipulators_mut(&mut self) -> &mut TemplateManipulators {
        &mut self.manipulators
    }
}

/// Type validation shared by typed and JSON definitions. First failure wins.
fn check_type_shape(
    has_name: bool,
    has_default_options: bool,
    has_template: bool,
    has_template_url: bool,
    provided: impl FnOnce() -> String,
) -> Result<()> {
    if !has_name {
        return Err(RegistryError::MissingName {
            provided: provided(),
        });
    }
    if !has_default_options && !has_template && !has_template_url {
        return Err(RegistryError::MissingContent {
            provided: provided(),
        });
    }
    if has_template && has_template_url {
        return Err(RegistryError::AmbiguousContent {
            provided: provided(),
        });
    }
    Ok(())
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
