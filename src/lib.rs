//! # Field Registry
//!
//! A registry of **field types** and **template wrappers** for dynamically
//! rendered forms. It validates, stores and looks up definitions; rendering
//! is left to the engine that consumes them.
//!
//! ## Quick Start
//!
//! ```rust
//! use field_registry::{DefinitionRegistry, TypeDefinition, WrapperOptions};
//!
//! let mut registry = DefinitionRegistry::new();
//!
//! registry
//!     .set_type(TypeDefinition::new("input").with_template("<input ng-model=\"model[options.key]\">"))
//!     .unwrap();
//!
//! registry
//!     .set_wrapper(
//!         WrapperOptions::template("<label>{{to.label}}</label><formly-transclude></formly-transclude>")
//!             .for_types("input"),
//!         None,
//!     )
//!     .unwrap();
//!
//! assert!(registry.get_type("input").is_some());
//! assert_eq!(registry.get_wrapper_by_type("input")[0].name, "input");
//! ```
//!
//! ## Features
//!
//! - **Validated registration**: types need a name and exactly one template source
//! - **Overwrite policy**: replacing an entry logs a warning unless `overwrite_ok` is set
//!   or warnings are disabled
//! - **Wrapper resolution**: wrappers are found by name or by the field types they tag
//! - **Pluggable checks**: wrapper validation goes through a [`WrapperCheck`]
//! - **Tracing support**: `tracing` logs plus an optional event callback
//!
//! ## Main Operations
//!
//! - [`DefinitionRegistry::set_type`] / [`DefinitionRegistry::get_type`] /
//!   [`DefinitionRegistry::require_type`]
//! - [`DefinitionRegistry::set_wrapper`] / [`DefinitionRegistry::get_wrapper`] /
//!   [`DefinitionRegistry::get_wrapper_by_type`]
//! - [`DefinitionRegistry::remove_wrapper_by_name`] /
//!   [`DefinitionRegistry::remove_wrappers_for_type`]

mod check;
mod definition;
mod registry;
mod registry_error;
mod registry_event;
mod settings;

pub use check::{StandardWrapperCheck, WrapperCheck, TRANSCLUDE_TAG};
pub use definition::{
    TypeDefinition, TypeInput, WrapperDefinition, WrapperInput, WrapperOptions, WrapperTypes,
};
pub use registry::{DefinitionRegistry, Registered, RegistryBuilder, TraceCallback};
pub use registry_error::{RegistryError, Result};
pub use registry_event::{RegistryEvent, Store};
pub use settings::{
    Extras, Manipulator, RegistrySettings, TemplateManipulators, DEFAULT_WRAPPER_NAME,
};
