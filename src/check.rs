//! Structural checks applied to template wrappers before they are stored.
//!
//! The registry owns store mutation and lookup; deciding whether a wrapper's
//! shape and template are acceptable is delegated to a [`WrapperCheck`].
//! Both methods have default implementations, so a checker only overrides
//! what it wants to change. [`StandardWrapperCheck`] uses the defaults as-is.

use crate::definition::{present, WrapperDefinition};
use crate::registry_error::{describe, RegistryError, Result};

/// Marker every inline wrapper template must contain.
pub const TRANSCLUDE_TAG: &str = "<formly-transclude></formly-transclude>";

/// Validates wrapper definitions on behalf of the registry.
///
/// Any error returned aborts the registration before the wrapper is stored
/// and reaches the caller unmodified.
pub trait WrapperCheck: Send + Sync {
    /// Checks the normalized wrapper shape.
    ///
    /// The default requires exactly one of `template` or `template_url`.
    fn check_wrapper(&self, wrapper: &WrapperDefinition) -> Result<()> {
        let reason = match (present(&wrapper.template), present(&wrapper.template_url)) {
            (Some(_), None) | (None, Some(_)) => return Ok(()),
            (None, None) => "a template or templateUrl is required",
            (Some(_), Some(_)) => "template and templateUrl are mutually exclusive",
        };
        Err(RegistryError::InvalidWrapper {
            reason: reason.to_string(),
            wrapper: describe(wrapper),
        })
    }

    /// Checks an inline wrapper template.
    ///
    /// The default requires the [`TRANSCLUDE_TAG`] somewhere in the template.
    fn check_wrapper_template(&self, template: &str, wrapper: &WrapperDefinition) -> Result<()> {
        if template.contains(TRANSCLUDE_TAG) {
            Ok(())
        } else {
            Err(RegistryError::MissingTransclude {
                template: template.to_string(),
                wrapper: describe(wrapper),
            })
        }
    }
}

/// The default checker.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardWrapperCheck;

impl WrapperCheck for StandardWrapperCheck {}
