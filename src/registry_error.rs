use serde_json::Value;
use thiserror::Error;

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors raised synchronously by registry operations.
///
/// Every variant except [`RegistryError::Settings`] corresponds to a rejected
/// registration or lookup. Nothing is retried internally; the caller is
/// expected to fix the call.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The argument was neither a definition nor a sequence of definitions.
    #[error("You must provide an object or array for {operation}. You provided: {provided}")]
    InvalidArgument {
        operation: &'static str,
        provided: String,
    },

    /// A type definition without a name.
    #[error("You must provide a name for setType. You provided: {provided}")]
    MissingName { provided: String },

    /// A type definition without default options, template or template url.
    #[error(
        "You must provide defaultOptions OR a template OR templateUrl for setType. \
         You provided none of these: {provided}"
    )]
    MissingContent { provided: String },

    /// A type definition carrying both a template and a template url.
    #[error(
        "You must provide at most a template OR templateUrl for setType. \
         You provided both: {provided}"
    )]
    AmbiguousContent { provided: String },

    /// A type definition object with a property of the wrong shape.
    #[error("Invalid definition for setType: {reason}. You provided: {provided}")]
    MalformedDefinition { reason: String, provided: String },

    /// A mandatory type lookup missed.
    #[error("There is no type by the name of \"{name}\": {context}")]
    UnknownType { name: String, context: String },

    /// Wrapper `types` was not a string or a list of strings.
    #[error(
        "Attempted to create a template wrapper with types that is not a string or an array of strings"
    )]
    InvalidTypesField { provided: String },

    /// The wrapper checker rejected the wrapper shape.
    #[error("Invalid template wrapper: {reason}. You provided: {wrapper}")]
    InvalidWrapper { reason: String, wrapper: String },

    /// The wrapper template has no transclusion point.
    #[error(
        "Template wrapper templates must use \"{tag}\" somewhere in them. \
         This one does not have \"{tag}\" in it: {template}\nAdditional information: {wrapper}",
        tag = crate::check::TRANSCLUDE_TAG
    )]
    MissingTransclude { template: String, wrapper: String },

    /// Registry settings could not be parsed.
    #[error("invalid registry settings: {0}")]
    Settings(#[from] serde_json::Error),
}

/// Serializes a value for inclusion in an error or warning message.
pub(crate) fn describe<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| Value::Null.to_string())
}
