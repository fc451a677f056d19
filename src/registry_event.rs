use std::fmt;

/// Which of the two keyed stores an event concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Store {
    Types,
    Wrappers,
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Store::Types => write!(f, "types"),
            Store::Wrappers => write!(f, "wrappers"),
        }
    }
}

/// Events emitted by the registry during operations.
///
/// These events are passed to the trace callback set via
/// `DefinitionRegistry::set_trace_callback`. `Overwrite` is only emitted while
/// warnings are enabled.
///
/// # Examples
///
/// ```rust
/// use field_registry::RegistryEvent;
///
/// let event = RegistryEvent::TypeRegistered { name: "input".into() };
/// assert_eq!(event.to_string(), "register type { name: input }");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryEvent {
    /// A field type was stored.
    TypeRegistered { name: String },

    /// A template wrapper was stored.
    WrapperRegistered { name: String },

    /// A template wrapper was removed.
    WrapperRemoved { name: String },

    /// A registration replaced an existing entry without `overwrite_ok`.
    Overwrite {
        store: Store,
        name: String,
        /// The operator-facing warning text.
        warning: String,
    },
}

impl fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryEvent::TypeRegistered { name } => {
                write!(f, "register type {{ name: {name} }}")
            }
            RegistryEvent::WrapperRegistered { name } => {
                write!(f, "register wrapper {{ name: {name} }}")
            }
            RegistryEvent::WrapperRemoved { name } => {
                write!(f, "remove wrapper {{ name: {name} }}")
            }
            RegistryEvent::Overwrite { store, name, .. } => {
                write!(f, "overwrite {{ store: {store}, name: {name} }}")
            }
        }
    }
}
