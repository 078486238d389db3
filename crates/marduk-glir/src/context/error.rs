use std::fmt;

/// Failure raised while configuring a context or resolving its sharing state.
///
/// All variants are reported at the call that caused them; none of them is
/// ever written into a command queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// A configuration key outside the recognized set.
    UnknownConfigKey(String),
    /// A configuration value whose type differs from the key's default.
    ConfigType {
        key: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    /// The context already has a shared namespace.
    SharedAlreadySet,
    /// The operation needs a shared namespace the context does not have yet.
    SharedNotAttached,
    /// The representative surface of a shared namespace was dropped.
    ReferenceExpired,
    /// The representative surface is alive but not of the requested type.
    ReferenceType(&'static str),
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::UnknownConfigKey(key) => {
                write!(f, "key {key:?} is not a valid context config key")
            }
            ContextError::ConfigType { key, expected, found } => write!(
                f,
                "context config value of {key:?} has invalid type: expected {expected}, found {found}"
            ),
            ContextError::SharedAlreadySet => {
                f.write_str("shared namespace can only be set once per context")
            }
            ContextError::SharedNotAttached => {
                f.write_str("context has no shared namespace attached")
            }
            ContextError::ReferenceExpired => {
                f.write_str("shared namespace reference is not available")
            }
            ContextError::ReferenceType(wanted) => {
                write!(f, "shared namespace reference is not a {wanted}")
            }
        }
    }
}

impl std::error::Error for ContextError {}

impl ContextError {
    /// Whether this is a configuration failure (unknown key or bad type).
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            ContextError::UnknownConfigKey(_) | ContextError::ConfigType { .. }
        )
    }
}
