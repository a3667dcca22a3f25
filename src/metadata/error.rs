//! Errors raised while constructing a [`Model`](super::Model).
//!
//! Every variant except `CyclicInheritance` aborts the whole build; that one
//! is only reported by the opt-in [`Model::check_acyclic`](super::Model::check_acyclic).
//! The query API of a ready model never fails; missing classes are reported
//! as `None`.

/// Result type for model construction.
pub type ModelResult<T> = Result<T, ModelError>;

/// Model construction error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("A non-blank name must be supplied for the model")]
    InvalidModelName,

    #[error("Duplicate class name: '{0}'")]
    DuplicateClassName(String),

    #[error("Class '{class}' extends '{missing}', which is not in the model")]
    UnresolvedSuperclass { class: String, missing: String },

    #[error("Class '{class}' implements '{missing}', which is not in the model")]
    UnresolvedInterface { class: String, missing: String },

    #[error("Cyclic inheritance: {}", .0.join(" -> "))]
    CyclicInheritance(Vec<String>),
}

impl ModelError {
    pub(crate) fn unresolved_superclass(class: &str, missing: &str) -> Self {
        ModelError::UnresolvedSuperclass {
            class: class.to_string(),
            missing: missing.to_string(),
        }
    }

    pub(crate) fn unresolved_interface(class: &str, missing: &str) -> Self {
        ModelError::UnresolvedInterface {
            class: class.to_string(),
            missing: missing.to_string(),
        }
    }
}
