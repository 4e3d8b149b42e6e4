use jsexport_core::DeclId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoweringError {
    #[error("{kind} '{name}' needs a namespace to attach to, but none was given")]
    MissingAttachPoint { kind: &'static str, name: String },

    #[error("Namespace path '{path}' is empty or has an empty segment")]
    EmptyNamespacePath { path: String },

    #[error("Source model has no {expected} for {id}")]
    UnknownSource { id: DeclId, expected: &'static str },
}

pub type Result<T> = std::result::Result<T, LoweringError>;
