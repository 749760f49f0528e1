use thiserror::Error;

use crate::registry::RegistryError;

use super::model::VariableId;

/// Precondition violations detected while applying an intent.
///
/// These are dispatcher bugs, not user errors: a failed option refresh is
/// recorded in the editor state instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReduceError {
    #[error("{action}: variable '{id}' not found")]
    UnknownVariable { id: VariableId, action: &'static str },

    #[error("{action}: no draft variable to commit")]
    MissingDraft { action: &'static str },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
