//! Intents for the variable collection.

use serde::{Deserialize, Serialize};

use crate::mvi::Intent;

use super::editor::DataSourceOption;
use super::model::{VariableHide, VariableId, VariableKind};

/// Actions that can be dispatched to the variables reducer.
///
/// Every variant except `ChangeOrder` and `ChangeToListMode` names the
/// variable it targets; the dispatcher guarantees that variable exists,
/// with the single exception of closing an editor on a draft that was
/// never opened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum VariableIntent {
    /// Delete a variable and re-sequence the remaining indices.
    RemoveVariable { id: VariableId },

    /// Editor form opened; copy name and kind into the editor.
    EditorMounted {
        id: VariableId,
        #[serde(default)]
        data_sources: Vec<DataSourceOption>,
    },

    /// Editor form closed; reset the editor and drop any draft.
    EditorUnmounted { id: VariableId, kind: VariableKind },

    ChangeLabel {
        id: VariableId,
        #[serde(default)]
        label: Option<String>,
    },

    ChangeHide { id: VariableId, hide: VariableHide },

    /// External option refresh started.
    UpdateStarting { id: VariableId },

    /// External option refresh finished.
    UpdateCompleted { id: VariableId },

    /// External option refresh failed.
    UpdateFailed { id: VariableId, message: String },

    /// Append a copy named `copy_of_<name>` under `new_id`.
    DuplicateVariable {
        id: VariableId,
        kind: VariableKind,
        #[serde(default = "VariableId::generate")]
        new_id: VariableId,
    },

    /// Swap the indices of the variables at `from_index` and `to_index`.
    ChangeOrder { from_index: usize, to_index: usize },

    /// Commit the draft's data under a real identity.
    StoreNewVariable {
        #[serde(default = "VariableId::generate")]
        new_id: VariableId,
        kind: VariableKind,
    },

    /// Open `id` in the editor; the draft id creates a fresh draft first.
    ChangeToEditMode { id: VariableId },

    ChangeToListMode,

    /// Re-initialize a variable as `kind`, keeping identity, name, label and index.
    ChangeVariableType { id: VariableId, kind: VariableKind },
}

impl Intent for VariableIntent {}

impl VariableIntent {
    /// Action name as it appears in scripts and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            VariableIntent::RemoveVariable { .. } => "remove_variable",
            VariableIntent::EditorMounted { .. } => "editor_mounted",
            VariableIntent::EditorUnmounted { .. } => "editor_unmounted",
            VariableIntent::ChangeLabel { .. } => "change_label",
            VariableIntent::ChangeHide { .. } => "change_hide",
            VariableIntent::UpdateStarting { .. } => "update_starting",
            VariableIntent::UpdateCompleted { .. } => "update_completed",
            VariableIntent::UpdateFailed { .. } => "update_failed",
            VariableIntent::DuplicateVariable { .. } => "duplicate_variable",
            VariableIntent::ChangeOrder { .. } => "change_order",
            VariableIntent::StoreNewVariable { .. } => "store_new_variable",
            VariableIntent::ChangeToEditMode { .. } => "change_to_edit_mode",
            VariableIntent::ChangeToListMode => "change_to_list_mode",
            VariableIntent::ChangeVariableType { .. } => "change_variable_type",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_action() {
        let intent: VariableIntent =
            serde_json::from_str(r#"{"action":"change_order","from_index":0,"to_index":2}"#)
                .unwrap();
        assert_eq!(
            intent,
            VariableIntent::ChangeOrder {
                from_index: 0,
                to_index: 2
            }
        );
        assert_eq!(intent.name(), "change_order");
    }

    #[test]
    fn parses_unit_action() {
        let intent: VariableIntent =
            serde_json::from_str(r#"{"action":"change_to_list_mode"}"#).unwrap();
        assert_eq!(intent, VariableIntent::ChangeToListMode);
    }

    #[test]
    fn optional_payload_fields_default() {
        let intent: VariableIntent =
            serde_json::from_str(r#"{"action":"editor_mounted","id":"v1"}"#).unwrap();
        assert_eq!(
            intent,
            VariableIntent::EditorMounted {
                id: VariableId::new("v1"),
                data_sources: Vec::new(),
            }
        );
    }

    #[test]
    fn omitted_new_id_is_generated() {
        let first: VariableIntent =
            serde_json::from_str(r#"{"action":"store_new_variable","kind":"query"}"#).unwrap();
        let second: VariableIntent =
            serde_json::from_str(r#"{"action":"duplicate_variable","id":"v1","kind":"query"}"#)
                .unwrap();

        let VariableIntent::StoreNewVariable { new_id: stored, .. } = first else {
            panic!("expected store_new_variable, got {first:?}");
        };
        let VariableIntent::DuplicateVariable { new_id: copied, .. } = second else {
            panic!("expected duplicate_variable, got {second:?}");
        };
        assert!(!stored.is_draft());
        assert!(!copied.is_draft());
        assert_ne!(stored, copied);
    }

    #[test]
    fn name_matches_serialized_tag() {
        let intent = VariableIntent::UpdateFailed {
            id: VariableId::new("v1"),
            message: "nope".to_string(),
        };
        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json["action"], intent.name());
    }

    #[test]
    fn unknown_kind_is_a_parse_error() {
        let result = serde_json::from_str::<VariableIntent>(
            r#"{"action":"change_variable_type","id":"v1","kind":"graphite"}"#,
        );
        assert!(result.is_err());
    }
}
