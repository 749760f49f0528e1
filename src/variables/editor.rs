//! Transient editing scratch space attached to each variable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::model::VariableKind;

/// Error key written by a failed option refresh.
pub const UPDATE_ERROR_KEY: &str = "update";

/// Data source choice offered by the edit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceOption {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl DataSourceOption {
    pub fn new(name: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            name: name.into(),
            value: value.map(str::to_string),
        }
    }
}

/// Per-variable editor state. Never persisted with the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableEditorState {
    pub name: String,
    pub kind: VariableKind,
    /// `None` until the editor is mounted with form reference data.
    pub data_sources: Option<Vec<DataSourceOption>>,
    pub is_valid: bool,
    /// Operation name to message, e.g. `update`.
    pub errors: BTreeMap<String, String>,
}

impl Default for VariableEditorState {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: VariableKind::Query,
            data_sources: None,
            is_valid: true,
            errors: BTreeMap::new(),
        }
    }
}

impl VariableEditorState {
    /// Blank editor for a freshly created variable of `kind`.
    pub fn for_kind(kind: VariableKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Shallow merge: fields absent here are filled from `template`,
    /// everything present here wins.
    pub fn merged_over(self, template: &VariableEditorState) -> Self {
        let mut errors = template.errors.clone();
        errors.extend(self.errors);

        Self {
            name: self.name,
            kind: self.kind,
            data_sources: self.data_sources.or_else(|| template.data_sources.clone()),
            is_valid: self.is_valid,
            errors,
        }
    }

    /// Record a failed external update.
    pub fn fail_update(&mut self, message: impl Into<String>) {
        self.is_valid = false;
        self.errors
            .insert(UPDATE_ERROR_KEY.to_string(), message.into());
    }

    pub fn update_error(&self) -> Option<&str> {
        self.errors.get(UPDATE_ERROR_KEY).map(String::as_str)
    }
}
