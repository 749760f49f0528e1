//! State for the variable collection and its editor slot.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::mvi::StoreState;
use crate::registry::{KindRegistry, RegistryError};

use super::editor::VariableEditorState;
use super::model::{VariableId, VariableModel};

/// One variable paired with its editor scratch space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableState {
    pub variable: VariableModel,
    pub editor: VariableEditorState,
}

/// Authoritative in-memory state of the templating editor.
///
/// Entries are behind `Arc` so that successive states share every variable
/// an action did not touch; the reducer copies an entry on write.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TemplatingState {
    pub variables: BTreeMap<VariableId, Arc<VariableState>>,
    /// Variable open in the editor, `None` while the list view is active.
    pub id_in_editor: Option<VariableId>,
}

impl StoreState for TemplatingState {}

impl TemplatingState {
    /// Seed a state from a persisted variable list.
    ///
    /// List position becomes `index`; each entry gets the blank editor of
    /// its kind.
    pub fn from_variables(
        variables: Vec<VariableModel>,
        registry: &KindRegistry,
    ) -> Result<Self, RegistryError> {
        let mut state = Self::default();
        for (index, mut variable) in variables.into_iter().enumerate() {
            let editor = registry.blank_state(variable.kind())?.editor;
            variable.index = index;
            state
                .variables
                .insert(variable.id.clone(), Arc::new(VariableState { variable, editor }));
        }
        Ok(state)
    }

    pub fn get(&self, id: &VariableId) -> Option<&VariableState> {
        self.variables.get(id).map(Arc::as_ref)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn draft(&self) -> Option<&VariableState> {
        self.get(&VariableId::draft())
    }

    pub fn in_editor(&self) -> Option<&VariableState> {
        self.id_in_editor.as_ref().and_then(|id| self.get(id))
    }

    /// Committed variables ordered by `index`; the projection persisted
    /// with the dashboard.
    pub fn variables_in_order(&self) -> Vec<&VariableModel> {
        let mut ordered: Vec<&VariableModel> = self
            .variables
            .values()
            .map(|state| &state.variable)
            .filter(|variable| !variable.id.is_draft())
            .collect();
        ordered.sort_by(|a, b| a.index.cmp(&b.index).then_with(|| a.id.cmp(&b.id)));
        ordered
    }

    /// Whether committed indices are exactly `0..count`, each once.
    pub fn has_contiguous_indices(&self) -> bool {
        self.variables_in_order()
            .iter()
            .enumerate()
            .all(|(position, variable)| variable.index == position)
    }
}
