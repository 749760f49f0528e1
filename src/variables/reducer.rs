//! Reducer for the variable collection.

use std::sync::Arc;

use crate::mvi::Reducer;
use crate::registry::{KindRegistry, DRAFT_KIND};

use super::editor::VariableEditorState;
use super::error::ReduceError;
use super::intent::VariableIntent;
use super::model::{VariableId, VariableModel};
use super::state::{TemplatingState, VariableState};

/// Reducer for variable collection transitions.
///
/// Pure apart from diagnostics: the registry is read-only and resolved
/// before any dispatch. The input state is never modified; entries an
/// intent does not touch stay shared with the returned state.
#[derive(Clone, Copy)]
pub struct VariablesReducer<'r> {
    registry: &'r KindRegistry,
}

impl<'r> VariablesReducer<'r> {
    pub fn new(registry: &'r KindRegistry) -> Self {
        Self { registry }
    }

    /// Apply `intent`, reporting precondition violations instead of
    /// guessing at a repair.
    pub fn try_reduce(
        &self,
        state: &TemplatingState,
        intent: VariableIntent,
    ) -> Result<TemplatingState, ReduceError> {
        let action = intent.name();
        tracing::debug!(action, "Applying variable intent");

        let mut next = state.clone();
        match intent {
            VariableIntent::RemoveVariable { id } => {
                if next.variables.remove(&id).is_none() {
                    return Err(ReduceError::UnknownVariable { id, action });
                }
                resequence(&mut next);
            }

            VariableIntent::EditorMounted { id, data_sources } => {
                let entry = entry_mut(&mut next, &id, action)?;
                entry.editor.name = entry.variable.name.clone();
                entry.editor.kind = entry.variable.kind();
                entry.editor.data_sources = Some(data_sources);
            }

            VariableIntent::EditorUnmounted { id, kind } => {
                if id.is_draft() && !next.variables.contains_key(&id) {
                    // Closing a draft that was never opened
                    next.id_in_editor = None;
                    return Ok(next);
                }
                let editor = self.registry.blank_state(kind)?.editor;
                entry_mut(&mut next, &id, action)?.editor = editor;
                next.id_in_editor = None;
                if next.variables.remove(&VariableId::draft()).is_some() {
                    tracing::debug!(action, "Discarded uncommitted draft variable");
                }
            }

            VariableIntent::ChangeLabel { id, label } => {
                entry_mut(&mut next, &id, action)?.variable.label = label;
            }

            VariableIntent::ChangeHide { id, hide } => {
                entry_mut(&mut next, &id, action)?.variable.hide = hide;
            }

            VariableIntent::UpdateStarting { id } | VariableIntent::UpdateCompleted { id } => {
                let entry = entry_mut(&mut next, &id, action)?;
                let current = std::mem::take(&mut entry.editor);
                entry.editor = current.merged_over(&VariableEditorState::default());
            }

            VariableIntent::UpdateFailed { id, message } => {
                tracing::debug!(action, id = %id, message = %message, "Variable update failed");
                entry_mut(&mut next, &id, action)?.editor.fail_update(message);
            }

            VariableIntent::DuplicateVariable { id, kind, new_id } => {
                let original = lookup(&next, &id, action)?.variable.clone();
                let mut copy = self.registry.blank_state(kind)?;
                copy.variable = VariableModel {
                    id: new_id.clone(),
                    name: format!("copy_of_{}", original.name),
                    index: next.len(),
                    ..original
                };
                next.variables.insert(new_id, Arc::new(copy));
            }

            VariableIntent::ChangeOrder {
                from_index,
                to_index,
            } => {
                let from = find_by_index(&next, from_index);
                let to = find_by_index(&next, to_index);
                if from.is_none() || to.is_none() {
                    tracing::debug!(from_index, to_index, "Reorder with a missing partner");
                }
                if let Some(from) = from {
                    entry_mut(&mut next, &from, action)?.variable.index = to_index;
                }
                if let Some(to) = to {
                    entry_mut(&mut next, &to, action)?.variable.index = from_index;
                }
            }

            VariableIntent::StoreNewVariable { new_id, kind } => {
                let draft = next
                    .draft()
                    .ok_or(ReduceError::MissingDraft { action })?
                    .variable
                    .clone();
                let mut stored = self.registry.blank_state(kind)?;
                stored.variable = VariableModel {
                    id: new_id.clone(),
                    ..draft
                };
                // The draft stays until the editor closes.
                next.variables.insert(new_id, Arc::new(stored));
            }

            VariableIntent::ChangeToEditMode { id } => {
                if id.is_draft() {
                    let mut draft = self.registry.blank_state(DRAFT_KIND)?;
                    draft.variable.id = VariableId::draft();
                    next.variables.insert(VariableId::draft(), Arc::new(draft));
                    let index = next.len().saturating_sub(1);
                    entry_mut(&mut next, &id, action)?.variable.index = index;
                } else {
                    lookup(&next, &id, action)?;
                }
                next.id_in_editor = Some(id);
            }

            VariableIntent::ChangeToListMode => {
                next.id_in_editor = None;
            }

            VariableIntent::ChangeVariableType { id, kind } => {
                let existing = &lookup(&next, &id, action)?.variable;
                let mut reset = self.registry.blank_state(kind)?;
                reset.variable.id = existing.id.clone();
                reset.variable.name = existing.name.clone();
                reset.variable.label = existing.label.clone();
                reset.variable.index = existing.index;
                next.variables.insert(id, Arc::new(reset));
            }
        }

        Ok(next)
    }
}

impl Reducer for VariablesReducer<'_> {
    type State = TemplatingState;
    type Intent = VariableIntent;

    fn reduce(&self, state: Self::State, intent: Self::Intent) -> Self::State {
        match self.try_reduce(&state, intent) {
            Ok(next) => next,
            Err(err) => {
                tracing::warn!(error = %err, "Rejected variable intent, state unchanged");
                state
            }
        }
    }
}

fn lookup<'s>(
    state: &'s TemplatingState,
    id: &VariableId,
    action: &'static str,
) -> Result<&'s VariableState, ReduceError> {
    state.get(id).ok_or_else(|| ReduceError::UnknownVariable {
        id: id.clone(),
        action,
    })
}

/// Exclusive access to one entry, copying it if still shared.
fn entry_mut<'s>(
    state: &'s mut TemplatingState,
    id: &VariableId,
    action: &'static str,
) -> Result<&'s mut VariableState, ReduceError> {
    state
        .variables
        .get_mut(id)
        .map(Arc::make_mut)
        .ok_or_else(|| ReduceError::UnknownVariable {
            id: id.clone(),
            action,
        })
}

fn find_by_index(state: &TemplatingState, index: usize) -> Option<VariableId> {
    state
        .variables
        .iter()
        .find(|(_, entry)| entry.variable.index == index)
        .map(|(id, _)| id.clone())
}

/// Renumber indices to `0..n`, keeping relative order.
fn resequence(state: &mut TemplatingState) {
    let mut order: Vec<(usize, VariableId)> = state
        .variables
        .iter()
        .map(|(id, entry)| (entry.variable.index, id.clone()))
        .collect();
    order.sort();

    for (position, (index, id)) in order.into_iter().enumerate() {
        if index == position {
            continue;
        }
        if let Some(entry) = state.variables.get_mut(&id) {
            Arc::make_mut(entry).variable.index = position;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variables::model::{
        ConstantSettings, KindSettings, VariableHide, VariableKind,
    };

    fn constant(id: &str, index: usize) -> VariableModel {
        let mut variable = VariableModel::blank(KindSettings::Constant(ConstantSettings {
            query: format!("{id}-value"),
        }));
        variable.id = VariableId::new(id);
        variable.name = id.to_string();
        variable.index = index;
        variable
    }

    fn make_state(registry: &KindRegistry, ids: &[&str]) -> TemplatingState {
        let variables = ids
            .iter()
            .enumerate()
            .map(|(index, id)| constant(id, index))
            .collect();
        TemplatingState::from_variables(variables, registry).unwrap()
    }

    fn index_of(state: &TemplatingState, id: &str) -> usize {
        state.get(&VariableId::new(id)).unwrap().variable.index
    }

    #[test]
    fn remove_resequences_in_relative_order() {
        let registry = KindRegistry::with_builtin();
        let reducer = VariablesReducer::new(&registry);
        let state = make_state(&registry, &["a", "b", "c", "d"]);

        let state = reducer.reduce(
            state,
            VariableIntent::RemoveVariable {
                id: VariableId::new("b"),
            },
        );

        assert_eq!(state.len(), 3);
        assert_eq!(index_of(&state, "a"), 0);
        assert_eq!(index_of(&state, "c"), 1);
        assert_eq!(index_of(&state, "d"), 2);
    }

    #[test]
    fn untouched_entries_stay_shared() {
        let registry = KindRegistry::with_builtin();
        let reducer = VariablesReducer::new(&registry);
        let before = make_state(&registry, &["a", "b"]);

        let after = reducer
            .try_reduce(
                &before,
                VariableIntent::ChangeHide {
                    id: VariableId::new("b"),
                    hide: VariableHide::HideLabel,
                },
            )
            .unwrap();

        let a = VariableId::new("a");
        let b = VariableId::new("b");
        assert!(Arc::ptr_eq(&before.variables[&a], &after.variables[&a]));
        assert!(!Arc::ptr_eq(&before.variables[&b], &after.variables[&b]));
        assert_eq!(before.get(&b).unwrap().variable.hide, VariableHide::DontHide);
        assert_eq!(after.get(&b).unwrap().variable.hide, VariableHide::HideLabel);
    }

    #[test]
    fn editor_mounted_copies_name_and_kind() {
        let registry = KindRegistry::with_builtin();
        let reducer = VariablesReducer::new(&registry);
        let state = make_state(&registry, &["a"]);

        let state = reducer.reduce(
            state,
            VariableIntent::EditorMounted {
                id: VariableId::new("a"),
                data_sources: Vec::new(),
            },
        );

        let entry = state.get(&VariableId::new("a")).unwrap();
        assert_eq!(entry.editor.name, "a");
        assert_eq!(entry.editor.kind, VariableKind::Constant);
        assert_eq!(entry.editor.data_sources, Some(Vec::new()));
    }

    #[test]
    fn unknown_variable_is_reported() {
        let registry = KindRegistry::with_builtin();
        let reducer = VariablesReducer::new(&registry);
        let state = make_state(&registry, &["a"]);

        let err = reducer
            .try_reduce(
                &state,
                VariableIntent::ChangeLabel {
                    id: VariableId::new("missing"),
                    label: Some("x".to_string()),
                },
            )
            .unwrap_err();

        assert_eq!(
            err,
            ReduceError::UnknownVariable {
                id: VariableId::new("missing"),
                action: "change_label",
            }
        );
    }

    #[test]
    fn reduce_returns_prior_state_on_violation() {
        let registry = KindRegistry::with_builtin();
        let reducer = VariablesReducer::new(&registry);
        let state = make_state(&registry, &["a", "b"]);

        let next = reducer.reduce(
            state.clone(),
            VariableIntent::RemoveVariable {
                id: VariableId::new("zzz"),
            },
        );
        assert_eq!(next, state);
    }

    #[test]
    fn store_new_without_draft_is_reported() {
        let registry = KindRegistry::with_builtin();
        let reducer = VariablesReducer::new(&registry);
        let state = make_state(&registry, &["a"]);

        let err = reducer
            .try_reduce(
                &state,
                VariableIntent::StoreNewVariable {
                    new_id: VariableId::new("n"),
                    kind: VariableKind::Query,
                },
            )
            .unwrap_err();
        assert_eq!(
            err,
            ReduceError::MissingDraft {
                action: "store_new_variable"
            }
        );
    }

    #[test]
    fn unregistered_kind_is_reported() {
        let registry = KindRegistry::with_builtin();
        let reducer = VariablesReducer::new(&registry);
        let state = make_state(&registry, &["a"]);

        let mut limited = KindRegistry::new();
        for adapter in crate::registry::builtin_adapters(&Default::default()) {
            if adapter.kind() != VariableKind::AdHoc {
                limited.register(adapter).unwrap();
            }
        }
        let limited_reducer = VariablesReducer::new(&limited);

        let intent = VariableIntent::ChangeVariableType {
            id: VariableId::new("a"),
            kind: VariableKind::AdHoc,
        };
        assert!(reducer.try_reduce(&state, intent.clone()).is_ok());
        assert!(matches!(
            limited_reducer.try_reduce(&state, intent),
            Err(ReduceError::Registry(_))
        ));
    }
}
