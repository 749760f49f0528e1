//! Shared test fixtures.

#![allow(dead_code, unused_imports)]

use std::path::PathBuf;

use tempfile::TempDir;
use template_vars::registry::KindRegistry;
use template_vars::variables::{
    ConstantSettings, CustomSettings, KindSettings, QuerySettings, TemplatingState, VariableId,
    VariableModel,
};

/// Query variable `name` with identity `id`.
pub fn query_variable(id: &str, name: &str) -> VariableModel {
    let mut variable = VariableModel::blank(KindSettings::Query(QuerySettings {
        datasource: Some("prometheus".to_string()),
        query: format!("label_values({name})"),
        multi: true,
        ..QuerySettings::default()
    }));
    variable.id = VariableId::new(id);
    variable.name = name.to_string();
    variable
}

pub fn custom_variable(id: &str, name: &str, values: &str) -> VariableModel {
    let mut variable = VariableModel::blank(KindSettings::Custom(CustomSettings {
        query: values.to_string(),
        ..CustomSettings::default()
    }));
    variable.id = VariableId::new(id);
    variable.name = name.to_string();
    variable
}

pub fn constant_variable(id: &str, name: &str, value: &str) -> VariableModel {
    let mut variable = VariableModel::blank(KindSettings::Constant(ConstantSettings {
        query: value.to_string(),
    }));
    variable.id = VariableId::new(id);
    variable.name = name.to_string();
    variable
}

/// State with query variables `a`, `b`, `c` at indices 0, 1, 2.
pub fn abc_state(registry: &KindRegistry) -> TemplatingState {
    TemplatingState::from_variables(
        vec![
            query_variable("a", "server"),
            query_variable("b", "region"),
            query_variable("c", "pod"),
        ],
        registry,
    )
    .expect("built-in kinds are registered")
}

pub fn id(value: &str) -> VariableId {
    VariableId::new(value)
}

pub fn index_of(state: &TemplatingState, value: &str) -> usize {
    state
        .get(&id(value))
        .expect("variable present")
        .variable
        .index
}

/// Write `content` to `name` inside a fresh temp dir.
pub fn temp_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write temp file");
    (temp_dir, path)
}
