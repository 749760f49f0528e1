//! Template variable collection feature module.
//!
//! Owns the authoritative in-memory state of a dashboard's variables and
//! the editor slot that tracks which one is being edited.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `model.rs` - Persisted variable records and kind-specific settings
//! - `editor.rs` - Transient per-variable editor state
//! - `state.rs` - Collection keyed by identity, plus the editor slot
//! - `intent.rs` - Editor actions and refresh completions
//! - `reducer.rs` - State transitions (pure, no side effects)

mod editor;
mod error;
mod intent;
mod model;
mod reducer;
mod state;

pub use editor::{DataSourceOption, VariableEditorState, UPDATE_ERROR_KEY};
pub use error::ReduceError;
pub use intent::VariableIntent;
pub use model::{
    AdHocFilter, AdHocSettings, ConstantSettings, CustomSettings, DataSourceSettings,
    IntervalSettings, KindSettings, ParseKindError, QuerySettings, TextBoxSettings, VariableHide,
    VariableId, VariableKind, VariableModel, VariableOption, VariableRefresh, VariableSort,
};
pub use reducer::VariablesReducer;
pub use state::{TemplatingState, VariableState};
