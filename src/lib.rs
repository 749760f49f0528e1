//! State-transition core for dashboard template variables.
//!
//! A [`variables::TemplatingState`] holds every variable of a dashboard plus
//! the editor slot; [`variables::VariablesReducer`] applies one
//! [`variables::VariableIntent`] at a time, consulting the
//! [`registry::KindRegistry`] for per-kind blank states.

pub mod config;
pub mod logging;
pub mod mvi;
pub mod registry;
pub mod replay;
pub mod variables;
