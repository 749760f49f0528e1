//! Model-View-Intent (MVI) architecture primitives.
//!
//! This module provides the base traits for unidirectional state
//! transitions in the templating layer.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View / persistence
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! - **State**: Immutable snapshot of the variable collection
//! - **Intent**: Editor actions or completions of external work
//! - **Reducer**: Pure function that transforms state based on intents

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::StoreState;
