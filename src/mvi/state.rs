//! Base trait for reducer-owned state.

/// Marker trait for state snapshots a [`Reducer`](super::Reducer) produces.
///
/// A snapshot is a value: reducers return a new one rather than mutating
/// the old, and callers compare snapshots to detect changes.
pub trait StoreState: Clone + PartialEq + Default + Send + 'static {}
