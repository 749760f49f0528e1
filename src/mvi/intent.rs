//! Base trait for intents.

/// Marker trait for messages a reducer consumes.
///
/// An intent is either a user action from the variables editor or the
/// completion of work that ran elsewhere, such as an options refresh.
pub trait Intent: Send + 'static {}
