//! Variable kind registry.
//!
//! Maps each [`VariableKind`] to the adapter that supplies its blank state.
//! The registry is populated once before any reducer activity and is
//! read-only afterwards; [`install`] publishes it process-wide.

mod adapters;

use std::collections::BTreeMap;
use std::sync::OnceLock;

use thiserror::Error;

use crate::config::{Config, IntervalDefaults};
use crate::variables::{VariableKind, VariableState};

pub use adapters::{
    builtin_adapters, AdHocAdapter, ConstantAdapter, CustomAdapter, DataSourceAdapter,
    IntervalAdapter, QueryAdapter, TextBoxAdapter,
};

/// Kind used when the editor creates a new draft variable.
pub const DRAFT_KIND: VariableKind = VariableKind::Query;

static GLOBAL: OnceLock<KindRegistry> = OnceLock::new();

/// Errors raised by registry lookups and setup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Variable kind '{kind}' is not registered")]
    UnknownKind { kind: VariableKind },

    #[error("Variable kind '{kind}' is already registered")]
    DuplicateKind { kind: VariableKind },

    #[error("Kind registry is already installed")]
    AlreadyInstalled,
}

/// Behavior provider for one variable kind.
pub trait VariableAdapter: Send + Sync {
    fn kind(&self) -> VariableKind;

    /// Human-readable name for pickers.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Fresh, independent state with zero values for this kind.
    fn blank_state(&self) -> VariableState;
}

/// Lookup from kind to adapter.
#[derive(Default)]
pub struct KindRegistry {
    adapters: BTreeMap<VariableKind, Box<dyn VariableAdapter>>,
}

impl std::fmt::Debug for KindRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KindRegistry")
            .field("kinds", &self.adapters.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl KindRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in kind and default settings.
    pub fn with_builtin() -> Self {
        let adapters = builtin_adapters(&IntervalDefaults::default())
            .into_iter()
            .map(|adapter| (adapter.kind(), adapter))
            .collect();
        Self { adapters }
    }

    /// Registry with the kinds enabled in `config`.
    pub fn from_config(config: &Config) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for adapter in builtin_adapters(&config.interval) {
            if config.registry.kinds.contains(&adapter.kind()) {
                registry.register(adapter)?;
            }
        }
        tracing::debug!(kinds = registry.adapters.len(), "Kind registry built");
        Ok(registry)
    }

    pub fn register(&mut self, adapter: Box<dyn VariableAdapter>) -> Result<(), RegistryError> {
        let kind = adapter.kind();
        if self.adapters.contains_key(&kind) {
            return Err(RegistryError::DuplicateKind { kind });
        }
        self.adapters.insert(kind, adapter);
        Ok(())
    }

    pub fn get(&self, kind: VariableKind) -> Result<&dyn VariableAdapter, RegistryError> {
        self.adapters
            .get(&kind)
            .map(Box::as_ref)
            .ok_or(RegistryError::UnknownKind { kind })
    }

    pub fn blank_state(&self, kind: VariableKind) -> Result<VariableState, RegistryError> {
        self.get(kind).map(|adapter| adapter.blank_state())
    }

    pub fn kinds(&self) -> impl Iterator<Item = VariableKind> + '_ {
        self.adapters.keys().copied()
    }

    pub fn adapters(&self) -> impl Iterator<Item = &dyn VariableAdapter> {
        self.adapters.values().map(Box::as_ref)
    }
}

/// Publish `registry` process-wide. Only the first call succeeds.
pub fn install(registry: KindRegistry) -> Result<&'static KindRegistry, RegistryError> {
    GLOBAL
        .set(registry)
        .map_err(|_| RegistryError::AlreadyInstalled)?;
    GLOBAL.get().ok_or(RegistryError::AlreadyInstalled)
}
