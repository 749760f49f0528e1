use template_vars::config::{Config, IntervalDefaults};
use template_vars::registry::{
    self, IntervalAdapter, KindRegistry, QueryAdapter, RegistryError, VariableAdapter, DRAFT_KIND,
};
use template_vars::variables::{KindSettings, VariableKind, VariableState};

/// Adapter that decorates the built-in query blank state.
struct PresetQueryAdapter;

impl VariableAdapter for PresetQueryAdapter {
    fn kind(&self) -> VariableKind {
        VariableKind::Query
    }

    fn name(&self) -> &'static str {
        "Preset query"
    }

    fn description(&self) -> &'static str {
        "Query with a default data source"
    }

    fn blank_state(&self) -> VariableState {
        let mut state = QueryAdapter.blank_state();
        if let KindSettings::Query(settings) = &mut state.variable.settings {
            settings.datasource = Some("default".to_string());
        }
        state
    }
}

#[test]
fn install_publishes_registry_once() {
    let mut custom = KindRegistry::new();
    custom.register(Box::new(PresetQueryAdapter)).unwrap();

    let installed = registry::install(custom).unwrap();
    assert_eq!(installed.get(DRAFT_KIND).unwrap().name(), "Preset query");

    let second = registry::install(KindRegistry::with_builtin());
    assert_eq!(second.unwrap_err(), RegistryError::AlreadyInstalled);
    assert_eq!(installed.kinds().count(), 1);
}

#[test]
fn custom_adapter_blank_state_is_used() {
    let mut registry = KindRegistry::new();
    registry.register(Box::new(PresetQueryAdapter)).unwrap();

    let state = registry.blank_state(VariableKind::Query).unwrap();
    match state.variable.settings {
        KindSettings::Query(settings) => {
            assert_eq!(settings.datasource.as_deref(), Some("default"))
        }
        other => panic!("expected query settings, got {other:?}"),
    }
}

#[test]
fn custom_adapter_conflicts_with_builtin() {
    let mut registry = KindRegistry::with_builtin();
    let err = registry.register(Box::new(PresetQueryAdapter)).unwrap_err();
    assert_eq!(
        err,
        RegistryError::DuplicateKind {
            kind: VariableKind::Query
        }
    );
}

#[test]
fn from_config_passes_interval_defaults() {
    let mut config = Config::default();
    config.interval = IntervalDefaults {
        values: "1h,1d".to_string(),
        auto_count: 5,
        auto_min: "1m".to_string(),
    };

    let from_config = KindRegistry::from_config(&config)
        .unwrap()
        .blank_state(VariableKind::Interval)
        .unwrap();
    let direct = IntervalAdapter::new(config.interval.clone()).blank_state();
    assert_eq!(from_config, direct);
}

#[test]
fn blank_states_do_not_share_data() {
    let registry = KindRegistry::with_builtin();
    let mut first = registry.blank_state(VariableKind::AdHoc).unwrap();
    first.editor.fail_update("boom");

    let second = registry.blank_state(VariableKind::AdHoc).unwrap();
    assert!(second.editor.is_valid);
    assert!(second.editor.errors.is_empty());
}
