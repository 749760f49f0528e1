//! Built-in variable kind adapters.

use crate::config::IntervalDefaults;
use crate::variables::{
    AdHocSettings, ConstantSettings, CustomSettings, DataSourceSettings, IntervalSettings,
    KindSettings, QuerySettings, TextBoxSettings, VariableEditorState, VariableHide,
    VariableKind, VariableModel, VariableRefresh, VariableState,
};

use super::VariableAdapter;

fn blank(settings: KindSettings) -> VariableState {
    let editor = VariableEditorState::for_kind(settings.kind());
    VariableState {
        variable: VariableModel::blank(settings),
        editor,
    }
}

/// Every built-in adapter, in kind order.
pub fn builtin_adapters(interval: &IntervalDefaults) -> Vec<Box<dyn VariableAdapter>> {
    vec![
        Box::new(QueryAdapter),
        Box::new(ConstantAdapter),
        Box::new(IntervalAdapter::new(interval.clone())),
        Box::new(CustomAdapter),
        Box::new(TextBoxAdapter),
        Box::new(DataSourceAdapter),
        Box::new(AdHocAdapter),
    ]
}

pub struct QueryAdapter;

impl VariableAdapter for QueryAdapter {
    fn kind(&self) -> VariableKind {
        VariableKind::Query
    }

    fn name(&self) -> &'static str {
        "Query"
    }

    fn description(&self) -> &'static str {
        "Variable values are fetched from a data source query"
    }

    fn blank_state(&self) -> VariableState {
        blank(KindSettings::Query(QuerySettings::default()))
    }
}

/// Hidden by default; constants are dashboard plumbing, not pickers.
pub struct ConstantAdapter;

impl VariableAdapter for ConstantAdapter {
    fn kind(&self) -> VariableKind {
        VariableKind::Constant
    }

    fn name(&self) -> &'static str {
        "Constant"
    }

    fn description(&self) -> &'static str {
        "Hidden constant value, useful for metric prefixes in shared dashboards"
    }

    fn blank_state(&self) -> VariableState {
        let mut state = blank(KindSettings::Constant(ConstantSettings::default()));
        state.variable.hide = VariableHide::HideVariable;
        state
    }
}

pub struct IntervalAdapter {
    defaults: IntervalDefaults,
}

impl IntervalAdapter {
    pub fn new(defaults: IntervalDefaults) -> Self {
        Self { defaults }
    }
}

impl VariableAdapter for IntervalAdapter {
    fn kind(&self) -> VariableKind {
        VariableKind::Interval
    }

    fn name(&self) -> &'static str {
        "Interval"
    }

    fn description(&self) -> &'static str {
        "Timespan interval such as 1m, 1h or 1d"
    }

    fn blank_state(&self) -> VariableState {
        blank(KindSettings::Interval(IntervalSettings {
            query: self.defaults.values.clone(),
            auto: false,
            auto_count: self.defaults.auto_count,
            auto_min: self.defaults.auto_min.clone(),
            refresh: VariableRefresh::OnTimeRangeChanged,
        }))
    }
}

pub struct CustomAdapter;

impl VariableAdapter for CustomAdapter {
    fn kind(&self) -> VariableKind {
        VariableKind::Custom
    }

    fn name(&self) -> &'static str {
        "Custom"
    }

    fn description(&self) -> &'static str {
        "Values are defined manually as a comma-separated list"
    }

    fn blank_state(&self) -> VariableState {
        blank(KindSettings::Custom(CustomSettings::default()))
    }
}

pub struct TextBoxAdapter;

impl VariableAdapter for TextBoxAdapter {
    fn kind(&self) -> VariableKind {
        VariableKind::TextBox
    }

    fn name(&self) -> &'static str {
        "Text box"
    }

    fn description(&self) -> &'static str {
        "Free text input with an optional default value"
    }

    fn blank_state(&self) -> VariableState {
        blank(KindSettings::TextBox(TextBoxSettings::default()))
    }
}

pub struct DataSourceAdapter;

impl VariableAdapter for DataSourceAdapter {
    fn kind(&self) -> VariableKind {
        VariableKind::DataSource
    }

    fn name(&self) -> &'static str {
        "Data source"
    }

    fn description(&self) -> &'static str {
        "Switch the data source for multiple panels at once"
    }

    fn blank_state(&self) -> VariableState {
        blank(KindSettings::DataSource(DataSourceSettings::default()))
    }
}

pub struct AdHocAdapter;

impl VariableAdapter for AdHocAdapter {
    fn kind(&self) -> VariableKind {
        VariableKind::AdHoc
    }

    fn name(&self) -> &'static str {
        "Ad hoc filters"
    }

    fn description(&self) -> &'static str {
        "Key/value filters added on the fly to every query"
    }

    fn blank_state(&self) -> VariableState {
        blank(KindSettings::AdHoc(AdHocSettings::default()))
    }
}
