//! Persisted variable records.
//!
//! A [`VariableModel`] is what the dashboard stores. Common fields live on
//! the model itself; everything that depends on the variable kind lives in
//! [`KindSettings`], so the kind can never disagree with the settings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reserved identity of the uncommitted "new variable" entry.
const DRAFT_ID: &str = "00000000-0000-0000-0000-000000000000";

/// Stable, opaque identity of a variable within the collection.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableId(String);

impl VariableId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The draft sentinel.
    pub fn draft() -> Self {
        Self(DRAFT_ID.to_string())
    }

    /// Fresh random identity for a committed variable.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn is_draft(&self) -> bool {
        self.0 == DRAFT_ID
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Discriminator selecting a variable's behavior provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    Query,
    Constant,
    Interval,
    Custom,
    TextBox,
    DataSource,
    AdHoc,
}

impl VariableKind {
    pub const ALL: [VariableKind; 7] = [
        VariableKind::Query,
        VariableKind::Constant,
        VariableKind::Interval,
        VariableKind::Custom,
        VariableKind::TextBox,
        VariableKind::DataSource,
        VariableKind::AdHoc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::Query => "query",
            VariableKind::Constant => "constant",
            VariableKind::Interval => "interval",
            VariableKind::Custom => "custom",
            VariableKind::TextBox => "textbox",
            VariableKind::DataSource => "datasource",
            VariableKind::AdHoc => "adhoc",
        }
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Unrecognized variable kind name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown variable kind '{0}'")]
pub struct ParseKindError(pub String);

impl FromStr for VariableKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VariableKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}

/// Visibility policy on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableHide {
    #[default]
    DontHide,
    HideLabel,
    HideVariable,
}

/// When a variable's options are refreshed by the external provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableRefresh {
    #[default]
    Never,
    OnDashboardLoad,
    OnTimeRangeChanged,
}

/// Ordering applied to query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableSort {
    #[default]
    Disabled,
    AlphabeticalAsc,
    AlphabeticalDesc,
    NumericalAsc,
    NumericalDesc,
}

/// One selectable value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VariableOption {
    pub text: String,
    pub value: String,
    #[serde(default)]
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySettings {
    pub datasource: Option<String>,
    pub query: String,
    pub regex: String,
    pub refresh: VariableRefresh,
    pub sort: VariableSort,
    pub multi: bool,
    pub include_all: bool,
    pub all_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstantSettings {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IntervalSettings {
    /// Comma-separated interval values, e.g. `1m,10m,1h`.
    pub query: String,
    pub auto: bool,
    pub auto_count: u32,
    pub auto_min: String,
    pub refresh: VariableRefresh,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomSettings {
    pub query: String,
    pub multi: bool,
    pub include_all: bool,
    pub all_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextBoxSettings {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSourceSettings {
    /// Data source plugin id to list instances of.
    pub query: String,
    pub regex: String,
    pub multi: bool,
    pub include_all: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdHocFilter {
    pub key: String,
    pub operator: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdHocSettings {
    pub datasource: Option<String>,
    pub filters: Vec<AdHocFilter>,
}

/// Kind-specific configuration, tagged by kind name under `"type"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum KindSettings {
    Query(QuerySettings),
    Constant(ConstantSettings),
    Interval(IntervalSettings),
    Custom(CustomSettings),
    TextBox(TextBoxSettings),
    DataSource(DataSourceSettings),
    AdHoc(AdHocSettings),
}

impl KindSettings {
    pub fn kind(&self) -> VariableKind {
        match self {
            KindSettings::Query(_) => VariableKind::Query,
            KindSettings::Constant(_) => VariableKind::Constant,
            KindSettings::Interval(_) => VariableKind::Interval,
            KindSettings::Custom(_) => VariableKind::Custom,
            KindSettings::TextBox(_) => VariableKind::TextBox,
            KindSettings::DataSource(_) => VariableKind::DataSource,
            KindSettings::AdHoc(_) => VariableKind::AdHoc,
        }
    }
}

/// A named, ordered, typed dashboard parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableModel {
    pub id: VariableId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub hide: VariableHide,
    #[serde(default)]
    pub skip_url_sync: bool,
    #[serde(default)]
    pub global: bool,
    /// Display and evaluation order; contiguous `0..n` across committed variables.
    #[serde(default)]
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<VariableOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<VariableOption>,
    #[serde(flatten)]
    pub settings: KindSettings,
}

impl VariableModel {
    /// Zero-valued record for `settings`' kind, carrying the draft identity
    /// until a caller assigns a real one.
    pub fn blank(settings: KindSettings) -> Self {
        Self {
            id: VariableId::draft(),
            name: String::new(),
            label: None,
            hide: VariableHide::default(),
            skip_url_sync: false,
            global: false,
            index: 0,
            current: None,
            options: Vec::new(),
            settings,
        }
    }

    pub fn kind(&self) -> VariableKind {
        self.settings.kind()
    }
}
