//! One configured (element class, property) row of an export list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::filters::{Limits, LimitsFilter, NameFilter, ValueFilter};
use crate::error::{ExportError, ExportResult};

/// Temporal reduction applied to a property's time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreValuesType {
    #[default]
    All,
    ChangesOnly,
    ChangeCount,
    First,
    Last,
    Max,
    Min,
    Sum,
    MovingAverage,
    MovingAverageMax,
}

impl StoreValuesType {
    /// Every variant, in the order they are documented.
    pub const VARIANTS: [Self; 10] = [
        Self::All,
        Self::ChangesOnly,
        Self::ChangeCount,
        Self::First,
        Self::Last,
        Self::Max,
        Self::Min,
        Self::Sum,
        Self::MovingAverage,
        Self::MovingAverageMax,
    ];

    /// Configuration-file spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::ChangesOnly => "changes_only",
            Self::ChangeCount => "change_count",
            Self::First => "first",
            Self::Last => "last",
            Self::Max => "max",
            Self::Min => "min",
            Self::Sum => "sum",
            Self::MovingAverage => "moving_average",
            Self::MovingAverageMax => "moving_average_max",
        }
    }
}

impl fmt::Display for StoreValuesType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreValuesType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::VARIANTS
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::VARIANTS.iter().map(|v| v.as_str()).collect();
                format!(
                    "unknown store_values_type \"{s}\", expected one of: {}",
                    known.join(", ")
                )
            })
    }
}

/// Raw settings for one property, as written in the document.
///
/// Every key is optional; an empty table tracks every instance, keeps every
/// value and stores all samples.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PropertyConfig {
    pub store_values_type: StoreValuesType,
    /// `[min, max]`; checked for arity when the property is built.
    pub limits: Option<Vec<f64>>,
    pub limits_filter: Option<LimitsFilter>,
    pub names: Option<Vec<String>>,
    pub name_regexes: Option<Vec<String>>,
    /// Include this property in the reader's publication list.
    pub publish: bool,
    /// Record every Nth time step (must be > 0).
    pub sample_interval: u32,
    /// Trailing window for moving-average reductions (must be > 0).
    pub window_size: usize,
}

impl Default for PropertyConfig {
    fn default() -> Self {
        Self {
            store_values_type: StoreValuesType::All,
            limits: None,
            limits_filter: None,
            names: None,
            name_regexes: None,
            publish: false,
            sample_interval: 1,
            window_size: 100,
        }
    }
}

impl PropertyConfig {
    /// Deserializes settings from a raw document fragment.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidConfiguration`] at `field` if the
    /// fragment is not a table, has unknown keys, or has values of the wrong
    /// type (e.g. a bare string for `names` or a scalar for `limits`).
    pub fn from_fragment(field: &str, fragment: toml::Value) -> ExportResult<Self> {
        fragment
            .try_into()
            .map_err(|e: toml::de::Error| ExportError::config(field, e.to_string().trim()))
    }
}

/// Validated, immutable export settings for one (class, property) pair.
#[derive(Debug, Clone)]
pub struct ExportListProperty {
    element_class: String,
    property_name: String,
    store_values_type: StoreValuesType,
    name_filter: NameFilter,
    value_filter: ValueFilter,
    publish: bool,
    sample_interval: u32,
    window_size: usize,
}

impl ExportListProperty {
    /// Builds a property from typed settings.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidConfiguration`] for malformed limits,
    /// conflicting name selection, or a zero interval/window.
    pub fn new(
        element_class: impl Into<String>,
        property_name: impl Into<String>,
        config: PropertyConfig,
    ) -> ExportResult<Self> {
        let element_class = element_class.into();
        let property_name = property_name.into();
        let field = format!("{element_class}.{property_name}");

        let value_filter =
            ValueFilter::from_config(&field, config.limits.as_deref(), config.limits_filter)?;
        let name_filter = NameFilter::from_config(&field, config.names, config.name_regexes)?;

        if config.sample_interval == 0 {
            return Err(ExportError::config(format!("{field}.sample_interval"), "must be > 0"));
        }
        if config.window_size == 0 {
            return Err(ExportError::config(format!("{field}.window_size"), "must be > 0"));
        }

        tracing::debug!(
            element_class = %element_class,
            property = %property_name,
            store_values_type = %config.store_values_type,
            name_filter = %name_filter,
            "built export property"
        );

        Ok(Self {
            element_class,
            property_name,
            store_values_type: config.store_values_type,
            name_filter,
            value_filter,
            publish: config.publish,
            sample_interval: config.sample_interval,
            window_size: config.window_size,
        })
    }

    /// Builds a property from a raw document fragment.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidConfiguration`] if the fragment fails
    /// [`PropertyConfig::from_fragment`] or [`Self::new`].
    pub fn from_fragment(
        element_class: &str,
        property_name: &str,
        fragment: toml::Value,
    ) -> ExportResult<Self> {
        let config =
            PropertyConfig::from_fragment(&format!("{element_class}.{property_name}"), fragment)?;
        Self::new(element_class, property_name, config)
    }

    pub fn element_class(&self) -> &str {
        &self.element_class
    }

    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    pub fn store_values_type(&self) -> StoreValuesType {
        self.store_values_type
    }

    pub fn name_filter(&self) -> &NameFilter {
        &self.name_filter
    }

    pub fn value_filter(&self) -> &ValueFilter {
        &self.value_filter
    }

    pub fn limits(&self) -> Option<Limits> {
        self.value_filter.limits()
    }

    pub fn limits_filter(&self) -> Option<LimitsFilter> {
        self.value_filter.limits_filter()
    }

    pub fn publish(&self) -> bool {
        self.publish
    }

    pub fn sample_interval(&self) -> u32 {
        self.sample_interval
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Whether the element instance `name` should be tracked.
    pub fn should_store_name(&self, name: &str) -> bool {
        self.name_filter.should_store_name(name)
    }

    /// Whether `value` passes the configured limits.
    pub fn should_store_value(&self, value: f64) -> bool {
        self.value_filter.should_store_value(value)
    }

    /// Whether the sample at `time_step` falls on the configured interval.
    pub fn should_sample_value(&self, time_step: u64) -> bool {
        time_step % u64::from(self.sample_interval) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(s: &str) -> toml::Value {
        toml::Value::Table(s.parse::<toml::Table>().expect("fragment should parse"))
    }

    fn build(s: &str) -> ExportResult<ExportListProperty> {
        ExportListProperty::from_fragment("Buses", "puVmagAngle", fragment(s))
    }

    #[test]
    fn empty_fragment_uses_defaults() {
        let prop = build("").expect("empty fragment is valid");
        assert_eq!(prop.store_values_type(), StoreValuesType::All);
        assert!(prop.name_filter().is_unfiltered());
        assert_eq!(prop.limits(), None);
        assert!(!prop.publish());
        assert_eq!(prop.sample_interval(), 1);
        assert_eq!(prop.window_size(), 100);
        assert!(prop.should_store_name("bus2"));
        assert!(prop.should_store_value(4.0));
    }

    #[test]
    fn names_fragment() {
        let prop = build(r#"names = ["bus1", "bus2"]"#).expect("names");
        assert!(prop.should_store_name("bus1"));
        assert!(prop.should_store_name("bus2"));
        assert!(!prop.should_store_name("bus3"));
    }

    #[test]
    fn bare_string_names_rejected() {
        let err = build(r#"names = "bus1""#).unwrap_err();
        assert!(err.is_invalid_configuration(), "{err}");
    }

    #[test]
    fn scalar_limits_rejected() {
        let err = build("limits = 1.0\nlimits_filter = \"outside\"").unwrap_err();
        assert!(err.is_invalid_configuration(), "{err}");
    }

    #[test]
    fn integer_limits_accepted() {
        let prop =
            build("limits = [-1, 1]\nlimits_filter = \"inside\"").expect("integers widen to f64");
        assert_eq!(prop.limits(), Limits::new(-1.0, 1.0));
        assert_eq!(prop.limits_filter(), Some(LimitsFilter::Inside));
    }

    #[test]
    fn limits_fragment_exposes_band() {
        let prop = build("limits = [-1.0, 1.0]\nlimits_filter = \"outside\"").expect("limits");
        let limits = prop.limits().expect("limits set");
        assert_eq!(limits.min(), -1.0);
        assert_eq!(limits.max(), 1.0);
        assert!(prop.should_store_value(-2.0));
        assert!(!prop.should_store_value(0.5));
    }

    #[test]
    fn unknown_key_rejected() {
        let err = build("bogus_field = true").unwrap_err();
        assert!(err.is_invalid_configuration());
        assert!(err.to_string().contains("Buses.puVmagAngle"));
    }

    #[test]
    fn unknown_store_values_type_rejected() {
        let err = build(r#"store_values_type = "median""#).unwrap_err();
        assert!(err.is_invalid_configuration());
    }

    #[test]
    fn non_table_fragment_rejected() {
        let err =
            ExportListProperty::from_fragment("Buses", "Distance", toml::Value::Boolean(true))
                .unwrap_err();
        assert!(err.is_invalid_configuration());
    }

    #[test]
    fn zero_sample_interval_rejected() {
        let err = build("sample_interval = 0").unwrap_err();
        assert!(err.to_string().contains("sample_interval"));
    }

    #[test]
    fn zero_window_rejected() {
        let err = build("window_size = 0").unwrap_err();
        assert!(err.to_string().contains("window_size"));
    }

    #[test]
    fn sampling_follows_interval() {
        let prop = build("sample_interval = 3").expect("interval");
        let sampled: Vec<u64> = (0..10).filter(|t| prop.should_sample_value(*t)).collect();
        assert_eq!(sampled, vec![0, 3, 6, 9]);
    }

    #[test]
    fn store_values_type_strings_round_trip() {
        for v in StoreValuesType::VARIANTS {
            assert_eq!(v.as_str().parse::<StoreValuesType>(), Ok(v));
            let prop = build(&format!("store_values_type = \"{v}\"")).expect("known type");
            assert_eq!(prop.store_values_type(), v);
        }
        assert!("median".parse::<StoreValuesType>().is_err());
    }
}
