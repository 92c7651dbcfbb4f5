//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::export::{ExportListProperty, Limits, LimitsFilter, StoreValuesType};

/// Resolved settings of one export property.
#[derive(Debug, Serialize)]
pub struct PropertyRecord {
    pub element_class: String,
    pub property: String,
    pub store_values_type: StoreValuesType,
    pub publish: bool,
    pub sample_interval: u32,
    pub window_size: usize,
    pub limits: Option<Limits>,
    pub limits_filter: Option<LimitsFilter>,
    /// Same rendering as the CSV summary (`all`, `names=..`, `regex=..`).
    pub name_filter: String,
    /// Answer for the `name` probe, if one was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_name: Option<bool>,
    /// Answer for the `value` probe, if one was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_value: Option<bool>,
}

impl From<&ExportListProperty> for PropertyRecord {
    fn from(p: &ExportListProperty) -> Self {
        Self {
            element_class: p.element_class().to_string(),
            property: p.property_name().to_string(),
            store_values_type: p.store_values_type(),
            publish: p.publish(),
            sample_interval: p.sample_interval(),
            window_size: p.window_size(),
            limits: p.limits(),
            limits_filter: p.limits_filter(),
            name_filter: p.name_filter().to_string(),
            store_name: None,
            store_value: None,
        }
    }
}

/// Optional filter probes for the property endpoint.
#[derive(Debug, Deserialize)]
pub struct ProbeQuery {
    /// Element instance name to test against the name filter.
    pub name: Option<String>,
    /// Value to test against the limits.
    pub value: Option<f64>,
}

/// Error response body for 4xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
