//! Per-name and per-value filters attached to an export property.

use std::collections::BTreeSet;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, ExportResult};

/// Which side of the limits band is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitsFilter {
    /// Keep values strictly below `min` or strictly above `max`.
    Outside,
    /// Keep values in `[min, max]`.
    Inside,
}

impl LimitsFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Outside => "outside",
            Self::Inside => "inside",
        }
    }
}

impl fmt::Display for LimitsFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed numeric band with finite bounds and `min <= max`.
///
/// Only [`Limits::new`] builds one, so every value upholds the invariant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Limits {
    min: f64,
    max: f64,
}

impl Limits {
    /// Returns `None` if either bound is not finite or `min > max`.
    pub fn new(min: f64, max: f64) -> Option<Self> {
        (min.is_finite() && max.is_finite() && min <= max).then_some(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Whether `value` lies in the closed band.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Value filter: either no filtering or a band with a policy.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ValueFilter {
    #[default]
    Unfiltered,
    Limits(Limits, LimitsFilter),
}

impl ValueFilter {
    /// Builds a filter from raw `limits` / `limits_filter` settings.
    ///
    /// `field` is the dotted path used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidConfiguration`] if `limits` does not hold
    /// exactly two values, the band is invalid, or only one of the two
    /// settings is present.
    pub fn from_config(
        field: &str,
        limits: Option<&[f64]>,
        filter: Option<LimitsFilter>,
    ) -> ExportResult<Self> {
        match (limits, filter) {
            (None, None) => Ok(Self::Unfiltered),
            (Some(_), None) => Err(ExportError::config(
                format!("{field}.limits_filter"),
                "required when limits is set (\"outside\" or \"inside\")",
            )),
            (None, Some(_)) => Err(ExportError::config(
                format!("{field}.limits_filter"),
                "set without limits",
            )),
            (Some(values), Some(filter)) => {
                let [min, max] = values else {
                    return Err(ExportError::config(
                        format!("{field}.limits"),
                        format!("expected [min, max], got {} element(s)", values.len()),
                    ));
                };
                let limits = Limits::new(*min, *max).ok_or_else(|| {
                    ExportError::config(
                        format!("{field}.limits"),
                        format!("bounds must be finite with min <= max, got [{min}, {max}]"),
                    )
                })?;
                Ok(Self::Limits(limits, filter))
            }
        }
    }

    pub fn should_store_value(&self, value: f64) -> bool {
        match self {
            Self::Unfiltered => true,
            Self::Limits(limits, LimitsFilter::Inside) => limits.contains(value),
            Self::Limits(limits, LimitsFilter::Outside) => {
                value < limits.min() || value > limits.max()
            }
        }
    }

    pub fn limits(&self) -> Option<Limits> {
        match self {
            Self::Unfiltered => None,
            Self::Limits(limits, _) => Some(*limits),
        }
    }

    pub fn limits_filter(&self) -> Option<LimitsFilter> {
        match self {
            Self::Unfiltered => None,
            Self::Limits(_, filter) => Some(*filter),
        }
    }
}

/// Name filter: track every instance, an explicit set, or regex matches.
#[derive(Debug, Clone, Default)]
pub enum NameFilter {
    #[default]
    Unfiltered,
    ByNames(BTreeSet<String>),
    /// Unanchored search; a name is kept if any pattern matches.
    ByRegex(Vec<Regex>),
}

impl NameFilter {
    /// Builds a filter from raw `names` / `name_regexes` settings.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidConfiguration`] if both settings are
    /// present or a pattern fails to compile.
    pub fn from_config(
        field: &str,
        names: Option<Vec<String>>,
        name_regexes: Option<Vec<String>>,
    ) -> ExportResult<Self> {
        match (names, name_regexes) {
            (None, None) => Ok(Self::Unfiltered),
            (Some(_), Some(_)) => Err(ExportError::config(
                field,
                "names and name_regexes are mutually exclusive",
            )),
            (Some(names), None) => {
                if names.is_empty() {
                    tracing::warn!(field, "empty names list; no element will be stored");
                }
                Ok(Self::ByNames(names.into_iter().collect()))
            }
            (None, Some(patterns)) => {
                let regexes = patterns
                    .iter()
                    .map(|p| {
                        Regex::new(p).map_err(|e| {
                            ExportError::config(format!("{field}.name_regexes"), e.to_string())
                        })
                    })
                    .collect::<ExportResult<Vec<_>>>()?;
                if regexes.is_empty() {
                    tracing::warn!(field, "empty name_regexes list; no element will be stored");
                }
                Ok(Self::ByRegex(regexes))
            }
        }
    }

    pub fn should_store_name(&self, name: &str) -> bool {
        match self {
            Self::Unfiltered => true,
            Self::ByNames(names) => names.contains(name),
            Self::ByRegex(regexes) => regexes.iter().any(|re| re.is_match(name)),
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        matches!(self, Self::Unfiltered)
    }
}

impl fmt::Display for NameFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unfiltered => f.write_str("all"),
            Self::ByNames(names) => {
                let joined: Vec<&str> = names.iter().map(String::as_str).collect();
                write!(f, "names={}", joined.join(";"))
            }
            Self::ByRegex(regexes) => {
                let joined: Vec<&str> = regexes.iter().map(Regex::as_str).collect();
                write!(f, "regex={}", joined.join(";"))
            }
        }
    }
}
