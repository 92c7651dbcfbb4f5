//! Error type shared by the export-list reader and its properties.

use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors raised while loading or querying an export list.
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    /// The document is structurally wrong or contradicts itself.
    ///
    /// Raised while the reader loads, never at query time.
    #[error("invalid configuration: {field}: {message}")]
    InvalidConfiguration {
        /// Dotted field path (e.g., `"Buses.puVmagAngle.limits"`).
        field: String,
        /// Human-readable constraint description.
        message: String,
    },

    /// A query named a class or property that is not configured.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("cannot read \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ExportError {
    pub(crate) fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns `true` for [`ExportError::InvalidConfiguration`].
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration { .. })
    }

    /// Returns `true` for [`ExportError::InvalidParameter`].
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_field_path() {
        let e = ExportError::config("Buses.puVmagAngle.limits", "expected 2 elements, got 1");
        assert_eq!(
            e.to_string(),
            "invalid configuration: Buses.puVmagAngle.limits: expected 2 elements, got 1"
        );
        assert!(e.is_invalid_configuration());
        assert!(!e.is_invalid_parameter());
    }

    #[test]
    fn invalid_parameter_display() {
        let e = ExportError::InvalidParameter("unknown element class \"Foo\"".into());
        assert!(e.to_string().starts_with("invalid parameter:"));
        assert!(e.is_invalid_parameter());
    }
}
