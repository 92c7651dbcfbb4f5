//! Schema detection and normalization of export-list documents.
//!
//! Two document shapes are accepted:
//!
//! * **current**: `[Class.Property]` tables holding property settings;
//! * **legacy**: `[Class]` tables holding `Publish` / `NoPublish` name lists,
//!   optionally wrapped in a single `ExportMode-byClass` table.
//!
//! Both are lowered into [`NormalizedExportList`] before any property is
//! built, so the reader never looks at document shape again.

use std::collections::HashSet;
use std::fmt;

use super::property::PropertyConfig;
use crate::error::{ExportError, ExportResult};
use crate::layout::ExportMode;

const PUBLISH_KEY: &str = "Publish";
const NO_PUBLISH_KEY: &str = "NoPublish";

/// Which document schema a reader was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    Current,
    Legacy,
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => f.write_str("current"),
            Self::Legacy => f.write_str("legacy"),
        }
    }
}

/// One element class with its properties in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassEntry {
    pub name: String,
    pub properties: Vec<(String, PropertyConfig)>,
}

/// Schema-independent form of an export-list document.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedExportList {
    pub schema: SchemaVersion,
    pub classes: Vec<ClassEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentShape {
    Current,
    Legacy,
    WrappedLegacy,
}

/// Detects the document schema and lowers it to the normalized form.
///
/// # Errors
///
/// Returns [`ExportError::InvalidConfiguration`] for documents that match
/// neither schema, and for malformed entries within a recognized schema.
pub fn normalize(mut doc: toml::Table) -> ExportResult<NormalizedExportList> {
    match detect_shape(&doc)? {
        DocumentShape::Current => parse_current(doc),
        DocumentShape::Legacy => parse_legacy(doc),
        DocumentShape::WrappedLegacy => {
            let key = ExportMode::ByClass.as_str();
            match doc.remove(key) {
                Some(toml::Value::Table(inner)) => parse_legacy(inner),
                _ => Err(ExportError::config(key, "expected a table of element classes")),
            }
        }
    }
}

fn detect_shape(doc: &toml::Table) -> ExportResult<DocumentShape> {
    if let Some(mode) = doc.keys().find_map(|k| ExportMode::from_wrapper_key(k)) {
        if mode != ExportMode::ByClass {
            return Err(ExportError::config(
                mode.as_str(),
                "per-element export lists are not supported",
            ));
        }
        if doc.len() != 1 {
            return Err(ExportError::config(
                mode.as_str(),
                "must be the only top-level key when present",
            ));
        }
        return Ok(DocumentShape::WrappedLegacy);
    }

    let mut legacy = Vec::new();
    let mut current = Vec::new();
    for (class, value) in doc {
        let table = value
            .as_table()
            .ok_or_else(|| ExportError::config(class, "expected a table of properties"))?;
        if table.is_empty() {
            continue;
        }
        if table.contains_key(PUBLISH_KEY) || table.contains_key(NO_PUBLISH_KEY) {
            legacy.push(class.as_str());
        } else {
            current.push(class.as_str());
        }
    }

    match (legacy.first(), current.first()) {
        (Some(l), Some(c)) => Err(ExportError::config(
            "<document>",
            format!(
                "mixes legacy Publish/NoPublish classes (e.g. {l}) with \
                 per-property classes (e.g. {c})"
            ),
        )),
        (Some(_), None) => Ok(DocumentShape::Legacy),
        (None, _) => Ok(DocumentShape::Current),
    }
}

fn parse_current(doc: toml::Table) -> ExportResult<NormalizedExportList> {
    let mut classes = Vec::with_capacity(doc.len());
    for (class, value) in doc {
        let toml::Value::Table(table) = value else {
            return Err(ExportError::config(class, "expected a table of properties"));
        };
        let mut properties = Vec::with_capacity(table.len());
        for (property, fragment) in table {
            let config = PropertyConfig::from_fragment(&format!("{class}.{property}"), fragment)?;
            properties.push((property, config));
        }
        classes.push(ClassEntry {
            name: class,
            properties,
        });
    }
    Ok(NormalizedExportList {
        schema: SchemaVersion::Current,
        classes,
    })
}

fn parse_legacy(doc: toml::Table) -> ExportResult<NormalizedExportList> {
    let mut classes = Vec::with_capacity(doc.len());
    for (class, value) in doc {
        let toml::Value::Table(table) = value else {
            return Err(ExportError::config(class, "expected Publish/NoPublish lists"));
        };
        if let Some(key) = table
            .keys()
            .find(|k| k.as_str() != PUBLISH_KEY && k.as_str() != NO_PUBLISH_KEY)
        {
            return Err(ExportError::config(
                format!("{class}.{key}"),
                "unknown key in legacy export list (expected Publish or NoPublish)",
            ));
        }

        let publish = name_list(&class, PUBLISH_KEY, table.get(PUBLISH_KEY))?;
        let no_publish = name_list(&class, NO_PUBLISH_KEY, table.get(NO_PUBLISH_KEY))?;

        let mut seen = HashSet::new();
        let mut properties = Vec::with_capacity(publish.len() + no_publish.len());
        let tagged = publish
            .into_iter()
            .map(|p| (p, true))
            .chain(no_publish.into_iter().map(|p| (p, false)));
        for (property, publish) in tagged {
            if !seen.insert(property.clone()) {
                return Err(ExportError::config(
                    format!("{class}.{property}"),
                    "listed more than once",
                ));
            }
            let config = PropertyConfig {
                publish,
                ..PropertyConfig::default()
            };
            properties.push((property, config));
        }
        classes.push(ClassEntry {
            name: class,
            properties,
        });
    }
    Ok(NormalizedExportList {
        schema: SchemaVersion::Legacy,
        classes,
    })
}

fn name_list(class: &str, key: &str, value: Option<&toml::Value>) -> ExportResult<Vec<String>> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };
    let field = format!("{class}.{key}");
    let items = value
        .as_array()
        .ok_or_else(|| ExportError::config(&field, "expected an array of property names"))?;
    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                ExportError::config(&field, format!("expected a string, got {item}"))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_document;

    fn normalize_str(s: &str) -> ExportResult<NormalizedExportList> {
        normalize(parse_document(s).expect("valid TOML"))
    }

    fn property_names(list: &NormalizedExportList, class: &str) -> Vec<String> {
        list.classes
            .iter()
            .find(|c| c.name == class)
            .map(|c| c.properties.iter().map(|(p, _)| p.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn current_schema_keeps_order_and_settings() {
        let list = normalize_str(
            r#"
[Lines.Currents]
limits = [0.0, 400.0]
limits_filter = "outside"

[Buses.puVmagAngle]
names = ["bus1"]

[Buses.Distance]
"#,
        )
        .expect("current schema");
        assert_eq!(list.schema, SchemaVersion::Current);
        let classes: Vec<&str> = list.classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(classes, vec!["Lines", "Buses"]);
        assert_eq!(property_names(&list, "Buses"), vec!["puVmagAngle", "Distance"]);
        let (_, currents) = &list.classes[0].properties[0];
        assert_eq!(currents.limits, Some(vec![0.0, 400.0]));
    }

    #[test]
    fn legacy_publish_entries_come_first() {
        let list = normalize_str(
            r#"
[Circuits]
Publish = ["TotalPower", "Losses"]
NoPublish = ["LineLosses"]
"#,
        )
        .expect("legacy schema");
        assert_eq!(list.schema, SchemaVersion::Legacy);
        let props = &list.classes[0].properties;
        let flags: Vec<(&str, bool)> = props.iter().map(|(p, c)| (p.as_str(), c.publish)).collect();
        assert_eq!(
            flags,
            vec![("TotalPower", true), ("Losses", true), ("LineLosses", false)]
        );
    }

    #[test]
    fn wrapped_legacy_matches_unwrapped() {
        let plain = normalize_str("[Buses]\nNoPublish = [\"Distance\"]\n").expect("plain");
        let wrapped = normalize_str("[ExportMode-byClass.Buses]\nNoPublish = [\"Distance\"]\n")
            .expect("wrapped");
        assert_eq!(plain, wrapped);
    }

    #[test]
    fn empty_document_is_current_and_empty() {
        let list = normalize_str("").expect("empty");
        assert_eq!(list.schema, SchemaVersion::Current);
        assert!(list.classes.is_empty());
    }

    #[test]
    fn mixed_document_rejected() {
        let err = normalize_str(
            r#"
[Buses]
NoPublish = ["Distance"]

[Lines.Currents]
"#,
        )
        .unwrap_err();
        assert!(err.is_invalid_configuration());
        assert!(err.to_string().contains("mixes"));
    }

    #[test]
    fn wrapper_with_siblings_rejected() {
        let err = normalize_str(
            r#"
[ExportMode-byClass.Buses]
NoPublish = ["Distance"]

[Lines.Currents]
"#,
        )
        .unwrap_err();
        assert!(err.is_invalid_configuration());
    }

    #[test]
    fn by_element_wrapper_rejected() {
        let err =
            normalize_str("[ExportMode-byElement.\"Line.l1\"]\nPublish = []\n").unwrap_err();
        assert!(err.to_string().contains("ExportMode-byElement"));
    }

    #[test]
    fn non_table_class_rejected() {
        let err = normalize_str("Buses = [\"puVmagAngle\"]\n").unwrap_err();
        assert!(err.is_invalid_configuration());
    }

    #[test]
    fn legacy_duplicate_rejected() {
        let err = normalize_str(
            r#"
[Loads]
Publish = ["Powers"]
NoPublish = ["Powers"]
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Loads.Powers"));
    }

    #[test]
    fn legacy_bare_string_rejected() {
        let err = normalize_str("[Loads]\nPublish = \"Powers\"\n").unwrap_err();
        assert!(err.is_invalid_configuration());
    }

    #[test]
    fn legacy_unknown_key_rejected() {
        let err = normalize_str("[Loads]\nPublish = []\nExtra = 1\n").unwrap_err();
        assert!(err.to_string().contains("Loads.Extra"));
    }
}
