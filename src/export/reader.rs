//! Export-list reader: the query surface used by the export pipeline.

use std::collections::HashMap;
use std::path::Path;

use super::property::ExportListProperty;
use super::schema::{self, NormalizedExportList, SchemaVersion};
use crate::document::{load_document, parse_document};
use crate::error::{ExportError, ExportResult};
use crate::layout::{ExportMode, export_list_path};

#[derive(Debug, Clone)]
struct ElementClassExports {
    name: String,
    properties: Vec<ExportListProperty>,
    index: HashMap<String, usize>,
}

/// Parsed, validated, read-only view of one export-list document.
///
/// Classes and properties are kept in declaration order so downstream
/// output schemas are deterministic. Every entry is validated while the
/// reader is built; a bad entry fails the whole load.
#[derive(Debug, Clone)]
pub struct ExportListReader {
    schema: SchemaVersion,
    classes: Vec<ElementClassExports>,
    class_index: HashMap<String, usize>,
    publication_list: Vec<String>,
}

impl ExportListReader {
    /// Loads an export list from a TOML file in either schema.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] / [`ExportError::Toml`] if the file cannot
    /// be read or parsed, and [`ExportError::InvalidConfiguration`] for any
    /// invalid entry.
    pub fn new(path: impl AsRef<Path>) -> ExportResult<Self> {
        let path = path.as_ref();
        let reader = Self::from_document(load_document(path)?)?;
        tracing::info!(
            path = %path.display(),
            schema = %reader.schema,
            classes = reader.classes.len(),
            publications = reader.publication_list.len(),
            "loaded export list"
        );
        Ok(reader)
    }

    /// Loads the by-class export list of `scenario` inside `project`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn for_scenario(project: &Path, scenario: &str) -> ExportResult<Self> {
        Self::new(export_list_path(project, scenario, ExportMode::ByClass))
    }

    /// Parses an export list from a TOML string.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`], minus I/O.
    pub fn from_toml_str(s: &str) -> ExportResult<Self> {
        Self::from_document(parse_document(s)?)
    }

    /// Builds a reader from an already-parsed document.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidConfiguration`] if the document matches
    /// neither schema or any entry is invalid.
    pub fn from_document(doc: toml::Table) -> ExportResult<Self> {
        Self::from_normalized(schema::normalize(doc)?)
    }

    fn from_normalized(list: NormalizedExportList) -> ExportResult<Self> {
        let mut classes = Vec::with_capacity(list.classes.len());
        let mut class_index = HashMap::with_capacity(list.classes.len());
        let mut publication_list = Vec::new();

        for entry in list.classes {
            let mut properties = Vec::with_capacity(entry.properties.len());
            let mut index = HashMap::with_capacity(entry.properties.len());
            for (property_name, config) in entry.properties {
                let property = ExportListProperty::new(&entry.name, &property_name, config)?;
                if property.publish() {
                    publication_list.push(format!("{} {}", entry.name, property_name));
                }
                index.insert(property_name, properties.len());
                properties.push(property);
            }
            class_index.insert(entry.name.clone(), classes.len());
            classes.push(ElementClassExports {
                name: entry.name,
                properties,
                index,
            });
        }

        Ok(Self {
            schema: list.schema,
            classes,
            class_index,
            publication_list,
        })
    }

    /// Schema the document was written in.
    pub fn schema(&self) -> SchemaVersion {
        self.schema
    }

    /// Configured element classes in declaration order.
    pub fn list_element_classes(&self) -> Vec<&str> {
        self.classes.iter().map(|c| c.name.as_str()).collect()
    }

    /// Properties configured for `element_class`, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidParameter`] if the class is unknown.
    pub fn list_element_properties(&self, element_class: &str) -> ExportResult<Vec<&str>> {
        let class = self.class(element_class)?;
        Ok(class
            .properties
            .iter()
            .map(ExportListProperty::property_name)
            .collect())
    }

    /// Settings governing `property_name` of `element_class`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidParameter`] if the class, or the
    /// property within that class, is unknown.
    pub fn get_element_property(
        &self,
        element_class: &str,
        property_name: &str,
    ) -> ExportResult<&ExportListProperty> {
        let class = self.class(element_class)?;
        class
            .index
            .get(property_name)
            .map(|&i| &class.properties[i])
            .ok_or_else(|| {
                ExportError::InvalidParameter(format!(
                    "element class \"{element_class}\" has no property \"{property_name}\""
                ))
            })
    }

    /// `"<Class> <Property>"` for every published property, in declaration
    /// order. Empty when nothing is published.
    pub fn publication_list(&self) -> &[String] {
        &self.publication_list
    }

    /// Every configured property, classes and properties in declaration order.
    pub fn iter_properties(&self) -> impl Iterator<Item = &ExportListProperty> {
        self.classes.iter().flat_map(|c| c.properties.iter())
    }

    fn class(&self, element_class: &str) -> ExportResult<&ElementClassExports> {
        self.class_index
            .get(element_class)
            .map(|&i| &self.classes[i])
            .ok_or_else(|| {
                ExportError::InvalidParameter(format!("unknown element class \"{element_class}\""))
            })
    }
}
