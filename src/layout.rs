//! Project directory layout and configuration file names.

use std::fmt;
use std::path::{Path, PathBuf};

/// Extension shared by every configuration file.
pub const CONFIG_EXT: &str = ".toml";

pub const SIMULATION_SETTINGS_FILENAME: &str = "simulation.toml";
pub const PLOTS_FILENAME: &str = "plots.toml";
pub const MONTE_CARLO_SETTINGS_FILENAME: &str = "MonteCarloSettings.toml";

/// Directory under a project holding one directory per scenario.
pub const SCENARIOS_DIR: &str = "Scenarios";
/// Directory under a scenario holding its export lists.
pub const EXPORT_LISTS_DIR: &str = "ExportLists";

/// How exported results are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportMode {
    ByClass,
    ByElement,
}

impl ExportMode {
    pub const VARIANTS: [Self; 2] = [Self::ByClass, Self::ByElement];

    /// Name used both as the legacy wrapper key and as the file stem.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ByClass => "ExportMode-byClass",
            Self::ByElement => "ExportMode-byElement",
        }
    }

    /// File name of the export list for this mode.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::ByClass => "ExportMode-byClass.toml",
            Self::ByElement => "ExportMode-byElement.toml",
        }
    }

    /// Looks up a mode by its wrapper key (e.g. `"ExportMode-byClass"`).
    pub fn from_wrapper_key(key: &str) -> Option<Self> {
        Self::VARIANTS.into_iter().find(|m| m.as_str() == key)
    }
}

impl fmt::Display for ExportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Path of a scenario's export list:
/// `<project>/Scenarios/<scenario>/ExportLists/<mode file>`.
pub fn export_list_path(project: &Path, scenario: &str, mode: ExportMode) -> PathBuf {
    project
        .join(SCENARIOS_DIR)
        .join(scenario)
        .join(EXPORT_LISTS_DIR)
        .join(mode.file_name())
}
