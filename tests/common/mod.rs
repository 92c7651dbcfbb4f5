//! Shared fixture paths and probes for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use dss_exports::ExportListReader;

/// Root of the checked-in test data.
pub fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("data")
}

/// Current-schema export list with every kind of filter.
pub fn export_list_file() -> PathBuf {
    data_dir().join("exports").join("config.toml")
}

/// Project directory holding `Scenarios/scenario1`.
pub fn project_dir() -> PathBuf {
    data_dir().join("project")
}

/// Legacy (Publish/NoPublish) export list of `scenario1`.
pub fn legacy_file() -> PathBuf {
    project_dir()
        .join("Scenarios")
        .join("scenario1")
        .join("ExportLists")
        .join("ExportMode-byClass.toml")
}

/// Current-schema equivalent of [`legacy_file`].
pub fn legacy_equivalent_file() -> PathBuf {
    data_dir().join("exports").join("legacy_equivalent.toml")
}

/// [`legacy_file`] nested under the `ExportMode-byClass` wrapper.
pub fn wrapped_legacy_file() -> PathBuf {
    data_dir().join("exports").join("wrapped_legacy.toml")
}

pub fn load(path: PathBuf) -> ExportListReader {
    ExportListReader::new(&path)
        .unwrap_or_else(|e| panic!("{} should load: {e}", path.display()))
}

/// Element names used to probe name filters.
pub const PROBE_NAMES: &[&str] = &[
    "bus1",
    "bus2",
    "Line.sw1",
    "Line.tie3",
    "Load.lp1",
    "Load.lp9",
    "",
];

/// Values used to probe value filters, including band edges.
pub const PROBE_VALUES: &[f64] = &[-1.0e6, -1.0, 0.0, 0.95, 1.0, 1.05, 4.0, 1.0e6];
