//! Export-list configuration for time-series distribution-circuit
//! simulations: what to record, for which elements, and how to filter and
//! reduce the recorded values.

#[cfg(feature = "api")]
pub mod api;
pub mod document;
pub mod error;
pub mod export;
pub mod io;
/// Project directory layout and export modes.
pub mod layout;

pub use error::{ExportError, ExportResult};
pub use export::{ExportListProperty, ExportListReader};
