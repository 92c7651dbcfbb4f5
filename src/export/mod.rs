//! Export-list configuration: which quantities are recorded, for which
//! elements, and how their values are filtered and reduced.

pub mod filters;
pub mod property;
pub mod reader;
pub mod schema;
pub mod storage;

pub use filters::{Limits, LimitsFilter, NameFilter, ValueFilter};
pub use property::{ExportListProperty, PropertyConfig, StoreValuesType};
pub use reader::ExportListReader;
pub use schema::SchemaVersion;
pub use storage::ValueStorage;
