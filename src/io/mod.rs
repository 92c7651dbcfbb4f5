/// CSV export of resolved export-list settings.
pub mod export;
