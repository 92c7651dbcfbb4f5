//! CSV export of an export list's resolved settings.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::export::ExportListReader;

/// Column header for the export-list summary.
const HEADER: &str = "element_class,property,store_values_type,publish,sample_interval,\
                      window_size,limits_min,limits_max,limits_filter,name_filter";

/// Writes the export-list summary to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_summary_csv(reader: &ExportListReader, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_summary_csv(reader, buf)
}

/// Writes one row per configured property, in declaration order.
///
/// Limit columns are empty when the property has no value filter.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_summary_csv(reader: &ExportListReader, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for p in reader.iter_properties() {
        let limits = p.limits();
        wtr.write_record(&[
            p.element_class().to_string(),
            p.property_name().to_string(),
            p.store_values_type().to_string(),
            p.publish().to_string(),
            p.sample_interval().to_string(),
            p.window_size().to_string(),
            limits.map(|l| l.min().to_string()).unwrap_or_default(),
            limits.map(|l| l.max().to_string()).unwrap_or_default(),
            p.limits_filter().map(|f| f.to_string()).unwrap_or_default(),
            p.name_filter().to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
