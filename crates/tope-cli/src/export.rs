//! CSV export of sample vectors for external measurement tools.

use std::io::{BufWriter, Write};
use std::path::Path;

/// Write named sample columns to a CSV file.
///
/// All columns must have the same length; one header row followed by one
/// row per sample index.
pub fn write_csv<P: AsRef<Path>>(path: P, columns: &[(&str, &[f32])]) -> std::io::Result<()> {
    debug_assert!(!columns.is_empty());
    debug_assert!(
        columns.windows(2).all(|w| w[0].1.len() == w[1].1.len()),
        "CSV columns must have equal length"
    );

    let file = std::fs::File::create(path)?;
    let mut out = BufWriter::new(file);

    let header: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
    writeln!(out, "{}", header.join(","))?;

    let rows = columns.iter().map(|(_, data)| data.len()).min().unwrap_or(0);
    for row in 0..rows {
        for (i, (_, data)) in columns.iter().enumerate() {
            if i > 0 {
                write!(out, ",")?;
            }
            write!(out, "{:.9}", data[row])?;
        }
        writeln!(out)?;
    }
    out.flush()
}
