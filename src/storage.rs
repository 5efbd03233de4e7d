use crate::stats::Summary;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Prefix text that a spreadsheet would evaluate as a formula.
fn neutralize(cell: &str) -> String {
    if cell.starts_with(['=', '+', '-', '@']) {
        format!("'{cell}")
    } else {
        cell.to_string()
    }
}

/// Save summaries as CSV with header.
pub fn save_csv<P: AsRef<Path>>(rows: &[Summary], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("group", "field", "count", "missing", "min", "max", "mean", "median"))?;
    for s in rows {
        wtr.serialize((
            neutralize(&s.group),
            neutralize(&s.field),
            s.count,
            s.missing,
            s.min,
            s.max,
            s.mean,
            s.median,
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save summaries as pretty JSON array.
pub fn save_json<P: AsRef<Path>>(rows: &[Summary], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(rows)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
