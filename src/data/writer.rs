use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::Measurement;

/// Append one measurement row to `path`, creating the file on first use.
///
/// Rows accumulate across runs; a temperature sweep is a shell loop over
/// the simulator with a shared output file.
pub fn append_measurement(path: &Path, measurement: &Measurement) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening {} for append", path.display()))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer
        .serialize(measurement)
        .context("writing measurement row")?;
    writer.flush().context("flushing measurement row")?;
    Ok(())
}
