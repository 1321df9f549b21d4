//! Export CLI command

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{TrackerError, TrackerResult};
use crate::export::{export_transactions_csv, DEFAULT_EXPORT_FILE_NAME};
use crate::sync::Tracker;

/// Handle `export`
///
/// Writes to `budget-tracker-export.csv` in the current directory unless an
/// output path is given; `-` writes to stdout.
pub fn handle_export_command(tracker: &Tracker, output: Option<PathBuf>) -> TrackerResult<()> {
    let output = output.unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE_NAME));

    if output == Path::new("-") {
        let mut handle = io::stdout().lock();
        export_transactions_csv(tracker.transactions(), &mut handle)?;
        writeln!(handle)?;
        return Ok(());
    }

    let file = File::create(&output).map_err(|e| {
        TrackerError::Export(format!("Failed to create {}: {}", output.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    export_transactions_csv(tracker.transactions(), &mut writer)?;

    info!("Exported {} transactions to {}", tracker.transactions().len(), output.display());
    println!(
        "Exported {} transactions to {}",
        tracker.transactions().len(),
        output.display()
    );
    Ok(())
}
