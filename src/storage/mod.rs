//! Persistence layer.
//!
//! Writes a finished run as a flat CSV table: one row per round with the
//! columns `round,balance,choices`. Nothing else is persisted.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::types::{SimError, SimulationRun};

/// Default CSV output path.
pub const DEFAULT_CSV_FILE: &str = "simulation_data.csv";

/// Header row of the export.
pub const CSV_HEADER: &str = "round,balance,choices";

/// Write the run as CSV to any writer. Returns the number of data rows.
pub fn write_csv<W: Write>(run: &SimulationRun, mut out: W) -> io::Result<usize> {
    writeln!(out, "{CSV_HEADER}")?;
    for r in &run.rounds {
        writeln!(out, "{},{},{}", r.round, r.balance.normalize(), r.choice)?;
    }
    out.flush()?;
    Ok(run.rounds.len())
}

/// Write the run as CSV to `path` (default `simulation_data.csv`),
/// replacing any existing file.
pub fn export_csv(run: &SimulationRun, path: Option<&str>) -> Result<usize, SimError> {
    let path = path.unwrap_or(DEFAULT_CSV_FILE);
    let io_err = |source: io::Error| SimError::Io {
        path: path.to_string(),
        source,
    };

    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let file = File::create(path).map_err(io_err)?;
    let rows = write_csv(run, BufWriter::new(file)).map_err(io_err)?;

    info!(path, rows, run_id = %run.id, "Simulation data exported");
    Ok(rows)
}

/// Delete an exported file (for testing or reset).
pub fn delete_export(path: &str) -> Result<(), SimError> {
    if Path::new(path).exists() {
        std::fs::remove_file(path).map_err(|source| SimError::Io {
            path: path.to_string(),
            source,
        })?;
        debug!(path, "Export deleted");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
