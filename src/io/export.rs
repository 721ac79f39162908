//! CSV export for vessel loading logs.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::design::{DesignResult, SubstationCosts};
use crate::logistics::LoadReport;

/// Column header for the loading log.
const HEADER: &str = "agent,action,target,duration_hr,location";

/// Exports the loading logs of all `reports` to a CSV file at `path`.
///
/// Rows follow report order, then event order within each report.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(reports: &[LoadReport], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(reports, buf)
}

/// Writes the loading logs as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(reports: &[LoadReport], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for e in reports.iter().flat_map(|r| &r.events) {
        wtr.write_record([
            e.agent.clone(),
            e.action.to_string(),
            e.target.as_ref().map(ToString::to_string).unwrap_or_default(),
            format!("{:.2}", e.duration_hr),
            e.location.clone(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct DesignExport<'a> {
    design_result: &'a DesignResult,
    costs: &'a SubstationCosts,
    total_phase_time: f64,
}

/// Exports the substation design result and cost breakdown as pretty JSON.
///
/// # Errors
///
/// Returns an `io::Error` if file creation, serialization, or writing fails.
pub fn export_design_json(
    result: &DesignResult,
    costs: &SubstationCosts,
    total_phase_time: f64,
    path: &Path,
) -> io::Result<()> {
    let file = File::create(path)?;
    write_design_json(result, costs, total_phase_time, io::BufWriter::new(file))
}

/// Writes the design export as pretty JSON to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if serialization or writing fails.
pub fn write_design_json(
    result: &DesignResult,
    costs: &SubstationCosts,
    total_phase_time: f64,
    mut writer: impl Write,
) -> io::Result<()> {
    let export = DesignExport {
        design_result: result,
        costs,
        total_phase_time,
    };
    serde_json::to_writer_pretty(&mut writer, &export)?;
    writeln!(writer)?;
    writer.flush()
}
