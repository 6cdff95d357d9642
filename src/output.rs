//! Output formatting for run reports.
//!
//! Supports pretty-printing, JSON serialization, and a per-course summary.

use anyhow::Result;
use std::io::{self, Write};
use tracing::{debug, info, warn};

use crate::transform::{Outcome, RunReport};

/// Logs the report using Rust's debug pretty-print format.
pub fn print_pretty(report: &RunReport) {
    debug!("{:#?}", report);
}

/// Writes the report to `writer` as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write>(report: &RunReport, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Prints the report as JSON on stdout, apart from the log stream on stderr.
pub fn print_json(report: &RunReport) -> Result<()> {
    write_json(report, io::stdout().lock())
}

/// Logs one line per course file followed by a totals line.
pub fn summarize(report: &RunReport) {
    for output in &report.outputs {
        match &output.outcome {
            Outcome::Written => info!(
                index = output.index,
                course = %output.course_prefix,
                path = %output.path.display(),
                students = output.students,
                "Course"
            ),
            Outcome::Failed { error } => warn!(
                index = output.index,
                course = %output.course_prefix,
                path = %output.path.display(),
                error = %error,
                "Course not written"
            ),
        }
    }

    info!(
        roster_size = report.roster_size,
        courses = report.outputs.len(),
        failed = report.failures(),
        "Run summary"
    );
}
