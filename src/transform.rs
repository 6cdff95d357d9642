//! Per-course selection and the end-to-end roster run.

use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, error, info};

use crate::config::{RosterConfig, WriteFailurePolicy};
use crate::error::RosterError;
use crate::roster::{load_students, write_students};
use crate::student::Student;

/// Returns the students whose course id starts with `course_prefix`, best grade first.
///
/// Grades compare as raw strings, so `"B"` ranks above `"A+"` and `"9"` above
/// `"10"`. Students with equal grades keep their input order.
pub fn filter_and_sort(students: &[Student], course_prefix: &str) -> Vec<Student> {
    let mut selected: Vec<Student> = students
        .iter()
        .filter(|s| s.course_id.starts_with(course_prefix))
        .cloned()
        .collect();

    // sort_by is stable
    selected.sort_by(|a, b| b.grade.cmp(&a.grade));
    selected
}

/// Result of writing a single course file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Written,
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseOutput {
    /// 1-based position of the prefix in the course list.
    pub index: usize,
    pub course_prefix: String,
    pub path: PathBuf,
    pub students: usize,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Everything one call to [`run`] produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub roster_size: usize,
    pub outputs: Vec<CourseOutput>,
}

impl RunReport {
    /// Number of course files that could not be written.
    pub fn failures(&self) -> usize {
        self.outputs
            .iter()
            .filter(|o| matches!(o.outcome, Outcome::Failed { .. }))
            .count()
    }
}

/// Loads the roster once and writes one sorted file per course prefix.
///
/// Every prefix gets its own file, header-only when no student matches. Write
/// failures are handled according to `config.on_write_error`.
///
/// # Errors
///
/// Returns an error if `config` fails validation, if the roster exists but
/// cannot be parsed, or if a write fails under [`WriteFailurePolicy::Abort`].
#[tracing::instrument(skip_all, fields(master = %config.master_path.display(), courses = course_prefixes.len()))]
pub fn run<S: AsRef<str>>(
    config: &RosterConfig,
    course_prefixes: &[S],
) -> Result<RunReport, RosterError> {
    config.validate()?;

    let roster = load_students(&config.master_path)?;
    info!(roster_size = roster.len(), "Roster ready");

    let mut report = RunReport {
        roster_size: roster.len(),
        outputs: Vec::with_capacity(course_prefixes.len()),
    };

    for (i, prefix) in course_prefixes.iter().enumerate() {
        let index = i + 1;
        let prefix = prefix.as_ref();
        let path = config.output_path(index);
        let selected = filter_and_sort(&roster, prefix);

        let outcome = match write_students(&selected, &path) {
            Ok(()) => {
                debug!(index, prefix, path = %path.display(), students = selected.len(), "Course file written");
                Outcome::Written
            }
            Err(e) => match config.on_write_error {
                WriteFailurePolicy::Abort => return Err(e),
                WriteFailurePolicy::Continue => {
                    error!(index, prefix, error = %e, "Failed to write course file");
                    Outcome::Failed {
                        error: e.to_string(),
                    }
                }
            },
        };

        report.outputs.push(CourseOutput {
            index,
            course_prefix: prefix.to_string(),
            path,
            students: selected.len(),
            outcome,
        });
    }

    Ok(report)
}
