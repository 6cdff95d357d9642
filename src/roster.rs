//! CSV persistence for the student roster.
//!
//! The master file and every course file share the same four columns. Reading
//! matches columns by header name; writing always emits them in [`HEADER`] order.

use csv::{ReaderBuilder, Terminator, WriterBuilder};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::RosterError;
use crate::student::Student;

/// Column order of every file this crate writes.
pub const HEADER: [&str; 4] = ["Student ID", "Student Name", "Course", "Grade"];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Reads every student from the CSV file at `path`, preserving row order.
///
/// A missing file is not an error: it is logged and yields an empty roster.
///
/// # Errors
///
/// Returns [`RosterError::Read`] if the file exists but cannot be read, and
/// [`RosterError::Csv`] if a row is ragged, not UTF-8, or the header lacks
/// one of the [`HEADER`] columns.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_students(path: &Path) -> Result<Vec<Student>, RosterError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Roster file not found, continuing with no students");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(RosterError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes[..]);

    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(content);

    let students = reader
        .deserialize()
        .collect::<Result<Vec<Student>, _>>()
        .map_err(|source| RosterError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(count = students.len(), "Roster loaded");
    Ok(students)
}

/// Writes `students` to `path`, creating or truncating the file.
///
/// Rows end with `\r\n`. The header row is written even when `students` is
/// empty. A failure part way through may leave a truncated file behind.
#[tracing::instrument(skip_all, fields(path = %path.display(), count = students.len()))]
pub fn write_students(students: &[Student], path: &Path) -> Result<(), RosterError> {
    let write_err = |source: csv::Error| RosterError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = WriterBuilder::new()
        .has_headers(false) // header is written by hand so empty files still get one
        .terminator(Terminator::CRLF)
        .from_path(path)
        .map_err(write_err)?;

    writer.write_record(HEADER).map_err(write_err)?;
    for student in students {
        writer.serialize(student).map_err(write_err)?;
    }
    writer.flush().map_err(|e| write_err(e.into()))?;

    debug!("Course file written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    /// Log sink shared between a test and its subscriber.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_load_missing_file_returns_empty_and_warns() {
        let path = temp_path("student_roster_test_does_not_exist.csv");
        let _ = fs::remove_file(&path);

        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();

        let students =
            tracing::subscriber::with_default(subscriber, || load_students(&path)).unwrap();

        assert!(students.is_empty());
        let output = logs.contents();
        assert!(output.contains("WARN"));
        assert!(output.contains("Roster file not found"));
        assert!(output.contains("student_roster_test_does_not_exist.csv"));
    }

    #[test]
    fn test_load_preserves_row_order() {
        let path = temp_path("student_roster_test_load_order.csv");
        fs::write(
            &path,
            "Student ID,Student Name,Course,Grade\n3,Cy,MATH201,A\n1,Ann,CS101,B\n2,Bo,CS101,A\n",
        )
        .unwrap();

        let students = load_students(&path).unwrap();
        let ids: Vec<_> = students.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["3", "1", "2"]);
        assert_eq!(students[1], Student::new("1", "Ann", "CS101", "B"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_strips_byte_order_mark() {
        let path = temp_path("student_roster_test_load_bom.csv");
        let mut content = UTF8_BOM.to_vec();
        content.extend_from_slice(b"Student ID,Student Name,Course,Grade\n7,Dee,CS205,C\n");
        fs::write(&path, content).unwrap();

        let students = load_students(&path).unwrap();
        assert_eq!(students, vec![Student::new("7", "Dee", "CS205", "C")]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_column_order_is_irrelevant() {
        let path = temp_path("student_roster_test_load_columns.csv");
        fs::write(
            &path,
            "Grade,Course,Student Name,Student ID,Advisor\nB,CS101,Ann,1,Prof X\n",
        )
        .unwrap();

        let students = load_students(&path).unwrap();
        assert_eq!(students, vec![Student::new("1", "Ann", "CS101", "B")]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_keeps_empty_cells() {
        let path = temp_path("student_roster_test_load_empty_cells.csv");
        fs::write(&path, "Student ID,Student Name,Course,Grade\n4,,CS101,\n").unwrap();

        let students = load_students(&path).unwrap();
        assert_eq!(students, vec![Student::new("4", "", "CS101", "")]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_column_is_error() {
        let path = temp_path("student_roster_test_load_missing_column.csv");
        fs::write(&path, "Student ID,Student Name,Course\n1,Ann,CS101\n").unwrap();

        let result = load_students(&path);
        assert!(matches!(result, Err(RosterError::Csv { .. })));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_header_names_are_case_sensitive() {
        let path = temp_path("student_roster_test_load_case.csv");
        fs::write(&path, "student id,Student Name,Course,Grade\n1,Ann,CS101,B\n").unwrap();

        assert!(load_students(&path).is_err());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_empty_sequence_writes_header_only() {
        let path = temp_path("student_roster_test_write_empty.csv");
        let _ = fs::remove_file(&path);

        write_students(&[], &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Student ID,Student Name,Course,Grade\r\n");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_has_no_byte_order_mark() {
        let path = temp_path("student_roster_test_write_bom.csv");

        write_students(&[Student::new("1", "Ann", "CS101", "B")], &path).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(!bytes.starts_with(UTF8_BOM));
        assert!(bytes.starts_with(b"Student ID,"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let path = temp_path("student_roster_test_write_overwrite.csv");
        fs::write(&path, "stale content that is longer than the new file\n".repeat(10)).unwrap();

        write_students(&[Student::new("1", "Ann", "CS101", "B")], &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Student ID,Student Name,Course,Grade\r\n1,Ann,CS101,B\r\n");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_ends_rows_with_crlf() {
        let path = temp_path("student_roster_test_write_crlf.csv");

        write_students(
            &[
                Student::new("1", "Ann", "CS101", "B"),
                Student::new("2", "Bo", "CS101", "A"),
            ],
            &path,
        )
        .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("\r\n").count(), 3);
        assert_eq!(content.matches('\n').count(), 3);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_into_missing_directory_is_error() {
        let path = temp_path("student_roster_no_such_dir").join("course1.csv");

        let result = write_students(&[], &path);
        assert!(matches!(result, Err(RosterError::Write { .. })));
    }

    #[test]
    fn test_round_trip_keeps_fields_needing_quotes() {
        let path = temp_path("student_roster_test_round_trip.csv");
        let students = vec![
            Student::new("1", "Doe, Jane", "CS101", "A+"),
            Student::new("2", "Bob \"The Builder\"", "CS 102", " B "),
            Student::new("3", "Zoë", "MATH201", ""),
        ];

        write_students(&students, &path).unwrap();
        let loaded = load_students(&path).unwrap();
        assert_eq!(loaded, students);

        fs::remove_file(&path).unwrap();
    }
}
