use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the master roster.
///
/// Every field is kept as the raw CSV cell; `grade` in particular is never
/// parsed and orders as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    #[serde(rename = "Student ID")]
    pub id: String,
    #[serde(rename = "Student Name")]
    pub name: String,
    #[serde(rename = "Course")]
    pub course_id: String,
    #[serde(rename = "Grade")]
    pub grade: String,
}

impl Student {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        course_id: impl Into<String>,
        grade: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            course_id: course_id.into(),
            grade: grade.into(),
        }
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Student({}, {}, {}, {})",
            self.id, self.name, self.course_id, self.grade
        )
    }
}
