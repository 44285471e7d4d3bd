//! Catalog record types.

use serde::{Deserialize, Serialize};

/// A course as stored in the catalog. `id` is the department code with
/// whitespace removed followed by the course number, e.g. `COMPSCI161`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Course {
    pub id: String,
    pub department: String,
    pub number: String,
    pub school: String,
    pub title: String,
    pub course_level: String,
    pub department_name: String,
    pub units: Vec<f64>,
    pub description: String,
    pub professor_history: Vec<String>,
    pub prerequisite_text: String,
    pub prerequisite_list: Vec<String>,
    pub prerequisite_for: Vec<String>,
    pub repeatability: String,
    pub concurrent: String,
    pub same_as: String,
    pub restriction: String,
    pub overlap: String,
    pub corequisite: String,
    pub ge_list: Vec<String>,
    pub ge_text: String,
    pub terms: Vec<String>,
}

/// An instructor as stored in the catalog. `course_history` holds course ids
/// that may contain spaces (`"COMPSCI 161"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Instructor {
    pub name: String,
    pub ucinetid: String,
    pub phone: String,
    pub title: String,
    pub department: String,
    pub schools: Vec<String>,
    pub related_departments: Vec<String>,
    pub course_history: Vec<String>,
}

/// The public instructor shape: catalog fields plus `course_history`
/// resolved to courses. Ids the catalog does not know resolve to `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstructorProfile {
    pub name: String,
    pub ucinetid: String,
    pub phone: String,
    pub title: String,
    pub department: String,
    pub schools: Vec<String>,
    pub related_departments: Vec<String>,
    pub course_history: Vec<Option<Course>>,
}

/// Removes every whitespace character, turning `"COM SCI"` into `"COMSCI"`.
pub fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}
