use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::info;

use super::{Catalog, Course, Instructor};
use crate::error::{QueryError, QueryResult};

/// In-memory catalog loaded from two JSON files.
///
/// Each file holds either an array of records or an object keyed by id:
/// ```json
/// { "COMPSCI161": { "id": "COMPSCI161", "title": "..." } }
/// ```
/// Array files keep their order for the list-all queries.
pub struct JsonCatalog {
    courses: Vec<Course>,
    instructors: Vec<Instructor>,
    course_index: HashMap<String, usize>,
    instructor_index: HashMap<String, usize>,
}

impl JsonCatalog {
    /// Loads courses and instructors from the JSON files at the given paths.
    pub fn load(courses_path: &str, instructors_path: &str) -> Result<Self> {
        let courses: Vec<Course> = load_records(courses_path)?;
        let instructors: Vec<Instructor> = load_records(instructors_path)?;

        info!(
            courses = courses.len(),
            instructors = instructors.len(),
            "Catalog loaded"
        );

        Ok(Self::from_records(courses, instructors))
    }

    pub fn from_records(courses: Vec<Course>, instructors: Vec<Instructor>) -> Self {
        let course_index = courses
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();
        let instructor_index = instructors
            .iter()
            .enumerate()
            .map(|(i, p)| (p.ucinetid.clone(), i))
            .collect();

        Self {
            courses,
            instructors,
            course_index,
            instructor_index,
        }
    }
}

fn load_records<T: DeserializeOwned>(path: &str) -> Result<Vec<T>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read '{path}'"))?;
    parse_records(&content).with_context(|| format!("Failed to parse '{path}'"))
}

fn parse_records<T: DeserializeOwned>(content: &str) -> Result<Vec<T>> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    let records = match value {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
        other => anyhow::bail!("expected a JSON array or object, found {other}"),
    };

    records
        .into_iter()
        .map(|v| serde_json::from_value(v).map_err(Into::into))
        .collect()
}

impl Catalog for JsonCatalog {
    fn get_course(&self, id: &str) -> QueryResult<Course> {
        self.course_index
            .get(id)
            .map(|&i| self.courses[i].clone())
            .ok_or_else(|| QueryError::not_found("course", id))
    }

    fn get_instructor(&self, ucinetid: &str) -> QueryResult<Instructor> {
        self.instructor_index
            .get(ucinetid)
            .map(|&i| self.instructors[i].clone())
            .ok_or_else(|| QueryError::not_found("instructor", ucinetid))
    }

    fn all_courses(&self) -> Vec<Course> {
        self.courses.clone()
    }

    fn all_instructors(&self) -> Vec<Instructor> {
        self.instructors.clone()
    }
}
