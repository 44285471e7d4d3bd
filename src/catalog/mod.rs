//! Course and instructor catalog.
//!
//! [`Catalog`] is the lookup contract the query surface depends on.
//! [`JsonCatalog`] implements it over JSON files loaded once at startup.

mod json;
mod types;

pub use json::JsonCatalog;
pub use types::{Course, Instructor, InstructorProfile, strip_whitespace};

use crate::error::QueryResult;

/// Synchronous, side-effect-free catalog lookups.
pub trait Catalog: Send + Sync {
    /// Fails with [`QueryError::NotFound`](crate::error::QueryError::NotFound) on a miss.
    fn get_course(&self, id: &str) -> QueryResult<Course>;

    /// Fails with [`QueryError::NotFound`](crate::error::QueryError::NotFound) on a miss.
    fn get_instructor(&self, ucinetid: &str) -> QueryResult<Instructor>;

    fn all_courses(&self) -> Vec<Course>;

    fn all_instructors(&self) -> Vec<Instructor>;
}

/// Expands an instructor's `course_history` ids into catalog courses.
///
/// History ids are stored with spaces (`"COMPSCI 161"`), catalog ids without.
pub fn resolve_profile(catalog: &dyn Catalog, instructor: Instructor) -> InstructorProfile {
    let course_history = instructor
        .course_history
        .iter()
        .map(|id| catalog.get_course(&strip_whitespace(id)).ok())
        .collect();

    InstructorProfile {
        name: instructor.name,
        ucinetid: instructor.ucinetid,
        phone: instructor.phone,
        title: instructor.title,
        department: instructor.department,
        schools: instructor.schools,
        related_departments: instructor.related_departments,
        course_history,
    }
}
