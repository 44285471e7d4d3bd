//! Translation of user-facing schedule filters into the feed's vocabulary.

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use super::args::ScheduleQueryArgs;

pub type Accessor = fn(&ScheduleQueryArgs) -> Option<&str>;

/// User field name, feed field name, and how to read the user value.
///
/// Order here is the order parameters are sent to the feed.
pub static FIELD_MAP: &[(&str, &str, Accessor)] = &[
    ("ge", "ge", |a| a.ge.as_deref()),
    ("department", "department", |a| a.department.as_deref()),
    ("course_number", "courseNumber", |a| a.course_number.as_deref()),
    ("division", "division", |a| a.division.as_deref()),
    ("section_codes", "sectionCodes", |a| a.section_codes.as_deref()),
    ("instructor", "instructorName", |a| a.instructor.as_deref()),
    ("course_title", "courseTitle", |a| a.course_title.as_deref()),
    ("section_type", "sectionType", |a| a.section_type.as_deref()),
    ("units", "units", |a| a.units.as_deref()),
    ("days", "days", |a| a.days.as_deref()),
    ("start_time", "startTime", |a| a.start_time.as_deref()),
    ("end_time", "endTime", |a| a.end_time.as_deref()),
    ("max_capacity", "maxCapacity", |a| a.max_capacity.as_deref()),
    ("full_courses", "fullCourses", |a| a.full_courses.as_deref()),
    ("cancelled_courses", "cancelledCourses", |a| a.cancelled_courses.as_deref()),
    ("building", "building", |a| a.building.as_deref()),
    ("room", "room", |a| a.room.as_deref()),
];

/// A schedule request expressed in the feed's field names.
///
/// Only fields the client supplied are present, so the feed applies its own
/// defaults for everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendScheduleQuery {
    pub term: String,
    params: Vec<(&'static str, String)>,
}

impl BackendScheduleQuery {
    /// Looks up a feed-side parameter by its feed name. `"term"` is included.
    pub fn get(&self, name: &str) -> Option<&str> {
        if name == "term" {
            return Some(&self.term);
        }
        self.params
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Parameters other than `term`, in mapping-table order.
    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    /// All parameters as URL query pairs, `term` first.
    pub fn query_pairs(&self) -> Vec<(&str, &str)> {
        std::iter::once(("term", self.term.as_str()))
            .chain(self.params.iter().map(|(k, v)| (*k, v.as_str())))
            .collect()
    }
}

impl Serialize for BackendScheduleQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.params.len() + 1))?;
        map.serialize_entry("term", &self.term)?;
        for (key, value) in &self.params {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Years arrive as floats; whole values render without a fraction.
fn format_year(year: f64) -> String {
    if year.fract() == 0.0 && year.is_finite() {
        format!("{year:.0}")
    } else {
        year.to_string()
    }
}

/// Projects validated arguments onto the feed vocabulary.
///
/// `year` and `quarter` collapse into `term` (`"<year> <quarter>"`); every
/// other present field is renamed through [`FIELD_MAP`] with its value
/// untouched.
pub fn normalize(args: &ScheduleQueryArgs) -> BackendScheduleQuery {
    let year = args.year.map(format_year).unwrap_or_default();
    let quarter = args.quarter.map(|q| q.as_str()).unwrap_or_default();
    let term = format!("{year} {quarter}");

    let params: Vec<(&'static str, String)> = FIELD_MAP
        .iter()
        .filter_map(|(_, backend, read)| read(args).map(|v| (*backend, v.to_string())))
        .collect();

    debug!(term = %term, params = params.len(), "Normalized schedule query");

    BackendScheduleQuery { term, params }
}
