//! Schedule feed records and their public shape.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::catalog::{Catalog, Course};
use crate::grades::aggregate::format_code;

/// Section identity shared by schedule offerings and grade distributions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionInfo {
    /// Always text on output; the feed may send it as a number.
    #[serde(deserialize_with = "code_text")]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub number: String,
    #[serde(rename = "type")]
    pub section_type: String,
}

/// A numeric feed field, which the feed sometimes sends as text (`"n/a"`, `"4"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeedNumber {
    Number(f64),
    Text(String),
}

impl FeedNumber {
    pub fn value(&self) -> Option<f64> {
        match self {
            FeedNumber::Number(n) => Some(*n),
            FeedNumber::Text(s) => s.trim().parse().ok(),
        }
    }
}

fn code_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match FeedNumber::deserialize(deserializer)? {
        FeedNumber::Number(n) => format_code(n),
        FeedNumber::Text(s) => s,
    })
}

fn number(field: &Option<FeedNumber>) -> Option<f64> {
    field.as_ref().and_then(FeedNumber::value)
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawMeeting {
    pub bldg: Option<String>,
    pub days: Option<String>,
    pub time: Option<String>,
}

/// One offering as the schedule feed returns it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawOffering {
    pub year: Option<String>,
    pub quarter: Option<String>,
    pub final_exam: Option<String>,
    pub instructors: Vec<String>,
    pub max_capacity: Option<FeedNumber>,
    pub meetings: Vec<RawMeeting>,
    pub num_section_enrolled: Option<FeedNumber>,
    pub num_total_enrolled: Option<FeedNumber>,
    pub num_new_only_reserved: Option<FeedNumber>,
    pub num_on_waitlist: Option<FeedNumber>,
    pub num_requested: Option<FeedNumber>,
    pub restrictions: Option<String>,
    pub section: Option<SectionInfo>,
    pub status: Option<String>,
    pub units: Option<FeedNumber>,
    /// Catalog course id, e.g. `COMPSCI161`.
    pub course: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meeting {
    pub building: Option<String>,
    pub days: Option<String>,
    pub time: Option<String>,
}

/// One scheduled section of a course in a term, as returned by `schedule`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Offering {
    pub year: Option<String>,
    pub quarter: Option<String>,
    pub final_exam: Option<String>,
    pub instructors: Vec<String>,
    pub max_capacity: Option<f64>,
    pub meetings: Vec<Meeting>,
    pub num_section_enrolled: Option<f64>,
    pub num_total_enrolled: Option<f64>,
    pub num_new_only_reserved: Option<f64>,
    pub num_on_waitlist: Option<f64>,
    pub num_requested: Option<f64>,
    pub restrictions: Option<String>,
    pub section: Option<SectionInfo>,
    pub status: Option<String>,
    pub units: Option<f64>,
    pub course: Option<Course>,
}

/// Reshapes feed records into [`Offering`]s, keeping feed order.
///
/// The offering's course id is resolved through the catalog; unknown ids
/// leave `course` empty.
pub fn assemble(raw: Vec<RawOffering>, catalog: &dyn Catalog) -> Vec<Offering> {
    raw.into_iter()
        .map(|r| {
            let course = r.course.as_deref().and_then(|id| match catalog.get_course(id) {
                Ok(course) => Some(course),
                Err(e) => {
                    debug!(course = id, error = %e, "Offering course not in catalog");
                    None
                }
            });

            Offering {
                max_capacity: number(&r.max_capacity),
                num_section_enrolled: number(&r.num_section_enrolled),
                num_total_enrolled: number(&r.num_total_enrolled),
                num_new_only_reserved: number(&r.num_new_only_reserved),
                num_on_waitlist: number(&r.num_on_waitlist),
                num_requested: number(&r.num_requested),
                units: number(&r.units),
                meetings: r
                    .meetings
                    .into_iter()
                    .map(|m| Meeting {
                        building: m.bldg,
                        days: m.days,
                        time: m.time,
                    })
                    .collect(),
                year: r.year,
                quarter: r.quarter,
                final_exam: r.final_exam,
                instructors: r.instructors,
                restrictions: r.restrictions,
                section: r.section,
                status: r.status,
                course,
            }
        })
        .collect()
}
