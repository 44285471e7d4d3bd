//! Data types of the grade-distribution pipeline.
//!
//! [`GradeRow`] and [`AggregateRow`] use the storage layer's field names;
//! [`GradeDistributionResult`] and its children are the public shape.

use serde::{Deserialize, Serialize};

use crate::schedule::SectionInfo;

/// Sentinel the storage layer writes when a section has no GPA-bearing grades.
pub const GPA_SENTINEL: &str = "nan";

/// Raw `averageGPA` column: a number, or a string such as [`GPA_SENTINEL`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GpaValue {
    Number(f64),
    Text(String),
}

impl GpaValue {
    /// Builds a value from raw column text; anything that is not a finite
    /// number is kept as text.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => GpaValue::Number(n),
            _ => GpaValue::Text(raw.to_string()),
        }
    }

    /// The numeric value, if there is a usable one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            GpaValue::Number(n) if !n.is_nan() => Some(*n),
            GpaValue::Number(_) => None,
            GpaValue::Text(s) if s == GPA_SENTINEL => None,
            GpaValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| !n.is_nan()),
        }
    }
}

/// One per-offering grade record as returned by the query executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRow {
    pub year: String,
    pub quarter: String,
    pub department: String,
    pub number: String,
    pub section: String,
    pub code: f64,
    #[serde(rename = "type")]
    pub section_type: String,
    pub instructor: String,
    #[serde(rename = "gradeACount")]
    pub grade_a_count: u32,
    #[serde(rename = "gradeBCount")]
    pub grade_b_count: u32,
    #[serde(rename = "gradeCCount")]
    pub grade_c_count: u32,
    #[serde(rename = "gradeDCount")]
    pub grade_d_count: u32,
    #[serde(rename = "gradeFCount")]
    pub grade_f_count: u32,
    #[serde(rename = "gradePCount")]
    pub grade_p_count: u32,
    #[serde(rename = "gradeNPCount")]
    pub grade_np_count: u32,
    #[serde(rename = "gradeWCount")]
    pub grade_w_count: u32,
    #[serde(rename = "averageGPA")]
    pub average_gpa: GpaValue,
}

/// Backend-computed sums and average over every row matching a filter.
/// Fields are null when nothing matched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    #[serde(rename = "SUM(gradeACount)")]
    pub sum_grade_a_count: Option<u64>,
    #[serde(rename = "SUM(gradeBCount)")]
    pub sum_grade_b_count: Option<u64>,
    #[serde(rename = "SUM(gradeCCount)")]
    pub sum_grade_c_count: Option<u64>,
    #[serde(rename = "SUM(gradeDCount)")]
    pub sum_grade_d_count: Option<u64>,
    #[serde(rename = "SUM(gradeFCount)")]
    pub sum_grade_f_count: Option<u64>,
    #[serde(rename = "SUM(gradePCount)")]
    pub sum_grade_p_count: Option<u64>,
    #[serde(rename = "SUM(gradeNPCount)")]
    pub sum_grade_np_count: Option<u64>,
    #[serde(rename = "SUM(gradeWCount)")]
    pub sum_grade_w_count: Option<u64>,
    #[serde(rename = "AVG(averageGPA)")]
    pub average_gpa: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateSummary {
    pub sum_grade_a_count: Option<u64>,
    pub sum_grade_b_count: Option<u64>,
    pub sum_grade_c_count: Option<u64>,
    pub sum_grade_d_count: Option<u64>,
    pub sum_grade_f_count: Option<u64>,
    pub sum_grade_p_count: Option<u64>,
    pub sum_grade_np_count: Option<u64>,
    pub sum_grade_w_count: Option<u64>,
    pub average_gpa: Option<f64>,
}

/// Identity of the offering a grade distribution belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfferingIdentity {
    pub year: String,
    pub quarter: String,
    pub section: SectionInfo,
    /// Always one element: grade rows store a single instructor.
    pub instructors: Vec<String>,
    /// Catalog course id, e.g. `COMPSCI161`.
    pub course: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeDistribution {
    pub grade_a_count: u32,
    pub grade_b_count: u32,
    pub grade_c_count: u32,
    pub grade_d_count: u32,
    pub grade_f_count: u32,
    pub grade_p_count: u32,
    pub grade_np_count: u32,
    pub grade_w_count: u32,
    pub average_gpa: Option<f64>,
    pub course_offering: OfferingIdentity,
}

/// Response of the `grades` query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeDistributionResult {
    pub aggregate: AggregateSummary,
    pub grade_distributions: Vec<GradeDistribution>,
}
