use tracing::{debug, warn};

use super::types::{
    AggregateRow, AggregateSummary, GPA_SENTINEL, GpaValue, GradeDistribution,
    GradeDistributionResult, GradeRow, OfferingIdentity,
};
use crate::catalog::strip_whitespace;
use crate::schedule::SectionInfo;

/// Builds the public grade response from raw rows and the backend aggregate.
///
/// The summary is copied from `aggregate_row` as-is; the backend is the
/// source of truth for sums. A missing aggregate row yields an all-null
/// summary. Distributions keep the order of `rows`.
pub fn aggregate(rows: &[GradeRow], aggregate_row: Option<&AggregateRow>) -> GradeDistributionResult {
    let aggregate = aggregate_row.map(summarize).unwrap_or_default();

    let grade_distributions: Vec<GradeDistribution> = rows.iter().map(distribution).collect();

    debug!(
        distributions = grade_distributions.len(),
        has_aggregate = aggregate_row.is_some(),
        "Aggregated grade rows"
    );

    GradeDistributionResult {
        aggregate,
        grade_distributions,
    }
}

fn summarize(row: &AggregateRow) -> AggregateSummary {
    AggregateSummary {
        sum_grade_a_count: row.sum_grade_a_count,
        sum_grade_b_count: row.sum_grade_b_count,
        sum_grade_c_count: row.sum_grade_c_count,
        sum_grade_d_count: row.sum_grade_d_count,
        sum_grade_f_count: row.sum_grade_f_count,
        sum_grade_p_count: row.sum_grade_p_count,
        sum_grade_np_count: row.sum_grade_np_count,
        sum_grade_w_count: row.sum_grade_w_count,
        average_gpa: row.average_gpa,
    }
}

fn distribution(row: &GradeRow) -> GradeDistribution {
    GradeDistribution {
        grade_a_count: row.grade_a_count,
        grade_b_count: row.grade_b_count,
        grade_c_count: row.grade_c_count,
        grade_d_count: row.grade_d_count,
        grade_f_count: row.grade_f_count,
        grade_p_count: row.grade_p_count,
        grade_np_count: row.grade_np_count,
        grade_w_count: row.grade_w_count,
        average_gpa: normalize_gpa(&row.average_gpa, row.code),
        course_offering: OfferingIdentity {
            year: row.year.clone(),
            quarter: row.quarter.clone(),
            section: SectionInfo {
                code: format_code(row.code),
                comment: None,
                number: row.section.clone(),
                section_type: row.section_type.clone(),
            },
            instructors: vec![row.instructor.clone()],
            course: format!("{}{}", strip_whitespace(&row.department), row.number),
        },
    }
}

/// `"nan"` means no GPA-bearing grades were given and becomes `None`.
fn normalize_gpa(value: &GpaValue, code: f64) -> Option<f64> {
    let gpa = value.as_number();
    if gpa.is_none() {
        if let GpaValue::Text(raw) = value {
            if raw != GPA_SENTINEL {
                warn!(code, raw = %raw, "Unrecognized averageGPA value, reporting null");
            }
        }
    }
    gpa
}

/// Section codes are stored as floats; whole values render without a fraction.
pub fn format_code(code: f64) -> String {
    if code.fract() == 0.0 && code.is_finite() {
        format!("{code:.0}")
    } else {
        code.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(department: &str, number: &str, gpa: GpaValue) -> GradeRow {
        GradeRow {
            year: "2019-20".into(),
            quarter: "Fall".into(),
            department: department.into(),
            number: number.into(),
            section: "A".into(),
            code: 35500.0,
            section_type: "Lec".into(),
            instructor: "Smith".into(),
            grade_a_count: 5,
            grade_b_count: 4,
            grade_c_count: 3,
            grade_d_count: 2,
            grade_f_count: 1,
            grade_p_count: 0,
            grade_np_count: 0,
            grade_w_count: 1,
            average_gpa: gpa,
        }
    }

    fn aggregate_row() -> AggregateRow {
        AggregateRow {
            sum_grade_a_count: Some(5),
            sum_grade_b_count: Some(4),
            sum_grade_c_count: Some(3),
            sum_grade_d_count: Some(2),
            sum_grade_f_count: Some(1),
            sum_grade_p_count: Some(0),
            sum_grade_np_count: Some(0),
            sum_grade_w_count: Some(1),
            average_gpa: Some(2.93),
        }
    }

    #[test]
    fn test_nan_gpa_course_id_and_instructors() {
        let rows = [row("COM SCI", "161", GpaValue::Text("nan".into()))];

        let result = aggregate(&rows, Some(&aggregate_row()));
        let first = &result.grade_distributions[0];

        assert_eq!(first.average_gpa, None);
        assert_eq!(first.course_offering.course, "COMSCI161");
        assert_eq!(first.course_offering.instructors, vec!["Smith".to_string()]);
        assert_eq!(first.grade_a_count, 5);
        assert_eq!(first.grade_w_count, 1);
    }

    #[test]
    fn test_numeric_gpa_passes_through() {
        let rows = [row("MATH", "2A", GpaValue::Number(3.14))];
        let result = aggregate(&rows, None);
        assert_eq!(result.grade_distributions[0].average_gpa, Some(3.14));
    }

    #[test]
    fn test_summary_copied_verbatim() {
        let result = aggregate(&[], Some(&aggregate_row()));

        assert_eq!(result.aggregate.sum_grade_a_count, Some(5));
        assert_eq!(result.aggregate.sum_grade_f_count, Some(1));
        assert_eq!(result.aggregate.sum_grade_w_count, Some(1));
        assert_eq!(result.aggregate.average_gpa, Some(2.93));
        assert!(result.grade_distributions.is_empty());
    }

    #[test]
    fn test_missing_aggregate_row_is_all_null() {
        let result = aggregate(&[], None);
        assert_eq!(result.aggregate, AggregateSummary::default());
        assert_eq!(result.aggregate.average_gpa, None);
    }

    #[test]
    fn test_section_identity() {
        let result = aggregate(&[row("I&C SCI", "32A", GpaValue::Number(3.0))], None);
        let offering = &result.grade_distributions[0].course_offering;

        assert_eq!(offering.year, "2019-20");
        assert_eq!(offering.quarter, "Fall");
        assert_eq!(offering.section.code, "35500");
        assert_eq!(offering.section.number, "A");
        assert_eq!(offering.section.section_type, "Lec");
        assert_eq!(offering.course, "I&CSCI32A");
    }

    #[test]
    fn test_order_preserved() {
        let rows = [
            row("MATH", "2B", GpaValue::Number(2.0)),
            row("COM SCI", "161", GpaValue::Number(3.0)),
            row("WRITING", "39C", GpaValue::Number(3.5)),
        ];

        let result = aggregate(&rows, None);
        let courses: Vec<_> = result
            .grade_distributions
            .iter()
            .map(|d| d.course_offering.course.as_str())
            .collect();

        assert_eq!(courses, ["MATH2B", "COMSCI161", "WRITING39C"]);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let rows = [
            row("COM SCI", "161", GpaValue::Text("nan".into())),
            row("MATH", "2A", GpaValue::Number(3.2)),
        ];
        let agg = aggregate_row();

        let first = serde_json::to_string(&aggregate(&rows, Some(&agg))).unwrap();
        let second = serde_json::to_string(&aggregate(&rows, Some(&agg))).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_serialized_shape() {
        let result = aggregate(
            &[row("COM SCI", "161", GpaValue::Text("nan".into()))],
            Some(&aggregate_row()),
        );
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["aggregate"]["sum_grade_np_count"], 0);
        assert!(json["grade_distributions"][0]["average_gpa"].is_null());
        assert_eq!(
            json["grade_distributions"][0]["course_offering"]["section"],
            serde_json::json!({ "code": "35500", "number": "A", "type": "Lec" })
        );
    }

    #[test]
    fn test_format_code() {
        assert_eq!(format_code(36531.0), "36531");
        assert_eq!(format_code(1.5), "1.5");
    }
}
