//! Output formatting and persistence for query results.
//!
//! Supports pretty JSON on any writer and CSV export of grade distributions.

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use crate::grades::GradeDistributionResult;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Writes `value` as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write>(mut writer: W, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// One grade distribution flattened into a CSV row.
#[derive(Debug, Serialize)]
struct DistributionRecord<'a> {
    course: &'a str,
    year: &'a str,
    quarter: &'a str,
    code: &'a str,
    section: &'a str,
    #[serde(rename = "type")]
    section_type: &'a str,
    instructor: &'a str,
    grade_a_count: u32,
    grade_b_count: u32,
    grade_c_count: u32,
    grade_d_count: u32,
    grade_f_count: u32,
    grade_p_count: u32,
    grade_np_count: u32,
    grade_w_count: u32,
    average_gpa: Option<f64>,
}

/// Appends every distribution in `result` as a row of the CSV at `path`.
///
/// Creates the file with headers if it does not already exist.
pub fn append_distributions(path: &str, result: &GradeDistributionResult) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = result.grade_distributions.len(), "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for d in &result.grade_distributions {
        let offering = &d.course_offering;
        writer.serialize(DistributionRecord {
            course: &offering.course,
            year: &offering.year,
            quarter: &offering.quarter,
            code: &offering.section.code,
            section: &offering.section.number,
            section_type: &offering.section.section_type,
            instructor: offering.instructors.first().map(String::as_str).unwrap_or(""),
            grade_a_count: d.grade_a_count,
            grade_b_count: d.grade_b_count,
            grade_c_count: d.grade_c_count,
            grade_d_count: d.grade_d_count,
            grade_f_count: d.grade_f_count,
            grade_p_count: d.grade_p_count,
            grade_np_count: d.grade_np_count,
            grade_w_count: d.grade_w_count,
            average_gpa: d.average_gpa,
        })?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grades::{GpaValue, GradeRow, aggregate};
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn result() -> GradeDistributionResult {
        let row = GradeRow {
            year: "2019-20".into(),
            quarter: "Fall".into(),
            department: "COM SCI".into(),
            number: "161".into(),
            section: "A".into(),
            code: 35500.0,
            section_type: "Lec".into(),
            instructor: "SHINDLER, M.".into(),
            grade_a_count: 1,
            grade_b_count: 2,
            grade_c_count: 3,
            grade_d_count: 0,
            grade_f_count: 0,
            grade_p_count: 0,
            grade_np_count: 0,
            grade_w_count: 0,
            average_gpa: GpaValue::Text("nan".into()),
        };
        aggregate(&[row.clone(), row], None)
    }

    #[test]
    fn test_write_json_pretty() {
        let mut buf = Vec::new();
        write_json(&mut buf, &serde_json::json!({ "a": 1 })).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "{\n  \"a\": 1\n}\n");
    }

    #[test]
    fn test_append_distributions_writes_header_once() {
        let path = temp_path("course_query_test_header.csv");
        let _ = fs::remove_file(&path);

        append_distributions(&path, &result()).unwrap();
        append_distributions(&path, &result()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        // 1 header + 2 rows per call
        assert_eq!(lines.len(), 5);
        assert_eq!(content.lines().filter(|l| l.starts_with("course,")).count(), 1);
        assert!(lines[1].starts_with("COMSCI161,2019-20,Fall,35500,A,Lec,\"SHINDLER, M.\",1,2,3"));

        fs::remove_file(&path).unwrap();
    }
}
