use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use tracing::{debug, info};

use crate::grades::{
    AggregateRow, ExecutorResponse, GpaValue, GradeRow, QueryExecutor, WhereSpecification,
};

/// One line of the grades CSV. `averageGPA` is kept as text so the `"nan"`
/// sentinel survives loading.
#[derive(Debug, Deserialize)]
struct GradeRecord {
    year: String,
    quarter: String,
    department: String,
    number: String,
    section: String,
    code: f64,
    #[serde(rename = "type")]
    section_type: String,
    instructor: String,
    #[serde(rename = "gradeACount")]
    grade_a_count: u32,
    #[serde(rename = "gradeBCount")]
    grade_b_count: u32,
    #[serde(rename = "gradeCCount")]
    grade_c_count: u32,
    #[serde(rename = "gradeDCount")]
    grade_d_count: u32,
    #[serde(rename = "gradeFCount")]
    grade_f_count: u32,
    #[serde(rename = "gradePCount")]
    grade_p_count: u32,
    #[serde(rename = "gradeNPCount")]
    grade_np_count: u32,
    #[serde(rename = "gradeWCount")]
    grade_w_count: u32,
    #[serde(rename = "averageGPA")]
    average_gpa: String,
}

impl From<GradeRecord> for GradeRow {
    fn from(r: GradeRecord) -> Self {
        GradeRow {
            year: r.year,
            quarter: r.quarter,
            department: r.department,
            number: r.number,
            section: r.section,
            code: r.code,
            section_type: r.section_type,
            instructor: r.instructor,
            grade_a_count: r.grade_a_count,
            grade_b_count: r.grade_b_count,
            grade_c_count: r.grade_c_count,
            grade_d_count: r.grade_d_count,
            grade_f_count: r.grade_f_count,
            grade_p_count: r.grade_p_count,
            grade_np_count: r.grade_np_count,
            grade_w_count: r.grade_w_count,
            average_gpa: GpaValue::from_raw(&r.average_gpa),
        }
    }
}

/// Grade store held in memory after reading a CSV export of the grades table.
///
/// `SUM` over zero rows is null, as in SQL. `AVG` leaves out GPAs that are not
/// numbers (the `"nan"` sentinel), so a selection of only sentinels averages
/// to null. SQLite would instead coerce the text to 0.
pub struct CsvGradeStore {
    rows: Vec<GradeRow>,
}

impl CsvGradeStore {
    pub fn load(path: &str) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Failed to open '{path}'"))?;
        let store = Self::from_reader(file).with_context(|| format!("Failed to parse '{path}'"))?;
        info!(path, rows = store.rows.len(), "Grade store loaded");
        Ok(store)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let mut rows = Vec::new();

        for result in rdr.deserialize() {
            let record: GradeRecord = result?;
            rows.push(record.into());
        }

        Ok(Self { rows })
    }

    fn select(&self, spec: &WhereSpecification) -> Vec<GradeRow> {
        self.rows
            .iter()
            .filter(|row| spec.matches(row))
            .cloned()
            .collect()
    }
}

fn sum_by(rows: &[GradeRow], count: impl Fn(&GradeRow) -> u32) -> Option<u64> {
    if rows.is_empty() {
        return None;
    }
    Some(rows.iter().map(|r| u64::from(count(r))).sum())
}

fn aggregate_rows(rows: &[GradeRow]) -> AggregateRow {
    let gpas: Vec<f64> = rows.iter().filter_map(|r| r.average_gpa.as_number()).collect();
    let average_gpa = if gpas.is_empty() {
        None
    } else {
        Some(gpas.iter().sum::<f64>() / gpas.len() as f64)
    };

    AggregateRow {
        sum_grade_a_count: sum_by(rows, |r| r.grade_a_count),
        sum_grade_b_count: sum_by(rows, |r| r.grade_b_count),
        sum_grade_c_count: sum_by(rows, |r| r.grade_c_count),
        sum_grade_d_count: sum_by(rows, |r| r.grade_d_count),
        sum_grade_f_count: sum_by(rows, |r| r.grade_f_count),
        sum_grade_p_count: sum_by(rows, |r| r.grade_p_count),
        sum_grade_np_count: sum_by(rows, |r| r.grade_np_count),
        sum_grade_w_count: sum_by(rows, |r| r.grade_w_count),
        average_gpa,
    }
}

#[async_trait]
impl QueryExecutor for CsvGradeStore {
    #[tracing::instrument(skip(self, spec), fields(predicates = spec.predicates.len()))]
    async fn query(
        &self,
        spec: &WhereSpecification,
        aggregate_only: bool,
    ) -> Result<ExecutorResponse> {
        let matched = self.select(spec);
        debug!(matched = matched.len(), "Grade rows selected");

        if aggregate_only {
            Ok(ExecutorResponse::Aggregate(Some(aggregate_rows(&matched))))
        } else {
            Ok(ExecutorResponse::Rows(matched))
        }
    }
}
