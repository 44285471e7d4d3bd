//! Grade filters and the predicate description handed to the query executor.

use std::fmt;

use clap::Args;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::GradeRow;

/// Optional filters of the `grades` query. An empty filter selects every row.
#[derive(Debug, Clone, Default, PartialEq, Args, Serialize, Deserialize)]
pub struct GradeFilter {
    /// Academic year, e.g. 2019-20.
    #[arg(long)]
    pub year: Option<String>,
    #[arg(long)]
    pub quarter: Option<String>,
    /// Instructor as stored in the grade data, e.g. "SHINDLER, M.".
    #[arg(long)]
    pub instructor: Option<String>,
    /// Department as stored in the grade data, e.g. "COM SCI".
    #[arg(long)]
    pub department: Option<String>,
    /// Course number, e.g. 161.
    #[arg(long)]
    pub number: Option<String>,
    /// Section code, e.g. 36531.
    #[arg(long)]
    pub code: Option<f64>,
}

/// Storage columns a [`GradeFilter`] can constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Year,
    Quarter,
    Instructor,
    Department,
    Number,
    Code,
}

impl Column {
    pub fn name(&self) -> &'static str {
        match self {
            Column::Year => "year",
            Column::Quarter => "quarter",
            Column::Instructor => "instructor",
            Column::Department => "department",
            Column::Number => "number",
            Column::Code => "code",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    Number(f64),
}

/// `column = value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: Column,
    pub value: FilterValue,
}

impl Predicate {
    fn matches(&self, row: &GradeRow) -> bool {
        let text = match self.column {
            Column::Year => &row.year,
            Column::Quarter => &row.quarter,
            Column::Instructor => &row.instructor,
            Column::Department => &row.department,
            Column::Number => &row.number,
            Column::Code => {
                return matches!(self.value, FilterValue::Number(n) if n == row.code);
            }
        };
        matches!(&self.value, FilterValue::Text(s) if s == text)
    }
}

/// A parameterized SQL `WHERE` body: `sql` uses `?` placeholders bound to
/// `params` in order. Empty when there are no predicates.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlClause {
    pub sql: String,
    pub params: Vec<FilterValue>,
}

/// Conjunction of equality predicates, one per present filter field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhereSpecification {
    pub predicates: Vec<Predicate>,
}

impl WhereSpecification {
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches(&self, row: &GradeRow) -> bool {
        self.predicates.iter().all(|p| p.matches(row))
    }

    pub fn to_sql(&self) -> SqlClause {
        let sql = self
            .predicates
            .iter()
            .map(|p| format!("{} = ?", p.column))
            .collect::<Vec<_>>()
            .join(" AND ");
        let params = self.predicates.iter().map(|p| p.value.clone()).collect();
        SqlClause { sql, params }
    }
}

/// Emits one equality predicate per present filter field, in column order
/// year, quarter, instructor, department, number, code.
pub fn compile(filter: &GradeFilter) -> WhereSpecification {
    let text_fields = [
        (Column::Year, &filter.year),
        (Column::Quarter, &filter.quarter),
        (Column::Instructor, &filter.instructor),
        (Column::Department, &filter.department),
        (Column::Number, &filter.number),
    ];

    let mut predicates: Vec<Predicate> = text_fields
        .into_iter()
        .filter_map(|(column, value)| {
            value.as_ref().map(|v| Predicate {
                column,
                value: FilterValue::Text(v.clone()),
            })
        })
        .collect();

    if let Some(code) = filter.code {
        predicates.push(Predicate {
            column: Column::Code,
            value: FilterValue::Number(code),
        });
    }

    debug!(predicates = predicates.len(), "Compiled grade filter");

    WhereSpecification { predicates }
}
