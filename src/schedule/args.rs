//! User-facing schedule query arguments.

use std::fmt;
use std::str::FromStr;

use clap::Args;
use serde::{Deserialize, Serialize};

/// Academic quarter accepted by the schedule feed.
///
/// Parsed case-insensitively from both the CLI and JSON requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Quarter {
    Fall,
    Winter,
    Spring,
    Summer1,
    Summer2,
    Summer10wk,
}

impl Quarter {
    pub const ALL: [Quarter; 6] = [
        Quarter::Fall,
        Quarter::Winter,
        Quarter::Spring,
        Quarter::Summer1,
        Quarter::Summer2,
        Quarter::Summer10wk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Quarter::Fall => "Fall",
            Quarter::Winter => "Winter",
            Quarter::Spring => "Spring",
            Quarter::Summer1 => "Summer1",
            Quarter::Summer2 => "Summer2",
            Quarter::Summer10wk => "Summer10wk",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quarter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Quarter::ALL
            .into_iter()
            .find(|q| q.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown quarter '{s}', expected one of Fall, Winter, Spring, Summer1, Summer2, Summer10wk"
                )
            })
    }
}

impl TryFrom<String> for Quarter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Filters a client may pass to the `schedule` query.
///
/// `year` and `quarter` are optional at the type level so that a missing
/// term is reported by [`validate`](super::validate::validate) rather than
/// by the argument parser.
#[derive(Debug, Clone, Default, PartialEq, Args, Serialize, Deserialize)]
pub struct ScheduleQueryArgs {
    /// Year of the term. Clients may send it as a float (`2023.0`).
    #[arg(long)]
    pub year: Option<f64>,
    /// Quarter of the term: Fall, Winter, Spring, Summer1, Summer2 or Summer10wk.
    #[arg(long)]
    pub quarter: Option<Quarter>,
    /// GE category, e.g. GE-1A or ANY.
    #[arg(long)]
    pub ge: Option<String>,
    /// Department code.
    #[arg(long)]
    pub department: Option<String>,
    /// Course number or range, e.g. 32A or 31-33.
    #[arg(long)]
    pub course_number: Option<String>,
    /// ALL, LowerDiv, UpperDiv or Graduate.
    #[arg(long)]
    pub division: Option<String>,
    /// Five digit section code or range, e.g. 36531 or 36520-36536.
    #[arg(long)]
    pub section_codes: Option<String>,
    /// Instructor last name or a prefix of it.
    #[arg(long)]
    pub instructor: Option<String>,
    #[arg(long)]
    pub course_title: Option<String>,
    /// ALL, ACT, COL, DIS, FLD, LAB, LEC, QIZ, RES, SEM, STU, TAP or TUT.
    #[arg(long)]
    pub section_type: Option<String>,
    /// Unit count, or VAR for variable unit classes.
    #[arg(long)]
    pub units: Option<String>,
    /// Any combination of Su, M, T, W, Th, F, Sa.
    #[arg(long)]
    pub days: Option<String>,
    /// 12 hour start time, e.g. 10:00AM.
    #[arg(long)]
    pub start_time: Option<String>,
    /// 12 hour end time, e.g. 5:00PM.
    #[arg(long)]
    pub end_time: Option<String>,
    #[arg(long)]
    pub max_capacity: Option<String>,
    /// ANY, SkipFullWaitlist, FullOnly or OverEnrolled.
    #[arg(long)]
    pub full_courses: Option<String>,
    /// Exclude, Include or Only.
    #[arg(long)]
    pub cancelled_courses: Option<String>,
    /// Building code.
    #[arg(long)]
    pub building: Option<String>,
    /// Room number; only meaningful together with a building.
    #[arg(long)]
    pub room: Option<String>,
}

impl ScheduleQueryArgs {
    /// Starts a request for the given term with no refinements.
    pub fn for_term(year: u32, quarter: Quarter) -> Self {
        Self {
            year: Some(f64::from(year)),
            quarter: Some(quarter),
            ..Default::default()
        }
    }
}
