//! Preconditions a schedule request must meet before it reaches the feed.

use crate::error::{ValidationError, ValidationKind};

use super::args::ScheduleQueryArgs;

pub const MISSING_TERM: &str = "Must provide both a year and a quarter.";
pub const MISSING_SCOPE: &str =
    "Must specify at least one of the following: ge, department, section_codes, or instructor.";

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// Rejects requests without a term, then requests that would scan the whole
/// catalog for that term.
///
/// The term check runs first, so a request missing both reports the term.
pub fn validate(args: &ScheduleQueryArgs) -> Result<(), ValidationError> {
    let has_year = args.year.is_some_and(|y| y.is_finite() && y != 0.0);
    if !(has_year && args.quarter.is_some()) {
        return Err(ValidationError::new(ValidationKind::MissingTerm, MISSING_TERM));
    }

    let scoped = present(&args.ge)
        || present(&args.department)
        || present(&args.section_codes)
        || present(&args.instructor);
    if !scoped {
        return Err(ValidationError::new(ValidationKind::MissingScope, MISSING_SCOPE));
    }

    Ok(())
}
