//! Trait for the term-based class-schedule feed.

use anyhow::Result;

use crate::schedule::{BackendScheduleQuery, RawOffering};

/// Abstraction over a schedule feed provider (e.g., WebSoc).
///
/// One call returns the complete result set or fails; transport and
/// upstream-validation errors are returned unchanged.
#[async_trait::async_trait]
pub trait ScheduleFeed: Send + Sync {
    async fn get_course_schedules(&self, query: &BackendScheduleQuery) -> Result<Vec<RawOffering>>;
}
