//! The public query surface.
//!
//! Each method resolves one query independently; nothing is shared between
//! calls beyond the read-only backends.

use std::sync::Arc;

use tracing::{debug, info};

use crate::catalog::{self, Catalog, Course, InstructorProfile};
use crate::error::{QueryError, QueryResult};
use crate::grades::executor::{fetch_aggregate, fetch_rows};
use crate::grades::{self, GradeDistributionResult, GradeFilter, QueryExecutor};
use crate::schedule::{self, Offering, ScheduleQueryArgs};
use crate::services::schedule_feed::ScheduleFeed;

/// Backends shared by every query.
#[derive(Clone)]
pub struct QueryService {
    catalog: Arc<dyn Catalog>,
    feed: Arc<dyn ScheduleFeed>,
    executor: Arc<dyn QueryExecutor>,
}

fn found<T>(result: QueryResult<T>) -> QueryResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => {
            debug!(error = %e, "Lookup missed");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

impl QueryService {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        feed: Arc<dyn ScheduleFeed>,
        executor: Arc<dyn QueryExecutor>,
    ) -> Self {
        Self {
            catalog,
            feed,
            executor,
        }
    }

    /// Course by id, e.g. `COMPSCI161`. A miss is `Ok(None)`.
    pub fn course(&self, id: &str) -> QueryResult<Option<Course>> {
        found(self.catalog.get_course(id))
    }

    /// Instructor by ucinetid with their course history resolved. A miss is `Ok(None)`.
    pub fn instructor(&self, ucinetid: &str) -> QueryResult<Option<InstructorProfile>> {
        let instructor = found(self.catalog.get_instructor(ucinetid))?;
        Ok(instructor.map(|i| catalog::resolve_profile(self.catalog.as_ref(), i)))
    }

    pub fn all_courses(&self) -> Vec<Course> {
        self.catalog.all_courses()
    }

    pub fn all_instructors(&self) -> Vec<InstructorProfile> {
        self.catalog
            .all_instructors()
            .into_iter()
            .map(|i| catalog::resolve_profile(self.catalog.as_ref(), i))
            .collect()
    }

    /// Validates the request, translates it for the feed, and reshapes the
    /// feed's offerings. Feed failures fail the whole query.
    #[tracing::instrument(skip(self, args), fields(year = ?args.year, quarter = ?args.quarter))]
    pub async fn schedule(&self, args: &ScheduleQueryArgs) -> QueryResult<Vec<Offering>> {
        schedule::validate(args)?;
        let query = schedule::normalize(args);

        let raw = self
            .feed
            .get_course_schedules(&query)
            .await
            .map_err(QueryError::Upstream)?;

        let offerings = schedule::assemble(raw, self.catalog.as_ref());
        info!(offerings = offerings.len(), "Schedule query resolved");
        Ok(offerings)
    }

    /// Fetches matching rows and their aggregate concurrently, then shapes
    /// the response. Either call failing fails the query.
    #[tracing::instrument(skip(self, filter))]
    pub async fn grades(&self, filter: &GradeFilter) -> QueryResult<GradeDistributionResult> {
        let spec = grades::compile(filter);
        let executor = self.executor.as_ref();

        let (rows, aggregate_row) =
            tokio::try_join!(fetch_rows(executor, &spec), fetch_aggregate(executor, &spec))
                .map_err(QueryError::Upstream)?;

        let result = grades::aggregate(&rows, aggregate_row.as_ref());
        info!(
            distributions = result.grade_distributions.len(),
            "Grades query resolved"
        );
        Ok(result)
    }
}
