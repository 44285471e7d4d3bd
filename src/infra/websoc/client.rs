use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

use crate::fetch::{HttpClient, fetch_json};
use crate::schedule::{BackendScheduleQuery, RawOffering};
use crate::services::schedule_feed::ScheduleFeed;

/// Schedule feed served over HTTP. The query goes out as URL parameters
/// and the response is a JSON array of offerings.
pub struct WebSocClient<C> {
    http: C,
    base_url: String,
}

impl<C: HttpClient> WebSocClient<C> {
    pub fn new(http: C, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl<C: HttpClient> ScheduleFeed for WebSocClient<C> {
    #[tracing::instrument(skip(self, query), fields(term = %query.term))]
    async fn get_course_schedules(&self, query: &BackendScheduleQuery) -> Result<Vec<RawOffering>> {
        let offerings: Vec<RawOffering> =
            fetch_json(&self.http, &self.base_url, &query.query_pairs())
                .await
                .with_context(|| format!("Schedule request for term '{}' failed", query.term))?;

        info!(offerings = offerings.len(), "Schedule feed responded");
        Ok(offerings)
    }
}
