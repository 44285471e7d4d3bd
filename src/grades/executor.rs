//! Contract of the grade query executor.

use anyhow::{Result, bail};
use async_trait::async_trait;

use super::filter::WhereSpecification;
use super::types::{AggregateRow, GradeRow};

/// What the executor returns: raw rows, or the single aggregate row
/// (`None` when the backend produced no row at all).
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutorResponse {
    Rows(Vec<GradeRow>),
    Aggregate(Option<AggregateRow>),
}

/// Runs a [`WhereSpecification`] against the grade store.
///
/// One entry point serves both retrievals; `aggregate_only` selects the
/// aggregate row instead of the raw rows.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn query(
        &self,
        spec: &WhereSpecification,
        aggregate_only: bool,
    ) -> Result<ExecutorResponse>;
}

/// Fetches the raw rows, rejecting a response of the wrong shape.
pub async fn fetch_rows(
    executor: &dyn QueryExecutor,
    spec: &WhereSpecification,
) -> Result<Vec<GradeRow>> {
    match executor.query(spec, false).await? {
        ExecutorResponse::Rows(rows) => Ok(rows),
        ExecutorResponse::Aggregate(_) => bail!("executor returned an aggregate row for a row query"),
    }
}

/// Fetches the aggregate row, rejecting a response of the wrong shape.
pub async fn fetch_aggregate(
    executor: &dyn QueryExecutor,
    spec: &WhereSpecification,
) -> Result<Option<AggregateRow>> {
    match executor.query(spec, true).await? {
        ExecutorResponse::Aggregate(row) => Ok(row),
        ExecutorResponse::Rows(_) => bail!("executor returned raw rows for an aggregate query"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(ExecutorResponse);

    #[async_trait]
    impl QueryExecutor for Fixed {
        async fn query(&self, _: &WhereSpecification, _: bool) -> Result<ExecutorResponse> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_fetch_rows_rejects_aggregate() {
        let executor = Fixed(ExecutorResponse::Aggregate(None));
        let err = fetch_rows(&executor, &WhereSpecification::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("aggregate row"));
    }

    #[tokio::test]
    async fn test_fetch_aggregate_rejects_rows() {
        let executor = Fixed(ExecutorResponse::Rows(vec![]));
        assert!(
            fetch_aggregate(&executor, &WhereSpecification::default())
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_fetch_matching_shapes() {
        let spec = WhereSpecification::default();

        let rows = fetch_rows(&Fixed(ExecutorResponse::Rows(vec![])), &spec)
            .await
            .unwrap();
        assert!(rows.is_empty());

        let agg = fetch_aggregate(
            &Fixed(ExecutorResponse::Aggregate(Some(AggregateRow::default()))),
            &spec,
        )
        .await
        .unwrap();
        assert_eq!(agg, Some(AggregateRow::default()));
    }
}
