//! Grade-distribution pipeline.
//!
//! A [`GradeFilter`] compiles into a [`WhereSpecification`], the
//! [`QueryExecutor`] is asked for the matching rows and for their aggregate,
//! and [`aggregate`] shapes both into a [`GradeDistributionResult`].

pub mod aggregate;
pub mod executor;
pub mod filter;
pub mod types;

pub use aggregate::aggregate;
pub use executor::{ExecutorResponse, QueryExecutor};
pub use filter::{GradeFilter, WhereSpecification, compile};
pub use types::{AggregateRow, GpaValue, GradeDistributionResult, GradeRow};
