//! Contracts of the external services the query surface calls.

pub mod schedule_feed;
