pub mod catalog;
pub mod config;
pub mod error;
pub mod fetch;
pub mod grades;
pub mod infra;
pub mod output;
pub mod query;
pub mod schedule;
pub mod services;
