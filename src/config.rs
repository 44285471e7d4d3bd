//! Runtime configuration read from the environment (after `.env` is loaded).

use anyhow::{Context, Result};
use std::time::Duration;

/// Where the backends live and how long upstream calls may take.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub courses_path: String,
    pub instructors_path: String,
    pub grades_path: String,
    pub websoc_url: String,
    pub http_timeout: Duration,
    pub log_file_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            courses_path: "data/courses.json".to_string(),
            instructors_path: "data/instructors.json".to_string(),
            grades_path: "data/grades.csv".to_string(),
            websoc_url: "https://api.peterportal.org/websoc".to_string(),
            http_timeout: Duration::from_secs(30),
            log_file_path: "logs/course_query.log".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let http_timeout = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.trim()
                    .parse()
                    .with_context(|| format!("HTTP_TIMEOUT_SECS must be whole seconds, got '{raw}'"))?,
            ),
            None => defaults.http_timeout,
        };

        Ok(Self {
            courses_path: lookup("COURSES_PATH").unwrap_or(defaults.courses_path),
            instructors_path: lookup("INSTRUCTORS_PATH").unwrap_or(defaults.instructors_path),
            grades_path: lookup("GRADES_PATH").unwrap_or(defaults.grades_path),
            websoc_url: lookup("WEBSOC_URL").unwrap_or(defaults.websoc_url),
            http_timeout,
            log_file_path: lookup("LOG_FILE_PATH").unwrap_or(defaults.log_file_path),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("WEBSOC_URL", "http://localhost:8080/websoc"),
            ("HTTP_TIMEOUT_SECS", "5"),
            ("GRADES_PATH", "/tmp/grades.csv"),
        ]
        .into_iter()
        .collect();

        let config = Config::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(config.websoc_url, "http://localhost:8080/websoc");
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert_eq!(config.grades_path, "/tmp/grades.csv");
        assert_eq!(config.courses_path, "data/courses.json");
    }

    #[test]
    fn test_bad_timeout_is_an_error() {
        let err = Config::from_lookup(|k| (k == "HTTP_TIMEOUT_SECS").then(|| "soon".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("soon"));
    }
}
