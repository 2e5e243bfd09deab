// src/logging.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;

/// Details of a single call against the chat backend.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiCallLog {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub request_summary: String,
    pub response_status: u16,
    pub response_time_ms: u128,
}

/// Appends an API call record to the configured log file.
pub fn log_api_call(log: &ApiCallLog) {
    let log_entry = format!(
        "[{}] {} - {} - Status: {} - Time: {}ms\n",
        log.timestamp.to_rfc3339(),
        log.endpoint,
        log.request_summary,
        log.response_status,
        log.response_time_ms
    );

    let path = crate::config::get_config().log_file;
    let file = OpenOptions::new().append(true).create(true).open(&path);

    match file {
        Ok(mut file) => {
            if let Err(e) = file.write_all(log_entry.as_bytes()) {
                eprintln!("Failed to write to log file: {}", e);
            }
        }
        Err(e) => eprintln!("Failed to open log file {}: {}", path, e),
    }
}

/// Truncates a question down to something that fits on one log line.
pub fn summarize_request(question: &str) -> String {
    const MAX: usize = 80;
    if question.chars().count() > MAX {
        let truncated: String = question.chars().take(MAX).collect();
        format!("{}...", truncated)
    } else {
        question.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_request_short_passthrough() {
        assert_eq!(summarize_request("hello"), "hello");
    }

    #[test]
    fn test_summarize_request_truncates_long_input() {
        let long = "x".repeat(200);
        let summary = summarize_request(&long);
        assert!(summary.ends_with("..."));
        assert_eq!(summary.chars().count(), 83);
    }
}
