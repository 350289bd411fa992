use chrono::{DateTime, Utc};
use std::time::Duration;

/// One executed sampler, as recorded in a single JTL row
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Raw `timeStamp` cell, normally milliseconds since the epoch
    pub timestamp: String,
    pub elapsed: Duration,
    pub label: String,
    /// Kept verbatim; non-HTTP samplers write arbitrary text here
    pub response_code: String,
    pub response_message: String,
    pub thread_name: String,
    pub data_type: String,
    pub success: bool,
    pub failure_message: String,
    pub bytes: u64,
    pub sent_bytes: u64,
    pub group_threads: u32,
    pub all_threads: u32,
    pub url: String,
    pub filename: String,
    pub latency: Duration,
    pub connect: Duration,
    pub encoding: String,
    /// Number of logical samples this row stands for
    pub sample_count: u64,
    pub error_count: u64,
    pub hostname: String,
    pub idle_time: Duration,
    /// Extra CSV columns written via `sample_variables`, in header order
    pub variables: Vec<(String, String)>,
}

impl Default for Sample {
    fn default() -> Self {
        Self {
            timestamp: String::new(),
            elapsed: Duration::ZERO,
            label: String::new(),
            response_code: String::new(),
            response_message: String::new(),
            thread_name: String::new(),
            data_type: String::new(),
            success: false,
            failure_message: String::new(),
            bytes: 0,
            sent_bytes: 0,
            group_threads: 0,
            all_threads: 0,
            url: String::new(),
            filename: String::new(),
            latency: Duration::ZERO,
            connect: Duration::ZERO,
            encoding: String::new(),
            sample_count: 1,
            error_count: 0,
            hostname: String::new(),
            idle_time: Duration::ZERO,
            variables: Vec::new(),
        }
    }
}

impl Sample {
    /// Elapsed time in (fractional) milliseconds
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    /// Start of the sample, when the timestamp is in epoch milliseconds
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        let millis = self.timestamp.trim().parse::<i64>().ok()?;
        DateTime::from_timestamp_millis(millis)
    }

    /// Whether the response code is exactly HTTP 200.
    ///
    /// Codes that are not integers at all (`Non HTTP response code: ...`,
    /// empty cells) count as not OK.
    pub fn response_code_is_ok(&self) -> bool {
        matches!(self.response_code.trim().parse::<i64>(), Ok(200))
    }
}
