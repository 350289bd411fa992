use super::{Analyzer, TestSummary};
use crate::jtl::{JtlReader, Sample};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use std::path::Path;

/// Summarize the JTL file at `path` for the given build
pub fn summarize(build_name: &str, passed: bool, path: &Path) -> Result<TestSummary> {
    let samples = JtlReader::from_path(path)?;
    SummaryAnalyzer::new(build_name, passed).analyze(samples)
}

pub struct SummaryAnalyzer {
    build_name: String,
    passed: bool,
}

impl SummaryAnalyzer {
    pub fn new(build_name: impl Into<String>, passed: bool) -> Self {
        Self {
            build_name: build_name.into(),
            passed,
        }
    }
}

impl Analyzer for SummaryAnalyzer {
    type Output = TestSummary;

    fn analyze<I>(&self, samples: I) -> Result<Self::Output>
    where
        I: IntoIterator<Item = Result<Sample>>,
    {
        tracing::debug!("Analyzing JTL samples for build {}", self.build_name);

        let mut acc = SummaryAccumulator::default();
        let mut window: Option<(DateTime<Utc>, DateTime<Utc>)> = None;
        for sample in samples {
            let sample = sample?;
            if let Some(at) = sample.started_at() {
                window = Some(match window {
                    Some((first, last)) => (first.min(at), last.max(at)),
                    None => (at, at),
                });
            }
            acc.push(&sample);
        }

        if let Some((first, last)) = window {
            tracing::debug!(
                "Samples started between {} and {}",
                first.to_rfc3339(),
                last.to_rfc3339()
            );
        }

        let summary = acc.finish(&self.build_name, self.passed)?;

        tracing::info!(
            "Summary complete: {} samples, {} successes, {} invalid response codes, avg={:.2}ms",
            summary.samples,
            summary.successes,
            summary.invalid_resp_code,
            summary.avg_resp_time
        );

        Ok(summary)
    }
}

/// Running totals over a sample stream.
///
/// Response times are folded in arrival order, so the same input always
/// produces bit-identical averages.
#[derive(Debug, Clone, Default)]
pub struct SummaryAccumulator {
    samples: u64,
    successes: u64,
    invalid_resp_code: u64,
    sample_count_sum: u64,
    total_time: f64,
    min_time: Option<f64>,
    max_time: Option<f64>,
}

impl SummaryAccumulator {
    pub fn push(&mut self, sample: &Sample) {
        self.samples += 1;
        self.sample_count_sum += sample.sample_count;

        let elapsed = sample.elapsed_ms();
        self.total_time += elapsed;
        self.min_time = Some(self.min_time.map_or(elapsed, |min| min.min(elapsed)));
        self.max_time = Some(self.max_time.map_or(elapsed, |max| max.max(elapsed)));

        // Unparseable codes and non-200 codes share one counter
        if !sample.response_code_is_ok() {
            self.invalid_resp_code += 1;
        }

        if sample.success {
            self.successes += 1;
        }
    }

    /// Build the summary. Fails with `EmptyInput` when nothing was pushed.
    pub fn finish(self, build_name: &str, passed: bool) -> Result<TestSummary> {
        let (Some(min_resp_time), Some(max_resp_time)) = (self.min_time, self.max_time) else {
            return Err(Error::EmptyInput);
        };

        Ok(TestSummary {
            samples: self.samples,
            successes: self.successes,
            invalid_resp_code: self.invalid_resp_code,
            sample_count_sum: self.sample_count_sum,
            avg_resp_time: self.total_time / self.samples as f64,
            min_resp_time,
            max_resp_time,
            passed,
            build_name: build_name.to_string(),
        })
    }
}
