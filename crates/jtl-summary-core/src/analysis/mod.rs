mod summary;

pub use summary::{SummaryAccumulator, SummaryAnalyzer, summarize};

use crate::jtl::Sample;
use serde::{Deserialize, Serialize};

/// Aggregate view of one JTL log, in the shape indexed downstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSummary {
    pub samples: u64,
    pub successes: u64,
    pub invalid_resp_code: u64,
    pub sample_count_sum: u64,
    pub avg_resp_time: f64,
    pub min_resp_time: f64,
    pub max_resp_time: f64,
    pub passed: bool,
    pub build_name: String,
}

pub trait Analyzer {
    type Output;

    /// Consume a stream of decoded samples, stopping at the first error
    fn analyze<I>(&self, samples: I) -> crate::Result<Self::Output>
    where
        I: IntoIterator<Item = crate::Result<Sample>>;
}
