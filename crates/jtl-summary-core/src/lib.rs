pub mod analysis;
pub mod error;
pub mod jtl;

pub use analysis::{TestSummary, summarize};
pub use error::{Error, Result};
