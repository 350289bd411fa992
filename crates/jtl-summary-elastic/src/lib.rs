// Elasticsearch indexing for test summaries

pub mod client;
pub mod endpoint;
pub mod error;

pub use client::{ElasticClient, IndexResponse, publish};
pub use endpoint::Endpoint;
pub use error::{Error, Result};

/// Port Elasticsearch listens on unless told otherwise
pub const DEFAULT_PORT: u16 = 9200;

/// Index the summaries are written to
pub const DEFAULT_INDEX: &str = "jmeter";

/// Document type path segment; `_doc` on 7.x and later clusters
pub const DEFAULT_DOC_TYPE: &str = "_doc";
