use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid Elasticsearch host: {0}")]
    InvalidHost(String),

    #[error("Only http:// Elasticsearch endpoints are supported: {0}")]
    UnsupportedScheme(String),

    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to build index request: {0}")]
    RequestBuild(#[from] http::Error),

    #[error("Index request failed: {0}")]
    Request(#[from] hyper_util::client::legacy::Error),

    #[error("Failed to read Elasticsearch response: {0}")]
    BodyRead(#[from] hyper::Error),

    #[error("Elasticsearch rejected the document ({status}): {body}")]
    Rejected { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, Error>;
