use crate::{DEFAULT_DOC_TYPE, DEFAULT_INDEX, Endpoint, Error, Result};
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http_body_util::{BodyExt as _, Full};
use hyper::{Method, Request};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use serde::{Deserialize, Serialize};

/// Acknowledgement returned by the index API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexResponse {
    #[serde(rename = "_index")]
    pub index: Option<String>,
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub result: Option<String>,
}

/// Index `document` into the `jmeter` index on `host:port`
pub async fn publish<T: Serialize>(document: &T, host: &str, port: u16) -> Result<IndexResponse> {
    let client = ElasticClient::new(Endpoint::new(host, port)?);
    client.index(DEFAULT_INDEX, DEFAULT_DOC_TYPE, document).await
}

#[derive(Debug, Clone)]
pub struct ElasticClient {
    endpoint: Endpoint,
    inner: Client<HttpConnector, Full<Bytes>>,
}

impl ElasticClient {
    pub fn new(endpoint: Endpoint) -> Self {
        let connector = HttpConnector::new();
        let inner = Client::builder(TokioExecutor::new()).build(connector);

        Self { endpoint, inner }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Send a single index request carrying `document` as its JSON body.
    ///
    /// Any 2xx answer counts as success; the body is decoded on a best
    /// effort basis.
    pub async fn index<T: Serialize>(
        &self,
        index: &str,
        doc_type: &str,
        document: &T,
    ) -> Result<IndexResponse> {
        let body = serde_json::to_vec(document)?;
        let uri = self.endpoint.document_uri(index, doc_type);

        tracing::debug!("POST {} ({} bytes)", uri, body.len());

        let req = Request::builder()
            .method(Method::POST)
            .uri(uri.as_str())
            .header(CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(body)))?;

        let res = self.inner.request(req).await?;
        let status = res.status();
        let bytes = res.into_body().collect().await?.to_bytes();

        if !status.is_success() {
            return Err(Error::Rejected {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        let response = match serde_json::from_slice::<IndexResponse>(&bytes) {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("Ignoring undecodable index response: {}", e);
                IndexResponse::default()
            }
        };

        tracing::info!(
            "Indexed document into {} on {} (status {}, id {})",
            index,
            self.endpoint.base_url(),
            status.as_u16(),
            response.id.as_deref().unwrap_or("-")
        );

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_response_tolerates_partial_bodies() {
        let full: IndexResponse = serde_json::from_str(
            r#"{"_index":"jmeter","_id":"Zx1","_version":1,"result":"created","_shards":{"total":2}}"#,
        )
        .unwrap();
        assert_eq!(full.index.as_deref(), Some("jmeter"));
        assert_eq!(full.id.as_deref(), Some("Zx1"));
        assert_eq!(full.result.as_deref(), Some("created"));

        let empty: IndexResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, IndexResponse::default());
    }
}
