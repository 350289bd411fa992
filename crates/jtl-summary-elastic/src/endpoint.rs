use crate::{Error, Result};
use url::Url;

/// Base address of an Elasticsearch node reachable over plain HTTP
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    /// Resolve a user supplied host.
    ///
    /// Accepts `es.local`, `es.local:9201` or `http://es.local:9201`. A port
    /// written in `host` takes precedence over `port`.
    pub fn new(host: &str, port: u16) -> Result<Self> {
        let trimmed = host.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidHost(host.to_string()));
        }

        let with_scheme = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("http://{}", trimmed)
        };

        let url = Url::parse(&with_scheme).map_err(|_| Error::InvalidHost(host.to_string()))?;
        if url.scheme() != "http" {
            return Err(Error::UnsupportedScheme(host.to_string()));
        }

        let has_extras = !matches!(url.path(), "" | "/")
            || url.query().is_some()
            || url.fragment().is_some()
            || !url.username().is_empty()
            || url.password().is_some();
        if has_extras {
            return Err(Error::InvalidHost(host.to_string()));
        }

        let Some(host_str) = url.host_str() else {
            return Err(Error::InvalidHost(host.to_string()));
        };

        // `Url::port` hides an explicit :80, so look at the authority too
        let port = match url.port() {
            Some(explicit) => explicit,
            None if has_explicit_port(&with_scheme) => 80,
            None => port,
        };

        tracing::debug!("Resolved Elasticsearch endpoint {}:{}", host_str, port);

        Ok(Self {
            host: host_str.to_string(),
            port,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// URI documents of `doc_type` are POSTed to in `index`
    pub fn document_uri(&self, index: &str, doc_type: &str) -> String {
        format!("{}/{}/{}", self.base_url(), index, doc_type)
    }
}

fn has_explicit_port(url: &str) -> bool {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let authority = rest.split('/').next().unwrap_or(rest);
    // Skip past an IPv6 literal before looking for the port separator
    let host_and_port = authority.rsplit_once(']').map_or(authority, |(_, tail)| tail);
    host_and_port.contains(':')
}
