//! HTTP source for the content document.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Url;
use tracing::debug;

use super::{LoadError, Source, CONTENT_MEDIA_TYPE};

/// Fetches the document with a single GET
pub struct HttpSource {
    /// Resolved document URL
    url: Url,
    /// HTTP client
    client: reqwest::Client,
}

impl HttpSource {
    /// Create a source for an absolute document URL
    ///
    /// Without a timeout the transport's own limits apply.
    pub fn new(url: Url, timeout: Option<Duration>) -> Result<Self, LoadError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|source| LoadError::Request {
            url: url.to_string(),
            source,
        })?;

        Ok(Self { url, client })
    }

    /// Resolve `path` against `base` the way a page resolves a relative link
    pub fn from_base(base: &Url, path: &str, timeout: Option<Duration>) -> Result<Self, LoadError> {
        let url = base.join(path).map_err(|e| LoadError::InvalidLocation {
            location: format!("{}{}", base, path),
            reason: e.to_string(),
        })?;
        Self::new(url, timeout)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl Source for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    fn location(&self) -> String {
        self.url.to_string()
    }

    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        debug!(url = %self.url, "requesting content");

        let response = self
            .client
            .get(self.url.clone())
            .header(ACCEPT, CONTENT_MEDIA_TYPE)
            .send()
            .await
            .map_err(|source| LoadError::Request {
                url: self.url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: self.url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| LoadError::Request {
            url: self.url.to_string(),
            source,
        })?;

        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_resolution() {
        let base = Url::parse("https://example.com/blog/index.html").unwrap();
        let source = HttpSource::from_base(&base, "content.json", None).unwrap();
        assert_eq!(source.url().as_str(), "https://example.com/blog/content.json");

        let base = Url::parse("https://example.com/blog/").unwrap();
        let source = HttpSource::from_base(&base, "data/content.json", None).unwrap();
        assert_eq!(
            source.url().as_str(),
            "https://example.com/blog/data/content.json"
        );
    }

    #[test]
    fn test_absolute_path_replaces_base_path() {
        let base = Url::parse("https://example.com/blog/").unwrap();
        let source = HttpSource::from_base(&base, "/content.json", None).unwrap();
        assert_eq!(source.location(), "https://example.com/content.json");
    }
}
