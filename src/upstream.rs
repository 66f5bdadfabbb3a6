//! HTTP advisory source.
//!
//! A single `GET` on `[upstream].url`; the body must be the versioned
//! `{ "rows": [...] }` envelope understood by
//! [`decode_feed`](launchwatch_core::feed::decode_feed). Bodies larger than
//! `[upstream].max_body_bytes` are rejected as malformed.

use std::time::Duration;

use async_trait::async_trait;
use launchwatch_core::feed::{decode_feed, AdvisoryFeed, AdvisorySource};
use launchwatch_core::FetchError;
use tracing::debug;

use crate::config::UpstreamConfig;

pub struct HttpAdvisorySource {
    client: reqwest::Client,
    url: String,
    name: String,
    max_body_bytes: u64,
}

impl HttpAdvisorySource {
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let url = config.url.trim().to_string();
        let name = reqwest::Url::parse(&url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| url.clone());

        Ok(Self {
            client,
            url,
            name,
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// Read the body chunk by chunk, stopping once it passes the limit.
    async fn read_body(&self, mut resp: reqwest::Response) -> Result<String, FetchError> {
        let too_large = || {
            FetchError::Malformed(format!(
                "response body exceeds {} bytes",
                self.max_body_bytes
            ))
        };

        if resp.content_length().is_some_and(|len| len > self.max_body_bytes) {
            return Err(too_large());
        }

        let mut body = Vec::new();
        while let Some(chunk) = resp
            .chunk()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?
        {
            if (body.len() + chunk.len()) as u64 > self.max_body_bytes {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }

        String::from_utf8(body)
            .map_err(|e| FetchError::Malformed(format!("body is not UTF-8: {}", e)))
    }
}

#[async_trait]
impl AdvisorySource for HttpAdvisorySource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<AdvisoryFeed, FetchError> {
        let resp = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = self.read_body(resp).await?;
        let feed = decode_feed(&body)?;
        debug!(source = %self.name, rows = feed.rows.len(), "fetched upstream feed");
        Ok(feed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upstream(url: &str) -> UpstreamConfig {
        UpstreamConfig {
            url: url.to_string(),
            timeout_secs: 2,
            max_body_bytes: 1024,
        }
    }

    /// Serve `body` at `/rows` on a loopback port and return the URL.
    async fn serve_body(body: String) -> String {
        let app = axum::Router::new()
            .route("/rows", axum::routing::get(move || async move { body }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/rows", addr)
    }

    #[test]
    fn test_name_is_upstream_host() {
        let source =
            HttpAdvisorySource::from_config(&upstream("https://feeds.example.org/advisories"))
                .unwrap();
        assert_eq!(source.name(), "feeds.example.org");
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_request_error() {
        // Port 9 (discard) on loopback is closed on any sane test host.
        let source = HttpAdvisorySource::from_config(&upstream("http://127.0.0.1:9/rows")).unwrap();
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Request(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_body_within_limit_is_decoded() {
        let url = serve_body(r#"{"rows":[{"advisoryid":1}]}"#.to_string()).await;
        let source = HttpAdvisorySource::from_config(&upstream(&url)).unwrap();
        let feed = source.fetch().await.unwrap();
        assert_eq!(feed.rows.len(), 1);
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let padding = "x".repeat(4096);
        let url = serve_body(format!(r#"{{"rows":[],"padding":"{}"}}"#, padding)).await;
        let source = HttpAdvisorySource::from_config(&upstream(&url)).unwrap();
        let err = source.fetch().await.unwrap_err();
        match err {
            FetchError::Malformed(msg) => assert!(msg.contains("exceeds 1024 bytes"), "{}", msg),
            other => panic!("expected Malformed, got {:?}", other),
        }
    }
}
