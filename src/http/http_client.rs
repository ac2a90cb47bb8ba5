use std::time::{Duration, Instant};

use log::debug;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use url::{ParseError, Url};

use super::error::HttpError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_RETRIES: u32 = 3;

pub(crate) struct HttpClient {
    base_url: Url,
    client: reqwest_middleware::ClientWithMiddleware,
    last_latency: RwLock<Option<(Duration, Instant)>>,
}

impl HttpClient {
    pub fn with_config(base_url: Url, max_retries: u32, timeout: Duration) -> Result<Self, HttpError> {
        let retry_policy = reqwest_retry::policies::ExponentialBackoff::builder().build_with_max_retries(max_retries);

        let inner_client = reqwest::Client::builder().timeout(timeout).build()?;

        let client = reqwest_middleware::ClientBuilder::new(inner_client)
            .with(reqwest_retry::RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            base_url: with_trailing_slash(base_url),
            client,
            last_latency: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends a GET to `path` (relative to the base URL) and decodes the JSON
    /// body. Non-2xx responses become [`HttpError::ServerError`] with the body
    /// preserved, since CometBFT puts JSON-RPC errors there.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, HttpError> {
        let url = self.base_url.join(path.trim_start_matches('/'))?;
        self.send(url, query).await
    }

    /// Like [`get`](Self::get), but the path is built from `segments`, each
    /// percent-encoded. Use it when part of the path comes from user input.
    pub async fn get_segments<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, HttpError> {
        let url = self.url_with_segments(segments)?;
        self.send(url, query).await
    }

    fn url_with_segments(&self, segments: &[&str]) -> Result<Url, HttpError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| HttpError::UrlError(ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, url: Url, query: &[(&str, String)]) -> Result<T, HttpError> {
        let start = Instant::now();
        let path = url.path().to_string();

        let mut req = self.client.get(url).header("Accept", "application/json");
        if !query.is_empty() {
            req = req.query(query);
        }

        let resp = req.send().await?;
        let latency = start.elapsed();
        self.update_latency(latency).await;
        debug!(
            path = path.as_str(),
            status = resp.status().as_u16(),
            latency_ms = latency.as_millis() as u64;
            "Chain request completed"
        );

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response body".into());
            return Err(HttpError::ServerError { status, body });
        }

        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn update_latency(&self, duration: Duration) {
        *self.last_latency.write().await = Some((duration, Instant::now()));
    }

    pub async fn get_latency(&self) -> Option<Duration> {
        self.last_latency.read().await.map(|(d, _)| d)
    }
}

/// `Url::join` replaces the last path segment unless the base ends with `/`,
/// which would drop a path prefix such as `https://host/rpc`.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(uri: &str) -> HttpClient {
        HttpClient::with_config(Url::parse(uri).unwrap(), 0, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn base_url_keeps_path_prefix() {
        let url = with_trailing_slash(Url::parse("https://node.example/rpc").unwrap());
        assert_eq!(url.join("status").unwrap().as_str(), "https://node.example/rpc/status");

        let url = with_trailing_slash(Url::parse("https://node.example").unwrap());
        assert_eq!(url.join("status").unwrap().as_str(), "https://node.example/status");
    }

    #[test]
    fn segments_are_percent_encoded() {
        let client = client("https://node.example/rest");
        let url = client.url_with_segments(&["balances", "zig1a?b#c/d"]).unwrap();
        assert_eq!(url.as_str(), "https://node.example/rest/balances/zig1a%3Fb%23c%2Fd");
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
    }

    #[tokio::test]
    async fn get_sends_query_and_records_latency() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/block"))
            .and(query_param("height", "42"))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&mock_server)
            .await;

        let client = client(&mock_server.uri());
        assert!(client.get_latency().await.is_none());

        let body: Value = client.get("/block", &[("height", "42".to_string())]).await.unwrap();
        assert_eq!(body, json!({"ok": true}));
        assert!(client.get_latency().await.is_some());
    }

    #[tokio::test]
    async fn non_success_status_keeps_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such route"))
            .mount(&mock_server)
            .await;

        let result: Result<Value, _> = client(&mock_server.uri()).get("missing", &[]).await;
        match result {
            Err(HttpError::ServerError { status, body }) => {
                assert_eq!(status.as_u16(), 404);
                assert_eq!(body, "no such route");
            },
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
