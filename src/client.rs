//! Client construction and the shared request core.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use base64::Engine;
use bytes::Bytes;
use reqwest::header::{self, HeaderMap};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{Error, Result, Service, Zone};

/// Advisory rate-limit counters copied from the latest response.
///
/// The provider reports the per-app quota window through
/// `X-Rate-Limit-Quota`, `X-Rate-Limit-Remaining` and `X-Rate-Limit-Reset`
/// headers. The client records them so applications can inspect their
/// standing; it never acts on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RateLimit {
    /// Calls allowed in the current window.
    pub quota: Option<u32>,
    /// Calls remaining in the current window.
    pub remaining: Option<u32>,
    /// Seconds until the window resets.
    pub reset: Option<u32>,
}

/// Authenticated client for the JPush REST API.
///
/// Cloning is cheap; clones share the underlying connection pool and
/// rate-limit telemetry.
#[derive(Clone)]
pub struct JPushClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
    rate_limit: Arc<RwLock<RateLimit>>,
}

#[derive(Debug)]
struct ClientConfig {
    app_key: String,
    authorization: String,
    zone: Zone,
    base_url: Option<String>,
}

impl JPushClient {
    /// Create a client with default settings for the given app credentials.
    pub fn new(app_key: impl Into<String>, master_secret: impl Into<String>) -> Result<Self> {
        Self::builder(app_key, master_secret).build()
    }

    /// Create a configuration builder.
    pub fn builder(app_key: impl Into<String>, master_secret: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(app_key, master_secret)
    }

    /// The app key this client authenticates as.
    pub fn app_key(&self) -> &str {
        &self.config.app_key
    }

    /// The zone this client routes through.
    pub fn zone(&self) -> Zone {
        self.config.zone
    }

    /// Rate-limit counters recorded from the most recent response.
    pub fn rate_limit(&self) -> RateLimit {
        *self.rate_limit.read().unwrap()
    }

    /// The underlying HTTP client, for building operation requests.
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Resolve the absolute URL for an operation path.
    pub(crate) fn endpoint(&self, service: Service, path: &str) -> String {
        match &self.config.base_url {
            Some(base) => format!("{base}{path}"),
            None => format!("{}{}", self.config.zone.url(service), path),
        }
    }

    /// Dispatch a request and return the raw body of a successful response.
    ///
    /// Attaches the `Authorization` header, records rate-limit headers, and
    /// maps non-2xx responses through the provider error envelope.
    pub(crate) async fn send(&self, request: reqwest::RequestBuilder) -> Result<Bytes> {
        let request = request
            .header(header::AUTHORIZATION, &self.config.authorization)
            .build()?;
        debug!(method = %request.method(), url = %request.url(), "dispatching API request");

        let response = self.http.execute(request).await?;
        self.record_rate_limit(response.headers());

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            let err = Error::from_response(status.as_u16(), &body);
            debug!(status = status.as_u16(), error = %err, "API request rejected");
            return Err(err);
        }
        Ok(body)
    }

    /// Dispatch a request and decode the successful response body as JSON.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let body = self.send(request).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn record_rate_limit(&self, headers: &HeaderMap) {
        let mut limits = self.rate_limit.write().unwrap();
        if let Some(quota) = header_count(headers, "X-Rate-Limit-Quota") {
            limits.quota = Some(quota);
        }
        if let Some(remaining) = header_count(headers, "X-Rate-Limit-Remaining") {
            limits.remaining = Some(remaining);
        }
        if let Some(reset) = header_count(headers, "X-Rate-Limit-Reset") {
            limits.reset = Some(reset);
        }
    }
}

fn header_count(headers: &HeaderMap, name: &str) -> Option<u32> {
    headers.get(name)?.to_str().ok()?.parse().ok()
}

/// Client authenticated with group credentials.
///
/// A group key delivers one push across every application in the group; the
/// provider authenticates it as `group-<key>:<secret>` and accepts it only on
/// the group push endpoint.
#[derive(Clone)]
pub struct GroupClient {
    inner: JPushClient,
}

impl GroupClient {
    /// Create a group client with default settings.
    pub fn new(group_key: impl Into<String>, group_secret: impl Into<String>) -> Result<Self> {
        Self::builder(group_key, group_secret).build_group()
    }

    /// Create a configuration builder for a group client.
    pub fn builder(
        group_key: impl Into<String>,
        group_secret: impl Into<String>,
    ) -> ClientBuilder {
        ClientBuilder::new(group_key, group_secret)
    }

    pub(crate) fn client(&self) -> &JPushClient {
        &self.inner
    }
}

/// Builder for [`JPushClient`] and [`GroupClient`].
#[derive(Debug)]
pub struct ClientBuilder {
    app_key: String,
    master_secret: String,
    zone: Zone,
    base_url: Option<String>,
    timeout: Duration,
    connect_timeout: Duration,
    user_agent: String,
}

impl ClientBuilder {
    fn new(app_key: impl Into<String>, master_secret: impl Into<String>) -> Self {
        Self {
            app_key: app_key.into(),
            master_secret: master_secret.into(),
            zone: Zone::Default,
            base_url: None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("jpush-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Route requests through a specific zone.
    pub fn zone(mut self, zone: Zone) -> Self {
        self.zone = zone;
        self
    }

    /// Route every service to a single base URL instead of the zone's public
    /// endpoints. Intended for tests and private API gateways.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout (default 30 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connection timeout (default 10 seconds).
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the `User-Agent` header value.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build a client that authenticates with app credentials.
    pub fn build(self) -> Result<JPushClient> {
        let credentials = format!("{}:{}", self.app_key, self.master_secret);
        self.build_with_credentials(credentials)
    }

    /// Build a client that authenticates with group credentials.
    pub fn build_group(self) -> Result<GroupClient> {
        let credentials = format!("group-{}:{}", self.app_key, self.master_secret);
        Ok(GroupClient {
            inner: self.build_with_credentials(credentials)?,
        })
    }

    fn build_with_credentials(self, credentials: String) -> Result<JPushClient> {
        let base_url = match &self.base_url {
            Some(raw) => Some(normalize_base_url(raw)?),
            None => None,
        };

        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
        let authorization = format!("Basic {encoded}");

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .user_agent(&self.user_agent)
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        Ok(JPushClient {
            http,
            config: Arc::new(ClientConfig {
                app_key: self.app_key,
                authorization,
                zone: self.zone,
                base_url,
            }),
            rate_limit: Arc::new(RwLock::new(RateLimit::default())),
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let mut parsed =
        url::Url::parse(raw).map_err(|e| Error::Config(format!("invalid base url: {e}")))?;
    if !parsed.path().ends_with('/') {
        let path = format!("{}/", parsed.path());
        parsed.set_path(&path);
    }
    Ok(parsed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_authorization() {
        let client = JPushClient::new("appkey", "secret").unwrap();
        assert_eq!(
            client.config.authorization,
            "Basic YXBwa2V5OnNlY3JldA=="
        );
        assert_eq!(client.app_key(), "appkey");
        assert_eq!(client.zone(), Zone::Default);
    }

    #[test]
    fn test_group_prefix() {
        let group = GroupClient::new("appkey", "secret").unwrap();
        assert_eq!(
            group.client().config.authorization,
            "Basic Z3JvdXAtYXBwa2V5OnNlY3JldA=="
        );
    }

    #[test]
    fn test_endpoint_by_zone() {
        let client = JPushClient::builder("k", "s")
            .zone(Zone::Beijing)
            .build()
            .unwrap();
        assert_eq!(
            client.endpoint(Service::Push, "push"),
            "https://bjapi.push.jiguang.cn/v3/push"
        );
        assert_eq!(
            client.endpoint(Service::Tag, "mytag/registration_ids/rid1"),
            "https://bjapi.push.jiguang.cn/v3/device/tags/mytag/registration_ids/rid1"
        );
    }

    #[test]
    fn test_base_url_override() {
        let client = JPushClient::builder("k", "s")
            .base_url("http://127.0.0.1:9123")
            .build()
            .unwrap();
        assert_eq!(
            client.endpoint(Service::Push, "push"),
            "http://127.0.0.1:9123/push"
        );
        assert_eq!(
            client.endpoint(Service::Schedule, ""),
            "http://127.0.0.1:9123/"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = JPushClient::builder("k", "s").base_url("not a url").build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_base_url_normalization() {
        assert_eq!(
            normalize_base_url("http://127.0.0.1:9123").unwrap(),
            "http://127.0.0.1:9123/"
        );
        assert_eq!(
            normalize_base_url("http://gw.example.com/jpush").unwrap(),
            "http://gw.example.com/jpush/"
        );
        // The slash lands on the path, ahead of any query.
        assert_eq!(
            normalize_base_url("http://gw.example.com/jpush?team=7").unwrap(),
            "http://gw.example.com/jpush/?team=7"
        );
    }

    #[test]
    fn test_rate_limit_default() {
        let client = JPushClient::new("k", "s").unwrap();
        assert_eq!(client.rate_limit(), RateLimit::default());
    }

    #[test]
    fn test_rate_limit_updates() {
        let client = JPushClient::new("k", "s").unwrap();

        let mut headers = HeaderMap::new();
        headers.insert("X-Rate-Limit-Quota", "600".parse().unwrap());
        headers.insert("X-Rate-Limit-Remaining", "599".parse().unwrap());
        client.record_rate_limit(&headers);

        let limits = client.rate_limit();
        assert_eq!(limits.quota, Some(600));
        assert_eq!(limits.remaining, Some(599));
        assert_eq!(limits.reset, None);

        // A malformed header leaves the previous observation in place.
        let mut headers = HeaderMap::new();
        headers.insert("X-Rate-Limit-Quota", "not-a-number".parse().unwrap());
        headers.insert("X-Rate-Limit-Reset", "42".parse().unwrap());
        client.record_rate_limit(&headers);

        let limits = client.rate_limit();
        assert_eq!(limits.quota, Some(600));
        assert_eq!(limits.reset, Some(42));
    }
}
