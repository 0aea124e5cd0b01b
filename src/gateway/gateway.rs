// src/gateway/gateway.rs
// Forwarding gateway: relays one inbound GET to the configured upstream,
// guaranteeing an apiKey credential in the outbound query string.

use hyper::client::connect::Connect;
use hyper::client::HttpConnector;
use hyper::{Body, Client, Method, Request, Response, Uri};
use std::time::Duration;
use tokio::time::timeout;

use super::query::QueryMap;

/// Query parameter carrying the upstream credential.
pub const API_KEY_PARAM: &str = "apiKey";

pub struct Gateway<C = HttpConnector> {
    client: Client<C>,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl<C: Clone> Clone for Gateway<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            timeout: self.timeout,
        }
    }
}

impl<C> Gateway<C> {
    /// `client` is shared and connection-pooling; `base_url` and `api_key`
    /// are immutable for the gateway's lifetime.
    pub fn new(client: Client<C>, base_url: String, api_key: String, timeout: Duration) -> Self {
        Self {
            client,
            base_url,
            api_key,
            timeout,
        }
    }

    /// Build the outbound target from the inbound query component.
    ///
    /// The inbound host and path are ignored: the gateway always targets its
    /// own configured upstream. A missing query degrades to an empty
    /// parameter set. The configured credential is injected only when the
    /// caller did not supply a non-blank `apiKey` of their own.
    fn outbound_target(&self, inbound_query: Option<&str>) -> Result<Uri, GatewayError> {
        let mut params = QueryMap::parse(inbound_query.unwrap_or(""));

        let caller_key = params.get(API_KEY_PARAM).map(str::trim).unwrap_or("");
        if caller_key.is_empty() && !self.api_key.is_empty() {
            params.insert(API_KEY_PARAM, &self.api_key);
        }

        let query = params.to_query_string();
        let target = if query.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}?{}", self.base_url, query)
        };

        target
            .parse::<Uri>()
            .map_err(|_| GatewayError::InvalidTarget(target))
    }
}

impl<C> Gateway<C>
where
    C: Connect + Clone + Send + Sync + 'static,
{
    /// Forward one inbound GET request to the upstream and relay its
    /// response verbatim. Exactly one upstream call is issued; transport
    /// failures and the per-call deadline surface as `GatewayError`, while
    /// upstream 4xx/5xx responses are relayed unchanged, not mapped.
    pub async fn forward(&self, req: Request<Body>) -> Result<Response<Body>, GatewayError> {
        let uri = self.outbound_target(req.uri().query())?;

        tracing::debug!(target_path = %uri.path(), "forwarding to upstream");

        let mut outbound = Request::new(Body::empty());
        *outbound.method_mut() = Method::GET;
        *outbound.uri_mut() = uri;

        match timeout(self.timeout, self.client.request(outbound)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) => Err(GatewayError::Upstream(e)),
            Err(_) => Err(GatewayError::Timeout),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("invalid upstream target: {0}")]
    InvalidTarget(String),

    #[error("upstream request failed: {0}")]
    Upstream(#[from] hyper::Error),

    #[error("upstream request timed out")]
    Timeout,
}

// Convert GatewayError to a Hyper response so transport failures reach the
// caller as a distinguishable outcome instead of a torn connection.
impl From<GatewayError> for Response<Body> {
    fn from(err: GatewayError) -> Self {
        let (status, message) = match err {
            GatewayError::InvalidTarget(_) => (502, "Invalid upstream target"),
            GatewayError::Upstream(_) => (502, "Bad gateway"),
            GatewayError::Timeout => (504, "Gateway timeout"),
        };

        Response::builder()
            .status(status)
            .body(Body::from(message))
            .unwrap()
    }
}
