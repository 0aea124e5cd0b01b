// src/server/handler.rs
use hyper::client::connect::Connect;
use hyper::client::HttpConnector;
use hyper::{Body, Method, Request, Response, StatusCode};
use std::sync::Arc;
use tower::Service;
use uuid::Uuid;

use crate::gateway::Gateway;

/// Inbound surface of the gateway: a `tower::Service` that rejects
/// everything but GET and converts forwarding failures into 502/504
/// responses instead of tearing down the connection.
pub struct RequestHandler<C = HttpConnector> {
    gateway: Arc<Gateway<C>>,
}

impl<C> Clone for RequestHandler<C> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
        }
    }
}

impl<C> RequestHandler<C> {
    pub fn new(gateway: Arc<Gateway<C>>) -> Self {
        Self { gateway }
    }
}

impl<C> Service<Request<Body>> for RequestHandler<C>
where
    C: Connect + Clone + Send + Sync + 'static,
{
    type Response = Response<Body>;
    type Error = Box<dyn std::error::Error + Send + Sync>;
    type Future = futures::future::BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let gateway = self.gateway.clone();
        Box::pin(async move {
            let request_id = Uuid::new_v4();
            let method = req.method().clone();
            let path = req.uri().path().to_string();

            if method != Method::GET {
                tracing::debug!(%request_id, %method, %path, "rejecting non-GET request");
                return Ok(Response::builder()
                    .status(StatusCode::METHOD_NOT_ALLOWED)
                    .header("Allow", "GET")
                    .body(Body::from("Method Not Allowed"))
                    .unwrap());
            }

            match gateway.forward(req).await {
                Ok(response) => {
                    tracing::info!(
                        %request_id,
                        %path,
                        status = response.status().as_u16(),
                        "relayed upstream response"
                    );
                    Ok(response)
                }
                Err(e) => {
                    tracing::error!(%request_id, %path, error = %e, "forward failed");
                    Ok(e.into())
                }
            }
        })
    }
}
