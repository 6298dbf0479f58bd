//! HTTP middleware that only lets requests for the JSON-RPC path through.

use crate::constants::RPC_PATH;
use http::StatusCode;
use jsonrpsee::server::{HttpBody, HttpResponse};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::debug;

/// Layer producing [`RpcPath`].
#[derive(Debug, Clone, Copy)]
pub struct RpcPathLayer {
    path: &'static str,
}

impl RpcPathLayer {
    pub const fn new(path: &'static str) -> Self {
        Self { path }
    }
}

impl Default for RpcPathLayer {
    fn default() -> Self {
        Self::new(RPC_PATH)
    }
}

impl<S> Layer<S> for RpcPathLayer {
    type Service = RpcPath<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RpcPath { inner, path: self.path }
    }
}

/// Answers `404 Not Found` for every path except the configured one.
#[derive(Debug, Clone)]
pub struct RpcPath<S> {
    inner: S,
    path: &'static str,
}

fn not_found() -> HttpResponse {
    let mut response = HttpResponse::new(HttpBody::empty());
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}

impl<S, B> Service<http::Request<B>> for RpcPath<S>
where
    S: Service<http::Request<B>, Response = HttpResponse>,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
{
    type Response = HttpResponse;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: http::Request<B>) -> Self::Future {
        if request.uri().path() == self.path {
            Box::pin(self.inner.call(request))
        } else {
            debug!(target: "rpc::http", path = request.uri().path(), "rejected request path");
            Box::pin(std::future::ready(Ok(not_found())))
        }
    }
}
