//! Pass-through serve middleware.
//!
//! The adapter never serves object bytes itself; delivery is delegated to
//! the public asset host. The host still asks every storage adapter for a
//! serve middleware, so this one forwards each request to the inner service
//! untouched.

use std::task::{Context, Poll};

use tower::{Layer, Service};

/// Layer producing the pass-through service.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassthroughLayer;

impl<S> Layer<S> for PassthroughLayer {
    type Service = Passthrough<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Passthrough { inner }
    }
}

/// Middleware that forwards every request to the inner service unchanged.
#[derive(Clone, Debug)]
pub struct Passthrough<S> {
    inner: S,
}

impl<S, R> Service<R> for Passthrough<S>
where
    S: Service<R>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: R) -> Self::Future {
        self.inner.call(req)
    }
}
