//! Core transport trait.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::TransportResult;
use crate::types::{HttpRequest, RawResponse};

/// One HTTP exchange at a time, on a connection/cookie context that stays the
/// same for the lifetime of the transport.
///
/// Implementations must not interpret status codes: every response that
/// arrives is returned, and only connectivity problems become errors.
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Performs one request and returns the response as received.
    fn execute(
        &self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = TransportResult<RawResponse>> + Send + '_>>;

    /// Returns the endpoint address for diagnostics, if applicable.
    fn endpoint(&self) -> Option<String> {
        None
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = TransportResult<RawResponse>> + Send + '_>> {
        (**self).execute(request)
    }

    fn endpoint(&self) -> Option<String> {
        (**self).endpoint()
    }
}
