//! Defines the seam between the device logic and the HTTP stack.
//!
//! The bridge never talks to a socket directly; everything funnels
//! through the [`Transport`] trait so tests can substitute an
//! in-memory implementation and hosts can supply their own client.

use crate::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

/// The HTTP methods a device command may be configured to use. WLED
/// accepts its `win` commands over GET, but the original adapter let
/// the user override this.

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
}

/// A single outbound device request. The URL is the complete target,
/// query and all; it doubles as the response cache key.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    pub method: HttpMethod,
    pub body: String,
}

/// The raw outcome of a completed request. Status interpretation
/// happens in the device client, not here; a transport only fails
/// when the request never completed.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

/// Performs a single HTTP exchange. Implementations must apply the
/// per-request timeout configured at construction and map any
/// network-level failure to `Error::TransportError`.

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, req: &Request) -> Result<Response>;
}

// Allows callers to hold on to a transport handle (for inspection in
// tests, for instance) while the device client owns another.

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, req: &Request) -> Result<Response> {
        (**self).send(req).await
    }
}
