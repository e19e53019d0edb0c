//! The device client.
//!
//! Every exchange with the device funnels through here: acquire the
//! request gate, consult the response cache, perform the HTTP I/O
//! only on a miss, store the outcome, release the gate. The client
//! owns its gate and cache -- there is no process-wide shared state,
//! so running several bridged devices in one process keeps them
//! independent.

use crate::{
    cache::ResponseCache,
    config::Params,
    gate::RequestGate,
    payload::StateBody,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error};
use wled_api::{
    transport::{HttpMethod, Request, Response, Transport},
    Error, Result,
};

pub struct DeviceClient<T: Transport> {
    params: Arc<Params>,
    transport: T,
    gate: RequestGate,
    cache: Mutex<ResponseCache>,
}

impl<T: Transport> DeviceClient<T> {
    pub fn new(params: Arc<Params>, transport: T) -> Self {
        DeviceClient {
            params,
            transport,
            gate: RequestGate::new(),
            cache: Mutex::new(ResponseCache::default()),
        }
    }

    /// Reads and decodes the device's state report.

    pub async fn read_state(&self) -> Result<StateBody> {
        let url = self.params.state_url()?;
        let rsp = self.request(&url, HttpMethod::Get, true).await?;

        StateBody::decode(&rsp.body)
    }

    /// Issues a command write and returns the raw response body.
    /// Write responses are only cached when the configuration opts
    /// in; a replayed acknowledgement is stale by definition.

    pub async fn write_command(&self, url: &str) -> Result<String> {
        let rsp = self
            .request(url, self.params.http_method, self.params.cache_writes)
            .await?;

        Ok(rsp.body)
    }

    // The serialized request path. The gate permit is held across the
    // cache check and any I/O; it drops when this function returns,
    // which is immediately after a cache hit or after the in-flight
    // request completes.

    async fn request(
        &self,
        url: &str,
        method: HttpMethod,
        cacheable: bool,
    ) -> Result<Response> {
        let _permit = self.gate.acquire().await;

        if cacheable {
            if let Some(outcome) = self.cache.lock().await.get(url) {
                debug!("serving {} from cache", url);
                return outcome;
            }
        }

        let req = Request {
            url: url.to_string(),
            method,
            body: String::new(),
        };

        let outcome = match self.transport.send(&req).await {
            Ok(rsp) if rsp.status == 200 => Ok(rsp),
            Ok(rsp) => {
                error!(
                    "device returned HTTP {} for {}: \"{}\"",
                    rsp.status, url, &rsp.body
                );
                Err(Error::DeviceStatusError {
                    code: rsp.status,
                    body: rsp.body,
                })
            }
            Err(e) => {
                error!("request to {} failed: {}", url, &e);
                Err(e)
            }
        };

        if cacheable {
            self.cache
                .lock()
                .await
                .put(url.to_string(), outcome.clone());
        }

        outcome
    }
}
