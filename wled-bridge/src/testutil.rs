//! An in-memory transport for exercising the device client and the
//! accessory without a network. It records every request it sees and
//! tracks how many were in flight at once, which is how the gate's
//! serialization guarantee is checked.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};
use tokio::time::Duration;
use wled_api::{
    transport::{Request, Response, Transport},
    Result,
};

pub struct FakeTransport {
    replies: Mutex<HashMap<String, Result<Response>>>,
    calls: Mutex<Vec<Request>>,
    delay: Duration,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl FakeTransport {
    pub fn new() -> Self {
        FakeTransport {
            replies: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    /// Makes every exchange take this long, to widen the window in
    /// which overlapping requests would be observable.

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the canned outcome for a URL. Unknown URLs get an empty
    /// 200 response.

    pub fn reply_to(&self, url: &str, outcome: Result<Response>) {
        self.replies
            .lock()
            .unwrap()
            .insert(url.to_string(), outcome);
    }

    /// The URLs requested so far, in completion order.

    pub fn requested_urls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|req| req.url.clone())
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, req: &Request) -> Result<Response> {
        let n = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;

        self.peak_in_flight.fetch_max(n, Ordering::SeqCst);

        if self.delay > Duration::ZERO {
            tokio::time::sleep(self.delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push(req.clone());

        let canned = self.replies.lock().unwrap().get(&req.url).cloned();

        canned.unwrap_or_else(|| {
            Ok(Response {
                status: 200,
                body: String::new(),
            })
        })
    }
}
