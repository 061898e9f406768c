//! Port Test Doubles
//!
//! Hand-written recording doubles for the ports, shared by unit tests and
//! the integration tests under `tests/` (enable the `test-util` feature).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use async_trait::async_trait;

use crate::domain::ProtocolTvlReply;
use super::strategy_source::{FetchError, StrategySourcePort};
use super::token_summer::{Balances, SumTokensError, SumTokensRequest, TokenSummerPort};

/// Strategy source that serves a canned reply and counts fetches
#[derive(Debug, Clone)]
pub struct MockStrategySource {
    calls: Arc<AtomicUsize>,
    response: Arc<Mutex<Result<ProtocolTvlReply, FetchError>>>,
    delay: Option<Duration>,
}

impl MockStrategySource {
    pub fn new(reply: ProtocolTvlReply) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            response: Arc::new(Mutex::new(Ok(reply))),
            delay: None,
        }
    }

    pub fn failing(error: FetchError) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            response: Arc::new(Mutex::new(Err(error))),
            delay: None,
        }
    }

    /// Builder method to simulate network latency
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Replace the response served by subsequent fetches
    pub fn set_response(&self, response: Result<ProtocolTvlReply, FetchError>) {
        *self.response.lock().unwrap() = response;
    }

    /// Number of fetches issued so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StrategySourcePort for MockStrategySource {
    async fn fetch_reply(&self) -> Result<ProtocolTvlReply, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.response.lock().unwrap().clone()
    }
}

/// Token summer that records every request and returns fixed balances
#[derive(Debug, Clone, Default)]
pub struct RecordingTokenSummer {
    requests: Arc<Mutex<Vec<SumTokensRequest>>>,
    balances: Balances,
}

impl RecordingTokenSummer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the balances returned for every call
    pub fn with_balances(mut self, balances: Balances) -> Self {
        self.balances = balances;
        self
    }

    /// Get all recorded requests
    pub fn requests(&self) -> Vec<SumTokensRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenSummerPort for RecordingTokenSummer {
    async fn sum_tokens(&self, request: SumTokensRequest) -> Result<Balances, SumTokensError> {
        self.requests.lock().unwrap().push(request);
        Ok(self.balances.clone())
    }
}
