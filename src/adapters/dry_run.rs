//! Dry-Run Token Summer
//!
//! Stands in for the host's summation primitive when the adapter runs
//! outside the host. Requests are kept for inspection and no balances are
//! read, so every call returns an empty balance map.

use std::sync::Mutex;
use async_trait::async_trait;

use crate::ports::token_summer::{Balances, SumTokensError, SumTokensRequest, TokenSummerPort};

#[derive(Debug, Default)]
pub struct DryRunSummer {
    requests: Mutex<Vec<SumTokensRequest>>,
}

impl DryRunSummer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the requests received so far, in call order
    pub fn take_requests(&self) -> Vec<SumTokensRequest> {
        std::mem::take(&mut *self.requests.lock().unwrap())
    }
}

#[async_trait]
impl TokenSummerPort for DryRunSummer {
    async fn sum_tokens(&self, request: SumTokensRequest) -> Result<Balances, SumTokensError> {
        tracing::debug!(
            chain = %request.api.chain,
            owners = request.owners.len(),
            "Dry-run summation request"
        );
        self.requests.lock().unwrap().push(request);
        Ok(Balances::new())
    }
}
