//! Vault List Cache
//!
//! Holds the first successful `/strategies/tvl` reply for as long as the
//! cache lives. There is no TTL: a refresh only happens after `clear()`.
//!
//! The pending fetch itself is stored in the slot before anyone awaits it,
//! so concurrent first callers share one underlying request.

use std::sync::{Arc, Mutex};

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;

use crate::domain::ProtocolTvlReply;
use crate::ports::strategy_source::{FetchError, StrategySourcePort};

type SharedReply = Shared<BoxFuture<'static, Result<Arc<ProtocolTvlReply>, FetchError>>>;

/// Process-wide vault list cache, shared between chain exports
pub struct ReplyCache {
    source: Arc<dyn StrategySourcePort>,
    slot: Mutex<Option<SharedReply>>,
}

impl ReplyCache {
    pub fn new(source: Arc<dyn StrategySourcePort>) -> Self {
        Self {
            source,
            slot: Mutex::new(None),
        }
    }

    /// Cached reply, fetching it on first use.
    ///
    /// A failed fetch is returned to every caller that was waiting on it and
    /// then evicted, so the next call starts a fresh request.
    pub async fn get(&self) -> Result<Arc<ProtocolTvlReply>, FetchError> {
        let fetch = {
            let mut slot = self.slot.lock().unwrap();
            match slot.as_ref() {
                Some(pending) => {
                    tracing::debug!("Strategy vault list served from cache");
                    pending.clone()
                }
                None => {
                    let source = self.source.clone();
                    let pending = async move { source.fetch_reply().await.map(Arc::new) }
                        .boxed()
                        .shared();
                    *slot = Some(pending.clone());
                    pending
                }
            }
        };

        let reply = fetch.await;
        if let Err(err) = &reply {
            tracing::debug!(?err, "Evicting failed strategy vault list fetch");
            let mut slot = self.slot.lock().unwrap();
            if let Some(Err(_)) = slot.as_ref().and_then(|pending| pending.peek()) {
                *slot = None;
            }
        }

        reply
    }

    /// Drop the cached reply (or in-flight fetch). The next `get` refetches.
    pub fn clear(&self) {
        *self.slot.lock().unwrap() = None;
    }

    /// Whether a successful reply is held
    pub fn is_populated(&self) -> bool {
        self.slot
            .lock()
            .unwrap()
            .as_ref()
            .and_then(|pending| pending.peek())
            .map(|reply| reply.is_ok())
            .unwrap_or(false)
    }
}
