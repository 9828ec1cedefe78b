//! Request generations
//!
//! List views may fire overlapping requests (typing into a search box,
//! paging quickly). Responses arrive in any order; only the most recently
//! issued request for a view may update it.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::ClientResult;

/// Generation counter for one view
#[derive(Debug, Clone, Default)]
pub struct RequestGeneration {
    current: Arc<AtomicU64>,
}

/// Proof of issuance order for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request; every earlier ticket becomes stale
    pub fn issue(&self) -> Ticket {
        Ticket(self.current.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.current.load(Ordering::Acquire) == ticket.0
    }

    /// Run `request` under a fresh ticket.
    ///
    /// The ticket is taken when this is called, not when the future is first
    /// polled. Yields `Ok(None)` if a newer request was issued before this one
    /// completed; its result or error is dropped.
    pub fn latest<T, Fut>(&self, request: Fut) -> impl Future<Output = ClientResult<Option<T>>> + use<T, Fut>
    where
        Fut: Future<Output = ClientResult<T>>,
    {
        let ticket = self.issue();
        let generation = self.clone();
        async move {
            let result = request.await;
            if !generation.is_current(ticket) {
                tracing::debug!(ticket = ticket.0, "Discarding stale response");
                return Ok(None);
            }
            result.map(Some)
        }
    }
}
