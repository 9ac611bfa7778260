// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use crate::{SearchError, SearchResponse};

/// Default quiet period before a query is issued.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Default minimum query length, in characters after trimming.
pub const DEFAULT_MIN_QUERY_LEN: usize = 3;

/// Identifies one issued query. Only the latest ticket is ever accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchTicket(u64);

impl SearchTicket {
    /// The raw generation number.
    #[must_use]
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// A query ready to be embedded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
    /// Generation of this request.
    pub ticket: SearchTicket,
    /// Trimmed query text.
    pub text: String,
}

/// What the host should do after the debounce settles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryAction {
    /// Embed and rank this query.
    Submit(SearchRequest),
    /// Drop any ranked view and return to the unranked gallery.
    Clear,
}

/// A worker response classified against the gate's current generation.
#[derive(Debug)]
pub enum SearchOutcome {
    /// The latest query's embedding.
    Embedding(Vec<f32>),
    /// The latest query failed.
    Failed(SearchError),
    /// A superseded query resolved; discard it.
    Stale,
}

/// Debounces raw text input into search actions.
///
/// Every keystroke restarts the quiet period. When it elapses, the text is
/// trimmed: anything shorter than the minimum length clears the search,
/// anything else is submitted under a fresh [`SearchTicket`]. Issuing either
/// action invalidates every earlier ticket, so results arrive
/// last-query-wins. Settling on the state already in effect issues nothing.
#[derive(Clone, Debug)]
pub struct QueryGate {
    debounce: Duration,
    min_len: usize,
    pending: Option<(String, Duration)>,
    generation: u64,
    active: Option<String>,
}

impl Default for QueryGate {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE, DEFAULT_MIN_QUERY_LEN)
    }
}

impl QueryGate {
    /// Creates a gate with the given quiet period and minimum length.
    #[must_use]
    pub fn new(debounce: Duration, min_len: usize) -> Self {
        Self {
            debounce,
            min_len,
            pending: None,
            generation: 0,
            active: None,
        }
    }

    /// Records new input text at time `now`.
    pub fn input(&mut self, text: &str, now: Duration) {
        self.pending = Some((text.to_owned(), now + self.debounce));
    }

    /// Returns `true` while input is waiting for its quiet period.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending input settles, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// The submitted query currently in effect.
    #[must_use]
    pub fn active_query(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Drops the active query without issuing an action.
    ///
    /// Used after a failed search so that settling on the same text again
    /// submits it again. Outstanding tickets stop being accepted.
    pub fn forget_active(&mut self) {
        self.active = None;
    }

    /// The most recently issued ticket, if any action was issued.
    #[must_use]
    pub fn latest_ticket(&self) -> Option<SearchTicket> {
        (self.generation > 0).then_some(SearchTicket(self.generation))
    }

    /// Issues an action once the pending input has been quiet long enough.
    pub fn poll(&mut self, now: Duration) -> Option<QueryAction> {
        let (_, deadline) = self.pending.as_ref()?;
        if now < *deadline {
            return None;
        }
        let (text, _) = self.pending.take()?;
        let text = text.trim();

        if text.chars().count() < self.min_len {
            self.active.take()?;
            self.generation += 1;
            log::debug!("search cleared (generation {})", self.generation);
            return Some(QueryAction::Clear);
        }
        if self.active.as_deref() == Some(text) {
            return None;
        }
        self.generation += 1;
        self.active = Some(text.to_owned());
        log::debug!("search submitted {text:?} (generation {})", self.generation);
        Some(QueryAction::Submit(SearchRequest {
            ticket: SearchTicket(self.generation),
            text: text.to_owned(),
        }))
    }

    /// Returns `true` only for the latest issued ticket.
    #[must_use]
    pub fn accept(&self, ticket: SearchTicket) -> bool {
        self.active.is_some() && ticket.0 == self.generation
    }

    /// Classifies a worker response: stale unless it answers the latest query.
    #[must_use]
    pub fn resolve(&self, response: SearchResponse) -> SearchOutcome {
        if !self.accept(response.ticket) {
            log::debug!(
                "discarding stale search response {}",
                response.ticket.generation()
            );
            return SearchOutcome::Stale;
        }
        match response.outcome {
            Ok(embedding) => SearchOutcome::Embedding(embedding),
            Err(err) => SearchOutcome::Failed(err),
        }
    }
}
