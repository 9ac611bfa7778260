// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};

use crate::{EmbeddingService, SearchError, SearchRequest, SearchTicket};

/// A finished embedding request.
#[derive(Debug)]
pub struct SearchResponse {
    /// Ticket of the request this answers.
    pub ticket: SearchTicket,
    /// The embedding, or why there is none.
    pub outcome: Result<Vec<f32>, SearchError>,
}

/// Runs embedding requests on background threads.
///
/// Requests go in with [`SearchWorker::submit`]; responses come back in
/// completion order through [`SearchWorker::try_recv`], which never blocks.
/// Dropping the worker lets its threads exit after their current request.
#[derive(Debug)]
pub struct SearchWorker {
    jobs: Option<Sender<SearchRequest>>,
    responses: Receiver<SearchResponse>,
    threads: Vec<thread::JoinHandle<()>>,
}

impl SearchWorker {
    /// Starts `threads` worker threads (at least one) sharing `service`.
    pub fn spawn(service: Arc<dyn EmbeddingService>, threads: usize) -> Result<Self, SearchError> {
        let (job_tx, job_rx) = crossbeam_channel::unbounded::<SearchRequest>();
        let (response_tx, response_rx) = crossbeam_channel::unbounded();

        let mut handles = Vec::new();
        for index in 0..threads.max(1) {
            let jobs = job_rx.clone();
            let responses = response_tx.clone();
            let service = Arc::clone(&service);
            let handle = thread::Builder::new()
                .name(format!("search-worker-{index}"))
                .spawn(move || run(&*service, &jobs, &responses))?;
            handles.push(handle);
        }
        log::debug!("search worker started with {} threads", handles.len());

        Ok(Self {
            jobs: Some(job_tx),
            responses: response_rx,
            threads: handles,
        })
    }

    /// Queues a request.
    pub fn submit(&self, request: SearchRequest) -> Result<(), SearchError> {
        let jobs = self.jobs.as_ref().ok_or(SearchError::WorkerGone)?;
        jobs.send(request).map_err(|_| SearchError::WorkerGone)
    }

    /// A finished response, if one is ready.
    #[must_use]
    pub fn try_recv(&self) -> Option<SearchResponse> {
        self.responses.try_recv().ok()
    }

    /// Waits up to `timeout` for a finished response.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<SearchResponse>, SearchError> {
        match self.responses.recv_timeout(timeout) {
            Ok(response) => Ok(Some(response)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(SearchError::WorkerGone),
        }
    }

    /// Stops accepting requests and waits for every thread to finish.
    pub fn shutdown(mut self) {
        self.jobs = None;
        for handle in self.threads.drain(..) {
            if handle.join().is_err() {
                log::warn!("search worker thread panicked");
            }
        }
    }
}

fn run(service: &dyn EmbeddingService, jobs: &Receiver<SearchRequest>, responses: &Sender<SearchResponse>) {
    for request in jobs {
        let outcome = service.embed(&request.text);
        if let Err(err) = &outcome {
            log::warn!("embedding {:?} failed: {err}", request.text);
        }
        let response = SearchResponse {
            ticket: request.ticket,
            outcome,
        };
        if responses.send(response).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;
    use std::sync::Arc;

    use super::SearchWorker;
    use crate::{QueryAction, QueryGate, SearchError};

    const WAIT: Duration = Duration::from_secs(5);

    fn request(gate: &mut QueryGate, text: &str, at_ms: u64) -> crate::SearchRequest {
        gate.input(text, Duration::from_millis(at_ms));
        match gate.poll(Duration::from_millis(at_ms + 1000)) {
            Some(QueryAction::Submit(request)) => request,
            other => panic!("expected a submit, got {other:?}"),
        }
    }

    #[test]
    fn responses_carry_their_ticket() {
        let service = Arc::new(|text: &str| -> Result<Vec<f32>, SearchError> {
            Ok(vec![text.len() as f32, 1.0])
        });
        let worker = SearchWorker::spawn(service, 1).unwrap();
        let mut gate = QueryGate::default();

        let req = request(&mut gate, "bridge", 0);
        let ticket = req.ticket;
        worker.submit(req).unwrap();

        let response = worker.recv_timeout(WAIT).unwrap().unwrap();
        assert_eq!(response.ticket, ticket);
        assert_eq!(response.outcome.unwrap(), vec![6.0, 1.0]);
        worker.shutdown();
    }

    #[test]
    fn failures_are_delivered_not_dropped() {
        let service = Arc::new(|_: &str| -> Result<Vec<f32>, SearchError> {
            Err(SearchError::Service("offline".into()))
        });
        let worker = SearchWorker::spawn(service, 2).unwrap();
        let mut gate = QueryGate::default();
        worker.submit(request(&mut gate, "harbor", 0)).unwrap();

        let response = worker.recv_timeout(WAIT).unwrap().unwrap();
        assert!(matches!(response.outcome, Err(SearchError::Service(_))));
    }

    #[test]
    fn try_recv_does_not_block() {
        let service = Arc::new(|_: &str| -> Result<Vec<f32>, SearchError> { Ok(vec![1.0]) });
        let worker = SearchWorker::spawn(service, 1).unwrap();
        assert!(worker.try_recv().is_none());
    }
}
