//! # Filter Worker
//!
//! Runs the filter engine on a dedicated thread so a large snapshot never
//! stalls the thread that owns the [`crate::host::FilterHost`].
//!
//! The worker owns its own copy of the rows, sent once with
//! [`WorkerRequest::Init`]. All traffic is owned messages over
//! `crossbeam-channel`; nothing is shared between the two sides.
//!
//! ```text
//!   host                                   worker
//!    │── Init { rows } ──────────────────────▶│  replaces its rows
//!    │◀──────────────── Initialized { count }─│
//!    │── Filter { request_id: 7, criteria } ─▶│
//!    │── Filter { request_id: 8, criteria } ─▶│  no cancellation: 7 still runs
//!    │◀────── Filtered { request_id: 7, .. } ─│  stale, host discards
//!    │◀────── Filtered { request_id: 8, .. } ─│  latest, host commits
//! ```
//!
//! Ordering is the host's job: it remembers only the most recent request id
//! and ignores every other response.

use crate::criteria::Criteria;
use crate::error::{HubError, Result};
use crate::filter::{matching_indices, Filterable, SearchKey};
use crate::model::Record;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

pub type RequestId = u64;

/// The slice of a [`Record`] the engine needs, copied once into the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerRow {
    pub search: SearchKey,
    pub city: String,
    pub county: String,
    pub pfcc: bool,
    pub rating: String,
    pub program_type: String,
}

impl From<&Record> for WorkerRow {
    fn from(record: &Record) -> Self {
        Self {
            search: record.search_key().clone(),
            city: record.city().to_string(),
            county: record.county().to_string(),
            pfcc: record.is_pfcc_funded(),
            rating: record.rating().to_string(),
            program_type: record.program_type().to_string(),
        }
    }
}

impl Filterable for WorkerRow {
    fn search_key(&self) -> &SearchKey {
        &self.search
    }

    fn city(&self) -> &str {
        &self.city
    }

    fn county(&self) -> &str {
        &self.county
    }

    fn is_pfcc_funded(&self) -> bool {
        self.pfcc
    }

    fn rating(&self) -> &str {
        &self.rating
    }

    fn program_type(&self) -> &str {
        &self.program_type
    }
}

/// Messages from the host to the worker.
#[derive(Debug, Clone)]
pub enum WorkerRequest {
    Init {
        rows: Vec<WorkerRow>,
    },
    Filter {
        request_id: RequestId,
        criteria: Criteria,
    },
    Shutdown,
}

/// Messages from the worker back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerResponse {
    Initialized {
        count: usize,
    },
    Filtered {
        request_id: RequestId,
        indices: Vec<usize>,
    },
}

/// The worker's ends of the channel pair.
pub struct WorkerEndpoint {
    pub requests: Receiver<WorkerRequest>,
    pub responses: Sender<WorkerResponse>,
}

impl WorkerEndpoint {
    /// Serve requests until shutdown or until the host goes away.
    pub fn serve(self) {
        let mut rows: Vec<WorkerRow> = Vec::new();

        loop {
            let response = match self.requests.recv() {
                Ok(WorkerRequest::Init { rows: replacement }) => {
                    rows = replacement;
                    WorkerResponse::Initialized { count: rows.len() }
                }
                Ok(WorkerRequest::Filter {
                    request_id,
                    criteria,
                }) => WorkerResponse::Filtered {
                    request_id,
                    indices: matching_indices(&rows, &criteria),
                },
                Ok(WorkerRequest::Shutdown) | Err(_) => return,
            };

            if self.responses.send(response).is_err() {
                return;
            }
        }
    }
}

/// The host's ends of the channel pair.
pub struct WorkerLink {
    requests: Sender<WorkerRequest>,
    responses: Receiver<WorkerResponse>,
}

impl WorkerLink {
    /// Start a filter worker thread and return the link to it.
    pub fn spawn() -> Result<Self> {
        let (link, endpoint) = Self::pair();

        std::thread::Builder::new()
            .name("filter-worker".into())
            .spawn(move || endpoint.serve())
            .map_err(HubError::Io)?;

        Ok(link)
    }

    /// A link plus the endpoint it talks to, with no thread behind it. The
    /// caller decides where (and in which order) requests get answered.
    pub fn pair() -> (Self, WorkerEndpoint) {
        let (request_tx, request_rx) = crossbeam_channel::unbounded();
        let (response_tx, response_rx) = crossbeam_channel::unbounded();
        (
            Self {
                requests: request_tx,
                responses: response_rx,
            },
            WorkerEndpoint {
                requests: request_rx,
                responses: response_tx,
            },
        )
    }

    pub fn send(&self, request: WorkerRequest) -> Result<()> {
        self.requests
            .send(request)
            .map_err(|_| HubError::Worker("filter worker has stopped".to_string()))
    }

    /// Next response if one is already waiting.
    pub fn try_recv(&self) -> Result<Option<WorkerResponse>> {
        match self.responses.try_recv() {
            Ok(response) => Ok(Some(response)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(HubError::Worker(
                "filter worker disconnected".to_string(),
            )),
        }
    }

    /// Next response, waiting at most `timeout`. `Ok(None)` means it timed out.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<WorkerResponse>> {
        match self.responses.recv_timeout(timeout) {
            Ok(response) => Ok(Some(response)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(HubError::Worker(
                "filter worker disconnected".to_string(),
            )),
        }
    }
}

impl Drop for WorkerLink {
    fn drop(&mut self) {
        let _ = self.requests.send(WorkerRequest::Shutdown);
    }
}
