//! # Filter Host
//!
//! The host owns the record snapshot and the current [`Criteria`], re-runs the
//! filter engine whenever the criteria change, and derives everything a results
//! page shows from the outcome:
//!
//! - the display list: the first `page_size` matches
//! - the markers: every match with coordinates (not capped)
//! - the summary: "showing K of M", "no matches", or "data unavailable"
//!
//! ## One evaluation, one view
//!
//! A filter outcome is committed as a single [`Evaluation`] (the criteria it
//! answered plus the matching positions). Every view is computed from the
//! committed evaluation only, so a count can never come from one criteria while
//! the list comes from another.
//!
//! ## Inline or off-thread
//!
//! Without a worker the engine runs synchronously and the evaluation is
//! committed immediately. With a [`WorkerLink`] attached, each change issues a
//! request with a fresh, increasing id and the previous evaluation stays on
//! display until the response for the *latest* id arrives. Responses for older
//! ids are dropped. If the worker stops answering within the configured timeout
//! (or disconnects) the host detaches it and filters inline from then on.
//!
//! ## Search text
//!
//! Typed text is buffered in a [`Debounced`] value and promoted to the criteria
//! only after a quiet period, so a burst of keystrokes costs one evaluation.
//! Discrete facet changes apply immediately.

use crate::config::HubConfig;
use crate::criteria::Criteria;
use crate::debounce::Debounced;
use crate::error::{HubError, Result};
use crate::facets::FacetOptions;
use crate::filter::matching_indices;
use crate::links::detail_url;
use crate::model::{Coordinates, Marker, Record, OHIO_CENTER};
use crate::worker::{RequestId, WorkerLink, WorkerRequest, WorkerResponse, WorkerRow};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostOptions {
    pub page_size: usize,
    pub search_debounce: Duration,
    pub worker_timeout: Duration,
}

impl Default for HostOptions {
    fn default() -> Self {
        HostOptions::from(&HubConfig::default())
    }
}

impl From<&HubConfig> for HostOptions {
    fn from(config: &HubConfig) -> Self {
        Self {
            page_size: config.page_size.max(1),
            search_debounce: config.search_debounce(),
            worker_timeout: config.worker_timeout(),
        }
    }
}

/// The outcome of one filter run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    pub criteria: Criteria,
    pub indices: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostState {
    /// The snapshot never loaded; nothing can be filtered.
    Unavailable(String),
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultSummary {
    Unavailable {
        reason: String,
    },
    NoMatches {
        total: usize,
    },
    Showing {
        shown: usize,
        matched: usize,
        total: usize,
    },
}

impl std::fmt::Display for ResultSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultSummary::Unavailable { reason } => {
                write!(f, "Program data is unavailable ({})", reason)
            }
            ResultSummary::NoMatches { total } => {
                write!(f, "No programs match your filters ({} in directory)", total)
            }
            ResultSummary::Showing {
                shown,
                matched,
                total,
            } => {
                write!(f, "Showing {}", shown)?;
                if matched > shown {
                    write!(f, " of {}", matched)?;
                }
                write!(f, " licensed programs")?;
                if matched != total {
                    write!(f, " (filtered from {})", total)?;
                }
                Ok(())
            }
        }
    }
}

/// Everything a results page renders, taken from a single evaluation.
#[derive(Debug, Clone)]
pub struct ResultsView<'a> {
    pub criteria: &'a Criteria,
    pub display: Vec<&'a Record>,
    pub markers: Vec<Marker>,
    pub summary: ResultSummary,
    /// A newer request is still in flight; this view is the previous answer.
    pub pending: bool,
}

/// The latest request handed to the worker.
#[derive(Debug)]
struct InFlight {
    request_id: RequestId,
    criteria: Criteria,
    issued: Instant,
}

pub struct FilterHost {
    snapshot: Option<Arc<[Record]>>,
    state: HostState,
    criteria: Criteria,
    committed: Evaluation,
    in_flight: Option<InFlight>,
    next_request_id: RequestId,
    worker: Option<WorkerLink>,
    search: Debounced<String>,
    options: HostOptions,
}

impl FilterHost {
    /// A host over a loaded snapshot, filtering inline.
    pub fn new(records: Vec<Record>, options: HostOptions) -> Self {
        log::debug!("filter host ready with {} programs", records.len());
        let mut host = Self::empty(HostState::Ready, options);
        host.snapshot = Some(records.into());
        host.evaluate_inline(Criteria::default());
        host
    }

    /// A host whose snapshot failed to load.
    pub fn unavailable(reason: impl Into<String>, options: HostOptions) -> Self {
        let reason = reason.into();
        log::warn!("directory snapshot unavailable: {}", reason);
        Self::empty(HostState::Unavailable(reason), options)
    }

    pub fn from_load(loaded: Result<Vec<Record>>, options: HostOptions) -> Self {
        match loaded {
            Ok(records) => Self::new(records, options),
            Err(HubError::DataUnavailable(reason)) => Self::unavailable(reason, options),
            Err(e) => Self::unavailable(e.to_string(), options),
        }
    }

    fn empty(state: HostState, options: HostOptions) -> Self {
        Self {
            snapshot: None,
            state,
            criteria: Criteria::default(),
            committed: Evaluation::default(),
            in_flight: None,
            next_request_id: 0,
            worker: None,
            search: Debounced::new(options.search_debounce),
            options,
        }
    }

    /// Hand filtering to a worker. The worker receives the snapshot right away
    /// and the current criteria is re-issued through it.
    pub fn attach_worker(&mut self, link: WorkerLink) {
        let Some(snapshot) = self.snapshot.clone() else {
            log::debug!("no snapshot loaded, filter worker not attached");
            return;
        };

        let rows: Vec<WorkerRow> = snapshot.iter().map(WorkerRow::from).collect();
        if let Err(e) = link.send(WorkerRequest::Init { rows }) {
            log::warn!("filter worker rejected the snapshot, filtering inline: {}", e);
            return;
        }

        self.worker = Some(link);
        self.in_flight = None;
        let criteria = self.criteria.clone();
        self.apply(criteria);
    }

    pub fn has_worker(&self) -> bool {
        self.worker.is_some()
    }

    // --- criteria updates ---

    pub fn set_city(&mut self, city: impl Into<String>) {
        self.apply(self.criteria.clone().with_city(city));
    }

    pub fn set_county(&mut self, county: impl Into<String>) {
        self.apply(self.criteria.clone().with_county(county));
    }

    pub fn set_pfcc_only(&mut self, pfcc_only: bool) {
        self.apply(self.criteria.clone().with_pfcc_only(pfcc_only));
    }

    pub fn toggle_rating(&mut self, rating: &str) {
        self.apply(self.criteria.toggled_rating(rating));
    }

    pub fn toggle_program_type(&mut self, program_type: &str) {
        self.apply(self.criteria.toggled_program_type(program_type));
    }

    pub fn set_ratings<I, S>(&mut self, ratings: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.apply(self.criteria.clone().with_ratings(ratings));
    }

    pub fn set_program_types<I, S>(&mut self, program_types: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.apply(self.criteria.clone().with_program_types(program_types));
    }

    /// Swap in a whole new criteria in one step.
    pub fn replace_criteria(&mut self, criteria: Criteria) {
        self.search.clear();
        self.apply(criteria);
    }

    /// Reset every facet, including buffered search text.
    pub fn clear_all(&mut self) {
        self.replace_criteria(Criteria::default());
    }

    // --- search text ---

    /// Buffer typed search text; it applies after the debounce delay.
    pub fn input_text(&mut self, text: impl Into<String>, now: Instant) {
        self.search.push(text.into(), now);
    }

    /// Text typed but not applied yet.
    pub fn pending_text(&self) -> Option<&str> {
        self.search.peek().map(String::as_str)
    }

    /// Apply buffered text whose quiet period has passed. Returns whether the
    /// criteria changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.search.take_ready(now) {
            Some(text) => self.apply_text(text),
            None => false,
        }
    }

    /// Apply buffered text immediately.
    pub fn flush_text(&mut self) -> bool {
        match self.search.flush() {
            Some(text) => self.apply_text(text),
            None => false,
        }
    }

    fn apply_text(&mut self, text: String) -> bool {
        if text == self.criteria.text_query() {
            return false;
        }
        self.apply(self.criteria.clone().with_text_query(text));
        true
    }

    // --- evaluation ---

    fn apply(&mut self, criteria: Criteria) {
        self.criteria = criteria.clone();
        if self.snapshot.is_none() {
            return;
        }

        let Some(worker) = &self.worker else {
            self.evaluate_inline(criteria);
            return;
        };

        self.next_request_id += 1;
        let request_id = self.next_request_id;
        let request = WorkerRequest::Filter {
            request_id,
            criteria: criteria.clone(),
        };

        match worker.send(request) {
            Ok(()) => {
                log::debug!("filter request {} sent to worker", request_id);
                self.in_flight = Some(InFlight {
                    request_id,
                    criteria,
                    issued: Instant::now(),
                });
            }
            Err(e) => {
                log::warn!("{}, filtering inline", e);
                self.detach_worker();
                self.evaluate_inline(criteria);
            }
        }
    }

    fn evaluate_inline(&mut self, criteria: Criteria) {
        let Some(snapshot) = self.snapshot.clone() else {
            return;
        };
        let indices = matching_indices(&snapshot, &criteria);
        log::debug!(
            "inline filter matched {} of {} programs",
            indices.len(),
            snapshot.len()
        );
        self.commit(Evaluation { criteria, indices });
    }

    fn commit(&mut self, evaluation: Evaluation) {
        self.committed = evaluation;
    }

    fn detach_worker(&mut self) {
        self.worker = None;
        self.in_flight = None;
    }

    /// Feed one worker response to the host. Returns `true` when it was the
    /// answer to the latest request and the view changed.
    pub fn handle_response(&mut self, response: WorkerResponse) -> bool {
        match response {
            WorkerResponse::Initialized { count } => {
                let expected = self.total();
                if count != expected {
                    log::warn!(
                        "filter worker holds {} rows but the snapshot has {}",
                        count,
                        expected
                    );
                }
                false
            }
            WorkerResponse::Filtered {
                request_id,
                indices,
            } => {
                let is_latest =
                    matches!(&self.in_flight, Some(latest) if latest.request_id == request_id);
                if !is_latest {
                    log::debug!("discarding stale filter response {}", request_id);
                    return false;
                }
                if let Some(answered) = self.in_flight.take() {
                    self.commit(Evaluation {
                        criteria: answered.criteria,
                        indices,
                    });
                }
                true
            }
        }
    }

    /// Drain responses that have already arrived without blocking. If the
    /// latest request has waited longer than the worker timeout, filter it
    /// inline instead. Returns `true` if the view changed.
    pub fn poll(&mut self) -> bool {
        self.poll_at(Instant::now())
    }

    fn poll_at(&mut self, now: Instant) -> bool {
        let mut changed = false;
        loop {
            let Some(worker) = &self.worker else {
                return changed;
            };
            match worker.try_recv() {
                Ok(Some(response)) => changed |= self.handle_response(response),
                Ok(None) => break,
                Err(e) => {
                    log::warn!("{}, filtering inline", e);
                    return self.fall_back_inline() || changed;
                }
            }
        }

        let timeout = self.options.worker_timeout;
        let overdue = self
            .in_flight
            .as_ref()
            .is_some_and(|request| now.saturating_duration_since(request.issued) >= timeout);
        if overdue {
            self.warn_timed_out();
            changed |= self.fall_back_inline();
        }
        changed
    }

    /// Block until the latest request is answered, falling back to inline
    /// filtering if the worker does not answer within the configured timeout.
    pub fn wait_for_results(&mut self) {
        let deadline = Instant::now() + self.options.worker_timeout;

        while self.in_flight.is_some() {
            let Some(worker) = &self.worker else {
                return;
            };
            let remaining = deadline.saturating_duration_since(Instant::now());
            match worker.recv_timeout(remaining) {
                Ok(Some(response)) => {
                    self.handle_response(response);
                }
                Ok(None) => {
                    self.warn_timed_out();
                    self.fall_back_inline();
                }
                Err(e) => {
                    log::warn!("{}, filtering inline", e);
                    self.fall_back_inline();
                }
            }
        }
    }

    fn warn_timed_out(&self) {
        log::warn!(
            "filter worker did not answer within {:?}, filtering inline",
            self.options.worker_timeout
        );
    }

    fn fall_back_inline(&mut self) -> bool {
        let pending = self.in_flight.take();
        self.detach_worker();
        match pending {
            Some(request) => {
                self.evaluate_inline(request.criteria);
                true
            }
            None => false,
        }
    }

    // --- views ---

    pub fn state(&self) -> &HostState {
        &self.state
    }

    /// The most recently requested criteria.
    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    /// The latest committed filter outcome.
    pub fn evaluation(&self) -> &Evaluation {
        &self.committed
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn records(&self) -> &[Record] {
        self.snapshot.as_deref().unwrap_or(&[])
    }

    pub fn total(&self) -> usize {
        self.records().len()
    }

    pub fn match_count(&self) -> usize {
        self.committed.indices.len()
    }

    pub fn matches(&self) -> Vec<&Record> {
        let records = self.records();
        self.committed
            .indices
            .iter()
            .filter_map(|&i| records.get(i))
            .collect()
    }

    pub fn display_list(&self) -> Vec<&Record> {
        let records = self.records();
        self.committed
            .indices
            .iter()
            .take(self.options.page_size)
            .filter_map(|&i| records.get(i))
            .collect()
    }

    pub fn markers(&self) -> Vec<Marker> {
        self.matches()
            .into_iter()
            .filter_map(|record| {
                let coordinates = record.coordinates()?;
                Some(Marker {
                    latitude: coordinates.latitude,
                    longitude: coordinates.longitude,
                    title: record.name().to_string(),
                    detail_url: detail_url(record),
                })
            })
            .collect()
    }

    /// Where a map should centre: the first marker, else the middle of Ohio.
    pub fn map_center(&self) -> Coordinates {
        self.matches()
            .iter()
            .find_map(|record| record.coordinates())
            .unwrap_or(OHIO_CENTER)
    }

    pub fn summary(&self) -> ResultSummary {
        if let HostState::Unavailable(reason) = &self.state {
            return ResultSummary::Unavailable {
                reason: reason.clone(),
            };
        }

        let matched = self.match_count();
        let total = self.total();
        if matched == 0 {
            ResultSummary::NoMatches { total }
        } else {
            ResultSummary::Showing {
                shown: matched.min(self.options.page_size),
                matched,
                total,
            }
        }
    }

    pub fn view(&self) -> ResultsView<'_> {
        ResultsView {
            criteria: &self.committed.criteria,
            display: self.display_list(),
            markers: self.markers(),
            summary: self.summary(),
            pending: self.is_pending(),
        }
    }

    pub fn facet_options(&self) -> FacetOptions {
        FacetOptions::from_records(self.records())
    }
}
