use std::sync::{Arc, Mutex, MutexGuard};

use crate::api::{ItineraryAPI, LoadParams, SearchParams, SelectedItinerary};
use crate::auth::SessionContext;
use crate::entities::{sample_route_points, ConfirmedItinerary, ItineraryCandidate, LocationInput};
use crate::error::{busy_error, invalid_state_error, validation_error, Error};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Searching,
    CandidatesReady,
    Loading,
    Confirmed,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Candidates are held by the session, ready for selection.
    Candidates(usize),
    /// The backend answered but had nothing to propose. Not a failure.
    NoItineraries,
    /// The reply arrived after the session had moved on; nothing changed.
    Superseded,
}

#[derive(Clone, Debug)]
pub enum LoadOutcome {
    Confirmed(ConfirmedItinerary),
    Superseded,
}

#[derive(Clone, Debug)]
pub struct SearchRequest {
    pub start: LocationInput,
    pub end: String,
    pub avoid_tolls: bool,
}

enum State {
    Idle,
    Searching {
        seq: u64,
    },
    CandidatesReady {
        candidates: Vec<ItineraryCandidate>,
        start: String,
        end: String,
    },
    Loading {
        seq: u64,
    },
    Confirmed {
        itinerary: ConfirmedItinerary,
    },
    Failed {
        message: String,
    },
}

struct Inner {
    state: State,
    seq: u64,
}

/// Orchestrates the search -> candidate-list -> selection -> confirmed-route
/// protocol. One in-flight request at a time; replies are applied only if
/// the session is still in the state that issued them.
pub struct ItinerarySearchSession {
    api: Arc<dyn ItineraryAPI + Send + Sync>,
    auth: Arc<SessionContext>,
    inner: Mutex<Inner>,
}

impl ItinerarySearchSession {
    pub fn new(api: Arc<dyn ItineraryAPI + Send + Sync>, auth: Arc<SessionContext>) -> Self {
        Self {
            api,
            auth,
            inner: Mutex::new(Inner {
                state: State::Idle,
                seq: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn phase(&self) -> SessionPhase {
        match self.lock().state {
            State::Idle => SessionPhase::Idle,
            State::Searching { .. } => SessionPhase::Searching,
            State::CandidatesReady { .. } => SessionPhase::CandidatesReady,
            State::Loading { .. } => SessionPhase::Loading,
            State::Confirmed { .. } => SessionPhase::Confirmed,
            State::Failed { .. } => SessionPhase::Failed,
        }
    }

    pub fn candidates(&self) -> Vec<ItineraryCandidate> {
        match &self.lock().state {
            State::CandidatesReady { candidates, .. } => candidates.clone(),
            _ => Vec::new(),
        }
    }

    pub fn confirmed(&self) -> Option<ConfirmedItinerary> {
        match &self.lock().state {
            State::Confirmed { itinerary } => Some(itinerary.clone()),
            _ => None,
        }
    }

    pub fn confirmed_id(&self) -> Option<String> {
        self.confirmed().map(|itinerary| itinerary.id)
    }

    pub fn failure(&self) -> Option<String> {
        match &self.lock().state {
            State::Failed { message } => Some(message.clone()),
            _ => None,
        }
    }

    /// Navigation away from the page: any pending reply becomes stale.
    #[tracing::instrument(skip(self))]
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.seq += 1;
        inner.state = State::Idle;
    }

    #[tracing::instrument(skip(self, request))]
    pub async fn search(&self, request: SearchRequest) -> Result<SearchOutcome, Error> {
        let credentials = self
            .auth
            .credentials()
            .ok_or_else(|| validation_error("not authenticated"))?;

        let start = request.start.wire();
        let end = request.end.trim().to_string();

        if start.is_empty() || end.is_empty() {
            return Err(validation_error("start and end locations are required"));
        }

        let seq = {
            let mut inner = self.lock();

            match inner.state {
                State::Searching { .. } | State::Loading { .. } => return Err(busy_error()),
                _ => {}
            }

            inner.seq += 1;
            inner.state = State::Searching { seq: inner.seq };
            inner.seq
        };

        let params = SearchParams {
            start_location: start.clone(),
            end_location: end.clone(),
            user_id: credentials.user_id.clone(),
            avoid_tolls: request.avoid_tolls,
        };

        let result = self.api.search_itineraries(params).await;

        let mut inner = self.lock();

        if !matches!(inner.state, State::Searching { seq: s } if s == seq) {
            return Ok(SearchOutcome::Superseded);
        }

        match result {
            Ok(candidates) if candidates.is_empty() => {
                inner.state = State::Idle;
                Ok(SearchOutcome::NoItineraries)
            }
            Ok(candidates) => {
                let count = candidates.len();
                inner.state = State::CandidatesReady {
                    candidates,
                    start,
                    end,
                };
                Ok(SearchOutcome::Candidates(count))
            }
            Err(err) => {
                inner.state = State::Failed {
                    message: err.message.clone(),
                };
                Err(err)
            }
        }
    }

    /// Commits one candidate. The transmitted polyline is down-sampled to
    /// every 10th point; the backend returns the full-resolution itinerary.
    #[tracing::instrument(skip(self))]
    pub async fn select(&self, index: usize) -> Result<LoadOutcome, Error> {
        let credentials = self
            .auth
            .credentials()
            .ok_or_else(|| validation_error("not authenticated"))?;

        let (candidate, start, end, seq) = {
            let mut inner = self.lock();

            let (candidate, start, end) = match &inner.state {
                State::Searching { .. } | State::Loading { .. } => return Err(busy_error()),
                State::CandidatesReady {
                    candidates,
                    start,
                    end,
                } => {
                    let candidate = candidates
                        .get(index)
                        .cloned()
                        .ok_or_else(|| validation_error("no such itinerary"))?;

                    (candidate, start.clone(), end.clone())
                }
                _ => return Err(invalid_state_error()),
            };

            inner.seq += 1;
            let seq = inner.seq;
            inner.state = State::Loading { seq };

            (candidate, start, end, seq)
        };

        let params = LoadParams {
            user_id: credentials.user_id.clone(),
            start_location: start,
            end_location: end,
            selected_itinerary: SelectedItinerary {
                duration: candidate.duration,
                distance: candidate.distance,
                toll_free: candidate.toll_free,
                steps: candidate.steps.clone(),
                route_points: sample_route_points(&candidate.route_points),
            },
        };

        let result = self.api.load_itinerary(params).await;

        let mut inner = self.lock();

        if !matches!(inner.state, State::Loading { seq: s } if s == seq) {
            return Ok(LoadOutcome::Superseded);
        }

        match result {
            Ok(itinerary) => {
                inner.state = State::Confirmed {
                    itinerary: itinerary.clone(),
                };
                Ok(LoadOutcome::Confirmed(itinerary))
            }
            Err(err) => {
                inner.state = State::Failed {
                    message: err.message.clone(),
                };
                Err(err)
            }
        }
    }
}
