//! # User search pipeline
//!
//! [`SearchPipeline`] owns the search term, the last validated result set and the
//! user-facing status message. The UI drives it with three kinds of events and
//! performs the timer and the HTTP call itself:
//!
//! 1. **Keystroke:** [`set_term`](SearchPipeline::set_term) stores the raw term
//!    and, when a fetch may be needed, returns a [`DebounceToken`].
//! 2. **Quiet period over:** after [`DEBOUNCE_INTERVAL`] the UI hands the token
//!    back to [`debounce_elapsed`](SearchPipeline::debounce_elapsed). A token that
//!    was superseded by a later keystroke yields nothing; otherwise a
//!    [`FetchTicket`] is issued and the pipeline enters `Loading`.
//! 3. **Fetch finished:** [`resolve`](SearchPipeline::resolve) applies the
//!    result only when the ticket is the latest one issued *and* its term is still
//!    the current term. Results of superseded requests are discarded, so a slow
//!    response can never overwrite a newer search.
//!
//! ## Phases
//!
//! | Phase | Term | Meaning |
//! |-------|------|---------|
//! | `Idle` | empty | prompt shown, no results |
//! | `Pending` | non-empty | waiting for the quiet period |
//! | `Loading` | non-empty | fetch in flight |
//! | `Settled` | non-empty | found / empty / failed |
//!
//! A term whose search succeeded is remembered; typing or submitting it again
//! does not issue another request. Failed terms are not remembered, so the user
//! retries by resubmitting.
//!
//! Term and results are persisted under [`SEARCH_STATE_KEY`] (session scope).

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::UserProfile;
use crate::persist::{PersistedStore, StateStorage, SEARCH_STATE_KEY};

/// Quiet period after the last keystroke before a search is issued.
pub const DEBOUNCE_INTERVAL: Duration = Duration::from_millis(500);

pub const PROMPT_MESSAGE: &str = "نام و نام خانوادگی را برای سرچ وارد کنید";
pub const SEARCHING_MESSAGE: &str = "در حال جست و جو...";
pub const NO_USERS_MESSAGE: &str = "هیچ کاربری یافت نشد.";
pub const INVALID_FORMAT_MESSAGE: &str = "فرمت داده نامعتبر از سرور دریافت شد.";

/// Persisted part of the search page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    pub search_term: String,
    pub search_results: Option<Vec<UserProfile>>,
    /// Trimmed term the held results were fetched for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results_term: Option<String>,
}

/// Why a search attempt failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SearchFailure {
    /// The response body did not validate as a list of user profiles.
    #[error("{}", INVALID_FORMAT_MESSAGE)]
    InvalidFormat,
    /// Transport or HTTP failure, with the message to show.
    #[error("{0}")]
    Request(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(usize),
    Empty,
    Failed(SearchFailure),
}

impl SearchOutcome {
    fn for_count(count: usize) -> Self {
        if count == 0 {
            SearchOutcome::Empty
        } else {
            SearchOutcome::Found(count)
        }
    }

    fn message(&self) -> String {
        match self {
            SearchOutcome::Found(n) => format!("{n} کاربر پیدا شد."),
            SearchOutcome::Empty => NO_USERS_MESSAGE.to_string(),
            SearchOutcome::Failed(failure) => format!("جست و جو ناموفق بود: {failure}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Pending,
    Loading,
    Settled(SearchOutcome),
}

/// Identifies one keystroke's debounce timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebounceToken(u64);

/// Identifies one issued fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    term: String,
}

impl FetchTicket {
    /// The trimmed term to search for.
    pub fn term(&self) -> &str {
        &self.term
    }
}

#[derive(Debug)]
pub struct SearchPipeline {
    store: PersistedStore<SearchState>,
    phase: SearchPhase,
    message: String,
    input_seq: u64,
    fetch_seq: u64,
    in_flight: Option<String>,
    /// Term whose successful results are currently held.
    settled_key: Option<String>,
}

fn normalize(term: &str) -> String {
    term.trim().to_string()
}

impl SearchPipeline {
    /// Restore the pipeline from `storage`.
    ///
    /// A stored term with its results comes back settled; any other stored term
    /// comes back pending (see [`resume`](Self::resume)).
    pub fn new(storage: Box<dyn StateStorage>) -> Self {
        let store = PersistedStore::load(SEARCH_STATE_KEY, storage);
        let mut pipeline = Self {
            store,
            phase: SearchPhase::Idle,
            message: PROMPT_MESSAGE.to_string(),
            input_seq: 0,
            fetch_seq: 0,
            in_flight: None,
            settled_key: None,
        };

        let key = pipeline.key();
        let state = pipeline.store.get();
        let restored = state
            .search_results
            .as_ref()
            .filter(|_| state.results_term.as_deref() == Some(key.as_str()))
            .map(Vec::len);
        match (key.is_empty(), restored) {
            (true, _) => pipeline.go_idle(),
            (false, Some(count)) => {
                let outcome = SearchOutcome::for_count(count);
                pipeline.message = outcome.message();
                pipeline.phase = SearchPhase::Settled(outcome);
                pipeline.settled_key = Some(key);
            }
            (false, None) => pipeline.phase = SearchPhase::Pending,
        }
        pipeline
    }

    /// Raw term as typed.
    pub fn term(&self) -> &str {
        &self.store.get().search_term
    }

    pub fn results(&self) -> Option<&[UserProfile]> {
        self.store.get().search_results.as_deref()
    }

    pub fn phase(&self) -> &SearchPhase {
        &self.phase
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SearchPhase::Loading
    }

    /// The failure of the last attempt, if it failed.
    pub fn failure(&self) -> Option<&SearchFailure> {
        match &self.phase {
            SearchPhase::Settled(SearchOutcome::Failed(failure)) => Some(failure),
            _ => None,
        }
    }

    /// Token for the debounce timer of a restored pending term.
    pub fn resume(&self) -> Option<DebounceToken> {
        (self.phase == SearchPhase::Pending).then_some(DebounceToken(self.input_seq))
    }

    /// Record a keystroke. Returns a token when a debounce timer must be started.
    pub fn set_term(&mut self, term: impl Into<String>) -> Option<DebounceToken> {
        let term = term.into();
        if term == self.term() {
            return None;
        }
        self.input_seq += 1;
        self.store.update(|s| s.search_term = term);

        let key = self.key();
        if key.is_empty() {
            self.go_idle();
            return None;
        }
        if self.settled_key.as_deref() == Some(key.as_str()) {
            self.restore_settled();
            return None;
        }
        if self.phase == SearchPhase::Loading && self.in_flight.as_deref() == Some(key.as_str()) {
            return None;
        }

        self.phase = SearchPhase::Pending;
        Some(DebounceToken(self.input_seq))
    }

    /// The quiet period for `token` is over. Returns the fetch to issue, if any.
    pub fn debounce_elapsed(&mut self, token: DebounceToken) -> Option<FetchTicket> {
        if token.0 != self.input_seq || self.phase != SearchPhase::Pending {
            return None;
        }
        self.start_fetch()
    }

    /// Explicit submit: search the current term without waiting for the timer.
    ///
    /// A fetch already in flight for the term is superseded by the new ticket.
    pub fn submit(&mut self) -> Option<FetchTicket> {
        self.input_seq += 1;
        self.start_fetch()
    }

    /// Apply the outcome of the fetch identified by `ticket`.
    ///
    /// Returns `false` when the ticket was superseded and the result was discarded.
    pub fn resolve(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<UserProfile>, SearchFailure>,
    ) -> bool {
        if ticket.seq != self.fetch_seq || ticket.term != self.key() {
            tracing::debug!(term = %ticket.term, "discarding superseded search result");
            return false;
        }
        self.in_flight = None;

        let outcome = match result {
            Ok(rows) => {
                let outcome = SearchOutcome::for_count(rows.len());
                self.store.update(|s| {
                    s.search_results = Some(rows);
                    s.results_term = Some(ticket.term.clone());
                });
                self.settled_key = Some(ticket.term);
                outcome
            }
            Err(SearchFailure::InvalidFormat) => {
                tracing::warn!(term = %ticket.term, "search response failed validation");
                self.store.update(|s| {
                    s.search_results = Some(Vec::new());
                    s.results_term = None;
                });
                self.settled_key = None;
                SearchOutcome::Failed(SearchFailure::InvalidFormat)
            }
            Err(failure) => {
                tracing::warn!(term = %ticket.term, %failure, "search request failed");
                self.store.update(|s| {
                    s.search_results = None;
                    s.results_term = None;
                });
                self.settled_key = None;
                SearchOutcome::Failed(failure)
            }
        };

        self.message = outcome.message();
        self.phase = SearchPhase::Settled(outcome);
        true
    }

    /// Give up on the fetch for `ticket` without an outcome.
    ///
    /// The term drops back to pending so [`resume`](Self::resume), a submit or
    /// the next keystroke can search it again. Returns `false` for a ticket that
    /// was already superseded.
    pub fn abandon(&mut self, ticket: &FetchTicket) -> bool {
        if ticket.seq != self.fetch_seq || self.phase != SearchPhase::Loading {
            return false;
        }
        tracing::debug!(term = %ticket.term, "search fetch abandoned");
        self.in_flight = None;
        self.phase = SearchPhase::Pending;
        self.message = PROMPT_MESSAGE.to_string();
        true
    }

    /// Clear term and results and return to idle, discarding any fetch in flight.
    pub fn clear(&mut self) {
        self.input_seq += 1;
        self.store.reset();
        self.go_idle();
    }

    /// Replace a displayed row after it was edited elsewhere.
    pub fn apply_update(&mut self, profile: &UserProfile) -> bool {
        let Some(index) = self.position_of(&profile.id) else {
            return false;
        };
        self.store.update(|s| {
            if let Some(rows) = s.search_results.as_mut() {
                rows[index] = profile.clone();
            }
        });
        true
    }

    /// Drop a displayed row after it was deleted elsewhere.
    pub fn apply_removal(&mut self, id: &str) -> bool {
        let Some(index) = self.position_of(id) else {
            return false;
        };
        self.store.update(|s| {
            if let Some(rows) = s.search_results.as_mut() {
                rows.remove(index);
            }
        });
        if self.settled_key.is_some() && matches!(self.phase, SearchPhase::Settled(_)) {
            self.restore_settled();
        }
        true
    }

    fn key(&self) -> String {
        normalize(self.term())
    }

    fn position_of(&self, id: &str) -> Option<usize> {
        self.results()?.iter().position(|row| row.id == id)
    }

    fn start_fetch(&mut self) -> Option<FetchTicket> {
        let key = self.key();
        if key.is_empty() {
            return None;
        }
        if self.settled_key.as_deref() == Some(key.as_str()) {
            self.restore_settled();
            return None;
        }

        self.fetch_seq += 1;
        self.in_flight = Some(key.clone());
        self.phase = SearchPhase::Loading;
        self.message = SEARCHING_MESSAGE.to_string();
        Some(FetchTicket {
            seq: self.fetch_seq,
            term: key,
        })
    }

    fn restore_settled(&mut self) {
        let count = self.results().map_or(0, <[UserProfile]>::len);
        let outcome = SearchOutcome::for_count(count);
        self.message = outcome.message();
        self.phase = SearchPhase::Settled(outcome);
    }

    fn go_idle(&mut self) {
        self.fetch_seq += 1;
        self.in_flight = None;
        self.settled_key = None;
        self.phase = SearchPhase::Idle;
        self.message = PROMPT_MESSAGE.to_string();
        if self.store.get().search_results.is_some() {
            self.store.update(|s| {
                s.search_results = None;
                s.results_term = None;
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_profile;
    use crate::MemoryStorage;

    fn pipeline() -> SearchPipeline {
        SearchPipeline::new(Box::new(MemoryStorage::new()))
    }

    fn two_alis() -> Vec<UserProfile> {
        vec![
            sample_profile("1", "Ali Rezaei", "Engineer"),
            sample_profile("2", "Ali Karimi", "Designer"),
        ]
    }

    #[test]
    fn test_only_last_keystroke_issues_fetch() {
        let mut p = pipeline();
        let t1 = p.set_term("A").unwrap();
        let t2 = p.set_term("Al").unwrap();
        let t3 = p.set_term("Ali").unwrap();
        assert_eq!(p.phase(), &SearchPhase::Pending);

        assert!(p.debounce_elapsed(t1).is_none());
        assert!(p.debounce_elapsed(t2).is_none());
        let ticket = p.debounce_elapsed(t3).unwrap();
        assert_eq!(ticket.term(), "Ali");
        assert!(p.is_loading());
        assert_eq!(p.message(), SEARCHING_MESSAGE);

        // A second firing of the same token does not issue again while loading.
        assert!(p.debounce_elapsed(t3).is_none());
    }

    #[test]
    fn test_found_scenario_shows_count() {
        let mut p = pipeline();
        let token = p.set_term("Ali").unwrap();
        let ticket = p.debounce_elapsed(token).unwrap();

        assert!(p.resolve(ticket, Ok(two_alis())));
        assert_eq!(p.phase(), &SearchPhase::Settled(SearchOutcome::Found(2)));
        assert_eq!(p.message(), "2 کاربر پیدا شد.");
        assert_eq!(p.results().unwrap().len(), 2);
    }

    #[test]
    fn test_blank_terms_never_fetch_and_clear_results() {
        let mut p = pipeline();
        let token = p.set_term("Ali").unwrap();
        let ticket = p.debounce_elapsed(token).unwrap();
        p.resolve(ticket, Ok(two_alis()));

        assert!(p.set_term("   ").is_none());
        assert_eq!(p.phase(), &SearchPhase::Idle);
        assert!(p.results().is_none());
        assert_eq!(p.message(), PROMPT_MESSAGE);
        assert!(p.submit().is_none());
    }

    #[test]
    fn test_same_term_after_success_does_not_refetch() {
        let mut p = pipeline();
        let token = p.set_term("Ali").unwrap();
        let ticket = p.debounce_elapsed(token).unwrap();
        p.resolve(ticket, Ok(two_alis()));

        assert!(p.set_term("Ali ").is_none());
        assert!(p.submit().is_none());

        // Typing away and back before the timer fires restores the settled view.
        let away = p.set_term("Alis").unwrap();
        assert!(p.set_term("Ali").is_none());
        assert!(p.debounce_elapsed(away).is_none());
        assert_eq!(p.phase(), &SearchPhase::Settled(SearchOutcome::Found(2)));
    }

    #[test]
    fn test_invalid_format_leaves_empty_results() {
        let mut p = pipeline();
        let token = p.set_term("Ali").unwrap();
        let ticket = p.debounce_elapsed(token).unwrap();

        assert!(p.resolve(ticket, Err(SearchFailure::InvalidFormat)));
        assert_eq!(p.results(), Some(&[][..]));
        assert_eq!(p.failure(), Some(&SearchFailure::InvalidFormat));
        assert_eq!(p.message(), format!("جست و جو ناموفق بود: {INVALID_FORMAT_MESSAGE}"));
    }

    #[test]
    fn test_request_failure_clears_results_and_allows_resubmit() {
        let mut p = pipeline();
        let token = p.set_term("Ali").unwrap();
        let ticket = p.debounce_elapsed(token).unwrap();

        p.resolve(ticket, Err(SearchFailure::Request("relation does not exist".into())));
        assert!(p.results().is_none());
        assert_eq!(p.message(), "جست و جو ناموفق بود: relation does not exist");

        let retry = p.submit().unwrap();
        assert_eq!(retry.term(), "Ali");
    }

    #[test]
    fn test_superseded_fetch_is_discarded() {
        let mut p = pipeline();
        let token = p.set_term("Al").unwrap();
        let old = p.debounce_elapsed(token).unwrap();

        let token = p.set_term("Ali").unwrap();
        let new = p.debounce_elapsed(token).unwrap();

        assert!(p.resolve(new, Ok(two_alis())));
        // The older request finishes last and must not overwrite the newer one.
        assert!(!p.resolve(old, Ok(vec![sample_profile("9", "Alborz", "Ops")])));
        assert_eq!(p.results().unwrap().len(), 2);
        assert_eq!(p.message(), "2 کاربر پیدا شد.");
    }

    #[test]
    fn test_result_for_outdated_term_is_discarded_while_pending() {
        let mut p = pipeline();
        let token = p.set_term("Al").unwrap();
        let ticket = p.debounce_elapsed(token).unwrap();

        p.set_term("Ali").unwrap();
        assert!(!p.resolve(ticket, Ok(two_alis())));
        assert_eq!(p.phase(), &SearchPhase::Pending);
        assert!(p.results().is_none());
    }

    #[test]
    fn test_clear_mid_flight_goes_idle() {
        let mut p = pipeline();
        let token = p.set_term("Ali").unwrap();
        let ticket = p.debounce_elapsed(token).unwrap();

        p.clear();
        assert_eq!(p.term(), "");
        assert_eq!(p.phase(), &SearchPhase::Idle);
        assert!(!p.resolve(ticket, Ok(two_alis())));
        assert!(p.results().is_none());
    }

    #[test]
    fn test_restores_from_session_storage() {
        let storage = MemoryStorage::new();
        {
            let mut p = SearchPipeline::new(Box::new(storage.clone()));
            let token = p.set_term("Ali").unwrap();
            let ticket = p.debounce_elapsed(token).unwrap();
            p.resolve(ticket, Ok(two_alis()));
        }

        let mut p = SearchPipeline::new(Box::new(storage.clone()));
        assert_eq!(p.term(), "Ali");
        assert_eq!(p.phase(), &SearchPhase::Settled(SearchOutcome::Found(2)));
        assert!(p.resume().is_none());
        assert!(p.submit().is_none());

        // A term persisted without its own results resumes as pending.
        p.set_term("Sara").unwrap();
        let p = SearchPipeline::new(Box::new(storage));
        assert_eq!(p.phase(), &SearchPhase::Pending);
        assert!(p.resume().is_some());
    }

    #[test]
    fn test_submit_supersedes_a_fetch_in_flight() {
        let mut p = pipeline();
        let token = p.set_term("Ali").unwrap();
        let lost = p.debounce_elapsed(token).unwrap();

        let retry = p.submit().unwrap();
        assert_eq!(retry.term(), "Ali");
        assert!(!p.resolve(lost, Ok(vec![sample_profile("9", "Alborz", "Ops")])));
        assert!(p.resolve(retry, Ok(two_alis())));
        assert_eq!(p.results().unwrap().len(), 2);
    }

    #[test]
    fn test_abandoned_fetch_can_be_searched_again() {
        let mut p = pipeline();
        let token = p.set_term("Ali").unwrap();
        let ticket = p.debounce_elapsed(token).unwrap();

        assert!(p.abandon(&ticket));
        assert_eq!(p.phase(), &SearchPhase::Pending);
        assert_eq!(p.message(), PROMPT_MESSAGE);
        assert!(!p.abandon(&ticket));

        // The restored timer, a retyped term and a submit all search again.
        let resumed = p.resume().unwrap();
        assert_eq!(p.debounce_elapsed(resumed).unwrap().term(), "Ali");
        let ticket = p.submit().unwrap();
        assert!(p.abandon(&ticket));
        let token = p.set_term("Ali ").unwrap();
        let ticket = p.debounce_elapsed(token).unwrap();
        assert!(p.resolve(ticket, Ok(two_alis())));
        assert_eq!(p.phase(), &SearchPhase::Settled(SearchOutcome::Found(2)));
    }

    #[test]
    fn test_patches_displayed_rows() {
        let mut p = pipeline();
        let token = p.set_term("Ali").unwrap();
        let ticket = p.debounce_elapsed(token).unwrap();
        p.resolve(ticket, Ok(two_alis()));

        let mut edited = two_alis().remove(0);
        edited.job_title = "Lead".to_string();
        assert!(p.apply_update(&edited));
        assert_eq!(p.results().unwrap()[0].job_title, "Lead");

        assert!(p.apply_removal("2"));
        assert_eq!(p.results().unwrap().len(), 1);
        assert_eq!(p.message(), "1 کاربر پیدا شد.");
        assert!(!p.apply_removal("404"));
    }
}
