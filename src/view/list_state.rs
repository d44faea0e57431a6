use crate::models::{PropertiesResponse, Project};
use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

/// Data a list view can hold; decides when the "No X Found" branch renders.
pub trait Listing {
    fn is_empty_listing(&self) -> bool;
}

impl<T> Listing for Vec<T> {
    fn is_empty_listing(&self) -> bool {
        self.is_empty()
    }
}

impl Listing for PropertiesResponse {
    fn is_empty_listing(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Which late results may still update the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StalePolicy {
    /// Only the most recently requested load may land; older ones are dropped.
    #[default]
    LatestRequested,
    /// Every result is applied, so whichever resolves last wins.
    LastResolved,
}

/// Tag for one load; issued by [`ListState::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// What the view should show right now.
#[derive(Debug, PartialEq)]
pub enum ListView<'a, T> {
    Loading,
    Failed(&'a str),
    Empty,
    Ready(&'a T),
}

/// Load / success / error / empty state for one data source on a page.
#[derive(Debug)]
pub struct ListState<T> {
    data: Option<T>,
    loading: bool,
    error: Option<String>,
    failure_message: String,
    policy: StalePolicy,
    issued: u64,
    applied: Option<u64>,
}

impl<T: Listing> ListState<T> {
    /// `failure_message` is what the page shows when a load fails.
    pub fn new(failure_message: impl Into<String>) -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            failure_message: failure_message.into(),
            policy: StalePolicy::default(),
            issued: 0,
            applied: None,
        }
    }

    pub fn with_policy(mut self, policy: StalePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> StalePolicy {
        self.policy
    }

    /// Enter the loading state for a new request.
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        self.loading = true;
        self.error = None;
        Ticket(self.issued)
    }

    pub fn latest_ticket(&self) -> Option<Ticket> {
        (self.issued > 0).then_some(Ticket(self.issued))
    }

    /// Settle a request. Returns `false` when the result was discarded as stale.
    pub fn resolve<E: Display>(&mut self, ticket: Ticket, result: Result<T, E>) -> bool {
        if self.policy == StalePolicy::LatestRequested && ticket.0 < self.issued {
            debug!(
                ticket = ticket.0,
                latest = self.issued,
                "Discarding stale list response"
            );
            return false;
        }

        // Under LastResolved a newer request may still be outstanding.
        let newest_landed = self.applied.is_some_and(|applied| applied == self.issued);
        self.loading = ticket.0 < self.issued && !newest_landed;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(err) => {
                warn!(ticket = ticket.0, error = %err, "List load failed");
                self.error = Some(self.failure_message.clone());
            }
        }
        self.applied = Some(ticket.0);
        true
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Sequence number of the request whose result is on screen
    pub fn applied_ticket(&self) -> Option<Ticket> {
        self.applied.map(Ticket)
    }

    pub fn view(&self) -> ListView<'_, T> {
        if self.loading {
            return ListView::Loading;
        }
        if let Some(message) = &self.error {
            return ListView::Failed(message);
        }
        match &self.data {
            Some(data) if !data.is_empty_listing() => ListView::Ready(data),
            Some(_) => ListView::Empty,
            None => ListView::Loading,
        }
    }
}

/// Shared handle to a [`ListState`] so loads can run as independent tasks.
#[derive(Debug)]
pub struct ListController<T> {
    state: Arc<Mutex<ListState<T>>>,
}

impl<T> Clone for ListController<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Listing> ListController<T> {
    pub fn new(state: ListState<T>) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Run one load. The lock is only held to begin and to resolve.
    pub async fn load<Fut, E>(&self, fetch: Fut) -> bool
    where
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let ticket = self.begin();
        let result = fetch.await;
        self.resolve(ticket, result)
    }

    pub fn begin(&self) -> Ticket {
        self.lock().begin()
    }

    pub fn resolve<E: Display>(&self, ticket: Ticket, result: Result<T, E>) -> bool {
        self.lock().resolve(ticket, result)
    }

    /// Inspect the current state.
    pub fn with<R>(&self, f: impl FnOnce(&ListState<T>) -> R) -> R {
        f(&self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, ListState<T>> {
        // State stays consistent even if a holder panicked mid-render.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Shorthand for the two list kinds the pages use
pub type ProjectList = ListController<Vec<Project>>;
pub type PropertyList = ListController<PropertiesResponse>;
