//! Paginated operator list with incremental loading

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{lock, CancelToken, Finally, FETCH_ERROR};
use crate::api::{ListQuery, Operadora, OperadorasApi};

/// Default page size for incremental loading
pub const PAGE_SIZE: u32 = 20;

/// Observable state of an `OperadorasList`
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    /// Loaded operators, in server page order
    pub operadoras: Vec<Operadora>,
    /// Total reported by the server for the current filter
    pub total: u64,
    /// Page cursor, 1-based
    pub page: u32,
    /// Free-text filter (already trimmed)
    pub query: String,
    /// Include operators without expense records
    pub include_sem_despesas: bool,
    /// True while a request is in flight
    pub loading: bool,
    /// Last request error, cleared when the next request starts
    pub error: Option<String>,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            operadoras: Vec::new(),
            total: 0,
            page: 1,
            query: String::new(),
            include_sem_despesas: false,
            loading: false,
            error: None,
        }
    }
}

impl ListState {
    /// Whether the server has more rows than are loaded
    pub fn has_more(&self) -> bool {
        (self.operadoras.len() as u64) < self.total
    }
}

/// Operator list with replace/append fetching
///
/// Cloning gives another handle to the same state (and the same
/// cancellation token), the way several views can share one list.
///
/// Only one request runs at a time. A fetch started while another is in
/// flight returns immediately without touching state; it is not queued.
pub struct OperadorasList<A> {
    api: Arc<A>,
    state: Arc<Mutex<ListState>>,
    page_size: u32,
    cancel: CancelToken,
}

impl<A> Clone for OperadorasList<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            state: Arc::clone(&self.state),
            page_size: self.page_size,
            cancel: self.cancel.clone(),
        }
    }
}

impl<A: OperadorasApi> OperadorasList<A> {
    pub fn new(api: A) -> Self {
        Self::with_page_size(api, PAGE_SIZE)
    }

    pub fn with_page_size(api: A, page_size: u32) -> Self {
        Self {
            api: Arc::new(api),
            state: Arc::new(Mutex::new(ListState::default())),
            page_size: page_size.max(1),
            cancel: CancelToken::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    fn state(&self) -> MutexGuard<'_, ListState> {
        lock(&self.state)
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> ListState {
        self.state().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    pub fn has_more(&self) -> bool {
        self.state().has_more()
    }

    /// Toggle the server-side "without expenses" filter for subsequent fetches
    pub fn set_include_sem_despesas(&self, include: bool) {
        self.state().include_sem_despesas = include;
    }

    /// Token cancelled by `teardown`
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Detach from in-flight requests
    ///
    /// A request that completes afterwards is discarded without touching
    /// state, and later fetches return immediately.
    pub fn teardown(&self) {
        tracing::debug!("Operadoras list torn down");
        self.cancel.cancel();
    }

    /// Fetch the page at the current cursor
    ///
    /// `reset` replaces the loaded operators with the page; otherwise the
    /// page is appended. The total is overwritten either way.
    pub async fn fetch(&self, reset: bool) {
        self.fetch_if(reset, |_| true).await;
    }

    /// Start a new search
    ///
    /// The query is stored (trimmed), the cursor goes back to 1 and the
    /// loaded operators are cleared before this returns, so stale rows are
    /// gone while the first page is on its way. The returned future performs
    /// the fetch.
    pub fn reset_busca(&self, new_query: &str) -> impl Future<Output = ()> + '_ {
        {
            let mut state = self.state();
            state.query = new_query.trim().to_string();
            state.page = 1;
            state.operadoras.clear();
        }
        self.fetch(true)
    }

    /// Append the next page, if there is one and nothing is in flight
    pub async fn load_more(&self) {
        self.fetch_if(false, |state| {
            if !state.has_more() {
                return false;
            }
            state.page += 1;
            true
        })
        .await;
    }

    /// Shared request path
    ///
    /// `prepare` runs under the same lock as the in-flight check, so the
    /// cursor can only move when this call is the one issuing the request.
    async fn fetch_if(&self, reset: bool, prepare: impl FnOnce(&mut ListState) -> bool) {
        if self.cancel.is_cancelled() {
            return;
        }

        let query = {
            let mut state = self.state();
            if state.loading {
                tracing::debug!("Fetch skipped: request already in flight");
                return;
            }
            if !prepare(&mut state) {
                return;
            }
            state.loading = true;
            state.error = None;
            ListQuery::new(state.page, self.page_size)
                .with_query(&state.query)
                .with_include_sem_despesas(state.include_sem_despesas)
        };
        let _loading = Finally(|| lock(&self.state).loading = false);

        tracing::debug!(
            "Fetching operadoras page {} (reset: {}, q: {:?})",
            query.page,
            reset,
            query.q
        );

        let result = tokio::select! {
            biased;
            () = self.cancel.cancelled() => {
                tracing::debug!("Discarding operadoras page {}: list torn down", query.page);
                return;
            }
            result = self.api.list_operadoras(&query) => result,
        };

        let mut state = self.state();
        match result {
            Ok(page) => {
                if reset {
                    state.operadoras = page.data;
                } else {
                    state.operadoras.extend(page.data);
                }
                state.total = page.total;
                tracing::debug!(
                    "Loaded {} of {} operadoras",
                    state.operadoras.len(),
                    state.total
                );
            }
            Err(err) => {
                tracing::warn!("Failed to load operadoras page {}: {}", query.page, err);
                let message = err.to_string();
                state.error = Some(if message.trim().is_empty() {
                    FETCH_ERROR.to_string()
                } else {
                    message
                });
            }
        }
    }
}
