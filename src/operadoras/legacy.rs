//! First-generation operator list
//!
//! Loads a single page and then checks every operator for expense records
//! with its own request. Request count grows with the page size; the
//! current `OperadorasList` pushes that decision to the server through
//! `include_sem_despesas` instead.

use std::sync::{Mutex, MutexGuard};

use futures::future::join_all;

use super::{lock, Finally, FETCH_ERROR};
use crate::api::{ListQuery, Operadora, OperadorasApi};

/// Page size the legacy list requested by default
pub const LEGACY_PAGE_SIZE: u32 = 50;

/// An operator annotated with whether it has any expense records
#[derive(Debug, Clone, PartialEq)]
pub struct OperadoraComDespesas {
    pub operadora: Operadora,
    pub tem_despesas: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyState {
    pub operadoras: Vec<OperadoraComDespesas>,
    pub total: u64,
    pub loading: bool,
    pub error: Option<String>,
}

/// Single-page operator list with per-row expense lookup
pub struct LegacyOperadoras<A> {
    api: A,
    state: Mutex<LegacyState>,
}

impl<A: OperadorasApi> LegacyOperadoras<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Mutex::new(LegacyState::default()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn state(&self) -> MutexGuard<'_, LegacyState> {
        lock(&self.state)
    }

    pub fn snapshot(&self) -> LegacyState {
        self.state().clone()
    }

    /// Load one page and annotate each operator with `tem_despesas`
    ///
    /// There is no in-flight guard: overlapping calls each run to completion
    /// and the last one to finish wins. A failed expense lookup marks that
    /// operator as having no expenses; only a failed page load sets `error`.
    pub async fn fetch_operadoras(&self, page: u32, limit: u32, q: &str) {
        {
            let mut state = self.state();
            state.loading = true;
            state.error = None;
        }
        let _loading = Finally(|| lock(&self.state).loading = false);

        let query = ListQuery::new(page.max(1), limit.max(1)).with_query(q);
        let page = match self.api.list_operadoras(&query).await {
            Ok(page) => page,
            Err(err) => {
                tracing::warn!("Failed to load operadoras page {}: {}", query.page, err);
                self.state().error = Some(FETCH_ERROR.to_string());
                return;
            }
        };

        let operadoras = self.with_despesas(page.data).await;

        let mut state = self.state();
        state.operadoras = operadoras;
        state.total = page.total;
    }

    /// Look up expenses for every operator concurrently
    ///
    /// Waits for all lookups; one failing never cancels the others.
    async fn with_despesas(&self, operadoras: Vec<Operadora>) -> Vec<OperadoraComDespesas> {
        tracing::debug!("Checking despesas for {} operadoras", operadoras.len());

        let api = &self.api;
        join_all(operadoras.into_iter().map(|operadora| async move {
            let tem_despesas = match api.list_despesas(&operadora.cnpj).await {
                Ok(despesas) => !despesas.is_empty(),
                Err(err) => {
                    tracing::debug!("Despesas lookup failed for {}: {}", operadora.cnpj, err);
                    false
                }
            };
            OperadoraComDespesas {
                operadora,
                tem_despesas,
            }
        }))
        .await
    }
}
