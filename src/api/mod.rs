//! Operadoras API access
//!
//! `OperadorasApi` is the seam between the list state and the network.
//! `HttpClient` implements it over reqwest; tests substitute an in-memory
//! mock so pagination behaviour can be checked without a server.
//!
//! # Endpoints
//!
//! ```text
//! GET /operadoras?page&limit&q&include_sem_despesas  -> PaginatedOperadoras
//! GET /operadoras/{cnpj}                             -> Operadora
//! GET /operadoras/{cnpj}/despesas                    -> Despesa[]
//! GET /estatisticas                                  -> EstatisticasGlobais
//! GET /estatisticas/{cnpj}                           -> EstatisticaOperadora
//! ```

mod client;
mod error;
mod models;

#[cfg(test)]
pub(crate) mod mock;

pub use client::HttpClient;
pub use error::ApiError;
pub use models::{
    Despesa, DespesaPorUf, EstatisticaOperadora, EstatisticasGlobais, ListQuery, Operadora,
    PaginatedOperadoras, TopOperadora,
};

/// Read access to the operadoras backend
///
/// Futures are awaited in place (never spawned), so implementations don't
/// need to be `Send`.
#[allow(async_fn_in_trait)]
pub trait OperadorasApi {
    /// One page of operators matching the query
    async fn list_operadoras(&self, query: &ListQuery) -> Result<PaginatedOperadoras, ApiError>;

    /// A single operator by CNPJ
    async fn get_operadora(&self, cnpj: &str) -> Result<Operadora, ApiError>;

    /// Quarterly expenses for an operator, oldest first
    async fn list_despesas(&self, cnpj: &str) -> Result<Vec<Despesa>, ApiError>;

    /// Aggregates across all operators
    async fn estatisticas_globais(&self) -> Result<EstatisticasGlobais, ApiError>;

    /// Aggregates for a single operator
    async fn estatisticas_operadora(&self, cnpj: &str) -> Result<EstatisticaOperadora, ApiError>;
}

/// Borrowed clients work anywhere an owned one does
impl<T: OperadorasApi> OperadorasApi for &T {
    async fn list_operadoras(&self, query: &ListQuery) -> Result<PaginatedOperadoras, ApiError> {
        (**self).list_operadoras(query).await
    }

    async fn get_operadora(&self, cnpj: &str) -> Result<Operadora, ApiError> {
        (**self).get_operadora(cnpj).await
    }

    async fn list_despesas(&self, cnpj: &str) -> Result<Vec<Despesa>, ApiError> {
        (**self).list_despesas(cnpj).await
    }

    async fn estatisticas_globais(&self) -> Result<EstatisticasGlobais, ApiError> {
        (**self).estatisticas_globais().await
    }

    async fn estatisticas_operadora(&self, cnpj: &str) -> Result<EstatisticaOperadora, ApiError> {
        (**self).estatisticas_operadora(cnpj).await
    }
}
