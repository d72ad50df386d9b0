//! reqwest-backed implementation of `OperadorasApi`

use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{
    ApiError, Despesa, EstatisticaOperadora, EstatisticasGlobais, ListQuery, Operadora,
    OperadorasApi, PaginatedOperadoras,
};
use crate::cnpj;

/// HTTP client for the operadoras API
///
/// Cheap to clone: reqwest pools connections behind an `Arc`.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpClient {
    /// Create a client rooted at `base_url` (e.g. `http://localhost:8000/api`)
    ///
    /// # Errors
    /// Returns an error if the URL cannot be parsed or the client cannot be built
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        tracing::debug!("Initialized operadoras client: {}", base_url);

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T, Q>(&self, url: Url, query: Option<&Q>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let mut request = self.client.get(url.clone());
        if let Some(query) = query {
            request = request.query(query);
        }

        tracing::debug!("GET {}", url);
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = ApiError::from_status(status.as_u16(), &body);
            tracing::warn!("GET {} failed: {}", url, err);
            return Err(err);
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Path segment for a CNPJ
///
/// Punctuated input ("12.345.678/0001-95") would otherwise put a `/` in the
/// path. The server strips non-digits anyway.
fn cnpj_segment(raw: &str) -> String {
    let digits = cnpj::normalize(raw);
    if digits.is_empty() {
        raw.to_string()
    } else {
        digits
    }
}

impl OperadorasApi for HttpClient {
    async fn list_operadoras(&self, query: &ListQuery) -> Result<PaginatedOperadoras, ApiError> {
        let url = self.endpoint(&["operadoras"])?;
        self.get_json(url, Some(query)).await
    }

    async fn get_operadora(&self, cnpj: &str) -> Result<Operadora, ApiError> {
        let segment = cnpj_segment(cnpj);
        let url = self.endpoint(&["operadoras", segment.as_str()])?;
        self.get_json::<_, ()>(url, None).await
    }

    async fn list_despesas(&self, cnpj: &str) -> Result<Vec<Despesa>, ApiError> {
        let segment = cnpj_segment(cnpj);
        let url = self.endpoint(&["operadoras", segment.as_str(), "despesas"])?;
        self.get_json::<_, ()>(url, None).await
    }

    async fn estatisticas_globais(&self) -> Result<EstatisticasGlobais, ApiError> {
        let url = self.endpoint(&["estatisticas"])?;
        self.get_json::<_, ()>(url, None).await
    }

    async fn estatisticas_operadora(&self, cnpj: &str) -> Result<EstatisticaOperadora, ApiError> {
        let segment = cnpj_segment(cnpj);
        let url = self.endpoint(&["estatisticas", segment.as_str()])?;
        self.get_json::<_, ()>(url, None).await
    }
}
