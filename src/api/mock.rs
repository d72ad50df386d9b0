//! In-memory `OperadorasApi` for tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use super::{
    ApiError, Despesa, EstatisticaOperadora, EstatisticasGlobais, ListQuery, Operadora,
    OperadorasApi, PaginatedOperadoras,
};

/// Canned responses keyed by page number / CNPJ, with a request log
#[derive(Default)]
pub(crate) struct MockApi {
    pages: HashMap<u32, Result<PaginatedOperadoras, ApiError>>,
    despesas: HashMap<String, Result<Vec<Despesa>, ApiError>>,
    estatisticas: Option<EstatisticasGlobais>,
    /// When set, list requests wait for a notification before answering
    gate: Option<Arc<Notify>>,
    list_calls: Mutex<Vec<ListQuery>>,
    despesas_calls: Mutex<Vec<String>>,
}

pub(crate) fn operadora(id: i64, cnpj: &str, razao_social: &str) -> Operadora {
    Operadora {
        id_operadora: id,
        cnpj: cnpj.to_string(),
        razao_social: razao_social.to_string(),
        uf: "SP".to_string(),
        nome_fantasia: None,
        registro_ans: Some(100_000 + id),
        modalidade: Some("Medicina de Grupo".to_string()),
        data_registro_ans: Some("2000-01-01".to_string()),
    }
}

pub(crate) fn despesa(ano: i32, trimestre: u8, valor: f64) -> Despesa {
    Despesa {
        ano,
        trimestre,
        valor,
    }
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: u32, data: Vec<Operadora>, total: u64) -> Self {
        self.pages.insert(
            page,
            Ok(PaginatedOperadoras {
                data,
                total,
                page: Some(page),
                limit: None,
            }),
        );
        self
    }

    pub fn with_page_error(mut self, page: u32, err: ApiError) -> Self {
        self.pages.insert(page, Err(err));
        self
    }

    pub fn with_despesas(mut self, cnpj: &str, despesas: Vec<Despesa>) -> Self {
        self.despesas.insert(cnpj.to_string(), Ok(despesas));
        self
    }

    pub fn with_despesas_error(mut self, cnpj: &str, err: ApiError) -> Self {
        self.despesas.insert(cnpj.to_string(), Err(err));
        self
    }

    pub fn with_estatisticas(mut self, stats: EstatisticasGlobais) -> Self {
        self.estatisticas = Some(stats);
        self
    }

    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn list_calls(&self) -> Vec<ListQuery> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn despesas_calls(&self) -> Vec<String> {
        self.despesas_calls.lock().unwrap().clone()
    }

    fn find_operadora(&self, cnpj: &str) -> Option<Operadora> {
        self.pages
            .values()
            .filter_map(|p| p.as_ref().ok())
            .flat_map(|p| p.data.iter())
            .find(|op| op.cnpj == cnpj)
            .cloned()
    }
}

fn not_found() -> ApiError {
    ApiError::Status {
        status: 404,
        message: "Operadora não encontrada".to_string(),
    }
}

impl OperadorasApi for MockApi {
    async fn list_operadoras(&self, query: &ListQuery) -> Result<PaginatedOperadoras, ApiError> {
        self.list_calls.lock().unwrap().push(query.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        self.pages.get(&query.page).cloned().unwrap_or_else(|| {
            Ok(PaginatedOperadoras {
                data: Vec::new(),
                total: 0,
                page: Some(query.page),
                limit: Some(query.limit),
            })
        })
    }

    async fn get_operadora(&self, cnpj: &str) -> Result<Operadora, ApiError> {
        self.find_operadora(cnpj).ok_or_else(not_found)
    }

    async fn list_despesas(&self, cnpj: &str) -> Result<Vec<Despesa>, ApiError> {
        self.despesas_calls.lock().unwrap().push(cnpj.to_string());
        // Yield so concurrent fan-out requests actually interleave
        tokio::task::yield_now().await;
        self.despesas.get(cnpj).cloned().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn estatisticas_globais(&self) -> Result<EstatisticasGlobais, ApiError> {
        self.estatisticas.clone().ok_or_else(|| ApiError::Status {
            status: 500,
            message: "Internal Server Error".to_string(),
        })
    }

    async fn estatisticas_operadora(&self, cnpj: &str) -> Result<EstatisticaOperadora, ApiError> {
        let op = self.find_operadora(cnpj).ok_or_else(not_found)?;
        let valores: Vec<f64> = match self.despesas.get(cnpj) {
            Some(Ok(d)) => d.iter().map(|d| d.valor).collect(),
            _ => Vec::new(),
        };
        let total: f64 = valores.iter().sum();
        let media = if valores.is_empty() {
            0.0
        } else {
            total / valores.len() as f64
        };

        Ok(EstatisticaOperadora {
            id_operadora: op.id_operadora,
            cnpj: op.cnpj,
            razao_social: op.razao_social,
            total_despesas: total,
            media_despesas: media,
            desvio_padrao: 0.0,
        })
    }
}
