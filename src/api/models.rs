// API data models
//
// Mirrors the JSON the operadoras backend returns. Optional fields use
// `#[serde(default)]` so older or partial payloads still deserialize.

use serde::{Deserialize, Serialize};

/// A health-insurance operator record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operadora {
    pub id_operadora: i64,
    /// Tax registration number, the primary lookup key
    pub cnpj: String,
    /// Legal name
    pub razao_social: String,
    /// State code
    pub uf: String,
    /// Trade name
    #[serde(default)]
    pub nome_fantasia: Option<String>,
    /// Regulatory registration number
    #[serde(default)]
    pub registro_ans: Option<i64>,
    /// Category ("Cooperativa Médica", "Medicina de Grupo", ...)
    #[serde(default)]
    pub modalidade: Option<String>,
    /// Registration date as sent by the server (empty when unknown)
    #[serde(default)]
    pub data_registro_ans: Option<String>,
}

impl Operadora {
    /// Trade name when present, legal name otherwise
    pub fn display_name(&self) -> &str {
        self.nome_fantasia
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.razao_social)
    }

    /// Registration date parsed as a calendar date
    pub fn registration_date(&self) -> Option<chrono::NaiveDate> {
        let raw = self.data_registro_ans.as_deref()?.trim();
        // Server sends either a plain date or a full timestamp
        let date_part = raw.get(..10).unwrap_or(raw);
        chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }
}

/// One quarter of expenses for an operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Despesa {
    pub ano: i32,
    pub trimestre: u8,
    pub valor: f64,
}

/// A page of operators plus the filtered total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedOperadoras {
    pub data: Vec<Operadora>,
    pub total: u64,
    /// Echoed by the server, not required
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Query parameters for `GET /operadoras`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    /// Omitted from the request when empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Only sent by the current list; the legacy list never set it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_sem_despesas: Option<bool>,
}

impl ListQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            q: None,
            include_sem_despesas: None,
        }
    }

    /// Set the free-text filter; blank input clears it
    pub fn with_query(mut self, q: &str) -> Self {
        let q = q.trim();
        self.q = (!q.is_empty()).then(|| q.to_string());
        self
    }

    pub fn with_include_sem_despesas(mut self, include: bool) -> Self {
        self.include_sem_despesas = Some(include);
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Statistics
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopOperadora {
    pub id_operadora: i64,
    pub cnpj: String,
    pub razao_social: String,
    pub total_despesas: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DespesaPorUf {
    pub uf: String,
    pub total: f64,
}

/// Aggregates across every operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstatisticasGlobais {
    pub total_despesas: f64,
    pub media_despesas: f64,
    pub top_5_operadoras: Vec<TopOperadora>,
    /// Added to the backend later; absent on older deployments
    #[serde(default)]
    pub despesas_por_uf: Vec<DespesaPorUf>,
}

/// Aggregates for a single operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstatisticaOperadora {
    pub id_operadora: i64,
    pub cnpj: String,
    pub razao_social: String,
    pub total_despesas: f64,
    pub media_despesas: f64,
    pub desvio_padrao: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_paginated_response() {
        let json = r#"{
            "data": [{
                "id_operadora": 1,
                "registro_ans": 123456,
                "cnpj": "11222333000181",
                "razao_social": "ACME SAUDE LTDA",
                "nome_fantasia": null,
                "modalidade": "Medicina de Grupo",
                "uf": "SP",
                "data_registro_ans": "1999-05-17"
            }],
            "total": 42,
            "page": 1,
            "limit": 20
        }"#;

        let page: PaginatedOperadoras = serde_json::from_str(json).unwrap();
        assert_eq!(page.total, 42);
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].registro_ans, Some(123456));
        assert_eq!(page.data[0].display_name(), "ACME SAUDE LTDA");
    }

    #[test]
    fn test_parse_minimal_operadora() {
        // Only the required fields; page/limit echo missing
        let json = r#"{"data": [{"id_operadora": 7, "cnpj": "1", "razao_social": "X", "uf": "RJ"}], "total": 1}"#;
        let page: PaginatedOperadoras = serde_json::from_str(json).unwrap();
        assert_eq!(page.page, None);
        assert_eq!(page.data[0].modalidade, None);
    }

    #[test]
    fn test_registration_date() {
        let mut op: Operadora = serde_json::from_str(
            r#"{"id_operadora": 1, "cnpj": "1", "razao_social": "X", "uf": "RJ", "data_registro_ans": "2001-02-03"}"#,
        )
        .unwrap();
        assert_eq!(
            op.registration_date(),
            chrono::NaiveDate::from_ymd_opt(2001, 2, 3)
        );

        op.data_registro_ans = Some(String::new());
        assert_eq!(op.registration_date(), None);
    }

    #[test]
    fn test_display_name_prefers_trade_name() {
        let op = Operadora {
            id_operadora: 1,
            cnpj: "1".into(),
            razao_social: "ACME SAUDE LTDA".into(),
            uf: "SP".into(),
            nome_fantasia: Some("Acme".into()),
            registro_ans: None,
            modalidade: None,
            data_registro_ans: None,
        };
        assert_eq!(op.display_name(), "Acme");
    }

    #[test]
    fn test_list_query_skips_empty_filter() {
        let query = ListQuery::new(2, 20).with_query("   ");
        assert_eq!(query.q, None);

        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json, serde_json::json!({"page": 2, "limit": 20}));
    }

    #[test]
    fn test_list_query_trims_filter() {
        let query = ListQuery::new(1, 20)
            .with_query("  unimed ")
            .with_include_sem_despesas(true);
        assert_eq!(query.q.as_deref(), Some("unimed"));
        assert_eq!(query.include_sem_despesas, Some(true));
    }

    #[test]
    fn test_estatisticas_without_uf_breakdown() {
        let json = r#"{"total_despesas": 10.5, "media_despesas": 2.0, "top_5_operadoras": []}"#;
        let stats: EstatisticasGlobais = serde_json::from_str(json).unwrap();
        assert!(stats.despesas_por_uf.is_empty());
    }
}
