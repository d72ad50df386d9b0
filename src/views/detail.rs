// Detail view - one operator, its quarterly expenses and aggregates

use std::fmt::Write;

use anyhow::{Context, Result};

use crate::api::{Despesa, EstatisticaOperadora, Operadora, OperadorasApi};
use crate::cnpj;
use crate::util::format_brl;

/// Fetch and render an operator by CNPJ
///
/// The operator itself must load; expenses and aggregates are fetched
/// concurrently afterwards and degrade to a notice when they fail.
pub async fn render_detail<A: OperadorasApi>(api: A, raw_cnpj: &str) -> Result<String> {
    if !cnpj::is_valid(raw_cnpj) {
        tracing::warn!("CNPJ {} has invalid check digits", raw_cnpj);
    }

    let operadora = api
        .get_operadora(raw_cnpj)
        .await
        .with_context(|| format!("Failed to load operadora {}", raw_cnpj))?;

    let (despesas, estatisticas) = tokio::join!(
        api.list_despesas(&operadora.cnpj),
        api.estatisticas_operadora(&operadora.cnpj)
    );

    let despesas = despesas
        .inspect_err(|e| tracing::warn!("Despesas unavailable for {}: {}", operadora.cnpj, e))
        .ok();
    let estatisticas = estatisticas
        .inspect_err(|e| tracing::warn!("Estatisticas unavailable for {}: {}", operadora.cnpj, e))
        .ok();

    Ok(format_detail(
        &operadora,
        despesas.as_deref(),
        estatisticas.as_ref(),
    ))
}

fn field(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "{:<18}{}", format!("{}:", label), value);
}

fn format_detail(
    op: &Operadora,
    despesas: Option<&[Despesa]>,
    estatisticas: Option<&EstatisticaOperadora>,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}\n", op.display_name());
    field(&mut out, "Razão social", &op.razao_social);
    field(&mut out, "CNPJ", &cnpj::format(&op.cnpj));
    if let Some(registro) = op.registro_ans {
        field(&mut out, "Registro ANS", &registro.to_string());
    }
    field(&mut out, "UF", &op.uf);
    if let Some(modalidade) = &op.modalidade {
        field(&mut out, "Modalidade", modalidade);
    }
    if let Some(date) = op.registration_date() {
        field(&mut out, "Data de registro", &date.format("%d/%m/%Y").to_string());
    }

    out.push_str("\nDespesas\n");
    match despesas {
        None => out.push_str("  Não foi possível carregar as despesas.\n"),
        Some([]) => out.push_str("  Nenhuma despesa registrada.\n"),
        Some(despesas) => {
            for d in despesas {
                let _ = writeln!(out, "  {}T{}  {:>22}", d.trimestre, d.ano, format_brl(d.valor));
            }
        }
    }

    out.push_str("\nEstatísticas\n");
    match estatisticas {
        None => out.push_str("  Não foi possível carregar as estatísticas.\n"),
        Some(stats) => {
            field(&mut out, "  Total", &format_brl(stats.total_despesas));
            field(&mut out, "  Média", &format_brl(stats.media_despesas));
            field(&mut out, "  Desvio padrão", &format_brl(stats.desvio_padrao));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{despesa, operadora, MockApi};
    use crate::api::ApiError;

    const CNPJ: &str = "11222333000181";

    fn api() -> MockApi {
        MockApi::new().with_page(1, vec![operadora(1, CNPJ, "ACME SAUDE LTDA")], 1)
    }

    #[tokio::test]
    async fn test_detail_renders_operator_and_expenses() {
        let api = api().with_despesas(
            CNPJ,
            vec![despesa(2023, 1, 1000.0), despesa(2023, 2, 3000.0)],
        );

        let out = render_detail(&api, CNPJ).await.unwrap();
        assert!(out.starts_with("ACME SAUDE LTDA\n"));
        assert!(out.contains("11.222.333/0001-81"));
        assert!(out.contains("01/01/2000"));
        assert!(out.contains("1T2023"));
        assert!(out.contains("R$ 3.000,00"));
        // Mean of the two quarters
        assert!(out.contains("R$ 2.000,00"));
        assert_eq!(api.despesas_calls(), vec![CNPJ.to_string()]);
    }

    #[tokio::test]
    async fn test_detail_without_expenses() {
        let out = render_detail(&api(), CNPJ).await.unwrap();
        assert!(out.contains("Nenhuma despesa registrada."));
    }

    #[tokio::test]
    async fn test_detail_degrades_when_expenses_fail() {
        let api = api().with_despesas_error(CNPJ, ApiError::Network("timeout".into()));

        let out = render_detail(&api, CNPJ).await.unwrap();
        assert!(out.contains("Não foi possível carregar as despesas."));
        assert!(out.contains("Total"));
    }

    #[tokio::test]
    async fn test_detail_missing_operator_is_an_error() {
        let err = render_detail(&api(), "00000000000000").await.unwrap_err();
        assert!(err.to_string().contains("00000000000000"));

        let api_err = err.downcast_ref::<ApiError>().unwrap();
        assert!(api_err.is_not_found());
    }
}
