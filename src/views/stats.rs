// Stats view - global expense statistics

use std::fmt::Write;

use anyhow::{Context, Result};

use crate::api::{EstatisticasGlobais, OperadorasApi};
use crate::cnpj;
use crate::util::{format_brl, truncate_chars};

pub async fn render_stats<A: OperadorasApi>(api: A) -> Result<String> {
    let stats = api
        .estatisticas_globais()
        .await
        .context("Failed to load estatisticas")?;
    Ok(format_stats(&stats))
}

pub fn format_stats(stats: &EstatisticasGlobais) -> String {
    let mut out = String::new();

    out.push_str("Estatísticas gerais\n\n");
    let _ = writeln!(out, "Total de despesas:  {}", format_brl(stats.total_despesas));
    let _ = writeln!(out, "Média por registro: {}", format_brl(stats.media_despesas));

    out.push_str("\nTop 5 operadoras\n");
    if stats.top_5_operadoras.is_empty() {
        out.push_str("  (sem dados)\n");
    }
    for (i, op) in stats.top_5_operadoras.iter().take(5).enumerate() {
        let _ = writeln!(
            out,
            "  {}. {:<40}  {:<18}  {:>22}",
            i + 1,
            truncate_chars(&op.razao_social, 40),
            cnpj::format(&op.cnpj),
            format_brl(op.total_despesas)
        );
    }

    if !stats.despesas_por_uf.is_empty() {
        out.push_str("\nDespesas por UF\n");
        let mut por_uf: Vec<_> = stats.despesas_por_uf.iter().collect();
        por_uf.sort_by(|a, b| b.total.total_cmp(&a.total));
        for uf in por_uf {
            let _ = writeln!(out, "  {:<2}  {:>22}", uf.uf, format_brl(uf.total));
        }
    }

    out
}
