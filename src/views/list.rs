// List view - operator table with incremental loading

use std::fmt::Write;

use crate::api::{Operadora, OperadorasApi};
use crate::cnpj;
use crate::operadoras::{
    LegacyOperadoras, LegacyState, ListState, OperadorasList, LEGACY_PAGE_SIZE, PAGE_SIZE,
};
use crate::util::truncate_chars;

const NAME_WIDTH: usize = 44;
const MODALIDADE_WIDTH: usize = 24;

/// Inputs for the list view
#[derive(Debug, Clone, PartialEq)]
pub struct ListOptions {
    /// Free-text search (name or CNPJ)
    pub query: String,
    pub include_sem_despesas: bool,
    /// Pages to load before rendering
    pub pages: u32,
    pub page_size: u32,
    /// Use the per-row expense lookup instead of the server-side filter
    pub legacy: bool,
    pub legacy_page_size: u32,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            query: String::new(),
            include_sem_despesas: false,
            pages: 1,
            page_size: PAGE_SIZE,
            legacy: false,
            legacy_page_size: LEGACY_PAGE_SIZE,
        }
    }
}

/// Search, then keep loading pages the way scrolling would
pub async fn render_list<A: OperadorasApi>(api: A, options: &ListOptions) -> String {
    let list = OperadorasList::with_page_size(api, options.page_size);
    list.set_include_sem_despesas(options.include_sem_despesas);
    list.reset_busca(&options.query).await;

    for _ in 1..options.pages.max(1) {
        if !list.has_more() || list.snapshot().error.is_some() {
            break;
        }
        list.load_more().await;
    }

    let state = list.snapshot();
    list.teardown();
    format_list(&state)
}

/// First page through the legacy loader
pub async fn render_legacy_list<A: OperadorasApi>(api: A, options: &ListOptions) -> String {
    let list = LegacyOperadoras::new(api);
    list.fetch_operadoras(1, options.legacy_page_size, &options.query)
        .await;
    format_legacy_list(&list.snapshot())
}

fn header(out: &mut String, marker: bool) {
    let _ = writeln!(
        out,
        "{}{:<20}  {:<name$}  {:<2}  {}",
        if marker { "  " } else { "" },
        "CNPJ",
        "RAZÃO SOCIAL",
        "UF",
        "MODALIDADE",
        name = NAME_WIDTH
    );
}

fn row(out: &mut String, op: &Operadora, marker: Option<bool>) {
    let prefix = match marker {
        Some(true) => "  ",
        Some(false) => "- ",
        None => "",
    };
    let _ = writeln!(
        out,
        "{}{:<20}  {:<name$}  {:<2}  {}",
        prefix,
        cnpj::format(&op.cnpj),
        truncate_chars(&op.razao_social, NAME_WIDTH),
        op.uf,
        truncate_chars(op.modalidade.as_deref().unwrap_or("-"), MODALIDADE_WIDTH),
        name = NAME_WIDTH
    );
}

/// Render list state as a table with a summary footer
pub fn format_list(state: &ListState) -> String {
    let mut out = String::new();

    if state.operadoras.is_empty() {
        if state.error.is_none() {
            out.push_str("Nenhuma operadora encontrada.\n");
        }
    } else {
        header(&mut out, false);
        for op in &state.operadoras {
            row(&mut out, op, None);
        }
        out.push('\n');
        let _ = write!(
            out,
            "Mostrando {} de {} operadoras",
            state.operadoras.len(),
            state.total
        );
        if !state.query.is_empty() {
            let _ = write!(out, " (busca: \"{}\")", state.query);
        }
        out.push('\n');
        if state.has_more() {
            out.push_str("Use --pages para carregar mais.\n");
        }
    }

    if let Some(error) = &state.error {
        let _ = writeln!(out, "Erro: {}", error);
    }
    out
}

/// Legacy rows, with `-` marking operators without expense records
pub fn format_legacy_list(state: &LegacyState) -> String {
    let mut out = String::new();

    if let Some(error) = &state.error {
        let _ = writeln!(out, "Erro: {}", error);
        return out;
    }
    if state.operadoras.is_empty() {
        out.push_str("Nenhuma operadora encontrada.\n");
        return out;
    }

    header(&mut out, true);
    for item in &state.operadoras {
        row(&mut out, &item.operadora, Some(item.tem_despesas));
    }
    let sem_despesas = state.operadoras.iter().filter(|o| !o.tem_despesas).count();
    let _ = writeln!(
        out,
        "\nMostrando {} de {} operadoras ({} sem despesas)",
        state.operadoras.len(),
        state.total,
        sem_despesas
    );
    out
}
