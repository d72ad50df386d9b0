// Views module - text rendering for each route
//
// Each view corresponds to one route in the router:
// - List: paginated operator list (current or legacy loader)
// - Detail: one operator with its quarterly expenses and aggregates
// - Stats: global expense statistics
//
// Views return the rendered text; printing is the caller's job.

mod detail;
mod list;
mod stats;

pub use detail::render_detail;
pub use list::{format_legacy_list, format_list, render_legacy_list, render_list, ListOptions};
pub use stats::{format_stats, render_stats};

use anyhow::Result;

use crate::api::OperadorasApi;
use crate::router::Route;

/// Render the view for a resolved route
///
/// `list` only applies to the list route; the router itself carries no
/// search state.
pub async fn render<A: OperadorasApi>(route: &Route, api: &A, list: &ListOptions) -> Result<String> {
    tracing::debug!("Rendering view for {}", route);

    match route {
        Route::OperadorasList if list.legacy => Ok(render_legacy_list(api, list).await),
        Route::OperadorasList => Ok(render_list(api, list).await),
        Route::OperadoraDetalhe { cnpj } => render_detail(api, cnpj).await,
        Route::Estatisticas => render_stats(api).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{despesa, operadora, MockApi};
    use crate::router::Router;

    fn api() -> MockApi {
        MockApi::new()
            .with_page(1, vec![operadora(1, "11222333000181", "ACME SAUDE LTDA")], 1)
            .with_despesas("11222333000181", vec![despesa(2023, 1, 1500.0)])
    }

    #[tokio::test]
    async fn test_render_dispatches_list() {
        let route = Router::default().resolve("/").unwrap();
        let out = render(&route, &api(), &ListOptions::default()).await.unwrap();
        assert!(out.contains("ACME SAUDE LTDA"));
        assert!(out.contains("1 de 1"));
    }

    #[tokio::test]
    async fn test_render_dispatches_legacy_list() {
        let route = Router::default().resolve("/").unwrap();
        let options = ListOptions {
            legacy: true,
            ..ListOptions::default()
        };
        let api = api();
        let out = render(&route, &api, &options).await.unwrap();
        assert!(out.contains("ACME SAUDE LTDA"));
        assert_eq!(api.despesas_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_render_dispatches_detail() {
        let route = Router::default()
            .resolve("/operadoras/11222333000181")
            .unwrap();
        let out = render(&route, &api(), &ListOptions::default()).await.unwrap();
        assert!(out.contains("11.222.333/0001-81"));
        assert!(out.contains("R$ 1.500,00"));
    }

    #[tokio::test]
    async fn test_render_detail_unknown_operator_fails() {
        let route = Router::default().resolve("/operadoras/999").unwrap();
        let err = render(&route, &api(), &ListOptions::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("999"));
    }
}
