// Router - maps URL paths to views
//
// Three static routes, matched segment by segment:
// - /                   -> operator list
// - /operadoras/:cnpj   -> operator detail ("operadora-detalhe")
// - /estatisticas       -> global statistics
//
// There are no redirects, guards or fallbacks. An unmatched path resolves to
// `None` and the caller decides what to show.

use std::collections::HashMap;
use std::fmt;

/// View a route renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    OperadorasList,
    OperadoraDetalhe,
    Estatisticas,
}

/// One entry of the route table
#[derive(Debug, Clone, Copy)]
pub struct RouteRecord {
    /// Path pattern; segments starting with `:` capture a parameter
    pub path: &'static str,
    pub name: Option<&'static str>,
    pub view: ViewKind,
    /// Pass captured parameters to the view as inputs
    pub props: bool,
}

/// The application's route table
pub const ROUTES: &[RouteRecord] = &[
    RouteRecord {
        path: "/",
        name: None,
        view: ViewKind::OperadorasList,
        props: false,
    },
    RouteRecord {
        path: "/operadoras/:cnpj",
        name: Some("operadora-detalhe"),
        view: ViewKind::OperadoraDetalhe,
        props: true,
    },
    RouteRecord {
        path: "/estatisticas",
        name: None,
        view: ViewKind::Estatisticas,
        props: false,
    },
];

/// A resolved route with its inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    OperadorasList,
    OperadoraDetalhe { cnpj: String },
    Estatisticas,
}

impl Route {
    pub fn view(&self) -> ViewKind {
        match self {
            Route::OperadorasList => ViewKind::OperadorasList,
            Route::OperadoraDetalhe { .. } => ViewKind::OperadoraDetalhe,
            Route::Estatisticas => ViewKind::Estatisticas,
        }
    }

    /// Path that resolves back to this route
    pub fn path(&self) -> String {
        match self {
            Route::OperadorasList => "/".to_string(),
            Route::OperadoraDetalhe { cnpj } => format!("/operadoras/{}", cnpj),
            Route::Estatisticas => "/estatisticas".to_string(),
        }
    }

    /// Route with the given name, if any
    pub fn by_name(name: &str, params: &HashMap<String, String>) -> Option<Self> {
        let record = ROUTES.iter().find(|r| r.name == Some(name))?;
        Self::from_record(record, params)
    }

    fn from_record(record: &RouteRecord, params: &HashMap<String, String>) -> Option<Self> {
        match record.view {
            ViewKind::OperadorasList => Some(Route::OperadorasList),
            ViewKind::OperadoraDetalhe => Some(Route::OperadoraDetalhe {
                cnpj: params.get("cnpj")?.clone(),
            }),
            ViewKind::Estatisticas => Some(Route::Estatisticas),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Resolves paths against a route table
#[derive(Debug, Clone)]
pub struct Router {
    routes: &'static [RouteRecord],
}

impl Default for Router {
    fn default() -> Self {
        Self::new(ROUTES)
    }
}

impl Router {
    pub fn new(routes: &'static [RouteRecord]) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &'static [RouteRecord] {
        self.routes
    }

    /// First record matching `path`, with captured parameters
    ///
    /// Query string and fragment are ignored, as is a trailing slash.
    pub fn match_path(&self, path: &str) -> Option<(&'static RouteRecord, HashMap<String, String>)> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments = split_segments(path);

        self.routes.iter().find_map(|record| {
            let pattern = split_segments(record.path);
            if pattern.len() != segments.len() {
                return None;
            }

            let mut params = HashMap::new();
            for (expected, actual) in pattern.iter().zip(&segments) {
                match expected.strip_prefix(':') {
                    Some(name) => {
                        params.insert(name.to_string(), (*actual).to_string());
                    }
                    None if expected == actual => {}
                    None => return None,
                }
            }
            Some((record, params))
        })
    }

    /// Resolve `path` to a route
    pub fn resolve(&self, path: &str) -> Option<Route> {
        let (record, params) = self.match_path(path)?;
        let params = if record.props { params } else { HashMap::new() };
        Route::from_record(record, &params)
    }
}

fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
