// Operadoras - client for the health plan operators API
//
// Browses operators registered with the ANS and their quarterly expense
// records through a paginated REST API.
//
// Architecture:
// - API (reqwest): typed access to the REST endpoints behind a trait
// - Operadoras: list state with single-flight paginated loading
// - Router: maps paths to views
// - Views: render each route as text
// - Config/Logging: layered config file and tracing setup

pub mod api;
pub mod cnpj;
pub mod config;
pub mod logging;
pub mod operadoras;
pub mod router;
pub mod util;
pub mod views;
