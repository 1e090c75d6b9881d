pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod logs;
pub mod routes;
