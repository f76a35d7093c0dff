//! HTTP API: routing and request/response mapping over the auth core.

pub mod app;
pub mod authz;
pub mod config;
pub mod context;
pub mod middleware;
