//! HTTP surface for the credential store and tracking-service reports.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
