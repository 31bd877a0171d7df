pub mod auth;
pub mod clients;
pub mod config;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod realtime;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod types;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;
