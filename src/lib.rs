//! Phytomine: plant-compound interaction mining service.
//!
//! Accepts scientific article abstracts, runs them through a generative
//! extraction model, persists the extracted plant/compound/effect
//! relationships, and serves a paginated, filterable catalog with CSV export.
//! A companion module scrapes PubMed result pages for candidate articles.

pub mod config;
pub mod db;
pub mod errors;
pub mod llm;
pub mod pubmed;
pub mod routes;
pub mod services;

pub use errors::{AppError, Result};

/// Application version, reported at startup.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
