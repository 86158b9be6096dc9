//! Configuration management.
//!
//! Supports loading configuration from:
//! - Configuration files (config/default.toml, config/local.toml)
//! - Environment variables (prefixed with APP__)
//! - Default values

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    pub database: DatabaseConfig,

    #[serde(default)]
    pub gemini: GeminiConfig,

    #[serde(default)]
    pub pubmed: PubMedConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Whole-request timeout applied at the router
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    /// API key; the literal "mock" selects the in-process mock extractor
    #[serde(default = "default_gemini_api_key")]
    pub api_key: String,

    #[serde(default = "default_gemini_model")]
    pub model: String,

    #[serde(default = "default_gemini_api_base")]
    pub api_base: String,

    /// Bounded timeout for the extraction call; upstream specifies none
    #[serde(default = "default_gemini_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PubMedConfig {
    #[serde(default = "default_pubmed_base")]
    pub base_url: String,

    #[serde(default = "default_pubmed_timeout")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    60
}
fn default_max_connections() -> u32 {
    20
}
fn default_min_connections() -> u32 {
    2
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_gemini_api_key() -> String {
    "mock".to_string()
}
fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}
fn default_gemini_api_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}
fn default_gemini_timeout() -> u64 {
    30
}
fn default_pubmed_base() -> String {
    "https://pubmed.ncbi.nlm.nih.gov".to_string()
}
fn default_pubmed_timeout() -> u64 {
    15
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: default_gemini_api_key(),
            model: default_gemini_model(),
            api_base: default_gemini_api_base(),
            timeout_secs: default_gemini_timeout(),
        }
    }
}

impl Default for PubMedConfig {
    fn default() -> Self {
        Self {
            base_url: default_pubmed_base(),
            timeout_secs: default_pubmed_timeout(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("database.url", "postgres://localhost/phytomine")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g. APP__SERVER__PORT=8081
            .add_source(Environment::with_prefix("APP").separator("__").try_parsing(true))
            .build()?;

        config.try_deserialize()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sections() {
        let server = ServerConfig::default();
        assert_eq!(server.port, 8080);

        let gemini = GeminiConfig::default();
        assert_eq!(gemini.model, "gemini-2.5-flash");
        assert_eq!(gemini.api_key, "mock");
        assert_eq!(gemini.timeout_secs, 30);

        let pubmed = PubMedConfig::default();
        assert_eq!(pubmed.base_url, "https://pubmed.ncbi.nlm.nih.gov");
    }
}
