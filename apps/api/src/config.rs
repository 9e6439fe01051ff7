use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    /// Base URL of the Chroma server holding the portfolio collection.
    pub chroma_url: String,
    pub chroma_collection: String,
    pub portfolio_csv: String,
    /// Closing portfolio link appended to every email.
    pub portfolio_url: String,
    /// Name the emails are written as.
    pub sender_name: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            chroma_url: require_env("CHROMA_URL")?,
            chroma_collection: env_or("CHROMA_COLLECTION", "portfolio"),
            portfolio_csv: env_or("PORTFOLIO_CSV", "resource/portfolio_projects.csv"),
            portfolio_url: require_env("PORTFOLIO_URL")?,
            sender_name: require_env("SENDER_NAME")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
