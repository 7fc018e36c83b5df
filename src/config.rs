use anyhow::{Context, Result};

use crate::{generator, store};

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind the HTTP server to, e.g. "0.0.0.0"
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Length of generated short ids
    pub short_id_length: usize,

    /// How many candidate ids `create` tries before giving up
    pub max_generation_attempts: u32,

    /// Reject long URLs that don't start with http:// or https://.
    /// Off by default: only empty URLs are refused.
    pub strict_urls: bool,

    /// Upper bound on a request body, in bytes
    pub max_body_bytes: usize,
}

impl AppConfig {
    /// Load configuration from environment variables (populated by dotenvy before this is called).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key -> value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());

        let port = var("PORT", "3000")
            .parse::<u16>()
            .context("PORT must be a valid port number (0–65535)")?;

        let short_id_length = var("SHORT_ID_LENGTH", &generator::DEFAULT_LENGTH.to_string())
            .parse::<usize>()
            .context("SHORT_ID_LENGTH must be a number")?;
        if !(generator::MIN_LENGTH..=generator::MAX_LENGTH).contains(&short_id_length) {
            anyhow::bail!(
                "SHORT_ID_LENGTH must be between {} and {}",
                generator::MIN_LENGTH,
                generator::MAX_LENGTH
            );
        }

        let max_generation_attempts = var(
            "MAX_GENERATION_ATTEMPTS",
            &store::DEFAULT_MAX_ATTEMPTS.to_string(),
        )
        .parse::<u32>()
        .context("MAX_GENERATION_ATTEMPTS must be a number")?;
        if max_generation_attempts == 0 {
            anyhow::bail!("MAX_GENERATION_ATTEMPTS must be at least 1");
        }

        let strict_urls = match var("STRICT_URLS", "false").to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" | "" => false,
            other => anyhow::bail!("STRICT_URLS must be true or false, got '{other}'"),
        };

        let max_body_bytes = var("MAX_BODY_BYTES", "102400")
            .parse::<usize>()
            .context("MAX_BODY_BYTES must be a number of bytes")?;

        Ok(Self {
            host: var("HOST", "0.0.0.0"),
            port,
            short_id_length,
            max_generation_attempts,
            strict_urls,
            max_body_bytes,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
