//! Application configuration loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Configuration values controlling the HTTP server and startup behaviour.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FLETESHARE")]
pub struct AppConfig {
    /// Socket address the server binds to.
    pub bind_addr: Option<String>,
    /// Whether session cookies require HTTPS.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
    /// Path to the session key material.
    pub session_key_file: Option<PathBuf>,
    /// Allow an ephemeral session key when the key file is missing.
    #[ortho_config(default = false)]
    pub allow_ephemeral_session_key: bool,
    /// Seed fixture users and freights at startup.
    #[ortho_config(default = false)]
    pub seed_example_data: bool,
}

impl AppConfig {
    /// Return the configured bind address, falling back to the default.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Return the configured session key path, falling back to the default.
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }
}
