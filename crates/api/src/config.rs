//! Server configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Runtime configuration for the API server.
///
/// Loaded once at startup via [`ServerConfig::from_env`]:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `HOST` | `0.0.0.0` | Bind address |
/// | `PORT` | `3000` | Bind port |
/// | `CORS_ORIGINS` | `http://localhost:5173` | Comma-separated allowed origins |
/// | `REQUEST_TIMEOUT_SECS` | `30` | Per-request timeout |
/// | `BASE_DOMAIN` | unset | Absolute-URL prefix for QR payloads, e.g. `https://assets.example.com` |
/// | `SITE_HEADER` | `IT Asset Management Admin` | Admin portal masthead |
/// | `SITE_TITLE` | `ITAM Admin Portal` | Admin portal browser title |
/// | `SITE_INDEX_TITLE` | `Welcome to the ITAM Portal.` | Admin portal landing greeting |
/// | `MEDIA_ROOT` | `./media` | Directory for generated artifacts |
/// | `SERVE_MEDIA` | `true` | Serve `MEDIA_ROOT` under `/media` |
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub site: SiteConfig,
    pub media: MediaConfig,
}

/// Branding and QR payload settings for the admin portal.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// When unset, QR payloads fall back to the relative admin path.
    pub base_domain: Option<String>,
    pub header: String,
    pub title: String,
    pub index_title: String,
}

/// Where generated artifacts (QR images) live on disk.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub root: PathBuf,
    pub serve: bool,
}

impl ServerConfig {
    /// Read configuration from the environment, panicking on malformed
    /// values. Call after `dotenvy` has loaded any `.env` file.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a valid port number"),
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:5173".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .expect("REQUEST_TIMEOUT_SECS must be a number"),
            site: SiteConfig {
                base_domain: env::var("BASE_DOMAIN").ok().filter(|s| !s.is_empty()),
                header: env::var("SITE_HEADER")
                    .unwrap_or_else(|_| "IT Asset Management Admin".to_string()),
                title: env::var("SITE_TITLE")
                    .unwrap_or_else(|_| "ITAM Admin Portal".to_string()),
                index_title: env::var("SITE_INDEX_TITLE")
                    .unwrap_or_else(|_| "Welcome to the ITAM Portal.".to_string()),
            },
            media: MediaConfig {
                root: env::var("MEDIA_ROOT")
                    .unwrap_or_else(|_| "./media".to_string())
                    .into(),
                serve: env::var("SERVE_MEDIA")
                    .unwrap_or_else(|_| "true".to_string())
                    .parse()
                    .expect("SERVE_MEDIA must be true or false"),
            },
        }
    }
}
