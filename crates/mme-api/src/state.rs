//! # Application State
//!
//! Shared state for the Axum application: the one editor session, the
//! compiled schema it validates against, and configuration.

use std::path::PathBuf;
use std::sync::Arc;

use mme_schema::{ModelSchema, SchemaError};
use mme_session::EditorSession;
use parking_lot::RwLock;

/// Default cap on uploaded document size.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Schema file replacing the bundled model mapping schema.
    pub schema_path: Option<PathBuf>,
    /// Largest accepted upload, in bytes.
    pub max_upload_bytes: usize,
}

impl AppConfig {
    /// Read `PORT`, `MME_SCHEMA_PATH` and `MME_MAX_UPLOAD_BYTES`.
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = parse_or(&lookup, "PORT", defaults.port);
        let max_upload_bytes =
            parse_or(&lookup, "MME_MAX_UPLOAD_BYTES", defaults.max_upload_bytes);
        let schema_path = lookup("MME_SCHEMA_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Self {
            port,
            schema_path,
            max_upload_bytes,
        }
    }
}

fn parse_or<T: std::str::FromStr + Copy>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "ignoring unparsable setting");
            default
        }),
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            schema_path: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Shared application state passed to all route handlers.
///
/// The session lock is `parking_lot` and is never held across `.await`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The one editor session behind the page.
    pub session: Arc<RwLock<EditorSession>>,
    /// Compiled schema, shared with the session and served to the form view.
    pub schema: Arc<ModelSchema>,
    /// Server configuration, including the request body limit.
    pub config: AppConfig,
}

impl AppState {
    /// Build state from configuration, compiling the configured schema
    /// (or the bundled one).
    ///
    /// # Errors
    ///
    /// Returns the schema error if the configured schema cannot be loaded.
    pub fn from_config(config: AppConfig) -> Result<Self, SchemaError> {
        let schema = match &config.schema_path {
            Some(path) => ModelSchema::from_path(path)?,
            None => ModelSchema::bundled()?,
        };
        Ok(Self::with_schema(config, Arc::new(schema)))
    }

    /// Build state around an already compiled schema.
    pub fn with_schema(config: AppConfig, schema: Arc<ModelSchema>) -> Self {
        let session = EditorSession::new(Arc::clone(&schema));
        Self {
            session: Arc::new(RwLock::new(session)),
            schema,
            config,
        }
    }
}
