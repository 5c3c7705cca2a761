use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Engines that run inside the process and need no access credentials.
const EMBEDDED_SCHEMES: &[&str] = &["mem://", "memory", "rocksdb://", "surrealkv://"];

/// Top-level API configuration shared across services.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into handlers.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(flatten, default)]
    inner: Arc<ApiConfigInner>,
}

impl Deref for ApiConfig {
    type Target = ApiConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut ApiConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
    /// Upper bound for JSON request bodies, in bytes.
    pub body_limit: usize,
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// `SurrealDB` connection configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub credentials: Option<DatabaseCredentials>,
}

/// Root credentials for remote engines (`ws://`, `http://`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseCredentials {
    pub username: String,
    pub password: String,
}

/// Log output configuration consumed by the server binary at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level (`trace`..`error`); `RUST_LOG` still overrides.
    pub level: String,
    /// Extra directives such as `plint_waitlist=debug`.
    pub filter: Option<String>,
    pub console: bool,
    /// Directory for daily rolling files; no file output when unset.
    pub directory: Option<PathBuf>,
    pub json: bool,
    pub max_files: usize,
}

impl DatabaseConfig {
    /// Whether the configured engine runs in-process.
    #[must_use]
    pub fn is_embedded(&self) -> bool {
        EMBEDDED_SCHEMES.iter().any(|scheme| self.url.starts_with(scheme))
    }

    /// Names the first required store setting that is absent, if any.
    ///
    /// Remote engines need an access key in addition to the URL.
    #[must_use]
    pub fn missing_setting(&self) -> Option<&'static str> {
        if self.url.trim().is_empty() {
            return Some("database.url");
        }
        if self.is_embedded() {
            return None;
        }
        match &self.credentials {
            Some(creds) if !creds.username.is_empty() && !creds.password.is_empty() => None,
            _ => Some("database.credentials"),
        }
    }
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 4583,
            ssl: None,
            body_limit: 16 * 1024,
        }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "mem://".to_owned(),
            namespace: "plint".to_owned(),
            database: "intake".to_owned(),
            credentials: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            filter: None,
            console: true,
            directory: None,
            json: false,
            max_files: 10,
        }
    }
}

impl Default for DatabaseCredentials {
    fn default() -> Self {
        Self { username: "root".to_owned(), password: String::new() }
    }
}
