use std::path::PathBuf;

/// Process-wide configuration, resolved once at startup from the
/// `REVIEWWATCH_*` environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the per-app seen-review database files.
    pub data_dir: PathBuf,
    pub log_level: String,
    /// Base URL of the review feed host. Overridable so tests can point the
    /// whole pipeline at a mock server.
    pub feed_base_url: String,
    pub feed_request_timeout_secs: u64,
    pub feed_user_agent: String,
    pub feed_max_concurrent_storefronts: usize,
    pub feed_max_retries: u32,
    pub feed_retry_backoff_base_ms: u64,
}
