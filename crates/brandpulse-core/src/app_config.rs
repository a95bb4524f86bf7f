use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Per-provider fetch budget enforced by the fan-out orchestrator.
    pub provider_timeout_secs: u64,
    /// Period of the background refresh job.
    pub refresh_interval_secs: u64,
    pub user_agent: String,
    pub news_api_key: Option<String>,
    pub video_api_key: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("provider_timeout_secs", &self.provider_timeout_secs)
            .field("refresh_interval_secs", &self.refresh_interval_secs)
            .field("user_agent", &self.user_agent)
            .field(
                "news_api_key",
                &self.news_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "video_api_key",
                &self.video_api_key.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
