use serde::{Deserialize, Serialize};

/// Environment variable that overrides the configured backend URL.
pub const BASE_URL_ENV: &str = "JOBFLOW_API_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "http://localhost:4000";
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Top-level client settings container.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientSettings {
    pub api: ApiSettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
}

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub page_size: u32,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ApiSettings {
    /// The effective base URL: a non-empty override wins over the configured value.
    pub fn resolve_base_url(&self, env_override: Option<String>) -> String {
        env_override
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| self.base_url.clone())
    }

    /// [`resolve_base_url`](Self::resolve_base_url) against the process environment.
    pub fn effective_base_url(&self) -> String {
        self.resolve_base_url(std::env::var(BASE_URL_ENV).ok())
    }
}

/// Where client-side state (token, bookmarks) is persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageSettings {
    /// SQLite file path. `None` uses `jobflow.db` in the platform data directory.
    pub database_path: Option<String>,
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive, used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "jobflow=info".to_string(),
        }
    }
}

impl ClientSettings {
    /// Checks values serde alone cannot reject.
    pub fn validate(&self) -> Result<(), String> {
        if self.api.page_size == 0 {
            return Err("api.page_size must be at least 1".to_string());
        }
        url::Url::parse(&self.api.base_url)
            .map_err(|e| format!("api.base_url is not a valid URL: {}", e))?;
        Ok(())
    }
}
