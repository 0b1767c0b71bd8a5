use std::env;
use std::fmt;
use std::str::FromStr;

use tracing::warn;

pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:8080";

/// Where patients and visits are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Supabase,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" => Ok(Self::Memory),
            "supabase" => Ok(Self::Supabase),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::Supabase => f.write_str("supabase"),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown storage backend: {0}")]
    UnknownBackend(String),

    #[error("supabase backend selected but SUPABASE_URL / SUPABASE_ANON_PUBLIC_KEY are not set")]
    SupabaseNotConfigured,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: String,
    pub storage_backend: StorageBackend,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub supabase_service_role_key: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let supabase_url = env::var("SUPABASE_URL")
            .unwrap_or_else(|_| {
                warn!("SUPABASE_URL not set, using empty value");
                String::new()
            });
        let supabase_anon_key = env::var("SUPABASE_ANON_PUBLIC_KEY")
            .unwrap_or_else(|_| {
                warn!("SUPABASE_ANON_PUBLIC_KEY not set, using empty value");
                String::new()
            });
        let supabase_service_role_key = env::var("SUPABASE_SERVICE_ROLE_KEY")
            .ok()
            .filter(|key| !key.is_empty());

        let http_addr = env::var("HTTP_ADDR")
            .unwrap_or_else(|_| {
                warn!("HTTP_ADDR not set, using default {}", DEFAULT_HTTP_ADDR);
                DEFAULT_HTTP_ADDR.to_string()
            });

        let mut config = Self {
            http_addr,
            storage_backend: StorageBackend::Memory,
            supabase_url,
            supabase_anon_key,
            supabase_service_role_key,
        };

        config.storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) if config.is_configured() => StorageBackend::Supabase,
            Err(_) => {
                warn!("STORAGE_BACKEND not set and Supabase not configured, using in-memory storage");
                StorageBackend::Memory
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Config for local runs and tests: in-memory storage, default address.
    pub fn in_memory() -> Self {
        Self {
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
            storage_backend: StorageBackend::Memory,
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            supabase_service_role_key: None,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty() && !self.supabase_anon_key.is_empty()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_backend == StorageBackend::Supabase && !self.is_configured() {
            return Err(ConfigError::SupabaseNotConfigured);
        }
        Ok(())
    }

    /// Bearer token sent to PostgREST. The service role key bypasses row
    /// level security; without it requests run as the anon role.
    pub fn supabase_token(&self) -> &str {
        self.supabase_service_role_key
            .as_deref()
            .unwrap_or(&self.supabase_anon_key)
    }
}
