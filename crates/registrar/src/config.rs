//! Portal configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use crate::academic::AcademicRules;
use crate::error::{PortalError, Result};
use crate::remote::RemoteConfig;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_LOCAL_DB: &str = "registrar_local.db";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub bind_addr: SocketAddr,
    pub supabase_url: Option<String>,
    pub supabase_anon_key: String,
    pub local_db_path: String,
    /// Optional JSON file overriding the built-in level table and limits
    pub rules_path: Option<PathBuf>,
    pub http_timeout: Duration,
}

impl PortalConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_raw = get("REGISTRAR_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse().map_err(|e| PortalError::Config {
            message: format!("Invalid REGISTRAR_BIND_ADDR {}: {}", bind_raw, e),
        })?;

        let http_timeout = match get("REGISTRAR_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| PortalError::Config {
                message: format!("Invalid REGISTRAR_HTTP_TIMEOUT_SECS {}: {}", raw, e),
            })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        let supabase_url = get("SUPABASE_URL");
        if supabase_url.is_none() {
            info!("SUPABASE_URL not set, portal will serve from the local store only");
        }

        Ok(Self {
            bind_addr,
            supabase_url,
            supabase_anon_key: get("SUPABASE_ANON_KEY").unwrap_or_default(),
            local_db_path: get("REGISTRAR_LOCAL_DB").unwrap_or_else(|| DEFAULT_LOCAL_DB.to_string()),
            rules_path: get("REGISTRAR_RULES_PATH").map(PathBuf::from),
            http_timeout: Duration::from_secs(http_timeout),
        })
    }

    /// Settings for the remote client.
    pub fn remote_config(&self) -> RemoteConfig {
        RemoteConfig {
            base_url: self.supabase_url.clone(),
            api_key: self.supabase_anon_key.clone(),
            timeout: self.http_timeout,
        }
    }

    /// Loads the academic rules, using the built-in table when no file is set.
    pub fn load_rules(&self) -> Result<AcademicRules> {
        match &self.rules_path {
            Some(path) => {
                debug!("Loading academic rules from {}", path.display());
                AcademicRules::load_from_file(path)
            }
            None => Ok(AcademicRules::default()),
        }
    }
}
