/// Shared application state
use crate::academic::AcademicProgressProcessor;
use crate::config::PortalConfig;
use crate::error::Result;
use crate::local::LocalStore;
use crate::remote::RemoteClient;

pub struct PortalState {
    pub remote: RemoteClient,
    pub local: LocalStore,
    pub processor: AcademicProgressProcessor,
}

impl PortalState {
    /// Builds the state from configuration, opening the local store on disk.
    pub fn from_config(config: &PortalConfig) -> Result<Self> {
        Ok(Self {
            remote: RemoteClient::new(config.remote_config())?,
            local: LocalStore::open(&config.local_db_path)?,
            processor: AcademicProgressProcessor::new(config.load_rules()?),
        })
    }
}
