use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use tokio::sync::Mutex;
use urlencoding::encode;

use super::models::{DirectoryEntry, NameLookupResponse, ProfileResponse};
use super::NameDirectory;
use crate::config::DirectorySettings;
use crate::domain::PlayerId;
use crate::http::RateLimitedClient;

/// Name directory backed by the public Mojang profile APIs
pub struct MojangDirectory {
    client: Mutex<RateLimitedClient>,
    name_lookup_url: String,
    profile_url: String,
}

impl MojangDirectory {
    pub fn new(settings: &DirectorySettings) -> Result<Self> {
        let client = RateLimitedClient::new(settings.user_agent, settings.timeout_secs, settings.rate_limit_ms)?;

        Ok(Self {
            client: Mutex::new(client),
            name_lookup_url: settings.name_lookup_url.trim_end_matches('/').to_string(),
            profile_url: settings.profile_url.trim_end_matches('/').to_string(),
        })
    }

    async fn lookup_by_id(&self, id: &PlayerId) -> Result<Option<DirectoryEntry>> {
        let url = self.build_profile_url(id);
        debug!("Directory profile lookup: {}", url);

        let response: Option<ProfileResponse> = self.client.lock().await.get_json(&url).await?;
        response.map(DirectoryEntry::try_from).transpose()
    }

    async fn lookup_by_name(&self, name: &str) -> Result<Option<DirectoryEntry>> {
        let url = self.build_name_lookup_url(name);
        debug!("Directory name lookup: {}", url);

        let response: Option<NameLookupResponse> = self.client.lock().await.get_json(&url).await?;
        response.map(DirectoryEntry::try_from).transpose()
    }

    // --- Helper Methods ---

    fn build_profile_url(&self, id: &PlayerId) -> String {
        format!("{}/{}", self.profile_url, id.as_str().replace('-', ""))
    }

    fn build_name_lookup_url(&self, name: &str) -> String {
        format!("{}/{}", self.name_lookup_url, encode(name.trim()))
    }
}

#[async_trait]
impl NameDirectory for MojangDirectory {
    async fn lookup_current_name_and_id(&self, stale_name_or_id: &str) -> Result<Option<DirectoryEntry>> {
        let entry = match PlayerId::parse(stale_name_or_id) {
            Some(id) => self.lookup_by_id(&id).await?,
            None => self.lookup_by_name(stale_name_or_id).await?,
        };

        if let Some(entry) = &entry {
            info!("Directory resolved {} to {} ({})", stale_name_or_id, entry.name, entry.id);
        }
        Ok(entry)
    }
}
