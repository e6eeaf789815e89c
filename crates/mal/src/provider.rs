//! List provider wiring the client, entry adapter, and backup pipeline.

use async_trait::async_trait;
use std::sync::Arc;

use anisync_core::{ListEntry, ListError, ListProvider};

use crate::backup::{self, snapshot_from_text, snapshot_to_text};
use crate::client::{HttpMalClient, MalApi, DEFAULT_BASE_URL};
use crate::entry::MalListEntry;
use crate::error::MalError;
use crate::models::User;

const PROVIDER_ID: &str = "mal";

/// Username token the API resolves to the token owner.
const SELF_USERNAME: &str = "@me";

/// Configuration for the HTTP-backed provider.
#[derive(Debug, Clone)]
pub struct MalConfig {
    pub base_url: String,
    pub token: String,
}

impl MalConfig {
    /// Config against the public API with the given access token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: token.into(),
        }
    }
}

/// List provider backed by the remote service's v2 API.
pub struct MalListProvider {
    api: Arc<dyn MalApi>,
    username: String,
}

impl MalListProvider {
    pub fn new(config: MalConfig) -> Self {
        Self::with_client(Arc::new(HttpMalClient::new(&config.base_url, config.token)))
    }

    /// Build a provider over an injected client, e.g. a stub in tests.
    pub fn with_client(api: Arc<dyn MalApi>) -> Self {
        Self {
            api,
            username: SELF_USERNAME.to_string(),
        }
    }

    /// Track a named user's list instead of the token owner's.
    pub fn for_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// The account whose list this provider tracks.
    pub async fn user(&self) -> Result<User, MalError> {
        self.api.get_user(&self.username).await
    }

    /// Search the remote catalogue and wrap each hit in an entry adapter.
    pub async fn search(&self, query: &str, limit: u32) -> Result<Vec<MalListEntry>, ListError> {
        let results = self.api.search_anime(query, limit).await?;
        Ok(results
            .into_iter()
            .map(|anime| MalListEntry::new(Arc::clone(&self.api), anime))
            .collect())
    }

    /// Fetch one remote record and bind a live entry adapter to it.
    pub async fn entry(&self, anime_id: u64) -> Result<MalListEntry, ListError> {
        let anime = self.api.get_anime(anime_id).await?;
        Ok(MalListEntry::new(Arc::clone(&self.api), anime))
    }

    /// Remove the entry from the caller's list. The catalogue record itself
    /// is untouched.
    pub async fn remove_entry(&self, anime_id: u64) -> Result<(), ListError> {
        self.api.delete_anime_status(anime_id).await?;
        Ok(())
    }
}

#[async_trait]
impl ListProvider for MalListProvider {
    fn name(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn entry(&self, id: u64) -> Result<Box<dyn ListEntry>, ListError> {
        Ok(Box::new(self.entry(id).await?))
    }

    async fn backup_list(&self) -> Result<String, ListError> {
        let records = backup::backup(self.api.as_ref(), &self.username).await?;
        snapshot_to_text(&records).map_err(|e| ListError::Snapshot(e.to_string()))
    }

    async fn restore_list(&self, snapshot: &str) -> Result<(), ListError> {
        let records =
            snapshot_from_text(snapshot).map_err(|e| ListError::Snapshot(e.to_string()))?;
        backup::restore(self.api.as_ref(), &records).await?;
        Ok(())
    }
}
