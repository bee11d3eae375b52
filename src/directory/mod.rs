mod models;
mod mojang;

use anyhow::Result;
use async_trait::async_trait;

pub use models::DirectoryEntry;
pub use mojang::MojangDirectory;

/// Third-party service that knows every player's current name
#[async_trait]
pub trait NameDirectory: Send + Sync {
    /// Translates a possibly stale display name, or an id, into the
    /// player's canonical id and current name
    async fn lookup_current_name_and_id(&self, stale_name_or_id: &str) -> Result<Option<DirectoryEntry>>;
}
