use anyhow::{Result, anyhow};
use serde::Deserialize;

use crate::domain::PlayerId;

/// Current identity of a player according to the directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub id: PlayerId,
    pub name: String,
}

// --- API Response Structures ---

/// Name lookup response (`/mojang/v2/user/{name}`)
#[derive(Debug, Deserialize)]
pub struct NameLookupResponse {
    pub uuid: String,
    pub username: String,
}

/// Session server profile (`/session/minecraft/profile/{id}`); `id` has no hyphens
#[derive(Debug, Deserialize)]
pub struct ProfileResponse {
    pub id: String,
    pub name: String,
}

impl TryFrom<NameLookupResponse> for DirectoryEntry {
    type Error = anyhow::Error;

    fn try_from(response: NameLookupResponse) -> Result<Self> {
        Ok(Self {
            id: parse_directory_id(&response.uuid)?,
            name: response.username,
        })
    }
}

impl TryFrom<ProfileResponse> for DirectoryEntry {
    type Error = anyhow::Error;

    fn try_from(response: ProfileResponse) -> Result<Self> {
        Ok(Self {
            id: parse_directory_id(&response.id)?,
            name: response.name,
        })
    }
}

fn parse_directory_id(raw: &str) -> Result<PlayerId> {
    PlayerId::parse(raw).ok_or_else(|| anyhow!("Directory returned a malformed id: {}", raw))
}
