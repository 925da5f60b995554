use anyhow::Result;
use async_trait::async_trait;

mod client;

pub use client::{
    AniListClient, ListEntry, Media, MediaTitle, RelationEdge, RelationNode,
    RelationsConnection, ANILIST_ENDPOINT,
};

#[async_trait]
pub trait AniListApi: Send + Sync {
    async fn fetch_list_entries(&self, username: &str) -> Result<Vec<ListEntry>>;
}

#[async_trait]
impl AniListApi for AniListClient {
    async fn fetch_list_entries(&self, username: &str) -> Result<Vec<ListEntry>> {
        AniListClient::fetch_list_entries(self, username).await
    }
}
