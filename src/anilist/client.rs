use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

pub const ANILIST_ENDPOINT: &str = "https://graphql.anilist.co";

const MEDIA_LIST_QUERY: &str = r#"
query ($username: String) {
  MediaListCollection(userName: $username, type: ANIME) {
    lists {
      entries {
        status
        progress
        repeat
        media {
          id
          title { romaji english }
          episodes
          duration
          relations {
            edges {
              relationType
              node { id }
            }
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Clone)]
pub struct AniListClient {
    client: Client,
    endpoint: String,
}

impl AniListClient {
    pub fn with_endpoint(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let user_agent = format!("watchtally/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .context("Failed to build AniList HTTP client")?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Fetches every anime list entry of `username`, flattened across lists.
    pub async fn fetch_list_entries(&self, username: &str) -> Result<Vec<ListEntry>> {
        #[derive(Deserialize)]
        struct GraphQlResponse<T> {
            data: Option<T>,
            errors: Option<Vec<GraphQlError>>,
        }

        #[derive(Deserialize)]
        struct GraphQlError {
            message: String,
            status: Option<i32>,
        }

        #[derive(Deserialize)]
        struct Data {
            #[serde(rename = "MediaListCollection")]
            collection: Option<MediaListCollection>,
        }

        let body = json!({
            "query": MEDIA_LIST_QUERY,
            "variables": { "username": username }
        });

        let res = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .context("AniList list request failed")?;

        let status = res.status();
        let bytes = res
            .bytes()
            .await
            .context("Failed to read AniList list body")?;
        if !status.is_success() {
            return Err(anyhow!(
                "AniList list HTTP error (status {}): {}",
                status,
                String::from_utf8_lossy(&bytes)
            ));
        }

        let parsed: GraphQlResponse<Data> =
            serde_json::from_slice(&bytes).context("Failed to parse AniList list JSON")?;
        if let Some(errors) = parsed.errors {
            let msg = errors
                .into_iter()
                .map(|e| match e.status {
                    Some(s) => format!("{} (status {})", e.message, s),
                    None => e.message,
                })
                .collect::<Vec<_>>()
                .join("; ");
            return Err(anyhow!("AniList list GraphQL error: {}", msg));
        }

        let collection = parsed
            .data
            .and_then(|d| d.collection)
            .ok_or_else(|| anyhow!("AniList returned no list collection for '{}'", username))?;

        let entries = collection
            .lists
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .flat_map(|list| list.entries.unwrap_or_default())
            .flatten()
            .collect::<Vec<_>>();
        debug!("AniList returned {} list entries for '{}'", entries.len(), username);
        Ok(entries)
    }
}

#[derive(Debug, Deserialize)]
struct MediaListCollection {
    lists: Option<Vec<Option<MediaListGroup>>>,
}

#[derive(Debug, Deserialize)]
struct MediaListGroup {
    entries: Option<Vec<Option<ListEntry>>>,
}

/// One entry of a user's list: the list state plus the media it points at.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListEntry {
    pub status: Option<String>,
    pub progress: Option<i32>,
    pub repeat: Option<i32>,
    pub media: Option<Media>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Media {
    pub id: i32,
    pub title: Option<MediaTitle>,
    pub episodes: Option<i32>,
    pub duration: Option<i32>,
    pub relations: Option<RelationsConnection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaTitle {
    pub romaji: Option<String>,
    pub english: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelationsConnection {
    pub edges: Option<Vec<RelationEdge>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelationEdge {
    #[serde(rename = "relationType")]
    pub relation_type: Option<String>,
    pub node: Option<RelationNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelationNode {
    pub id: i32,
}
