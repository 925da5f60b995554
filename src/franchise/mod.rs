//! Groups a user's list into franchises: connected components of the
//! media relation graph, with watch time aggregated per component.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::str::FromStr;

use tracing::{info, warn};

use crate::anilist::{AniListApi, ListEntry};

mod assemble;
mod components;
mod graph;
mod normalize;

pub use assemble::{assemble, Franchise, FranchiseReport, TitleEntry};
pub use components::{connected_components, explore};
pub use graph::symmetrize;
pub use normalize::{build_records, Normalizer};

pub type MediaId = i32;

/// Media records keyed by AniList id. Iteration order (ascending id) fixes
/// the order in which components are discovered.
pub type RecordMap = BTreeMap<MediaId, MediaRecord>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRecord {
    pub title: String,
    pub related_ids: BTreeSet<MediaId>,
    pub time_spent: i64,
    pub rewatch_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListStatus {
    Current,
    Planning,
    Completed,
    Dropped,
    Paused,
    Repeating,
    Other(String),
}

impl FromStr for ListStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "CURRENT" => ListStatus::Current,
            "PLANNING" => ListStatus::Planning,
            "COMPLETED" => ListStatus::Completed,
            "DROPPED" => ListStatus::Dropped,
            "PAUSED" => ListStatus::Paused,
            "REPEATING" => ListStatus::Repeating,
            other => ListStatus::Other(other.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RelationType {
    Prequel,
    Sequel,
    Parent,
    Child,
    SideStory,
    Alternative,
    Adaptation,
    Other(String),
}

impl FromStr for RelationType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "PREQUEL" => RelationType::Prequel,
            "SEQUEL" => RelationType::Sequel,
            "PARENT" => RelationType::Parent,
            "CHILD" => RelationType::Child,
            "SIDE_STORY" => RelationType::SideStory,
            "ALTERNATIVE" => RelationType::Alternative,
            "ADAPTATION" => RelationType::Adaptation,
            other => RelationType::Other(other.to_string()),
        })
    }
}

/// Which list statuses count as watched, and which relation types join two
/// entries into one franchise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    pub statuses: HashSet<ListStatus>,
    pub relations: HashSet<RelationType>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            statuses: HashSet::from([
                ListStatus::Current,
                ListStatus::Completed,
                ListStatus::Dropped,
                ListStatus::Paused,
            ]),
            relations: HashSet::from([
                RelationType::Prequel,
                RelationType::Sequel,
                RelationType::Parent,
                RelationType::Child,
                RelationType::SideStory,
                RelationType::Alternative,
                RelationType::Adaptation,
            ]),
        }
    }
}

impl Vocabulary {
    pub fn with_status(mut self, status: ListStatus) -> Self {
        self.statuses.insert(status);
        self
    }

    pub fn with_relation(mut self, relation: RelationType) -> Self {
        self.relations.insert(relation);
        self
    }
}

/// Runs the whole pipeline over one fetched snapshot.
pub fn analyze(entries: &[ListEntry], vocabulary: &Vocabulary) -> FranchiseReport {
    let normalizer = Normalizer::new(vocabulary);
    let records = symmetrize(build_records(&normalizer, entries));
    let components = connected_components(&records);
    assemble(&records, &components)
}

/// Fetches `username`'s list and analyzes it. A failed fetch yields an empty
/// report rather than an error.
pub async fn analyze_user(
    api: &dyn AniListApi,
    vocabulary: &Vocabulary,
    username: &str,
) -> FranchiseReport {
    let entries = match api.fetch_list_entries(username).await {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Failed to fetch AniList list for '{}': {:#}", username, e);
            return FranchiseReport::empty();
        }
    };

    let report = analyze(&entries, vocabulary);
    info!(
        "Analyzed '{}': {} entries -> {} franchises, {}",
        username,
        entries.len(),
        report.count,
        report.total_time
    );
    report
}
