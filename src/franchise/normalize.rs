use std::collections::BTreeSet;

use tracing::debug;

use super::{ListStatus, MediaId, MediaRecord, RecordMap, RelationType, Vocabulary};
use crate::anilist::{ListEntry, MediaTitle};

const UNKNOWN_TITLE: &str = "Unknown Title";

/// Turns raw list entries into [`MediaRecord`]s using a fixed vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    vocabulary: &'a Vocabulary,
}

impl<'a> Normalizer<'a> {
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Returns `None` for entries whose status is not counted or that carry
    /// no media.
    pub fn normalize(&self, entry: &ListEntry) -> Option<(MediaId, MediaRecord)> {
        let status: ListStatus = entry.status.as_deref()?.parse().ok()?;
        if !self.vocabulary.statuses.contains(&status) {
            return None;
        }
        let media = entry.media.as_ref()?;

        let total_eps = non_negative(media.episodes);
        let duration = non_negative(media.duration);
        let progress = non_negative(entry.progress);
        let repeat = non_negative(entry.repeat);

        let mut watched_eps = if status == ListStatus::Completed && total_eps > 0 {
            total_eps
        } else {
            progress
        };
        if repeat > 0 && total_eps > 0 {
            watched_eps = watched_eps.saturating_add(repeat.saturating_mul(total_eps));
        }
        let time_spent = watched_eps.saturating_mul(duration);

        let related_ids = media
            .relations
            .as_ref()
            .and_then(|r| r.edges.as_ref())
            .into_iter()
            .flatten()
            .filter(|edge| {
                edge.relation_type
                    .as_deref()
                    .and_then(|t| t.parse::<RelationType>().ok())
                    .is_some_and(|t| self.vocabulary.relations.contains(&t))
            })
            .filter_map(|edge| edge.node.as_ref().map(|n| n.id))
            .collect::<BTreeSet<_>>();

        let record = MediaRecord {
            title: display_base_title(media.title.as_ref()),
            related_ids,
            time_spent,
            rewatch_count: u32::try_from(repeat).unwrap_or(u32::MAX),
        };
        Some((media.id, record))
    }
}

/// Normalizes every entry into one map. A later entry with an id already in
/// the map replaces the earlier record.
pub fn build_records(normalizer: &Normalizer<'_>, entries: &[ListEntry]) -> RecordMap {
    let mut records = RecordMap::new();
    for entry in entries {
        let Some((id, record)) = normalizer.normalize(entry) else {
            continue;
        };
        if let Some(previous) = records.insert(id, record) {
            debug!(
                "Duplicate list entry for media {} ('{}'), keeping the later one",
                id, previous.title
            );
        }
    }
    records
}

fn non_negative(value: Option<i32>) -> i64 {
    value.map(i64::from).unwrap_or(0).max(0)
}

fn display_base_title(title: Option<&MediaTitle>) -> String {
    title
        .and_then(|t| {
            non_blank(t.romaji.as_deref()).or_else(|| non_blank(t.english.as_deref()))
        })
        .unwrap_or(UNKNOWN_TITLE)
        .to_string()
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}
