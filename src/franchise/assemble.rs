use std::collections::BTreeSet;

use serde::Serialize;

use super::{MediaId, RecordMap};
use crate::duration::format_minutes;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleEntry {
    pub title: String,
    pub time_spent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Franchise {
    /// Alphabetically-first display title of the component. A naming
    /// convention only: the data carries no "main entry" signal.
    pub franchise_name: String,
    pub total_time: String,
    pub total_minutes: i64,
    pub titles: Vec<TitleEntry>,
    pub members: BTreeSet<MediaId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FranchiseReport {
    pub franchises: Vec<Franchise>,
    pub count: usize,
    pub total_minutes: i64,
    pub total_time: String,
}

impl FranchiseReport {
    pub fn empty() -> Self {
        Self {
            franchises: Vec::new(),
            count: 0,
            total_minutes: 0,
            total_time: format_minutes(0),
        }
    }
}

/// Builds one [`Franchise`] per component, largest total first. Franchises
/// with equal totals keep the order of `components`.
pub fn assemble(records: &RecordMap, components: &[BTreeSet<MediaId>]) -> FranchiseReport {
    let mut franchises: Vec<Franchise> = components
        .iter()
        .filter_map(|component| franchise_from_component(records, component))
        .collect();
    franchises.sort_by(|a, b| b.total_minutes.cmp(&a.total_minutes));

    let total_minutes = franchises
        .iter()
        .fold(0i64, |acc, f| acc.saturating_add(f.total_minutes));

    FranchiseReport {
        count: franchises.len(),
        franchises,
        total_minutes,
        total_time: format_minutes(total_minutes),
    }
}

fn franchise_from_component(
    records: &RecordMap,
    component: &BTreeSet<MediaId>,
) -> Option<Franchise> {
    let mut total_minutes = 0i64;
    let mut titles = Vec::with_capacity(component.len());

    for record in component.iter().filter_map(|id| records.get(id)) {
        total_minutes = total_minutes.saturating_add(record.time_spent);
        let title = if record.rewatch_count > 0 {
            format!("{} (Rewatched x{})", record.title, record.rewatch_count)
        } else {
            record.title.clone()
        };
        titles.push(TitleEntry {
            title,
            time_spent: format_minutes(record.time_spent),
        });
    }

    titles.sort_by_cached_key(|entry| entry.title.to_lowercase());
    let franchise_name = titles.first()?.title.clone();

    Some(Franchise {
        franchise_name,
        total_time: format_minutes(total_minutes),
        total_minutes,
        titles,
        members: component.clone(),
    })
}
