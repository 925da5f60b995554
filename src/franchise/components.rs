use std::collections::BTreeSet;

use super::{MediaId, RecordMap};

/// Collects the component reachable from `start`.
///
/// Only ids present in `records` are followed. Returns the component together
/// with `visited` extended by its members.
pub fn explore(
    records: &RecordMap,
    start: MediaId,
    mut visited: BTreeSet<MediaId>,
) -> (BTreeSet<MediaId>, BTreeSet<MediaId>) {
    let mut component = BTreeSet::new();
    let mut stack = vec![start];

    while let Some(current) = stack.pop() {
        let Some(record) = records.get(&current) else {
            continue;
        };
        if !component.insert(current) {
            continue;
        }
        stack.extend(
            record
                .related_ids
                .iter()
                .filter(|id| records.contains_key(*id) && !component.contains(*id)),
        );
    }

    visited.extend(component.iter().copied());
    (component, visited)
}

/// Partitions the keys of `records` into connected components, in order of
/// their smallest id.
pub fn connected_components(records: &RecordMap) -> Vec<BTreeSet<MediaId>> {
    let mut visited = BTreeSet::new();
    let mut components = Vec::new();

    for &id in records.keys() {
        if visited.contains(&id) {
            continue;
        }
        let (component, next_visited) = explore(records, id, visited);
        visited = next_visited;
        components.push(component);
    }
    components
}
