use super::{MediaId, RecordMap};

/// Makes every reference between two present records mutual.
///
/// Takes the complete map: a reference can only be mirrored once its target
/// has been normalized. References to ids missing from the map are left as
/// they are.
pub fn symmetrize(records: RecordMap) -> RecordMap {
    let present = &records;
    let back_edges: Vec<(MediaId, MediaId)> = present
        .iter()
        .flat_map(|(&id, record)| {
            record
                .related_ids
                .iter()
                .filter(move |&&target| present.contains_key(&target))
                .map(move |&target| (target, id))
        })
        .collect();

    let mut records = records;
    for (target, source) in back_edges {
        if let Some(record) = records.get_mut(&target) {
            record.related_ids.insert(source);
        }
    }
    records
}
