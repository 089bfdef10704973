//! Filtering, ordering, paging and stats over in-memory records. Both backends
//! funnel through here so they order and page identically.

use std::cmp::Ordering;

use crate::models::qr_code::QrCodeRecord;
use crate::storage::{ListOptions, SortBy, SortOrder, StorageStats};

pub fn matches(record: &QrCodeRecord, options: &ListOptions) -> bool {
    if let Some(content_type) = options.content_type {
        if record.content_type != content_type {
            return false;
        }
    }
    if let Some(tags) = options.tags.as_ref().filter(|tags| !tags.is_empty()) {
        if !record.has_any_tag(tags) {
            return false;
        }
    }
    if let Some(favorite) = options.favorite {
        if record.is_favorite() != favorite {
            return false;
        }
    }
    true
}

fn compare(a: &QrCodeRecord, b: &QrCodeRecord, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::CreatedAt => a.created_at.cmp(&b.created_at),
        SortBy::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortBy::Name => {
            let name = |r: &QrCodeRecord| r.metadata.name.as_deref().map(str::to_lowercase);
            name(a).cmp(&name(b))
        }
    }
}

/// Stable sort on the chosen key, so equal keys keep insertion order, then page.
pub fn sort_and_paginate(
    mut records: Vec<QrCodeRecord>,
    options: &ListOptions,
) -> Vec<QrCodeRecord> {
    match options.sort_order {
        SortOrder::Asc => records.sort_by(|a, b| compare(a, b, options.sort_by)),
        SortOrder::Desc => records.sort_by(|a, b| compare(b, a, options.sort_by)),
    }

    let offset = options.offset.unwrap_or(0);
    let remaining = records.into_iter().skip(offset);
    match options.limit {
        Some(limit) => remaining.take(limit).collect(),
        None => remaining.collect(),
    }
}

pub fn apply(records: Vec<QrCodeRecord>, options: &ListOptions) -> Vec<QrCodeRecord> {
    let filtered = records
        .into_iter()
        .filter(|record| matches(record, options))
        .collect();
    sort_and_paginate(filtered, options)
}

pub fn stats(records: &[QrCodeRecord]) -> Result<StorageStats, serde_json::Error> {
    Ok(StorageStats {
        count: records.len(),
        size: serde_json::to_string(records)?.len(),
        oldest_record: records.iter().map(|r| r.created_at).min(),
        newest_record: records.iter().map(|r| r.created_at).max(),
    })
}


#[cfg(test)]
mod tests {
    use super::fixtures::record;
    use super::*;
    use crate::models::content::ContentType;

    fn ids(records: &[QrCodeRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    fn five() -> Vec<QrCodeRecord> {
        (1..=5).map(|i| record(&format!("r{}", i), i * 10)).collect()
    }

    #[test]
    fn default_is_newest_first() {
        let listed = apply(five(), &ListOptions::default());
        assert_eq!(ids(&listed), vec!["r5", "r4", "r3", "r2", "r1"]);
    }

    #[test]
    fn pagination_after_sorting() {
        let options = ListOptions {
            limit: Some(2),
            offset: Some(1),
            ..Default::default()
        };
        assert_eq!(ids(&apply(five(), &options)), vec!["r4", "r3"]);

        let tail = ListOptions {
            offset: Some(3),
            ..Default::default()
        };
        assert_eq!(ids(&apply(five(), &tail)), vec!["r2", "r1"]);

        let past_end = ListOptions {
            offset: Some(10),
            ..Default::default()
        };
        assert!(apply(five(), &past_end).is_empty());
    }

    #[test]
    fn ties_keep_insertion_order_both_directions() {
        let records = vec![record("a", 1), record("b", 1), record("c", 1)];
        let asc = ListOptions {
            sort_order: SortOrder::Asc,
            ..Default::default()
        };
        assert_eq!(ids(&apply(records.clone(), &asc)), vec!["a", "b", "c"]);
        assert_eq!(
            ids(&apply(records, &ListOptions::default())),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn sort_by_name_and_updated_at() {
        let mut records = five();
        records[0].metadata.name = Some("beta".into());
        records[1].metadata.name = Some("Alpha".into());
        records[2].updated_at = 1000;

        let by_name = ListOptions {
            sort_by: SortBy::Name,
            sort_order: SortOrder::Asc,
            ..Default::default()
        };
        // unnamed records sort first in ascending order
        assert_eq!(
            ids(&apply(records.clone(), &by_name)),
            vec!["r3", "r4", "r5", "r2", "r1"]
        );

        let by_updated = ListOptions {
            sort_by: SortBy::UpdatedAt,
            limit: Some(1),
            ..Default::default()
        };
        assert_eq!(ids(&apply(records, &by_updated)), vec!["r3"]);
    }

    #[test]
    fn filters_are_conjunctive() {
        let mut records = five();
        records[0].content_type = ContentType::Url;
        records[0].metadata.tags = Some(vec!["work".into()]);
        records[0].metadata.favorite = Some(true);
        records[1].content_type = ContentType::Url;
        records[1].metadata.tags = Some(vec!["home".into()]);
        records[1].metadata.favorite = Some(true);
        records[2].content_type = ContentType::Url;
        records[2].metadata.tags = Some(vec!["work".into()]);

        let options = ListOptions {
            content_type: Some(ContentType::Url),
            tags: Some(vec!["work".into(), "print".into()]),
            favorite: Some(true),
            ..Default::default()
        };
        assert_eq!(ids(&apply(records.clone(), &options)), vec!["r1"]);

        let not_favorite = ListOptions {
            favorite: Some(false),
            ..Default::default()
        };
        assert_eq!(
            ids(&apply(records.clone(), &not_favorite)),
            vec!["r5", "r4", "r3"]
        );

        let no_tags = ListOptions {
            tags: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(apply(records, &no_tags).len(), 5);
    }

    #[test]
    fn stats_of_empty_and_filled_sets() {
        let empty = stats(&[]).unwrap();
        assert_eq!(empty.count, 0);
        assert_eq!(empty.size, 2);
        assert!(empty.oldest_record.is_none());
        assert!(empty.newest_record.is_none());

        let records = five();
        let filled = stats(&records).unwrap();
        assert_eq!(filled.count, 5);
        assert_eq!(filled.oldest_record, Some(10));
        assert_eq!(filled.newest_record, Some(50));
        assert_eq!(filled.size, serde_json::to_string(&records).unwrap().len());
    }
}
