use serde::Deserialize;

use crate::models::content::ContentType;
use crate::storage::{ListOptions, SortBy, SortOrder};

/// Query string for listing records. `tags` is comma separated.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
    pub content_type: Option<ContentType>,
    pub tags: Option<String>,
    pub favorite: Option<bool>,
}

impl From<ListQuery> for ListOptions {
    fn from(query: ListQuery) -> Self {
        let tags = query.tags.map(|tags| {
            tags.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect()
        });
        Self {
            limit: query.limit,
            offset: query.offset,
            sort_by: query.sort_by.unwrap_or_default(),
            sort_order: query.sort_order.unwrap_or_default(),
            content_type: query.content_type,
            tags,
            favorite: query.favorite,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_split_and_trimmed() {
        let options: ListOptions = ListQuery {
            tags: Some("work, print,,".into()),
            ..Default::default()
        }
        .into();
        assert_eq!(options.tags, Some(vec!["work".into(), "print".into()]));
        assert_eq!(options.sort_by, SortBy::CreatedAt);
        assert_eq!(options.sort_order, SortOrder::Desc);
    }
}
