//! List/search query parameters.

use serde::{Deserialize, Serialize};

use super::reader::{FieldReader, Need};
use super::Schema;
use crate::status::SortOrder;

pub const MAX_PAGE_SIZE: i64 = 100;
pub const MAX_SORT_BY_LEN: usize = 50;
pub const MAX_SEARCH_LEN: usize = 200;

/// Every field is optional, so the create and patch forms coincide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub search: Option<String>,
}

impl ListQuery {
    pub const DEFAULT_PAGE_SIZE: i64 = 20;

    /// Zero-based offset of the first row on the requested page.
    pub fn offset(&self) -> i64 {
        (self.page.unwrap_or(1) - 1) * self.limit()
    }

    pub fn limit(&self) -> i64 {
        self.page_size.unwrap_or(Self::DEFAULT_PAGE_SIZE)
    }
}

impl Schema for ListQuery {
    type Patch = ListQuery;

    fn read(r: &mut FieldReader<'_>) -> ListQuery {
        ListQuery {
            page: r.integer("page", 1, i64::MAX, Need::Optional),
            page_size: r.integer("pageSize", 1, MAX_PAGE_SIZE, Need::Optional),
            sort_by: r.text("sortBy", MAX_SORT_BY_LEN, Need::Optional),
            sort_order: r.choice("sortOrder", Need::Optional),
            search: r.text("search", MAX_SEARCH_LEN, Need::Optional),
        }
    }

    fn complete(query: ListQuery) -> Option<Self> {
        Some(query)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::*;
    use crate::types::Timestamp;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn empty_query_uses_defaults() {
        let query = ListQuery::create_at(&json!({}), now()).unwrap();
        assert_eq!(query.offset(), 0);
        assert_eq!(query.limit(), 20);
    }

    #[test]
    fn page_size_bounds() {
        for (size, ok) in [(0, false), (1, true), (100, true), (101, false)] {
            let result = ListQuery::create_at(&json!({"pageSize": size}), now());
            assert_eq!(result.is_ok(), ok, "{size}");
        }
    }

    #[test]
    fn sort_order_accepts_long_forms() {
        let query = ListQuery::create_at(
            &json!({"page": 3, "pageSize": 10, "sortOrder": "descending"}),
            now(),
        )
        .unwrap();
        assert_eq!(query.sort_order, Some(SortOrder::Desc));
        assert_eq!(query.offset(), 20);
    }

    #[test]
    fn search_length_limit() {
        let errors =
            ListQuery::create_at(&json!({"search": "x".repeat(201), "page": 0}), now()).unwrap_err();
        assert_eq!(errors.fields(), vec!["page", "search"]);
    }
}
