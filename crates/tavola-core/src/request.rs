//! List request object
//!
//! Built by the table controller from its pagination, sort, filter and search
//! state, and consumed by whatever fetches the rows. The filter set travels as
//! one JSON-encoded query parameter (`searchCondition`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::filter::FilterCondition;
use crate::sort::SortDescriptor;

/// Request for one page of a list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRequest {
    /// Zero-based page index
    pub page: usize,
    pub size: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortDescriptor>,
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        rename = "searchCondition",
        with = "search_condition"
    )]
    pub filters: Vec<FilterCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    /// Page-specific parameters passed through verbatim (e.g. `branchId`)
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl ListRequest {
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page,
            size,
            sort_by: None,
            filters: Vec::new(),
            keyword: None,
            extra: BTreeMap::new(),
        }
    }

    /// Row offset of the first row on the requested page
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }

    /// JSON encoding of the filter set, as sent in `searchCondition`
    pub fn search_condition(&self) -> Option<String> {
        if self.filters.is_empty() {
            return None;
        }
        serde_json::to_string(&self.filters).ok()
    }

    /// Flatten into URL query parameters, in a stable order
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
        ];

        if let Some(sort) = &self.sort_by {
            pairs.push(("sortBy".to_string(), sort.to_string()));
        }
        if let Some(condition) = self.search_condition() {
            pairs.push(("searchCondition".to_string(), condition));
        }
        if let Some(keyword) = &self.keyword {
            pairs.push(("keyword".to_string(), keyword.clone()));
        }
        for (key, value) in &self.extra {
            pairs.push((key.clone(), value.clone()));
        }

        pairs
    }
}

mod search_condition {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::filter::FilterCondition;

    pub fn serialize<S: Serializer>(
        filters: &[FilterCondition],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let encoded = serde_json::to_string(filters).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&encoded)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<FilterCondition>, D::Error> {
        let encoded = Option::<String>::deserialize(deserializer)?;
        match encoded.as_deref().map(str::trim) {
            None | Some("") => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(raw).map_err(serde::de::Error::custom),
        }
    }
}
