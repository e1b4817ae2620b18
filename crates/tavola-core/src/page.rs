//! Paged list responses
//!
//! List endpoints come in two families: Spring-style
//! `{content, totalElements, ...}` and flat `{data, page, total}`.
//! [`PageEnvelope`] accepts both and normalizes them into a [`Page`].

use serde::Deserialize;

/// One page of rows plus the total size of the result set
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub rows: Vec<T>,
    /// Total number of rows across all pages
    pub total: u64,
    /// Zero-based index of this page
    pub page_index: usize,
}

impl<T> Page<T> {
    pub fn new(rows: Vec<T>, total: u64, page_index: usize) -> Self {
        Self {
            rows,
            total,
            page_index,
        }
    }

    pub fn empty(page_index: usize) -> Self {
        Self::new(Vec::new(), 0, page_index)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            rows: self.rows.into_iter().map(f).collect(),
            total: self.total,
            page_index: self.page_index,
        }
    }
}

/// Raw response body of a list endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PageEnvelope<T> {
    #[serde(rename_all = "camelCase")]
    Content {
        content: Vec<T>,
        total_elements: u64,
        /// Zero-based page number echoed by the server
        #[serde(default)]
        number: Option<usize>,
    },
    Flat {
        data: Vec<T>,
        total: u64,
        #[serde(default)]
        page: Option<usize>,
    },
}

impl<T> PageEnvelope<T> {
    /// Normalize into a [`Page`]. The requested index is authoritative: flat
    /// endpoints disagree on whether `page` is zero- or one-based.
    pub fn into_page(self, requested_page: usize) -> Page<T> {
        match self {
            Self::Content {
                content,
                total_elements,
                number,
            } => {
                if let Some(number) = number {
                    if number != requested_page {
                        tracing::debug!(
                            requested_page,
                            number,
                            "List endpoint echoed a different page number"
                        );
                    }
                }
                Page::new(content, total_elements, requested_page)
            }
            Self::Flat { data, total, .. } => Page::new(data, total, requested_page),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Item {
        id: i64,
        name: String,
    }

    #[test]
    fn test_content_envelope() {
        let json = r#"{
            "content": [{"id": 1, "name": "Pho"}, {"id": 2, "name": "Banh mi"}],
            "totalElements": 25,
            "totalPages": 3,
            "number": 2,
            "size": 10
        }"#;
        let envelope: PageEnvelope<Item> = serde_json::from_str(json).unwrap();
        let page = envelope.into_page(2);
        assert_eq!(page.len(), 2);
        assert_eq!(page.total, 25);
        assert_eq!(page.page_index, 2);
    }

    #[test]
    fn test_flat_envelope() {
        let json = r#"{"data": [{"id": 9, "name": "Tea"}], "page": 1, "total": 1}"#;
        let envelope: PageEnvelope<Item> = serde_json::from_str(json).unwrap();
        let page = envelope.into_page(0);
        assert_eq!(page.rows, vec![Item { id: 9, name: "Tea".into() }]);
        assert_eq!(page.total, 1);
        assert_eq!(page.page_index, 0);
    }

    #[test]
    fn test_empty_content_is_a_page() {
        let json = r#"{"content": [], "totalElements": 0}"#;
        let envelope: PageEnvelope<Item> = serde_json::from_str(json).unwrap();
        let page = envelope.into_page(0);
        assert!(page.is_empty());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn test_unknown_shape_fails() {
        let json = r#"{"items": []}"#;
        assert!(serde_json::from_str::<PageEnvelope<Item>>(json).is_err());
    }

    #[test]
    fn test_map() {
        let page = Page::new(vec![1, 2, 3], 3, 0).map(|n| n * 10);
        assert_eq!(page.rows, vec![10, 20, 30]);
    }
}
