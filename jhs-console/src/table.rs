//! Search and paging for the list screens.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableQuery {
    /// 1-based.
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub search: Option<String>,
}

impl TableQuery {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    fn needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

/// Whether any string or number anywhere in `value` contains `needle`
/// (already lowercased).
fn matches(value: &Value, needle: &str) -> bool {
    match value {
        Value::String(s) => s.to_lowercase().contains(needle),
        Value::Number(n) => n.to_string().contains(needle),
        Value::Array(items) => items.iter().any(|v| matches(v, needle)),
        Value::Object(fields) => fields.values().any(|v| matches(v, needle)),
        Value::Bool(_) | Value::Null => false,
    }
}

pub fn paginate(rows: Vec<Value>, query: &TableQuery) -> Page<Value> {
    let rows: Vec<Value> = match query.needle() {
        Some(needle) => rows.into_iter().filter(|r| matches(r, &needle)).collect(),
        None => rows,
    };

    let page = query.page();
    let page_size = query.page_size();
    let total = rows.len();
    let total_pages = total.div_ceil(page_size);

    let items = rows
        .into_iter()
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .collect();

    Page {
        items,
        total,
        page,
        page_size,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn clients() -> Vec<Value> {
        (1..=23)
            .map(|i| json!({"id": i, "firstName": format!("Cliente {}", i), "phone": "809-555-0000"}))
            .collect()
    }

    #[test]
    fn pages_through_rows() {
        let query = TableQuery {
            page: Some(3),
            ..Default::default()
        };
        let page = paginate(clients(), &query);

        assert_eq!(page.total, 23);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.items[0]["id"], 21);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let query = TableQuery {
            page: Some(9),
            ..Default::default()
        };
        let page = paginate(clients(), &query);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 23);
    }

    #[test]
    fn search_is_case_insensitive_over_nested_fields() {
        let rows = vec![
            json!({"id": 1, "plate": "A123456", "client": {"name": "Pedro Almonte"}}),
            json!({"id": 2, "plate": "G778899", "client": {"name": "Rosa Báez"}}),
        ];
        let query = TableQuery {
            search: Some("  ALMONTE ".into()),
            ..Default::default()
        };

        let page = paginate(rows, &query);
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0]["id"], 1);
    }

    #[test]
    fn search_matches_numbers() {
        let query = TableQuery {
            search: Some("17".into()),
            page_size: Some(50),
            ..Default::default()
        };
        let page = paginate(clients(), &query);
        assert_eq!(page.total, 1);
    }

    #[test]
    fn page_size_is_clamped() {
        let query = TableQuery {
            page: Some(0),
            page_size: Some(1000),
            search: None,
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.page_size(), MAX_PAGE_SIZE);
    }
}
