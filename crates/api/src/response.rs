//! Shared response body types for API handlers.

use serde::Serialize;

/// One page of a list endpoint: `{"items": [...], "count": <total>}`.
///
/// `count` is the number of rows across all pages, not on this page.
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub items: Vec<T>,
    pub count: i64,
}

/// Body of a successful delete: `{"success": true}`.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

impl DeleteResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
