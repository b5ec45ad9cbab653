//! Shared query parameter types for API handlers.

use serde::Deserialize;
use spycats_core::error::CoreError;
use spycats_core::pagination::{page_window, PageWindow, PAGE_SIZE};
use validator::Validate;

/// Page-number pagination parameters (`?page=`), 1-based.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PageParams {
    #[validate(range(min = 1, message = "Page must be a positive number"))]
    pub page: Option<i64>,
}

impl PageParams {
    /// The rows this page covers at the standard page size.
    pub fn window(&self) -> Result<PageWindow, CoreError> {
        page_window(self.page, PAGE_SIZE)
    }
}
