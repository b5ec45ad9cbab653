//! Page-number pagination for list endpoints.

use crate::error::CoreError;

/// Rows per page on every list endpoint.
pub const PAGE_SIZE: i64 = 5;

/// A resolved page request: which rows to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: i64,
    pub offset: i64,
}

/// Translate a 1-based page number into a limit/offset window.
///
/// `None` means the first page.
pub fn page_window(page: Option<i64>, page_size: i64) -> Result<PageWindow, CoreError> {
    let page = page.unwrap_or(1);
    if page < 1 {
        return Err(CoreError::Validation(format!(
            "page must be >= 1, got {page}"
        )));
    }
    let offset = (page - 1)
        .checked_mul(page_size)
        .ok_or_else(|| CoreError::Validation(format!("page {page} is out of range")))?;
    Ok(PageWindow {
        limit: page_size,
        offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_by_default() {
        assert_eq!(
            page_window(None, PAGE_SIZE).unwrap(),
            PageWindow { limit: 5, offset: 0 }
        );
    }

    #[test]
    fn later_pages_skip_earlier_rows() {
        assert_eq!(page_window(Some(3), PAGE_SIZE).unwrap().offset, 10);
    }

    #[test]
    fn page_zero_is_rejected() {
        assert!(page_window(Some(0), PAGE_SIZE).is_err());
        assert!(page_window(Some(-4), PAGE_SIZE).is_err());
    }

    #[test]
    fn overflowing_page_is_rejected() {
        assert!(page_window(Some(i64::MAX), PAGE_SIZE).is_err());
    }
}
