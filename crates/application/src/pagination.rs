use crate::log_ports::EntryRange;

#[cfg(test)]
mod tests;

/// Default page size for change-record listings.
pub const LISTING_PAGE_SIZE: u32 = 5;

/// Parsed value of the `page` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageParam {
    /// Fetch every matching entry and disable the pager.
    All,
    /// Fetch one page, 1-based.
    Number(u32),
}

impl PageParam {
    /// Parses the raw query value.
    ///
    /// Absent, non-numeric and non-positive values all normalize to page 1;
    /// bad pagination input is never an error.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => Self::Number(1),
            Some("all") => Self::All,
            Some(value) => match value.parse::<u32>() {
                Ok(page) if page >= 1 => Self::Number(page),
                _ => Self::Number(1),
            },
        }
    }
}

/// Resolved pagination window for one listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Current 1-based page, unset when the pager is disabled.
    pub page: Option<u32>,
    /// Page size, unset when every entry is fetched.
    pub limit: Option<u32>,
    /// Rows skipped before the first returned row.
    pub offset: u64,
}

impl PageWindow {
    /// Resolves a window from the parsed `page` parameter and a page size.
    #[must_use]
    pub fn resolve(param: PageParam, page_size: u32) -> Self {
        match param {
            PageParam::All => Self {
                page: None,
                limit: None,
                offset: 0,
            },
            PageParam::Number(page) => {
                // Pages are 1-based; clamp so a raw Number(0) cannot
                // underflow the offset.
                let page = page.max(1);
                Self {
                    page: Some(page),
                    limit: Some(page_size),
                    offset: u64::from(page - 1) * u64::from(page_size),
                }
            }
        }
    }

    /// Returns the row range to hand to the storage port.
    #[must_use]
    pub fn range(&self) -> EntryRange {
        EntryRange {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// Number of pages needed for `total` entries, or `None` when the limit is
/// unbounded. Rendering skips the pager widget when unset.
#[must_use]
pub fn page_count(total: u64, limit: Option<u32>) -> Option<u32> {
    let limit = u64::from(limit?);
    if limit == 0 {
        return None;
    }
    let pages = total.div_ceil(limit);
    u32::try_from(pages).ok().or(Some(u32::MAX))
}
