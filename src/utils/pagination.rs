use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 100;
const MAX_LIMIT: i64 = 500;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Page {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: if page < 1 { DEFAULT_PAGE } else { page },
            limit: if limit < 1 { DEFAULT_LIMIT } else { limit.min(MAX_LIMIT) },
        }
    }

    /// Rows to skip. Saturates so an absurd page number yields an empty page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// [`Page::offset`] for in-process slicing.
    pub fn skip(&self) -> usize {
        usize::try_from(self.offset()).unwrap_or(usize::MAX)
    }

    pub fn total_pages(&self, total: i64) -> i64 {
        (total + self.limit - 1) / self.limit
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

impl From<PageQuery> for Page {
    fn from(query: PageQuery) -> Self {
        Page::new(
            query.page.unwrap_or(DEFAULT_PAGE),
            query.limit.unwrap_or(DEFAULT_LIMIT),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub events: Vec<T>,
    pub total: i64,
    pub current_page: i64,
    pub total_pages: i64,
}

impl<T> Paginated<T> {
    pub fn new(events: Vec<T>, total: i64, page: Page) -> Self {
        Self {
            events,
            total,
            current_page: page.page,
            total_pages: page.total_pages(total),
        }
    }
}
