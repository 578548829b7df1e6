use crate::application::error::{ApplicationError, ApplicationResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: serde::de::DeserializeOwned"
))]
pub struct OffsetPage<T> {
    pub data: Vec<T>,
    pub total_count: u64,
    pub limit: u32,
    pub offset: u64,
}

impl<T> OffsetPage<T> {
    pub fn new(data: Vec<T>, total_count: u64, limit: u32, offset: u64) -> Self {
        Self {
            data,
            total_count,
            limit,
            offset,
        }
    }

    /// 1-based page number this slice starts on.
    pub fn page(&self) -> u64 {
        self.offset / u64::from(self.limit.max(1)) + 1
    }

    pub fn total_pages(&self) -> u64 {
        self.total_count.div_ceil(u64::from(self.limit.max(1)))
    }
}

/// Translate page-number pagination into the `limit`/`offset` pair the query
/// service works with.
pub fn page_to_limit_offset(page: i64, page_size: i64) -> ApplicationResult<(i64, i64)> {
    if page < 1 {
        return Err(ApplicationError::invalid_input("page must be at least 1"));
    }
    if page_size < 1 {
        return Err(ApplicationError::invalid_input(
            "page_size must be at least 1",
        ));
    }
    let offset = (page - 1)
        .checked_mul(page_size)
        .ok_or_else(|| ApplicationError::invalid_input("page is out of range"))?;
    Ok((page_size, offset))
}
