use super::UserQueryService;
use crate::{
    application::{
        dto::{OffsetPage, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{PageRequest, SortOrder},
};
use tracing::{debug, instrument};

#[derive(Debug, Clone, Default)]
pub struct ListUsersQuery {
    pub sort: String,
    pub limit: i64,
    pub offset: i64,
}

impl UserQueryService {
    #[instrument(
        name = "users.list",
        skip(self, query),
        fields(sort = %query.sort, limit = query.limit, offset = query.offset)
    )]
    pub async fn list_users(&self, query: ListUsersQuery) -> ApplicationResult<OffsetPage<UserDto>> {
        let sort: SortOrder = query.sort.parse()?;
        let limit = self.validate_limit(query.limit)?;
        let offset = u64::try_from(query.offset)
            .map_err(|_| ApplicationError::invalid_input("offset cannot be negative"))?;

        let (users, total_count) = self
            .user_repo
            .list_page(PageRequest {
                sort,
                limit,
                offset,
            })
            .await?;

        debug!(returned = users.len(), total_count, "listed users");
        let data = users.into_iter().map(Into::into).collect();
        Ok(OffsetPage::new(data, total_count, limit, offset))
    }

    fn validate_limit(&self, limit: i64) -> ApplicationResult<u32> {
        if limit < 1 {
            return Err(ApplicationError::invalid_input("limit must be at least 1"));
        }
        match u32::try_from(limit) {
            Ok(limit) if limit <= self.max_page_size => Ok(limit),
            _ => Err(ApplicationError::invalid_input(format!(
                "limit cannot exceed {}",
                self.max_page_size
            ))),
        }
    }
}
