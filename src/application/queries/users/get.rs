use super::UserQueryService;
use crate::{
    application::{
        dto::UserDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::Nickname,
};
use tracing::instrument;

pub struct GetUserQuery {
    pub nickname: String,
}

impl UserQueryService {
    #[instrument(name = "users.get", skip(self, query), fields(nickname = %query.nickname))]
    pub async fn get_user(&self, query: GetUserQuery) -> ApplicationResult<UserDto> {
        let nickname = Nickname::new(query.nickname)?;
        let user = self
            .user_repo
            .find_by_nickname(&nickname)
            .await?
            .ok_or_else(|| ApplicationError::not_found("user not found"))?;

        Ok(user.into())
    }
}
