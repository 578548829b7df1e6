use super::UserCommandService;
use crate::{
    application::{
        dto::UserDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        errors::DomainError,
        user::{Counter, DisplayName, NewUser, Nickname},
    },
};
use tracing::{debug, info, instrument};

#[derive(Debug, Clone)]
pub struct CreateUserCommand {
    pub name: String,
    pub nickname: String,
    pub likes: i64,
    pub viewers: i64,
}

impl UserCommandService {
    #[instrument(
        name = "users.create",
        skip(self, command),
        fields(nickname = %command.nickname)
    )]
    pub async fn create_user(&self, command: CreateUserCommand) -> ApplicationResult<UserDto> {
        let name = DisplayName::new(command.name)?;
        let nickname = Nickname::new(command.nickname)?;
        let likes = Counter::new(command.likes, "likes")?;
        let viewers = Counter::new(command.viewers, "viewers")?;
        let new_user = NewUser::new(name, nickname.clone(), likes, viewers)?;

        // Uniqueness is left to the store so two concurrent creates cannot
        // both pass a pre-check.
        let user = self.user_repo.insert(new_user).await.map_err(|err| match err {
            DomainError::Conflict(_) => {
                debug!("nickname already taken");
                ApplicationError::already_exists(format!("nickname {nickname} already exists"))
            }
            other => ApplicationError::from(other),
        })?;

        info!(user_id = user.id.0, rating = %user.rating, "user created");
        Ok(user.into())
    }
}
