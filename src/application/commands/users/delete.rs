use super::UserCommandService;
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::user::Nickname,
};
use tracing::{info, instrument};

pub struct DeleteUserCommand {
    pub nickname: String,
}

impl UserCommandService {
    #[instrument(name = "users.delete", skip(self, command), fields(nickname = %command.nickname))]
    pub async fn delete_user(&self, command: DeleteUserCommand) -> ApplicationResult<()> {
        let nickname = Nickname::new(command.nickname)?;

        if self.user_repo.delete(&nickname).await? == 0 {
            return Err(ApplicationError::not_found("user not found"));
        }

        info!("user deleted");
        Ok(())
    }
}
