use super::UserCommandService;
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::user::{
        Counter, DisplayName, Nickname, UpdateGuard, UserPatch, UserUpdate,
        specifications::{ensure_guards, guards_for},
    },
};
use tracing::{debug, info, instrument};

/// Sparse update addressed by the current nickname. `None` leaves a field as
/// it is.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserCommand {
    pub nickname: String,
    pub name: Option<String>,
    pub new_nickname: Option<String>,
    pub likes: Option<i64>,
    pub viewers: Option<i64>,
}

impl UpdateUserCommand {
    fn into_patch(self) -> ApplicationResult<(Nickname, UserPatch)> {
        let nickname = Nickname::new(self.nickname)?;
        let patch = UserPatch {
            name: self.name.map(DisplayName::new).transpose()?,
            nickname: self.new_nickname.map(Nickname::new).transpose()?,
            likes: self
                .likes
                .map(|value| Counter::new(value, "likes"))
                .transpose()?,
            viewers: self
                .viewers
                .map(|value| Counter::new(value, "viewers"))
                .transpose()?,
        };
        patch.validate()?;
        Ok((nickname, patch))
    }
}

impl UserCommandService {
    #[instrument(
        name = "users.update",
        skip(self, command),
        fields(nickname = %command.nickname, policy = %self.viewer_policy)
    )]
    pub async fn update_user(&self, command: UpdateUserCommand) -> ApplicationResult<()> {
        let (nickname, patch) = command.into_patch()?;
        let guards = guards_for(&patch, self.viewer_policy);

        if !guards.is_empty() {
            let current = self
                .user_repo
                .find_by_nickname(&nickname)
                .await?
                .ok_or_else(|| ApplicationError::not_found("user not found"))?;

            if let Err(err) = ensure_guards(&guards, &current) {
                debug!(error = %err, "update rejected against stored counters");
                return Err(err.into());
            }
        }

        let affected = self
            .user_repo
            .update(UserUpdate {
                nickname: nickname.clone(),
                patch,
                guards: guards.clone(),
            })
            .await?;

        if affected == 0 {
            return Err(self.explain_unapplied_update(&nickname, &guards).await);
        }

        info!("user updated");
        Ok(())
    }

    /// Zero rows means either the user is gone or a concurrent write made one
    /// of the guards false between our read and the update.
    async fn explain_unapplied_update(
        &self,
        nickname: &Nickname,
        guards: &[UpdateGuard],
    ) -> ApplicationError {
        match self.user_repo.find_by_nickname(nickname).await {
            Ok(Some(current)) => {
                debug!("update guards no longer hold");
                match ensure_guards(guards, &current) {
                    Err(err) => err.into(),
                    Ok(()) => ApplicationError::invalid_input(
                        "user was modified concurrently, retry the update",
                    ),
                }
            }
            Ok(None) => ApplicationError::not_found("user not found"),
            Err(err) => err.into(),
        }
    }
}
