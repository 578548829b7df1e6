// src/domain/user/entity.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::specifications::UpdateGuard;
use crate::domain::user::value_objects::{Counter, DisplayName, Nickname, Rating, UserId};

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: DisplayName,
    pub nickname: Nickname,
    pub likes: Counter,
    pub viewers: Counter,
    pub rating: Rating,
}

impl User {
    /// Apply a patch in memory, recomputing the rating the way the store does.
    pub fn apply(&mut self, patch: &UserPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(nickname) = &patch.nickname {
            self.nickname = nickname.clone();
        }
        if let Some(likes) = patch.likes {
            self.likes = likes;
        }
        if let Some(viewers) = patch.viewers {
            self.viewers = viewers;
        }
        self.rating = Rating::derive(self.likes, self.viewers);
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: DisplayName,
    pub nickname: Nickname,
    pub likes: Counter,
    pub viewers: Counter,
}

impl NewUser {
    pub fn new(
        name: DisplayName,
        nickname: Nickname,
        likes: Counter,
        viewers: Counter,
    ) -> DomainResult<Self> {
        ensure_likes_within_viewers(likes, viewers)?;
        Ok(Self {
            name,
            nickname,
            likes,
            viewers,
        })
    }
}

/// Sparse set of field changes. `None` leaves the stored column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub name: Option<DisplayName>,
    pub nickname: Option<Nickname>,
    pub likes: Option<Counter>,
    pub viewers: Option<Counter>,
}

impl UserPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: DisplayName) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_nickname(mut self, nickname: Nickname) -> Self {
        self.nickname = Some(nickname);
        self
    }

    pub fn with_likes(mut self, likes: Counter) -> Self {
        self.likes = Some(likes);
        self
    }

    pub fn with_viewers(mut self, viewers: Counter) -> Self {
        self.viewers = Some(viewers);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.nickname.is_none() && self.likes.is_none() && self.viewers.is_none()
    }

    /// Checks that only need the patch itself.
    pub fn validate(&self) -> DomainResult<()> {
        if self.is_empty() {
            return Err(DomainError::Validation(
                "at least one field must be provided".into(),
            ));
        }
        if let (Some(likes), Some(viewers)) = (self.likes, self.viewers) {
            ensure_likes_within_viewers(likes, viewers)?;
        }
        Ok(())
    }
}

/// A partial update addressed by nickname, together with the conditions the
/// stored row has to satisfy for it to apply.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub nickname: Nickname,
    pub patch: UserPatch,
    pub guards: Vec<UpdateGuard>,
}

fn ensure_likes_within_viewers(likes: Counter, viewers: Counter) -> DomainResult<()> {
    if likes > viewers {
        return Err(DomainError::Validation(
            "likes cannot be more than viewers".into(),
        ));
    }
    Ok(())
}
