use crate::domain::errors::DomainResult;
use crate::domain::user::{
    entity::{NewUser, User, UserUpdate},
    value_objects::{Nickname, PageRequest},
};
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user. A taken nickname surfaces as `DomainError::Conflict`.
    async fn insert(&self, new_user: NewUser) -> DomainResult<User>;

    async fn find_by_nickname(&self, nickname: &Nickname) -> DomainResult<Option<User>>;

    /// One page in the requested order plus the total number of users.
    async fn list_page(&self, page: PageRequest) -> DomainResult<(Vec<User>, u64)>;

    /// Apply the patch only where every guard holds. Returns rows affected.
    async fn update(&self, update: UserUpdate) -> DomainResult<u64>;

    async fn delete(&self, nickname: &Nickname) -> DomainResult<u64>;
}
