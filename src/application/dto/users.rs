use crate::domain::user::User;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub nickname: String,
    pub likes: i32,
    pub viewers: i32,
    /// `likes / viewers` rounded to three decimals, `0` without viewers.
    #[schema(example = 0.3)]
    pub rating: f64,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into(),
            name: user.name.into(),
            nickname: user.nickname.into(),
            likes: user.likes.into(),
            viewers: user.viewers.into(),
            rating: user.rating.as_f64(),
        }
    }
}
