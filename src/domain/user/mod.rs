// src/domain/user/mod.rs
pub mod entity;
pub mod repository;
pub mod specifications;
pub mod value_objects;

pub use entity::{NewUser, User, UserPatch, UserUpdate};
pub use repository::UserRepository;
pub use specifications::{UpdateGuard, ViewerPolicy};
pub use value_objects::{
    Counter, DisplayName, Nickname, PageRequest, Rating, SortOrder, UserId,
};
