pub mod pagination;
pub mod users;

pub use pagination::{OffsetPage, page_to_limit_offset};
pub use users::UserDto;
