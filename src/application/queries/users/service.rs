use std::sync::Arc;

use crate::domain::user::UserRepository;

pub struct UserQueryService {
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) max_page_size: u32,
}

impl UserQueryService {
    pub fn new(user_repo: Arc<dyn UserRepository>, max_page_size: u32) -> Self {
        Self {
            user_repo,
            max_page_size,
        }
    }
}
