use std::sync::Arc;

use crate::domain::user::{UserRepository, ViewerPolicy};

pub struct UserCommandService {
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) viewer_policy: ViewerPolicy,
}

impl UserCommandService {
    pub fn new(user_repo: Arc<dyn UserRepository>, viewer_policy: ViewerPolicy) -> Self {
        Self {
            user_repo,
            viewer_policy,
        }
    }
}
