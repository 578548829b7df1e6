// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{commands::users::UserCommandService, queries::users::UserQueryService},
    domain::user::{UserRepository, ViewerPolicy},
};

/// Policy knobs shared by the user services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    pub viewer_policy: ViewerPolicy,
    pub max_page_size: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            viewer_policy: ViewerPolicy::Monotonic,
            max_page_size: 100,
        }
    }
}

pub struct ApplicationServices {
    pub user_commands: Arc<UserCommandService>,
    pub user_queries: Arc<UserQueryService>,
}

impl ApplicationServices {
    pub fn new(user_repo: Arc<dyn UserRepository>, config: ServiceConfig) -> Self {
        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&user_repo),
            config.viewer_policy,
        ));
        let user_queries = Arc::new(UserQueryService::new(
            Arc::clone(&user_repo),
            config.max_page_size,
        ));

        Self {
            user_commands,
            user_queries,
        }
    }
}
