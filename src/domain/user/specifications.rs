// src/domain/user/specifications.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::entity::{User, UserPatch};
use crate::domain::user::value_objects::Counter;
use std::{fmt, str::FromStr};

/// Whether a viewer count may be lowered by an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewerPolicy {
    #[default]
    Monotonic,
    Free,
}

impl ViewerPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewerPolicy::Monotonic => "monotonic",
            ViewerPolicy::Free => "free",
        }
    }
}

impl fmt::Display for ViewerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewerPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monotonic" => Ok(ViewerPolicy::Monotonic),
            "free" => Ok(ViewerPolicy::Free),
            other => Err(DomainError::Validation(format!(
                "unknown viewer policy '{other}'"
            ))),
        }
    }
}

/// Condition on the currently stored row. Each guard is checked by the service
/// against a fresh read and repeated in the `WHERE` clause of the update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateGuard {
    /// New likes must not exceed the stored viewers.
    LikesWithinViewers(Counter),
    /// New viewers must not drop below the stored likes.
    ViewersCoverLikes(Counter),
    /// New viewers must not drop below the stored viewers.
    ViewersNotDecreasing(Counter),
}

impl UpdateGuard {
    pub fn is_satisfied_by(&self, current: &User) -> bool {
        match *self {
            UpdateGuard::LikesWithinViewers(likes) => likes <= current.viewers,
            UpdateGuard::ViewersCoverLikes(viewers) => viewers >= current.likes,
            UpdateGuard::ViewersNotDecreasing(viewers) => viewers >= current.viewers,
        }
    }

    pub fn violation(&self) -> &'static str {
        match self {
            UpdateGuard::LikesWithinViewers(_) => "likes cannot be more than viewers",
            UpdateGuard::ViewersCoverLikes(_) => "viewers cannot be less than likes",
            UpdateGuard::ViewersNotDecreasing(_) => {
                "viewers cannot be less than previous value"
            }
        }
    }
}

/// Guards a patch needs under the given policy. Empty when the patch can be
/// applied without looking at the stored row.
pub fn guards_for(patch: &UserPatch, policy: ViewerPolicy) -> Vec<UpdateGuard> {
    let mut guards = Vec::new();

    match (patch.likes, patch.viewers) {
        (Some(likes), None) => guards.push(UpdateGuard::LikesWithinViewers(likes)),
        (None, Some(viewers)) => guards.push(UpdateGuard::ViewersCoverLikes(viewers)),
        _ => {}
    }

    if let (Some(viewers), ViewerPolicy::Monotonic) = (patch.viewers, policy) {
        guards.push(UpdateGuard::ViewersNotDecreasing(viewers));
    }

    guards
}

pub fn ensure_guards(guards: &[UpdateGuard], current: &User) -> DomainResult<()> {
    match guards.iter().find(|guard| !guard.is_satisfied_by(current)) {
        Some(guard) => Err(DomainError::Validation(guard.violation().into())),
        None => Ok(()),
    }
}
