// tests/support/mocks/user_repo.rs
use async_trait::async_trait;
use rating_core::domain::errors::{DomainError, DomainResult};
use rating_core::domain::user::{
    Counter, NewUser, Nickname, PageRequest, Rating, SortOrder, User, UserId, UserRepository,
    UserUpdate,
};
use std::sync::{
    Mutex,
    atomic::{AtomicU64, AtomicUsize, Ordering},
};
use std::time::Duration;

/// Behaves like the Postgres table: unique nicknames, `likes <= viewers`,
/// guarded updates, ties broken by id.
#[derive(Default)]
pub struct InMemoryUserRepo {
    state: Mutex<State>,
    calls: AtomicUsize,
    latency_ms: AtomicU64,
}

#[derive(Default)]
struct State {
    users: Vec<User>,
    next_id: i64,
    // Counters written "by someone else" right before the next update runs.
    interleaved_write: Option<(String, i32, i32)>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of repository calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Simulate a concurrent writer landing between the service's read and
    /// its guarded update.
    pub fn interleave_write_before_update(&self, nickname: &str, likes: i32, viewers: i32) {
        let mut state = self.state.lock().unwrap();
        state.interleaved_write = Some((nickname.to_string(), likes, viewers));
    }

    /// Delay every call, to exercise request timeouts.
    pub fn set_latency(&self, latency: Duration) {
        let millis = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        self.latency_ms.store(millis, Ordering::SeqCst);
    }

    pub fn snapshot(&self, nickname: &str) -> Option<User> {
        let state = self.state.lock().unwrap();
        state
            .users
            .iter()
            .find(|u| u.nickname.as_str() == nickname)
            .cloned()
    }

    async fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let millis = self.latency_ms.load(Ordering::SeqCst);
        if millis > 0 {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
    }
}

fn counter(value: i32) -> Counter {
    Counter::new(i64::from(value), "counter").unwrap()
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        self.touch().await;
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|u| u.nickname == new_user.nickname) {
            return Err(DomainError::Conflict("nickname already exists".into()));
        }
        if new_user.likes > new_user.viewers {
            return Err(DomainError::Validation(
                "likes cannot be more than viewers".into(),
            ));
        }

        state.next_id += 1;
        let user = User {
            id: UserId(state.next_id),
            name: new_user.name,
            nickname: new_user.nickname,
            likes: new_user.likes,
            viewers: new_user.viewers,
            rating: Rating::derive(new_user.likes, new_user.viewers),
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_nickname(&self, nickname: &Nickname) -> DomainResult<Option<User>> {
        self.touch().await;
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| &u.nickname == nickname).cloned())
    }

    async fn list_page(&self, page: PageRequest) -> DomainResult<(Vec<User>, u64)> {
        self.touch().await;
        let state = self.state.lock().unwrap();
        let mut users = state.users.clone();
        match page.sort {
            SortOrder::Natural => users.sort_by_key(|u| u.id),
            SortOrder::Asc => users.sort_by_key(|u| (u.rating, u.id)),
            SortOrder::Desc => users.sort_by(|a, b| b.rating.cmp(&a.rating).then(a.id.cmp(&b.id))),
        }
        let total = u64::try_from(users.len()).unwrap();
        let data = users
            .into_iter()
            .skip(usize::try_from(page.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit).unwrap_or(usize::MAX))
            .collect();
        Ok((data, total))
    }

    async fn update(&self, update: UserUpdate) -> DomainResult<u64> {
        self.touch().await;
        let mut state = self.state.lock().unwrap();

        if let Some((nickname, likes, viewers)) = state.interleaved_write.take() {
            if let Some(user) = state
                .users
                .iter_mut()
                .find(|u| u.nickname.as_str() == nickname)
            {
                user.likes = counter(likes);
                user.viewers = counter(viewers);
                user.rating = Rating::derive(user.likes, user.viewers);
            }
        }

        if let Some(new_nickname) = &update.patch.nickname {
            let taken = state
                .users
                .iter()
                .any(|u| &u.nickname == new_nickname && u.nickname != update.nickname);
            if taken {
                return Err(DomainError::Conflict("nickname already exists".into()));
            }
        }

        let Some(user) = state
            .users
            .iter_mut()
            .find(|u| u.nickname == update.nickname)
        else {
            return Ok(0);
        };

        if !update.guards.iter().all(|guard| guard.is_satisfied_by(user)) {
            return Ok(0);
        }

        let mut next = user.clone();
        next.apply(&update.patch);
        if next.likes > next.viewers {
            return Err(DomainError::Validation(
                "likes cannot be more than viewers".into(),
            ));
        }
        *user = next;
        Ok(1)
    }

    async fn delete(&self, nickname: &Nickname) -> DomainResult<u64> {
        self.touch().await;
        let mut state = self.state.lock().unwrap();
        let before = state.users.len();
        state.users.retain(|u| &u.nickname != nickname);
        Ok(u64::try_from(before - state.users.len()).unwrap())
    }
}
