// src/infrastructure/repositories/postgres_user.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::{
    Counter, DisplayName, NewUser, Nickname, PageRequest, Rating, SortOrder, UpdateGuard, User,
    UserId, UserRepository, UserUpdate,
};
use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn build_update_query(update: UserUpdate) -> DomainResult<QueryBuilder<'static, Postgres>> {
        let UserUpdate {
            nickname,
            patch,
            guards,
        } = update;

        if patch.is_empty() {
            return Err(DomainError::Validation(
                "no fields provided for update".into(),
            ));
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE users SET ");
        let mut first = true;

        if let Some(name) = patch.name {
            push_assignment(&mut builder, &mut first, "name");
            builder.push_bind(String::from(name));
        }

        if let Some(new_nickname) = patch.nickname {
            push_assignment(&mut builder, &mut first, "nickname");
            builder.push_bind(String::from(new_nickname));
        }

        if let Some(likes) = patch.likes {
            push_assignment(&mut builder, &mut first, "likes");
            builder.push_bind(likes.value());
        }

        if let Some(viewers) = patch.viewers {
            push_assignment(&mut builder, &mut first, "viewers");
            builder.push_bind(viewers.value());
        }

        builder.push(" WHERE nickname = ");
        builder.push_bind(String::from(nickname));

        // Guards compare against the row as it is before this statement runs.
        for guard in guards {
            match guard {
                UpdateGuard::LikesWithinViewers(likes) => {
                    builder.push(" AND viewers >= ");
                    builder.push_bind(likes.value());
                }
                UpdateGuard::ViewersCoverLikes(viewers) => {
                    builder.push(" AND likes <= ");
                    builder.push_bind(viewers.value());
                }
                UpdateGuard::ViewersNotDecreasing(viewers) => {
                    builder.push(" AND viewers <= ");
                    builder.push_bind(viewers.value());
                }
            }
        }

        Ok(builder)
    }

    fn order_clause(sort: SortOrder) -> &'static str {
        match sort {
            SortOrder::Natural => " ORDER BY id ASC",
            SortOrder::Asc => " ORDER BY rating ASC, id ASC",
            SortOrder::Desc => " ORDER BY rating DESC, id ASC",
        }
    }
}

fn push_assignment(builder: &mut QueryBuilder<Postgres>, first: &mut bool, column: &str) {
    if !*first {
        builder.push(", ");
    }
    *first = false;
    builder.push(column);
    builder.push(" = ");
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    name: String,
    nickname: String,
    likes: i32,
    viewers: i32,
    rating_thousandths: i64,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::new(row.id)?,
            name: DisplayName::new(row.name)?,
            nickname: Nickname::new(row.nickname)?,
            likes: Counter::new(i64::from(row.likes), "likes")?,
            viewers: Counter::new(i64::from(row.viewers), "viewers")?,
            rating: Rating::from_thousandths(row.rating_thousandths),
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let NewUser {
            name,
            nickname,
            likes,
            viewers,
        } = new_user;

        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (name, nickname, likes, viewers)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, nickname, likes, viewers, (rating * 1000)::BIGINT AS rating_thousandths",
        )
        .bind(name.as_str())
        .bind(nickname.as_str())
        .bind(likes.value())
        .bind(viewers.value())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        User::try_from(row)
    }

    async fn find_by_nickname(&self, nickname: &Nickname) -> DomainResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, nickname, likes, viewers, (rating * 1000)::BIGINT AS rating_thousandths
             FROM users WHERE nickname = $1",
        )
        .bind(nickname.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(User::try_from).transpose()
    }

    async fn list_page(&self, page: PageRequest) -> DomainResult<(Vec<User>, u64)> {
        let offset = i64::try_from(page.offset).unwrap_or(i64::MAX);

        // Count and page come from the same snapshot.
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(1) FROM users")
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, name, nickname, likes, viewers, (rating * 1000)::BIGINT AS rating_thousandths FROM users",
        );
        builder.push(Self::order_clause(page.sort));
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(page.limit));
        builder.push(" OFFSET ");
        builder.push_bind(offset);

        let rows = builder
            .build_query_as::<UserRow>()
            .fetch_all(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;

        let users = rows
            .into_iter()
            .map(User::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((users, u64::try_from(total).unwrap_or_default()))
    }

    async fn update(&self, update: UserUpdate) -> DomainResult<u64> {
        let mut builder = Self::build_update_query(update)?;

        builder
            .build()
            .execute(&self.pool)
            .await
            .map(|result| result.rows_affected())
            .map_err(map_sqlx)
    }

    async fn delete(&self, nickname: &Nickname) -> DomainResult<u64> {
        sqlx::query("DELETE FROM users WHERE nickname = $1")
            .bind(nickname.as_str())
            .execute(&self.pool)
            .await
            .map(|result| result.rows_affected())
            .map_err(map_sqlx)
    }
}
