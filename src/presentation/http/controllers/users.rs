// src/presentation/http/controllers/users.rs
use crate::application::{
    ApplicationResult,
    commands::users::{CreateUserCommand, DeleteUserCommand, UpdateUserCommand},
    dto::{OffsetPage, UserDto, page_to_limit_offset},
    error::ApplicationError,
    queries::users::{GetUserQuery, ListUsersQuery},
};
use crate::domain::user::SortOrder;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::presentation::http::openapi::StatusResponse;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, http::StatusCode};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ListUsersParams {
    /// Order by rating: empty for insertion order, `asc` or `desc`.
    #[serde(default)]
    pub sort: String,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserListResponse {
    pub data: Vec<UserDto>,
    pub total_count: u64,
    pub page: u64,
    pub page_size: u32,
    pub total_pages: u64,
}

impl From<OffsetPage<UserDto>> for UserListResponse {
    fn from(page: OffsetPage<UserDto>) -> Self {
        Self {
            page: page.page(),
            total_pages: page.total_pages(),
            page_size: page.limit,
            total_count: page.total_count,
            data: page.data,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    pub name: String,
    pub nickname: String,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub viewers: i64,
}

/// Omitted fields stay as they are. Explicit `null` is rejected.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub nickname: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i64>)]
    pub likes: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i64>)]
    pub viewers: Option<Option<i64>>,
}

/// Marks a key that appeared in the body, keeping `null` distinguishable from
/// an omitted key.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn non_null<T>(field: &str, value: Option<Option<T>>) -> ApplicationResult<Option<T>> {
    match value {
        Some(None) => Err(ApplicationError::invalid_input(format!(
            "{field} cannot be null"
        ))),
        Some(Some(value)) => Ok(Some(value)),
        None => Ok(None),
    }
}

impl UpdateUserRequest {
    fn into_command(self, nickname: String) -> ApplicationResult<UpdateUserCommand> {
        Ok(UpdateUserCommand {
            nickname,
            name: non_null("name", self.name)?,
            new_nickname: non_null("nickname", self.nickname)?,
            likes: non_null("likes", self.likes)?,
            viewers: non_null("viewers", self.viewers)?,
        })
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created.", body = UserDto),
        (status = 400, description = "Invalid input.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Nickname already taken.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn create_user(
    Extension(state): Extension<HttpState>,
    ApiJson(payload): ApiJson<CreateUserRequest>,
) -> HttpResult<(StatusCode, Json<UserDto>)> {
    let command = CreateUserCommand {
        name: payload.name,
        nickname: payload.nickname,
        likes: payload.likes,
        viewers: payload.viewers,
    };

    let user = state
        .services
        .user_commands
        .create_user(command)
        .await
        .into_http()?;

    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(ListUsersParams),
    responses(
        (status = 200, description = "One page of users.", body = UserListResponse),
        (status = 400, description = "Invalid sort or pagination.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn list_users(
    Extension(state): Extension<HttpState>,
    ApiQuery(params): ApiQuery<ListUsersParams>,
) -> HttpResult<Json<UserListResponse>> {
    // A bad sort token is reported ahead of any paging error.
    params
        .sort
        .parse::<SortOrder>()
        .map_err(ApplicationError::from)
        .into_http()?;
    let (limit, offset) = page_to_limit_offset(params.page, params.page_size).into_http()?;

    state
        .services
        .user_queries
        .list_users(ListUsersQuery {
            sort: params.sort,
            limit,
            offset,
        })
        .await
        .into_http()
        .map(|page| Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{nickname}",
    params(("nickname" = String, Path, description = "Unique user handle")),
    responses(
        (status = 200, description = "The user.", body = UserDto),
        (status = 404, description = "No such user.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn get_user(
    Extension(state): Extension<HttpState>,
    ApiPath(nickname): ApiPath<String>,
) -> HttpResult<Json<UserDto>> {
    state
        .services
        .user_queries
        .get_user(GetUserQuery { nickname })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    patch,
    path = "/api/v1/users/{nickname}",
    params(("nickname" = String, Path, description = "Unique user handle")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated.", body = StatusResponse),
        (status = 400, description = "Invalid or conflicting fields.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No such user.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "New nickname already taken.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn update_user(
    Extension(state): Extension<HttpState>,
    ApiPath(nickname): ApiPath<String>,
    ApiJson(payload): ApiJson<UpdateUserRequest>,
) -> HttpResult<Json<StatusResponse>> {
    let command = payload.into_command(nickname).into_http()?;

    state
        .services
        .user_commands
        .update_user(command)
        .await
        .into_http()?;

    Ok(Json(StatusResponse {
        status: "ok".into(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{nickname}",
    params(("nickname" = String, Path, description = "Unique user handle")),
    responses(
        (status = 204, description = "User deleted."),
        (status = 404, description = "No such user.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn delete_user(
    Extension(state): Extension<HttpState>,
    ApiPath(nickname): ApiPath<String>,
) -> HttpResult<StatusCode> {
    state
        .services
        .user_commands
        .delete_user(DeleteUserCommand { nickname })
        .await
        .into_http()?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_and_null_fields_are_distinguished() {
        let request: UpdateUserRequest =
            serde_json::from_str(r#"{"likes": 4, "name": null}"#).unwrap();
        assert_eq!(request.likes, Some(Some(4)));
        assert_eq!(request.name, Some(None));
        assert_eq!(request.viewers, None);

        let err = request.into_command("ann1".into()).unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidInput(msg) if msg == "name cannot be null"));
    }

    #[test]
    fn rating_cannot_be_written() {
        let result = serde_json::from_str::<UpdateUserRequest>(r#"{"rating": 1.0}"#);
        assert!(result.is_err());

        let result = serde_json::from_str::<CreateUserRequest>(
            r#"{"name": "Ann", "nickname": "ann1", "rating": 1.0}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn present_fields_become_command_fields() {
        let request: UpdateUserRequest =
            serde_json::from_str(r#"{"nickname": "ann2", "viewers": 12}"#).unwrap();
        let command = request.into_command("ann1".into()).unwrap();

        assert_eq!(command.nickname, "ann1");
        assert_eq!(command.new_nickname.as_deref(), Some("ann2"));
        assert_eq!(command.viewers, Some(12));
        assert_eq!(command.likes, None);
        assert_eq!(command.name, None);
    }
}
