use crate::domain::errors::DomainError;

const CNT_USER_NICKNAME: &str = "users_nickname_key";
const CNT_USER_LIKES_WITHIN_VIEWERS: &str = "users_likes_within_viewers_chk";
const CNT_USER_LIKES_NONNEGATIVE: &str = "users_likes_nonnegative_chk";
const CNT_USER_VIEWERS_NONNEGATIVE: &str = "users_viewers_nonnegative_chk";
const CNT_USER_NAME_NOT_BLANK: &str = "users_name_not_blank_chk";
const CNT_USER_NICKNAME_NOT_BLANK: &str = "users_nickname_not_blank_chk";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(mapped) = db_err.constraint().and_then(map_constraint) {
                return mapped;
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}

fn map_constraint(constraint: &str) -> Option<DomainError> {
    let mapped = match constraint {
        CNT_USER_NICKNAME => DomainError::Conflict("nickname already exists".into()),
        CNT_USER_LIKES_WITHIN_VIEWERS => {
            DomainError::Validation("likes cannot be more than viewers".into())
        }
        CNT_USER_LIKES_NONNEGATIVE => DomainError::Validation("likes cannot be negative".into()),
        CNT_USER_VIEWERS_NONNEGATIVE => {
            DomainError::Validation("viewers cannot be negative".into())
        }
        CNT_USER_NAME_NOT_BLANK => DomainError::Validation("name cannot be empty".into()),
        CNT_USER_NICKNAME_NOT_BLANK => DomainError::Validation("nickname cannot be empty".into()),
        _ => return None,
    };
    Some(mapped)
}
