//! Route handlers for the exercise-tracking API.
//!
//! Four JSON routes plus a static landing page. POST bodies are
//! urlencoded form fields, responses use the `_id` wire name for user
//! ids. Dates cross the wire as `YYYY-MM-DD` on input and in the fixed
//! display form (e.g. "Mon Jan 15 2024") on output.

use crate::error::{ApiError, ApiResult};
use actix_web::{get, post, web, HttpResponse};
use chrono::NaiveDate;
use fitlog_core::{format_log, ExerciseView, LogQuery, NewExercise, UserStore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const LANDING_PAGE: &str = include_str!("../static/index.html");

/// Wire projection of a user, log omitted
#[derive(Serialize)]
struct UserDto {
    username: String,
    #[serde(rename = "_id")]
    id: Uuid,
}

#[derive(Deserialize)]
struct CreateUserForm {
    #[serde(default)]
    username: String,
}

#[derive(Deserialize)]
struct ExerciseForm {
    #[serde(default)]
    description: String,
    duration: Option<String>,
    date: Option<String>,
}

#[derive(Deserialize)]
struct LogParams {
    from: Option<String>,
    to: Option<String>,
    limit: Option<String>,
}

/// Merged view returned after an append
#[derive(Serialize)]
struct AppendedDto {
    #[serde(rename = "_id")]
    id: Uuid,
    username: String,
    description: String,
    duration: i64,
    date: String,
}

/// Filtered log view; `count` is the size of the filtered result, not of
/// the stored log
#[derive(Serialize)]
struct LogDto {
    #[serde(rename = "_id")]
    id: Uuid,
    username: String,
    count: usize,
    log: Vec<ExerciseView>,
}

/// GET / - static landing page
#[get("/")]
pub async fn landing() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(LANDING_PAGE)
}

/// POST /api/users - create a user with an empty log
#[post("/api/users")]
pub async fn create_user(
    store: web::Data<UserStore>,
    form: web::Form<CreateUserForm>,
) -> ApiResult<HttpResponse> {
    let user = store.create_user(&form.username)?;
    Ok(HttpResponse::Ok().json(UserDto {
        username: user.username,
        id: user.id,
    }))
}

/// GET /api/users - list all users (store-defined order)
#[get("/api/users")]
pub async fn list_users(store: web::Data<UserStore>) -> ApiResult<HttpResponse> {
    let users = store.list_users()?;
    let dtos: Vec<UserDto> = users
        .into_iter()
        .map(|u| UserDto {
            username: u.username,
            id: u.id,
        })
        .collect();
    Ok(HttpResponse::Ok().json(dtos))
}

/// POST /api/users/{_id}/exercises - append one exercise to a user's log
#[post("/api/users/{_id}/exercises")]
pub async fn add_exercise(
    store: web::Data<UserStore>,
    path: web::Path<String>,
    form: web::Form<ExerciseForm>,
) -> ApiResult<HttpResponse> {
    let id_text = path.into_inner();
    let duration = parse_duration(form.duration.as_deref())?;
    let date = parse_optional_date(form.date.as_deref())?;

    let appended = store
        .append_exercise(
            &id_text,
            NewExercise {
                description: form.description.clone(),
                duration,
                date,
            },
        )?
        .ok_or_else(ApiError::user_not_found)?;

    Ok(HttpResponse::Ok().json(AppendedDto {
        id: appended.id,
        username: appended.username,
        description: appended.description,
        duration: appended.duration,
        date: appended.date,
    }))
}

/// GET /api/users/{_id}/logs - filtered view of a user's log
///
/// Malformed `from`/`to`/`limit` values produce an empty result rather
/// than an error; that coercion is part of the contract (see
/// [`fitlog_core::LogQuery`]).
#[get("/api/users/{_id}/logs")]
pub async fn get_logs(
    store: web::Data<UserStore>,
    path: web::Path<String>,
    params: web::Query<LogParams>,
) -> ApiResult<HttpResponse> {
    let user = store
        .find_user(&path.into_inner())?
        .ok_or_else(ApiError::user_not_found)?;

    let query = LogQuery::from_raw(
        params.from.as_deref(),
        params.to.as_deref(),
        params.limit.as_deref(),
    );
    let log = format_log(&query.apply(&user.log));

    Ok(HttpResponse::Ok().json(LogDto {
        id: user.id,
        username: user.username,
        count: log.len(),
        log,
    }))
}

/// The duration form field is required and must be a whole number of
/// minutes. Positivity is not enforced.
fn parse_duration(text: Option<&str>) -> Result<i64, ApiError> {
    let text = text
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::validation("duration is required"))?;
    text.parse::<i64>()
        .map_err(|_| ApiError::validation("duration must be a whole number of minutes"))
}

/// The date form field is optional; when present it must be `YYYY-MM-DD`.
fn parse_optional_date(text: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    match text.map(str::trim).filter(|t| !t.is_empty()) {
        None => Ok(None),
        Some(t) => t
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(|_| ApiError::validation("date must be a YYYY-MM-DD date")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_accepts_integers() {
        assert_eq!(parse_duration(Some("30")).unwrap(), 30);
        assert_eq!(parse_duration(Some(" 45 ")).unwrap(), 45);
        // Positivity deliberately not enforced
        assert_eq!(parse_duration(Some("-5")).unwrap(), -5);
    }

    #[test]
    fn test_parse_duration_rejects_missing_or_garbage() {
        assert!(parse_duration(None).is_err());
        assert!(parse_duration(Some("")).is_err());
        assert!(parse_duration(Some("30 minutes")).is_err());
    }

    #[test]
    fn test_parse_optional_date() {
        assert_eq!(parse_optional_date(None).unwrap(), None);
        assert_eq!(parse_optional_date(Some("")).unwrap(), None);
        assert_eq!(
            parse_optional_date(Some("2024-01-15")).unwrap(),
            Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );
        assert!(parse_optional_date(Some("January 15")).is_err());
    }
}
