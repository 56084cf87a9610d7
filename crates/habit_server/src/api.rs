//! Route table, request handlers and error-to-status mapping.

use crate::AppState;
use axum::async_trait;
use axum::extract::{FromRequest, Path, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, patch, post};
use axum::{Form, Json, Router};
use habit_core::{Habit, HabitServiceError, ServiceResult, SuggestionSet};
use log::error;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::convert::Infallible;
use std::path::Path as FsPath;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

const INVALID_NAME_MESSAGE: &str = "Invalid habit name";
const MISSING_GOAL_MESSAGE: &str = "Missing goal in request body";
const NOT_FOUND_MESSAGE: &str = "Habit not found";
const INTERNAL_MESSAGE: &str = "Internal Server Error";

/// Handler failure rendered as `{"error": message}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message),
            Self::Internal(details) => {
                error!("event=request_failed module=api status=error error={details}");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<HabitServiceError> for ApiError {
    fn from(value: HabitServiceError) -> Self {
        match value {
            HabitServiceError::InvalidName(_) => Self::BadRequest(INVALID_NAME_MESSAGE.to_string()),
            HabitServiceError::NotFound(_) => Self::NotFound(NOT_FOUND_MESSAGE.to_string()),
            HabitServiceError::Repo(err) => Self::Internal(err.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct DeletedHabit {
    deleted: bool,
    habit: Habit,
}

/// Builds the application router.
///
/// When `static_dir` exists, unmatched paths are served from it.
pub fn build_router(state: AppState, static_dir: Option<&FsPath>) -> Router {
    let router = Router::new()
        .route("/habits", get(list_habits).post(create_habit))
        .route("/habits/:id/complete", patch(complete_habit))
        .route("/habits/:id", delete(delete_habit))
        .route("/suggest-habits", post(suggest_habits))
        .with_state(state);

    let router = match static_dir.filter(|dir| dir.is_dir()) {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(CorsLayer::permissive())
}

async fn create_habit(
    State(state): State<AppState>,
    body: BodyFields,
) -> Result<(StatusCode, Json<Habit>), ApiError> {
    let name = body
        .text("name")
        .ok_or_else(|| ApiError::BadRequest(INVALID_NAME_MESSAGE.to_string()))?;
    let habits = state.habits.clone();
    let habit = run_blocking(move || habits.create_habit(&name)).await?;
    Ok((StatusCode::CREATED, Json(habit)))
}

async fn list_habits(State(state): State<AppState>) -> Result<Json<Vec<Habit>>, ApiError> {
    let habits = state.habits.clone();
    Ok(Json(run_blocking(move || habits.list_habits()).await?))
}

async fn complete_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Habit>, ApiError> {
    let habits = state.habits.clone();
    let completed = run_blocking(move || habits.complete_habit(&id)).await?;
    Ok(Json(completed.habit))
}

async fn delete_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedHabit>, ApiError> {
    let habits = state.habits.clone();
    let habit = run_blocking(move || habits.delete_habit(&id)).await?;
    Ok(Json(DeletedHabit {
        deleted: true,
        habit,
    }))
}

async fn suggest_habits(
    State(state): State<AppState>,
    body: BodyFields,
) -> Result<Json<SuggestionSet>, ApiError> {
    let bad_goal = || ApiError::BadRequest(MISSING_GOAL_MESSAGE.to_string());
    let goal = body.text("goal").ok_or_else(bad_goal)?;
    let set = state
        .suggestions
        .resolve(&goal)
        .await
        .map_err(|_| bad_goal())?;
    Ok(Json(set))
}

/// Top-level fields of a JSON object or URL-encoded form body.
///
/// Malformed or non-object bodies extract as no fields, so handlers report
/// them the same way as a missing field.
#[derive(Debug, Default, Clone, PartialEq)]
struct BodyFields(Map<String, Value>);

impl BodyFields {
    /// Returns `field` when it is present and a string.
    fn text(&self, field: &str) -> Option<String> {
        self.0.get(field)?.as_str().map(ToString::to_string)
    }
}

#[async_trait]
impl<S> FromRequest<S> for BodyFields
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        let fields = if is_form {
            Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map(|Form(form)| {
                    form.into_iter()
                        .map(|(key, value)| (key, Value::String(value)))
                        .collect::<Map<_, _>>()
                })
                .unwrap_or_default()
        } else {
            match Json::<Value>::from_request(req, state).await {
                Ok(Json(Value::Object(map))) => map,
                _ => Map::new(),
            }
        };
        Ok(Self(fields))
    }
}

/// Runs a storage-bound service call off the async executor.
async fn run_blocking<T, F>(call: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(call)
        .await
        .map_err(|err| ApiError::Internal(format!("blocking task failed: {err}")))?
        .map_err(ApiError::from)
}
