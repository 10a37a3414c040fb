//! Course catalog handlers.
//!
//! Listing and fetching are public; create/update/delete require an admin
//! session, enforced inside the catalog service.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::SessionContext;
use crate::api::AppState;
use crate::domain::CourseResponse;
use crate::errors::AppResult;
use crate::types::{Created, NoContent};

/// Course creation/update payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CoursePayload {
    /// Course title
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "HTML/CSS Basics")]
    pub title: String,
    /// Course description
    #[schema(example = "Build your first web pages")]
    pub description: String,
}

/// Create course catalog routes
pub fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses).post(create_course))
        .route(
            "/courses/:id",
            get(get_course).put(update_course).delete(delete_course),
        )
}

/// List all courses, newest first
#[utoipa::path(
    get,
    path = "/api/courses",
    tag = "Courses",
    responses(
        (status = 200, description = "Course list", body = [CourseResponse])
    )
)]
pub async fn list_courses(State(state): State<AppState>) -> AppResult<Json<Vec<CourseResponse>>> {
    let courses = state.catalog_service.list_courses().await?;
    Ok(Json(courses.into_iter().map(CourseResponse::from).collect()))
}

/// Get a single course
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    tag = "Courses",
    params(("id" = i64, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course", body = CourseResponse),
        (status = 404, description = "Course not found")
    )
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<CourseResponse>> {
    let course = state.catalog_service.get_course(id).await?;
    Ok(Json(CourseResponse::from(course)))
}

/// Create a course (admin only)
#[utoipa::path(
    post,
    path = "/api/courses",
    tag = "Courses",
    request_body = CoursePayload,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Not an admin")
    ),
    security(("session_token" = []))
)]
pub async fn create_course(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
    ValidatedJson(payload): ValidatedJson<CoursePayload>,
) -> AppResult<Created<CourseResponse>> {
    let course = state
        .catalog_service
        .create_course(&ctx.session, payload.title, payload.description)
        .await?;

    Ok(Created(CourseResponse::from(course)))
}

/// Update a course (admin only)
#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    tag = "Courses",
    params(("id" = i64, Path, description = "Course ID")),
    request_body = CoursePayload,
    responses(
        (status = 200, description = "Course updated", body = CourseResponse),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Course not found")
    ),
    security(("session_token" = []))
)]
pub async fn update_course(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<CoursePayload>,
) -> AppResult<Json<CourseResponse>> {
    let course = state
        .catalog_service
        .update_course(&ctx.session, id, payload.title, payload.description)
        .await?;

    Ok(Json(CourseResponse::from(course)))
}

/// Delete a course (admin only)
#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    tag = "Courses",
    params(("id" = i64, Path, description = "Course ID")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Course not found")
    ),
    security(("session_token" = []))
)]
pub async fn delete_course(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<i64>,
) -> AppResult<NoContent> {
    state.catalog_service.delete_course(&ctx.session, id).await?;
    Ok(NoContent)
}
