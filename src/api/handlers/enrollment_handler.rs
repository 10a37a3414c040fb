//! Enrollment handlers: enroll, my courses, admin roster.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::middleware::SessionContext;
use crate::api::AppState;
use crate::domain::{CourseResponse, EnrolledCourse, RosterEntry};
use crate::errors::AppResult;

/// Enrollment outcome
#[derive(Debug, Serialize, ToSchema)]
pub struct EnrollResponse {
    pub success: bool,
    #[schema(example = "Enrolled")]
    pub message: String,
}

/// A course on the caller's dashboard
#[derive(Debug, Serialize, ToSchema)]
pub struct EnrolledCourseResponse {
    pub course: CourseResponse,
    pub enrolled_at: DateTime<Utc>,
}

impl From<EnrolledCourse> for EnrolledCourseResponse {
    fn from(entry: EnrolledCourse) -> Self {
        Self {
            course: CourseResponse::from(entry.course),
            enrolled_at: entry.enrolled_at,
        }
    }
}

/// One row of the administrative roster
#[derive(Debug, Serialize, ToSchema)]
pub struct RosterEntryResponse {
    pub enrollment_id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub user_email: String,
    pub course_id: i64,
    pub course_title: String,
    pub enrolled_at: DateTime<Utc>,
}

impl From<RosterEntry> for RosterEntryResponse {
    fn from(entry: RosterEntry) -> Self {
        Self {
            enrollment_id: entry.enrollment.id,
            user_id: entry.user.id,
            user_name: entry.user.name,
            user_email: entry.user.email,
            course_id: entry.course.id,
            course_title: entry.course.title,
            enrolled_at: entry.enrollment.enrolled_at,
        }
    }
}

/// Create enrollment routes
pub fn enrollment_routes() -> Router<AppState> {
    Router::new()
        .route("/courses/:id/enroll", post(enroll))
        .route("/my-courses", get(my_courses))
        .route("/admin/enrollments", get(roster))
}

/// Enroll the caller in a course
#[utoipa::path(
    post,
    path = "/api/courses/{id}/enroll",
    tag = "Enrollments",
    params(("id" = i64, Path, description = "Course ID")),
    responses(
        (status = 201, description = "Enrolled", body = EnrollResponse),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Already enrolled")
    ),
    security(("session_token" = []))
)]
pub async fn enroll(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<EnrollResponse>)> {
    state.enrollment_service.enroll(&ctx.session, id).await?;

    Ok((
        StatusCode::CREATED,
        Json(EnrollResponse {
            success: true,
            message: "Enrolled".to_string(),
        }),
    ))
}

/// List the caller's enrolled courses
#[utoipa::path(
    get,
    path = "/api/my-courses",
    tag = "Enrollments",
    responses(
        (status = 200, description = "Enrolled courses", body = [EnrolledCourseResponse]),
        (status = 401, description = "Not logged in")
    ),
    security(("session_token" = []))
)]
pub async fn my_courses(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
) -> AppResult<Json<Vec<EnrolledCourseResponse>>> {
    let courses = state.enrollment_service.my_courses(&ctx.session).await?;

    Ok(Json(
        courses
            .into_iter()
            .map(EnrolledCourseResponse::from)
            .collect(),
    ))
}

/// Full enrollment roster (admin only)
#[utoipa::path(
    get,
    path = "/api/admin/enrollments",
    tag = "Enrollments",
    responses(
        (status = 200, description = "Roster", body = [RosterEntryResponse]),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Not an admin")
    ),
    security(("session_token" = []))
)]
pub async fn roster(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
) -> AppResult<Json<Vec<RosterEntryResponse>>> {
    let entries = state.enrollment_service.roster(&ctx.session).await?;

    Ok(Json(
        entries.into_iter().map(RosterEntryResponse::from).collect(),
    ))
}
