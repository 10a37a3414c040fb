//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, course_handler, enrollment_handler};
use crate::domain::{CourseResponse, UserResponse};

/// OpenAPI documentation for EnrollHub
#[derive(OpenApi)]
#[openapi(
    info(
        title = "EnrollHub",
        version = "0.1.0",
        description = "Course-enrollment API with session-based authentication",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        auth_handler::logout,
        auth_handler::me,
        auth_handler::update_profile,
        // Course endpoints
        course_handler::list_courses,
        course_handler::get_course,
        course_handler::create_course,
        course_handler::update_course,
        course_handler::delete_course,
        // Enrollment endpoints
        enrollment_handler::enroll,
        enrollment_handler::my_courses,
        enrollment_handler::roster,
    ),
    components(
        schemas(
            // Domain types
            UserResponse,
            CourseResponse,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::RegisterResponse,
            auth_handler::LoginResponse,
            auth_handler::LogoutResponse,
            auth_handler::MeResponse,
            auth_handler::SessionUser,
            auth_handler::UpdateProfileRequest,
            // Course types
            course_handler::CoursePayload,
            // Enrollment types
            enrollment_handler::EnrollResponse,
            enrollment_handler::EnrolledCourseResponse,
            enrollment_handler::RosterEntryResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login, and sessions"),
        (name = "Courses", description = "Course catalog operations"),
        (name = "Enrollments", description = "Course enrollment operations")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for the opaque session token
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some("Opaque session token obtained from /api/login"))
                        .build(),
                ),
            );
        }
    }
}
