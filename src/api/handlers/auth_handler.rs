//! Authentication handlers: register, login, logout, me, profile.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::SessionContext;
use crate::api::AppState;
use crate::domain::{SessionIdentity, UserResponse};
use crate::errors::AppResult;

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// User display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Jacob")]
    pub name: String,
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jacob@example.com")]
    pub email: String,
    /// User password (minimum 6 characters)
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "SecurePass123!", min_length = 6)]
    pub password: String,
    /// Self-declared skill level
    #[schema(example = "Intermediate")]
    pub level: String,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jacob@example.com")]
    pub email: String,
    /// User password
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Registration outcome
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub success: bool,
    #[schema(example = "Account created")]
    pub message: String,
}

/// Login outcome with the opaque session token
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    /// Opaque session token; send back as `Authorization: Bearer <token>`
    pub token: String,
    pub user: UserResponse,
}

/// Logout outcome
#[derive(Debug, Serialize, ToSchema)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Current session view
#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
}

/// Identity fields cached in the session
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<&SessionIdentity> for SessionUser {
    fn from(identity: &SessionIdentity) -> Self {
        Self {
            id: identity.user_id,
            name: identity.name.clone(),
            email: identity.email.clone(),
            is_admin: identity.is_admin,
        }
    }
}

/// Profile update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    /// New display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Jacob")]
    pub name: String,
    /// New skill level
    #[schema(example = "Advanced")]
    pub level: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .route("/profile", put(update_profile))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Validation error or duplicate email")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    state
        .auth_service
        .register(payload.name, payload.email, payload.password, payload.level)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "Account created".to_string(),
        }),
    ))
}

/// Login and establish a session
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (token, user) = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(LoginResponse {
        success: true,
        token: token.to_string(),
        user: UserResponse::from(user),
    }))
}

/// Clear the caller's session
#[utoipa::path(
    post,
    path = "/api/logout",
    tag = "Authentication",
    responses(
        (status = 200, description = "Session cleared", body = LogoutResponse)
    ),
    security(("session_token" = []))
)]
pub async fn logout(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
) -> Json<LogoutResponse> {
    if let Some(token) = ctx.token {
        state.auth_service.logout(&token).await;
    }

    Json(LogoutResponse { success: true })
}

/// Report whether the caller is logged in
#[utoipa::path(
    get,
    path = "/api/me",
    tag = "Authentication",
    responses(
        (status = 200, description = "Current session state", body = MeResponse)
    ),
    security(("session_token" = []))
)]
pub async fn me(Extension(ctx): Extension<SessionContext>) -> Json<MeResponse> {
    let user = ctx.session.identity().map(SessionUser::from);

    Json(MeResponse {
        logged_in: user.is_some(),
        user,
    })
}

/// Update the caller's own profile
#[utoipa::path(
    put,
    path = "/api/profile",
    tag = "Authentication",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not logged in")
    ),
    security(("session_token" = []))
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .auth_service
        .update_profile(ctx.token.as_ref(), &ctx.session, payload.name, payload.level)
        .await?;

    Ok(Json(UserResponse::from(user)))
}
