//! Authentication handler implementations

use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::AppendHeaders,
    Json,
};
use validator::Validate;

use crate::{
    constants::paths,
    error::{AppError, AppResult},
    middleware::{
        auth::AuthenticatedUser,
        cookies::{cleared_cookies, session_cookies},
    },
    models::{Role, User},
    services::{AuthService, SignupInput},
    state::AppState,
};

use super::{
    request::{ForgotPasswordRequest, LoginRequest, ResetPasswordRequest, SignupRequest},
    response::{AuthResponse, CurrentUserResponse, LogoutResponse, MessageResponse},
};

type SetCookies = AppendHeaders<[(axum::http::HeaderName, String); 2]>;

/// Where a freshly signed-in user is sent
pub fn landing_page(role: Role) -> &'static str {
    match role {
        Role::Admin => paths::ADMIN_DASHBOARD,
        Role::Student => paths::MAIN,
    }
}

fn set_cookies([session, role]: [String; 2]) -> SetCookies {
    AppendHeaders([(SET_COOKIE, session), (SET_COOKIE, role)])
}

fn signed_in(state: &AppState, user: User, token: String) -> (SetCookies, Json<AuthResponse>) {
    let cookies = session_cookies(
        &token,
        user.role.as_str(),
        state.config().auth.session_ttl_secs(),
        state.config().server.secure_cookies(),
    );
    let redirect_to = landing_page(user.role).to_string();

    (
        set_cookies(cookies),
        Json(AuthResponse {
            user: user.into(),
            token,
            token_type: "Bearer".to_string(),
            redirect_to,
        }),
    )
}

/// Register a new user and start a session
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> AppResult<(StatusCode, SetCookies, Json<AuthResponse>)> {
    let payload = payload.trimmed();
    payload.validate()?;
    let role: Role = payload.role.parse()?;

    let (user, token) = AuthService::signup(
        state.store(),
        &state.config().auth,
        SignupInput {
            email: payload.email,
            password: payload.password,
            role,
            admin_code: payload.admin_code,
        },
    )
    .await?;

    let (cookies, body) = signed_in(&state, user, token);
    Ok((StatusCode::CREATED, cookies, body))
}

/// Login with email and password
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<(SetCookies, Json<AuthResponse>)> {
    let payload = payload.trimmed();
    payload.validate()?;

    let (user, token) =
        AuthService::login(state.store(), &state.config().auth, &payload.email, &payload.password)
            .await?;

    Ok(signed_in(&state, user, token))
}

/// Clear both session cookies
pub async fn logout(State(state): State<AppState>) -> (SetCookies, Json<LogoutResponse>) {
    (
        set_cookies(cleared_cookies(state.config().server.secure_cookies())),
        Json(LogoutResponse {
            redirect_to: paths::LOGIN.to_string(),
        }),
    )
}

/// Request a password reset link. Always accepted.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    payload.validate()?;

    AuthService::forgot_password(state.store(), state.mailer(), state.config(), &payload.email)
        .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse {
            message: "If the account exists, a reset link has been sent".to_string(),
        }),
    ))
}

/// Set a new password using a reset token
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let payload = payload.trimmed();
    payload.validate()?;

    AuthService::reset_password(state.store(), &payload.token, &payload.password).await?;

    Ok(Json(MessageResponse {
        message: "Password updated".to_string(),
    }))
}

/// Get current authenticated user
pub async fn get_current_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<CurrentUserResponse>> {
    let user = state
        .store()
        .find_user_by_id(&auth_user.id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(Json(user.into()))
}
