//! Authentication API handlers

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{ForgotPasswordRequest, LoginRequest, LoginResponse, RegisterRequest};
use crate::domain::UserProfile;
use crate::interfaces::http::common::{ApiError, ApiResponse, ApiResult, EmptyData, ValidatedJson};
use crate::interfaces::http::router::ApiState;

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Student registered", body = ApiResponse<UserProfile>),
        (status = 409, description = "Student id or email already registered"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn register(
    State(state): State<ApiState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserProfile>>), ApiError> {
    let user = state.accounts.register(request.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(user))))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<ApiState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let result = state
        .accounts
        .login(&request.student_id, &request.password)
        .await?;
    Ok(Json(ApiResponse::success(result.into())))
}

#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    tag = "Authentication",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Password replaced", body = ApiResponse<EmptyData>),
        (status = 400, description = "Student id and email do not match")
    )
)]
pub async fn forgot_password(
    State(state): State<ApiState>,
    ValidatedJson(request): ValidatedJson<ForgotPasswordRequest>,
) -> ApiResult<EmptyData> {
    state
        .accounts
        .reset_password(&request.student_id, &request.email, &request.new_password)
        .await?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}
