//! Auth API DTOs
//!
//! Request/response bodies of the `/auth/*` endpoints: login for each
//! audience, customer signup with OTP verification, and the password reset
//! flow.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::UserInfo;

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserInfo,
}

/// Customer signup
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 80, message = "Name is required"))]
    pub display_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 7, max = 20, message = "Invalid phone number"))]
    pub phone: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// One-time password check for an e-mail address or phone number
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    #[validate(length(min = 1, message = "Email or phone is required"))]
    pub identifier: String,
    #[validate(length(min = 4, max = 8, message = "Invalid OTP"))]
    pub otp: String,
}

/// Re-send a one-time password
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResendOtpRequest {
    #[validate(length(min = 1, message = "Email or phone is required"))]
    pub identifier: String,
}

/// Start the password reset flow
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Token proving a verified reset OTP
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetToken {
    pub reset_token: String,
}

/// Set a new password with a reset token
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Reset token is required"))]
    pub reset_token: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}
