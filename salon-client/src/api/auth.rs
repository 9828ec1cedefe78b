// salon-client/src/api/auth.rs
// Auth endpoints - login, signup/OTP, password reset, identity

use shared::client::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, ResendOtpRequest, ResetPasswordRequest,
    ResetToken, SignupRequest, VerifyOtpRequest,
};
use shared::models::UserInfo;
use validator::Validate;

use crate::guard::Audience;
use crate::http::HttpClient;
use crate::session::SessionStore;
use crate::{ClientError, ClientResult};

/// `/auth/*`
///
/// Calls that yield an access token sign the session in.
pub struct AuthApi<'a> {
    http: &'a HttpClient,
    session: &'a SessionStore,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(http: &'a HttpClient, session: &'a SessionStore) -> Self {
        Self { http, session }
    }

    fn login_path(audience: Audience) -> &'static str {
        match audience {
            Audience::Public => "/auth/login",
            Audience::Admin => "/auth/admin/login",
            Audience::Stylist => "/auth/stylist/login",
        }
    }

    fn sign_in(&self, response: LoginResponse) -> ClientResult<UserInfo> {
        self.session
            .establish(&response.access_token, response.user.clone())?;
        Ok(response.user)
    }

    /// Log in through the entry point of `audience`
    pub async fn login(&self, audience: Audience, credentials: &LoginRequest) -> ClientResult<UserInfo> {
        credentials.validate()?;
        let response: LoginResponse = self
            .http
            .post(Self::login_path(audience), credentials)
            .await?;
        self.sign_in(response)
    }

    /// Register a customer account; the server sends a verification OTP
    pub async fn signup(&self, data: &SignupRequest) -> ClientResult<Option<String>> {
        data.validate()?;
        self.http.post_message("/auth/signup", Some(data)).await
    }

    /// Confirm the signup OTP; signs the new account in
    pub async fn verify_otp(&self, data: &VerifyOtpRequest) -> ClientResult<UserInfo> {
        data.validate()?;
        let response: LoginResponse = self.http.post("/auth/verify-otp", data).await?;
        self.sign_in(response)
    }

    pub async fn resend_otp(&self, data: &ResendOtpRequest) -> ClientResult<Option<String>> {
        data.validate()?;
        self.http.post_message("/auth/resend-otp", Some(data)).await
    }

    /// Confirm a phone number; refreshes the signed-in user
    pub async fn verify_phone_otp(&self, data: &VerifyOtpRequest) -> ClientResult<UserInfo> {
        data.validate()?;
        let user: UserInfo = self.http.post("/auth/verify-phone-otp", data).await?;
        self.session.update_user(user.clone());
        Ok(user)
    }

    pub async fn forgot_password(&self, data: &ForgotPasswordRequest) -> ClientResult<Option<String>> {
        data.validate()?;
        self.http.post_message("/auth/forgot-password", Some(data)).await
    }

    /// Exchange the reset OTP for a reset token
    pub async fn verify_reset_otp(&self, data: &VerifyOtpRequest) -> ClientResult<ResetToken> {
        data.validate()?;
        self.http.post("/auth/verify-reset-otp", data).await
    }

    pub async fn reset_password(&self, data: &ResetPasswordRequest) -> ClientResult<Option<String>> {
        data.validate()?;
        self.http.post_message("/auth/reset-password", Some(data)).await
    }

    /// Identity behind the stored token
    pub async fn me(&self) -> ClientResult<UserInfo> {
        let user: UserInfo = self.http.get("/auth/me").await?;
        self.session.update_user(user.clone());
        Ok(user)
    }

    /// End the session on the server, then locally.
    ///
    /// The local session is cleared even if the call fails. A 401 means the
    /// server already considers the session gone and is not an error.
    pub async fn logout(&self) -> ClientResult<()> {
        let result = self.http.post_message::<()>("/auth/logout", None).await;
        self.session.clear();
        match result {
            Ok(_) | Err(ClientError::Unauthorized(_)) => Ok(()),
            Err(e) => {
                tracing::warn!(error = %e, "Logout request failed, local session cleared");
                Err(e)
            }
        }
    }
}
