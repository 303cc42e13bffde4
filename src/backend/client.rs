//! HTTP client for the course backend

use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde::Serialize;
use serde_json::Value;

use super::error::BackendError;
use super::models::{
    self, AdminSignupRequest, ChangePasswordRequest, FinalScoreRequest, ForgotPasswordRequest,
    LearnerOverview, LoginRequest, LoginResponse, MessageBody, SaveProgressRequest,
    SignupRequest,
};
use crate::course::ProgressRecord;

/// Course backend client
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct BackendClient {
    /// HTTP client
    client: Client,
    /// API root, e.g. `http://localhost:8080/api`
    base_url: Url,
}

impl BackendClient {
    /// Create a client for the given API root
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let base_url =
            Url::parse(base_url).map_err(|e| BackendError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(BackendError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Build an endpoint URL from path segments, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Turn non-success responses into [`BackendError::ApiError`]
    async fn check(response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<MessageBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or(body);
        Err(BackendError::ApiError { status: status.as_u16(), message })
    }

    async fn get_json(&self, segments: &[&str]) -> Result<Value, BackendError> {
        let response = self.client.get(self.endpoint(segments)).send().await?;
        let response = Self::check(response).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn post_json<T: Serialize>(
        &self,
        segments: &[&str],
        body: &T,
        bearer: Option<&str>,
    ) -> Result<String, BackendError> {
        let mut request = self.client.post(self.endpoint(segments)).json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        let response = Self::check(request.send().await?).await?;
        Ok(response.text().await?)
    }

    /// Extract a `message` from an account endpoint reply, or use a default
    fn message_or(body: &str, default: &str) -> String {
        serde_json::from_str::<MessageBody>(body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| default.to_string())
    }

    /// Fetch every progress record of a learner
    pub async fn fetch_progress(&self, username: &str) -> Result<Vec<ProgressRecord>, BackendError> {
        let value = self.get_json(&["user", "login", username]).await?;
        models::decode_progress(&value)
    }

    /// Save one section's completion
    pub async fn save_progress(&self, request: &SaveProgressRequest) -> Result<(), BackendError> {
        self.post_json(&["progress", "save"], request, None).await?;
        Ok(())
    }

    /// Record a passing final quiz score
    pub async fn submit_final_score(
        &self,
        token: &str,
        request: &FinalScoreRequest,
    ) -> Result<(), BackendError> {
        self.post_json(&["progress", "final-quiz"], request, Some(token)).await?;
        Ok(())
    }

    /// Fetch progress and login history of every learner (admin)
    pub async fn fetch_all_learners(&self) -> Result<Vec<LearnerOverview>, BackendError> {
        let value = self.get_json(&["progress", "All"]).await?;
        models::decode_learners(&value)
    }

    /// Fetch a single learner by email (admin drill-down)
    pub async fn fetch_learner(&self, email: &str) -> Result<LearnerOverview, BackendError> {
        let value = self.get_json(&["progress", "user", email]).await?;
        if !value.is_object() {
            return Err(BackendError::InvalidResponse("learner is not an object".into()));
        }
        Ok(models::decode_learner(&value))
    }

    /// Log in with email and password
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, BackendError> {
        let body = self.post_json(&["user", "login"], request, None).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Register a learner account
    pub async fn signup(&self, request: &SignupRequest) -> Result<String, BackendError> {
        let body = self.post_json(&["user", "signup"], request, None).await?;
        Ok(Self::message_or(&body, "Registered"))
    }

    /// Register an admin account
    pub async fn admin_signup(&self, request: &AdminSignupRequest) -> Result<String, BackendError> {
        let body = self.post_json(&["user", "adminsignup"], request, None).await?;
        Ok(Self::message_or(&body, "Admin registered"))
    }

    /// Start a password reset
    pub async fn forgot_password(
        &self,
        request: &ForgotPasswordRequest,
    ) -> Result<String, BackendError> {
        let body = self.post_json(&["user", "forgot-password"], request, None).await?;
        Ok(Self::message_or(&body, "Verifying"))
    }

    /// Set a new password
    pub async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> Result<String, BackendError> {
        let body = self.post_json(&["user", "change-password"], request, None).await?;
        Ok(Self::message_or(&body, "Password updated!"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> BackendClient {
        BackendClient::new("http://localhost:8080/api", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn endpoint_appends_segments() {
        let url = client().endpoint(&["progress", "save"]);
        assert_eq!(url.as_str(), "http://localhost:8080/api/progress/save");
    }

    #[test]
    fn endpoint_handles_trailing_slash() {
        let client = BackendClient::new("http://localhost:8080/api/", Duration::from_secs(5)).unwrap();
        let url = client.endpoint(&["progress", "All"]);
        assert_eq!(url.as_str(), "http://localhost:8080/api/progress/All");
    }

    #[test]
    fn endpoint_encodes_usernames() {
        let url = client().endpoint(&["user", "login", "ana maria/x"]);
        assert_eq!(url.as_str(), "http://localhost:8080/api/user/login/ana%20maria%2Fx");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = BackendClient::new("not a url", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, BackendError::InvalidUrl(_)));
    }

    #[test]
    fn message_or_prefers_backend_message() {
        assert_eq!(BackendClient::message_or(r#"{"message":"Welcome"}"#, "x"), "Welcome");
        assert_eq!(BackendClient::message_or("ok", "Registered"), "Registered");
    }
}
