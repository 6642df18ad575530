//! Login, logout and the current user.

use std::sync::Arc;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use smp_core::{DomainError, User, Username};

use crate::error::ApiError;
use crate::gateway::{ApiClient, RequestOptions};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    #[serde(default)]
    user: Option<User>,
}

#[derive(Debug, Clone)]
pub struct AuthService {
    api: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Authenticate, store the token and go to the dashboard.
    ///
    /// The server's welcome message is staged as a flash so it shows after
    /// the navigation.
    pub async fn login(&self, username: &str, password: &str) -> Result<Option<User>, ApiError> {
        let username = Username::normalize(username)?;
        if password.is_empty() {
            return Err(DomainError::validation("password", "Password is required").into());
        }

        let resp: LoginResponse = self
            .api
            .send(
                Method::POST,
                "/auth/login",
                &LoginRequest {
                    username: username.as_str(),
                    password,
                },
                RequestOptions::auth(),
            )
            .await?;

        if resp.token.is_empty() {
            return Err(ApiError::Decode("login response carried an empty token".into()));
        }
        self.api.session().set_token(resp.token);
        self.api.navigator().navigate(&self.api.paths().dashboard);
        Ok(resp.user)
    }

    pub fn logout(&self) {
        self.api.session().clear();
        self.api.navigator().navigate(&self.api.paths().login);
    }

    pub async fn me(&self) -> Result<User, ApiError> {
        self.api.get("/auth/me", &[]).await
    }
}
