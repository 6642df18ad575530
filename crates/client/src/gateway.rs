//! API gateway: every outgoing HTTP call goes through [`ApiClient::request`].

use std::sync::Arc;

use chrono::Utc;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use smp_core::Severity;
use smp_notify::{FlashMessage, Notifier};
use tracing::Instrument;

use crate::config::{AppPaths, ClientConfig};
use crate::envelope::{Envelope, unwrap_envelope};
use crate::error::ApiError;
use crate::navigation::{ErrorParams, Navigator};
use crate::session::{FlashStore, SessionManager};

/// Where a success message from the server goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuccessNotice {
    /// Show it now on the notification channel.
    #[default]
    Immediate,
    /// Stage it as a flash message for the next page load.
    Flash,
    /// Drop it.
    Silent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestOptions {
    /// Authentication calls surface their success message even though they
    /// may be reads.
    pub auth_call: bool,
    pub success: SuccessNotice,
}

impl RequestOptions {
    pub fn flash() -> Self {
        Self {
            success: SuccessNotice::Flash,
            ..Self::default()
        }
    }

    pub fn silent() -> Self {
        Self {
            success: SuccessNotice::Silent,
            ..Self::default()
        }
    }

    pub fn auth() -> Self {
        Self {
            auth_call: true,
            success: SuccessNotice::Flash,
        }
    }
}

/// HTTP client for the SMP REST backend.
///
/// Holds the session, flash store, notifier and navigator it needs to apply
/// the error policy once, centrally:
/// - 401: clear the session, go to login (unless already there)
/// - 5xx or no response: go to the error screen with code/message/severity/timestamp
/// - other 4xx: toast the server message and hand the error back
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    paths: AppPaths,
    session: SessionManager,
    flash: FlashStore,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl core::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("paths", &self.paths)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(
        config: &ClientConfig,
        session: SessionManager,
        flash: FlashStore,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            paths: config.paths.clone(),
            session,
            flash,
            notifier,
            navigator,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn flash(&self) -> &FlashStore {
        &self.flash
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    /// Perform one call and return the unwrapped payload.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
        options: RequestOptions,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let span = tracing::debug_span!("api_request", method = %method, path);

        let mut req = self.http.request(method.clone(), &url);
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(token) = self.session.get_token() {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = match req.send().instrument(span.clone()).await {
            Ok(resp) => resp,
            Err(e) => return Err(self.unreachable(e.to_string())),
        };

        let status = resp.status();
        let text = match resp.text().instrument(span.clone()).await {
            Ok(text) => text,
            Err(e) => return Err(self.unreachable(e.to_string())),
        };
        let parsed = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };
        let unwrapped = unwrap_envelope(parsed);

        span.in_scope(|| tracing::debug!(status = status.as_u16(), "response"));

        if status.is_success() {
            self.surface_success(&method, &unwrapped.meta, options);
            return Ok(unwrapped.payload);
        }

        Err(self.classify_failure(status, unwrapped.meta))
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ApiError> {
        let payload = self
            .request(Method::GET, path, query, None, RequestOptions::default())
            .await?;
        decode(payload)
    }

    /// POST/PUT/PATCH a JSON body and decode the payload.
    pub async fn send<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let payload = self.request(method, path, &[], Some(&body), options).await?;
        decode(payload)
    }

    /// DELETE with an optional JSON body; the payload is ignored.
    pub async fn delete(&self, path: &str, body: Option<&Value>) -> Result<(), ApiError> {
        self.request(Method::DELETE, path, &[], body, RequestOptions::default())
            .await
            .map(|_| ())
    }

    fn surface_success(&self, method: &Method, meta: &Envelope, options: RequestOptions) {
        let Some(message) = meta.message.as_deref().filter(|m| !m.trim().is_empty()) else {
            return;
        };
        if meta.severity != Some(Severity::Success) {
            return;
        }
        if *method == Method::GET && !options.auth_call {
            return;
        }
        match options.success {
            SuccessNotice::Immediate => self.notifier.notify(message, Severity::Success),
            SuccessNotice::Flash => self
                .flash
                .stage(&FlashMessage::new(message, Severity::Success)),
            SuccessNotice::Silent => {}
        }
    }

    fn classify_failure(&self, status: StatusCode, meta: Envelope) -> ApiError {
        if status == StatusCode::UNAUTHORIZED {
            self.session.clear();
            if self.navigator.current_path() != self.paths.login {
                self.navigator.navigate(&self.paths.login);
            }
            return ApiError::Unauthorized {
                message: meta.message,
            };
        }

        let message = meta.message.clone().unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unexpected response")
                .to_string()
        });

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), %message, "server fault");
            self.to_error_screen(ErrorParams {
                code: status.as_u16().to_string(),
                message: message.clone(),
                severity: meta.severity.unwrap_or(Severity::Error),
                timestamp: meta.timestamp,
            });
            return ApiError::ServerFault {
                code: status.as_u16(),
                message,
            };
        }

        tracing::warn!(status = status.as_u16(), %message, "request rejected");
        self.notifier
            .notify(&message, meta.severity.unwrap_or(Severity::Error));
        ApiError::Validation {
            status: status.as_u16(),
            message,
            errors: meta.errors,
        }
    }

    fn unreachable(&self, reason: String) -> ApiError {
        tracing::error!(%reason, "backend unreachable");
        self.to_error_screen(ErrorParams {
            code: "503".to_string(),
            message: "The server could not be reached".to_string(),
            severity: Severity::Error,
            timestamp: None,
        });
        ApiError::Network(reason)
    }

    fn to_error_screen(&self, mut params: ErrorParams) {
        if params.timestamp.is_none() {
            params.timestamp = Some(Utc::now().to_rfc3339());
        }
        self.navigator
            .navigate(&params.to_location(&self.paths.error));
    }
}

fn decode<T: DeserializeOwned>(payload: Value) -> Result<T, ApiError> {
    serde_json::from_value(payload).map_err(|e| {
        tracing::error!(error = %e, "unexpected payload shape");
        ApiError::Decode(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_options_flash_their_message() {
        let opts = RequestOptions::auth();
        assert!(opts.auth_call);
        assert_eq!(opts.success, SuccessNotice::Flash);
        assert_eq!(RequestOptions::default().success, SuccessNotice::Immediate);
    }

    #[test]
    fn decode_reports_shape_mismatch() {
        let err = decode::<Vec<i32>>(serde_json::json!({ "a": 1 })).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
