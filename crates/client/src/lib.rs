//! `smp-client`
//!
//! **Responsibility:** the only way the dashboard talks to the SMP backend.
//!
//! This crate provides:
//! - The API gateway ([`ApiClient`]): bearer credentials, envelope unwrapping and
//!   one central error policy (401 -> login, 5xx/unreachable -> error screen,
//!   other 4xx -> toast)
//! - Session and flash cookies behind [`SessionManager`] / [`FlashStore`]
//! - Typed services per backend resource
//!
//! Callers never branch on status codes: by the time an [`ApiError`] reaches
//! them the redirect or toast has already happened.

pub mod config;
pub mod cookies;
pub mod envelope;
pub mod error;
pub mod gateway;
pub mod navigation;
pub mod resource;
pub mod services;
pub mod session;

pub use config::{AppPaths, ClientConfig, ConfigError};
pub use cookies::CookieJar;
pub use envelope::{Envelope, Unwrapped, unwrap_envelope};
pub use error::ApiError;
pub use gateway::{ApiClient, RequestOptions, SuccessNotice};
pub use navigation::{ErrorParams, MemoryNavigator, Navigator};
pub use resource::{Resource, ResourceService};
pub use services::{AuthService, DeviceService, LogService};
pub use session::{FlashStore, SessionManager};
