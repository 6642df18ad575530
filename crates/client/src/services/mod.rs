//! Entity-specific services beyond plain CRUD.

pub mod auth;
pub mod devices;
pub mod logs;
pub mod orders;

pub use auth::AuthService;
pub use devices::DeviceService;
pub use logs::LogService;
