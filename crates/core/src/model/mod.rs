//! Records exchanged with the backend.
//!
//! The dashboard never owns their lifecycle: they are fetched page by page
//! and held only for the lifetime of a screen.

pub mod client;
pub mod device;
pub mod log;
pub mod order;
pub mod product;
pub mod user;

pub use client::{Client, ClientDraft, ClientFilter};
pub use device::{
    BindingDraft, Device, DeviceFilter, DeviceStatus, MapPosition, ProcessStage, ProcessStatus,
    UserDevice,
};
pub use log::{Log, LogFilter};
pub use order::{Order, OrderCode, OrderDraft, OrderFilter, OrderStatus, progress_percent};
pub use product::{Product, ProductDraft, ProductFilter};
pub use user::{Role, User, UserDraft, UserFilter, Username, is_plausible_email};
