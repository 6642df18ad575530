//! `smp-core`: domain foundation for the SMP production-monitoring dashboard.
//!
//! This crate contains **pure** records and list primitives shared by the
//! gateway client and the dashboard controllers (no IO, no async).

pub mod entity;
pub mod error;
pub mod filter;
pub mod id;
pub mod model;
pub mod paging;
pub mod severity;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use filter::ListFilter;
pub use id::{BindingId, ClientId, DeviceId, LogId, OrderId, ProductId, UserId};
pub use model::{
    BindingDraft, Client, ClientDraft, ClientFilter, Device, DeviceFilter, DeviceStatus, Log,
    LogFilter, MapPosition, Order, OrderCode, OrderDraft, OrderFilter, OrderStatus, ProcessStage,
    ProcessStatus, Product, ProductDraft, ProductFilter, Role, User, UserDevice, UserDraft,
    UserFilter, Username, is_plausible_email, progress_percent,
};
pub use paging::{Page, PageInfo, PageRequest, SortDirection, SortSpec, SortState};
pub use severity::Severity;
pub use value_object::ValueObject;
