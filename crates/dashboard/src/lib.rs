//! `smp-dashboard`
//!
//! **Responsibility:** the screen-level state of the SMP dashboard, without a
//! rendering toolkit.
//!
//! This crate provides:
//! - One list-view controller for every entity screen, in offset or infinite
//!   paging mode
//! - The debounced remote search widget (with a fallback sync action)
//! - Stateless table and pagination view models
//! - Entity forms with client-side validation
//! - Route gating and the generic error screen
//!
//! All IO goes through `smp-client`; all toasts through `smp-notify`.

pub mod app;
pub mod debounce;
pub mod error_screen;
pub mod forms;
pub mod list;
pub mod pagination;
pub mod routes;
pub mod screens;
pub mod search;
pub mod sequence;
pub mod table;

pub use app::Dashboard;
pub use debounce::{Debouncer, KeyedDebouncer};
pub use error_screen::ErrorScreen;
pub use forms::{
    BindingForm, ClientForm, EntityForm, FormController, FormLoad, FormMode, OrderForm,
    ProductForm, UserForm,
};
pub use list::{BulkDelete, ListController, ListSnapshot, PageSource, PagingMode};
pub use pagination::{Pagination, PaginationView};
pub use routes::{RouteDecision, gate};
pub use search::{
    ExternalOrderSync, FallbackAction, SearchItem, SearchPhase, SearchSelect, SearchSnapshot,
    SearchSource,
};
pub use sequence::Sequence;
pub use table::{Column, TableEvent, TableView};
