//! The list-view controller shared by every entity screen.

mod controller;
mod source;

pub use controller::{ListController, ListSnapshot, PagingMode};
pub use source::{BulkDelete, PageSource};
