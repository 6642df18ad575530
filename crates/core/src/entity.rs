//! Entity trait: identity + continuity across fetches.

/// Entity marker + minimal interface.
///
/// List controllers key row selection on this id, so it must be cheap to copy
/// and hash.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display + Send + Sync + 'static;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
