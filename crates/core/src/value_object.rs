//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. Their
/// constructors normalise raw user input, so a held value always has the
/// canonical shape (e.g. an [`OrderCode`](crate::OrderCode) is always
/// `OP-` followed by seven digits).
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
