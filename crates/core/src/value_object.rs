//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// A rating, a set of filter criteria or a sort selection carry no identity of
/// their own: two instances holding the same values are interchangeable. They
/// are never mutated in place; a controller replaces the whole value when a
/// selection changes.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Rating { rate: f64, count: u64 }
///
/// impl ValueObject for Rating {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
