//! Strongly typed identifier wrappers.
//!
//! Node and section ids come from the upstream road database (OSM-style
//! 64-bit integers), so they are sparse: they key hash maps rather than index
//! `Vec`s.  All IDs are `Copy + Ord + Hash` so they can be used as map keys
//! and sorted collection elements without ceremony.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID"; equal to `MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// The raw upstream identifier.
            #[inline(always)]
            pub fn raw(self) -> $inner {
                self.0
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(raw: $inner) -> $name {
                $name(raw)
            }
        }
    };
}

typed_id! {
    /// Identifier of a road-network node (intersection or shape point).
    pub struct NodeId(u64);
}

typed_id! {
    /// Identifier of a recorded user trip.
    pub struct TripId(u32);
}

/// A directed section: one traversal direction of a physical road segment.
///
/// Both directions of a segment share `base` and differ only in `forward`.
/// Ordering is by `base` first, so the two directions of a segment sort next
/// to each other (`false` before `true`).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionId {
    pub base:    u64,
    pub forward: bool,
}

impl SectionId {
    #[inline]
    pub fn new(base: u64, forward: bool) -> Self {
        Self { base, forward }
    }

    /// The same physical segment travelled the other way.
    #[inline]
    pub fn reversed(self) -> Self {
        Self { base: self.base, forward: !self.forward }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = if self.forward { "+" } else { "-" };
        write!(f, "Section({}{})", self.base, arrow)
    }
}
