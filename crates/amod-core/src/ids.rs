//! Strongly typed, zero-cost index wrappers.
//!
//! Raw network identifiers are opaque strings and only ever used as external
//! lookup keys.  Inside the pipeline a node is its dense `NodeId` and a road
//! is its position in the road table, `RoadId`.  Both are zero-based; any
//! one-based convention is applied by the output writers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Generate a typed index wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Dense index of a network node, `0..N`.
    pub struct NodeId(u32);
}

typed_id! {
    /// Position of a road in the road table (link insertion order).
    pub struct RoadId(u32);
}
