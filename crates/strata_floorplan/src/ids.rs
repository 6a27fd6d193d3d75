//! Opaque ID newtypes for floorplan entities.
//!
//! [`BlockId`] and [`LayerId`] are thin `u32` wrappers. Block IDs double as
//! indices into [`FloorplanState::blocks`](crate::FloorplanState::blocks), so
//! connections reference blocks by ID and never hold references.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }

            /// Returns the ID as a `usize` index.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Stable identity of a functional block.
    BlockId
);

define_id!(
    /// Index of a layer in the stack, `0` being the bottom layer.
    LayerId
);

impl LayerId {
    /// Number of layers crossed between `self` and `other`.
    pub fn span(self, other: LayerId) -> u32 {
        self.0.abs_diff(other.0)
    }
}
