//! Functional blocks and their planar geometry.

use crate::ids::{BlockId, LayerId};
use serde::{Deserialize, Serialize};

/// Integer lower-left corner of a block footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: u32,
    /// Vertical coordinate.
    pub y: u32,
}

impl Position {
    /// Creates a position from its coordinates.
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// A rectangular functional block placed on one layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Stable identity; also the block's index in the floorplan.
    pub id: BlockId,
    /// Layer the block sits on.
    pub layer: LayerId,
    /// Lower-left corner of the footprint.
    pub position: Position,
    /// Footprint width.
    pub width: u32,
    /// Footprint height.
    pub height: u32,
}

impl Block {
    /// Returns the block's `(layer, position)` assignment.
    pub fn placement(&self) -> (LayerId, Position) {
        (self.layer, self.position)
    }

    /// Returns the centre of the footprint.
    pub fn center(&self) -> (f64, f64) {
        (
            self.position.x as f64 + self.width as f64 / 2.0,
            self.position.y as f64 + self.height as f64 / 2.0,
        )
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.position.x + self.width
    }

    /// Exclusive top edge.
    pub fn top(&self) -> u32 {
        self.position.y + self.height
    }

    /// Largest valid `x` for this block on a square floorplan of side `size`.
    pub fn max_x(&self, size: u32) -> u32 {
        size.saturating_sub(self.width)
    }

    /// Largest valid `y` for this block on a square floorplan of side `size`.
    pub fn max_y(&self, size: u32) -> u32 {
        size.saturating_sub(self.height)
    }

    /// Returns whether the whole footprint lies inside a `size × size` layer.
    pub fn is_within(&self, size: u32) -> bool {
        self.right() <= size && self.top() <= size
    }

    /// Clamps `position` so this block's footprint stays inside a `size × size` layer.
    pub fn clamp_position(&self, position: Position, size: u32) -> Position {
        Position::new(position.x.min(self.max_x(size)), position.y.min(self.max_y(size)))
    }

    /// Area of the footprint intersection with `other`, or 0 on different layers.
    pub fn overlap_area(&self, other: &Block) -> u64 {
        if self.layer != other.layer {
            return 0;
        }
        let w = self.right().min(other.right()) as i64
            - self.position.x.max(other.position.x) as i64;
        let h = self.top().min(other.top()) as i64 - self.position.y.max(other.position.y) as i64;
        if w <= 0 || h <= 0 {
            0
        } else {
            (w * h) as u64
        }
    }
}

/// Distance between two blocks: Euclidean distance between footprint centres,
/// plus `layer_penalty` for every layer the connection has to cross.
pub fn distance(a: &Block, b: &Block, layer_penalty: f64) -> f64 {
    let (ax, ay) = a.center();
    let (bx, by) = b.center();
    let planar = (ax - bx).hypot(ay - by);
    planar + layer_penalty * a.layer.span(b.layer) as f64
}
