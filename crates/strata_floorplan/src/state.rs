//! The full block-to-placement assignment mutated by the optimizer.

use crate::block::{Block, Position};
use crate::connection::Connection;
use crate::ids::{BlockId, LayerId};
use serde::{Deserialize, Serialize};

/// A complete floorplan: every block's layer and position plus the fixed
/// connection set.
///
/// The state owns its blocks by value in ID order, so `blocks[i].id == i`.
/// Candidates are produced by cloning; a state is never shared mutably.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorplanState {
    /// All blocks, indexed by [`BlockId`].
    pub blocks: Vec<Block>,
    /// Required interconnects, immutable after initialization.
    pub connections: Vec<Connection>,
    /// Number of stacked layers.
    pub layers: u32,
    /// Side length of every (square) layer.
    pub floorplan_size: u32,
}

impl FloorplanState {
    /// Creates a state from already-placed blocks.
    pub fn new(
        blocks: Vec<Block>,
        connections: Vec<Connection>,
        layers: u32,
        floorplan_size: u32,
    ) -> Self {
        debug_assert!(blocks.iter().enumerate().all(|(i, b)| b.id.index() == i));
        Self {
            blocks,
            connections,
            layers,
            floorplan_size,
        }
    }

    /// Returns the block with the given ID.
    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.index()]
    }

    /// Returns a mutable reference to the block with the given ID.
    pub fn block_mut(&mut self, id: BlockId) -> &mut Block {
        &mut self.blocks[id.index()]
    }

    /// Returns the number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Returns the number of connections.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Iterates over the layer IDs of the stack, bottom first.
    pub fn layer_ids(&self) -> impl Iterator<Item = LayerId> {
        (0..self.layers).map(LayerId::from_raw)
    }

    /// Iterates over the blocks placed on `layer`, in ID order.
    pub fn layer_blocks(&self, layer: LayerId) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(move |b| b.layer == layer)
    }

    /// Returns whether every block lies inside its layer and on an existing layer.
    pub fn is_within_bounds(&self) -> bool {
        self.blocks
            .iter()
            .all(|b| b.layer.as_raw() < self.layers && b.is_within(self.floorplan_size))
    }

    /// Returns the `(layer, position)` assignment of a block.
    pub fn placement_of(&self, id: BlockId) -> (LayerId, Position) {
        self.block(id).placement()
    }

    /// Returns the IDs of blocks whose layer or position differs between the two states.
    ///
    /// Both states must describe the same block set.
    pub fn moved_blocks(&self, other: &FloorplanState) -> Vec<BlockId> {
        debug_assert_eq!(self.block_count(), other.block_count());
        self.blocks
            .iter()
            .zip(&other.blocks)
            .filter(|(a, b)| a.placement() != b.placement())
            .map(|(a, _)| a.id)
            .collect()
    }

    /// Renders the assignment as `"{id}@({x},{y},{layer})"` entries joined with `;`.
    pub fn placement_listing(&self) -> String {
        self.blocks
            .iter()
            .map(|b| {
                format!(
                    "{}@({},{},{})",
                    b.id, b.position.x, b.position.y, b.layer
                )
            })
            .collect::<Vec<_>>()
            .join(";")
    }
}
