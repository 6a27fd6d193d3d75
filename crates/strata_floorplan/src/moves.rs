//! Candidate generation for the annealer.
//!
//! A move perturbs a single block (relocate, relayer) or exchanges the
//! placements of two blocks (swap). The kind is drawn uniformly from the kinds
//! that are both enabled in [`MoveConfig`] and able to change the current
//! state, so a generated candidate never equals its input.

use crate::block::Position;
use crate::error::FloorplanError;
use crate::ids::{BlockId, LayerId};
use crate::state::FloorplanState;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use strata_config::MoveConfig;

/// The three perturbation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    /// New position on the same layer.
    Relocate,
    /// Same position on a different layer.
    Relayer,
    /// Exchange of two blocks' placements.
    Swap,
}

impl MoveKind {
    /// All kinds, in selection order.
    pub const ALL: [MoveKind; 3] = [MoveKind::Relocate, MoveKind::Relayer, MoveKind::Swap];

    /// Returns the lowercase name used in logs and reports.
    pub fn name(self) -> &'static str {
        match self {
            MoveKind::Relocate => "relocate",
            MoveKind::Relayer => "relayer",
            MoveKind::Swap => "swap",
        }
    }

    fn enabled(self, config: &MoveConfig) -> bool {
        match self {
            MoveKind::Relocate => config.relocate,
            MoveKind::Relayer => config.relayer,
            MoveKind::Swap => config.swap,
        }
    }
}

impl std::fmt::Display for MoveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A concrete perturbation applied to produce a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    /// `block` moved from `from` to `to` on its layer.
    Relocate {
        /// The moved block.
        block: BlockId,
        /// Previous position.
        from: Position,
        /// New position.
        to: Position,
    },
    /// `block` moved from layer `from` to layer `to`.
    Relayer {
        /// The moved block.
        block: BlockId,
        /// Previous layer.
        from: LayerId,
        /// New layer.
        to: LayerId,
    },
    /// `a` and `b` exchanged layers and (clamped) positions.
    Swap {
        /// First block.
        a: BlockId,
        /// Second block.
        b: BlockId,
    },
}

impl Move {
    /// Returns the kind of this move.
    pub fn kind(&self) -> MoveKind {
        match self {
            Move::Relocate { .. } => MoveKind::Relocate,
            Move::Relayer { .. } => MoveKind::Relayer,
            Move::Swap { .. } => MoveKind::Swap,
        }
    }

    /// Returns the blocks this move is allowed to touch.
    pub fn blocks(&self) -> Vec<BlockId> {
        match *self {
            Move::Relocate { block, .. } | Move::Relayer { block, .. } => vec![block],
            Move::Swap { a, b } => vec![a, b],
        }
    }
}

/// Returns the move kinds that are enabled and can change `state`.
pub fn feasible_kinds(state: &FloorplanState, config: &MoveConfig) -> Vec<MoveKind> {
    MoveKind::ALL
        .into_iter()
        .filter(|kind| kind.enabled(config) && is_feasible(*kind, state))
        .collect()
}

fn is_feasible(kind: MoveKind, state: &FloorplanState) -> bool {
    match kind {
        MoveKind::Relocate => !relocatable_blocks(state).is_empty(),
        MoveKind::Relayer => state.layers > 1 && state.block_count() > 0,
        MoveKind::Swap => {
            let mut placements = state.blocks.iter().map(|b| b.placement());
            match placements.next() {
                Some(first) => placements.any(|p| p != first),
                None => false,
            }
        }
    }
}

/// Blocks with at least one other in-bounds position on their layer.
fn relocatable_blocks(state: &FloorplanState) -> Vec<BlockId> {
    let size = state.floorplan_size;
    state
        .blocks
        .iter()
        .filter(|b| b.max_x(size) > 0 || b.max_y(size) > 0)
        .map(|b| b.id)
        .collect()
}

/// Produces a candidate that differs from `state` by exactly one move.
///
/// The input is never modified. Returns [`FloorplanError::NoValidMove`] when
/// no enabled kind can change the state (for example a single block that fills
/// its only layer).
pub fn perturb<R: Rng>(
    state: &FloorplanState,
    config: &MoveConfig,
    rng: &mut R,
) -> Result<(FloorplanState, Move), FloorplanError> {
    let kinds = feasible_kinds(state, config);
    let kind = *kinds.choose(rng).ok_or(FloorplanError::NoValidMove)?;

    let mut candidate = state.clone();
    let mv = match kind {
        MoveKind::Relocate => relocate(&mut candidate, rng),
        MoveKind::Relayer => relayer(&mut candidate, rng),
        MoveKind::Swap => swap(&mut candidate, rng),
    };
    debug_assert!(candidate.is_within_bounds());
    debug_assert!(!state.moved_blocks(&candidate).is_empty());
    Ok((candidate, mv))
}

/// Draws uniformly among all positions of the block except its current one.
fn relocate<R: Rng>(state: &mut FloorplanState, rng: &mut R) -> Move {
    let candidates = relocatable_blocks(state);
    let id = candidates[rng.gen_range(0..candidates.len())];
    let size = state.floorplan_size;
    let block = state.block_mut(id);

    let nx = block.max_x(size) as u64 + 1;
    let ny = block.max_y(size) as u64 + 1;
    let from = block.position;
    let current = from.y as u64 * nx + from.x as u64;
    let mut pick = rng.gen_range(0..nx * ny - 1);
    if pick >= current {
        pick += 1;
    }
    let to = Position::new((pick % nx) as u32, (pick / nx) as u32);
    block.position = to;
    Move::Relocate { block: id, from, to }
}

fn relayer<R: Rng>(state: &mut FloorplanState, rng: &mut R) -> Move {
    let id = BlockId::from_raw(rng.gen_range(0..state.block_count() as u32));
    let layers = state.layers;
    let block = state.block_mut(id);
    let from = block.layer;
    let mut to = rng.gen_range(0..layers - 1);
    if to >= from.as_raw() {
        to += 1;
    }
    let to = LayerId::from_raw(to);
    block.layer = to;
    Move::Relayer { block: id, from, to }
}

/// Exchanges the placements of two blocks whose placements differ.
///
/// Each block's new position is clamped to its own footprint bounds, since
/// blocks may have different sizes.
fn swap<R: Rng>(state: &mut FloorplanState, rng: &mut R) -> Move {
    let n = state.block_count() as u32;
    let a = BlockId::from_raw(rng.gen_range(0..n));
    let a_placement = state.placement_of(a);
    let partners: Vec<BlockId> = state
        .blocks
        .iter()
        .filter(|blk| blk.placement() != a_placement)
        .map(|blk| blk.id)
        .collect();
    // Feasibility guarantees at least two distinct placements, so every block has a partner.
    let b = partners[rng.gen_range(0..partners.len())];

    let size = state.floorplan_size;
    let (a_layer, a_pos) = a_placement;
    let (b_layer, b_pos) = state.placement_of(b);

    let block_a = state.block_mut(a);
    block_a.layer = b_layer;
    block_a.position = block_a.clamp_position(b_pos, size);

    let block_b = state.block_mut(b);
    block_b.layer = a_layer;
    block_b.position = block_b.clamp_position(a_pos, size);

    Move::Swap { a, b }
}
