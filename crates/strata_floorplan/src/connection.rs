//! Block-to-block interconnect requirements.

use crate::ids::BlockId;
use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An unordered, weighted interconnect between two distinct blocks.
///
/// The endpoints are stored normalized (`a < b`) so two connections over the
/// same pair always compare equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Lower endpoint ID.
    pub a: BlockId,
    /// Higher endpoint ID.
    pub b: BlockId,
    /// Relative importance of the connection; scales its wire and power terms.
    pub weight: f64,
}

impl Connection {
    /// Creates a unit-weight connection between two blocks.
    pub fn new(x: BlockId, y: BlockId) -> Self {
        Self::with_weight(x, y, 1.0)
    }

    /// Creates a connection with an explicit weight.
    pub fn with_weight(x: BlockId, y: BlockId, weight: f64) -> Self {
        debug_assert_ne!(x, y, "self-connections are not allowed");
        let (a, b) = if x < y { (x, y) } else { (y, x) };
        Self { a, b, weight }
    }
}

/// Generates a random connection graph over `num_blocks` blocks.
///
/// Blocks are visited in ID order; each one is linked to randomly chosen
/// partners until it has `per_block` connections or no eligible partner is
/// left. A partner is eligible if it is not the block itself, is not already
/// connected to it, and still has spare degree. The result therefore has no
/// duplicate edges and no block exceeds `per_block` connections.
pub fn generate_connections<R: Rng>(
    rng: &mut R,
    num_blocks: usize,
    per_block: usize,
) -> Vec<Connection> {
    let mut degree = vec![0usize; num_blocks];
    let mut seen: HashSet<(BlockId, BlockId)> = HashSet::new();
    let mut connections = Vec::new();

    for i in 0..num_blocks {
        let need = per_block.saturating_sub(degree[i]);
        if need == 0 {
            continue;
        }
        let me = BlockId::from_raw(i as u32);
        let candidates: Vec<usize> = (0..num_blocks)
            .filter(|&j| j != i && degree[j] < per_block)
            .filter(|&j| {
                let c = Connection::new(me, BlockId::from_raw(j as u32));
                !seen.contains(&(c.a, c.b))
            })
            .collect();
        let amount = need.min(candidates.len());
        for pick in index::sample(rng, candidates.len(), amount) {
            let j = candidates[pick];
            let conn = Connection::new(me, BlockId::from_raw(j as u32));
            seen.insert((conn.a, conn.b));
            degree[i] += 1;
            degree[j] += 1;
            connections.push(conn);
        }
    }

    connections
}
