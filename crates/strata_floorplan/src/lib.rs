//! Floorplan model for the Strata multi-layer placement optimizer.
//!
//! A floorplan is a stack of square layers holding rectangular functional
//! blocks, plus a fixed set of weighted block-to-block connections. This crate
//! owns the data model ([`FloorplanState`], [`Block`], [`Connection`]), random
//! initialization from request parameters, the geometric queries the cost
//! function needs (distance, overlap, bounds), and the move generator that
//! produces annealing candidates.
//!
//! # Example
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use strata_config::{BlockConfig, MoveConfig};
//! use strata_floorplan::{initialize, perturb};
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let state = initialize(8, 2, 2, 50, &BlockConfig::default(), &mut rng).unwrap();
//! let (candidate, mv) = perturb(&state, &MoveConfig::default(), &mut rng).unwrap();
//! assert!(!state.moved_blocks(&candidate).is_empty());
//! assert!(mv.blocks().len() <= 2);
//! ```

#![warn(missing_docs)]

pub mod block;
pub mod connection;
pub mod error;
pub mod ids;
pub mod init;
pub mod moves;
pub mod state;

pub use block::{distance, Block, Position};
pub use connection::{generate_connections, Connection};
pub use error::FloorplanError;
pub use ids::{BlockId, LayerId};
pub use init::{initialize, initialize_from_params, FloorplanParams};
pub use moves::{feasible_kinds, perturb, Move, MoveKind};
pub use state::FloorplanState;
