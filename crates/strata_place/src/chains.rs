//! Independent annealing chains.
//!
//! Each chain anneals its own copy of the initial floorplan with its own
//! seeded RNG, so chains share nothing while running. Once every chain has
//! finished, the chain with the lowest best energy wins; ties go to the
//! lowest chain index, which keeps the result independent of thread timing.

use crate::anneal::{Annealer, OptimizerOutcome};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use strata_floorplan::FloorplanState;

/// Derives `chains` chain seeds from `rng`.
pub fn chain_seeds<R: Rng>(rng: &mut R, chains: usize) -> Vec<u64> {
    (0..chains).map(|_| rng.gen()).collect()
}

/// Runs one chain per seed in parallel and returns the best outcome.
///
/// Returns `None` only when `seeds` is empty.
pub fn run_chains(
    annealer: &Annealer,
    initial: &FloorplanState,
    seeds: &[u64],
) -> Option<OptimizerOutcome> {
    let outcomes: Vec<OptimizerOutcome> = seeds
        .par_iter()
        .map(|&seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            annealer.run(initial.clone(), &mut rng)
        })
        .collect();

    log::debug!(
        "chain best energies: {:?}",
        outcomes.iter().map(|o| o.best_energy).collect::<Vec<_>>()
    );

    outcomes
        .into_iter()
        .enumerate()
        .min_by(|(ia, a), (ib, b)| a.best_energy.total_cmp(&b.best_energy).then(ia.cmp(ib)))
        .map(|(_, outcome)| outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_config::{BlockConfig, StrataConfig};
    use strata_floorplan::initialize;

    fn setup() -> (Annealer, FloorplanState) {
        let mut rng = StdRng::seed_from_u64(12);
        let initial = initialize(10, 2, 2, 50, &BlockConfig::default(), &mut rng).unwrap();
        (Annealer::new(&StrataConfig::default()), initial)
    }

    #[test]
    fn best_chain_wins() {
        let (annealer, initial) = setup();
        let seeds = [1, 2, 3, 4];
        let best = run_chains(&annealer, &initial, &seeds).unwrap();
        for seed in seeds {
            let single = annealer.run(initial.clone(), &mut StdRng::seed_from_u64(seed));
            assert!(best.best_energy <= single.best_energy);
        }
        assert_eq!(best.initial, initial);
    }

    #[test]
    fn chains_are_deterministic() {
        let (annealer, initial) = setup();
        let a = run_chains(&annealer, &initial, &[5, 6, 7]).unwrap();
        let b = run_chains(&annealer, &initial, &[5, 6, 7]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn single_chain_matches_direct_run() {
        let (annealer, initial) = setup();
        let chained = run_chains(&annealer, &initial, &[9]).unwrap();
        let direct = annealer.run(initial, &mut StdRng::seed_from_u64(9));
        assert_eq!(chained, direct);
    }

    #[test]
    fn no_seeds_no_outcome() {
        let (annealer, initial) = setup();
        assert!(run_chains(&annealer, &initial, &[]).is_none());
    }

    #[test]
    fn seeds_derived_reproducibly() {
        let a = chain_seeds(&mut StdRng::seed_from_u64(1), 3);
        let b = chain_seeds(&mut StdRng::seed_from_u64(1), 3);
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
    }
}
