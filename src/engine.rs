//! Generation transitions under the B3/S23 rule.
//!
//! Only candidate cells are ever examined: the live cells and everything in their
//! neighborhoods. Live-neighbor counts for candidates are accumulated in a single
//! pass over the live cells, then each candidate is classified exactly once.

use std::collections::HashMap;

use metrohash::MetroBuildHasher;
use tracing::trace;

use crate::{neighborhood, LiveSet, Radius, Result};

/// Whether a cell is alive next generation given its state and live-neighbor count.
pub fn is_alive_next(alive: bool, live_neighbors: usize) -> bool {
    match (alive, live_neighbors) {
        (true, 2 | 3) => true, // stays
        (false, 3) => true,    // born
        _ => false,            // dies or stays dead
    }
}

/// Computes the generation following `live` with the classic 8-cell neighborhood.
pub fn next_generation(live: &LiveSet) -> LiveSet {
    step(live, Radius::MOORE)
}

/// Same survival and birth thresholds as [`next_generation`], counted over a
/// larger neighborhood. Fails when `radius` is below 1.
pub fn next_generation_with_radius(live: &LiveSet, radius: i64) -> Result<LiveSet> {
    let radius = Radius::new(radius)?;
    Ok(step(live, radius))
}

/// Runs `generations` steps from `live`. Stops early once nothing is left alive.
pub fn advance(live: &LiveSet, generations: u64) -> LiveSet {
    let mut current = live.clone();
    for _ in 0..generations {
        if current.is_empty() {
            break;
        }
        current = next_generation(&current);
    }
    current
}

/// Upper bound on the candidate map's initial allocation; past it the map grows as needed.
const MAX_CANDIDATE_RESERVE: usize = 1 << 16;

pub(crate) fn step(live: &LiveSet, radius: Radius) -> LiveSet {
    if live.is_empty() {
        return LiveSet::empty();
    }

    let mut counts: HashMap<_, usize, MetroBuildHasher> = HashMap::default();
    counts.reserve(
        live.len()
            .saturating_mul(radius.cell_count())
            .min(MAX_CANDIDATE_RESERVE),
    );

    for cell in live.iter() {
        for neighbor in neighborhood(cell, radius) {
            *counts.entry(neighbor).or_insert(0) += 1;
        }
    }
    trace!(
        population = live.len(),
        candidates = counts.len(),
        "classifying candidates"
    );

    // live cells absent from `counts` have no live neighbors and die
    let next = counts
        .into_iter()
        .filter(|&(cell, count)| is_alive_next(live.contains(cell), count))
        .map(|(cell, _)| cell)
        .collect();
    LiveSet::from_cells(next)
}
