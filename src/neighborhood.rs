use std::collections::HashSet;

use crate::{Cell, LifeError, Result};

/// Chebyshev radius of a neighborhood, known to be at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Radius(i64);

impl Radius {
    /// The classic 8-cell neighborhood.
    pub const MOORE: Radius = Radius(1);

    pub fn new(radius: i64) -> Result<Self> {
        if radius < 1 {
            return Err(LifeError::InvalidRadius(radius));
        }
        Ok(Self(radius))
    }

    pub fn get(self) -> i64 {
        self.0
    }

    /// number of cells in a neighborhood of this radius, the center excluded.
    /// Saturates at `usize::MAX` for radii whose neighborhood can't be counted.
    pub fn cell_count(self) -> usize {
        let side = usize::try_from(self.0)
            .ok()
            .and_then(|r| r.checked_mul(2)?.checked_add(1));
        side.and_then(|side| side.checked_mul(side))
            .map_or(usize::MAX, |area| area - 1)
    }
}

impl Default for Radius {
    fn default() -> Self {
        Self::MOORE
    }
}

/// Every cell within `radius` of `cell`, excluding `cell` itself.
///
/// Offsets that would leave the representable plane are skipped.
pub fn neighborhood(cell: Cell, radius: Radius) -> impl Iterator<Item = Cell> {
    let r = radius.get();
    (-r..=r)
        .flat_map(move |dy| (-r..=r).map(move |dx| (dx, dy)))
        .filter(|&offset| offset != (0, 0))
        .filter_map(move |(dx, dy)| cell.checked_offset(dx, dy))
}

pub fn moore_neighbors(cell: Cell) -> impl Iterator<Item = Cell> {
    neighborhood(cell, Radius::MOORE)
}

/// Collects the neighborhood of `cell` after validating `radius`.
pub fn neighbors(cell: Cell, radius: i64) -> Result<HashSet<Cell>> {
    let radius = Radius::new(radius)?;
    Ok(neighborhood(cell, radius).collect())
}
