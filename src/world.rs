use std::collections::{hash_set, HashSet};

use metrohash::MetroBuildHasher;

use crate::{cell, Cell};

/// The complete state of a generation: the set of living cells.
///
/// A `LiveSet` is never edited in place once built; operations that "change" it,
/// like [`LiveSet::toggled`], return a fresh set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveSet {
    cells: HashSet<Cell, MetroBuildHasher>,
}

impl LiveSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// smallest and largest corner of the rectangle enclosing every live cell.
    pub fn bounding_box(&self) -> Option<(Cell, Cell)> {
        let mut cells = self.iter();
        let first = cells.next()?;
        Some(cells.fold((first, first), |(min, max), c| {
            (
                cell!(min.x.min(c.x), min.y.min(c.y)),
                cell!(max.x.max(c.x), max.y.max(c.y)),
            )
        }))
    }

    /// A copy of this set shifted by `offset`. Cells pushed off the plane are lost.
    pub fn translated(&self, offset: Cell) -> Self {
        self.iter()
            .filter_map(|c| c.checked_offset(offset.x, offset.y))
            .collect()
    }

    /// A copy of this set with the state of `cell` flipped.
    pub fn toggled(&self, cell: Cell) -> Self {
        let mut cells = self.cells.clone();
        if !cells.remove(&cell) {
            cells.insert(cell);
        }
        Self { cells }
    }

    pub(crate) fn from_cells(cells: HashSet<Cell, MetroBuildHasher>) -> Self {
        Self { cells }
    }
}

impl FromIterator<Cell> for LiveSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<(i64, i64)> for LiveSet {
    fn from_iter<I: IntoIterator<Item = (i64, i64)>>(iter: I) -> Self {
        iter.into_iter().map(Cell::from).collect()
    }
}

impl IntoIterator for LiveSet {
    type Item = Cell;
    type IntoIter = hash_set::IntoIter<Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

impl<'a> IntoIterator for &'a LiveSet {
    type Item = &'a Cell;
    type IntoIter = hash_set::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_collapse() {
        let live: LiveSet = [(1, 1), (1, 1), (2, 2)].into_iter().collect();
        assert_eq!(live.len(), 2);
    }

    #[test]
    fn bounding_box_spans_negative_cells() {
        let live: LiveSet = [(-3, 4), (2, -1), (0, 0)].into_iter().collect();
        assert_eq!(live.bounding_box(), Some((cell!(-3, -1), cell!(2, 4))));
        assert_eq!(LiveSet::empty().bounding_box(), None);
    }

    #[test]
    fn toggled_leaves_original_untouched() {
        let live: LiveSet = [(0, 0)].into_iter().collect();
        let flipped = live.toggled(cell!(0, 0)).toggled(cell!(1, 1));
        assert!(live.contains(cell!(0, 0)));
        assert!(!flipped.contains(cell!(0, 0)));
        assert!(flipped.contains(cell!(1, 1)));
    }

    #[test]
    fn translated_moves_every_cell() {
        let live: LiveSet = [(0, 0), (1, 2)].into_iter().collect();
        let moved = live.translated(cell!(-1, 1));
        let expected: LiveSet = [(-1, 1), (0, 3)].into_iter().collect();
        assert_eq!(moved, expected);
    }
}
