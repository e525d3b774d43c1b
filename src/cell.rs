use std::ops::{Add, Sub};

/// A point on the unbounded plane. `y` grows downward, matching how rows are read and drawn.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
}

#[macro_export]
macro_rules! cell {
    ($x:expr, $y:expr) => {
        $crate::Cell { x: $x, y: $y }
    };
}

impl Cell {
    /// offsets this cell, or `None` when the result leaves the representable plane.
    pub fn checked_offset(self, dx: i64, dy: i64) -> Option<Self> {
        Some(cell!(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }
}

impl Add for Cell {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        cell!(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Cell {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        cell!(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i64, i64)> for Cell {
    fn from((x, y): (i64, i64)) -> Self {
        cell!(x, y)
    }
}

#[test]
fn test_checked_offset() {
    assert_eq!(cell!(0, 0).checked_offset(-1, 1), Some(cell!(-1, 1)));
    assert_eq!(cell!(i64::MAX, 0).checked_offset(1, 0), None);
    assert_eq!(cell!(0, i64::MIN).checked_offset(0, -1), None);
    assert_eq!(cell!(3, 4) - cell!(1, 1), cell!(2, 3));
}
