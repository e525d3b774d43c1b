//! Plaintext seed patterns.
//!
//! One line per row, one character per column, `y` growing downward. `#`, `O` and `*`
//! are live, anything else is dead. Lines starting with `!` are comments.

use crate::{cell, LiveSet};

const GLIDER: &str = "\
!Name: Glider
.O.
..O
OOO
";

const BLINKER: &str = "\
!Name: Blinker
OOO
";

const BLOCK: &str = "\
!Name: Block
OO
OO
";

const R_PENTOMINO: &str = "\
!Name: R-pentomino
.OO
OO.
.O.
";

pub const BUILTIN_NAMES: &[&str] = &["glider", "blinker", "block", "r-pentomino"];

pub fn builtin(name: &str) -> Option<LiveSet> {
    let source = match name {
        "glider" => GLIDER,
        "blinker" => BLINKER,
        "block" => BLOCK,
        "r-pentomino" => R_PENTOMINO,
        _ => return None,
    };
    Some(parse(source))
}

pub fn parse(source: &str) -> LiveSet {
    source
        .lines()
        .filter(|line| !line.starts_with('!'))
        .zip(0..)
        .flat_map(|(line, y)| {
            line.chars()
                .zip(0..)
                .filter(|&(c, _)| matches!(c, '#' | 'O' | '*'))
                .map(move |(_, x)| cell!(x, y))
        })
        .collect()
}

/// Largest bounding box, in cells, that [`render`] will draw.
pub const MAX_RENDER_AREA: u128 = 1 << 24;

/// Renders the bounding box of `live`, `O` for live and `.` for dead.
///
/// Returns `None` when the box is larger than [`MAX_RENDER_AREA`]; use
/// [`render_cells`] for patterns that spread that far.
pub fn render(live: &LiveSet) -> Option<String> {
    let Some((min, max)) = live.bounding_box() else {
        return Some(String::new());
    };
    let width = (i128::from(max.x) - i128::from(min.x) + 1) as u128;
    let height = (i128::from(max.y) - i128::from(min.y) + 1) as u128;
    if width.saturating_mul(height) > MAX_RENDER_AREA {
        return None;
    }

    let mut result = String::new();
    for y in min.y..=max.y {
        for x in min.x..=max.x {
            result.push(if live.contains(cell!(x, y)) { 'O' } else { '.' });
        }
        result.push('\n');
    }
    Some(result)
}

/// Lists live cells as `x y` lines, sorted by `x` then `y`.
pub fn render_cells(live: &LiveSet) -> String {
    let mut cells: Vec<_> = live.iter().collect();
    cells.sort_unstable();
    cells
        .into_iter()
        .map(|cell| format!("{} {}\n", cell.x, cell.y))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_live_markers() {
        let live = parse("#.O\n\n..*\n");
        let expected: LiveSet = [(0, 0), (2, 0), (2, 2)].into_iter().collect();
        assert_eq!(live, expected);
    }

    #[test]
    fn comments_do_not_take_a_row() {
        let live = parse("!comment\nO\n!another\n.O\n");
        let expected: LiveSet = [(0, 0), (1, 1)].into_iter().collect();
        assert_eq!(live, expected);
    }

    #[test]
    fn renders_bounding_box_only() {
        let live: LiveSet = [(-2, 5), (0, 6)].into_iter().collect();
        assert_eq!(render(&live).as_deref(), Some("O..\n..O\n"));
        assert_eq!(render(&LiveSet::empty()).as_deref(), Some(""));
    }

    #[test]
    fn spread_out_sets_are_not_drawn_densely() {
        let live: LiveSet = [(0, 0), (1 << 20, 1 << 20)].into_iter().collect();
        assert_eq!(render(&live), None);
        let corners: LiveSet = [(i64::MIN, i64::MIN), (i64::MAX, i64::MAX)]
            .into_iter()
            .collect();
        assert_eq!(render(&corners), None);
    }

    #[test]
    fn cells_are_listed_in_order() {
        let live: LiveSet = [(3, -1), (-7, 2), (3, -4)].into_iter().collect();
        assert_eq!(render_cells(&live), "-7 2\n3 -4\n3 -1\n");
        assert_eq!(render_cells(&LiveSet::empty()), "");
    }

    #[test]
    fn builtins_are_known() {
        for name in BUILTIN_NAMES {
            assert!(builtin(name).is_some_and(|live| !live.is_empty()), "{name}");
        }
        assert_eq!(builtin("glider").map(|live| live.len()), Some(5));
        assert!(builtin("nope").is_none());
    }
}
