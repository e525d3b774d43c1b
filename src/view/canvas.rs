use std::io::{self, Write};

use crate::{Cell, LiveSet};

const LIVE: char = '#';
const DEAD: char = ' ';

/// A window onto the plane. Cells outside it are clipped, never wrapped.
pub struct Canvas {
    lines: Vec<Vec<char>>,
    width: usize,
    height: usize,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            lines: vec![vec![DEAD; width]; height],
            width,
            height,
        }
    }

    /// Draws the part of `live` that falls inside the window whose top-left corner is `origin`.
    pub fn from_live_set(live: &LiveSet, origin: Cell, width: usize, height: usize) -> Self {
        let mut canvas = Self::new(width, height);
        for cell in live.iter() {
            if let Some((x, y)) = canvas.local(cell, origin) {
                canvas.lines[y][x] = LIVE;
            }
        }
        canvas
    }

    fn local(&self, cell: Cell, origin: Cell) -> Option<(usize, usize)> {
        let x = usize::try_from(cell.x.checked_sub(origin.x)?).ok()?;
        let y = usize::try_from(cell.y.checked_sub(origin.y)?).ok()?;
        (x < self.width && y < self.height).then_some((x, y))
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.lines.iter().map(|line| line.iter().collect())
    }

    pub fn display(&self, out: &mut impl Write, footer: &str) -> io::Result<()> {
        write!(out, "{}", termion::clear::All)?;
        for (index, line) in self.lines().enumerate() {
            let goto = termion::cursor::Goto(1, index as u16 + 1);
            write!(out, "{goto}{line}")?;
        }
        let goto = termion::cursor::Goto(1, self.height as u16 + 1);
        write!(out, "{goto}{footer}")?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell;

    #[test]
    fn clips_cells_outside_window() {
        let live: LiveSet = [(0, 0), (2, 1), (3, 0), (-1, 0), (0, 2)]
            .into_iter()
            .collect();
        let canvas = Canvas::from_live_set(&live, cell!(0, 0), 3, 2);
        let lines: Vec<_> = canvas.lines().collect();
        assert_eq!(lines, vec!["#  ", "  #"]);
    }

    #[test]
    fn origin_shifts_the_window() {
        let live: LiveSet = [(-5, -5), (-4, -5)].into_iter().collect();
        let canvas = Canvas::from_live_set(&live, cell!(-5, -5), 2, 1);
        assert_eq!(canvas.lines().collect::<Vec<_>>(), vec!["##"]);
    }

    #[test]
    fn far_cells_do_not_overflow() {
        let live: LiveSet = [(i64::MIN, i64::MAX)].into_iter().collect();
        let canvas = Canvas::from_live_set(&live, cell!(i64::MAX, i64::MIN), 4, 4);
        assert!(canvas.lines().all(|line| line.trim().is_empty()));
    }
}
