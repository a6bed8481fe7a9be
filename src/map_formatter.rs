use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{MapCell, Pos};
use crate::map::PuzzleMap;
use crate::state::State;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Contents {
    Empty,
    Box,
    Player,
}

impl Default for Contents {
    fn default() -> Self {
        Contents::Empty
    }
}

/// Renders a map in XSB format, optionally with a state on top.
pub struct MapFormatter<'a> {
    map: &'a PuzzleMap,
    state: Option<&'a State>,
}

impl<'a> MapFormatter<'a> {
    pub(crate) fn new(map: &'a PuzzleMap, state: Option<&'a State>) -> Self {
        Self { map, state }
    }
}

impl Display for MapFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let grid = &self.map.grid;

        let mut state_grid = grid.scratchpad();
        if let Some(state) = self.state {
            for b in state.box_positions() {
                state_grid[b] = Contents::Box;
            }
            state_grid[state.player_pos] = Contents::Player;
        }

        for r in 0..grid.rows() {
            // don't print trailing empty cells to match the input level strings
            let mut last_non_empty = None;
            for c in 0..grid.cols() {
                let pos = Pos::new(r as i32, c as i32);
                if grid[pos] != MapCell::Empty || state_grid[pos] != Contents::Empty {
                    last_non_empty = Some(c);
                }
            }

            if let Some(last) = last_non_empty {
                for c in 0..=last {
                    let pos = Pos::new(r as i32, c as i32);
                    write_xsb(grid[pos], state_grid[pos], f)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Debug for MapFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

fn write_xsb(cell: MapCell, contents: Contents, f: &mut Formatter<'_>) -> fmt::Result {
    match (cell, contents) {
        (MapCell::Wall, _) => write!(f, "#"),
        (MapCell::Empty, Contents::Empty) => write!(f, " "),
        (MapCell::Empty, Contents::Box) => write!(f, "$"),
        (MapCell::Empty, Contents::Player) => write!(f, "@"),
        (MapCell::Goal, Contents::Empty) => write!(f, "."),
        (MapCell::Goal, Contents::Box) => write!(f, "*"),
        (MapCell::Goal, Contents::Player) => write!(f, "+"),
    }
}
