use std::fmt;
use std::fmt::{Debug, Display, Formatter};

use crate::data::{MapCell, Pos};
use crate::map_formatter::MapFormatter;
use crate::state::{PlacedBox, State};
use crate::vec2d::Vec2d;

/// Static geometry of a level together with its initial layout.
///
/// Anything outside the parsed grid is treated as wall so levels
/// with an incomplete border can't let the player walk off the map.
#[derive(Clone)]
pub struct PuzzleMap {
    pub(crate) grid: Vec2d<MapCell>,
    goals: Vec<Pos>,
    player_start: Pos,
    boxes_start: Vec<PlacedBox>,
}

impl PuzzleMap {
    pub(crate) fn new(
        grid: Vec2d<MapCell>,
        mut goals: Vec<Pos>,
        player_start: Pos,
        boxes_start: Vec<PlacedBox>,
    ) -> Self {
        goals.sort();
        PuzzleMap {
            grid,
            goals,
            player_start,
            boxes_start,
        }
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        match self.grid.get(pos) {
            None | Some(MapCell::Wall) => true,
            Some(_) => false,
        }
    }

    pub fn is_goal(&self, pos: Pos) -> bool {
        self.grid.get(pos) == Some(&MapCell::Goal)
    }

    /// Sorted
    pub fn goals(&self) -> &[Pos] {
        &self.goals
    }

    pub fn walls(&self) -> impl Iterator<Item = Pos> + '_ {
        self.grid
            .positions()
            .filter(move |&pos| self.grid[pos] == MapCell::Wall)
    }

    /// All non-wall cells, goals included.
    pub fn floors(&self) -> impl Iterator<Item = Pos> + '_ {
        self.grid
            .positions()
            .filter(move |&pos| self.grid[pos] != MapCell::Wall)
    }

    pub fn player_start(&self) -> Pos {
        self.player_start
    }

    pub fn boxes_start(&self) -> &[PlacedBox] {
        &self.boxes_start
    }

    pub fn initial_state(&self) -> State {
        State::new(self.player_start, self.boxes_start.clone())
    }

    /// Every box is on a goal and every goal has a box.
    pub fn is_solved(&self, state: &State) -> bool {
        state.boxes().len() == self.goals.len() && state.box_positions().all(|b| self.is_goal(b))
    }

    pub fn format_with_state<'a>(&'a self, state: &'a State) -> MapFormatter<'a> {
        MapFormatter::new(self, Some(state))
    }
}

impl Display for PuzzleMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let state = self.initial_state();
        write!(f, "{}", self.format_with_state(&state))
    }
}

impl Debug for PuzzleMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PuzzleMap {{ rows: {}, cols: {}, player: {}, boxes: {}, goals: {} }}",
            self.rows(),
            self.cols(),
            self.player_start,
            self.boxes_start.len(),
            self.goals.len()
        )
    }
}
