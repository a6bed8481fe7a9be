// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused)]
// Clippy
#![warn(clippy::all)]

pub mod config;
pub mod map_formatter;
pub mod moves;
pub mod solution_formatter;
pub mod solver;

mod data;
mod fs;
mod map;
mod parser;
mod state;
mod vec2d;

use std::error::Error;
use std::path::Path;

pub use crate::data::{Dir, Pos};
pub use crate::map::PuzzleMap;
pub use crate::parser::ParserErr;
pub use crate::state::{BoxId, PlacedBox, State};

use crate::config::{ConfigErr, SearchConfig};
use crate::solver::SearchResult;

pub trait LoadMap {
    fn load_map(&self) -> Result<PuzzleMap, Box<dyn Error>>;
}

impl LoadMap for str {
    fn load_map(&self) -> Result<PuzzleMap, Box<dyn Error>> {
        Path::new(self).load_map()
    }
}

impl LoadMap for Path {
    fn load_map(&self) -> Result<PuzzleMap, Box<dyn Error>> {
        let level = fs::read_file(self)?;
        let map: PuzzleMap = level.parse()?;
        Ok(map)
    }
}

pub trait Solve {
    fn solve(&self, config: &SearchConfig) -> Result<SearchResult, ConfigErr>;
}
