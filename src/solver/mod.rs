pub mod dead_squares;
pub mod expand;
pub mod heuristics;
pub mod stats;

mod search;
mod tree;

use std::fmt::{self, Debug, Display, Formatter};
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::config::{Algorithm, ConfigErr, Model, SearchConfig};
use crate::map::PuzzleMap;
use crate::moves::Moves;
use crate::solution_formatter::SolutionFormatter;
use crate::state::State;
use crate::Solve;

use self::dead_squares::DeadSquares;
use self::search::Context;
use self::stats::Stats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Outcome::Success => write!(f, "success"),
            Outcome::Failure => write!(f, "failure"),
        }
    }
}

/// What a single search call found and how much work it took.
#[derive(Clone)]
pub struct SearchResult {
    pub config: SearchConfig,
    pub outcome: Outcome,
    /// Empty on failure
    pub solution: Moves,
    /// Number of moves (move model) or pushes (push model), `None` on failure
    pub cost: Option<u32>,
    pub stats: Stats,
    pub elapsed: Duration,
}

impl SearchResult {
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }

    pub fn nodes_expanded(&self) -> u64 {
        self.stats.expanded
    }

    pub fn max_frontier(&self) -> usize {
        self.stats.max_frontier
    }
}

impl Display for SearchResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.config)?;
        match self.cost {
            None => writeln!(f, "No solution")?,
            Some(cost) => {
                writeln!(f, "{}", self.solution)?;
                writeln!(f, "Cost: {}", cost)?;
                writeln!(f, "Moves: {}", self.solution.move_cnt())?;
                writeln!(f, "Pushes: {}", self.solution.push_cnt())?;
            }
        }
        write!(f, "{}", self.stats)
    }
}

impl Debug for SearchResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} cost {:?} in {:?} ({:?})",
            self.config, self.outcome, self.cost, self.elapsed, self.stats
        )
    }
}

/// Runs searches on one map.
///
/// Dead squares only depend on the map so they're computed once
/// and shared by every configuration.
pub struct Solver<'a> {
    map: &'a PuzzleMap,
    dead_squares: DeadSquares,
}

impl<'a> Solver<'a> {
    pub fn new(map: &'a PuzzleMap) -> Self {
        debug!("Computing dead squares...");
        let dead_squares = DeadSquares::compute(map);
        debug!("Found {} dead squares", dead_squares.len());
        Solver { map, dead_squares }
    }

    pub fn map(&self) -> &'a PuzzleMap {
        self.map
    }

    pub fn dead_squares(&self) -> &DeadSquares {
        &self.dead_squares
    }

    pub fn search(&self, config: &SearchConfig) -> Result<SearchResult, ConfigErr> {
        config.validate()?;
        if config.algorithm == Algorithm::AStar {
            if let Some(h) = config.heuristic {
                if !h.is_admissible() {
                    warn!("{} is not admissible, the result might not be optimal", h);
                }
            }
        }

        debug!("Search called: {}", config);
        let started = Instant::now();
        let ctx = Context {
            map: self.map,
            dead_squares: &self.dead_squares,
            model: config.model,
        };
        let (found, stats) = config.algorithm.search(&ctx, config)?;
        let elapsed = started.elapsed();

        let (outcome, solution, cost) = match found {
            Some((moves, cost)) => (Outcome::Success, moves, Some(cost)),
            None => (Outcome::Failure, Moves::default(), None),
        };
        info!(
            "{}: {}, cost {:?}, expanded {}, max frontier {}",
            config, outcome, cost, stats.expanded, stats.max_frontier
        );

        Ok(SearchResult {
            config: *config,
            outcome,
            solution,
            cost,
            stats,
            elapsed,
        })
    }

    /// States visited by following `moves` from the initial state, the initial state included.
    /// `None` if some move is not legal where it's applied.
    pub fn replay(&self, model: Model, moves: &Moves) -> Option<Vec<State>> {
        let mut states = vec![self.map.initial_state()];
        for &mov in moves {
            let last = states.last()?;
            let next = model.apply(self.map, &self.dead_squares, last, mov)?;
            states.push(next);
        }
        Some(states)
    }

    pub fn format_solution<'b>(
        &'b self,
        result: &'b SearchResult,
        include_steps: bool,
    ) -> SolutionFormatter<'b> {
        SolutionFormatter::new(self, result.config.model, &result.solution, include_steps)
    }
}

impl Debug for Solver<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:?}", self.map)?;
        write!(f, "{:?}", self.dead_squares)
    }
}

impl Solve for PuzzleMap {
    fn solve(&self, config: &SearchConfig) -> Result<SearchResult, ConfigErr> {
        Solver::new(self).search(config)
    }
}
