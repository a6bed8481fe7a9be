use std::fmt::{self, Debug, Display, Formatter};

use crate::config::Model;
use crate::moves::Moves;
use crate::solver::Solver;

/// Replays a solution from the initial state and renders the states as XSB grids.
///
/// Only states after a push are shown unless `include_steps` is set.
pub struct SolutionFormatter<'a> {
    solver: &'a Solver<'a>,
    model: Model,
    moves: &'a Moves,
    include_steps: bool,
}

impl<'a> SolutionFormatter<'a> {
    pub(crate) fn new(
        solver: &'a Solver<'a>,
        model: Model,
        moves: &'a Moves,
        include_steps: bool,
    ) -> Self {
        Self {
            solver,
            model,
            moves,
            include_steps,
        }
    }
}

impl Display for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let map = self.solver.map();
        let states = match self.solver.replay(self.model, self.moves) {
            Some(states) => states,
            None => return writeln!(f, "Moves {} are not valid for this map", self.moves),
        };

        writeln!(f, "{}", map.format_with_state(&states[0]))?;
        for (mov, state) in self.moves.iter().zip(&states[1..]) {
            if mov.is_push() || self.include_steps {
                writeln!(f, "{}", map.format_with_state(state))?;
            }
        }
        Ok(())
    }
}

impl Debug for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{Algorithm, SearchConfig};
    use crate::data::Dir;
    use crate::map::PuzzleMap;
    use crate::moves::Move;

    use super::*;

    const ONE_WAY: &str = r"
#######
#@ $ .#
#######";

    #[test]
    fn pushes_only() {
        let map: PuzzleMap = ONE_WAY.parse().unwrap();
        let solver = Solver::new(&map);
        let result = solver.search(&SearchConfig::new(Algorithm::Bfs, Model::Move)).unwrap();
        assert_eq!(result.solution.to_string(), "rRR");

        let expected = r"
#######
#@ $ .#
#######

#######
#  @$.#
#######

#######
#   @*#
#######

"
        .trim_start_matches('\n');
        assert_eq!(solver.format_solution(&result, false).to_string(), expected);
    }

    #[test]
    fn with_steps() {
        let map: PuzzleMap = ONE_WAY.parse().unwrap();
        let solver = Solver::new(&map);
        let result = solver.search(&SearchConfig::new(Algorithm::Bfs, Model::Move)).unwrap();

        let formatted = solver.format_solution(&result, true).to_string();
        assert_eq!(formatted.matches("#######\n\n").count(), 4);
        assert!(formatted.contains("# @$ .#"));
    }

    #[test]
    fn invalid_moves() {
        let map: PuzzleMap = ONE_WAY.parse().unwrap();
        let solver = Solver::new(&map);
        let moves = Moves::new(vec![Move::step(Dir::Left)]);
        let formatter = SolutionFormatter::new(&solver, Model::Move, &moves, true);
        assert_eq!(formatter.to_string(), "Moves l are not valid for this map\n");
    }
}
