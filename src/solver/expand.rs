use crate::config::Model;
use crate::data::{Dir, Pos, DIRECTIONS};
use crate::map::PuzzleMap;
use crate::moves::Move;
use crate::solver::dead_squares::DeadSquares;
use crate::state::{BoxId, State};
use crate::vec2d::Vec2d;

impl Model {
    /// Legal successors of `state` together with the move that leads to each.
    ///
    /// Pushes that put a box on a dead square (unless it's a goal),
    /// freeze it against walls and other boxes or close a 2x2 block are never generated.
    pub(crate) fn expand(
        self,
        map: &PuzzleMap,
        dead_squares: &DeadSquares,
        state: &State,
    ) -> Vec<(State, Move)> {
        match self {
            Model::Move => expand_move(map, dead_squares, state),
            Model::Push => expand_push(map, dead_squares, state),
        }
    }

    /// Applies a single move the same way expansion would,
    /// `None` if the move is not legal in `state`.
    pub fn apply(
        self,
        map: &PuzzleMap,
        dead_squares: &DeadSquares,
        state: &State,
        mov: Move,
    ) -> Option<State> {
        self.expand(map, dead_squares, state)
            .into_iter()
            .find(|&(_, m)| m == mov)
            .map(|(s, _)| s)
    }
}

/// Box ids by position
struct BoxGrid(Vec2d<Option<BoxId>>);

impl BoxGrid {
    fn new(map: &PuzzleMap, state: &State) -> Self {
        let mut grid = map.grid.scratchpad();
        for b in state.boxes() {
            grid[b.pos] = Some(b.id);
        }
        BoxGrid(grid)
    }

    fn get(&self, pos: Pos) -> Option<BoxId> {
        self.0.get(pos).cloned().and_then(|id| id)
    }

    fn blocked(&self, map: &PuzzleMap, pos: Pos) -> bool {
        map.is_wall(pos) || self.get(pos).is_some()
    }

    /// Checks whether pushing box `id` from `from` to `to` is allowed.
    fn can_push(
        &mut self,
        map: &PuzzleMap,
        dead_squares: &DeadSquares,
        id: BoxId,
        from: Pos,
        to: Pos,
    ) -> bool {
        if self.blocked(map, to) {
            return false;
        }
        if dead_squares.contains(to) && !map.is_goal(to) {
            return false;
        }

        // look at the grid as it would be after the push
        self.0[from] = None;
        self.0[to] = Some(id);
        let deadlock = is_box_stuck(map, self, to) || forms_blocked_square(map, self, to);
        self.0[to] = None;
        self.0[from] = Some(id);

        !deadlock
    }
}

/// A box not on a goal with all four neighbors taken by walls or boxes.
///
/// Only looks at direct neighbors - boxes frozen by a chain of other frozen boxes are not detected.
fn is_box_stuck(map: &PuzzleMap, boxes: &BoxGrid, pos: Pos) -> bool {
    if map.is_goal(pos) {
        return false;
    }
    pos.neighbors().iter().all(|&n| boxes.blocked(map, n))
}

/// Checks every 2x2 square that has `pos` as a corner.
/// A square made only of walls and boxes with no goal in it can never be broken up.
fn forms_blocked_square(map: &PuzzleMap, boxes: &BoxGrid, pos: Pos) -> bool {
    for &vertical in &[Dir::Up, Dir::Down] {
        for &horizontal in &[Dir::Left, Dir::Right] {
            let square = [
                pos,
                pos + vertical,
                pos + horizontal,
                pos + vertical + horizontal,
            ];
            let all_blocked = square.iter().all(|&p| boxes.blocked(map, p));
            let any_goal = square.iter().any(|&p| map.is_goal(p));
            if all_blocked && !any_goal {
                return true;
            }
        }
    }
    false
}

pub(crate) fn expand_move(map: &PuzzleMap, dead_squares: &DeadSquares, state: &State) -> Vec<(State, Move)> {
    let mut new_states = Vec::new();
    let mut box_grid = BoxGrid::new(map, state);

    for &dir in &DIRECTIONS {
        let new_player_pos = state.player_pos + dir;
        if map.is_wall(new_player_pos) {
            continue;
        }

        match box_grid.get(new_player_pos) {
            None => {
                // step
                new_states.push((state.with_player(new_player_pos), Move::step(dir)));
            }
            Some(id) => {
                let push_dest = new_player_pos + dir;
                if box_grid.can_push(map, dead_squares, id, new_player_pos, push_dest) {
                    new_states.push((
                        state.with_push(new_player_pos, id, push_dest),
                        Move::push(dir, id),
                    ));
                }
            }
        }
    }

    new_states
}

pub(crate) fn expand_push(map: &PuzzleMap, dead_squares: &DeadSquares, state: &State) -> Vec<(State, Move)> {
    let mut new_states = Vec::new();
    let mut box_grid = BoxGrid::new(map, state);
    let reachable = reachable(map, &box_grid, state.player_pos);

    for b in state.boxes() {
        for &dir in &DIRECTIONS {
            let player_pos = b.pos - dir;
            if !reachable.get(player_pos).cloned().unwrap_or(false) {
                continue;
            }

            let push_dest = b.pos + dir;
            if box_grid.can_push(map, dead_squares, b.id, b.pos, push_dest) {
                new_states.push((state.with_push(b.pos, b.id, push_dest), Move::push(dir, b.id)));
            }
        }
    }

    new_states
}

/// Cells the player can walk to without pushing anything
fn reachable(map: &PuzzleMap, boxes: &BoxGrid, player_pos: Pos) -> Vec2d<bool> {
    let mut reachable = map.grid.scratchpad();
    reachable[player_pos] = true;
    let mut to_visit = vec![player_pos];

    while let Some(cur) = to_visit.pop() {
        for &next in &cur.neighbors() {
            if !boxes.blocked(map, next) && !reachable[next] {
                reachable[next] = true;
                to_visit.push(next);
            }
        }
    }

    reachable
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::state::PlacedBox;

    fn expand(level: &str, model: Model) -> (PuzzleMap, DeadSquares, Vec<(State, Move)>) {
        let map: PuzzleMap = level.parse().unwrap();
        let dead_squares = DeadSquares::compute(&map);
        let neighbors = model.expand(&map, &dead_squares, &map.initial_state());
        (map, dead_squares, neighbors)
    }

    fn moves(neighbors: &[(State, Move)]) -> Vec<Move> {
        neighbors.iter().map(|&(_, m)| m).collect()
    }

    #[test]
    fn move_order() {
        let level = r"
#####
#   #
# @ #
#   #
#####";
        let (_, _, neighbors) = expand(level, Model::Move);
        assert_eq!(
            moves(&neighbors),
            vec![
                Move::step(Dir::Up),
                Move::step(Dir::Down),
                Move::step(Dir::Left),
                Move::step(Dir::Right),
            ]
        );
        assert_eq!(neighbors[0].0.player_pos, Pos::new(1, 2));
    }

    #[test]
    fn move_blocked_pushes() {
        // left: box against box, right: box against wall, down: push onto goal
        let level = r"
 ######
##    #
#$$@$##
#  $  #
#  .  #
#######";
        let (_, _, neighbors) = expand(level, Model::Move);
        assert_eq!(moves(&neighbors), vec![Move::step(Dir::Up), Move::push(Dir::Down, 3)]);
        let (pushed, _) = &neighbors[1];
        assert_eq!(pushed.player_pos, Pos::new(3, 3));
        assert_eq!(pushed.boxes()[3], PlacedBox::new(3, Pos::new(4, 3)));
    }

    #[test]
    fn move_no_push_into_dead_square() {
        let level = r"
######
#    #
#@$  #
#   .#
######";
        let (_, dead_squares, neighbors) = expand(level, Model::Move);
        assert!(!dead_squares.contains(Pos::new(2, 3)));
        assert_eq!(
            moves(&neighbors),
            vec![
                Move::step(Dir::Up),
                Move::step(Dir::Down),
                Move::push(Dir::Right, 0),
            ]
        );

        // [1, 3] is a corner
        let level = r"
#####
#@$ #
#   #
#  .#
#####";
        let (_, dead_squares, neighbors) = expand(level, Model::Move);
        assert!(dead_squares.contains(Pos::new(1, 3)));
        assert_eq!(moves(&neighbors), vec![Move::step(Dir::Down)]);

        let level = r"
#####
#   #
# .$#
#  @#
#####";
        let (_, _, neighbors) = expand(level, Model::Move);
        assert!(!neighbors.iter().any(|(_, m)| m.is_push()));
    }

    #[test]
    fn stuck_box() {
        let level = r"
#####
##$##
#$ $#
## ##
# @ #
#####";
        let map: PuzzleMap = level.parse().unwrap();
        let state = State::new(
            Pos::new(3, 2),
            vec![
                PlacedBox::new(0, Pos::new(1, 2)),
                PlacedBox::new(1, Pos::new(2, 1)),
                PlacedBox::new(2, Pos::new(2, 3)),
                PlacedBox::new(3, Pos::new(2, 2)),
            ],
        );
        let boxes = BoxGrid::new(&map, &state);
        // the player is not an obstacle
        assert!(!is_box_stuck(&map, &boxes, Pos::new(2, 2)));
        // three walls and box 3
        assert!(is_box_stuck(&map, &boxes, Pos::new(2, 1)));
        assert!(is_box_stuck(&map, &boxes, Pos::new(2, 3)));
    }

    #[test]
    fn stuck_box_on_goal() {
        let level = r"
#####
#####
#*$ #
## ##
# @ #
#####";
        let map: PuzzleMap = level.parse().unwrap();
        let state = map.initial_state();
        let boxes = BoxGrid::new(&map, &state);
        assert!(!is_box_stuck(&map, &boxes, Pos::new(2, 1)));
    }

    #[test]
    fn blocked_square_rejected() {
        let level = r"
######
#    #
# $$ #
#  @ #
#   .#
#   .#
######";
        let map: PuzzleMap = level.parse().unwrap();
        let dead_squares = DeadSquares::compute(&map);
        let state = map.initial_state();

        let neighbors = expand_move(&map, &dead_squares, &state);
        assert!(neighbors.iter().any(|(_, m)| *m == Move::push(Dir::Up, 1)));

        // with box 0 already against the wall, pushing box 1 up closes a 2x2 block
        let state = state.with_push(Pos::new(3, 3), 0, Pos::new(1, 2));
        let neighbors = expand_move(&map, &dead_squares, &state);
        assert!(!neighbors.iter().any(|(_, m)| *m == Move::push(Dir::Up, 1)));
        assert!(forms_blocked_square(
            &map,
            &BoxGrid::new(&map, &state.with_push(Pos::new(2, 3), 1, Pos::new(1, 3))),
            Pos::new(1, 3)
        ));
    }

    #[test]
    fn push_model() {
        let level = r"
#######
#     #
# $   #
#  @ .#
#     #
#######";
        let (_, _, neighbors) = expand(level, Model::Push);
        assert_eq!(
            moves(&neighbors),
            vec![
                Move::push(Dir::Up, 0),
                Move::push(Dir::Down, 0),
                Move::push(Dir::Left, 0),
                Move::push(Dir::Right, 0),
            ]
        );
        for (state, mov) in &neighbors {
            assert_eq!(state.player_pos, Pos::new(2, 2));
            assert_eq!(state.boxes()[0].pos, Pos::new(2, 2) + mov.dir);
        }
    }

    #[test]
    fn push_model_unreachable_side() {
        // the player can't get below the box
        let level = r"
#######
#@    #
###$###
#   . #
#######";
        let (_, _, neighbors) = expand(level, Model::Push);
        assert_eq!(moves(&neighbors), vec![Move::push(Dir::Down, 0)]);
    }

    #[test]
    fn push_model_respects_dead_squares() {
        let level = r"
######
#@$  #
#    #
#   .#
######";
        let (map, dead_squares, neighbors) = expand(level, Model::Push);
        assert!(dead_squares.contains(Pos::new(1, 1)));
        // left would be the corner, up is into the wall and down needs the player inside it
        assert_eq!(moves(&neighbors), vec![Move::push(Dir::Right, 0)]);
        for (state, _) in &neighbors {
            for b in state.box_positions() {
                assert!(!dead_squares.contains(b) || map.is_goal(b));
            }
        }
    }

    #[test]
    fn applying_moves() {
        let level = r"
#####
#@$.#
#####";
        let map: PuzzleMap = level.parse().unwrap();
        let dead_squares = DeadSquares::compute(&map);
        let state = map.initial_state();
        for &model in &[Model::Move, Model::Push] {
            let next = model
                .apply(&map, &dead_squares, &state, Move::push(Dir::Right, 0))
                .unwrap();
            assert!(map.is_solved(&next));
            assert_eq!(
                model.apply(&map, &dead_squares, &state, Move::push(Dir::Left, 0)),
                None
            );
        }
        assert_eq!(
            Model::Move.apply(&map, &dead_squares, &state, Move::step(Dir::Up)),
            None
        );
    }
}
