use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{Dir, Pos};
use crate::map::PuzzleMap;
use crate::vec2d::Vec2d;

/// Floor cells a box can never leave towards a goal once pushed there.
///
/// Only simple local patterns are detected (dead end corridors and corners),
/// everything else is left to the freeze checks during expansion.
#[derive(Clone, PartialEq, Eq)]
pub struct DeadSquares(Vec2d<bool>);

impl DeadSquares {
    #[inline(never)] // this is called only once per map and this way it's easier to see in callgrind
    pub fn compute(map: &PuzzleMap) -> Self {
        let mut dead = map.grid.scratchpad();

        for pos in map.floors() {
            if map.is_goal(pos) {
                continue;
            }

            let open_neighbors = pos
                .neighbors()
                .iter()
                .filter(|&&n| !map.is_wall(n))
                .count();
            let dead_end = open_neighbors == 1;

            let vertical = map.is_wall(pos + Dir::Up) || map.is_wall(pos + Dir::Down);
            let horizontal = map.is_wall(pos + Dir::Left) || map.is_wall(pos + Dir::Right);
            let goal_nearby = pos.neighbors().iter().any(|&n| map.is_goal(n));
            let corner = vertical && horizontal && !goal_nearby;

            if dead_end || corner {
                dead[pos] = true;
            }
        }

        DeadSquares(dead)
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.0.get(pos).cloned().unwrap_or(false)
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.0.positions().filter(move |&pos| self.0[pos])
    }

    pub fn len(&self) -> usize {
        self.positions().count()
    }

    pub fn is_empty(&self) -> bool {
        self.positions().next().is_none()
    }
}

impl Display for DeadSquares {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Debug for DeadSquares {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dead_squares(level: &str) -> DeadSquares {
        let map: PuzzleMap = level.parse().unwrap();
        DeadSquares::compute(&map)
    }

    #[test]
    fn corners_of_a_room() {
        let level = r"
#####
#@  #
# $ #
#  .#
#####";
        let expected = r"
00000
01010
00000
01000
00000
"
        .trim_start_matches('\n');
        let dead = dead_squares(level);
        assert_eq!(dead.to_string(), expected);
        assert_eq!(dead.len(), 3);
        assert!(dead.contains(Pos::new(1, 1)));
        assert!(!dead.contains(Pos::new(3, 3)));
    }

    #[test]
    fn corner_next_to_goal_is_kept() {
        // [1, 1] is a corner but [1, 2] is a goal
        let level = r"
#####
#@.$#
#   #
#####";
        let expected = r"
00000
00000
01010
00000
"
        .trim_start_matches('\n');
        assert_eq!(dead_squares(level).to_string(), expected);
    }

    #[test]
    fn dead_end_corridor() {
        let level = r"
#######
###@###
# $   #
### ###
### ###
#######";
        let dead = dead_squares(level);
        // bottom of the corridor
        assert!(dead.contains(Pos::new(4, 3)));
        // ends of the horizontal corridor are both corners and dead ends
        assert!(dead.contains(Pos::new(2, 1)));
        assert!(dead.contains(Pos::new(2, 5)));
        // top of the corridor the player is in
        assert!(dead.contains(Pos::new(1, 3)));
        assert!(!dead.contains(Pos::new(2, 3)));
        assert!(!dead.contains(Pos::new(3, 3)));
        assert!(!dead.contains(Pos::new(2, 2)));
    }

    #[test]
    fn goals_are_never_dead() {
        let level = r"
#####
#.  #
#@$ #
#####";
        let dead = dead_squares(level);
        assert!(!dead.contains(Pos::new(1, 1)));
        assert!(dead.contains(Pos::new(1, 3)));
        assert!(dead.contains(Pos::new(2, 3)));
        // corner but next to the goal
        assert!(!dead.contains(Pos::new(2, 1)));
    }

    #[test]
    fn outside_is_not_dead() {
        let dead = dead_squares("@");
        assert!(!dead.contains(Pos::new(-1, -1)));
        assert!(!dead.contains(Pos::new(5, 5)));
    }
}
