use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::data::{MapCell, Pos};
use crate::map::PuzzleMap;
use crate::state::{BoxId, PlacedBox};
use crate::vec2d::Vec2d;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserErr {
    NoPlayer,
    MultiplePlayers(Pos, Pos),
    TooManyBoxes,
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::NoPlayer => write!(f, "No player"),
            ParserErr::MultiplePlayers(first, second) => {
                write!(f, "More than one player: {} and {}", first, second)
            }
            ParserErr::TooManyBoxes => write!(f, "More than {} boxes", BoxId::max_value()),
        }
    }
}

impl Error for ParserErr {}

impl FromStr for PuzzleMap {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parses the XSB format (`#` wall, `.` goal, `$` box, `@` player,
/// `*` box on goal, `+` player on goal). Everything else is floor.
///
/// Box ids are assigned in row-major order starting from 0.
pub(crate) fn parse(level: &str) -> Result<PuzzleMap, ParserErr> {
    // trim so we can specify levels using raw strings more easily
    let level = level.trim_matches('\n').trim_end();

    let mut grid = Vec::new();
    let mut goals = Vec::new();
    let mut boxes = Vec::new();
    let mut player_pos = None;

    for (r, line) in level.lines().enumerate() {
        let mut line_tiles = Vec::new();
        for (c, cur_char) in line.chars().enumerate() {
            let pos = Pos::new(r as i32, c as i32);

            let tile = match cur_char {
                '#' => MapCell::Wall,
                '@' => {
                    set_player(&mut player_pos, pos)?;
                    MapCell::Empty
                }
                '+' => {
                    set_player(&mut player_pos, pos)?;
                    goals.push(pos);
                    MapCell::Goal
                }
                '$' => {
                    add_box(&mut boxes, pos)?;
                    MapCell::Empty
                }
                '*' => {
                    add_box(&mut boxes, pos)?;
                    goals.push(pos);
                    MapCell::Goal
                }
                '.' => {
                    goals.push(pos);
                    MapCell::Goal
                }
                _ => MapCell::Empty,
            };
            line_tiles.push(tile);
        }
        grid.push(line_tiles);
    }

    let player_pos = player_pos.ok_or(ParserErr::NoPlayer)?;
    Ok(PuzzleMap::new(Vec2d::new(&grid), goals, player_pos, boxes))
}

fn set_player(player_pos: &mut Option<Pos>, pos: Pos) -> Result<(), ParserErr> {
    if let Some(first) = *player_pos {
        return Err(ParserErr::MultiplePlayers(first, pos));
    }
    *player_pos = Some(pos);
    Ok(())
}

fn add_box(boxes: &mut Vec<PlacedBox>, pos: Pos) -> Result<(), ParserErr> {
    if boxes.len() >= usize::from(BoxId::max_value()) {
        return Err(ParserErr::TooManyBoxes);
    }
    boxes.push(PlacedBox::new(boxes.len() as BoxId, pos));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fail_empty() {
        assert_failure("", ParserErr::NoPlayer);
    }

    #[test]
    fn fail_no_player() {
        let level = r"
#####
# $.#
#####
";
        assert_failure(level, ParserErr::NoPlayer);
    }

    #[test]
    fn fail_two_players() {
        let level = r"
######
#@$.+#
######
";
        assert_failure(
            level,
            ParserErr::MultiplePlayers(Pos::new(1, 1), Pos::new(1, 4)),
        );
    }

    #[test]
    fn unknown_chars_are_floor() {
        let level = r"
#####
#@X.#
#####
";
        let map = parse(level).unwrap();
        assert!(!map.is_wall(Pos::new(1, 2)));
        assert!(!map.is_goal(Pos::new(1, 2)));
        assert_eq!(map.to_string(), "#####\n#@ .#\n#####\n");
    }

    #[test]
    fn box_ids_row_major() {
        let level = r"
######
#@ $ #
#$  *#
######
";
        let map = parse(level).unwrap();
        assert_eq!(
            map.boxes_start(),
            &[
                PlacedBox::new(0, Pos::new(1, 3)),
                PlacedBox::new(1, Pos::new(2, 1)),
                PlacedBox::new(2, Pos::new(2, 4)),
            ]
        );
        assert_eq!(map.goals(), &[Pos::new(2, 4)]);
    }

    #[test]
    fn simplest() {
        assert_success(
            r"
#####
#@$.#
#####
",
        );
    }

    #[test]
    fn corner_boxes() {
        assert_success(
            r"
*###*
#@$.#
*###*
",
        );
    }

    #[test]
    fn original_1() {
        assert_success(
            r"
    #####
    #   #
    #$  #
  ###  $##
  #  $ $ #
### # ## #   ######
#   # ## #####  ..#
# $  $          ..#
##### ### #@##  ..#
    #     #########
    #######
",
        );
    }

    fn assert_failure(input_level: &str, expected_err: ParserErr) {
        assert_eq!(input_level.parse::<PuzzleMap>().unwrap_err(), expected_err);
    }

    fn assert_success(input_level: &str) {
        let map: PuzzleMap = input_level.parse().unwrap();
        assert_eq!(map.to_string(), input_level.trim_start_matches('\n'));
    }
}
