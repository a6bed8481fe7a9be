use crate::config::Heuristic;
use crate::data::Pos;
use crate::state::State;

impl Heuristic {
    /// Estimated remaining cost, less is better.
    ///
    /// Always 0 for a map without goals.
    pub fn evaluate(self, state: &State, goals: &[Pos]) -> u32 {
        if goals.is_empty() {
            return 0;
        }
        match self {
            Heuristic::Manhattan => manhattan(state, goals),
            Heuristic::BoxesOut => boxes_out(state, goals),
            Heuristic::PlayerBox => player_box(state, goals),
            Heuristic::Assignment => assignment(state, goals),
        }
    }
}

fn closest_goal_dist(pos: Pos, goals: &[Pos]) -> u32 {
    goals.iter().map(|&goal| pos.dist(goal)).min().unwrap_or(0)
}

fn manhattan(state: &State, goals: &[Pos]) -> u32 {
    state
        .box_positions()
        .map(|box_pos| closest_goal_dist(box_pos, goals))
        .sum()
}

fn boxes_out(state: &State, goals: &[Pos]) -> u32 {
    // goals are sorted
    state
        .box_positions()
        .filter(|box_pos| goals.binary_search(box_pos).is_err())
        .count() as u32
}

fn player_box(state: &State, goals: &[Pos]) -> u32 {
    state
        .box_positions()
        .map(|box_pos| closest_goal_dist(box_pos, goals) + state.player_pos.dist(box_pos))
        .sum()
}

fn assignment(state: &State, goals: &[Pos]) -> u32 {
    let boxes: Vec<Pos> = state.box_positions().collect();
    // the matching needs at least as many columns as rows
    let cost = if boxes.len() <= goals.len() {
        cost_matrix(&boxes, goals)
    } else {
        cost_matrix(goals, &boxes)
    };
    min_cost_matching(&cost)
}

fn cost_matrix(rows: &[Pos], cols: &[Pos]) -> Vec<Vec<i64>> {
    rows.iter()
        .map(|&r| cols.iter().map(|&c| i64::from(r.dist(c))).collect())
        .collect()
}

/// Hungarian algorithm, O(rows^2 * cols).
/// Every row gets a distinct column, requires `rows <= cols`.
fn min_cost_matching(cost: &[Vec<i64>]) -> u32 {
    let n = cost.len();
    if n == 0 {
        return 0;
    }
    let m = cost[0].len();
    debug_assert!(n <= m);

    // 1-based with index 0 as a sentinel column
    let mut u = vec![0i64; n + 1];
    let mut v = vec![0i64; m + 1];
    let mut row_of_col = vec![0usize; m + 1];
    let mut way = vec![0usize; m + 1];

    for i in 1..=n {
        row_of_col[0] = i;
        let mut col = 0;
        let mut min_slack = vec![i64::max_value(); m + 1];
        let mut used = vec![false; m + 1];

        loop {
            used[col] = true;
            let row = row_of_col[col];
            let mut delta = i64::max_value();
            let mut next_col = 0;
            for j in 1..=m {
                if used[j] {
                    continue;
                }
                let slack = cost[row - 1][j - 1] - u[row] - v[j];
                if slack < min_slack[j] {
                    min_slack[j] = slack;
                    way[j] = col;
                }
                if min_slack[j] < delta {
                    delta = min_slack[j];
                    next_col = j;
                }
            }
            for j in 0..=m {
                if used[j] {
                    u[row_of_col[j]] += delta;
                    v[j] -= delta;
                } else {
                    min_slack[j] -= delta;
                }
            }
            col = next_col;
            if row_of_col[col] == 0 {
                break;
            }
        }

        // augment along the alternating path
        loop {
            let prev = way[col];
            row_of_col[col] = row_of_col[prev];
            col = prev;
            if col == 0 {
                break;
            }
        }
    }

    (1..=m)
        .filter(|&j| row_of_col[j] != 0)
        .map(|j| cost[row_of_col[j] - 1][j - 1])
        .sum::<i64>() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::map::PuzzleMap;

    fn evaluate_all(level: &str) -> Vec<u32> {
        let map: PuzzleMap = level.parse().unwrap();
        let state = map.initial_state();
        Heuristic::ALL
            .iter()
            .map(|h| h.evaluate(&state, map.goals()))
            .collect()
    }

    #[test]
    fn single_box() {
        let level = r"
#######
#@ $  #
#    .#
#######";
        // manhattan, boxes out, player box, assignment
        assert_eq!(evaluate_all(level), vec![3, 1, 5, 3]);
    }

    #[test]
    fn solved() {
        let level = r"
######
#@ **#
######";
        assert_eq!(evaluate_all(level), vec![0, 0, 5, 0]);
    }

    #[test]
    fn assignment_is_tighter() {
        // both boxes are closest to the left goal
        let level = r"
##########
#@.$$    #
#       .#
##########";
        let values = evaluate_all(level);
        assert_eq!(values[0], 1 + 2);
        assert_eq!(values[1], 2);
        assert_eq!(values[3], 1 + 5);
        assert!(values[3] >= values[0]);
    }

    #[test]
    fn no_goals() {
        assert_eq!(evaluate_all("#@$ #"), vec![0, 0, 0, 0]);
    }

    #[test]
    fn matching() {
        let cost = vec![vec![4, 1, 3], vec![2, 0, 5], vec![3, 2, 2]];
        assert_eq!(min_cost_matching(&cost), 5);

        // more columns than rows
        let cost = vec![vec![7, 1, 9], vec![8, 2, 10]];
        assert_eq!(min_cost_matching(&cost), 1 + 8);

        assert_eq!(min_cost_matching(&[]), 0);
    }

    #[test]
    fn more_boxes_than_goals() {
        let level = r"
#######
#@$ $.#
#######";
        let map: PuzzleMap = level.parse().unwrap();
        let state = map.initial_state();
        // only one box can be matched, the closer one
        assert_eq!(Heuristic::Assignment.evaluate(&state, map.goals()), 1);
    }
}
