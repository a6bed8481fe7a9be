use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use fnv::{FnvHashMap, FnvHashSet};
use log::debug;
use typed_arena::Arena;

use crate::config::{Algorithm, ConfigErr, Heuristic, Model, SearchConfig};
use crate::map::PuzzleMap;
use crate::moves::{Move, Moves};
use crate::solver::dead_squares::DeadSquares;
use crate::solver::stats::Stats;
use crate::solver::tree::{NodeId, SearchTree};
use crate::state::State;

/// Moves and their cost in the chosen model
pub(crate) type Found = Option<(Moves, u32)>;

/// Read-only inputs shared by all the algorithms
pub(crate) struct Context<'a> {
    pub(crate) map: &'a PuzzleMap,
    pub(crate) dead_squares: &'a DeadSquares,
    pub(crate) model: Model,
}

impl Context<'_> {
    fn expand(&self, state: &State) -> Vec<(State, Move)> {
        self.model.expand(self.map, self.dead_squares, state)
    }
}

impl Algorithm {
    /// Runs the algorithm to completion.
    ///
    /// The informed algorithms use exactly the heuristic in `config`, there is no fallback.
    pub(crate) fn search(
        self,
        ctx: &Context<'_>,
        config: &SearchConfig,
    ) -> Result<(Found, Stats), ConfigErr> {
        let res = match (self, config.heuristic) {
            (Algorithm::Bfs, _) => uninformed(ctx, Fifo::default()),
            (Algorithm::Dfs, _) => uninformed(ctx, Lifo::default()),
            (Algorithm::Iddfs, _) => iddfs(ctx, config.max_depth),
            (Algorithm::AStar, Some(heuristic)) => best_first(ctx, heuristic, true),
            (Algorithm::Greedy, Some(heuristic)) => best_first(ctx, heuristic, false),
            (Algorithm::AStar, None) | (Algorithm::Greedy, None) => {
                return Err(ConfigErr::MissingHeuristic(self));
            }
        };
        Ok(res)
    }
}

trait Frontier {
    fn push(&mut self, node: NodeId);
    fn pop(&mut self) -> Option<NodeId>;
    fn len(&self) -> usize;
}

#[derive(Default)]
struct Fifo(VecDeque<NodeId>);

impl Frontier for Fifo {
    fn push(&mut self, node: NodeId) {
        self.0.push_back(node);
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.0.pop_front()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

#[derive(Default)]
struct Lifo(Vec<NodeId>);

impl Frontier for Lifo {
    fn push(&mut self, node: NodeId) {
        self.0.push(node);
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.0.pop()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// BFS with a queue, DFS with a stack.
///
/// States are deduplicated before insertion against both the explored set
/// and the states currently waiting in the frontier.
fn uninformed<F: Frontier>(ctx: &Context<'_>, mut frontier: F) -> (Found, Stats) {
    let arena = Arena::new();
    let mut tree = SearchTree::new(&arena);
    let mut stats = Stats::new();

    let root = tree.add_root(ctx.map.initial_state());
    stats.add_created();
    frontier.push(root);

    // mirrors the contents of the frontier
    let mut in_frontier: FnvHashSet<&State> = FnvHashSet::default();
    in_frontier.insert(tree.state(root));
    let mut explored: FnvHashSet<&State> = FnvHashSet::default();

    while let Some(cur) = frontier.pop() {
        let state = tree.state(cur);
        in_frontier.remove(state);

        if ctx.map.is_solved(state) {
            debug!("Solved with {} nodes in the tree, backtracking path", tree.len());
            return (Some((tree.backtrack_path(cur), tree.cost(cur))), stats);
        }

        explored.insert(state);
        stats.add_expanded();

        for (neighbor, mov) in ctx.expand(state) {
            if explored.contains(&neighbor) || in_frontier.contains(&neighbor) {
                stats.add_reached_duplicate();
                continue;
            }
            let next = tree.add_child(cur, neighbor, mov);
            stats.add_created();
            in_frontier.insert(tree.state(next));
            frontier.push(next);
            stats.update_frontier(frontier.len());
        }
    }

    (None, stats)
}

/// Depth limited DFS with limits 1, 2, ... up to `max_depth`.
///
/// Each round starts from scratch. A state reached again at a smaller depth
/// than the one it was expanded at is expanded again, otherwise a long detour
/// found first could hide a shorter path and the result wouldn't be optimal.
fn iddfs(ctx: &Context<'_>, max_depth: u32) -> (Found, Stats) {
    let mut stats = Stats::new();

    for limit in 1..=max_depth {
        stats.rounds += 1;
        debug!("Depth limit {}, expanded so far: {}", limit, stats.expanded);

        let arena = Arena::new();
        let mut tree = SearchTree::new(&arena);
        let root = tree.add_root(ctx.map.initial_state());
        stats.add_created();
        let mut frontier = vec![root];

        // shallowest depth each state was expanded at during this round
        let mut explored: FnvHashMap<&State, u32> = FnvHashMap::default();
        let mut hit_limit = false;

        while let Some(cur) = frontier.pop() {
            let state = tree.state(cur);
            let depth = tree.cost(cur);
            if let Some(&prev_depth) = explored.get(state) {
                if prev_depth <= depth {
                    stats.add_reached_duplicate();
                    continue;
                }
            }
            explored.insert(state, depth);

            if ctx.map.is_solved(state) {
                debug!("Solved in round {}, backtracking path", limit);
                return (Some((tree.backtrack_path(cur), depth)), stats);
            }

            if depth >= limit {
                hit_limit = true;
                continue;
            }
            stats.add_expanded();

            for (neighbor, mov) in ctx.expand(state) {
                if let Some(&prev_depth) = explored.get(&neighbor) {
                    if prev_depth <= depth + 1 {
                        continue;
                    }
                }
                let next = tree.add_child(cur, neighbor, mov);
                stats.add_created();
                frontier.push(next);
                stats.update_frontier(frontier.len());
            }
        }

        if !hit_limit {
            // deeper rounds would see exactly the same states
            debug!("Whole state space searched in round {}", limit);
            break;
        }
    }

    (None, stats)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct HeapEntry {
    priority: u64,
    // insertion order breaks ties so equal priorities are FIFO
    seq: u64,
    node: NodeId,
}

/// A* (priority g + h) or greedy (priority h only).
///
/// Duplicates are allowed into the heap and skipped when popped.
fn best_first(ctx: &Context<'_>, heuristic: Heuristic, use_cost: bool) -> (Found, Stats) {
    let arena = Arena::new();
    let mut tree = SearchTree::new(&arena);
    let mut stats = Stats::new();
    let goals = ctx.map.goals();

    let priority = |tree: &SearchTree<'_>, node: NodeId| {
        let h = u64::from(heuristic.evaluate(tree.state(node), goals));
        if use_cost {
            u64::from(tree.cost(node)) + h
        } else {
            h
        }
    };

    let root = tree.add_root(ctx.map.initial_state());
    stats.add_created();
    let mut seq = 0;
    let mut to_visit = BinaryHeap::new();
    to_visit.push(Reverse(HeapEntry {
        priority: priority(&tree, root),
        seq,
        node: root,
    }));

    let mut explored: FnvHashSet<&State> = FnvHashSet::default();

    while let Some(Reverse(entry)) = to_visit.pop() {
        let state = tree.state(entry.node);
        if !explored.insert(state) {
            stats.add_reached_duplicate();
            continue;
        }

        if ctx.map.is_solved(state) {
            debug!("Solved with {} nodes in the tree, backtracking path", tree.len());
            return (
                Some((tree.backtrack_path(entry.node), tree.cost(entry.node))),
                stats,
            );
        }
        stats.add_expanded();

        for (neighbor, mov) in ctx.expand(state) {
            if explored.contains(&neighbor) {
                continue;
            }
            let next = tree.add_child(entry.node, neighbor, mov);
            stats.add_created();
            seq += 1;
            to_visit.push(Reverse(HeapEntry {
                priority: priority(&tree, next),
                seq,
                node: next,
            }));
            stats.update_frontier(to_visit.len());
        }
    }

    (None, stats)
}
