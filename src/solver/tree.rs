use typed_arena::Arena;

use crate::moves::{Move, Moves};
use crate::state::State;

pub(crate) type NodeId = usize;

#[derive(Debug)]
struct Node<'a> {
    state: &'a State,
    parent: Option<NodeId>,
    mov: Option<Move>,
    cost: u32,
}

/// Every node discovered by one search call.
///
/// States live in the arena, nodes refer to their parent by index
/// so the path is recovered by walking indices back to the root.
pub(crate) struct SearchTree<'a> {
    arena: &'a Arena<State>,
    nodes: Vec<Node<'a>>,
}

impl<'a> SearchTree<'a> {
    pub(crate) fn new(arena: &'a Arena<State>) -> Self {
        SearchTree {
            arena,
            nodes: Vec::new(),
        }
    }

    pub(crate) fn add_root(&mut self, state: State) -> NodeId {
        debug_assert!(self.nodes.is_empty());
        self.add(state, None, None, 0)
    }

    pub(crate) fn add_child(&mut self, parent: NodeId, state: State, mov: Move) -> NodeId {
        let cost = self.nodes[parent].cost + 1;
        self.add(state, Some(parent), Some(mov), cost)
    }

    fn add(&mut self, state: State, parent: Option<NodeId>, mov: Option<Move>, cost: u32) -> NodeId {
        let state: &'a State = self.arena.alloc(state);
        self.nodes.push(Node {
            state,
            parent,
            mov,
            cost,
        });
        self.nodes.len() - 1
    }

    pub(crate) fn state(&self, id: NodeId) -> &'a State {
        self.nodes[id].state
    }

    pub(crate) fn cost(&self, id: NodeId) -> u32 {
        self.nodes[id].cost
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn backtrack_path(&self, id: NodeId) -> Moves {
        let mut moves = Vec::new();
        let mut cur = id;
        while let Some(parent) = self.nodes[cur].parent {
            if let Some(mov) = self.nodes[cur].mov {
                moves.push(mov);
            }
            cur = parent;
        }
        moves.reverse();
        Moves::new(moves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::data::{Dir, Pos};
    use crate::state::PlacedBox;

    #[test]
    fn path_from_root() {
        let arena = Arena::new();
        let mut tree = SearchTree::new(&arena);

        let boxes = vec![PlacedBox::new(0, Pos::new(2, 2))];
        let root = tree.add_root(State::new(Pos::new(1, 1), boxes.clone()));
        let a = tree.add_child(root, State::new(Pos::new(1, 2), boxes.clone()), Move::step(Dir::Right));
        let _sibling = tree.add_child(root, State::new(Pos::new(2, 1), boxes), Move::step(Dir::Down));
        let b = tree.add_child(
            a,
            State::new(Pos::new(2, 2), vec![PlacedBox::new(0, Pos::new(3, 2))]),
            Move::push(Dir::Down, 0),
        );

        assert_eq!(tree.len(), 4);
        assert_eq!(tree.cost(root), 0);
        assert_eq!(tree.cost(b), 2);
        assert_eq!(tree.state(b).player_pos, Pos::new(2, 2));
        assert_eq!(tree.backtrack_path(root), Moves::default());
        assert_eq!(tree.backtrack_path(b).to_string(), "rD");
    }
}
