use crate::data::Pos;

pub type BoxId = u16;

/// A box keeps its id for the whole search, only the position changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlacedBox {
    pub id: BoxId,
    pub pos: Pos,
}

impl PlacedBox {
    pub fn new(id: BoxId, pos: Pos) -> Self {
        PlacedBox { id, pos }
    }
}

/// Equality and hashing go over the player and the id -> position mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct State {
    pub player_pos: Pos,
    boxes: Vec<PlacedBox>,
}

impl State {
    pub fn new(player_pos: Pos, mut boxes: Vec<PlacedBox>) -> State {
        // sorted by id so equal mappings compare and hash equal
        boxes.sort_unstable_by_key(|b| b.id);
        State { player_pos, boxes }
    }

    pub fn boxes(&self) -> &[PlacedBox] {
        &self.boxes
    }

    pub fn box_positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.boxes.iter().map(|b| b.pos)
    }

    pub fn box_at(&self, pos: Pos) -> Option<PlacedBox> {
        self.boxes.iter().cloned().find(|b| b.pos == pos)
    }

    /// Same state except box `id` is at `pos` and the player at `player_pos`.
    pub(crate) fn with_push(&self, player_pos: Pos, id: BoxId, pos: Pos) -> State {
        let boxes = self
            .boxes
            .iter()
            .map(|&b| if b.id == id { PlacedBox::new(id, pos) } else { b })
            .collect();
        // order by id is preserved
        State { player_pos, boxes }
    }

    pub(crate) fn with_player(&self, player_pos: Pos) -> State {
        State {
            player_pos,
            boxes: self.boxes.clone(),
        }
    }
}
