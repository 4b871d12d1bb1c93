use serde::{Deserialize, Serialize};

use crate::*;

/// Opaque identity of a tile, unique within one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(u32);

impl TileId {
    pub const fn raw(self) -> u32 {
        self.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    id: TileId,
    value: TileValue,
}

impl Tile {
    pub const fn new(id: TileId, value: TileValue) -> Self {
        Self { id, value }
    }

    pub const fn id(self) -> TileId {
        self.id
    }

    pub const fn value(self) -> TileValue {
        self.value
    }
}

/// Hands out fresh tile identities.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TileIds {
    next: u32,
}

impl TileIds {
    /// Allocator whose first id comes after `last`.
    pub fn after(last: Option<TileId>) -> Self {
        Self {
            next: last.map_or(0, |id| id.0.wrapping_add(1)),
        }
    }

    pub fn next_id(&mut self) -> TileId {
        let id = TileId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Content of a single board position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Occupied { tile: Tile, selected: bool },
}

impl Cell {
    pub const fn occupied(tile: Tile) -> Self {
        Self::Occupied {
            tile,
            selected: false,
        }
    }

    pub const fn tile(self) -> Option<Tile> {
        match self {
            Self::Empty => None,
            Self::Occupied { tile, .. } => Some(tile),
        }
    }

    pub const fn is_occupied(self) -> bool {
        matches!(self, Self::Occupied { .. })
    }

    pub const fn is_selected(self) -> bool {
        matches!(self, Self::Occupied { selected: true, .. })
    }

    pub(crate) const fn toggled(self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Occupied { tile, selected } => Self::Occupied {
                tile,
                selected: !selected,
            },
        }
    }

    pub(crate) const fn deselected(self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Occupied { tile, .. } => Self::occupied(tile),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_empty_cell_keeps_it_empty() {
        assert_eq!(Cell::Empty.toggled(), Cell::Empty);
        assert!(!Cell::Empty.is_selected());
    }

    #[test]
    fn toggle_then_deselect_round_trips_selection_flag() {
        let mut ids = TileIds::default();
        let cell = Cell::occupied(Tile::new(ids.next_id(), 4));

        let selected = cell.toggled();

        assert!(selected.is_selected());
        assert_eq!(selected.deselected(), cell);
        assert_eq!(selected.tile().map(Tile::value), Some(4));
    }

    #[test]
    fn ids_after_continue_past_existing_ids() {
        let mut ids = TileIds::after(Some(TileId(41)));
        assert_eq!(ids.next_id().raw(), 42);
        assert_eq!(ids.next_id().raw(), 43);
        assert_eq!(TileIds::after(None).next_id().raw(), 0);
    }
}
