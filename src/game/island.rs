//! The island grid: terrain, exploration state, and occupants.

use crate::game::{
    Bounds, Location, MoveDirection, Occupant, OccupantArena, OccupantId, OccupantKind, Position,
    Terrain,
};

/// Default number of occupants a single tile can hold.
pub const DEFAULT_MAX_OCCUPANTS: usize = 3;

/// Largest per-tile capacity an island accepts.
pub const MAX_OCCUPANTS_LIMIT: usize = 32;

/// A single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// Terrain kind, fixed once the level is loaded.
    pub terrain: Terrain,
    /// Whether the player can currently see this tile.
    pub visible: bool,
    /// Whether the player has stood on this tile.
    pub explored: bool,
}

impl Tile {
    /// Create an unexplored, unseen tile.
    #[must_use]
    pub const fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            visible: false,
            explored: false,
        }
    }
}

/// The island map and everything on it.
#[derive(Debug, Clone)]
pub struct Island {
    bounds: Bounds,
    /// Tiles stored in row-major order.
    tiles: Vec<Tile>,
    occupants: OccupantArena,
    max_occupants: usize,
    player_position: Option<Position>,
}

impl Island {
    /// Create an island filled with sand.
    ///
    /// Returns `None` if either dimension is zero.
    #[must_use]
    pub fn new(rows: u16, columns: u16) -> Option<Self> {
        Self::with_capacity(rows, columns, DEFAULT_MAX_OCCUPANTS)
    }

    /// Create an island whose tiles hold at most `max_occupants` each.
    ///
    /// Returns `None` if either dimension is zero or `max_occupants` is not
    /// in `1..=MAX_OCCUPANTS_LIMIT`.
    #[must_use]
    pub fn with_capacity(rows: u16, columns: u16, max_occupants: usize) -> Option<Self> {
        if rows == 0 || columns == 0 || !(1..=MAX_OCCUPANTS_LIMIT).contains(&max_occupants) {
            return None;
        }
        let bounds = Bounds::new(rows, columns);
        Some(Self {
            bounds,
            tiles: vec![Tile::new(Terrain::Sand); bounds.area()],
            occupants: OccupantArena::new(),
            max_occupants,
            player_position: None,
        })
    }

    /// Grid dimensions.
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of rows.
    #[must_use]
    pub const fn num_rows(&self) -> u16 {
        self.bounds.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn num_columns(&self) -> u16 {
        self.bounds.columns
    }

    /// Maximum occupants per tile.
    #[must_use]
    pub const fn max_occupants(&self) -> usize {
        self.max_occupants
    }

    /// A position on this island (not bounds-checked).
    #[must_use]
    pub const fn position(&self, row: i32, column: i32) -> Position {
        Position::new(self.bounds, row, column)
    }

    /// Tile at `pos`, if on the island.
    #[must_use]
    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        self.index(pos).map(|idx| &self.tiles[idx])
    }

    /// Iterate over all positions and tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (Position, &Tile)> {
        let columns = usize::from(self.bounds.columns);
        let bounds = self.bounds;
        self.tiles.iter().enumerate().map(move |(idx, tile)| {
            let row = i32::try_from(idx / columns).unwrap_or(i32::MAX);
            let column = i32::try_from(idx % columns).unwrap_or(i32::MAX);
            (Position::new(bounds, row, column), tile)
        })
    }

    /// Terrain at `pos`.
    #[must_use]
    pub fn terrain_at(&self, pos: Position) -> Option<Terrain> {
        self.tile(pos).map(|tile| tile.terrain)
    }

    /// Set the terrain at `pos`. Only meant for level setup.
    ///
    /// Returns `false` if `pos` is off the island.
    pub fn set_terrain(&mut self, pos: Position, terrain: Terrain) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.tiles[idx].terrain = terrain;
                true
            }
            None => false,
        }
    }

    /// Whether the player can see `pos`.
    #[must_use]
    pub fn is_visible(&self, pos: Position) -> bool {
        self.tile(pos).is_some_and(|tile| tile.visible)
    }

    /// Whether the player has visited `pos`.
    #[must_use]
    pub fn is_explored(&self, pos: Position) -> bool {
        self.tile(pos).is_some_and(|tile| tile.explored)
    }

    /// The occupant arena.
    #[must_use]
    pub const fn occupants(&self) -> &OccupantArena {
        &self.occupants
    }

    /// The occupant arena, mutably.
    #[must_use]
    pub fn occupants_mut(&mut self) -> &mut OccupantArena {
        &mut self.occupants
    }

    /// Look up a single occupant.
    #[must_use]
    pub fn occupant(&self, id: OccupantId) -> Option<&Occupant> {
        self.occupants.get(id)
    }

    /// Occupants on the tile at `pos`, in level-file order.
    pub fn occupants_at(&self, pos: Position) -> impl Iterator<Item = &Occupant> {
        self.occupants.at(Location::Tile(pos))
    }

    /// Check if `id` is on the tile at `pos`.
    #[must_use]
    pub fn has_occupant(&self, pos: Position, id: OccupantId) -> bool {
        self.occupants
            .get(id)
            .is_some_and(|occupant| occupant.location() == Location::Tile(pos))
    }

    /// Number of occupants on the tile at `pos`.
    #[must_use]
    pub fn occupant_count(&self, pos: Position) -> usize {
        self.occupants_at(pos).count()
    }

    /// Put an existing occupant on the tile at `pos`.
    ///
    /// Fails if `pos` is off the island, the tile is full, or `id` is unknown.
    pub fn add_occupant(&mut self, pos: Position, id: OccupantId) -> bool {
        if self.index(pos).is_none() || self.occupants.get(id).is_none() {
            return false;
        }
        if self.has_occupant(pos, id) {
            return true;
        }
        if self.occupant_count(pos) >= self.max_occupants {
            return false;
        }
        self.occupants.relocate(id, Location::Tile(pos))
    }

    /// Check if the tile at `pos` has room for one more occupant.
    #[must_use]
    pub fn has_room(&self, pos: Position) -> bool {
        self.index(pos).is_some() && self.occupant_count(pos) < self.max_occupants
    }

    /// Create a new occupant directly on the tile at `pos`.
    ///
    /// Returns `None` if `pos` is off the island or the tile is full.
    pub fn spawn(
        &mut self,
        pos: Position,
        name: impl Into<String>,
        description: impl Into<String>,
        kind: OccupantKind,
    ) -> Option<OccupantId> {
        if !self.has_room(pos) {
            return None;
        }
        let id = self.occupants.insert(name, description, kind)?;
        self.occupants.relocate(id, Location::Tile(pos));
        Some(id)
    }

    /// Take an occupant off the tile at `pos`, leaving it out of play.
    ///
    /// No-op (returns `false`) if it is not there.
    pub fn remove_occupant(&mut self, pos: Position, id: OccupantId) -> bool {
        if !self.has_occupant(pos, id) {
            return false;
        }
        self.occupants.relocate(id, Location::Removed)
    }

    /// Check if a predator is on the tile at `pos`.
    #[must_use]
    pub fn has_predator(&self, pos: Position) -> bool {
        self.predator_at(pos).is_some()
    }

    /// First predator on the tile at `pos`.
    #[must_use]
    pub fn predator_at(&self, pos: Position) -> Option<OccupantId> {
        self.occupants_at(pos)
            .find(|occupant| occupant.is_predator())
            .map(Occupant::id)
    }

    /// Symbols of every occupant on the tile, e.g. `"KP"`.
    #[must_use]
    pub fn occupant_string_representation(&self, pos: Position) -> String {
        self.occupants_at(pos).map(Occupant::symbol).collect()
    }

    /// Record the player's new position and reveal the surroundings.
    ///
    /// The player's tile becomes explored and visible; its four neighbours
    /// become visible.
    pub fn update_player_position(&mut self, pos: Position) {
        self.player_position = Some(pos);
        if let Some(idx) = self.index(pos) {
            self.tiles[idx].explored = true;
            self.tiles[idx].visible = true;
        }
        for direction in MoveDirection::ALL {
            if let Some(idx) = self.index(pos.neighbor(direction)) {
                self.tiles[idx].visible = true;
            }
        }
    }

    /// Tracked player position.
    #[must_use]
    pub const fn player_position(&self) -> Option<Position> {
        self.player_position
    }

    /// Check if the player is at `pos`.
    #[must_use]
    pub fn has_player(&self, pos: Position) -> bool {
        self.player_position == Some(pos)
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if pos.bounds() != self.bounds {
            return None;
        }
        pos.index()
    }
}
