//! Grid coordinates and movement directions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Dimensions of an island grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    /// Number of rows.
    pub rows: u16,
    /// Number of columns.
    pub columns: u16,
}

impl Bounds {
    /// Create bounds for a `rows` x `columns` grid.
    #[must_use]
    pub const fn new(rows: u16, columns: u16) -> Self {
        Self { rows, columns }
    }

    /// Total number of tiles.
    #[must_use]
    pub const fn area(self) -> usize {
        self.rows as usize * self.columns as usize
    }
}

/// One of the four compass directions a player can move in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveDirection {
    /// Up one row.
    North,
    /// Down one row.
    South,
    /// Right one column.
    East,
    /// Left one column.
    West,
}

impl MoveDirection {
    /// All directions, in the order the lose check tries them.
    pub const ALL: [MoveDirection; 4] = [
        MoveDirection::North,
        MoveDirection::South,
        MoveDirection::East,
        MoveDirection::West,
    ];

    /// Row and column offset for one step.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            MoveDirection::North => (-1, 0),
            MoveDirection::South => (1, 0),
            MoveDirection::East => (0, 1),
            MoveDirection::West => (0, -1),
        }
    }
}

impl fmt::Display for MoveDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveDirection::North => "north",
            MoveDirection::South => "south",
            MoveDirection::East => "east",
            MoveDirection::West => "west",
        };
        f.write_str(name)
    }
}

/// A grid coordinate bound to the dimensions of a specific island.
///
/// Positions are immutable. A position may lie off the island (for example
/// the neighbour of an edge tile); check [`Position::is_on_island`] before
/// using one to index the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    row: i32,
    column: i32,
    bounds: Bounds,
}

impl Position {
    /// Create a position on an island with the given bounds.
    #[must_use]
    pub const fn new(bounds: Bounds, row: i32, column: i32) -> Self {
        Self {
            row,
            column,
            bounds,
        }
    }

    /// Row index (may be negative for off-island candidates).
    #[must_use]
    pub const fn row(self) -> i32 {
        self.row
    }

    /// Column index (may be negative for off-island candidates).
    #[must_use]
    pub const fn column(self) -> i32 {
        self.column
    }

    /// Dimensions of the island this position belongs to.
    #[must_use]
    pub const fn bounds(self) -> Bounds {
        self.bounds
    }

    /// Check whether this position lies inside the island grid.
    #[must_use]
    pub const fn is_on_island(self) -> bool {
        self.row >= 0
            && self.column >= 0
            && self.row < self.bounds.rows as i32
            && self.column < self.bounds.columns as i32
    }

    /// The candidate position one step away in `direction`.
    ///
    /// Bounds are not checked.
    #[must_use]
    pub const fn neighbor(self, direction: MoveDirection) -> Self {
        let (d_row, d_column) = direction.offset();
        Self {
            row: self.row + d_row,
            column: self.column + d_column,
            bounds: self.bounds,
        }
    }

    /// Row-major index into a grid of these bounds, if on the island.
    #[must_use]
    pub fn index(self) -> Option<usize> {
        if !self.is_on_island() {
            return None;
        }
        let row = usize::try_from(self.row).ok()?;
        let column = usize::try_from(self.column).ok()?;
        Some(row * usize::from(self.bounds.columns) + column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}
