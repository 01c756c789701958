//! Error types for level loading.

use std::path::PathBuf;

use thiserror::Error;

/// Reasons a level cannot be turned into a game.
#[derive(Debug, Error)]
pub enum LevelError {
    /// The level file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The JSON level could not be decoded.
    #[error("invalid JSON level: {0}")]
    Json(#[from] serde_json::Error),

    /// The text level ended before `expected` was read.
    #[error("level ended early, expected {expected}")]
    UnexpectedEnd {
        /// What the parser was looking for.
        expected: &'static str,
    },

    /// A numeric field could not be parsed.
    #[error("invalid {field}: {value:?}")]
    InvalidNumber {
        /// Field being parsed.
        field: &'static str,
        /// Raw token.
        value: String,
    },

    /// A terrain row contains a symbol that is not a terrain.
    #[error("unknown terrain symbol {symbol:?} at row {row}, column {column}")]
    UnknownTerrain {
        /// Offending character.
        symbol: char,
        /// Row index.
        row: usize,
        /// Column index.
        column: usize,
    },

    /// An occupant record has an unknown type tag.
    #[error("unknown occupant type {0:?}")]
    UnknownOccupant(String),

    /// A terrain row has the wrong length, or there are too few rows.
    #[error("terrain row {row} has {found} columns, expected {expected}")]
    TerrainShape {
        /// Row index.
        row: usize,
        /// Columns expected.
        expected: usize,
        /// Columns found.
        found: usize,
    },

    /// The island has no tiles.
    #[error("island dimensions must be non-zero, got {rows}x{columns}")]
    EmptyIsland {
        /// Rows declared.
        rows: u16,
        /// Columns declared.
        columns: u16,
    },

    /// Something was placed outside the island.
    #[error("{what} at ({row}, {column}) is off the island")]
    OffIsland {
        /// Name of the misplaced entity.
        what: String,
        /// Row given.
        row: i32,
        /// Column given.
        column: i32,
    },

    /// More occupants were placed on a tile than it can hold.
    #[error("tile ({row}, {column}) is full, cannot place {name}")]
    TileFull {
        /// Occupant that did not fit.
        name: String,
        /// Row of the tile.
        row: i32,
        /// Column of the tile.
        column: i32,
    },

    /// The per-tile occupant limit is zero or too large.
    #[error("max occupants per tile must be between 1 and {max}, got {value}")]
    TileCapacity {
        /// Value given.
        value: usize,
        /// Largest accepted value.
        max: usize,
    },

    /// A level directory holds no level files.
    #[error("no level files in {path}")]
    NoLevels {
        /// Directory searched.
        path: PathBuf,
    },

    /// A numeric field is out of its allowed range.
    #[error("{field} out of range: {value}")]
    OutOfRange {
        /// Field being checked.
        field: &'static str,
        /// Value given.
        value: f64,
    },
}

/// Result type for level loading.
pub type LevelResult<T> = Result<T, LevelError>;
