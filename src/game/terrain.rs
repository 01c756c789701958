//! Terrain kinds and their movement costs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Type of terrain on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    /// Open sand - cheapest to cross.
    Sand,
    /// Native forest.
    Forest,
    /// Swamp and wetland.
    Wetland,
    /// Dense scrub.
    Scrub,
    /// Open water - cannot be entered on foot.
    Water,
}

impl Terrain {
    /// Every terrain kind.
    pub const ALL: [Terrain; 5] = [
        Terrain::Sand,
        Terrain::Forest,
        Terrain::Wetland,
        Terrain::Scrub,
        Terrain::Water,
    ];

    /// Stamina deducted for entering a tile of this kind.
    #[must_use]
    pub const fn stamina_cost(self) -> f64 {
        match self {
            Terrain::Sand => 1.0,
            Terrain::Forest => 2.0,
            Terrain::Wetland => 2.5,
            Terrain::Scrub => 3.0,
            Terrain::Water => 4.0,
        }
    }

    /// Check if a player may walk onto this terrain at all.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Terrain::Water)
    }

    /// Map symbol used by level files and the text renderer.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Terrain::Sand => '.',
            Terrain::Forest => '*',
            Terrain::Wetland => '#',
            Terrain::Scrub => '^',
            Terrain::Water => '~',
        }
    }

    /// Parse a map symbol.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.symbol() == symbol)
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Terrain::Sand => "sand",
            Terrain::Forest => "forest",
            Terrain::Wetland => "wetland",
            Terrain::Scrub => "scrub",
            Terrain::Water => "water",
        };
        f.write_str(name)
    }
}
