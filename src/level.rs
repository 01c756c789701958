//! Level descriptions and the loader that turns them into a [`Game`].
//!
//! Two on-disk forms are supported: JSON (the serde form of [`Level`]) and
//! the comma-delimited text format used by the classic level files:
//!
//! ```text
//! rows, columns,
//! <terrain row 0>, <terrain row 1>, ...,
//! player name, row, column, max stamina, max weight, max size,
//! occupant count,
//! tag, name, description, row, column, <kind fields>, ...
//! ```
//!
//! Kind fields by tag: `T` weight, size; `E` weight, size, energy;
//! `H` impact; `K`, `P`, `F` none.

mod rotation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::GameConfig;
use crate::error::{LevelError, LevelResult};
use crate::game::{
    Game, Island, MAX_OCCUPANTS_LIMIT, OccupantKind, Player, PlayerSpec, Terrain, ToolKind,
};

pub use rotation::LevelRotation;

/// Where and how the player starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStart {
    /// Display name.
    pub name: String,
    /// Starting row.
    pub row: i32,
    /// Starting column.
    pub column: i32,
    /// Maximum and starting stamina.
    pub max_stamina: f64,
    /// Backpack weight limit.
    pub max_backpack_weight: f64,
    /// Backpack size limit.
    pub max_backpack_size: f64,
}

/// Kind-specific fields of an occupant record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OccupantSpecKind {
    /// `T`: a tool; its flavour comes from the name.
    Tool {
        /// Weight.
        weight: f64,
        /// Size.
        size: f64,
    },
    /// `E`: food.
    Food {
        /// Weight.
        weight: f64,
        /// Size.
        size: f64,
        /// Stamina restored when eaten.
        energy: f64,
    },
    /// `H`: a hazard.
    Hazard {
        /// Fraction of maximum stamina lost; 1.0 is fatal.
        impact: f64,
    },
    /// `K`: a kiwi.
    Kiwi,
    /// `P`: a predator.
    Predator,
    /// `F`: other fauna.
    Fauna,
}

impl OccupantSpecKind {
    /// Text-format tag.
    #[must_use]
    pub const fn tag(self) -> char {
        match self {
            Self::Tool { .. } => 'T',
            Self::Food { .. } => 'E',
            Self::Hazard { .. } => 'H',
            Self::Kiwi => 'K',
            Self::Predator => 'P',
            Self::Fauna => 'F',
        }
    }

    fn to_occupant_kind(self, name: &str) -> OccupantKind {
        match self {
            Self::Tool { weight, size } => OccupantKind::Tool {
                weight,
                size,
                tool: ToolKind::from_name(name),
            },
            Self::Food {
                weight,
                size,
                energy,
            } => OccupantKind::Food {
                weight,
                size,
                energy,
            },
            Self::Hazard { impact } => OccupantKind::Hazard { impact },
            Self::Kiwi => OccupantKind::Kiwi { counted: false },
            Self::Predator => OccupantKind::Predator,
            Self::Fauna => OccupantKind::Fauna,
        }
    }
}

/// One occupant record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupantSpec {
    /// Short name.
    pub name: String,
    /// Description shown to the player.
    pub description: String,
    /// Row of the tile.
    pub row: i32,
    /// Column of the tile.
    pub column: i32,
    /// Kind and kind-specific fields.
    #[serde(flatten)]
    pub kind: OccupantSpecKind,
}

/// A complete level: island, player, occupants, and rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Number of rows.
    pub rows: u16,
    /// Number of columns.
    pub columns: u16,
    /// One string of terrain symbols per row.
    pub terrain: Vec<String>,
    /// Player start.
    pub player: PlayerStart,
    /// Occupants in file order.
    #[serde(default)]
    pub occupants: Vec<OccupantSpec>,
    /// Rule overrides.
    #[serde(default)]
    pub config: GameConfig,
}

impl Level {
    /// Load a level file. Files ending in `.json` are read as JSON, anything
    /// else as the text format.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> LevelResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let level = if is_json {
            Self::from_json(&contents)?
        } else {
            Self::parse_text(&contents)?
        };
        info!(
            path = %path.display(),
            rows = level.rows,
            columns = level.columns,
            occupants = level.occupants.len(),
            "level loaded"
        );
        Ok(level)
    }

    /// Decode a JSON level.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::Json`] on malformed input.
    pub fn from_json(contents: &str) -> LevelResult<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Encode as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::Json`] if serialization fails.
    pub fn to_json(&self) -> LevelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse the comma-delimited text format.
    ///
    /// # Errors
    ///
    /// Returns an error on missing fields, bad numbers, or unknown tags.
    /// Shape and placement are checked later by [`Level::build`].
    pub fn parse_text(contents: &str) -> LevelResult<Self> {
        let mut tokens = Tokens::new(contents);

        let rows = tokens.number("row count")?;
        let columns = tokens.number("column count")?;

        let terrain = (0..rows)
            .map(|_| tokens.next("terrain row").map(str::to_string))
            .collect::<LevelResult<Vec<_>>>()?;

        let player = PlayerStart {
            name: tokens.next("player name")?.to_string(),
            row: tokens.number("player row")?,
            column: tokens.number("player column")?,
            max_stamina: tokens.number("player max stamina")?,
            max_backpack_weight: tokens.number("player max backpack weight")?,
            max_backpack_size: tokens.number("player max backpack size")?,
        };

        let count: usize = tokens.number("occupant count")?;
        let mut occupants = Vec::with_capacity(count);
        for _ in 0..count {
            occupants.push(parse_occupant(&mut tokens)?);
        }

        Ok(Self {
            rows,
            columns,
            terrain,
            player,
            occupants,
            config: GameConfig::default(),
        })
    }

    /// Render in the text format. The `config` block has no text form and
    /// is dropped.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut lines = vec![format!("{},{},", self.rows, self.columns)];
        lines.extend(self.terrain.iter().map(|row| format!("{row},")));
        let p = &self.player;
        lines.push(format!(
            "{},{},{},{},{},{},",
            p.name, p.row, p.column, p.max_stamina, p.max_backpack_weight, p.max_backpack_size
        ));
        lines.push(format!("{},", self.occupants.len()));
        for o in &self.occupants {
            let fields = match o.kind {
                OccupantSpecKind::Tool { weight, size } => format!("{weight},{size},"),
                OccupantSpecKind::Food {
                    weight,
                    size,
                    energy,
                } => format!("{weight},{size},{energy},"),
                OccupantSpecKind::Hazard { impact } => format!("{impact},"),
                OccupantSpecKind::Kiwi | OccupantSpecKind::Predator | OccupantSpecKind::Fauna => {
                    String::new()
                }
            };
            lines.push(format!(
                "{},{},{},{},{},{fields}",
                o.kind.tag(),
                o.name,
                o.description,
                o.row,
                o.column
            ));
        }
        lines.join("\n") + "\n"
    }

    /// Validate the level and build a ready-to-play game.
    ///
    /// # Errors
    ///
    /// Returns an error if the terrain grid has the wrong shape or unknown
    /// symbols, the player or an occupant is off the island, a tile is over
    /// capacity, the per-tile limit is outside `1..=MAX_OCCUPANTS_LIMIT`, or
    /// a numeric field is out of range.
    pub fn build(&self) -> LevelResult<Game> {
        if self.rows == 0 || self.columns == 0 {
            return Err(LevelError::EmptyIsland {
                rows: self.rows,
                columns: self.columns,
            });
        }
        let capacity = self.config.max_occupants_per_tile;
        if !(1..=MAX_OCCUPANTS_LIMIT).contains(&capacity) {
            return Err(LevelError::TileCapacity {
                value: capacity,
                max: MAX_OCCUPANTS_LIMIT,
            });
        }
        let mut island = Island::with_capacity(self.rows, self.columns, capacity).ok_or(
            LevelError::EmptyIsland {
                rows: self.rows,
                columns: self.columns,
            },
        )?;

        self.lay_terrain(&mut island)?;

        let p = &self.player;
        let start = island.position(p.row, p.column);
        if island.tile(start).is_none() {
            return Err(LevelError::OffIsland {
                what: format!("player {}", p.name),
                row: p.row,
                column: p.column,
            });
        }
        check_non_negative("max stamina", p.max_stamina)?;
        check_non_negative("max backpack weight", p.max_backpack_weight)?;
        check_non_negative("max backpack size", p.max_backpack_size)?;
        check_unit_interval("min required catch", self.config.min_required_catch)?;

        for spec in &self.occupants {
            check_occupant(spec)?;
            let pos = island.position(spec.row, spec.column);
            if island.tile(pos).is_none() {
                return Err(LevelError::OffIsland {
                    what: spec.name.clone(),
                    row: spec.row,
                    column: spec.column,
                });
            }
            let kind = spec.kind.to_occupant_kind(&spec.name);
            if island
                .spawn(pos, spec.name.as_str(), spec.description.as_str(), kind)
                .is_none()
            {
                return Err(LevelError::TileFull {
                    name: spec.name.clone(),
                    row: spec.row,
                    column: spec.column,
                });
            }
        }

        let player = Player::new(
            start,
            PlayerSpec {
                name: p.name.clone(),
                max_stamina: p.max_stamina,
                max_backpack_weight: p.max_backpack_weight,
                max_backpack_size: p.max_backpack_size,
            },
        );
        Ok(Game::new(island, player, self.config))
    }

    fn lay_terrain(&self, island: &mut Island) -> LevelResult<()> {
        let expected_rows = usize::from(self.rows);
        let expected_columns = usize::from(self.columns);
        if self.terrain.len() != expected_rows {
            return Err(LevelError::TerrainShape {
                row: self.terrain.len().min(expected_rows),
                expected: expected_columns,
                found: 0,
            });
        }
        for (row, symbols) in self.terrain.iter().enumerate() {
            let found = symbols.chars().count();
            if found != expected_columns {
                return Err(LevelError::TerrainShape {
                    row,
                    expected: expected_columns,
                    found,
                });
            }
            for (column, symbol) in symbols.chars().enumerate() {
                let terrain = Terrain::from_symbol(symbol).ok_or(LevelError::UnknownTerrain {
                    symbol,
                    row,
                    column,
                })?;
                // Both indices are bounded by u16 dimensions.
                let pos = island.position(
                    i32::try_from(row).unwrap_or(i32::MAX),
                    i32::try_from(column).unwrap_or(i32::MAX),
                );
                island.set_terrain(pos, terrain);
            }
        }
        Ok(())
    }
}

/// Load a level file and build the game in one step.
///
/// # Errors
///
/// Returns any error from [`Level::load`] or [`Level::build`].
pub fn load_game(path: impl AsRef<Path>) -> LevelResult<Game> {
    Level::load(path)?.build()
}

fn parse_occupant(tokens: &mut Tokens<'_>) -> LevelResult<OccupantSpec> {
    let tag = tokens.next("occupant type")?;
    let name = tokens.next("occupant name")?.to_string();
    let description = tokens.next("occupant description")?.to_string();
    let row = tokens.number("occupant row")?;
    let column = tokens.number("occupant column")?;
    let kind = match tag {
        "T" => OccupantSpecKind::Tool {
            weight: tokens.number("tool weight")?,
            size: tokens.number("tool size")?,
        },
        "E" => OccupantSpecKind::Food {
            weight: tokens.number("food weight")?,
            size: tokens.number("food size")?,
            energy: tokens.number("food energy")?,
        },
        "H" => OccupantSpecKind::Hazard {
            impact: tokens.number("hazard impact")?,
        },
        "K" => OccupantSpecKind::Kiwi,
        "P" => OccupantSpecKind::Predator,
        "F" => OccupantSpecKind::Fauna,
        other => return Err(LevelError::UnknownOccupant(other.to_string())),
    };
    Ok(OccupantSpec {
        name,
        description,
        row,
        column,
        kind,
    })
}

fn check_occupant(spec: &OccupantSpec) -> LevelResult<()> {
    match spec.kind {
        OccupantSpecKind::Tool { weight, size } => {
            check_non_negative("weight", weight)?;
            check_non_negative("size", size)
        }
        OccupantSpecKind::Food {
            weight,
            size,
            energy,
        } => {
            check_non_negative("weight", weight)?;
            check_non_negative("size", size)?;
            check_non_negative("energy", energy)
        }
        OccupantSpecKind::Hazard { impact } => check_unit_interval("impact", impact),
        OccupantSpecKind::Kiwi | OccupantSpecKind::Predator | OccupantSpecKind::Fauna => Ok(()),
    }
}

fn check_non_negative(field: &'static str, value: f64) -> LevelResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LevelError::OutOfRange { field, value })
    }
}

fn check_unit_interval(field: &'static str, value: f64) -> LevelResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(LevelError::OutOfRange { field, value })
    }
}

/// Comma- or newline-separated fields with surrounding whitespace trimmed.
struct Tokens<'a> {
    inner: Box<dyn Iterator<Item = &'a str> + 'a>,
}

impl<'a> Tokens<'a> {
    fn new(contents: &'a str) -> Self {
        Self {
            inner: Box::new(
                contents
                    .split([',', '\n'])
                    .map(str::trim)
                    .filter(|token| !token.is_empty()),
            ),
        }
    }

    fn next(&mut self, expected: &'static str) -> LevelResult<&'a str> {
        self.inner
            .next()
            .ok_or(LevelError::UnexpectedEnd { expected })
    }

    fn number<T: FromStr>(&mut self, field: &'static str) -> LevelResult<T> {
        let token = self.next(field)?;
        token.parse().map_err(|_| LevelError::InvalidNumber {
            field,
            value: token.to_string(),
        })
    }
}
