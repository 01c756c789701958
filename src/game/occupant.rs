//! Occupants: everything that can sit on a tile.
//!
//! Occupants live in an [`OccupantArena`] and are addressed by stable
//! [`OccupantId`]s. Where an occupant currently is (on a tile, in the
//! backpack, or gone from play) is a single [`Location`] field, so an
//! occupant can never be on a tile and in the backpack at once.

use std::fmt;

use crate::game::Position;

/// Hazard impact that kills the player outright.
pub const FATAL_IMPACT: f64 = 1.0;

/// Name of the hazard that breaks the player's trap instead of hurting them.
pub const BREAK_TRAP_HAZARD: &str = "Broken Trap";

/// Stable identifier of an occupant within one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OccupantId(u32);

impl OccupantId {
    /// Raw index into the arena.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for OccupantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where an occupant currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// On the given tile.
    Tile(Position),
    /// In the player's backpack.
    Backpack,
    /// Out of play (eaten, trapped, counted).
    Removed,
}

/// Flavour of a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    /// Predator trap.
    Trap {
        /// Whether the trap needs fixing before it can be used.
        broken: bool,
    },
    /// Fixes broken traps.
    Screwdriver,
    /// Any other tool; carried but has no use.
    Other,
}

impl ToolKind {
    /// Pick the tool flavour from its name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("trap") {
            ToolKind::Trap { broken: false }
        } else if name.eq_ignore_ascii_case("screwdriver") {
            ToolKind::Screwdriver
        } else {
            ToolKind::Other
        }
    }
}

/// Kind-specific payload of an occupant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OccupantKind {
    /// Carryable tool.
    Tool {
        /// Weight in the backpack.
        weight: f64,
        /// Volume in the backpack.
        size: f64,
        /// Trap, screwdriver, or other.
        tool: ToolKind,
    },
    /// Carryable food.
    Food {
        /// Weight in the backpack.
        weight: f64,
        /// Volume in the backpack.
        size: f64,
        /// Stamina restored when eaten.
        energy: f64,
    },
    /// Something dangerous on the ground.
    Hazard {
        /// Fraction of maximum stamina lost, in `[0, 1]`.
        impact: f64,
    },
    /// A kiwi waiting to be counted.
    Kiwi {
        /// Whether this kiwi has been counted already.
        counted: bool,
    },
    /// An introduced predator that can be trapped.
    Predator,
    /// Native wildlife; decorative.
    Fauna,
}

/// What a hazard does to the player when they step onto it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HazardEffect {
    /// Kills the player.
    Fatal,
    /// Breaks the player's trap, if they carry one.
    BreakTrap,
    /// Drains this fraction of maximum stamina.
    Drain(f64),
}

/// An entity placed on the island.
#[derive(Debug, Clone, PartialEq)]
pub struct Occupant {
    id: OccupantId,
    name: String,
    description: String,
    kind: OccupantKind,
    location: Location,
}

impl Occupant {
    /// Identifier within the owning arena.
    #[must_use]
    pub const fn id(&self) -> OccupantId {
        self.id
    }

    /// Short name, e.g. "Trap" or "Kiwi".
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Kind and kind-specific data.
    #[must_use]
    pub const fn kind(&self) -> &OccupantKind {
        &self.kind
    }

    /// Current location.
    #[must_use]
    pub const fn location(&self) -> Location {
        self.location
    }

    /// Tile this occupant is on, if it is on one.
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        match self.location {
            Location::Tile(pos) => Some(pos),
            Location::Backpack | Location::Removed => None,
        }
    }

    /// One-character symbol used when drawing the island.
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self.kind {
            OccupantKind::Tool { .. } => 'T',
            OccupantKind::Food { .. } => 'E',
            OccupantKind::Hazard { .. } => 'H',
            OccupantKind::Kiwi { .. } => 'K',
            OccupantKind::Predator => 'P',
            OccupantKind::Fauna => 'F',
        }
    }

    /// Check if this is a carryable item (tool or food).
    #[must_use]
    pub const fn is_item(&self) -> bool {
        matches!(
            self.kind,
            OccupantKind::Tool { .. } | OccupantKind::Food { .. }
        )
    }

    /// Gate for picking an item up. Every item on this island can be carried.
    #[must_use]
    pub const fn is_ok_to_carry(&self) -> bool {
        self.is_item()
    }

    /// Weight and size if this is an item.
    #[must_use]
    pub const fn load(&self) -> Option<(f64, f64)> {
        match self.kind {
            OccupantKind::Tool { weight, size, .. } | OccupantKind::Food { weight, size, .. } => {
                Some((weight, size))
            }
            _ => None,
        }
    }

    /// Check if this is a trap tool.
    #[must_use]
    pub const fn is_trap(&self) -> bool {
        matches!(
            self.kind,
            OccupantKind::Tool {
                tool: ToolKind::Trap { .. },
                ..
            }
        )
    }

    /// Check if this is a broken trap.
    #[must_use]
    pub const fn is_broken_trap(&self) -> bool {
        matches!(
            self.kind,
            OccupantKind::Tool {
                tool: ToolKind::Trap { broken: true },
                ..
            }
        )
    }

    /// Check if this is a screwdriver.
    #[must_use]
    pub const fn is_screwdriver(&self) -> bool {
        matches!(
            self.kind,
            OccupantKind::Tool {
                tool: ToolKind::Screwdriver,
                ..
            }
        )
    }

    /// Check if this is a predator.
    #[must_use]
    pub const fn is_predator(&self) -> bool {
        matches!(self.kind, OccupantKind::Predator)
    }

    /// Check if this is a kiwi that has not been counted.
    #[must_use]
    pub const fn is_uncounted_kiwi(&self) -> bool {
        matches!(self.kind, OccupantKind::Kiwi { counted: false })
    }

    /// Effect of this occupant if it is a hazard.
    ///
    /// A fatal impact takes precedence over the trap-breaking name.
    #[must_use]
    pub fn hazard_effect(&self) -> Option<HazardEffect> {
        let OccupantKind::Hazard { impact } = self.kind else {
            return None;
        };
        let effect = if (impact - FATAL_IMPACT).abs() < f64::EPSILON {
            HazardEffect::Fatal
        } else if self.name.eq_ignore_ascii_case(BREAK_TRAP_HAZARD) {
            HazardEffect::BreakTrap
        } else {
            HazardEffect::Drain(impact)
        };
        Some(effect)
    }

    /// Mark a trap as broken. Returns `false` if this is not a trap.
    pub fn set_broken(&mut self) -> bool {
        match &mut self.kind {
            OccupantKind::Tool {
                tool: ToolKind::Trap { broken },
                ..
            } => {
                *broken = true;
                true
            }
            _ => false,
        }
    }

    /// Fix a broken trap. Returns `false` unless this is a broken trap.
    pub fn fix(&mut self) -> bool {
        match &mut self.kind {
            OccupantKind::Tool {
                tool: ToolKind::Trap { broken },
                ..
            } if *broken => {
                *broken = false;
                true
            }
            _ => false,
        }
    }

    /// Mark a kiwi as counted. Returns `false` if not a kiwi or already counted.
    pub fn mark_counted(&mut self) -> bool {
        match &mut self.kind {
            OccupantKind::Kiwi { counted } if !*counted => {
                *counted = true;
                true
            }
            _ => false,
        }
    }
}

/// Backing store for every occupant in a game, in level-file order.
#[derive(Debug, Clone, Default)]
pub struct OccupantArena {
    occupants: Vec<Occupant>,
}

impl OccupantArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new occupant, initially out of play.
    ///
    /// Returns `None` only if the arena is full.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        kind: OccupantKind,
    ) -> Option<OccupantId> {
        let id = OccupantId(u32::try_from(self.occupants.len()).ok()?);
        self.occupants.push(Occupant {
            id,
            name: name.into(),
            description: description.into(),
            kind,
            location: Location::Removed,
        });
        Some(id)
    }

    /// Look up an occupant.
    #[must_use]
    pub fn get(&self, id: OccupantId) -> Option<&Occupant> {
        self.occupants.get(id.0 as usize)
    }

    /// Look up an occupant mutably.
    #[must_use]
    pub fn get_mut(&mut self, id: OccupantId) -> Option<&mut Occupant> {
        self.occupants.get_mut(id.0 as usize)
    }

    /// Move an occupant. Returns `false` if the id is unknown.
    pub fn relocate(&mut self, id: OccupantId, location: Location) -> bool {
        match self.get_mut(id) {
            Some(occupant) => {
                occupant.location = location;
                true
            }
            None => false,
        }
    }

    /// Every occupant ever added, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Occupant> {
        self.occupants.iter()
    }

    /// Occupants at `location`, in insertion order.
    pub fn at(&self, location: Location) -> impl Iterator<Item = &Occupant> {
        self.occupants
            .iter()
            .filter(move |occupant| occupant.location == location)
    }

    /// Number of occupants ever added.
    #[must_use]
    pub fn len(&self) -> usize {
        self.occupants.len()
    }

    /// Check if no occupant was ever added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Bounds;

    fn tool(name: &str) -> OccupantKind {
        OccupantKind::Tool {
            weight: 1.0,
            size: 1.0,
            tool: ToolKind::from_name(name),
        }
    }

    #[test]
    fn test_tool_kind_from_name() {
        assert_eq!(ToolKind::from_name("TRAP"), ToolKind::Trap { broken: false });
        assert_eq!(ToolKind::from_name("screwdriver"), ToolKind::Screwdriver);
        assert_eq!(ToolKind::from_name("Axe"), ToolKind::Other);
    }

    #[test]
    fn test_trap_break_and_fix() {
        let mut arena = OccupantArena::new();
        let id = arena.insert("Trap", "A predator trap", tool("Trap")).unwrap();
        let trap = arena.get_mut(id).unwrap();

        assert!(!trap.fix(), "fixing a working trap must fail");
        assert!(trap.set_broken());
        assert!(trap.is_broken_trap());
        assert!(trap.fix());
        assert!(!trap.is_broken_trap());
    }

    #[test]
    fn test_tool_predicates() {
        let mut arena = OccupantArena::new();
        let driver = arena.insert("Screwdriver", "Fixes traps", tool("SCREWDRIVER")).unwrap();
        let trap = arena.insert("Trap", "A predator trap", tool("Trap")).unwrap();
        let axe = arena.insert("Axe", "Chops wood", tool("Axe")).unwrap();
        let rat = arena.insert("Rat", "Ship rat", OccupantKind::Predator).unwrap();

        assert!(arena.get(driver).unwrap().is_screwdriver());
        assert!(!arena.get(driver).unwrap().is_trap());
        assert!(arena.get(trap).unwrap().is_trap());
        assert!(!arena.get(trap).unwrap().is_screwdriver());
        assert!(!arena.get(axe).unwrap().is_screwdriver());
        assert!(!arena.get(rat).unwrap().is_screwdriver());
        assert!(arena.get(rat).unwrap().is_predator());
    }

    #[test]
    fn test_kiwi_counted_once() {
        let mut arena = OccupantArena::new();
        let id = arena
            .insert("Kiwi", "Little spotted kiwi", OccupantKind::Kiwi { counted: false })
            .unwrap();
        let kiwi = arena.get_mut(id).unwrap();
        assert!(kiwi.mark_counted());
        assert!(!kiwi.mark_counted());
        assert!(!kiwi.is_uncounted_kiwi());
    }

    #[test]
    fn test_hazard_effects() {
        let mut arena = OccupantArena::new();
        let cliff = arena
            .insert("Cliff", "Steep cliff", OccupantKind::Hazard { impact: 1.0 })
            .unwrap();
        let broken = arena
            .insert("broken trap", "Rusty", OccupantKind::Hazard { impact: 0.0 })
            .unwrap();
        let hole = arena
            .insert("Hole", "Deep hole", OccupantKind::Hazard { impact: 0.3 })
            .unwrap();

        assert_eq!(arena.get(cliff).unwrap().hazard_effect(), Some(HazardEffect::Fatal));
        assert_eq!(
            arena.get(broken).unwrap().hazard_effect(),
            Some(HazardEffect::BreakTrap)
        );
        assert_eq!(
            arena.get(hole).unwrap().hazard_effect(),
            Some(HazardEffect::Drain(0.3))
        );
    }

    #[test]
    fn test_symbols_and_item_gate() {
        let mut arena = OccupantArena::new();
        let food = arena
            .insert(
                "Apple",
                "Crunchy",
                OccupantKind::Food {
                    weight: 1.0,
                    size: 1.0,
                    energy: 2.0,
                },
            )
            .unwrap();
        let rat = arena.insert("Rat", "Ship rat", OccupantKind::Predator).unwrap();

        let food = arena.get(food).unwrap();
        assert_eq!(food.symbol(), 'E');
        assert!(food.is_ok_to_carry());
        assert_eq!(food.load(), Some((1.0, 1.0)));

        let rat = arena.get(rat).unwrap();
        assert_eq!(rat.symbol(), 'P');
        assert!(!rat.is_ok_to_carry());
        assert_eq!(rat.load(), None);
    }

    #[test]
    fn test_location_filtering() {
        let bounds = Bounds::new(3, 3);
        let here = Position::new(bounds, 1, 1);
        let mut arena = OccupantArena::new();
        let a = arena.insert("Tui", "Songbird", OccupantKind::Fauna).unwrap();
        let b = arena.insert("Robin", "Songbird", OccupantKind::Fauna).unwrap();

        assert!(arena.relocate(a, Location::Tile(here)));
        assert!(arena.relocate(b, Location::Backpack));

        let on_tile: Vec<_> = arena.at(Location::Tile(here)).map(Occupant::id).collect();
        assert_eq!(on_tile, vec![a]);
        assert_eq!(arena.get(a).unwrap().position(), Some(here));
        assert_eq!(arena.get(b).unwrap().position(), None);
    }
}
