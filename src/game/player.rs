//! Player state: stamina, backpack, and position.

use crate::game::{Occupant, OccupantArena, OccupantId, Position, Terrain};

/// Player starting parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSpec {
    /// Display name.
    pub name: String,
    /// Maximum (and starting) stamina.
    pub max_stamina: f64,
    /// Maximum total weight the backpack can hold.
    pub max_backpack_weight: f64,
    /// Maximum total size the backpack can hold.
    pub max_backpack_size: f64,
}

/// Read-only numbers a UI shows for the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSnapshot {
    /// Current stamina.
    pub stamina: f64,
    /// Maximum stamina.
    pub max_stamina: f64,
    /// Current backpack weight.
    pub backpack_weight: f64,
    /// Maximum backpack weight.
    pub max_backpack_weight: f64,
    /// Current backpack size.
    pub backpack_size: f64,
    /// Maximum backpack size.
    pub max_backpack_size: f64,
}

/// The single player on the island.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    position: Position,
    stamina: f64,
    max_stamina: f64,
    max_backpack_weight: f64,
    max_backpack_size: f64,
    backpack_weight: f64,
    backpack_size: f64,
    /// Held items, in pick-up order.
    inventory: Vec<OccupantId>,
    alive: bool,
}

impl Player {
    /// Create a living player at full stamina with an empty backpack.
    #[must_use]
    pub fn new(position: Position, spec: PlayerSpec) -> Self {
        Self {
            name: spec.name,
            position,
            stamina: spec.max_stamina,
            max_stamina: spec.max_stamina,
            max_backpack_weight: spec.max_backpack_weight,
            max_backpack_size: spec.max_backpack_size,
            backpack_weight: 0.0,
            backpack_size: 0.0,
            inventory: Vec::new(),
            alive: true,
        }
    }

    /// Player name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Whether the player is alive.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Current stamina.
    #[must_use]
    pub const fn stamina(&self) -> f64 {
        self.stamina
    }

    /// Maximum stamina.
    #[must_use]
    pub const fn max_stamina(&self) -> f64 {
        self.max_stamina
    }

    /// Current backpack weight.
    #[must_use]
    pub const fn backpack_weight(&self) -> f64 {
        self.backpack_weight
    }

    /// Current backpack size.
    #[must_use]
    pub const fn backpack_size(&self) -> f64 {
        self.backpack_size
    }

    /// Maximum backpack weight.
    #[must_use]
    pub const fn max_backpack_weight(&self) -> f64 {
        self.max_backpack_weight
    }

    /// Maximum backpack size.
    #[must_use]
    pub const fn max_backpack_size(&self) -> f64 {
        self.max_backpack_size
    }

    /// Stamina and backpack numbers.
    #[must_use]
    pub const fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            stamina: self.stamina,
            max_stamina: self.max_stamina,
            backpack_weight: self.backpack_weight,
            max_backpack_weight: self.max_backpack_weight,
            backpack_size: self.backpack_size,
            max_backpack_size: self.max_backpack_size,
        }
    }

    /// Held item ids, in pick-up order.
    #[must_use]
    pub fn inventory(&self) -> &[OccupantId] {
        &self.inventory
    }

    /// Check if enough stamina remains to enter `terrain`.
    #[must_use]
    pub fn has_stamina_to_move(&self, terrain: Terrain) -> bool {
        self.stamina >= terrain.stamina_cost()
    }

    /// Move onto `pos`, paying the terrain cost.
    ///
    /// Returns `false` without changing anything if the player is dead or
    /// cannot afford the move. Reaching exactly zero stamina does not kill.
    pub fn move_to_position(&mut self, pos: Position, terrain: Terrain) -> bool {
        if !self.alive || !self.has_stamina_to_move(terrain) {
            return false;
        }
        self.stamina -= terrain.stamina_cost();
        self.position = pos;
        true
    }

    /// Check if `item` would fit in the backpack.
    #[must_use]
    pub fn can_carry(&self, item: &Occupant) -> bool {
        let Some((weight, size)) = item.load() else {
            return false;
        };
        item.is_ok_to_carry()
            && self.backpack_weight + weight <= self.max_backpack_weight
            && self.backpack_size + size <= self.max_backpack_size
    }

    /// Put `item` in the backpack.
    ///
    /// Fails if it is not an item, is already held, or would exceed the
    /// weight or size limit.
    pub fn collect(&mut self, item: &Occupant) -> bool {
        if self.has_item(item.id()) || !self.can_carry(item) {
            return false;
        }
        let Some((weight, size)) = item.load() else {
            return false;
        };
        self.backpack_weight += weight;
        self.backpack_size += size;
        self.inventory.push(item.id());
        true
    }

    /// Take `item` out of the backpack. Fails if it is not held.
    pub fn drop_item(&mut self, item: &Occupant) -> bool {
        let Some(idx) = self.inventory.iter().position(|id| *id == item.id()) else {
            return false;
        };
        self.inventory.remove(idx);
        if let Some((weight, size)) = item.load() {
            self.backpack_weight = (self.backpack_weight - weight).max(0.0);
            self.backpack_size = (self.backpack_size - size).max(0.0);
        }
        true
    }

    /// Check if `id` is in the backpack.
    #[must_use]
    pub fn has_item(&self, id: OccupantId) -> bool {
        self.inventory.contains(&id)
    }

    /// Check if any held tool is a trap.
    #[must_use]
    pub fn has_trap(&self, occupants: &OccupantArena) -> bool {
        self.trap(occupants).is_some()
    }

    /// First held trap, if any.
    #[must_use]
    pub fn trap(&self, occupants: &OccupantArena) -> Option<OccupantId> {
        self.inventory
            .iter()
            .copied()
            .find(|id| occupants.get(*id).is_some_and(Occupant::is_trap))
    }

    /// Add stamina, capped at the maximum.
    pub fn increase_stamina(&mut self, amount: f64) {
        self.stamina = (self.stamina + amount).min(self.max_stamina);
    }

    /// Remove stamina. The result may be zero or negative.
    pub fn reduce_stamina(&mut self, amount: f64) {
        self.stamina -= amount;
    }

    /// Kill the player. There is no way back.
    pub fn kill(&mut self) {
        self.alive = false;
    }
}
