//! Game orchestration and the win/lose state machine.

use tracing::{debug, info};

use crate::config::GameConfig;
use crate::game::events::Listeners;
use crate::game::{
    GameEventListener, HazardEffect, Island, ListenerId, Location, MoveDirection, Occupant,
    OccupantId, OccupantKind, Player, PlayerSnapshot, Position, Terrain, ToolKind,
    assert_invariants, generate_reward_code,
};

const LOSE_PREFIX: &str = "Sorry, you have lost the game. ";
const CANNOT_MOVE: &str = "You do not have sufficient stamina to move.";
const OUT_OF_STAMINA: &str = "You have run out of stamina.";
const TRAP_BROKEN: &str = "Sorry your predator trap is broken. \
     You will need to find tools to fix it before you can use it again.";
const WIN_ALL_PREDATORS: &str =
    "You win! You have done an excellent job and trapped all the predators.";

/// Lifecycle of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    /// Still in progress.
    Playing,
    /// The player met a win condition. Terminal.
    Won,
    /// The player died or got stuck. Terminal.
    Lost,
}

/// The authoritative game: one island, one player, and the rules.
///
/// Every mutating action runs to completion, re-evaluates the win/lose
/// state, and notifies listeners before returning. Once the game is won or
/// lost every mutating action is rejected.
#[derive(Debug)]
pub struct Game {
    pub(crate) island: Island,
    pub(crate) player: Player,
    config: GameConfig,
    state: GameState,
    total_kiwis: u32,
    total_predators: u32,
    pub(crate) kiwi_count: u32,
    pub(crate) predators_trapped: u32,
    win_message: String,
    lose_message: String,
    player_message: String,
    reward_code: Option<String>,
    listeners: Listeners,
}

impl Game {
    /// Start a game on a populated island.
    ///
    /// Kiwi and predator totals are taken from the occupants on the island.
    #[must_use]
    pub fn new(mut island: Island, player: Player, config: GameConfig) -> Self {
        let mut total_kiwis = 0u32;
        let mut total_predators = 0u32;
        for occupant in island.occupants().iter() {
            if occupant.position().is_none() {
                continue;
            }
            match occupant.kind() {
                OccupantKind::Kiwi { .. } => total_kiwis += 1,
                OccupantKind::Predator => total_predators += 1,
                _ => {}
            }
        }
        island.update_player_position(player.position());

        Self {
            island,
            player,
            config,
            state: GameState::Playing,
            total_kiwis,
            total_predators,
            kiwi_count: 0,
            predators_trapped: 0,
            win_message: String::new(),
            lose_message: String::new(),
            player_message: String::new(),
            reward_code: None,
            listeners: Listeners::default(),
        }
    }

    // --- Queries ---

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Check if the game has been won or lost.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state != GameState::Playing
    }

    /// The island.
    #[must_use]
    pub const fn island(&self) -> &Island {
        &self.island
    }

    /// The player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Rule parameters.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Number of rows on the island.
    #[must_use]
    pub const fn num_rows(&self) -> u16 {
        self.island.num_rows()
    }

    /// Number of columns on the island.
    #[must_use]
    pub const fn num_columns(&self) -> u16 {
        self.island.num_columns()
    }

    /// Terrain at `(row, column)`.
    #[must_use]
    pub fn terrain(&self, row: i32, column: i32) -> Option<Terrain> {
        self.island.terrain_at(self.island.position(row, column))
    }

    /// Whether `(row, column)` is visible.
    #[must_use]
    pub fn is_visible(&self, row: i32, column: i32) -> bool {
        self.island.is_visible(self.island.position(row, column))
    }

    /// Whether `(row, column)` has been explored.
    #[must_use]
    pub fn is_explored(&self, row: i32, column: i32) -> bool {
        self.island.is_explored(self.island.position(row, column))
    }

    /// Whether the player is at `(row, column)`.
    #[must_use]
    pub fn has_player(&self, row: i32, column: i32) -> bool {
        self.island.has_player(self.island.position(row, column))
    }

    /// Occupants on the tile at `(row, column)`.
    #[must_use]
    pub fn occupants(&self, row: i32, column: i32) -> Vec<&Occupant> {
        self.island
            .occupants_at(self.island.position(row, column))
            .collect()
    }

    /// Occupant symbols for the tile at `(row, column)`.
    #[must_use]
    pub fn occupant_string_representation(&self, row: i32, column: i32) -> String {
        self.island
            .occupant_string_representation(self.island.position(row, column))
    }

    /// Occupants on the player's tile.
    #[must_use]
    pub fn occupants_at_player(&self) -> Vec<&Occupant> {
        self.island.occupants_at(self.player.position()).collect()
    }

    /// Look up any occupant.
    #[must_use]
    pub fn occupant(&self, id: OccupantId) -> Option<&Occupant> {
        self.island.occupant(id)
    }

    /// Description of an occupant, empty if unknown.
    #[must_use]
    pub fn occupant_description(&self, id: OccupantId) -> &str {
        self.island.occupant(id).map_or("", Occupant::description)
    }

    /// Items in the player's backpack, in pick-up order.
    #[must_use]
    pub fn player_inventory(&self) -> Vec<&Occupant> {
        self.player
            .inventory()
            .iter()
            .filter_map(|id| self.island.occupant(*id))
            .collect()
    }

    /// Player name.
    #[must_use]
    pub fn player_name(&self) -> &str {
        self.player.name()
    }

    /// Stamina and backpack numbers.
    #[must_use]
    pub const fn player_snapshot(&self) -> PlayerSnapshot {
        self.player.snapshot()
    }

    /// Kiwis counted so far.
    #[must_use]
    pub const fn kiwi_count(&self) -> u32 {
        self.kiwi_count
    }

    /// Kiwis on the island at the start.
    #[must_use]
    pub const fn total_kiwis(&self) -> u32 {
        self.total_kiwis
    }

    /// Predators on the island at the start.
    #[must_use]
    pub const fn total_predators(&self) -> u32 {
        self.total_predators
    }

    /// Predators trapped so far.
    #[must_use]
    pub const fn predators_trapped(&self) -> u32 {
        self.predators_trapped
    }

    /// Predators still loose.
    #[must_use]
    pub const fn predators_remaining(&self) -> u32 {
        self.total_predators.saturating_sub(self.predators_trapped)
    }

    /// Why the player won; empty while playing.
    #[must_use]
    pub fn win_message(&self) -> &str {
        &self.win_message
    }

    /// Why the player lost; may hold the cause of death before the state
    /// turns to [`GameState::Lost`].
    #[must_use]
    pub fn lose_message(&self) -> &str {
        &self.lose_message
    }

    /// Reward code issued on a win.
    #[must_use]
    pub fn reward_code(&self) -> Option<&str> {
        self.reward_code.as_deref()
    }

    /// Check if an advisory message is waiting.
    #[must_use]
    pub fn has_player_message(&self) -> bool {
        !self.player_message.is_empty()
    }

    /// Take the advisory message; it is cleared once read.
    pub fn take_player_message(&mut self) -> Option<String> {
        if self.player_message.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.player_message))
        }
    }

    /// Check if a move in `direction` would currently succeed.
    #[must_use]
    pub fn is_player_move_possible(&self, direction: MoveDirection) -> bool {
        let target = self.player.position().neighbor(direction);
        self.island.terrain_at(target).is_some_and(|terrain| {
            terrain.is_passable()
                && self.player.has_stamina_to_move(terrain)
                && self.player.is_alive()
        })
    }

    /// Check if `id` is an item on the player's tile that may be picked up.
    #[must_use]
    pub fn can_collect(&self, id: OccupantId) -> bool {
        self.island.has_occupant(self.player.position(), id)
            && self
                .island
                .occupant(id)
                .is_some_and(Occupant::is_ok_to_carry)
    }

    /// Check if `id` is an uncounted kiwi on the player's tile.
    #[must_use]
    pub fn can_count(&self, id: OccupantId) -> bool {
        self.island.has_occupant(self.player.position(), id)
            && self
                .island
                .occupant(id)
                .is_some_and(Occupant::is_uncounted_kiwi)
    }

    /// Check if using held item `id` would do something.
    ///
    /// Food can always be eaten; a working trap needs a predator on the
    /// tile; a screwdriver needs a broken trap in the backpack.
    #[must_use]
    pub fn can_use(&self, id: OccupantId) -> bool {
        if !self.player.has_item(id) {
            return false;
        }
        let Some(item) = self.island.occupant(id) else {
            return false;
        };
        match item.kind() {
            OccupantKind::Food { .. } => true,
            OccupantKind::Tool {
                tool: ToolKind::Trap { broken: false },
                ..
            } => self.island.has_predator(self.player.position()),
            _ if item.is_screwdriver() => self.held_broken_trap().is_some(),
            _ => false,
        }
    }

    // --- Listeners ---

    /// Register a listener; it is called after every state change.
    pub fn add_listener(&mut self, listener: impl GameEventListener + 'static) -> ListenerId {
        self.listeners.add(Box::new(listener))
    }

    /// Unregister a listener. Returns `false` if the handle is unknown.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // --- Actions ---

    /// Move the player one tile in `direction`.
    ///
    /// On success the terrain cost is paid, every hazard on the new tile is
    /// applied in order, and the game state is re-evaluated. A rejected move
    /// changes nothing.
    pub fn move_player(&mut self, direction: MoveDirection) -> bool {
        if self.is_over() || !self.is_player_move_possible(direction) {
            debug!(%direction, "move rejected");
            return false;
        }
        let target = self.player.position().neighbor(direction);
        let Some(terrain) = self.island.terrain_at(target) else {
            return false;
        };
        if !self.player.move_to_position(target, terrain) {
            return false;
        }
        self.island.update_player_position(target);
        debug!(%direction, %target, stamina = self.player.stamina(), "player moved");

        self.check_for_hazards(target);
        self.update_game_state();
        true
    }

    /// Pick up item `id` from the player's tile.
    pub fn collect_item(&mut self, id: OccupantId) -> bool {
        if self.is_over() || !self.can_collect(id) {
            debug!(%id, "collect rejected");
            return false;
        }
        let Some(item) = self.island.occupant(id) else {
            return false;
        };
        if !self.player.collect(item) {
            debug!(%id, "collect rejected: backpack full");
            return false;
        }
        self.island.occupants_mut().relocate(id, Location::Backpack);
        debug!(%id, "item collected");

        self.listeners.notify();
        assert_invariants(self);
        true
    }

    /// Drop held item `id` onto the player's tile.
    ///
    /// Fails, leaving the item in the backpack, if it is not held or the
    /// tile is full.
    pub fn drop_item(&mut self, id: OccupantId) -> bool {
        let pos = self.player.position();
        if self.is_over() || !self.player.has_item(id) {
            debug!(%id, "drop rejected");
            return false;
        }
        if !self.island.add_occupant(pos, id) {
            debug!(%id, %pos, "drop rejected: tile full");
            return false;
        }
        let Some(item) = self.island.occupant(id) else {
            return false;
        };
        self.player.drop_item(item);
        debug!(%id, %pos, "item dropped");

        self.listeners.notify();
        assert_invariants(self);
        true
    }

    /// Use held item `id`.
    ///
    /// Food restores stamina and is consumed. A working trap catches a
    /// predator on the player's tile. A screwdriver fixes a held broken trap.
    /// The game state is re-evaluated whether or not the use succeeded.
    pub fn use_item(&mut self, id: OccupantId) -> bool {
        if self.is_over() {
            return false;
        }
        let success = self.apply_item(id);
        debug!(%id, success, "item used");
        self.update_game_state();
        success
    }

    /// Count every uncounted kiwi on the player's tile.
    ///
    /// Counted kiwis leave the board. Returns how many were counted.
    pub fn count_kiwi(&mut self) -> u32 {
        if self.is_over() {
            return 0;
        }
        let pos = self.player.position();
        let kiwis: Vec<OccupantId> = self
            .island
            .occupants_at(pos)
            .filter(|occupant| occupant.is_uncounted_kiwi())
            .map(Occupant::id)
            .collect();

        let mut counted = 0;
        for id in kiwis {
            let marked = self
                .island
                .occupants_mut()
                .get_mut(id)
                .is_some_and(Occupant::mark_counted);
            if marked {
                self.island.remove_occupant(pos, id);
                self.kiwi_count += 1;
                counted += 1;
            }
        }
        debug!(counted, total = self.kiwi_count, "kiwis counted");

        self.update_game_state();
        counted
    }

    // --- Rules ---

    fn apply_item(&mut self, id: OccupantId) -> bool {
        if !self.player.has_item(id) {
            return false;
        }
        let Some(item) = self.island.occupant(id) else {
            return false;
        };
        let kind = *item.kind();
        match kind {
            OccupantKind::Food { energy, .. } => {
                self.player.increase_stamina(energy);
                self.player.drop_item(item);
                self.island.occupants_mut().relocate(id, Location::Removed);
                true
            }
            OccupantKind::Tool {
                tool: ToolKind::Trap { broken: false },
                ..
            } => self.trap_predator(),
            _ if item.is_screwdriver() => self
                .held_broken_trap()
                .and_then(|trap| self.island.occupants_mut().get_mut(trap))
                .is_some_and(Occupant::fix),
            _ => false,
        }
    }

    fn held_broken_trap(&self) -> Option<OccupantId> {
        self.player.inventory().iter().copied().find(|id| {
            self.island
                .occupant(*id)
                .is_some_and(Occupant::is_broken_trap)
        })
    }

    fn trap_predator(&mut self) -> bool {
        let pos = self.player.position();
        let Some(predator) = self.island.predator_at(pos) else {
            return false;
        };
        if !self.island.remove_occupant(pos, predator) {
            return false;
        }
        self.predators_trapped += 1;
        debug!(%predator, trapped = self.predators_trapped, "predator trapped");
        true
    }

    /// Apply every hazard on `pos`, in level order, even after a fatal one.
    fn check_for_hazards(&mut self, pos: Position) {
        let hazards: Vec<(HazardEffect, String)> = self
            .island
            .occupants_at(pos)
            .filter_map(|occupant| {
                occupant
                    .hazard_effect()
                    .map(|effect| (effect, occupant.description().to_string()))
            })
            .collect();
        for (effect, description) in hazards {
            self.handle_hazard(effect, &description);
        }
    }

    fn handle_hazard(&mut self, effect: HazardEffect, description: &str) {
        debug!(?effect, description, "hazard encountered");
        match effect {
            HazardEffect::Fatal => {
                self.player.kill();
                self.lose_message = format!("{description} has killed you.");
            }
            HazardEffect::BreakTrap => {
                let Some(trap) = self.player.trap(self.island.occupants()) else {
                    return;
                };
                if let Some(trap) = self.island.occupants_mut().get_mut(trap) {
                    trap.set_broken();
                    self.player_message = TRAP_BROKEN.to_string();
                }
            }
            HazardEffect::Drain(impact) => {
                self.player
                    .reduce_stamina(self.player.max_stamina() * impact);
                if self.player.stamina() <= 0.0 {
                    self.player.kill();
                    self.lose_message = OUT_OF_STAMINA.to_string();
                } else {
                    self.player_message = format!("{description} has reduced your stamina.");
                }
            }
        }
    }

    fn player_can_move(&self) -> bool {
        MoveDirection::ALL
            .into_iter()
            .any(|direction| self.is_player_move_possible(direction))
    }

    /// Apply the win/lose rules, first match wins, then notify listeners.
    fn update_game_state(&mut self) {
        if !self.player.is_alive() {
            self.state = GameState::Lost;
            self.lose_message = format!("{LOSE_PREFIX}{}", self.lose_message);
        } else if !self.player_can_move() {
            self.state = GameState::Lost;
            self.lose_message = format!("{LOSE_PREFIX}{CANNOT_MOVE}");
        } else if self.total_predators > 0 && self.predators_trapped == self.total_predators {
            self.win(WIN_ALL_PREDATORS.to_string());
        } else if self.kiwi_count == self.total_kiwis
            && self
                .config
                .catch_quota_met(self.predators_trapped, self.total_predators)
        {
            let percent = (self.config.min_required_catch * 100.0).round();
            self.win(format!(
                "You win! You have counted all the kiwi and trapped at least {percent}% of the predators."
            ));
        }

        if self.is_over() {
            info!(
                state = ?self.state,
                kiwis = self.kiwi_count,
                trapped = self.predators_trapped,
                "game over"
            );
        }
        self.listeners.notify();
        assert_invariants(self);
    }

    fn win(&mut self, message: String) {
        let code = generate_reward_code();
        self.state = GameState::Won;
        self.win_message = format!("{message}\nYour reward code: {code}");
        self.reward_code = Some(code);
    }
}
