//! Combat state machine for the basement duel with the clone.
//!
//! The turn engine here is pure: it mutates a [`CombatState`] and reports
//! what happened, while the interactive loop in [`crate::repl`] handles
//! prompting and narration. The clone's variable damage comes in through
//! the [`DamageRoll`] trait so tests can script it.

use std::cmp;

use log::info;
use rand::Rng;

use crate::item::{BOTTLE_NAME, Item, ItemKind, KNIFE_NAME};

pub const PLAYER_MAX_HP: u32 = 25;
pub const CLONE_START_HP: u32 = 22;
pub const BASE_ATTACK: u32 = 4;
pub const BADGE_BONUS: u32 = 2;
pub const BLEED_DAMAGE: u32 = 2;
pub const BLEED_TURNS: u32 = 2;
pub const HEAL_AMOUNT: u32 = 8;
pub const CLONE_DAMAGE_MIN: u32 = 3;
pub const CLONE_DAMAGE_MAX: u32 = 5;

/// Source of the clone's damage roll.
pub trait DamageRoll {
    fn roll(&mut self) -> u32;
}

/// Uniform roll in `[CLONE_DAMAGE_MIN, CLONE_DAMAGE_MAX]` backed by any RNG.
pub struct UniformRoll<R: Rng>(pub R);

impl<R: Rng> DamageRoll for UniformRoll<R> {
    fn roll(&mut self) -> u32 {
        self.0.random_range(CLONE_DAMAGE_MIN..=CLONE_DAMAGE_MAX)
    }
}

/// Actions the player can take on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatAction {
    Attack,
    UseItem,
    Defend,
}

/// Parse a combat menu selection. Anything unrecognized forfeits the turn.
pub fn parse_action(input: &str) -> Option<CombatAction> {
    match input.trim().to_lowercase().as_str() {
        "1" | "attack" => Some(CombatAction::Attack),
        "2" | "item" | "use" | "use item" => Some(CombatAction::UseItem),
        "3" | "defend" => Some(CombatAction::Defend),
        _ => None,
    }
}

/// Terminal result of a combat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOutcome {
    PlayerDefeated,
    CloneDefeated,
}

/// What the clone did on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneTurn {
    Stunned,
    Hit { rolled: u32, dealt: u32 },
}

/// Effect tag produced by the combat item handler and applied to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEffect {
    Bleed,
    Stun,
    Heal,
    Flavor,
    None,
}

/// Map an item to the combat effect it produces when used.
///
/// Buff items are narrative flavor only; their mechanical effect is the
/// passive badge flag checked at combat start.
pub fn combat_effect(item: &Item) -> ItemEffect {
    match item.kind {
        ItemKind::Heal => ItemEffect::Heal,
        ItemKind::Buff => ItemEffect::Flavor,
        ItemKind::Lore => ItemEffect::None,
        ItemKind::Weapon => {
            if item.name.eq_ignore_ascii_case(KNIFE_NAME) {
                ItemEffect::Bleed
            } else if item.name.eq_ignore_ascii_case(BOTTLE_NAME) {
                ItemEffect::Stun
            } else {
                ItemEffect::None
            }
        },
    }
}

/// Ephemeral state of one combat. Discarded when the fight resolves.
#[derive(Debug)]
pub struct CombatState {
    pub player_hp: u32,
    pub clone_hp: u32,
    pub bleed_turns: u32,
    pub stun_next: bool,
    pub defending: bool,
    badge_buff: bool,
}

impl CombatState {
    pub fn new(badge_buff: bool) -> CombatState {
        info!("combat start: player {PLAYER_MAX_HP} hp, clone {CLONE_START_HP} hp, badge buff {badge_buff}");
        CombatState {
            player_hp: PLAYER_MAX_HP,
            clone_hp: CLONE_START_HP,
            bleed_turns: 0,
            stun_next: false,
            defending: false,
            badge_buff,
        }
    }

    /// Damage one attack deals, including the badge bonus if armed.
    pub fn attack_damage(&self) -> u32 {
        if self.badge_buff {
            BASE_ATTACK + BADGE_BONUS
        } else {
            BASE_ATTACK
        }
    }

    /// Defending lasts a single opponent turn; clear it before each action.
    pub fn begin_player_turn(&mut self) {
        self.defending = false;
    }

    /// Strike the clone. Returns the damage dealt.
    pub fn player_attack(&mut self) -> u32 {
        let damage = self.attack_damage();
        self.clone_hp = self.clone_hp.saturating_sub(damage);
        info!("player attack for {damage} (clone at {} hp)", self.clone_hp);
        damage
    }

    /// Brace for the clone's next hit.
    pub fn defend(&mut self) {
        self.defending = true;
    }

    /// Apply the effect of a used item.
    pub fn apply_item(&mut self, effect: ItemEffect) {
        match effect {
            ItemEffect::Bleed => {
                self.bleed_turns = BLEED_TURNS;
                info!("clone is bleeding for {BLEED_TURNS} turns");
            },
            ItemEffect::Stun => {
                self.stun_next = true;
                info!("clone will be stunned next turn");
            },
            ItemEffect::Heal => {
                self.player_hp = cmp::min(PLAYER_MAX_HP, self.player_hp.saturating_add(HEAL_AMOUNT));
                info!("player healed to {} hp", self.player_hp);
            },
            ItemEffect::Flavor | ItemEffect::None => {},
        }
    }

    /// Tick bleed on the clone after the player's action. Returns the damage
    /// applied, if any.
    pub fn tick_bleed(&mut self) -> Option<u32> {
        if self.bleed_turns == 0 {
            return None;
        }
        self.bleed_turns -= 1;
        self.clone_hp = self.clone_hp.saturating_sub(BLEED_DAMAGE);
        info!("bleed ticks for {BLEED_DAMAGE} ({} turns left, clone at {} hp)", self.bleed_turns, self.clone_hp);
        Some(BLEED_DAMAGE)
    }

    /// Resolve the clone's turn: skip if stunned, otherwise roll and hit.
    /// A defending player halves the hit (integer floor, minimum 1).
    pub fn clone_turn(&mut self, roll: &mut dyn DamageRoll) -> CloneTurn {
        if self.stun_next {
            self.stun_next = false;
            info!("clone is stunned and skips its turn");
            return CloneTurn::Stunned;
        }
        let rolled = roll.roll();
        let dealt = if self.defending {
            cmp::max(rolled / 2, 1)
        } else {
            rolled
        };
        self.player_hp = self.player_hp.saturating_sub(dealt);
        info!("clone hits for {dealt} (rolled {rolled}, player at {} hp)", self.player_hp);
        CloneTurn::Hit { rolled, dealt }
    }

    /// Terminal outcome, if either side is down. The clone is checked first
    /// so a kill resolves before its turn would come around.
    pub fn outcome(&self) -> Option<CombatOutcome> {
        if self.clone_hp == 0 {
            Some(CombatOutcome::CloneDefeated)
        } else if self.player_hp == 0 {
            Some(CombatOutcome::PlayerDefeated)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{BADGE_NAME, PATCH_NAME};

    struct FixedRoll(u32);
    impl DamageRoll for FixedRoll {
        fn roll(&mut self) -> u32 {
            self.0
        }
    }

    #[test]
    fn starting_state_matches_constants() {
        let state = CombatState::new(false);
        assert_eq!(state.player_hp, 25);
        assert_eq!(state.clone_hp, 22);
        assert_eq!(state.bleed_turns, 0);
        assert!(!state.stun_next);
        assert!(!state.defending);
    }

    #[test]
    fn attack_deals_four_without_badge_and_six_with() {
        let mut plain = CombatState::new(false);
        assert_eq!(plain.player_attack(), 4);
        assert_eq!(plain.clone_hp, 18);

        let mut buffed = CombatState::new(true);
        assert_eq!(buffed.player_attack(), 6);
        assert_eq!(buffed.clone_hp, 16);
    }

    #[test]
    fn defend_halves_next_hit_with_floor_and_minimum_one() {
        let mut state = CombatState::new(false);
        state.defend();
        let turn = state.clone_turn(&mut FixedRoll(5));
        assert_eq!(turn, CloneTurn::Hit { rolled: 5, dealt: 2 });
        assert_eq!(state.player_hp, 23);

        // minimum roll still lands for at least 1
        state.defend();
        let turn = state.clone_turn(&mut FixedRoll(3));
        assert_eq!(turn, CloneTurn::Hit { rolled: 3, dealt: 1 });
    }

    #[test]
    fn defend_lasts_one_opponent_turn_only() {
        let mut state = CombatState::new(false);
        state.defend();
        state.clone_turn(&mut FixedRoll(4));
        assert_eq!(state.player_hp, 23);

        state.begin_player_turn();
        state.clone_turn(&mut FixedRoll(4));
        assert_eq!(state.player_hp, 19);
    }

    #[test]
    fn bleed_ticks_twice_for_two_then_stops() {
        let mut state = CombatState::new(false);
        state.apply_item(ItemEffect::Bleed);

        assert_eq!(state.tick_bleed(), Some(2));
        assert_eq!(state.clone_hp, 20);
        assert_eq!(state.tick_bleed(), Some(2));
        assert_eq!(state.clone_hp, 18);
        assert_eq!(state.tick_bleed(), None);
        assert_eq!(state.clone_hp, 18);
    }

    #[test]
    fn stunned_clone_deals_nothing_and_flag_clears() {
        let mut state = CombatState::new(false);
        state.apply_item(ItemEffect::Stun);

        assert_eq!(state.clone_turn(&mut FixedRoll(5)), CloneTurn::Stunned);
        assert_eq!(state.player_hp, 25);
        assert!(!state.stun_next);

        state.clone_turn(&mut FixedRoll(5));
        assert_eq!(state.player_hp, 20);
    }

    #[test]
    fn heal_restores_eight_clamped_at_max() {
        let mut state = CombatState::new(false);
        state.player_hp = 10;
        state.apply_item(ItemEffect::Heal);
        assert_eq!(state.player_hp, 18);

        state.player_hp = 20;
        state.apply_item(ItemEffect::Heal);
        assert_eq!(state.player_hp, 25);
    }

    #[test]
    fn clone_kill_resolves_before_its_turn() {
        let mut state = CombatState::new(false);
        state.clone_hp = 3;
        state.player_attack();
        assert_eq!(state.outcome(), Some(CombatOutcome::CloneDefeated));
    }

    #[test]
    fn trading_attacks_terminates() {
        let mut state = CombatState::new(false);
        let mut roll = FixedRoll(3);
        let mut turns = 0;
        let outcome = loop {
            turns += 1;
            assert!(turns < 100, "combat failed to terminate");
            state.begin_player_turn();
            state.player_attack();
            state.tick_bleed();
            if let Some(outcome) = state.outcome() {
                break outcome;
            }
            state.clone_turn(&mut roll);
            if let Some(outcome) = state.outcome() {
                break outcome;
            }
        };
        // 22 hp / 4 per attack: the clone drops on turn 6, player has taken 15
        assert_eq!(outcome, CombatOutcome::CloneDefeated);
        assert_eq!(turns, 6);
        assert_eq!(state.player_hp, 10);
    }

    #[test]
    fn uniform_roll_stays_in_range() {
        let mut roll = UniformRoll(rand::rng());
        for _ in 0..200 {
            let value = roll.roll();
            assert!((CLONE_DAMAGE_MIN..=CLONE_DAMAGE_MAX).contains(&value));
        }
    }

    #[test]
    fn parse_action_accepts_numbers_and_words() {
        assert_eq!(parse_action("1"), Some(CombatAction::Attack));
        assert_eq!(parse_action(" Attack "), Some(CombatAction::Attack));
        assert_eq!(parse_action("use item"), Some(CombatAction::UseItem));
        assert_eq!(parse_action("defend"), Some(CombatAction::Defend));
        assert_eq!(parse_action("flee"), None);
    }

    #[test]
    fn combat_effects_dispatch_on_item_identity() {
        let knife = Item::new(KNIFE_NAME, "", ItemKind::Weapon, 2);
        let bottle = Item::new(BOTTLE_NAME, "", ItemKind::Weapon, 1);
        let patch = Item::new(PATCH_NAME, "", ItemKind::Heal, 1);
        let badge = Item::new(BADGE_NAME, "", ItemKind::Buff, 999);
        let chip = Item::new("cracked holo-chip", "", ItemKind::Lore, 0);

        assert_eq!(combat_effect(&knife), ItemEffect::Bleed);
        assert_eq!(combat_effect(&bottle), ItemEffect::Stun);
        assert_eq!(combat_effect(&patch), ItemEffect::Heal);
        assert_eq!(combat_effect(&badge), ItemEffect::Flavor);
        assert_eq!(combat_effect(&chip), ItemEffect::None);
    }
}
