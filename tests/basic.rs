use std::time::Duration;

use lost_signal as ls;
use ls::chase::{ChaseOutcome, run_chase};
use ls::combat::{CombatOutcome, CombatState, DamageRoll, ItemEffect};
use ls::dialogue::{Answer, parse_answer, sequence_unlocks};
use ls::input::{DeadlinePrompt, TimedAnswer};
use ls::item::{BADGE_NAME, Inventory, Item, ItemKind, KNIFE_NAME, PATCH_NAME};
use ls::world::SignalWorld;

#[test]
fn test_lib_version() {
    assert!(!ls::LOST_SIGNAL_VERSION.is_empty());
}

#[test]
fn test_dialogue_unlock() {
    let yes = parse_answer("YES").unwrap();
    let no = parse_answer(" no ").unwrap();
    assert!(sequence_unlocks(&[yes, no, yes]));
    assert!(!sequence_unlocks(&[no, no, yes]));
    assert_eq!(parse_answer("sure"), None);
}

#[test]
fn test_inventory_consume_lifecycle() {
    let mut inv = Inventory::new();
    inv.add(Item::new(PATCH_NAME, "field dressing", ItemKind::Heal, 1));
    assert_eq!(inv.consume(PATCH_NAME), Some(ItemKind::Heal));
    assert!(!inv.contains(PATCH_NAME));
    assert_eq!(inv.consume(PATCH_NAME), None);
}

struct FixedRoll(u32);
impl DamageRoll for FixedRoll {
    fn roll(&mut self) -> u32 {
        self.0
    }
}

#[test]
fn test_full_combat_with_items() {
    // knife (bleed), bottle (stun), patch (heal) all pull their weight:
    // attack + bleed should drop the clone well inside the hp budget
    let mut state = CombatState::new(true);
    let mut roll = FixedRoll(5);

    state.begin_player_turn();
    state.apply_item(ItemEffect::Bleed);
    state.tick_bleed();
    state.clone_turn(&mut roll);

    state.begin_player_turn();
    state.apply_item(ItemEffect::Stun);
    state.tick_bleed();
    assert_eq!(state.clone_turn(&mut roll), ls::combat::CloneTurn::Stunned);

    let mut guard = 0;
    while state.outcome().is_none() {
        guard += 1;
        assert!(guard < 50, "combat failed to terminate");
        state.begin_player_turn();
        state.player_attack();
        state.tick_bleed();
        if state.outcome().is_some() {
            break;
        }
        state.clone_turn(&mut roll);
    }
    assert_eq!(state.outcome(), Some(CombatOutcome::CloneDefeated));
}

#[test]
fn test_badge_buff_is_sticky_across_combats() {
    let mut world = SignalWorld::new();
    world.inventory.add(Item::new(BADGE_NAME, "", ItemKind::Buff, 999));
    world.arm_badge_buff_if_held();

    // discard the badge; a later combat still gets the bonus
    world.inventory.remove(BADGE_NAME);
    world.arm_badge_buff_if_held();
    let mut state = CombatState::new(world.badge_buff());
    assert_eq!(state.player_attack(), 6);
}

#[test]
fn test_clone_defeated_redirects_exactly_once() {
    let mut world = SignalWorld::new();
    world.set_clone_defeated();
    assert!(world.take_clone_defeated());
    assert!(!world.take_clone_defeated());
}

struct Scripted(Vec<TimedAnswer>);
impl DeadlinePrompt for Scripted {
    fn ask(&mut self, _prompt: &str, _limit: Duration) -> TimedAnswer {
        if self.0.is_empty() {
            TimedAnswer::TimedOut
        } else {
            self.0.remove(0)
        }
    }
}

#[test]
fn test_chase_escape_and_capture_paths() {
    let escape = run_chase(&mut Scripted(vec![
        TimedAnswer::Line("run".into()),
        TimedAnswer::Line("dive".into()),
        TimedAnswer::Line("quiet".into()),
    ]));
    assert_eq!(escape, ChaseOutcome::Escaped);

    let capture = run_chase(&mut Scripted(vec![
        TimedAnswer::Line("hide".into()),
        TimedAnswer::Line("stay".into()),
    ]));
    assert!(matches!(capture, ChaseOutcome::Captured(_)));

    let timeout = run_chase(&mut Scripted(vec![TimedAnswer::TimedOut]));
    assert!(matches!(timeout, ChaseOutcome::Captured(_)));
}

#[test]
fn test_knife_has_two_uses() {
    let mut inv = Inventory::new();
    inv.add(Item::new(KNIFE_NAME, "", ItemKind::Weapon, 2));
    inv.consume(KNIFE_NAME);
    assert!(inv.contains(KNIFE_NAME));
    inv.consume(KNIFE_NAME);
    assert!(!inv.contains(KNIFE_NAME));
}

#[test]
fn test_answers_roundtrip_through_required_sequence() {
    let collected: Vec<Answer> = ["yes", "no", "yes"]
        .iter()
        .map(|t| parse_answer(t).unwrap())
        .collect();
    assert!(sequence_unlocks(&collected));
}
