//! Scene router and interactive handlers for the Central Drift tavern.
//!
//! The tavern menu is the idle state between scenes. It dispatches to the
//! bartender (dialogue puzzle and, once unlocked, the basement duel), the
//! merc, the tavern floor (item discovery), and the inventory screen. A won
//! duel raises the clone-defeated flag; the very next pass through the hub
//! consumes it and drops straight into the chase.

use anyhow::Result;
use log::info;

use crate::chase::{ChaseOutcome, run_chase};
use crate::combat::{
    CloneTurn, CombatAction, CombatOutcome, CombatState, ItemEffect, UniformRoll, combat_effect,
    parse_action,
};
use crate::dialogue::{Answer, BARTENDER_QUESTIONS, parse_answer, sequence_unlocks};
use crate::input::{ConsolePrompt, InputManager};
use crate::item::{Item, ItemKind};
use crate::narrate::{beat, narrate};
use crate::style::GameStyle;
use crate::world::SignalWorld;

/// Everything that can be found on the tavern floor.
const DISCOVERIES: [(&str, &str, ItemKind, u32); 7] = [
    (
        "cracked holo-chip",
        "Its screen flickers with corrupted coordinates. Someone tried to wipe it, but not well enough.",
        ItemKind::Lore,
        0,
    ),
    (
        "old starfighter badge",
        "The emblem is from a squadron that was supposedly wiped out decades ago.",
        ItemKind::Buff,
        999,
    ),
    (
        "data key wrapped in cloth",
        "It's warm to the touch -- almost like it's been used recently.",
        ItemKind::Lore,
        0,
    ),
    (
        "torn page from a manifest log",
        "The names are smudged, except one: yours.",
        ItemKind::Lore,
        0,
    ),
    (
        "combat knife",
        "Mono-edged, mercenary issue. The blade has been honed so often it's half its original width.",
        ItemKind::Weapon,
        2,
    ),
    (
        "broken bottle",
        "Half a bottle of Drift-brewed rotgut. The jagged end looks more useful than the label ever was.",
        ItemKind::Weapon,
        1,
    ),
    (
        "trauma patch",
        "A corporate field dressing, seal intact. One application, no questions asked.",
        ItemKind::Heal,
        1,
    ),
];

/// How the player left the tavern.
#[derive(Debug)]
pub enum TavernExit {
    /// Walked out the front door (or the input stream closed).
    Left,
    /// The duel was won and the chase played out to a terminal.
    Chase(ChaseOutcome),
}

/// Run the tavern hub loop until the player leaves or the chase resolves.
///
/// # Errors
/// Reserved for the input layer; the game logic itself has no fatal
/// conditions, and a closed input stream ends the session cleanly.
pub fn run_tavern(world: &mut SignalWorld, input: &mut InputManager) -> Result<TavernExit> {
    narrate("You push through the doors of the Central Drift Tavern. Neon haze, low voices, the hum of a station that never sleeps.");
    loop {
        if world.take_clone_defeated() {
            let outcome = chase_scene(input);
            return Ok(TavernExit::Chase(outcome));
        }

        beat();
        println!("{}", "You are in the Central Drift Tavern. What would you like to do?".heading_style());
        println!("  1. Talk to the Bartender");
        println!("  2. Talk to the Merc");
        println!("  3. Explore the Tavern");
        println!("  4. Check your Inventory");
        println!("  5. Exit the Tavern");

        let Some(choice) = input.read_token(&"Enter the number of your choice: ".prompt_style().to_string()) else {
            return Ok(TavernExit::Left);
        };
        match choice.as_str() {
            "1" => bartender_scene(world, input),
            "2" => merc_scene(input),
            "3" => explore_scene(world, input),
            "4" => inventory_scene(world, input),
            "5" => {
                narrate("You exit the tavern, stepping back into the desolate world outside.");
                return Ok(TavernExit::Left);
            },
            other => {
                println!("{}", "Invalid choice. Please try again.".error_style());
                info!("unrecognized hub selection '{other}'");
            },
        }
    }
}

/// Ask a yes/no question, re-prompting until a recognized answer or EOF.
fn ask_yes_no(input: &mut InputManager, prompt: &str) -> Option<Answer> {
    let mut question = prompt.to_string();
    loop {
        let token = input.read_token(&question)?;
        if let Some(answer) = parse_answer(&token) {
            return Some(answer);
        }
        question = "Please answer 'yes' or 'no': ".to_string();
    }
}

fn bartender_scene(world: &mut SignalWorld, input: &mut InputManager) {
    narrate("You step up to the bar. The bartender cleans a glass without looking up.");
    println!("{}: \"Yeah? You need somethin'?\"", "Bartender".speaker_style());

    if world.basement_unlocked() {
        narrate("He glances at the door behind the bar, still ajar from last time.");
        println!("{}: \"Stairs are where you left 'em. Don't get caught.\"", "Bartender".speaker_style());
        offer_basement(world, input);
        return;
    }

    let mut answers = Vec::with_capacity(BARTENDER_QUESTIONS.len());
    for question in BARTENDER_QUESTIONS {
        let Some(answer) = ask_yes_no(input, question) else {
            return;
        };
        answers.push(answer);
    }

    if sequence_unlocks(&answers) {
        info!("bartender puzzle solved");
        beat();
        println!("{}: \"Thought so. People like you don't just wander in.\"", "Bartender".speaker_style());
        narrate(
            "He leans in, voice dropping under the bar noise. \"Listen real close -- whatever \
             you're doing here, make sure you don't get caught. There's a door behind the bar. \
             Stairs go down. Something's been waiting in the basement, and it's wearing your face.\"",
        );
        world.unlock_basement();
        offer_basement(world, input);
    } else {
        info!("bartender puzzle failed with {answers:?}");
        beat();
        narrate("The bartender squints at you, unimpressed.");
        println!(
            "{}: {}",
            "Bartender".speaker_style(),
            "\"Get lost. Maybe next time you'll be more convincing.\"".denied_style()
        );
        input.pause("Press Enter to return to the tavern...");
    }
}

fn offer_basement(world: &mut SignalWorld, input: &mut InputManager) {
    match ask_yes_no(input, "Follow the stairs down now? (yes/no): ") {
        Some(Answer::Yes) => basement_scene(world, input),
        Some(Answer::No) => narrate("You nod at the bartender and turn back to the floor. The door can wait."),
        None => {},
    }
}

fn merc_scene(input: &mut InputManager) {
    narrate(
        "You approach the merc leaning against the rusted pillar, his figure illuminated by \
         the flickering neon lights. His armor is mismatched corporate gear, rebel straps, \
         and scavenged parts, all held together with duct tape and determination.",
    );
    println!("{}: \"You lookin' for trouble, or just lost?\"", "Merc".speaker_style());
    println!("{}: \"Just passing through. Heard this place is safe enough.\"", "You".speaker_style());
    println!("{}: \"A word of advice, stranger. Keep 'yer head low for yer own good.\"", "Merc".speaker_style());
    narrate("He gives you a nod. Not friendly. Not hostile. Just... warning you.");
    input.pause("Press Enter to return to the tavern...");
}

fn explore_scene(world: &mut SignalWorld, input: &mut InputManager) {
    narrate("You step away from the noise of the bar and wander deeper into the tavern...");

    for (name, description, kind, uses) in DISCOVERIES {
        beat();
        narrate(&format!("You find {}.", name.item_style()));
        narrate(description);

        let prompt = format!("Do you take the {name}? (yes/no): ");
        match ask_yes_no(input, &prompt) {
            Some(Answer::Yes) => {
                world.inventory.add(Item::new(name, description, kind, uses));
                narrate(&format!("You place the {} into your pocket.", name.item_style()));
            },
            Some(Answer::No) => {
                narrate(&format!("You leave the {name} where you found it."));
            },
            None => return,
        }
    }

    beat();
    narrate("You've explored everything you can for now.");
    if world.inventory.is_empty() {
        narrate("You leave the tavern floor empty-handed.");
    } else {
        println!("{}", "Items collected:".subheading_style());
        for item in world.inventory.list() {
            println!(" - {}", item.name.item_style());
        }
    }
    input.pause("\nPress Enter to return to the tavern...");
}

fn inventory_scene(world: &mut SignalWorld, input: &mut InputManager) {
    beat();
    if world.inventory.is_empty() {
        narrate("Your pockets are empty except for lint and bad memories.");
        return;
    }

    println!("{}", "You carry:".subheading_style());
    for item in world.inventory.list() {
        let uses = match item.kind {
            ItemKind::Lore => "keepsake".to_string(),
            ItemKind::Buff => "passive".to_string(),
            _ => format!("{} use{}", item.uses_left, if item.uses_left == 1 { "" } else { "s" }),
        };
        println!(" - {} ({}, {})", item.name.item_style(), item.kind, uses);
        println!("     {}", item.description.description_style());
    }

    let Some(choice) = input.read_token("Type an item name to discard it, or press Enter to keep everything: ") else {
        return;
    };
    if choice.is_empty() {
        return;
    }
    match world.inventory.remove(&choice) {
        Some(item) => narrate(&format!("You toss the {} aside.", item.name.item_style())),
        None => println!("{}", format!("You aren't carrying any '{choice}'.").error_style()),
    }
}

fn basement_scene(world: &mut SignalWorld, input: &mut InputManager) {
    narrate(
        "The stairs drop into a cold blue dark that smells of coolant and old rain. At the \
         bottom, a figure steps out of the server racks' glow. Your face. Your stance. Your \
         scar. The clone smiles with your mouth and draws a blade.",
    );

    world.arm_badge_buff_if_held();
    if world.badge_buff() {
        narrate("The starfighter badge sits warm against your chest. Old muscle memory settles into your hands.");
    }

    let mut state = CombatState::new(world.badge_buff());
    let mut roll = UniformRoll(rand::rng());

    let outcome = loop {
        state.begin_player_turn();
        beat();
        println!(
            "{}  {}   {}  {}",
            "You:".subheading_style(),
            format!("{} hp", state.player_hp).hp_style(),
            "Clone:".subheading_style(),
            format!("{} hp", state.clone_hp).danger_style(),
        );
        println!("  1. Attack   2. Use Item   3. Defend");

        let token = input
            .read_token(&"Your move: ".prompt_style().to_string())
            .unwrap_or_default();
        match parse_action(&token) {
            Some(CombatAction::Attack) => {
                let damage = state.player_attack();
                narrate(&format!("You lunge in and connect for {damage} damage."));
            },
            Some(CombatAction::UseItem) => {
                let effect = combat_item_prompt(world, input);
                state.apply_item(effect);
            },
            Some(CombatAction::Defend) => {
                state.defend();
                narrate("You square up behind your guard, ready to take the next hit on your arms.");
            },
            None => {
                narrate("You hesitate, and the moment is gone.");
                info!("combat turn forfeited on '{token}'");
            },
        }

        if let Some(damage) = state.tick_bleed() {
            narrate(&format!("The clone's wound weeps; it loses {damage} more."));
        }
        if let Some(outcome) = state.outcome() {
            break outcome;
        }

        match state.clone_turn(&mut roll) {
            CloneTurn::Stunned => {
                narrate("The clone staggers, shaking glass out of its hair. It can't press the attack.");
            },
            CloneTurn::Hit { rolled, dealt } => {
                if dealt < rolled {
                    narrate(&format!("The clone's blade glances off your guard for {dealt} damage."));
                } else {
                    narrate(&format!("The clone slips past your reach and cuts you for {dealt} damage."));
                }
            },
        }
        if let Some(outcome) = state.outcome() {
            break outcome;
        }
    };

    match outcome {
        CombatOutcome::CloneDefeated => {
            info!("combat won");
            beat();
            narrate(
                "The clone folds to its knees, blade ringing on the concrete. \"They told me,\" \
                 it says with your voice, \"that whoever holds the capsule gets to be the real \
                 one.\" The light behind its eyes gutters out.",
            );
            narrate(
                "Upstairs, the music has stopped. Heavy boots cross the floor above your head. \
                 Whoever sent it knows exactly where you are.",
            );
            world.set_clone_defeated();
            input.pause("Press Enter to head back up...");
        },
        CombatOutcome::PlayerDefeated => {
            info!("combat lost");
            beat();
            narrate(
                "Your legs give out and the cold floor comes up to meet you. When you surface \
                 again you're propped against the bar upstairs, aching everywhere, pockets \
                 untouched. The basement door is shut.",
            );
            input.pause("Press Enter to gather yourself...");
        },
    }
}

/// Combat item selection. The turn is spent whether or not the selection is
/// valid; the resolver applies whatever effect comes back.
fn combat_item_prompt(world: &mut SignalWorld, input: &mut InputManager) -> ItemEffect {
    let usable: Vec<(String, u32)> = world
        .inventory
        .list()
        .filter(|item| item.kind.usable_in_combat())
        .map(|item| (item.name.clone(), item.uses_left))
        .collect();

    if usable.is_empty() {
        narrate("You pat your pockets. Nothing in there is going to help in a knife fight.");
        return ItemEffect::None;
    }

    println!("{}", "You could use:".subheading_style());
    for (name, uses) in &usable {
        println!(" - {} ({uses} left)", name.item_style());
    }

    let Some(choice) = input.read_token("Use which item? ") else {
        return ItemEffect::None;
    };
    let Some(item) = world.inventory.get(&choice) else {
        println!("{}", format!("You aren't carrying any '{choice}'. The chance slips by.").error_style());
        return ItemEffect::None;
    };
    if !item.kind.usable_in_combat() {
        println!("{}", format!("The {} is no use in a fight.", item.name).error_style());
        return ItemEffect::None;
    }

    let effect = combat_effect(item);
    let name = item.name.clone();
    world.inventory.consume(&name);

    match effect {
        ItemEffect::Bleed => narrate(&format!("You drag the {} across the clone's guard arm. It starts to bleed freely.", name.item_style())),
        ItemEffect::Stun => narrate(&format!("You shatter the {} across the clone's temple. It reels.", name.item_style())),
        ItemEffect::Heal => narrate(&format!("You slap the {} over the worst of it. The pain recedes.", name.item_style())),
        ItemEffect::Flavor => narrate(&format!("You flash the {}. The clone's eyes narrow -- it remembers the squadron too.", name.item_style())),
        ItemEffect::None => narrate(&format!("You brandish the {}, to no obvious effect.", name.item_style())),
    }
    effect
}

fn chase_scene(input: &mut InputManager) -> ChaseOutcome {
    beat();
    narrate(
        "You're halfway up the stairs when the whole tavern goes quiet above you. Then: the \
         doors, the boots, the scanners. They came for the clone and found you instead.",
    );
    println!(
        "{}",
        "Answer fast. Hesitate and they have you.".danger_style()
    );

    let outcome = run_chase(&mut ConsolePrompt);
    beat();
    match &outcome {
        ChaseOutcome::Escaped => {
            narrate(
                "You spill out of the vent into the cold dark between hulls, lungs burning, \
                 station noise fading behind you. No map. No signal. But still your own.",
            );
            println!("{}", "DEMO COMPLETE -- To be continued...".heading_style());
        },
        ChaseOutcome::Captured(reason) => {
            narrate(reason);
            narrate("A hood comes down over your eyes. Wherever the capsule is now, you won't be the one to find it.");
            println!("{}", "CAPTURED".danger_style());
        },
    }
    input.pause("Press Enter to return to the menu...");
    outcome
}
