#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Lost Signal **
//! Narrative text-adventure demo: a tavern hub, a dialogue puzzle, a duel
//! with your own clone, and a timed escape.

use std::io::Write;

use anyhow::Result;
use colored::Colorize;
use log::info;

use lost_signal::input::InputManager;
use lost_signal::narrate::{self, narrate};
use lost_signal::repl::{TavernExit, run_tavern};
use lost_signal::style::GameStyle;
use lost_signal::world::SignalWorld;

const INTRO: &str = include_str!("../data/intro.txt");

fn main() -> Result<()> {
    env_logger::init();
    narrate::auto_pacing();
    info!("Start: new Lost Signal session");

    let mut world = SignalWorld::new();
    let mut input = InputManager::new();

    // clear the screen
    print!("\x1B[2J\x1B[H");
    std::io::stdout().flush()?;

    println!("{:^84}", "LOST SIGNAL -- DEMO VERSION".bright_yellow().underline());
    println!();
    narrate(INTRO);
    input.pause("Press Enter to approach the tavern...");

    loop {
        println!();
        println!("  1. Enter the tavern");
        println!("  2. Quit");
        let Some(choice) = input.read_token(&"> ".prompt_style().to_string()) else {
            break;
        };
        match choice.as_str() {
            "1" | "enter" => match run_tavern(&mut world, &mut input)? {
                TavernExit::Left => {},
                TavernExit::Chase(outcome) => {
                    info!("chase resolved: {outcome:?}");
                },
            },
            "2" | "quit" | "exit" => break,
            other => {
                println!("{}", "Invalid choice. Please try again.".error_style());
                info!("unrecognized menu selection '{other}'");
            },
        }
    }

    info!("session over");
    println!("\nThe signal fades. Goodbye.");
    Ok(())
}
