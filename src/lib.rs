#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const LOST_SIGNAL_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod chase;
pub mod combat;
pub mod dialogue;
pub mod input;
pub mod item;
pub mod narrate;
pub mod repl;
pub mod style;
pub mod world;

// Re-exports for convenience
pub use chase::{ChaseOutcome, run_chase};
pub use combat::{CombatOutcome, CombatState};
pub use input::{DeadlinePrompt, InputManager, TimedAnswer};
pub use item::{Inventory, Item, ItemKind};
pub use repl::{TavernExit, run_tavern};
pub use world::SignalWorld;
