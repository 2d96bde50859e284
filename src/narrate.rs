//! Paced narration output.
//!
//! Narrative blocks print character-by-character with a short delay, the way
//! the demo paces its prose. Pacing drops to instant when stdout is not a
//! terminal (pipes, test harnesses) so nothing ever sleeps in automation.

use std::io::{self, IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use textwrap::fill;

const CHAR_DELAY: Duration = Duration::from_millis(20);
const MAX_WIDTH: usize = 84;

static INSTANT: AtomicBool = AtomicBool::new(false);

/// Select instant rendering when stdout is not an interactive terminal.
pub fn auto_pacing() {
    if !io::stdout().is_terminal() {
        set_instant(true);
    }
}

/// Force pacing on or off (tests always set `true`).
pub fn set_instant(on: bool) {
    INSTANT.store(on, Ordering::Relaxed);
}

fn wrap_width() -> usize {
    textwrap::termwidth().min(MAX_WIDTH)
}

/// Print a narration block, wrapped to the terminal and paced per character.
pub fn narrate(text: &str) {
    let wrapped = fill(text, wrap_width());
    if INSTANT.load(Ordering::Relaxed) {
        println!("{wrapped}");
        return;
    }
    let mut out = io::stdout();
    for ch in wrapped.chars() {
        print!("{ch}");
        let _ = out.flush();
        thread::sleep(CHAR_DELAY);
    }
    println!();
}

/// Print an empty narration beat (blank line).
pub fn beat() {
    println!();
}
