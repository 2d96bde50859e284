//! Terminal input handling.
//!
//! Blocking prompts go through an [`InputManager`] that prefers a
//! rustyline-backed editor when stdin is an interactive terminal and falls
//! back to plain stdin otherwise. The chase sequence uses the one
//! deadline-bounded primitive in the system, [`DeadlinePrompt`], which races
//! a timer against the read and reports a timeout as its own answer kind.

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use log::{info, warn};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

/// Outcome of reading a line from a blocking prompt.
pub enum InputEvent {
    Line(String),
    Eof,
    Interrupted,
}

type LineEditor = rustyline::Editor<(), DefaultHistory>;

/// Helper responsible for managing the interactive input backend.
///
/// Prefers `rustyline` when an interactive terminal is available, falling
/// back to a basic stdin reader otherwise.
pub struct InputManager {
    backend: Backend,
}

impl InputManager {
    pub fn new() -> Self {
        let backend = if io::stdin().is_terminal() {
            match RustylineInput::new() {
                Ok(editor) => {
                    info!("using rustyline-backed prompt input");
                    Backend::Rustyline(editor)
                },
                Err(err) => {
                    warn!("failed to initialize rustyline ({err}), falling back to basic stdin");
                    Backend::plain()
                },
            }
        } else {
            info!("stdin is not a TTY; using basic input mode");
            Backend::plain()
        };

        Self { backend }
    }

    /// Read a line from the current backend. If the interactive backend
    /// reports an unrecoverable error, switch to plain stdin and retry once.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match self.backend.read_line(prompt) {
            Ok(event) => Ok(event),
            Err(err) => {
                if self.backend.is_rustyline() {
                    warn!("rustyline input failed: {err} -- switching to basic stdin");
                    self.backend = Backend::plain();
                    self.backend.read_line(prompt)
                } else {
                    Err(err)
                }
            },
        }
    }

    /// Read a trimmed, lowercased token. Returns `None` when the input
    /// stream is closed so callers can wind the session down.
    pub fn read_token(&mut self, prompt: &str) -> Option<String> {
        match self.read_line(prompt) {
            Ok(InputEvent::Line(line)) => Some(line.trim().to_lowercase()),
            Ok(InputEvent::Interrupted) => Some(String::new()),
            Ok(InputEvent::Eof) => None,
            Err(err) => {
                warn!("input stream failed: {err}");
                None
            },
        }
    }

    /// "Press Enter to continue" beat; any input (or EOF) releases it.
    pub fn pause(&mut self, prompt: &str) {
        let _ = self.read_line(prompt);
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

enum Backend {
    Rustyline(RustylineInput),
    Plain(StdinInput),
}

impl Backend {
    fn plain() -> Self {
        Backend::Plain(StdinInput::default())
    }

    fn is_rustyline(&self) -> bool {
        matches!(self, Backend::Rustyline(_))
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match self {
            Backend::Rustyline(editor) => editor.read_line(prompt),
            Backend::Plain(stdin) => stdin.read_line(prompt),
        }
    }
}

struct RustylineInput {
    editor: LineEditor,
    history_path: Option<PathBuf>,
}

impl RustylineInput {
    fn new() -> io::Result<Self> {
        let mut editor = LineEditor::new().map_err(map_io_err)?;
        let history_path = history_file_path();

        if let Some(path) = history_path.as_ref() {
            if let Some(dir) = path.parent() {
                if let Err(err) = std::fs::create_dir_all(dir) {
                    warn!("failed to create history directory {}: {err}", dir.display());
                }
            }
            if let Err(err) = editor.load_history(path) {
                match err {
                    ReadlineError::Io(ref io_err) if io_err.kind() == io::ErrorKind::NotFound => {
                        info!("no prior history found at {}, starting fresh", path.display());
                    },
                    other => {
                        warn!("failed to load history from {}: {other}", path.display());
                    },
                }
            }
        }

        Ok(Self { editor, history_path })
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(err) = self.editor.add_history_entry(line.as_str()) {
                        warn!("failed to append to history: {err}");
                    }
                    if let Some(path) = self.history_path.as_ref() {
                        if let Err(err) = self.editor.save_history(path) {
                            warn!("failed to persist history to {}: {err}", path.display());
                        }
                    }
                }
                Ok(InputEvent::Line(line))
            },
            Err(err) => convert_readline_error(err),
        }
    }
}

#[derive(Default)]
struct StdinInput {
    buffer: String,
}

impl StdinInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        print!("{prompt}");
        io::stdout().flush()?;

        self.buffer.clear();
        let bytes = io::stdin().read_line(&mut self.buffer)?;
        if bytes == 0 {
            return Ok(InputEvent::Eof);
        }

        if self.buffer.ends_with('\n') {
            self.buffer.pop();
            if self.buffer.ends_with('\r') {
                self.buffer.pop();
            }
        }

        Ok(InputEvent::Line(self.buffer.clone()))
    }
}

fn convert_readline_error(err: ReadlineError) -> io::Result<InputEvent> {
    match err {
        ReadlineError::Interrupted => Ok(InputEvent::Interrupted),
        ReadlineError::Eof => Ok(InputEvent::Eof),
        ReadlineError::Io(io_err) => Err(io_err),
        other => Err(io::Error::other(other)),
    }
}

fn map_io_err(err: ReadlineError) -> io::Error {
    match err {
        ReadlineError::Io(io_err) => io_err,
        other => io::Error::other(other),
    }
}

fn history_file_path() -> Option<PathBuf> {
    dirs::data_dir()
        .or_else(dirs::data_local_dir)
        .map(|base| build_history_path(&base))
}

fn build_history_path(base: &Path) -> PathBuf {
    let mut path = base.to_path_buf();
    path.push("lost_signal");
    path.push("history.txt");
    path
}

/// Answer from a deadline-bounded prompt.
///
/// `TimedOut` and `Closed` are distinct from every valid token, so callers
/// can treat them as the automatic failure branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimedAnswer {
    Line(String),
    TimedOut,
    Closed,
}

/// A prompt that gives up after a deadline instead of blocking forever.
pub trait DeadlinePrompt {
    fn ask(&mut self, prompt: &str, limit: Duration) -> TimedAnswer;
}

/// Console-backed [`DeadlinePrompt`]: raw-mode key polling on a TTY, a
/// reader thread raced against the deadline otherwise.
#[derive(Debug, Default)]
pub struct ConsolePrompt;

impl DeadlinePrompt for ConsolePrompt {
    fn ask(&mut self, prompt: &str, limit: Duration) -> TimedAnswer {
        print!("{prompt}");
        if io::stdout().flush().is_err() {
            return TimedAnswer::Closed;
        }
        if io::stdin().is_terminal() {
            match read_key_line(limit) {
                Ok(answer) => answer,
                Err(err) => {
                    warn!("timed terminal read failed: {err}");
                    TimedAnswer::Closed
                },
            }
        } else {
            read_piped_line(limit)
        }
    }
}

fn read_key_line(limit: Duration) -> io::Result<TimedAnswer> {
    terminal::enable_raw_mode()?;
    let result = collect_keys(limit);
    // always restore the terminal, even if the poll failed
    let _ = terminal::disable_raw_mode();
    println!();
    result
}

fn collect_keys(limit: Duration) -> io::Result<TimedAnswer> {
    let deadline = Instant::now() + limit;
    let mut line = String::new();
    let mut out = io::stdout();
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() || !event::poll(remaining)? {
            return Ok(TimedAnswer::TimedOut);
        }
        if let Event::Key(KeyEvent { code, modifiers, kind, .. }) = event::read()? {
            if kind != KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Enter => return Ok(TimedAnswer::Line(normalize(&line))),
                KeyCode::Backspace => {
                    if line.pop().is_some() {
                        print!("\x08 \x08");
                        out.flush()?;
                    }
                },
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(TimedAnswer::Closed);
                },
                KeyCode::Char(c) => {
                    line.push(c);
                    print!("{c}");
                    out.flush()?;
                },
                _ => {},
            }
        }
    }
}

fn read_piped_line(limit: Duration) -> TimedAnswer {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = String::new();
        let result = io::stdin().read_line(&mut buf).map(|n| (n, buf));
        let _ = tx.send(result);
    });
    match rx.recv_timeout(limit) {
        Ok(Ok((0, _))) => TimedAnswer::Closed,
        Ok(Ok((_, buf))) => TimedAnswer::Line(normalize(&buf)),
        Ok(Err(err)) => {
            warn!("timed stdin read failed: {err}");
            TimedAnswer::Closed
        },
        // The reader thread stays parked on stdin; a line typed after the
        // deadline is swallowed by it, which is acceptable because a timeout
        // ends the chase immediately.
        Err(_) => TimedAnswer::TimedOut,
    }
}

fn normalize(line: &str) -> String {
    line.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_folds_case() {
        assert_eq!(normalize("  CRAWL \r\n"), "crawl");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn timed_answers_are_distinct_from_tokens() {
        assert_ne!(TimedAnswer::TimedOut, TimedAnswer::Line("no".into()));
        assert_ne!(TimedAnswer::Closed, TimedAnswer::Line(String::new()));
    }

    #[test]
    fn history_path_appends_components() {
        let base = PathBuf::from("/tmp/lost-signal-test");
        let path = build_history_path(&base);
        assert!(path.ends_with(Path::new("lost_signal/history.txt")));
    }
}
