use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::config::{self, Config, ConfigError, Field, Settings};

/// Source of values for settings the user did not pass on the command line.
pub trait Prompter {
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;
    /// Like [`read_line`](Self::read_line), without echoing the input.
    fn read_secret(&mut self, prompt: &str) -> io::Result<String>;
}

/// Terminal mode saved while a masked read has echo turned off.
///
/// The read runs on a thread a cancelled run abandons, so its own cleanup
/// never happens; [`restore`](Self::restore) puts the mode back instead.
#[derive(Debug, Clone, Default)]
pub struct SavedTerminal(Arc<Mutex<Option<String>>>);

impl SavedTerminal {
    fn save(&self) {
        if let Some(mode) = stty(&["-g"]) {
            self.remember(mode);
        }
    }

    fn remember(&self, mode: String) {
        if let Ok(mut saved) = self.0.lock() {
            *saved = Some(mode);
        }
    }

    fn clear(&self) {
        if let Ok(mut saved) = self.0.lock() {
            saved.take();
        }
    }

    /// Reapply the saved mode, if a masked read was interrupted. Returns
    /// whether one was pending.
    pub fn restore(&self) -> bool {
        let mode = self.0.lock().ok().and_then(|mut saved| saved.take());
        match mode {
            Some(mode) => {
                if stty(&[mode.as_str()]).is_none() {
                    tracing::debug!("could not restore terminal mode");
                }
                true
            }
            None => false,
        }
    }
}

/// Run `stty` against the controlling terminal; its trimmed stdout on success.
#[cfg(unix)]
fn stty(args: &[&str]) -> Option<String> {
    let tty = std::fs::File::open("/dev/tty").ok()?;
    let output = std::process::Command::new("stty")
        .args(args)
        .stdin(tty)
        .output()
        .ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(not(unix))]
fn stty(_args: &[&str]) -> Option<String> {
    None
}

/// Reads from the terminal. Blocks until the user presses Enter.
#[derive(Debug, Default)]
pub struct ConsolePrompter {
    terminal: SavedTerminal,
}

impl ConsolePrompter {
    /// The masked prompt records the terminal mode in `terminal`, so the
    /// caller can restore it if the run is cancelled mid-read.
    pub fn new(terminal: SavedTerminal) -> Self {
        Self { terminal }
    }
}

impl Prompter for ConsolePrompter {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        let mut stderr = io::stderr();
        stderr.write_all(prompt.as_bytes())?;
        stderr.flush()?;
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
        }
        Ok(line)
    }

    fn read_secret(&mut self, prompt: &str) -> io::Result<String> {
        self.terminal.save();
        let answer = rpassword::prompt_password(prompt);
        self.terminal.clear();
        answer
    }
}

/// Ask for every missing field, then build the [`Config`].
///
/// A blank answer for a required field is an error; a blank answer for the
/// output directory leaves it unset. A prompted output directory is validated
/// like one given by flag.
pub fn complete(mut settings: Settings, prompter: &mut dyn Prompter) -> Result<Config, ConfigError> {
    for field in config::missing_fields(&settings) {
        let answer = if field.is_secret() {
            prompter.read_secret(field.prompt())
        } else {
            prompter.read_line(field.prompt())
        }
        .map_err(|source| ConfigError::Prompt { field, source })?;

        let answer = answer.trim();
        if answer.is_empty() {
            if field.is_required() {
                return Err(ConfigError::MissingCredential(field));
            }
            continue;
        }
        if field == Field::OutputDirectory {
            config::ensure_output_dir(Path::new(answer))?;
        }
        settings.set(field, answer.to_string());
    }
    settings.into_config()
}
