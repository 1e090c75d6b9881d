use crate::auth::{Notice, Prompt};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use owo_colors::OwoColorize;
use std::io::{self, BufRead, IsTerminal, Write};

/// [`Prompt`] over stdin/stdout. Notices are colored when stdout is a terminal.
///
/// Secrets are read with echo off when stdin is a terminal; piped input is
/// read line by line like any other answer.
pub struct TerminalPrompt<R> {
    input: R,
    color: bool,
    hide_secrets: bool,
}

impl TerminalPrompt<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        let hide_secrets = io::stdin().is_terminal();
        Self {
            hide_secrets,
            ..Self::new(io::stdin().lock(), io::stdout().is_terminal())
        }
    }
}

impl<R: BufRead> TerminalPrompt<R> {
    pub fn new(input: R, color: bool) -> Self {
        Self {
            input,
            color,
            hide_secrets: false,
        }
    }

    fn read_answer(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl<R: BufRead> Prompt for TerminalPrompt<R> {
    fn ask(&mut self, label: &str) -> io::Result<String> {
        print!("{label}: ");
        io::stdout().flush()?;
        self.read_answer()
    }

    fn ask_secret(&mut self, label: &str) -> io::Result<String> {
        print!("{label}: ");
        io::stdout().flush()?;

        if !self.hide_secrets {
            return self.read_answer();
        }

        enable_raw_mode()?;
        let secret = read_hidden();
        // Raw mode must be left even when reading failed.
        disable_raw_mode()?;
        println!();
        secret
    }

    fn notify(&mut self, notice: Notice<'_>) {
        print_notice(notice, self.color);
    }
}

/// Collect keystrokes until Enter without echoing them. Expects raw mode.
fn read_hidden() -> io::Result<String> {
    let mut secret = String::new();
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Enter => return Ok(secret),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "input cancelled"));
            }
            KeyCode::Char(c) => secret.push(c),
            KeyCode::Backspace => {
                secret.pop();
            }
            _ => {}
        }
    }
}

pub fn print_notice(notice: Notice<'_>, color: bool) {
    match (notice, color) {
        (Notice::Success(m), true) => println!("{} {m}", "✔".green().bold()),
        (Notice::Success(m), false) => println!("✔ {m}"),
        (Notice::Info(m), true) => println!("{} {m}", "•".cyan()),
        (Notice::Info(m), false) => println!("• {m}"),
        (Notice::Error(m), true) => eprintln!("{}: {m}", "error".red().bold()),
        (Notice::Error(m), false) => eprintln!("error: {m}"),
    }
}
