use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use std::io::{self, Stdout, Write};
use std::time::Duration;

pub const TICK_MS: u64 = 33;

pub struct TerminalGuard
{
    stdout: Stdout,
}

impl TerminalGuard
{
    pub fn enter() -> io::Result<Self>
    {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, Hide)?;
        Ok(Self { stdout })
    }

    pub fn present(&mut self, lines: &[String]) -> io::Result<()>
    {
        let output = format!("{}\r\n", lines.join("\r\n"));
        queue!(self.stdout, MoveTo(0, 0), Clear(ClearType::All))?;
        self.stdout.write_all(output.as_bytes())?;
        self.stdout.flush()
    }
}

impl Drop for TerminalGuard
{
    fn drop(&mut self)
    {
        let _ = execute!(self.stdout, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key
{
    Char(char),
    Backspace,
    Enter,
    Quit,
}

pub fn poll_keys() -> io::Result<Vec<Key>>
{
    let mut keys = Vec::new();
    while event::poll(Duration::from_millis(0))? {
        if let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event::read()?
        {
            if kind == KeyEventKind::Release {
                continue;
            }
            let key = match code {
                KeyCode::Esc => Key::Quit,
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Key::Quit,
                KeyCode::Backspace => Key::Backspace,
                KeyCode::Enter => Key::Enter,
                KeyCode::Char(ch) => Key::Char(ch),
                _ => continue,
            };
            keys.push(key);
        }
    }
    Ok(keys)
}

pub fn edit_line(
    buffer: &mut String,
    key: Key,
    max_len: usize,
    accept: impl Fn(char) -> bool,
) -> bool
{
    match key {
        Key::Backspace => {
            buffer.pop();
            true
        }
        Key::Char(ch) if accept(ch) && buffer.chars().count() < max_len => {
            buffer.push(ch);
            true
        }
        _ => false,
    }
}

pub fn size() -> (usize, usize)
{
    let (cols, rows) = terminal::size().unwrap_or((80, 24));
    (cols as usize, rows as usize)
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Rgb
{
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const GREEN: Rgb = Rgb { r: 0, g: 200, b: 80 };
pub const YELLOW: Rgb = Rgb { r: 234, g: 179, b: 8 };
pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
pub const GOLD: Rgb = Rgb { r: 255, g: 215, b: 0 };

pub fn paint(text: &str, color: Rgb) -> String
{
    format!("\x1b[38;2;{};{};{}m{}\x1b[0m", color.r, color.g, color.b, text)
}
