// SPDX-License-Identifier: MIT

//! Interactive client: owns the session, the prompt and message state, and
//! the terminal loop that keeps the bottom status row current.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;

use chrono::Local;
use crossterm::cursor::{self, MoveTo};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode};
use crossterm::{execute, queue};
use tracing::{debug, info};

use crate::error::Result;
use crate::format::CommandRunner;
use crate::options::Options;
use crate::prompt::complete::BuiltinNamespace;
use crate::prompt::history::HistoryRing;
use crate::prompt::{KeyOutcome, Prompt, PromptAction, PromptKey};
use crate::screen::{GridScreen, Style};
use crate::session::Session;
use crate::status;

pub(crate) struct Client {
    pub session: Session,
    pub options: Options,
    history: HistoryRing,
    prompt: Option<Prompt>,
    message: Option<String>,
    /// Line handed over by the prompt callback on submit.
    submitted: Rc<RefCell<Option<String>>>,
    needs_redraw: bool,
}

impl Client {
    pub(crate) fn new(session: Session, options: Options) -> Self {
        let history = HistoryRing::new(options.prompt_history_limit);
        Self {
            session,
            options,
            history,
            prompt: None,
            message: None,
            submitted: Rc::new(RefCell::new(None)),
            needs_redraw: true,
        }
    }

    /// Compose the bottom row. The prompt wins over a pending message,
    /// which wins over the status line.
    pub(crate) fn compose_row(
        &self,
        runner: &dyn CommandRunner,
        sx: usize,
    ) -> GridScreen {
        let mut grid = GridScreen::new(sx);
        if let Some(prompt) = &self.prompt {
            status::redraw_prompt(prompt, &self.options, &mut grid, sx);
        } else if let Some(message) = &self.message {
            status::redraw_message(message, &self.options, &mut grid, sx);
        } else {
            status::redraw(
                &self.session,
                &self.options,
                runner,
                &mut grid,
                sx,
                Local::now(),
            );
        }
        grid
    }

    pub(crate) fn prompt_open(&self) -> bool {
        self.prompt.is_some()
    }

    pub(crate) fn open_command_prompt(&mut self) {
        let slot = Rc::clone(&self.submitted);
        self.prompt = Some(Prompt::new(
            ":",
            false,
            Box::new(move |line| {
                *slot.borrow_mut() = line.map(str::to_string);
                PromptAction::Close
            }),
        ));
        self.message = None;
        self.needs_redraw = true;
    }

    pub(crate) fn prompt_key(&mut self, key: PromptKey) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };
        match prompt.handle_key(key, &mut self.history, &BuiltinNamespace) {
            KeyOutcome::Unchanged => {}
            KeyOutcome::Redraw => self.needs_redraw = true,
            KeyOutcome::Close => {
                self.prompt = None;
                self.needs_redraw = true;
                let line = self.submitted.borrow_mut().take();
                if let Some(line) = line {
                    self.execute(&line);
                }
            }
        }
    }

    /// Dispatch a submitted command line.
    fn execute(&mut self, line: &str) {
        info!(command = line, "execute");
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return;
        };
        let arg = parts.next();
        match command {
            "next-window" => self.session.next_window(),
            "previous-window" => self.session.previous_window(),
            "select-window" => match arg.and_then(|a| a.parse::<usize>().ok()) {
                Some(pos) if pos < self.session.windows().len() => self.session.select(pos),
                _ => self.message = Some(format!("select-window: bad index: {line}")),
            },
            "new-window" => {
                self.session.add_window(arg.unwrap_or("shell"));
                let pos = self.session.windows().len() - 1;
                self.session.select(pos);
            }
            "rename-window" => match arg {
                Some(name) => {
                    let pos = self.session.current_index();
                    if let Some(win) = self.session.window_mut(pos) {
                        win.name = name.to_string();
                    }
                }
                None => self.message = Some("rename-window: name required".to_string()),
            },
            "rename-session" => match arg {
                Some(name) => self.session.name = name.to_string(),
                None => self.message = Some("rename-session: name required".to_string()),
            },
            _ => self.message = Some(format!("unknown command: {command}")),
        }
    }

    fn clear_message(&mut self) -> bool {
        if self.message.is_some() {
            self.message = None;
            self.needs_redraw = true;
            return true;
        }
        false
    }

    fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }
}

struct RawModeGuard;

impl RawModeGuard {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, ResetColor);
        disable_raw_mode().ok();
    }
}

/// Run the interactive loop until the user quits. The status row is drawn
/// on the terminal's last line and refreshed on key input, on resize, and
/// on a timer tick so clock formats stay current.
pub(crate) fn run(mut client: Client, runner: &dyn CommandRunner) -> Result<()> {
    let _raw = RawModeGuard::new()?;

    loop {
        if client.take_redraw() {
            let (cols, rows) = terminal::size()?;
            let grid = client.compose_row(runner, cols as usize);
            draw_row(&grid, rows.saturating_sub(1))?;
        }

        if !event::poll(Duration::from_millis(250))? {
            // Tick: strftime output may have changed.
            client.needs_redraw = true;
            continue;
        }
        match event::read()? {
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                if client.prompt_open() {
                    if let Some(pkey) = decode_prompt_key(key) {
                        client.prompt_key(pkey);
                    }
                    continue;
                }
                if client.clear_message() {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Char(':') => client.open_command_prompt(),
                    KeyCode::Char('n') => {
                        client.session.next_window();
                        client.needs_redraw = true;
                    }
                    KeyCode::Char('p') => {
                        client.session.previous_window();
                        client.needs_redraw = true;
                    }
                    KeyCode::Char('c') => {
                        client.execute("new-window");
                        client.needs_redraw = true;
                    }
                    _ => {}
                }
            }
            Event::Resize(_, _) => {
                debug!("resize");
                client.needs_redraw = true;
            }
            _ => {}
        }
    }
    Ok(())
}

fn decode_prompt_key(key: KeyEvent) -> Option<PromptKey> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('a') => Some(PromptKey::LineStart),
            KeyCode::Char('e') => Some(PromptKey::LineEnd),
            KeyCode::Char('c') => Some(PromptKey::Escape),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Left => Some(PromptKey::Left),
        KeyCode::Right => Some(PromptKey::Right),
        KeyCode::Home => Some(PromptKey::LineStart),
        KeyCode::End => Some(PromptKey::LineEnd),
        KeyCode::Tab => Some(PromptKey::Complete),
        KeyCode::Backspace => Some(PromptKey::Backspace),
        KeyCode::Delete => Some(PromptKey::Delete),
        KeyCode::Up => Some(PromptKey::HistoryUp),
        KeyCode::Down => Some(PromptKey::HistoryDown),
        KeyCode::Enter => Some(PromptKey::Enter),
        KeyCode::Esc => Some(PromptKey::Escape),
        KeyCode::Char(ch) => Some(PromptKey::Char(ch)),
        _ => None,
    }
}

/// Blit a composed row onto terminal row `row`, batching style changes.
fn draw_row(grid: &GridScreen, row: u16) -> io::Result<()> {
    use crossterm::style::Attribute;

    let mut stdout = io::stdout();
    queue!(stdout, MoveTo(0, row))?;
    let mut current: Option<Style> = None;
    for (ch, style) in grid.iter() {
        if ch == '\0' {
            continue;
        }
        if current != Some(style) {
            queue!(
                stdout,
                SetForegroundColor(style.fg),
                SetBackgroundColor(style.bg),
                SetAttribute(if style.reversed {
                    Attribute::Reverse
                } else {
                    Attribute::NoReverse
                })
            )?;
            current = Some(style);
        }
        queue!(stdout, Print(ch))?;
    }
    queue!(stdout, ResetColor, SetAttribute(Attribute::NoReverse))?;
    stdout.flush()
}
