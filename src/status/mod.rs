// SPDX-License-Identifier: MIT

//! Status row composition: expands the configured left/right formats, lays
//! out the window list, and writes the result into a line renderer. Also
//! draws the transient message row and the interactive prompt row that
//! overlay the status line.

pub(crate) mod layout;

use chrono::{DateTime, Local};
use tracing::debug;
use unicode_width::UnicodeWidthChar;

use crate::format::{CommandRunner, Expander};
use crate::options::Options;
use crate::prompt::Prompt;
use crate::screen::{Screen, Style, display_width};
use crate::session::Session;

use layout::{Arrow, WindowFit};

/// Compose the status row for `session` into `screen`.
pub(crate) fn redraw(
    session: &Session,
    options: &Options,
    runner: &dyn CommandRunner,
    screen: &mut dyn Screen,
    sx: usize,
    now: DateTime<Local>,
) {
    let style = options.status_style();
    if sx == 0 || !options.status {
        blank(screen, sx, style);
        return;
    }

    let expander = Expander::new(session, runner);
    let left = clip(
        &expander.expand(&options.status_left, now),
        options.status_left_length,
    );
    let right = clip(
        &expander.expand(&options.status_right, now),
        options.status_right_length,
    );
    let llen = display_width(&left);
    let rlen = display_width(&right);

    let fits: Vec<WindowFit> = session
        .windows()
        .iter()
        .enumerate()
        .map(|(pos, win)| WindowFit {
            width: session.label_width(pos),
            current: pos == session.current_index(),
            alert: win.has_alert(),
        })
        .collect();

    let plan = layout::compute(sx, llen, rlen, &fits);
    debug!(start = plan.start, budget = plan.budget, "status layout");
    if !plan.visible {
        blank(screen, sx, style);
        return;
    }

    // Left text, then a placeholder column the left arrow overdraws.
    if llen > 0 {
        screen.cursor_move(0);
        screen.put_str(&left, style);
        screen.put_char(' ', style);
        if plan.left_arrow != Arrow::Absent {
            screen.put_char(' ', style);
        }
    } else {
        screen.cursor_move(if plan.left_arrow != Arrow::Absent { 1 } else { 0 });
    }

    // Walk the whole list, emitting only the columns inside the plan.
    let end = plan.start + plan.budget;
    let mut offset = 0;
    for (pos, win) in session.windows().iter().enumerate() {
        let label = session.label(pos);
        let label_style = if win.has_alert() { style.reverse() } else { style };
        for ch in label.chars() {
            let w = UnicodeWidthChar::width(ch).unwrap_or(1).max(1);
            if offset >= plan.start && offset + w <= end {
                screen.put_char(ch, label_style);
            }
            offset += w;
        }
        // Separator reverts to the base style even after an alert label.
        if offset < end {
            if offset >= plan.start {
                screen.put_char(' ', style);
            }
            offset += 1;
        }
    }

    // Fill any remaining budget.
    while offset < plan.budget {
        screen.put_char(' ', style);
        offset += 1;
    }

    if rlen > 0 {
        screen.cursor_move(sx - rlen - 1);
        screen.put_char(' ', style);
        screen.put_str(&right, style);
    }

    if plan.left_arrow != Arrow::Absent {
        let astyle = if plan.left_arrow == Arrow::Alert {
            style.reverse()
        } else {
            style
        };
        screen.cursor_move(if llen > 0 { llen + 1 } else { 0 });
        screen.put_char('<', astyle);
    }
    if plan.right_arrow != Arrow::Absent {
        let astyle = if plan.right_arrow == Arrow::Alert {
            style.reverse()
        } else {
            style
        };
        screen.cursor_move(if rlen > 0 { sx - rlen - 2 } else { sx - 1 });
        screen.put_char('>', astyle);
    }
}

/// Draw a transient message over the status row.
pub(crate) fn redraw_message(message: &str, options: &Options, screen: &mut dyn Screen, sx: usize) {
    if sx == 0 {
        return;
    }
    let style = options.message_style();
    screen.cursor_move(0);
    let mut cols = 0;
    for ch in message.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(1).max(1);
        if cols + w > sx {
            break;
        }
        screen.put_char(ch, style);
        cols += w;
    }
    while cols < sx {
        screen.put_char(' ', style);
        cols += 1;
    }
}

/// Draw the interactive prompt over the status row: label, then the buffer
/// scrolled so the cursor stays on screen, then a reverse-video fake
/// cursor cell.
pub(crate) fn redraw_prompt(prompt: &Prompt, options: &Options, screen: &mut dyn Screen, sx: usize) {
    if sx == 0 {
        return;
    }
    let style = options.message_style();

    let label: String = prompt.label().chars().take(sx).collect();
    let len = label.chars().count();
    screen.cursor_move(0);
    screen.put_str(&label, style);

    let buffer: Vec<char> = prompt.buffer().chars().collect();
    let cursor_pos = prompt.buffer()[..prompt.cursor()].chars().count();

    let left = sx - len;
    let mut offset = 0;
    if left > 0 {
        if cursor_pos >= left {
            // Scroll so the cursor cell lands on the last column.
            offset = cursor_pos + 1 - left;
        }
        if prompt.is_hidden() {
            let n = buffer.len().min(left);
            for _ in 0..n {
                screen.put_char('*', style);
            }
        } else {
            for &ch in buffer.iter().skip(offset).take(left) {
                screen.put_char(ch, style);
            }
        }
        let drawn = buffer.len().saturating_sub(offset).min(left);
        let mut col = len + drawn;
        while col < sx {
            screen.put_char(' ', style);
            col += 1;
        }
    }

    screen.cursor_move(len + cursor_pos - offset);
    let under = buffer.get(cursor_pos).copied().unwrap_or(' ');
    let under = if prompt.is_hidden() && cursor_pos < buffer.len() {
        '*'
    } else {
        under
    };
    screen.put_char(under, style.reverse());
}

fn blank(screen: &mut dyn Screen, sx: usize, style: Style) {
    screen.cursor_move(0);
    for _ in 0..sx {
        screen.put_char(' ', style);
    }
}

/// Cut `text` to at most `limit` display columns.
fn clip(text: &str, limit: usize) -> String {
    let mut out = String::new();
    let mut cols = 0;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(1).max(1);
        if cols + w > limit {
            break;
        }
        out.push(ch);
        cols += w;
    }
    out
}
