// SPDX-License-Identifier: MIT

//! Line editor for the status-row prompt: a label, an edit buffer with a
//! cursor, history browsing and word completion. The editor owns no
//! terminal state; it mutates the buffer and reports whether the row needs
//! redrawing, and the composer in `status` draws it.

pub(crate) mod complete;
pub(crate) mod history;

use complete::Namespace;
use history::HistoryRing;

/// What the submit callback wants done with the prompt afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PromptAction {
    Close,
    KeepOpen,
}

/// Editing keys, already decoded from terminal events by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PromptKey {
    Left,
    Right,
    LineStart,
    LineEnd,
    Complete,
    Backspace,
    Delete,
    HistoryUp,
    HistoryDown,
    Enter,
    Escape,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyOutcome {
    /// Nothing changed; no redraw needed.
    Unchanged,
    Redraw,
    /// The prompt is done; the owner should drop it.
    Close,
}

/// Called on submit with `Some(line)`, or `None` on cancel.
pub(crate) type PromptCallback = Box<dyn FnMut(Option<&str>) -> PromptAction>;

pub(crate) struct Prompt {
    label: String,
    buffer: String,
    /// Byte offset into `buffer`, always on a char boundary.
    cursor: usize,
    hidden: bool,
    /// Steps back into history while browsing; 0 is the newest entry.
    hindex: usize,
    callback: PromptCallback,
}

impl Prompt {
    pub(crate) fn new(label: &str, hidden: bool, callback: PromptCallback) -> Self {
        Self {
            label: label.to_string(),
            buffer: String::new(),
            cursor: 0,
            hidden,
            hindex: 0,
            callback,
        }
    }

    pub(crate) fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn buffer(&self) -> &str {
        &self.buffer
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn is_hidden(&self) -> bool {
        self.hidden
    }

    #[cfg(test)]
    pub(crate) fn set_buffer(&mut self, buffer: &str, cursor: usize) {
        self.buffer = buffer.to_string();
        self.cursor = cursor;
    }

    pub(crate) fn handle_key(
        &mut self,
        key: PromptKey,
        history: &mut HistoryRing,
        names: &dyn Namespace,
    ) -> KeyOutcome {
        match key {
            PromptKey::Left => {
                if self.cursor == 0 {
                    return KeyOutcome::Unchanged;
                }
                self.cursor = self.prev_boundary();
                KeyOutcome::Redraw
            }
            PromptKey::Right => {
                if self.cursor == self.buffer.len() {
                    return KeyOutcome::Unchanged;
                }
                self.cursor = self.next_boundary();
                KeyOutcome::Redraw
            }
            PromptKey::LineStart => {
                if self.cursor == 0 {
                    return KeyOutcome::Unchanged;
                }
                self.cursor = 0;
                KeyOutcome::Redraw
            }
            PromptKey::LineEnd => {
                if self.cursor == self.buffer.len() {
                    return KeyOutcome::Unchanged;
                }
                self.cursor = self.buffer.len();
                KeyOutcome::Redraw
            }
            PromptKey::Backspace => {
                if self.cursor == 0 {
                    return KeyOutcome::Unchanged;
                }
                let at = self.prev_boundary();
                self.buffer.replace_range(at..self.cursor, "");
                self.cursor = at;
                KeyOutcome::Redraw
            }
            PromptKey::Delete => {
                if self.cursor == self.buffer.len() {
                    return KeyOutcome::Unchanged;
                }
                let end = self.next_boundary();
                self.buffer.replace_range(self.cursor..end, "");
                KeyOutcome::Redraw
            }
            PromptKey::HistoryUp => {
                if history.is_empty() {
                    return KeyOutcome::Unchanged;
                }
                self.hindex = self.hindex.min(history.len() - 1);
                let pos = history.len() - 1 - self.hindex;
                if let Some(line) = history.get(pos) {
                    self.buffer = line.to_string();
                }
                if self.hindex != history.len() - 1 {
                    self.hindex += 1;
                }
                self.cursor = self.buffer.len();
                KeyOutcome::Redraw
            }
            PromptKey::HistoryDown => {
                if self.hindex != 0 {
                    self.hindex -= 1;
                    let pos = history.len() - 1 - self.hindex;
                    if let Some(line) = history.get(pos) {
                        self.buffer = line.to_string();
                    }
                } else {
                    if self.buffer.is_empty() {
                        return KeyOutcome::Unchanged;
                    }
                    self.buffer.clear();
                }
                self.cursor = self.buffer.len();
                KeyOutcome::Redraw
            }
            PromptKey::Complete => self.complete_word(names),
            PromptKey::Enter => {
                if self.buffer.is_empty() {
                    return self.finish(None);
                }
                history.add(&self.buffer);
                let line = self.buffer.clone();
                self.finish(Some(&line))
            }
            PromptKey::Escape => self.finish(None),
            PromptKey::Char(ch) => {
                if (ch as u32) < 32 {
                    return KeyOutcome::Unchanged;
                }
                self.buffer.insert(self.cursor, ch);
                self.cursor += ch.len_utf8();
                KeyOutcome::Redraw
            }
        }
    }

    fn finish(&mut self, line: Option<&str>) -> KeyOutcome {
        match (self.callback)(line) {
            PromptAction::Close => KeyOutcome::Close,
            PromptAction::KeepOpen => KeyOutcome::Redraw,
        }
    }

    /// Complete the word around the cursor. The word runs between the
    /// nearest spaces; a cursor sitting in trailing spaces finds no word
    /// and nothing happens. Words longer than 64 bytes are left alone.
    fn complete_word(&mut self, names: &dyn Namespace) -> KeyOutcome {
        if self.buffer.is_empty() {
            return KeyOutcome::Unchanged;
        }
        let chars: Vec<char> = self.buffer.chars().collect();
        let mut idx = self.buffer[..self.cursor].chars().count() as isize;
        if idx != 0 {
            idx -= 1;
        }

        let mut first = idx;
        while first > 0 && chars[first as usize] != ' ' {
            first -= 1;
        }
        while (first as usize) < chars.len() && chars[first as usize] == ' ' {
            first += 1;
        }
        let mut last = idx;
        while (last as usize) < chars.len() && chars[last as usize] != ' ' {
            last += 1;
        }
        while last >= 0 && (last as usize) < chars.len() && chars[last as usize] == ' ' {
            last -= 1;
        }
        if (last as usize) < chars.len() {
            last += 1;
        }
        if last <= first {
            return KeyOutcome::Unchanged;
        }

        let word: String = chars[first as usize..last as usize].iter().collect();
        if word.len() > 64 {
            return KeyOutcome::Unchanged;
        }
        let Some(completion) = complete::complete(&word, names) else {
            return KeyOutcome::Unchanged;
        };

        let first_byte = byte_offset(&self.buffer, first as usize);
        let last_byte = byte_offset(&self.buffer, last as usize);
        self.buffer.replace_range(first_byte..last_byte, &completion);
        self.cursor = first_byte + completion.len();
        KeyOutcome::Redraw
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .last()
            .map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map_or(self.cursor, |ch| self.cursor + ch.len_utf8())
    }
}

fn byte_offset(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}
