// SPDX-License-Identifier: MIT

//! Session and window state consumed by the status composer. Window
//! lifecycle proper (creation policy, panes, resizing) lives elsewhere;
//! this is the view the status line renders.

use crate::screen::display_width;

#[derive(Debug, Clone)]
pub(crate) struct Window {
    pub index: usize,
    pub name: String,
    /// Title reported by the window's active pane, substituted by `#T`.
    pub pane_title: String,
    pub activity: bool,
    pub bell: bool,
}

impl Window {
    pub(crate) fn new(index: usize, name: &str) -> Self {
        Self {
            index,
            name: name.to_string(),
            pane_title: name.to_string(),
            activity: false,
            bell: false,
        }
    }

    pub(crate) fn has_alert(&self) -> bool {
        self.activity || self.bell
    }
}

#[derive(Debug)]
pub(crate) struct Session {
    pub name: String,
    windows: Vec<Window>,
    current: usize,
    last: Option<usize>,
}

impl Session {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            windows: Vec::new(),
            current: 0,
            last: None,
        }
    }

    pub(crate) fn add_window(&mut self, name: &str) -> usize {
        let index = self.windows.last().map_or(0, |win| win.index + 1);
        self.windows.push(Window::new(index, name));
        index
    }

    pub(crate) fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub(crate) fn window_mut(&mut self, pos: usize) -> Option<&mut Window> {
        self.windows.get_mut(pos)
    }

    pub(crate) fn current_index(&self) -> usize {
        self.current
    }

    pub(crate) fn current(&self) -> Option<&Window> {
        self.windows.get(self.current)
    }

    /// Make the window at `pos` current. Viewing a window acknowledges its
    /// pending alerts.
    pub(crate) fn select(&mut self, pos: usize) {
        if pos >= self.windows.len() || pos == self.current {
            return;
        }
        self.last = Some(self.current);
        self.current = pos;
        let win = &mut self.windows[pos];
        win.activity = false;
        win.bell = false;
    }

    pub(crate) fn next_window(&mut self) {
        if !self.windows.is_empty() {
            self.select((self.current + 1) % self.windows.len());
        }
    }

    pub(crate) fn previous_window(&mut self) {
        if !self.windows.is_empty() {
            let pos = self.current.checked_sub(1).unwrap_or(self.windows.len() - 1);
            self.select(pos);
        }
    }

    /// Flag character rendered after a window's name: alerts win over the
    /// current and last markers.
    pub(crate) fn flag(&self, pos: usize) -> char {
        let Some(win) = self.windows.get(pos) else {
            return ' ';
        };
        let mut flag = ' ';
        if Some(pos) == self.last {
            flag = '-';
        }
        if pos == self.current {
            flag = '*';
        }
        if win.activity {
            flag = '#';
        }
        if win.bell {
            flag = '!';
        }
        flag
    }

    /// Label rendered in the window list: `index:name` plus the flag.
    pub(crate) fn label(&self, pos: usize) -> String {
        match self.windows.get(pos) {
            Some(win) => format!("{}:{}{}", win.index, win.name, self.flag(pos)),
            None => String::new(),
        }
    }

    pub(crate) fn label_width(&self, pos: usize) -> usize {
        display_width(&self.label(pos))
    }
}
