// SPDX-License-Identifier: MIT

//! Prefix completion of command and option names for the prompt.

/// Name provider the completer queries. Sources are enumerated in a fixed
/// order (commands, then session options, then window options) so results
/// are deterministic.
pub(crate) trait Namespace {
    fn commands(&self) -> &[&str];
    fn session_options(&self) -> &[&str];
    fn window_options(&self) -> &[&str];
}

/// Complete `word` against the namespace.
///
/// A unique match comes back with a trailing space, ready to keep typing;
/// several matches come back as their longest common prefix with no
/// separator, leaving the user to disambiguate.
pub(crate) fn complete(word: &str, names: &dyn Namespace) -> Option<String> {
    if word.is_empty() {
        return None;
    }

    let mut matches: Vec<&str> = Vec::new();
    for name in names
        .commands()
        .iter()
        .chain(names.session_options().iter())
        .chain(names.window_options().iter())
    {
        if name.starts_with(word) {
            matches.push(name);
        }
    }

    match matches.as_slice() {
        [] => None,
        [only] => Some(format!("{only} ")),
        _ => Some(common_prefix(&matches)),
    }
}

fn common_prefix(matches: &[&str]) -> String {
    let mut prefix = matches[0].to_string();
    for name in &matches[1..] {
        let common = prefix
            .chars()
            .zip(name.chars())
            .take_while(|(a, b)| a == b)
            .count();
        let cut = prefix
            .char_indices()
            .nth(common)
            .map_or(prefix.len(), |(idx, _)| idx);
        prefix.truncate(cut);
    }
    prefix
}

/// The built-in name tables.
pub(crate) struct BuiltinNamespace;

const COMMANDS: &[&str] = &[
    "attach-session",
    "bind-key",
    "copy-mode",
    "detach-client",
    "has-session",
    "kill-server",
    "kill-session",
    "kill-window",
    "last-window",
    "link-window",
    "list-clients",
    "list-keys",
    "list-sessions",
    "list-windows",
    "new-session",
    "new-window",
    "next-window",
    "paste-buffer",
    "previous-window",
    "refresh-client",
    "rename-session",
    "rename-window",
    "select-window",
    "send-keys",
    "send-prefix",
    "set-option",
    "set-window-option",
    "show-options",
    "source-file",
    "split-window",
    "start-server",
    "swap-window",
    "switch-client",
    "unbind-key",
    "unlink-window",
];

const SESSION_OPTIONS: &[&str] = &[
    "bell-action",
    "buffer-limit",
    "default-command",
    "display-time",
    "history-limit",
    "message-bg",
    "message-fg",
    "prefix",
    "status",
    "status-bg",
    "status-fg",
    "status-interval",
    "status-left",
    "status-left-length",
    "status-right",
    "status-right-length",
];

const WINDOW_OPTIONS: &[&str] = &[
    "aggressive-resize",
    "clock-mode-colour",
    "clock-mode-style",
    "force-height",
    "force-width",
    "mode-bg",
    "mode-fg",
    "monitor-activity",
    "monitor-bell",
];

impl Namespace for BuiltinNamespace {
    fn commands(&self) -> &[&str] {
        COMMANDS
    }

    fn session_options(&self) -> &[&str] {
        SESSION_OPTIONS
    }

    fn window_options(&self) -> &[&str] {
        WINDOW_OPTIONS
    }
}
