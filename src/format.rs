// SPDX-License-Identifier: MIT

//! Expansion of status format strings. A format mixes literal text,
//! strftime directives, and `#`-prefixed directives with an optional
//! decimal width: `##` (literal), `#H` (hostname), `#S` (session name),
//! `#T` (active pane title) and `#(command)` (shell substitution).

use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};

use crate::error::fatal;
use crate::session::Session;

/// Upper bound on expanded output, in display characters. Expansion never
/// exceeds this; directive output that would is dropped whole.
pub(crate) const EXPAND_MAX: usize = 1024;

/// Collaborator for `#(command)` substitution.
///
/// `first_line` runs the command and blocks until it produces a line of
/// output or exits. There is no timeout: a slow command stalls the whole
/// redraw for its lifetime. Callers needing responsiveness must bound or
/// pool such commands at a higher layer.
pub(crate) trait CommandRunner {
    fn first_line(&self, command: &str) -> Option<String>;
}

/// Runs commands through `sh -c` and captures the first stdout line.
pub(crate) struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn first_line(&self, command: &str) -> Option<String> {
        let mut child = Command::new("sh")
            .args(["-c", command])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .ok()?;

        let mut line = String::new();
        if let Some(stdout) = child.stdout.take() {
            let mut reader = BufReader::new(stdout);
            let _ = reader.read_line(&mut line);
        }
        let _ = child.wait();

        if line.ends_with('\n') {
            line.pop();
        }
        if line.is_empty() { None } else { Some(line) }
    }
}

pub(crate) struct Expander<'a> {
    session: &'a Session,
    runner: &'a dyn CommandRunner,
}

impl<'a> Expander<'a> {
    pub(crate) fn new(session: &'a Session, runner: &'a dyn CommandRunner) -> Self {
        Self { session, runner }
    }

    pub(crate) fn expand(&self, fmt: &str, now: DateTime<Local>) -> String {
        let fmt = strftime_pass(fmt, now);
        let chars: Vec<char> = fmt.chars().collect();

        let mut out = String::new();
        let mut len = 0;
        let mut i = 0;
        while i < chars.len() {
            if len >= EXPAND_MAX {
                break;
            }
            let ch = chars[i];
            i += 1;
            if ch != '#' {
                out.push(ch);
                len += 1;
                continue;
            }

            // Optional decimal width; zero or negative means unbounded.
            let mut negative = false;
            if chars.get(i) == Some(&'-') {
                negative = true;
                i += 1;
            }
            let digits_start = i;
            while chars.get(i).is_some_and(char::is_ascii_digit) {
                i += 1;
            }
            let width = if negative || i == digits_start {
                None
            } else {
                chars[digits_start..i]
                    .iter()
                    .collect::<String>()
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
            };

            let Some(&selector) = chars.get(i) else {
                break;
            };
            i += 1;

            match selector {
                '#' => {
                    out.push('#');
                    len += 1;
                }
                '(' => {
                    match chars[i..].iter().position(|c| *c == ')') {
                        Some(close) => {
                            let command: String = chars[i..i + close].iter().collect();
                            i += close + 1;
                            if let Some(output) = self.runner.first_line(&command) {
                                append_capped(&mut out, &mut len, &output, width);
                            }
                        }
                        // Unclosed argument: substitute nothing and keep
                        // scanning what followed the paren.
                        None => {}
                    }
                }
                'H' => append_capped(&mut out, &mut len, &local_hostname(), width),
                'S' => append_capped(&mut out, &mut len, &self.session.name, width),
                'T' => {
                    let title = self
                        .session
                        .current()
                        .map(|win| win.pane_title.as_str())
                        .unwrap_or("");
                    append_capped(&mut out, &mut len, title, width);
                }
                // Unrecognized selectors expand to nothing.
                _ => {}
            }
        }
        out
    }
}

/// Copy `value` into `out`, honoring the directive width and the overall
/// budget. Output that would overflow the budget is dropped rather than
/// truncated mid-directive.
fn append_capped(out: &mut String, len: &mut usize, value: &str, width: Option<usize>) {
    let count = value.chars().count();
    let take = match width {
        Some(w) => count.min(w),
        None => count,
    };
    if *len + take > EXPAND_MAX {
        return;
    }
    out.extend(value.chars().take(take));
    *len += take;
}

/// Substitute strftime directives, leaving everything else (including `#`
/// directives) untouched. A format chrono cannot parse passes through
/// unchanged.
fn strftime_pass(fmt: &str, now: DateTime<Local>) -> String {
    let items: Vec<Item<'_>> = StrftimeItems::new(fmt).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return fmt.to_string();
    }
    let rendered = now.format_with_items(items.into_iter()).to_string();
    rendered.chars().take(EXPAND_MAX).collect()
}

fn local_hostname() -> String {
    match hostname::get() {
        Ok(name) => name.to_string_lossy().into_owned(),
        Err(_) => fatal("hostname lookup failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct FakeRunner(Option<&'static str>);

    impl CommandRunner for FakeRunner {
        fn first_line(&self, _command: &str) -> Option<String> {
            self.0.map(str::to_string)
        }
    }

    fn session() -> Session {
        let mut session = Session::new("main");
        session.add_window("shell");
        session.window_mut(0).unwrap().pane_title = "vim: notes".to_string();
        session
    }

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 8, 30, 13, 45, 0).unwrap()
    }

    #[test]
    fn test_session_and_hostname() {
        let session = session();
        let expander = Expander::new(&session, &FakeRunner(None));
        let host = hostname::get().unwrap().to_string_lossy().into_owned();
        assert_eq!(expander.expand("#S@#H", now()), format!("main@{host}"));
    }

    #[test]
    fn test_literal_hash_and_title() {
        let session = session();
        let expander = Expander::new(&session, &FakeRunner(None));
        assert_eq!(expander.expand("##T is #T", now()), "#T is vim: notes");
    }

    #[test]
    fn test_width_caps_directive_output() {
        let session = session();
        let expander = Expander::new(&session, &FakeRunner(None));
        assert_eq!(expander.expand("#2S", now()), "ma");
        assert_eq!(expander.expand("#0S", now()), "main");
        assert_eq!(expander.expand("#-3S", now()), "main");
        assert_eq!(expander.expand("#8S", now()), "main");
    }

    #[test]
    fn test_command_substitution() {
        let session = session();
        let expander = Expander::new(&session, &FakeRunner(Some("load 0.5")));
        assert_eq!(expander.expand("[#(uptime)]", now()), "[load 0.5]");

        let expander = Expander::new(&session, &FakeRunner(None));
        assert_eq!(expander.expand("[#(nothing)]", now()), "[]");
    }

    #[test]
    fn test_unclosed_command_scans_remainder_literally() {
        let session = session();
        let expander = Expander::new(&session, &FakeRunner(Some("x")));
        assert_eq!(expander.expand("a#(echo hi", now()), "aecho hi");
    }

    #[test]
    fn test_unknown_selector_expands_to_nothing() {
        let session = session();
        let expander = Expander::new(&session, &FakeRunner(None));
        assert_eq!(expander.expand("a#zb", now()), "ab");
    }

    #[test]
    fn test_strftime_pass() {
        let session = session();
        let expander = Expander::new(&session, &FakeRunner(None));
        assert_eq!(expander.expand("%H:%M #S", now()), "13:45 main");
    }

    #[test]
    fn test_literal_output_truncates_at_budget() {
        let session = session();
        let expander = Expander::new(&session, &FakeRunner(None));
        let long = "x".repeat(EXPAND_MAX + 50);
        assert_eq!(expander.expand(&long, now()).len(), EXPAND_MAX);
    }

    #[test]
    fn test_overflowing_directive_is_dropped_whole() {
        let session = session();
        let expander = Expander::new(&session, &FakeRunner(None));
        let fmt = format!("{}#S", "x".repeat(EXPAND_MAX - 2));
        // "main" does not fit in the 2 remaining characters and is not
        // split; the literals remain.
        assert_eq!(expander.expand(&fmt, now()), "x".repeat(EXPAND_MAX - 2));
    }

    #[test]
    fn test_shell_runner_first_line() {
        let runner = ShellRunner;
        assert_eq!(
            runner.first_line("printf 'one\\ntwo\\n'").as_deref(),
            Some("one")
        );
        assert_eq!(runner.first_line("true"), None);
    }
}
