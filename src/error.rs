// SPDX-License-Identifier: MIT

use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum Error {
    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub(crate) type Result<T> = std::result::Result<T, Error>;

/// Abort the process for unrecoverable conditions, such as hostname
/// resolution failing. The status line cannot render meaningfully after
/// these, so nothing is propagated to callers.
pub(crate) fn fatal(msg: &str) -> ! {
    eprintln!("muxline: fatal: {msg}");
    std::process::exit(1);
}
