// SPDX-License-Identifier: MIT

mod client;
mod error;
mod format;
mod options;
mod prompt;
mod screen;
mod session;
mod status;

use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::client::Client;
use crate::format::ShellRunner;
use crate::options::Options;
use crate::session::Session;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "muxline")]
#[command(about = "Status line and command prompt for the terminal")]
#[command(version)]
#[command(styles = STYLES, color = clap::ColorChoice::Always)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    #[arg(short, long, default_value = "main", help = "Session name")]
    session: String,

    #[arg(
        short = 'w',
        long = "window",
        help = "Add a window by name (repeatable)"
    )]
    windows: Vec<String>,

    #[arg(long, help = "Config file path (default: ~/.config/muxline/config.toml)")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose the status row once and print it to stdout
    Show {
        #[arg(long, default_value_t = 80, help = "Row width in columns")]
        width: usize,

        #[arg(long, help = "Window to make current before composing")]
        current: Option<usize>,
    },
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(args) {
        eprintln!("muxline: {err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> error::Result<()> {
    let options = match &args.config {
        Some(path) => Options::load_from(path)?,
        None => Options::load()?,
    };

    let mut session = Session::new(&args.session);
    if args.windows.is_empty() {
        session.add_window("shell");
    } else {
        for name in &args.windows {
            session.add_window(name);
        }
    }

    match args.command {
        Some(Command::Show { width, current }) => {
            if let Some(pos) = current {
                session.select(pos);
            }
            let client = Client::new(session, options);
            let grid = client.compose_row(&ShellRunner, width);
            println!("{}", grid.contents());
            Ok(())
        }
        None => client::run(Client::new(session, options), &ShellRunner),
    }
}
