mod audio;
mod capture;
mod chrome;
mod cli;
mod config;
mod controls;
mod gauge;
mod page;
mod playlist;
mod progress;
mod seek;
mod shell;
mod theme;
mod transport;

use std::{fs, io, time::Duration};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
};
use ratatui::DefaultTerminal;

use crate::{
    cli::Args,
    config::{config_dir, Config},
    shell::{Flow, Shell},
};

fn init_logging(args: &Args, dir: &std::path::Path) -> anyhow::Result<()> {
    // stdout belongs to the terminal UI, so logs always go to a file
    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| dir.join("deck-player.log"));
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let file = fs::File::create(&log_path)
        .with_context(|| format!("creating log file {}", log_path.display()))?;

    let default_level = match args.verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .filter_module("symphonia", log::LevelFilter::Warn)
        .format_timestamp_millis()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let dir = config_dir(args.config_dir.as_deref());
    init_logging(&args, &dir)?;

    if let Some(file) = &args.file {
        if !file.exists() {
            anyhow::bail!("File not found: {}", file.display());
        }
    }

    let config = match Config::load(&dir) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("ignoring config in {}: {e}", dir.display());
            Config::default()
        }
    };
    log::info!("starting with {config:?}");

    let mut shell = Shell::new(config, dir, args.server.clone(), args.file.clone(), args.library());
    shell.open_player();

    let mut terminal = ratatui::init();
    let result = execute!(io::stdout(), EnableMouseCapture)
        .context("enabling mouse capture")
        .and_then(|()| run(&mut terminal, &mut shell));
    shell.close_player();
    if let Err(e) = execute!(io::stdout(), DisableMouseCapture) {
        log::warn!("cannot disable mouse capture: {e}");
    }
    ratatui::restore();
    result
}

fn run(terminal: &mut DefaultTerminal, shell: &mut Shell) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| shell.draw(f))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if shell.handle_key(key.code) == Flow::Quit {
                        break;
                    }
                }
                Event::Mouse(mouse) => shell.handle_mouse(mouse),
                _ => {}
            }
        }

        shell.tick();
    }
    Ok(())
}
