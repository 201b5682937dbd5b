use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use vidsum_core::{update, AppState, Msg};
use vidsum_logging::{vidsum_info, vidsum_warn};

use super::cli::Cli;
use super::config::AppConfig;
use super::effects::EffectRunner;
use super::logging;
use super::ui::commands::{parse_command, Command};
use super::ui::constants::{HELP_TEXT, PROMPT};
use super::ui::render::render;

/// Everything the main loop reacts to: engine completions and user input.
pub(crate) enum AppEvent {
    Engine(Msg),
    User(Command),
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::resolve(&cli, |key| std::env::var(key).ok())
        .context("loading configuration")?;
    logging::initialize(config.log);
    vidsum_info!(
        "vidsum starting: api={}{} output_dir={}",
        config.api_url,
        config.api_prefix,
        config.output_dir.display()
    );

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(&config, event_tx.clone())?;
    runner.check_health();
    spawn_input_reader(event_tx);

    let mut state = AppState::new();
    if let Some(url) = cli.url {
        state = dispatch(state, &runner, Msg::InputChanged(url));
        state = dispatch(state, &runner, Msg::SubmitClicked);
    }
    redraw(&mut state)?;

    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Engine(msg) => state = dispatch(state, &runner, msg),
            AppEvent::User(Command::Dispatch(msgs)) => {
                for msg in msgs {
                    state = dispatch(state, &runner, msg);
                }
            }
            AppEvent::User(Command::Help) => println!("{HELP_TEXT}"),
            AppEvent::User(Command::Unknown(line)) => {
                println!("Unknown command: {line} (try 'help')");
            }
            AppEvent::User(Command::Quit) => break,
        }
        redraw(&mut state)?;
    }

    vidsum_info!("vidsum exiting");
    Ok(())
}

fn dispatch(state: AppState, runner: &EffectRunner, msg: Msg) -> AppState {
    let (state, effects) = update(state, msg);
    runner.run(effects);
    state
}

fn redraw(state: &mut AppState) -> io::Result<()> {
    if !state.consume_dirty() {
        return Ok(());
    }
    let mut stdout = io::stdout().lock();
    write!(stdout, "\n{}{}", render(&state.view()), PROMPT)?;
    stdout.flush()
}

fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    vidsum_warn!("Reading stdin failed: {}", err);
                    break;
                }
            };
            let command = parse_command(&line, chrono::Utc::now().timestamp_millis());
            if tx.send(AppEvent::User(command)).is_err() {
                return;
            }
        }
        let _ = tx.send(AppEvent::User(Command::Quit));
    });
}
