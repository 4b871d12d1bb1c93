use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sumfall_core::*;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::command::{Command, HELP};
use crate::store::JsonFileStore;
use crate::ticker::{TICK_PERIOD, Ticker};

mod command;
mod render;
mod store;
mod ticker;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ModeArg {
    Classic,
    Time,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Classic => Mode::Classic,
            ModeArg::Time => Mode::TimeAttack,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Skip the menu and start in this mode
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    #[arg(long, default_value_t = GameConfig::DEFAULT.size.0)]
    rows: Coord,

    #[arg(long, default_value_t = GameConfig::DEFAULT.size.1)]
    cols: Coord,

    /// Rows filled when a game starts
    #[arg(long, default_value_t = GameConfig::DEFAULT.initial_rows)]
    initial_rows: Coord,

    /// Seconds per countdown in time attack
    #[arg(long, default_value_t = GameConfig::DEFAULT.time_limit_secs)]
    time_limit: u32,

    #[arg(long, default_value = "sumfall-score.json")]
    high_score_file: PathBuf,

    /// Print JSON lines instead of the text board
    #[arg(long)]
    json: bool,
}

/// Everything the event loop reacts to, in arrival order.
#[derive(Debug)]
pub(crate) enum Event {
    Line(String),
    Tick(TickToken),
    InputClosed,
}

async fn read_stdin(tx: UnboundedSender<Event>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if tx.send(Event::Line(line)).is_err() {
                    break;
                }
            }
            Ok(None) => {
                let _ = tx.send(Event::InputClosed);
                break;
            }
            Err(err) => {
                log::error!("Could not read stdin: {}", err);
                let _ = tx.send(Event::InputClosed);
                break;
            }
        }
    }
}

struct App {
    controller: GameController<RandomValueGenerator, JsonFileStore>,
    ticker: Option<Ticker>,
    tx: UnboundedSender<Event>,
    json: bool,
}

impl App {
    async fn run(mut self, mut rx: UnboundedReceiver<Event>) -> Result<()> {
        while let Some(event) = rx.recv().await {
            let keep_going = match event {
                Event::Line(line) => self.handle_line(&line)?,
                Event::Tick(token) => {
                    self.handle_tick(token)?;
                    true
                }
                Event::InputClosed => false,
            };
            ticker::sync(
                &mut self.ticker,
                self.controller.tick_token(),
                &self.tx,
                TICK_PERIOD,
            );
            if !keep_going {
                break;
            }
        }
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> Result<bool> {
        if line.trim().is_empty() {
            return Ok(true);
        }
        match line.parse::<Command>() {
            Ok(command) => self.handle(command),
            Err(err) => {
                println!("{}", err);
                Ok(true)
            }
        }
    }

    fn handle(&mut self, command: Command) -> Result<bool> {
        log::debug!("Command: {:?}", command);
        let changed = match command {
            Command::Start(mode) => self.controller.start(mode).has_update(),
            Command::Tap(coords) => self.controller.activate(coords).has_update(),
            Command::Pause => self.controller.pause().has_update(),
            Command::Resume => self.controller.resume().has_update(),
            Command::Quit => self.controller.quit().has_update(),
            Command::Restart => self.controller.restart().has_update(),
            Command::Hint => {
                let hint = self.controller.hint();
                println!("{}", render::hint(hint.as_ref()));
                return Ok(true);
            }
            Command::Show => true,
            Command::Help => {
                println!("{}", HELP);
                return Ok(true);
            }
            Command::Exit => return Ok(false),
        };
        if changed {
            self.publish()?;
        } else {
            println!("nothing happens ({:?})", self.controller.state());
        }
        Ok(true)
    }

    fn handle_tick(&mut self, token: TickToken) -> Result<()> {
        match self.controller.tick(token) {
            TickOutcome::Ignored => Ok(()),
            TickOutcome::Counting { time_left } if !self.json => {
                if time_left <= 5 {
                    println!("{}s left", time_left);
                }
                Ok(())
            }
            TickOutcome::Counting { .. } | TickOutcome::RowInjected | TickOutcome::GameOver => {
                self.publish()
            }
        }
    }

    /// Prints pending notifications, then the current state.
    fn publish(&mut self) -> Result<()> {
        let events = self.controller.drain_events();
        let snapshot = self.controller.snapshot();
        if self.json {
            for event in &events {
                println!("{}", serde_json::json!({ "event": event }));
            }
            let line = serde_json::to_string(&serde_json::json!({ "snapshot": snapshot }))
                .context("serialize snapshot")?;
            println!("{}", line);
        } else {
            for event in &events {
                println!("{}", render::event(event));
            }
            println!("{}", render::frame(&snapshot));
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let config = GameConfig::new((args.rows, args.cols), args.initial_rows)
        .with_time_limit(args.time_limit);
    let store = JsonFileStore::new(&args.high_score_file);
    let controller = GameController::new(config, RandomValueGenerator::new(seed), store)
        .context("invalid game settings")?;

    // Stdin is read on the blocking pool, so the runtime is shut down without
    // waiting for the pending read once the loop ends.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("build runtime")?;

    let result = runtime.block_on(async {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(read_stdin(tx.clone()));

        let mut app = App {
            controller,
            ticker: None,
            tx,
            json: args.json,
        };
        match args.mode {
            Some(mode) => {
                app.handle(Command::Start(mode.into()))?;
                ticker::sync(
                    &mut app.ticker,
                    app.controller.tick_token(),
                    &app.tx,
                    TICK_PERIOD,
                );
            }
            None => app.publish()?,
        }
        app.run(rx).await
    });

    runtime.shutdown_background();
    result
}
