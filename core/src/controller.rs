use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Menu -> Playing
/// - Playing -> Paused
/// - Playing -> GameOver
/// - Paused -> Playing
/// - Playing | Paused -> Menu
/// - GameOver -> Menu
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Waiting for a mode to be picked
    Menu,
    /// Game running, the only state accepting moves
    Playing,
    /// Game frozen, including its countdown
    Paused,
    /// Board overflowed, score is frozen
    GameOver,
}

impl GameState {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Indicates a game is loaded, running or not
    pub const fn has_game(self) -> bool {
        matches!(self, Self::Playing | Self::Paused | Self::GameOver)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Menu
    }
}

/// Fire-and-forget notifications for the renderer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Celebrate { cleared: CellCount },
    Overflow,
    RowInjected,
    TimeReset,
    NewHighScore(Score),
    GameOver { score: Score },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControlOutcome {
    NoChange,
    Changed(GameState),
}

impl ControlOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed(_))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Ignored,
    Counting { time_left: u32 },
    RowInjected,
    GameOver,
}

#[derive(Clone, Debug, PartialEq)]
struct Session {
    engine: PlayEngine,
    clock: ModeClock,
}

/// Drives one game at a time through the menu, play, pause and game over
/// states.
///
/// Every method runs to completion and out-of-state calls are no-ops.
#[derive(Debug)]
pub struct GameController<G, S> {
    config: GameConfig,
    generator: G,
    store: S,
    state: GameState,
    session: Option<Session>,
    high_score: Score,
    events: Vec<GameEvent>,
}

impl<G: ValueGenerator, S: HighScoreStore> GameController<G, S> {
    pub fn new(config: GameConfig, generator: G, mut store: S) -> Result<Self> {
        config.validate()?;
        let high_score = store.load();
        log::debug!("Loaded high score {}", high_score);
        Ok(Self {
            config,
            generator,
            store,
            state: GameState::Menu,
            session: None,
            high_score,
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn mode(&self) -> Option<Mode> {
        self.session.as_ref().map(|session| session.clock.mode())
    }

    pub fn engine(&self) -> Option<&PlayEngine> {
        self.session.as_ref().map(|session| &session.engine)
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.engine().map(PlayEngine::grid)
    }

    pub fn target(&self) -> Option<Sum> {
        self.engine().map(PlayEngine::target)
    }

    pub fn score(&self) -> Score {
        self.engine().map_or(0, PlayEngine::score)
    }

    pub fn high_score(&self) -> Score {
        self.high_score
    }

    pub fn time_left(&self) -> Option<u32> {
        self.session.as_ref().and_then(|session| session.clock.time_left())
    }

    /// Token of the tick schedule the host should be running, if any.
    pub fn tick_token(&self) -> Option<TickToken> {
        if !self.state.is_playing() {
            return None;
        }
        self.session.as_ref().and_then(|session| session.clock.token())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_controller(self)
    }

    /// Takes the events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        core::mem::take(&mut self.events)
    }

    pub fn hint(&self) -> Option<Hint> {
        if !self.state.is_playing() {
            return None;
        }
        self.engine().and_then(PlayEngine::hint)
    }

    pub fn start(&mut self, mode: Mode) -> ControlOutcome {
        if self.state != GameState::Menu {
            return ControlOutcome::NoChange;
        }

        let engine = match PlayEngine::new(self.config, &mut self.generator) {
            Ok(engine) => engine,
            Err(err) => {
                debug_assert!(false, "config was validated on creation: {err}");
                log::error!("Could not start game: {}", err);
                return ControlOutcome::NoChange;
            }
        };
        let mut clock = ModeClock::new(mode, self.config.time_limit_secs);
        clock.arm();

        log::debug!("Starting {:?} game", mode);
        self.session = Some(Session { engine, clock });
        self.change_state(GameState::Playing)
    }

    /// Activates the cell at `coords` as the player's move.
    pub fn activate(&mut self, coords: Coord2) -> ToggleOutcome {
        if !self.state.is_playing() {
            return ToggleOutcome::NoChange;
        }
        let Some(session) = self.session.as_mut() else {
            return ToggleOutcome::NoChange;
        };

        let outcome = session.engine.toggle_cell(coords, &mut self.generator);
        match outcome {
            ToggleOutcome::Matched { cleared, .. } => {
                self.events.push(GameEvent::Celebrate { cleared });
                self.record_score();
                self.after_match();
            }
            ToggleOutcome::Overflow { .. } => self.events.push(GameEvent::Overflow),
            ToggleOutcome::Pending { .. } | ToggleOutcome::NoChange => {}
        }
        outcome
    }

    /// One elapsed second of the countdown scheduled under `token`.
    pub fn tick(&mut self, token: TickToken) -> TickOutcome {
        if !self.state.is_playing() {
            log::trace!("Ignoring tick {:?} outside of play", token);
            return TickOutcome::Ignored;
        }
        let Some(session) = self.session.as_mut() else {
            return TickOutcome::Ignored;
        };

        match session.clock.tick(token) {
            ClockTick::Ignored => TickOutcome::Ignored,
            ClockTick::Counting { time_left } => TickOutcome::Counting { time_left },
            ClockTick::Expired => {
                log::debug!("Countdown expired");
                if self.inject_row() {
                    TickOutcome::RowInjected
                } else {
                    TickOutcome::GameOver
                }
            }
        }
    }

    pub fn pause(&mut self) -> ControlOutcome {
        if self.state != GameState::Playing {
            return ControlOutcome::NoChange;
        }
        if let Some(session) = self.session.as_mut() {
            session.clock.disarm();
        }
        self.change_state(GameState::Paused)
    }

    pub fn resume(&mut self) -> ControlOutcome {
        if self.state != GameState::Paused {
            return ControlOutcome::NoChange;
        }
        if let Some(session) = self.session.as_mut() {
            session.clock.arm();
        }
        self.change_state(GameState::Playing)
    }

    /// Abandons the running game.
    pub fn quit(&mut self) -> ControlOutcome {
        if !matches!(self.state, GameState::Playing | GameState::Paused) {
            return ControlOutcome::NoChange;
        }
        log::debug!("Game abandoned at score {}", self.score());
        self.session = None;
        self.change_state(GameState::Menu)
    }

    /// Leaves the game over screen for the menu.
    pub fn restart(&mut self) -> ControlOutcome {
        if self.state != GameState::GameOver {
            return ControlOutcome::NoChange;
        }
        self.session = None;
        self.change_state(GameState::Menu)
    }

    fn after_match(&mut self) {
        let Some(mode) = self.mode() else {
            return;
        };
        if mode.injects_on_match() {
            self.inject_row();
        } else if let Some(session) = self.session.as_mut() {
            session.clock.reset();
            self.events.push(GameEvent::TimeReset);
        }
    }

    /// Returns whether the game goes on.
    fn inject_row(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        match session.engine.inject_row(&mut self.generator) {
            InjectOutcome::Injected => {
                self.events.push(GameEvent::RowInjected);
                true
            }
            InjectOutcome::Lost => {
                self.game_over();
                false
            }
        }
    }

    fn game_over(&mut self) {
        let score = self.score();
        if let Some(session) = self.session.as_mut() {
            session.clock.disarm();
        }
        log::debug!("Game over with score {}", score);
        self.events.push(GameEvent::GameOver { score });
        self.change_state(GameState::GameOver);
    }

    fn record_score(&mut self) {
        let score = self.score();
        if score > self.high_score {
            self.high_score = score;
            self.store.save(score);
            self.events.push(GameEvent::NewHighScore(score));
        }
    }

    fn change_state(&mut self, state: GameState) -> ControlOutcome {
        log::debug!("{:?} -> {:?}", self.state, state);
        self.state = state;
        ControlOutcome::Changed(state)
    }
}
