use std::time::Duration;

use sumfall_core::TickToken;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::Event;

pub(crate) const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task posting one tick per period into the mailbox.
///
/// Dropping the ticker cancels the task.
#[derive(Debug)]
pub(crate) struct Ticker {
    token: TickToken,
    handle: JoinHandle<()>,
}

impl Ticker {
    pub(crate) fn spawn(token: TickToken, tx: UnboundedSender<Event>, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(Event::Tick(token)).is_err() {
                    break;
                }
            }
        });
        log::trace!("Ticker started for {:?}", token);
        Self { token, handle }
    }

    pub(crate) fn token(&self) -> TickToken {
        self.token
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        log::trace!("Ticker stopped for {:?}", self.token);
        self.handle.abort();
    }
}

/// Brings the running ticker in line with the schedule the game asks for.
pub(crate) fn sync(
    ticker: &mut Option<Ticker>,
    wanted: Option<TickToken>,
    tx: &UnboundedSender<Event>,
    period: Duration,
) {
    if ticker.as_ref().map(Ticker::token) == wanted {
        return;
    }
    *ticker = wanted.map(|token| Ticker::spawn(token, tx.clone(), period));
}
