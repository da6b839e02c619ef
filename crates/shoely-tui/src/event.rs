//! Terminal input merged with the tick and render clocks into one channel.

use std::time::Duration;

use crossterm::event::{Event as TerminalEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::warn;

#[derive(Debug, PartialEq)]
pub enum Event {
    Key(KeyEvent),
    /// New size as (cols, rows).
    Resize(u16, u16),
    /// Drives toast expiry.
    Tick,
    Render,
}

impl Event {
    /// `None` for input the app has no use for (key releases, focus, paste).
    fn from_terminal(event: TerminalEvent) -> Option<Self> {
        match event {
            TerminalEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Self::Key(key)),
            TerminalEvent::Resize(cols, rows) => Some(Self::Resize(cols, rows)),
            _ => None,
        }
    }
}

/// Clock periods for [`Event::Tick`] and [`Event::Render`].
#[derive(Debug, Clone, Copy)]
pub struct Rates {
    pub tick: Duration,
    pub render: Duration,
}

impl Default for Rates {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(250),
            render: Duration::from_millis(33),
        }
    }
}

/// Background reader; stops when dropped.
pub struct EventReader {
    rx: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl EventReader {
    pub fn spawn(rates: Rates) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        tokio::spawn(pump(tx, rates, cancel.clone()));
        Self { rx, cancel }
    }

    /// `None` once the reader has stopped.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

impl Drop for EventReader {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn pump(tx: mpsc::UnboundedSender<Event>, rates: Rates, cancel: CancellationToken) {
    let mut input = EventStream::new();
    let mut tick = interval(rates.tick);
    let mut render = interval(rates.render);
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    render.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let event = tokio::select! {
            () = cancel.cancelled() => return,
            _ = tick.tick() => Event::Tick,
            _ = render.tick() => Event::Render,
            next = input.next() => match next {
                Some(Ok(raw)) => {
                    let Some(event) = Event::from_terminal(raw) else {
                        continue;
                    };
                    event
                }
                Some(Err(err)) => {
                    warn!(error = %err, "terminal input error");
                    continue;
                }
                None => return,
            },
        };

        if tx.send(event).is_err() {
            return;
        }
    }
}
