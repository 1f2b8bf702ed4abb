//! Event delivery for the refresh loop.
//!
//! A dedicated thread polls the terminal with the tick period as timeout
//! and forwards events over a channel: a timed-out poll becomes a `Tick`.
//! The thread never touches application state, so configuration mutation
//! and layout reads stay serialized on the main thread.

use std::sync::mpsc::{self, Receiver, RecvError, Sender};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};

/// Refresh loop events.
#[derive(Debug)]
pub enum Event {
    /// Timer tick: take a fresh snapshot and redraw.
    Tick,
    /// Keyboard input.
    Key(KeyEvent),
    /// Terminal resize to `(width, height)`.
    Resize(u16, u16),
}

/// Polls terminal events in a separate thread.
pub struct EventHandler {
    rx: Receiver<Event>,
    /// Kept alive to prevent channel closure.
    _tx: Sender<Event>,
}

impl EventHandler {
    /// Starts the polling thread with the given tick period.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();

        thread::spawn(move || {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    if let Ok(evt) = event::read() {
                        let event = match evt {
                            CrosstermEvent::Key(key) => Event::Key(key),
                            CrosstermEvent::Resize(w, h) => Event::Resize(w, h),
                            _ => continue,
                        };
                        if event_tx.send(event).is_err() {
                            break;
                        }
                    }
                } else if event_tx.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Receives the next event, blocking until one is available.
    pub fn next(&self) -> Result<Event, RecvError> {
        self.rx.recv()
    }
}
