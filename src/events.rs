use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::config::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Input(String),
    Tick,
    InputClosed,
}

/// A single recurring timer running on its own thread. Cancelling (or
/// dropping) the handle stops the thread and waits for it to exit.
pub struct Ticker {
    stop: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Ticker {
    /// Calls `on_tick` every `interval` until cancelled or until `on_tick`
    /// returns `false`.
    pub fn start<F>(interval: Duration, mut on_tick: F) -> Ticker
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::spawn(move || loop {
            match stop_rx.recv_timeout(interval) {
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    if !on_tick() {
                        return;
                    }
                }
                _ => return,
            }
        });

        Ticker {
            stop: Some(stop_tx),
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn cancel(&mut self) {
        // Dropping the sender disconnects the channel and wakes the thread.
        self.stop.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("Clock ticker thread panicked");
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Merges line input and clock ticks into one event stream.
pub struct Dispatcher {
    rx: mpsc::Receiver<Event>,
    tx: mpsc::Sender<Event>,
    tick_rate: Duration,
    ticker: Option<Ticker>,
    _input_handle: Option<thread::JoinHandle<()>>,
}

impl Dispatcher {
    pub fn new(tick_rate: Duration) -> Dispatcher {
        let (tx, rx) = mpsc::channel();
        Dispatcher {
            rx,
            tx,
            tick_rate,
            ticker: None,
            _input_handle: None,
        }
    }

    pub fn from_config(config: &Config) -> Dispatcher {
        Dispatcher::new(config.tick_rate())
    }

    /// Starts a thread forwarding stdin lines as `Event::Input`.
    pub fn with_stdin(mut self) -> Dispatcher {
        let tx = self.tx.clone();
        self._input_handle = Some(thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(Event::Input(line)).is_err() {
                            return;
                        }
                    }
                    Err(err) => {
                        log::warn!("Error reading input: {}", err);
                        break;
                    }
                }
            }
            let _ = tx.send(Event::InputClosed);
        }));
        self
    }

    /// Replaces the clock ticker. Any previous ticker is cancelled first so
    /// at most one is ever running.
    pub fn arm_ticker(&mut self) {
        self.disarm_ticker();

        let tx = self.tx.clone();
        self.ticker = Some(Ticker::start(self.tick_rate, move || {
            tx.send(Event::Tick).is_ok()
        }));
    }

    pub fn disarm_ticker(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }

    pub fn ticker_armed(&self) -> bool {
        self.ticker.as_ref().map_or(false, Ticker::is_running)
    }

    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }

    pub fn event_sink(&self) -> &mpsc::Sender<Event> {
        &self.tx
    }
}
