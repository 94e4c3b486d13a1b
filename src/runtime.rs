use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// What the synchronous game loop consumes: a key press, a terminal
/// resize, or a timer tick when neither arrived in time.
#[derive(Clone, Debug)]
pub enum GameEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Where game events come from. The binary reads the real terminal;
/// tests feed a channel.
pub trait GameEventSource: Send + 'static {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError>;
}

/// Terminal-backed source. A reader thread blocks on crossterm and
/// forwards key and resize events; everything else is dropped.
pub struct CrosstermEventSource {
    rx: Receiver<GameEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                Ok(CtEvent::Key(key)) => tx.send(GameEvent::Key(key)),
                Ok(CtEvent::Resize(_, _)) => tx.send(GameEvent::Resize),
                Ok(_) => Ok(()),
                Err(_) => break,
            };
            if forwarded.is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Channel-fed source for driving the loop headlessly in tests.
pub struct TestEventSource {
    rx: Receiver<GameEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<GameEvent>) -> Self {
        Self { rx }
    }
}

impl GameEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Pulls one event per call, degrading to `Tick` at a fixed cadence so
/// the animation keeps moving while the player thinks.
pub struct Runner<E: GameEventSource> {
    events: E,
    tick_rate: Duration,
}

impl<E: GameEventSource> Runner<E> {
    pub fn new(events: E, tick_rate: Duration) -> Self {
        Self { events, tick_rate }
    }

    /// Blocks up to the tick cadence; a timeout or a hung-up source
    /// both read as a tick.
    pub fn step(&self) -> GameEvent {
        self.events
            .recv_timeout(self.tick_rate)
            .unwrap_or(GameEvent::Tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn runner(rx: Receiver<GameEvent>) -> Runner<TestEventSource> {
        Runner::new(TestEventSource::new(rx), Duration::from_millis(5))
    }

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        assert!(matches!(runner(rx).step(), GameEvent::Tick));
    }

    #[test]
    fn step_returns_tick_when_the_source_hangs_up() {
        let (tx, rx) = mpsc::channel();
        drop(tx);
        assert!(matches!(runner(rx).step(), GameEvent::Tick));
    }

    #[test]
    fn step_drains_queued_events_in_order() {
        let (tx, rx) = mpsc::channel();
        tx.send(GameEvent::Resize).unwrap();
        tx.send(GameEvent::Key(crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Char('a'),
            crossterm::event::KeyModifiers::NONE,
        )))
        .unwrap();

        let runner = runner(rx);
        assert!(matches!(runner.step(), GameEvent::Resize));
        assert!(matches!(runner.step(), GameEvent::Key(_)));
        // queue empty again, back to ticking
        assert!(matches!(runner.step(), GameEvent::Tick));
    }
}
