use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use penjat::game::{Game, GameStatus};
use penjat::runtime::{GameEvent, Runner, TestEventSource};

fn send_letters(tx: &mpsc::Sender<GameEvent>, letters: &str) {
    for c in letters.chars() {
        tx.send(GameEvent::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::NONE,
        )))
        .unwrap();
    }
}

fn drive(runner: &Runner<TestEventSource>, game: &mut Game) {
    for _ in 0..100u32 {
        match runner.step() {
            GameEvent::Tick | GameEvent::Resize => {}
            GameEvent::Key(key) => {
                if let KeyCode::Char(c) = key.code {
                    game.guess(c);
                    if !game.is_active() {
                        break;
                    }
                }
            }
        }
    }
}

// Headless integration using the internal runtime + Game without a TTY.
// Verifies that a full guessing round completes via Runner/TestEventSource.
#[test]
fn headless_round_completes_with_a_win() {
    let mut game = Game::start("gato").unwrap();

    let (tx, rx) = mpsc::channel();
    let es = TestEventSource::new(rx);
    let runner = Runner::new(es, Duration::from_millis(5));

    send_letters(&tx, "gato");
    drive(&runner, &mut game);

    assert_eq!(game.status, GameStatus::Won);
    assert_eq!(game.score, 10);
    assert_eq!(game.errors, 0);
}

#[test]
fn headless_round_survives_misses() {
    let mut game = Game::start("gato").unwrap();

    let (tx, rx) = mpsc::channel();
    let es = TestEventSource::new(rx);
    let runner = Runner::new(es, Duration::from_millis(5));

    // Two misses woven between the hits reset the streak both times
    send_letters(&tx, "zgxato");
    drive(&runner, &mut game);

    assert_eq!(game.status, GameStatus::Won);
    assert_eq!(game.errors, 2);
    assert_eq!(game.score, 7);
}

#[test]
fn headless_round_is_lost_after_nine_misses() {
    let mut game = Game::start("gato").unwrap();

    let (tx, rx) = mpsc::channel();
    let es = TestEventSource::new(rx);
    let runner = Runner::new(es, Duration::from_millis(5));

    send_letters(&tx, "bcdefhijk");
    drive(&runner, &mut game);

    assert_eq!(game.status, GameStatus::Lost);
    assert_eq!(game.errors, 9);
    assert_eq!(game.remaining_tries(), 0);
}
