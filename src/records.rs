use crate::app_dirs::AppDirs;
use crate::game::{Game, GameStatus};
use crate::storage::{Lifetime, Storage, SCORE_KEY, TOTALS_KEY};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;

/// Best-scoring player so far; at most one is kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HighScore {
    pub name: String,
    pub points: u32,
    pub when: String,
}

/// Highest-scoring game independent of who played it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BestGame {
    pub when: String,
    pub points: u32,
}

/// Cumulative record folded over every finished game.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Totals {
    pub total: u32,
    pub won: u32,
    pub best: Option<BestGame>,
}

/// Fold one finished game into the cumulative records.
///
/// Both the high score and the best game replace only on a strictly
/// greater score; ties keep the stored record. The two comparisons are
/// independent, the best game is tracked without player identity.
pub fn record_outcome(
    mut totals: Totals,
    high: Option<HighScore>,
    score: u32,
    won: bool,
    player: &str,
    stamp: &str,
) -> (Totals, HighScore) {
    totals.total += 1;
    if won {
        totals.won += 1;
    }

    let high = match high {
        Some(existing) if score <= existing.points => existing,
        _ => HighScore {
            name: player.to_string(),
            points: score,
            when: stamp.to_string(),
        },
    };

    let beats_best = totals.best.as_ref().map_or(true, |b| score > b.points);
    if beats_best {
        totals.best = Some(BestGame {
            when: stamp.to_string(),
            points: score,
        });
    }

    (totals, high)
}

/// Locale-formatted date + time, the shape stored in the records.
pub fn now_stamp() -> String {
    Local::now().format("%x %X").to_string()
}

/// Read-modify-write view over the durable records.
pub struct Records<'a> {
    storage: &'a Storage,
}

impl<'a> Records<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn totals(&self) -> Totals {
        self.storage
            .get(Lifetime::Durable, TOTALS_KEY)
            .unwrap_or_default()
    }

    pub fn high_score(&self) -> Option<HighScore> {
        self.storage.get(Lifetime::Durable, SCORE_KEY)
    }

    pub fn clear_high_score(&self) -> io::Result<()> {
        self.storage.remove(Lifetime::Durable, SCORE_KEY)
    }

    /// Fold a finished game into the records, persist both keys and append
    /// the game-log row. Returns the updated pair for rendering.
    pub fn record_game(&self, game: &Game, player: &str) -> (Totals, HighScore) {
        let stamp = now_stamp();
        let won = game.status == GameStatus::Won;
        let (totals, high) = record_outcome(
            self.totals(),
            self.high_score(),
            game.score,
            won,
            player,
            &stamp,
        );

        let _ = self.storage.put(Lifetime::Durable, TOTALS_KEY, &totals);
        let _ = self.storage.put(Lifetime::Durable, SCORE_KEY, &high);
        if let Some(path) = AppDirs::log_path() {
            let _ = log_game(&path, &stamp, player, game);
        }

        (totals, high)
    }

    /// Append an abandoned round to the game log without folding it into
    /// the records; leaving mid-round is not a finished game.
    pub fn log_abandoned(&self, game: &Game, player: &str) {
        if let Some(path) = AppDirs::log_path() {
            let _ = log_game(&path, &now_stamp(), player, game);
        }
    }
}

/// Append one finished game to the log, emitting the header on first write.
fn log_game(path: &Path, stamp: &str, player: &str, game: &Game) -> csv::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let needs_header = !path.exists();

    let file = OpenOptions::new().append(true).create(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    if needs_header {
        writer.write_record(["date", "player", "word_len", "score", "errors", "outcome"])?;
    }
    let outcome = match game.status {
        GameStatus::Won => "won",
        GameStatus::Lost => "lost",
        GameStatus::Active => "abandoned",
    };
    writer.write_record([
        stamp,
        player,
        &game.secret.len().to_string(),
        &game.score.to_string(),
        &game.errors.to_string(),
        outcome,
    ])?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_game_creates_both_records() {
        let (totals, high) = record_outcome(Totals::default(), None, 50, true, "Mar", "stamp");
        assert_eq!(totals.total, 1);
        assert_eq!(totals.won, 1);
        assert_eq!(
            totals.best,
            Some(BestGame {
                when: "stamp".into(),
                points: 50
            })
        );
        assert_eq!(high.name, "Mar");
        assert_eq!(high.points, 50);
        assert_eq!(high.when, "stamp");
    }

    #[test]
    fn lost_game_counts_total_but_not_won() {
        let (totals, _) = record_outcome(Totals::default(), None, 0, false, "Mar", "stamp");
        assert_eq!(totals.total, 1);
        assert_eq!(totals.won, 0);
    }

    #[test]
    fn higher_score_replaces_high_score() {
        let existing = HighScore {
            name: "Mar".into(),
            points: 40,
            when: "before".into(),
        };
        let (_, high) =
            record_outcome(Totals::default(), Some(existing), 50, true, "Pau", "after");
        assert_eq!(high.name, "Pau");
        assert_eq!(high.points, 50);
        assert_eq!(high.when, "after");
    }

    #[test]
    fn tied_score_keeps_the_stored_high_score() {
        let existing = HighScore {
            name: "Mar".into(),
            points: 40,
            when: "before".into(),
        };
        let (_, high) = record_outcome(
            Totals::default(),
            Some(existing.clone()),
            40,
            true,
            "Pau",
            "after",
        );
        assert_eq!(high, existing);
    }

    #[test]
    fn best_game_tracks_independently_of_player() {
        let totals = Totals {
            total: 3,
            won: 2,
            best: Some(BestGame {
                when: "before".into(),
                points: 30,
            }),
        };
        let existing = HighScore {
            name: "Mar".into(),
            points: 60,
            when: "before".into(),
        };
        // beats the best game but not the high score
        let (totals, high) = record_outcome(totals, Some(existing.clone()), 45, true, "Pau", "now");
        assert_eq!(high, existing);
        assert_eq!(
            totals.best,
            Some(BestGame {
                when: "now".into(),
                points: 45
            })
        );
    }

    #[test]
    fn tied_best_game_is_kept() {
        let totals = Totals {
            total: 1,
            won: 1,
            best: Some(BestGame {
                when: "before".into(),
                points: 30,
            }),
        };
        let (totals, _) = record_outcome(totals, None, 30, false, "Mar", "now");
        assert_eq!(totals.best.unwrap().when, "before");
    }

    #[test]
    fn records_facade_persists_across_reads() {
        use crate::storage::Storage;

        let storage = Storage::in_memory();
        let records = Records::new(&storage);
        assert_eq!(records.totals(), Totals::default());
        assert_eq!(records.high_score(), None);

        let mut game = Game::start("gato").unwrap();
        for l in ['g', 'a', 't', 'o'] {
            game.guess(l);
        }
        let (totals, high) = records.record_game(&game, "Mar");
        assert_eq!(totals.total, 1);
        assert_eq!(totals.won, 1);
        assert_eq!(high.points, 10);

        // fresh view over the same storage sees the snapshots
        let again = Records::new(&storage);
        assert_eq!(again.totals(), totals);
        assert_eq!(again.high_score(), Some(high));
    }

    #[test]
    fn clear_high_score_leaves_totals_alone() {
        use crate::storage::Storage;

        let storage = Storage::in_memory();
        let records = Records::new(&storage);
        let mut game = Game::start("gato").unwrap();
        for l in ['g', 'a', 't', 'o'] {
            game.guess(l);
        }
        records.record_game(&game, "Mar");

        records.clear_high_score().unwrap();
        assert_eq!(records.high_score(), None);
        assert_eq!(records.totals().total, 1);
    }

    #[test]
    fn log_game_writes_header_once() {
        use tempfile::tempdir;

        let dir = tempdir().unwrap();
        let path = dir.path().join("log.csv");
        let mut game = Game::start("gato").unwrap();
        for l in ['g', 'a', 't', 'o'] {
            game.guess(l);
        }

        log_game(&path, "stamp", "Mar", &game).unwrap();
        log_game(&path, "stamp", "Mar", &game).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("date,"));
        assert!(lines[1].contains("won"));
        assert_eq!(lines[1], lines[2]);
    }
}
