/// Rounded win percentage over all finished games. `None` before the
/// first game, so callers can render a placeholder instead of `0%`.
pub fn win_percentage(won: u32, total: u32) -> Option<u32> {
    match total {
        positive if positive > 0 => {
            Some(((won as f64 * 100.0) / total as f64).round() as u32)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_percentage() {
        assert_eq!(win_percentage(1, 2), Some(50));
        assert_eq!(win_percentage(2, 3), Some(67));
        assert_eq!(win_percentage(1, 3), Some(33));
    }

    #[test]
    fn test_win_percentage_all_won() {
        assert_eq!(win_percentage(5, 5), Some(100));
    }

    #[test]
    fn test_win_percentage_none_won() {
        assert_eq!(win_percentage(0, 8), Some(0));
    }

    #[test]
    fn test_win_percentage_no_games() {
        assert_eq!(win_percentage(0, 0), None);
    }

    #[test]
    fn test_win_percentage_rounds_half_up() {
        assert_eq!(win_percentage(1, 8), Some(13));
        assert_eq!(win_percentage(3, 8), Some(38));
    }
}
