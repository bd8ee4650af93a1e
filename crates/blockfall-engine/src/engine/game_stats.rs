/// Score values for line clears, indexed by the number of rows cleared at once.
const SCORE_TABLE: [usize; 5] = [0, 100, 300, 500, 800];

/// Statistics of a running session.
///
/// - **Score**: points from line clears, no level multiplier
/// - **Level**: starting level plus one per `lines_per_level` cleared lines
/// - **Completed pieces**: pieces locked, including a final top-out lock
/// - **Line clear distribution**: count of locks by rows cleared
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new(1, 10);
/// stats.complete_piece_drop(4);
/// stats.complete_piece_drop(4);
/// stats.complete_piece_drop(2);
///
/// assert_eq!(stats.score(), 1900);
/// assert_eq!(stats.total_cleared_lines(), 10);
/// assert_eq!(stats.level(), 2);
/// assert_eq!(stats.line_cleared_counter()[4], 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    starting_level: u32,
    lines_per_level: u32,
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl GameStats {
    /// Creates a tracker with all counters at zero.
    ///
    /// A `lines_per_level` of zero is treated as one.
    #[must_use]
    pub const fn new(starting_level: u32, lines_per_level: u32) -> Self {
        Self {
            starting_level,
            lines_per_level,
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        let lines = u32::try_from(self.total_cleared_lines).unwrap_or(u32::MAX);
        self.starting_level
            .saturating_add(lines / self.lines_per_level.max(1))
    }

    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by rows cleared (`[0]` counts locks that
    /// cleared nothing, `[4]` counts four-row clears).
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Records one locked piece that cleared `cleared_lines` rows (0 to 4).
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) {
        debug_assert!(cleared_lines < SCORE_TABLE.len());
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if let Some(count) = self.line_cleared_counter.get_mut(cleared_lines) {
            *count += 1;
        }
        self.score += SCORE_TABLE.get(cleared_lines).copied().unwrap_or(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_are_zero() {
        let stats = GameStats::new(1, 10);
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.completed_pieces(), 0);
        assert_eq!(stats.line_cleared_counter(), &[0; 5]);
    }

    #[test]
    fn test_score_table() {
        for (lines, score) in [(0, 0), (1, 100), (2, 300), (3, 500), (4, 800)] {
            let mut stats = GameStats::new(1, 10);
            stats.complete_piece_drop(lines);
            assert_eq!(stats.score(), score, "{lines} lines");
            assert_eq!(stats.completed_pieces(), 1);
        }
    }

    #[test]
    fn test_level_follows_starting_level_and_lines() {
        let mut stats = GameStats::new(3, 4);
        stats.complete_piece_drop(3);
        assert_eq!(stats.level(), 3);
        stats.complete_piece_drop(1);
        assert_eq!(stats.level(), 4);
        stats.complete_piece_drop(4);
        assert_eq!(stats.level(), 5);
    }
}
