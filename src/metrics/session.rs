use std::time::{Duration, Instant};

/// Per-session numbers shown around the board. Kept in memory only.
#[derive(Debug, Clone)]
pub struct SessionStats {
    run_started: Instant,
    /// Set when a run ends so the clock stops on the game-over dialog
    run_length: Option<Duration>,
    pub best_score: u32,
    pub games_played: u32,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            run_started: Instant::now(),
            run_length: None,
            best_score: 0,
            games_played: 0,
        }
    }

    pub fn on_game_start(&mut self) {
        self.run_started = Instant::now();
        self.run_length = None;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        if self.run_length.is_some() {
            return;
        }
        self.run_length = Some(self.run_started.elapsed());
        self.games_played += 1;
        self.best_score = self.best_score.max(final_score);
    }

    pub fn elapsed(&self) -> Duration {
        self.run_length.unwrap_or_else(|| self.run_started.elapsed())
    }

    pub fn format_time(&self) -> String {
        format_duration(self.elapsed())
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

/// mm:ss
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
