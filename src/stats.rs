/// Answer tally for one play-through
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub attempted: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub streak: u32,
    pub best_streak: u32,
}

impl Stats {
    pub fn record(&mut self, is_correct: bool) {
        self.attempted += 1;
        if is_correct {
            self.correct += 1;
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
        } else {
            self.incorrect += 1;
            self.streak = 0;
        }
    }

    /// Fraction of correct answers in `[0, 1]`; zero before the first attempt
    pub fn accuracy(&self) -> f64 {
        if self.attempted == 0 {
            return 0.0;
        }
        self.correct as f64 / self.attempted as f64
    }

    pub fn accuracy_percent(&self) -> f64 {
        self.accuracy() * 100.0
    }

    pub fn is_perfect(&self) -> bool {
        self.attempted > 0 && self.incorrect == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_is_zero_without_attempts() {
        let stats = Stats::default();
        assert_eq!(stats.accuracy(), 0.0);
        assert!(!stats.is_perfect());
    }

    #[test]
    fn record_keeps_totals_consistent() {
        let mut stats = Stats::default();
        let pattern = [true, true, false, true, false, false, true, true, true];
        for (i, &ok) in pattern.iter().enumerate() {
            let before = stats;
            stats.record(ok);

            assert_eq!(stats.attempted, stats.correct + stats.incorrect);
            assert_eq!(stats.attempted as usize, i + 1);
            if ok {
                assert_eq!(stats.streak, before.streak + 1);
            } else {
                assert_eq!(stats.streak, 0);
            }
            assert!(stats.best_streak >= stats.streak);
            assert!(stats.best_streak >= before.best_streak);
            assert!((0.0..=1.0).contains(&stats.accuracy()));
        }

        assert_eq!(stats.correct, 6);
        assert_eq!(stats.incorrect, 3);
        assert_eq!(stats.streak, 3);
        assert_eq!(stats.best_streak, 3);
    }

    #[test]
    fn best_streak_survives_a_miss() {
        let mut stats = Stats::default();
        for _ in 0..4 {
            stats.record(true);
        }
        stats.record(false);
        stats.record(true);

        assert_eq!(stats.streak, 1);
        assert_eq!(stats.best_streak, 4);
    }

    #[test]
    fn accuracy_fraction_and_percent() {
        let mut stats = Stats::default();
        stats.record(true);
        stats.record(true);
        stats.record(true);
        stats.record(false);

        assert_eq!(stats.accuracy(), 0.75);
        assert_eq!(stats.accuracy_percent(), 75.0);
    }

    #[test]
    fn perfect_when_no_misses() {
        let mut stats = Stats::default();
        stats.record(true);
        assert!(stats.is_perfect());
        stats.record(false);
        assert!(!stats.is_perfect());
    }
}
