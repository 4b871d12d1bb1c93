use crate::*;

/// Keeps the best score across games.
pub trait HighScoreStore {
    fn load(&mut self) -> Score;

    fn save(&mut self, score: Score);
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for &mut S {
    fn load(&mut self) -> Score {
        (**self).load()
    }

    fn save(&mut self, score: Score) {
        (**self).save(score)
    }
}

/// Store that lives only as long as the process.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryHighScore {
    score: Score,
    saves: u32,
}

impl MemoryHighScore {
    pub fn new(score: Score) -> Self {
        Self { score, saves: 0 }
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// How many times the score was written.
    pub fn saves(&self) -> u32 {
        self.saves
    }
}

impl HighScoreStore for MemoryHighScore {
    fn load(&mut self) -> Score {
        self.score
    }

    fn save(&mut self, score: Score) {
        self.score = score;
        self.saves += 1;
    }
}
