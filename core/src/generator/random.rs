use rand::prelude::*;

use super::*;

/// Seeded generator, the same seed replays the same board and target sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomValueGenerator {
    seed: u64,
    rng: SmallRng,
}

impl RandomValueGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl ValueGenerator for RandomValueGenerator {
    fn tile_value(&mut self, (min, max): ValueRange) -> TileValue {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    fn target(&mut self, (min, max): TargetRange) -> Sum {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..=max)
    }
}
