#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use clock::*;
pub use controller::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use snapshot::*;
pub use storage::*;
pub use tile::*;
pub use types::*;

mod analysis;
mod clock;
mod controller;
mod engine;
mod error;
mod generator;
mod grid;
mod snapshot;
mod storage;
mod tile;
mod types;

/// Every tunable constant of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(rows, cols)`
    pub size: Coord2,
    /// Rows filled with tiles when a game starts.
    pub initial_rows: Coord,
    pub tile_values: ValueRange,
    pub targets: TargetRange,
    /// Countdown length of the time attack mode.
    pub time_limit_secs: u32,
    pub points_per_tile: Score,
}

impl GameConfig {
    pub const DEFAULT: Self = Self {
        size: (10, 6),
        initial_rows: 4,
        tile_values: (1, 9),
        targets: (10, 25),
        time_limit_secs: 15,
        points_per_tile: 10,
    };

    pub const fn new_unchecked(size: Coord2, initial_rows: Coord) -> Self {
        Self {
            size,
            initial_rows,
            ..Self::DEFAULT
        }
    }

    pub fn new(size: Coord2, initial_rows: Coord) -> Self {
        let rows = size.0.max(1);
        let cols = size.1.max(1);
        let clamped_rows = initial_rows.min(rows);
        if (rows, cols) != size || clamped_rows != initial_rows {
            log::warn!(
                "Clamped board {:?} with {} initial rows to {:?} with {}",
                size,
                initial_rows,
                (rows, cols),
                clamped_rows
            );
        }
        Self::new_unchecked((rows, cols), clamped_rows)
    }

    pub fn with_targets(self, (min, max): TargetRange) -> Self {
        let targets = if min <= max { (min, max) } else { (max, min) };
        Self { targets, ..self }
    }

    pub fn with_tile_values(self, (min, max): ValueRange) -> Self {
        let min = min.max(1);
        let tile_values = (min, max.max(min));
        Self { tile_values, ..self }
    }

    pub fn with_time_limit(self, secs: u32) -> Self {
        Self {
            time_limit_secs: secs.max(1),
            ..self
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn validate(&self) -> Result<()> {
        let (rows, cols) = self.size;
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidConfig("board must have at least one row and column"));
        }
        if self.initial_rows > rows {
            return Err(GameError::InvalidConfig("initial rows exceed board height"));
        }
        if self.tile_values.0 == 0 || self.tile_values.0 > self.tile_values.1 {
            return Err(GameError::InvalidConfig("tile values must be a non-empty range above zero"));
        }
        if self.targets.0 > self.targets.1 {
            return Err(GameError::InvalidConfig("target range is empty"));
        }
        if self.time_limit_secs == 0 {
            return Err(GameError::InvalidConfig("time limit must be at least one second"));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Result of activating a cell during play.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Empty, out-of-bounds or ignored activation.
    NoChange,
    /// Selection changed, sum still below the target.
    Pending { sum: Sum },
    /// Sum went past the target and every selection was dropped.
    Overflow { sum: Sum },
    /// Selection hit the target and was cleared.
    Matched { cleared: CellCount, points: Score },
}

impl ToggleOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InjectOutcome {
    Injected,
    /// The top row was occupied, the board is left as it was.
    Lost,
}

impl InjectOutcome {
    pub const fn is_lost(self) -> bool {
        matches!(self, Self::Lost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_into_usable_shape() {
        let config = GameConfig::new((0, 0), 9);

        assert_eq!(config.size, (1, 1));
        assert_eq!(config.initial_rows, 1);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn builders_normalize_ranges() {
        let config = GameConfig::default()
            .with_targets((30, 12))
            .with_tile_values((0, 0))
            .with_time_limit(0);

        assert_eq!(config.targets, (12, 30));
        assert_eq!(config.tile_values, (1, 1));
        assert_eq!(config.time_limit_secs, 1);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_hand_built_configs() {
        let too_tall = GameConfig {
            initial_rows: 11,
            ..GameConfig::DEFAULT
        };
        let zero_tiles = GameConfig {
            tile_values: (0, 9),
            ..GameConfig::DEFAULT
        };
        let no_time = GameConfig {
            time_limit_secs: 0,
            ..GameConfig::DEFAULT
        };

        assert!(matches!(too_tall.validate(), Err(GameError::InvalidConfig(_))));
        assert!(matches!(zero_tiles.validate(), Err(GameError::InvalidConfig(_))));
        assert!(matches!(no_time.validate(), Err(GameError::InvalidConfig(_))));
        assert_eq!(GameConfig::DEFAULT.total_cells(), 60);
    }
}
