use core::num::Saturating;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Board, target and score of one game, without any timing policy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    config: GameConfig,
    grid: Grid,
    target: Sum,
    score: Saturating<Score>,
    tile_ids: TileIds,
    tiles_cleared: Saturating<u32>,
    rows_injected: Saturating<u32>,
}

impl PlayEngine {
    pub fn new<G: ValueGenerator>(config: GameConfig, generator: &mut G) -> Result<Self> {
        config.validate()?;

        let mut tile_ids = TileIds::default();
        let grid = Grid::create_initial(config.size, config.initial_rows, || {
            spawn_tile(&config, &mut tile_ids, &mut *generator)
        });
        let target = generator.target(config.targets);
        log::debug!(
            "New board {:?} with {} tiles, target {}",
            config.size,
            grid.tile_count(),
            target
        );

        Ok(Self::from_parts(config, grid, target, tile_ids))
    }

    /// Engine resuming from a prepared board.
    pub fn with_grid(config: GameConfig, grid: Grid, target: Sum) -> Result<Self> {
        config.validate()?;
        if grid.size() != config.size {
            return Err(GameError::InvalidBoardShape);
        }
        let tile_ids = TileIds::after(grid.max_tile_id());
        Ok(Self::from_parts(config, grid, target, tile_ids))
    }

    fn from_parts(config: GameConfig, grid: Grid, target: Sum, tile_ids: TileIds) -> Self {
        Self {
            config,
            grid,
            target,
            score: Saturating(0),
            tile_ids,
            tiles_cleared: Saturating(0),
            rows_injected: Saturating(0),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn target(&self) -> Sum {
        self.target
    }

    pub fn score(&self) -> Score {
        self.score.0
    }

    pub fn selected_sum(&self) -> Sum {
        self.grid.selected_sum()
    }

    pub fn tiles_cleared(&self) -> u32 {
        self.tiles_cleared.0
    }

    pub fn rows_injected(&self) -> u32 {
        self.rows_injected.0
    }

    pub fn hint(&self) -> Option<Hint> {
        find_match(&self.grid, self.target)
    }

    /// Toggles the tile at `coords` and resolves the selection against the
    /// target.
    pub fn toggle_cell<G: ValueGenerator>(&mut self, coords: Coord2, generator: &mut G) -> ToggleOutcome {
        if !self.grid.cell_at(coords).is_some_and(Cell::is_occupied) {
            log::trace!("Ignoring activation of empty cell {:?}", coords);
            return ToggleOutcome::NoChange;
        }

        let toggled = self.grid.toggle_select(coords);
        let sum = toggled.selected_sum();
        log::trace!("Toggled {:?}, sum {} of target {}", coords, sum, self.target);

        if sum == self.target {
            self.resolve_match(toggled, generator)
        } else if sum > self.target {
            log::debug!("Overflow at {} over target {}, selection reset", sum, self.target);
            self.grid = toggled.deselect_all();
            ToggleOutcome::Overflow { sum }
        } else {
            self.grid = toggled;
            ToggleOutcome::Pending { sum }
        }
    }

    fn resolve_match<G: ValueGenerator>(&mut self, toggled: Grid, generator: &mut G) -> ToggleOutcome {
        let selection = toggled.selection();
        let cleared_grid = match toggled.clear_cells(&selection) {
            Ok(grid) => grid,
            Err(err) => {
                debug_assert!(false, "selection must only hold tiles: {err}");
                log::error!("Could not clear selection {:?}: {}", selection, err);
                return ToggleOutcome::NoChange;
            }
        };

        let cleared = selection.len() as CellCount;
        let points = self.config.points_per_tile.saturating_mul(cleared.into());
        let target = generator.target(self.config.targets);
        log::debug!(
            "Matched target {} with {} tiles for {} points, next target {}",
            self.target,
            cleared,
            points,
            target
        );

        self.grid = cleared_grid.apply_gravity();
        self.target = target;
        self.score += points;
        self.tiles_cleared += u32::from(cleared);
        ToggleOutcome::Matched { cleared, points }
    }

    /// Pushes a fresh row in from the bottom unless the top row is taken.
    pub fn inject_row<G: ValueGenerator>(&mut self, generator: &mut G) -> InjectOutcome {
        if self.grid.top_row_occupied() {
            log::debug!("Top row occupied, cannot inject");
            return InjectOutcome::Lost;
        }

        let row: SmallVec<[Tile; 8]> = (0..self.config.size.1)
            .map(|_| spawn_tile(&self.config, &mut self.tile_ids, &mut *generator))
            .collect();
        match self.grid.shift_up_and_spawn_row(&row) {
            Ok(grid) => self.grid = grid,
            Err(err) => {
                // board is kept as is and the game ends
                debug_assert!(false, "spawned row must match board width: {err}");
                log::error!("Could not inject row: {}", err);
                return InjectOutcome::Lost;
            }
        }
        self.rows_injected += 1;
        log::debug!("Injected row #{}", self.rows_injected.0);
        InjectOutcome::Injected
    }
}

fn spawn_tile<G: ValueGenerator>(config: &GameConfig, tile_ids: &mut TileIds, generator: &mut G) -> Tile {
    Tile::new(tile_ids.next_id(), generator.tile_value(config.tile_values))
}
