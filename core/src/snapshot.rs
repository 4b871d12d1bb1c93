use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a renderer needs to draw the current frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: GameState,
    pub mode: Option<Mode>,
    pub grid: Option<Grid>,
    pub target: Option<Sum>,
    pub selected_sum: Sum,
    pub score: Score,
    pub high_score: Score,
    pub time_left: Option<u32>,
}

impl Snapshot {
    pub fn from_controller<G: ValueGenerator, S: HighScoreStore>(controller: &GameController<G, S>) -> Self {
        let engine = controller.engine();
        Self {
            state: controller.state(),
            mode: controller.mode(),
            grid: engine.map(|engine| engine.grid().clone()),
            target: controller.target(),
            selected_sum: engine.map_or(0, PlayEngine::selected_sum),
            score: controller.score(),
            high_score: controller.high_score(),
            time_left: controller.time_left(),
        }
    }
}
