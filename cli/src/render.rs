use std::fmt::Write;

use sumfall_core::{Cell, GameEvent, GameState, Hint, Mode, Snapshot};

fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Classic => "classic",
        Mode::TimeAttack => "time attack",
    }
}

/// Plain-text frame: status line followed by the board, selected tiles in brackets.
pub(crate) fn frame(snapshot: &Snapshot) -> String {
    let mut out = String::new();

    match snapshot.state {
        GameState::Menu => {
            let _ = writeln!(out, "== menu == high score {}", snapshot.high_score);
            out.push_str("type `start classic` or `start time`");
            return out;
        }
        GameState::Playing | GameState::Paused | GameState::GameOver => {}
    }

    let _ = write!(
        out,
        "[{}] target {} | sum {} | score {} | best {}",
        snapshot.mode.map_or("-", mode_label),
        snapshot.target.unwrap_or_default(),
        snapshot.selected_sum,
        snapshot.score,
        snapshot.high_score,
    );
    if let Some(time_left) = snapshot.time_left {
        let _ = write!(out, " | {}s", time_left);
    }
    match snapshot.state {
        GameState::Paused => out.push_str(" | paused"),
        GameState::GameOver => out.push_str(" | GAME OVER"),
        GameState::Menu | GameState::Playing => {}
    }
    out.push('\n');

    if let Some(grid) = &snapshot.grid {
        let (rows, cols) = grid.size();
        out.push_str("    ");
        for col in 0..cols {
            let _ = write!(out, "{:^3}", col);
        }
        out.push('\n');
        for row in 0..rows {
            let _ = write!(out, "{:>2}  ", row);
            for col in 0..cols {
                match grid[(row, col)] {
                    Cell::Empty => out.push_str(" . "),
                    Cell::Occupied { tile, selected: true } => {
                        let _ = write!(out, "[{}]", tile.value());
                    }
                    Cell::Occupied { tile, selected: false } => {
                        let _ = write!(out, " {} ", tile.value());
                    }
                }
            }
            out.push('\n');
        }
    }
    out.pop();
    out
}

pub(crate) fn event(event: &GameEvent) -> String {
    match *event {
        GameEvent::Celebrate { cleared } => format!("*** cleared {} tiles! ***", cleared),
        GameEvent::Overflow => "too much, selection reset".to_string(),
        GameEvent::RowInjected => "a new row pushes in from below".to_string(),
        GameEvent::TimeReset => "countdown refilled".to_string(),
        GameEvent::NewHighScore(score) => format!("new high score: {}", score),
        GameEvent::GameOver { score } => format!("game over, final score {}", score),
    }
}

pub(crate) fn hint(hint: Option<&Hint>) -> String {
    match hint {
        Some(hint) => {
            let tiles: Vec<String> = hint
                .positions
                .iter()
                .map(|(row, col)| format!("({} {})", row, col))
                .collect();
            format!("try {} for {}", tiles.join(" "), hint.sum)
        }
        None => "no combination reaches the target".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sumfall_core::*;

    fn playing_snapshot() -> Snapshot {
        let generator = SequenceGenerator::new([4, 7], [11]);
        let config = GameConfig::new((2, 2), 1);
        let mut game = GameController::new(config, generator, MemoryHighScore::new(50)).unwrap();
        game.start(Mode::Classic);
        game.activate((1, 1));
        game.snapshot()
    }

    #[test]
    fn renders_board_with_selection() {
        let text = frame(&playing_snapshot());

        assert_eq!(
            text,
            "[classic] target 11 | sum 7 | score 0 | best 50\n     0  1 \n 0   .  . \n 1   4 [7]"
        );
    }

    #[test]
    fn renders_menu() {
        let game = GameController::new(
            GameConfig::default(),
            SequenceGenerator::default(),
            MemoryHighScore::new(120),
        )
        .unwrap();

        assert!(frame(&game.snapshot()).starts_with("== menu == high score 120"));
    }

    #[test]
    fn renders_hints() {
        let grid = Grid::from_values(&[&[4, 7]]).unwrap();

        assert_eq!(hint(find_match(&grid, 11).as_ref()), "try (0 0) (0 1) for 11");
        assert_eq!(hint(None), "no combination reaches the target");
    }
}
