use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Set of tiles whose values add up to a target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub positions: Selection,
    pub sum: Sum,
}

/// Finds tiles on `grid` summing exactly to `target`, ignoring the current
/// selection.
///
/// Candidates are scanned from the bottom row up and left to right, so the
/// answer favours tiles closest to the spawn boundary. Returns `None` when no
/// subset of the board reaches the target.
pub fn find_match(grid: &Grid, target: Sum) -> Option<Hint> {
    let (rows, cols) = grid.size();
    let candidates: Vec<(Coord2, Sum)> = (0..rows)
        .rev()
        .flat_map(|row| (0..cols).map(move |col| (row, col)))
        .filter_map(|coords| grid.tile_at(coords).map(|tile| (coords, Sum::from(tile.value()))))
        .collect();

    let total: Sum = candidates.iter().map(|&(_, value)| value).sum();
    if target > total {
        return None;
    }

    // reached_by[s] is the candidate that first made sum `s` reachable
    let target_idx = target as usize;
    let mut reachable = vec![false; target_idx + 1];
    let mut reached_by = vec![usize::MAX; target_idx + 1];
    reachable[0] = true;

    for (idx, &(_, value)) in candidates.iter().enumerate() {
        let value = value as usize;
        if value == 0 || value > target_idx {
            continue;
        }
        for sum in (value..=target_idx).rev() {
            if !reachable[sum] && reachable[sum - value] {
                reachable[sum] = true;
                reached_by[sum] = idx;
            }
        }
        if reachable[target_idx] {
            break;
        }
    }

    if !reachable[target_idx] {
        log::trace!("Target {} unreachable on current board", target);
        return None;
    }

    let mut positions = Selection::new();
    let mut remaining = target_idx;
    while remaining > 0 {
        let (coords, value) = candidates[reached_by[remaining]];
        positions.push(coords);
        remaining -= value as usize;
    }
    positions.sort_unstable();

    Some(Hint {
        positions,
        sum: target,
    })
}
