use alloc::vec::Vec;

use super::*;

/// Replays scripted tile values and targets, cycling once exhausted.
///
/// Scripted numbers are clamped into the requested range, and an empty script
/// yields the lower bound.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SequenceGenerator {
    values: Vec<TileValue>,
    targets: Vec<Sum>,
    value_pos: usize,
    target_pos: usize,
}

impl SequenceGenerator {
    pub fn new(
        values: impl IntoIterator<Item = TileValue>,
        targets: impl IntoIterator<Item = Sum>,
    ) -> Self {
        Self {
            values: values.into_iter().collect(),
            targets: targets.into_iter().collect(),
            value_pos: 0,
            target_pos: 0,
        }
    }
}

fn next_scripted<T: Copy>(script: &[T], pos: &mut usize) -> Option<T> {
    let item = script.get(*pos % script.len().max(1)).copied();
    *pos = pos.wrapping_add(1);
    item
}

impl ValueGenerator for SequenceGenerator {
    fn tile_value(&mut self, (min, max): ValueRange) -> TileValue {
        next_scripted(&self.values, &mut self.value_pos)
            .map_or(min, |value| value.clamp(min, max.max(min)))
    }

    fn target(&mut self, (min, max): TargetRange) -> Sum {
        next_scripted(&self.targets, &mut self.target_pos)
            .map_or(min, |target| target.clamp(min, max.max(min)))
    }
}
