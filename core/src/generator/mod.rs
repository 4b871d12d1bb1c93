use crate::*;
pub use random::*;
pub use sequence::*;

mod random;
mod sequence;

/// Inclusive `(min, max)` range of tile face values.
pub type ValueRange = (TileValue, TileValue);

/// Inclusive `(min, max)` range of target sums.
pub type TargetRange = (Sum, Sum);

/// Source of every random number the engine draws.
///
/// Both draws are uniform over the inclusive range and independent of the
/// board contents.
pub trait ValueGenerator {
    fn tile_value(&mut self, range: ValueRange) -> TileValue;

    fn target(&mut self, range: TargetRange) -> Sum;
}

impl<G: ValueGenerator + ?Sized> ValueGenerator for &mut G {
    fn tile_value(&mut self, range: ValueRange) -> TileValue {
        (**self).tile_value(range)
    }

    fn target(&mut self, range: TargetRange) -> Sum {
        (**self).target(range)
    }
}
