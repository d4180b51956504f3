use crate::*;
pub use random::*;

mod random;

pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> Minefield;
}

/// How much protection the first-clicked cell gets during generation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StartCell {
    Random,
    SimpleSafe,
    AlwaysZero,
}
