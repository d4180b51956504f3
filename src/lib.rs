//! The board-observation and action-dispatch layer of a minesweeper
//! automation framework: directors perceive the board exactly as a player
//! would and act on it only through the four legal gestures.

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use control::*;
pub use director::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use minefield::*;
pub use trace::*;
pub use types::*;

mod cell;
mod control;
mod director;
mod engine;
mod error;
mod generator;
mod minefield;
mod trace;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new((size_x, size_y): Coord2, mines: CellCount) -> Self {
        let size_x = size_x.clamp(1, Coord::MAX);
        let size_y = size_y.clamp(1, Coord::MAX);
        let mines = mines.clamp(1, mult(size_x, size_y));
        Self::new_unchecked((size_x, size_y), mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}
