use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameState {
    Ready,
    Active,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Ready
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    /// Combines the outcomes of revealing several cells in one gesture;
    /// the most decisive outcome wins.
    pub(crate) fn combine(self, other: Self) -> Self {
        use RevealOutcome::*;
        match (self, other) {
            (HitMine, _) | (_, HitMine) => HitMine,
            (Won, _) | (_, Won) => Won,
            (Revealed, _) | (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Toggled,
}

/// Authoritative game state: the mine placement plus the player-visible
/// board derived from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    minefield: Minefield,
    board: Array2<CellKind>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    state: GameState,
}

impl Game {
    pub fn new(minefield: Minefield) -> Self {
        let size = minefield.size();
        Self {
            minefield,
            board: Array2::default(size.to_nd_index()),
            revealed_count: 0,
            flagged_count: 0,
            state: GameState::default(),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.minefield.size()
    }

    pub fn kind_at(&self, coords: Coord2) -> CellKind {
        self.board[coords.to_nd_index()]
    }

    /// Total mines minus placed flags. Negative when over-flagged.
    pub fn mines_left(&self) -> isize {
        self.minefield.mine_count() as isize - self.flagged_count as isize
    }

    /// Reveals the cell at `coords` if it is unflagged and unrevealed,
    /// flood-filling outward from zero-count cells.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.minefield.validate_coords(coords)?;
        self.check_not_finished()?;
        Ok(self.reveal_at(coords))
    }

    /// Toggles the flag on an unrevealed cell; revealed cells are left
    /// untouched.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.minefield.validate_coords(coords)?;
        self.check_not_finished()?;

        Ok(match self.board[coords.to_nd_index()] {
            CellKind::Unrevealed => {
                self.board[coords.to_nd_index()] = CellKind::Flag;
                self.flagged_count += 1;
                FlagOutcome::Toggled
            }
            CellKind::Flag => {
                self.board[coords.to_nd_index()] = CellKind::Unrevealed;
                self.flagged_count -= 1;
                FlagOutcome::Toggled
            }
            CellKind::Number(_) => FlagOutcome::NoChange,
        })
    }

    /// Reveals the unflagged neighbors of a numbered cell whose
    /// flagged-neighbor count matches its number.
    pub fn chord(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.minefield.validate_coords(coords)?;
        self.check_not_finished()?;

        let CellKind::Number(count) = self.board[coords.to_nd_index()] else {
            return Ok(RevealOutcome::NoChange);
        };

        if count != self.count_flagged_neighbors(coords) {
            return Ok(RevealOutcome::NoChange);
        }

        let neighbors: Vec<Coord2> = self.minefield.iter_neighbors(coords).collect();
        Ok(neighbors
            .into_iter()
            .map(|pos| self.reveal_at(pos))
            .fold(RevealOutcome::NoChange, RevealOutcome::combine))
    }

    fn reveal_at(&mut self, coords: Coord2) -> RevealOutcome {
        if self.state.is_finished() || self.board[coords.to_nd_index()] != CellKind::Unrevealed {
            return RevealOutcome::NoChange;
        }

        if self.minefield.contains_mine(coords) {
            self.state = GameState::Lost;
            return RevealOutcome::HitMine;
        }

        let mut to_visit = vec![coords];
        while let Some(pos) = to_visit.pop() {
            if self.board[pos.to_nd_index()] != CellKind::Unrevealed {
                continue;
            }

            let adjacent_mines = self.minefield.adjacent_mine_count(pos);
            self.board[pos.to_nd_index()] = CellKind::Number(adjacent_mines);
            self.revealed_count += 1;

            // Zero cells never border a mine, so flooding over them is safe.
            if adjacent_mines == 0 {
                to_visit.extend(self.minefield.iter_neighbors(pos));
            }
        }

        if self.revealed_count == self.minefield.safe_cell_count() {
            self.state = GameState::Won;
            RevealOutcome::Won
        } else {
            if self.state == GameState::Ready {
                self.state = GameState::Active;
            }
            RevealOutcome::Revealed
        }
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.minefield
            .iter_neighbors(coords)
            .filter(|&pos| self.board[pos.to_nd_index()] == CellKind::Flag)
            .count()
            .try_into()
            .expect("more than eight neighbors")
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

/// Concrete [`Control`] binding for [`Game`].
///
/// Every action records its history entry first and applies the board
/// mutation second; mutations swallowed by the engine (out of bounds,
/// finished game) still leave their entry behind. The board is read and
/// written through a `RefCell` so cells can dispatch actions through their
/// shared back-reference.
#[derive(Debug)]
pub struct GameControl {
    game: RefCell<Game>,
    seen: RefCell<Array2<CellKind>>,
    history: History,
}

impl GameControl {
    pub fn new(minefield: Minefield) -> Self {
        Self::from_game(Game::new(minefield))
    }

    pub fn from_game(game: Game) -> Self {
        let seen = Array2::default(game.size().to_nd_index());
        Self {
            game: RefCell::new(game),
            seen: RefCell::new(seen),
            history: History::new(),
        }
    }

    pub fn game_state(&self) -> GameState {
        self.game.borrow().state()
    }

    pub fn is_finished(&self) -> bool {
        self.game.borrow().is_finished()
    }

    fn in_bounds(&self, coords: Coord2) -> bool {
        let (width, height) = self.get_board_size();
        coords.0 < width && coords.1 < height
    }
}

impl Control for GameControl {
    fn history(&self) -> &History {
        &self.history
    }

    fn get_cell(&self, coords: Coord2) -> Option<Cell<'_>> {
        if !self.in_bounds(coords) {
            return None;
        }
        let kind = self.game.borrow().kind_at(coords);
        Some(Cell::new(self, coords, kind))
    }

    fn get_cells(&self) -> Vec<Cell<'_>> {
        let (width, height) = self.get_board_size();
        let mut cells = Vec::with_capacity(usize::from(width) * usize::from(height));
        for y in 0..height {
            for x in 0..width {
                cells.extend(self.get_cell((x, y)));
            }
        }
        cells
    }

    fn get_dirty_cells(&self) -> Vec<Cell<'_>> {
        let seen = self.seen.borrow();
        self.get_cells()
            .into_iter()
            .filter(|cell| seen[cell.coords().to_nd_index()] != cell.kind())
            .collect()
    }

    fn get_board_size(&self) -> Coord2 {
        self.game.borrow().size()
    }

    fn get_mines_left(&self) -> isize {
        self.game.borrow().mines_left()
    }

    fn reset_cache(&self) {
        let game = self.game.borrow();
        let mut seen = self.seen.borrow_mut();
        let (width, height) = game.size();
        for y in 0..height {
            for x in 0..width {
                seen[(x, y).to_nd_index()] = game.kind_at((x, y));
            }
        }
    }

    fn click(&self, coords: Coord2) {
        self.history().record(Action::Click, coords);
        if let Err(err) = self.game.borrow_mut().reveal(coords) {
            log::debug!("click at {coords:?} ignored: {err}");
        }
    }

    fn right_click(&self, coords: Coord2) {
        self.history().record(Action::RightClick, coords);
        if let Err(err) = self.game.borrow_mut().toggle_flag(coords) {
            log::debug!("right click at {coords:?} ignored: {err}");
        }
    }

    fn middle_click(&self, coords: Coord2) {
        self.history().record(Action::MiddleClick, coords);
        if let Err(err) = self.game.borrow_mut().chord(coords) {
            log::debug!("middle click at {coords:?} ignored: {err}");
        }
    }
}
