use core::fmt;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

use crate::*;

/// Closed set of legal mark values.
///
/// Marks are purely cosmetic: issuing one records a history entry and
/// nothing else. Restricting the value to this enum is what makes an
/// out-of-range mark unrepresentable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkColor {
    One = 1,
    Two = 2,
    Three = 3,
}

impl MarkColor {
    pub const fn value(self) -> u8 {
        self as u8
    }
}

/// One of the four legal player gestures.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Click,
    RightClick,
    MiddleClick,
    Mark(MarkColor),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Click => write!(f, "click"),
            Self::RightClick => write!(f, "right_click"),
            Self::MiddleClick => write!(f, "middle_click"),
            Self::Mark(color) => write!(f, "mark{}", color.value()),
        }
    }
}

/// One recorded action invocation.
pub type HistoryEntry = (Action, Coord2);

/// Append-only log of every action issued through a control.
///
/// Entries are recorded whether or not the action changed board state.
/// Single writer, interior mutability so that actions can be dispatched
/// through shared references (cells hold one back to their control).
#[derive(Debug, Default)]
pub struct History {
    entries: RefCell<Vec<HistoryEntry>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, action: Action, coords: Coord2) {
        self.entries.borrow_mut().push((action, coords));
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Drops all recorded entries. Only meant for an explicit board reset.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

/// Middleman between directors and the game.
///
/// The query half exposes the board exactly as a player would see it; the
/// action half is the only sanctioned channel through which a director may
/// affect game state. The provided action methods record history and do
/// nothing else; a concrete game binding overrides them to also apply the
/// board mutation, recording history first.
pub trait Control {
    /// The action log backing the provided action methods.
    fn history(&self) -> &History;

    /// The cell at grid `(x, y)`, or `None` if out of bounds.
    fn get_cell(&self, coords: Coord2) -> Option<Cell<'_>>;

    /// All cells, row-major, ascending by `(y, x)`.
    fn get_cells(&self) -> Vec<Cell<'_>>;

    /// Cells whose observed type changed since the last completed turn.
    fn get_dirty_cells(&self) -> Vec<Cell<'_>>;

    /// Board size as `(width, height)`.
    fn get_board_size(&self) -> Coord2;

    /// Number of mines not yet accounted for by flags. May go negative
    /// when the player over-flags.
    fn get_mines_left(&self) -> isize;

    /// Invoked between turns to invalidate any memoized computation.
    fn reset_cache(&self) {}

    /// Click the cell at `coords`, revealing it if unflagged and
    /// unrevealed. May not change the state of the game.
    fn click(&self, coords: Coord2) {
        self.history().record(Action::Click, coords);
    }

    /// Right-click the cell at `coords`, toggling the flag on an
    /// unrevealed cell. May not change the state of the game.
    fn right_click(&self, coords: Coord2) {
        self.history().record(Action::RightClick, coords);
    }

    /// Middle-click the cell at `coords`, cascading a numbered cell when
    /// its flagged-neighbor count matches its number. May not change the
    /// state of the game.
    fn middle_click(&self, coords: Coord2) {
        self.history().record(Action::MiddleClick, coords);
    }

    /// Mark the cell at `coords` for visualization. Never changes game
    /// state; its only observable effect is the history entry.
    fn mark(&self, coords: Coord2, color: MarkColor) {
        self.history().record(Action::Mark(color), coords);
    }

    /// The full history of actions, oldest first.
    fn get_history(&self) -> Vec<HistoryEntry> {
        self.history().entries()
    }
}
