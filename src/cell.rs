use core::fmt;
use core::hash::{Hash, Hasher};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::types::apply_delta;
use crate::*;

/// Player-observable type of a single grid position.
///
/// `Number(n)` carries the adjacent-mine count and is only ever constructed
/// with `n` in `0..=8`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Number(u8),
    Unrevealed,
    Flag,
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(count) => write!(f, "{count}"),
            Self::Unrevealed => write!(f, "unrevealed"),
            Self::Flag => write!(f, "flag"),
        }
    }
}

impl Default for CellKind {
    fn default() -> Self {
        Self::Unrevealed
    }
}

/// The eight neighbor offsets, clockwise from the top-left corner.
///
/// The order is significant: the across/perpendicular helpers treat
/// membership in this exact sequence as the definition of adjacency.
pub const NEIGHBOR_DELTAS: [Delta2; 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
];

/// The four cardinal neighbor offsets, clockwise from north.
pub const CARDINAL_DELTAS: [Delta2; 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Identifier for a zero-argument boolean query on a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CellPredicate {
    Flagged,
    Number,
    Empty,
    Unrevealed,
    Revealed,
    OnBorder,
}

impl CellPredicate {
    /// Dispatch table from predicate identifier to the query it names.
    pub fn eval(self, cell: &Cell<'_>) -> bool {
        match self {
            Self::Flagged => cell.is_flagged(),
            Self::Number => cell.is_number(),
            Self::Empty => cell.is_empty(),
            Self::Unrevealed => cell.is_unrevealed(),
            Self::Revealed => cell.is_revealed(),
            Self::OnBorder => cell.is_on_border(),
        }
    }
}

/// One conjunct of a neighbor-query filter: the named predicate must
/// evaluate to `expected`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellFilter {
    pub predicate: CellPredicate,
    pub expected: bool,
}

impl CellFilter {
    pub const fn is(predicate: CellPredicate) -> Self {
        Self {
            predicate,
            expected: true,
        }
    }

    pub const fn is_not(predicate: CellPredicate) -> Self {
        Self {
            predicate,
            expected: false,
        }
    }

    pub fn matches(&self, cell: &Cell<'_>) -> bool {
        self.predicate.eval(cell) == self.expected
    }
}

/// Immutable snapshot of one grid position as seen by a player.
///
/// A cell is fetched fresh from its control for every decision; it becomes
/// stale, never invalid, the moment the underlying board changes. It holds
/// a non-owning back-reference to the control that produced it, which is
/// also its channel for dispatching actions.
#[derive(Copy, Clone)]
pub struct Cell<'a> {
    control: &'a dyn Control,
    x: Coord,
    y: Coord,
    kind: CellKind,
    idx: CellCount,
}

impl<'a> Cell<'a> {
    pub fn new(control: &'a dyn Control, (x, y): Coord2, kind: CellKind) -> Self {
        let (_, height) = control.get_board_size();
        assert!(height > 0, "cell constructed for a zero-height board");
        Self {
            control,
            x,
            y,
            kind,
            idx: mult(x, height) + CellCount::from(y),
        }
    }

    pub const fn x(&self) -> Coord {
        self.x
    }

    pub const fn y(&self) -> Coord {
        self.y
    }

    pub const fn coords(&self) -> Coord2 {
        (self.x, self.y)
    }

    pub const fn kind(&self) -> CellKind {
        self.kind
    }

    /// Linear index `x * height + y`, unique per position for a fixed board.
    pub const fn idx(&self) -> CellCount {
        self.idx
    }

    /// The adjacent-mine count, for revealed numbered cells only.
    ///
    /// `None` for unrevealed, flagged, and empty (zero) cells.
    pub fn number(&self) -> Option<u8> {
        match self.kind {
            CellKind::Number(count) if self.is_number() => Some(count),
            _ => None,
        }
    }

    pub fn is_flagged(&self) -> bool {
        self.kind == CellKind::Flag
    }

    /// Whether this is a revealed cell with a nonzero count. Zero is still
    /// a number, but never one we care about like the others.
    pub fn is_number(&self) -> bool {
        matches!(self.kind, CellKind::Number(1..=8))
    }

    pub fn is_empty(&self) -> bool {
        self.kind == CellKind::Number(0)
    }

    pub fn is_unrevealed(&self) -> bool {
        self.kind == CellKind::Unrevealed
    }

    pub fn is_revealed(&self) -> bool {
        !self.is_unrevealed() && !self.is_flagged()
    }

    /// Whether this cell touches any edge of the grid.
    pub fn is_on_border(&self) -> bool {
        let (width, height) = self.control.get_board_size();
        self.x == 0 || self.x == width - 1 || self.y == 0 || self.y == height - 1
    }

    pub fn click(&self) {
        self.control.click(self.coords());
    }

    pub fn right_click(&self) {
        self.control.right_click(self.coords());
    }

    pub fn middle_click(&self) {
        self.control.middle_click(self.coords());
    }

    pub fn mark(&self, color: MarkColor) {
        self.control.mark(self.coords(), color);
    }

    /// The cell at `(x + dx, y + dy)`, or `None` when off the board.
    pub fn get_neighbor_at(&self, delta: Delta2) -> Option<Cell<'a>> {
        let coords = apply_delta(self.coords(), delta, self.control.get_board_size())?;
        self.control.get_cell(coords)
    }

    fn neighbors_from_deltas(
        &self,
        deltas: &[Delta2],
        filters: &[CellFilter],
    ) -> HashSet<Cell<'a>> {
        deltas
            .iter()
            .filter_map(|&delta| self.get_neighbor_at(delta))
            .filter(|cell| filters.iter().all(|filter| filter.matches(cell)))
            .collect()
    }

    /// The up to eight surrounding cells, restricted to the conjunction of
    /// `filters`.
    pub fn get_neighbors(&self, filters: &[CellFilter]) -> HashSet<Cell<'a>> {
        self.neighbors_from_deltas(&NEIGHBOR_DELTAS, filters)
    }

    /// The up to four edge-sharing cells, restricted to the conjunction of
    /// `filters`.
    pub fn get_cardinal_neighbors(&self, filters: &[CellFilter]) -> HashSet<Cell<'a>> {
        self.neighbors_from_deltas(&CARDINAL_DELTAS, filters)
    }

    /// Steps the offset from `cell` to `self` once more, starting at `cell`.
    ///
    /// `cell` must be one of this cell's eight neighbors, otherwise `None`.
    /// Because the offset is derived from `cell` toward `self`, the step
    /// lands back on `self`'s own coordinates: the result is a fresh
    /// snapshot of this position, not the cell beyond it. The cardinal
    /// variant derives its offset in the opposite direction and does cross
    /// over; the two are deliberately not unified.
    pub fn get_neighbor_across_from(&self, cell: &Cell<'a>) -> Option<Cell<'a>> {
        let delta = (
            self.x as isize - cell.x as isize,
            self.y as isize - cell.y as isize,
        );
        if NEIGHBOR_DELTAS.contains(&delta) {
            cell.get_neighbor_at(delta)
        } else {
            None
        }
    }

    /// The cell one step beyond `cell`, on the far side from `self`.
    ///
    /// `cell` must be one of this cell's four cardinal neighbors, otherwise
    /// `None`. See [`Cell::get_neighbor_across_from`] for the asymmetry.
    pub fn get_cardinal_neighbor_across_from(&self, cell: &Cell<'a>) -> Option<Cell<'a>> {
        let delta = (
            cell.x as isize - self.x as isize,
            cell.y as isize - self.y as isize,
        );
        if CARDINAL_DELTAS.contains(&delta) {
            cell.get_neighbor_at(delta)
        } else {
            None
        }
    }

    /// The up to two cells flanking the line from `cell` to `self`.
    ///
    /// Only meaningful when the two cells share a row or a column; the
    /// result is empty otherwise. The returned cells are offset from `self`
    /// by one unit step along the line's direction and one step to either
    /// side of it.
    pub fn get_perpendicular_neighbors_from(&self, cell: &Cell<'a>) -> HashSet<Cell<'a>> {
        if self.x != cell.x && self.y != cell.y {
            return HashSet::new();
        }

        let step_x = (self.x as isize - cell.x as isize).signum();
        let step_y = (self.y as isize - cell.y as isize).signum();

        let deltas: [Delta2; 2] = if step_x != 0 {
            [(step_x, 1), (step_x, -1)]
        } else if step_y != 0 {
            [(1, step_y), (-1, step_y)]
        } else {
            return HashSet::new();
        };

        self.neighbors_from_deltas(&deltas, &[])
    }

    /// Lazily walks the rasterized straight line from `self` to `cell`.
    ///
    /// Each line point is resolved through the control, so the sequence may
    /// contain `None` entries; they are not filtered out here. The filter
    /// arguments are accepted for signature symmetry with the neighbor
    /// queries but are not applied.
    pub fn trace_to(
        &self,
        cell: &Cell<'a>,
        _filters: &[CellFilter],
    ) -> impl Iterator<Item = Option<Cell<'a>>> + use<'a> {
        let control = self.control;
        int_trace(
            (self.x as isize, self.y as isize),
            (cell.x as isize, cell.y as isize),
        )
        .map(move |(x, y)| -> Option<Cell<'a>> {
            let x: Coord = x.try_into().ok()?;
            let y: Coord = y.try_into().ok()?;
            control.get_cell((x, y))
        })
    }

    /// How many of this numbered cell's mines are still unflagged:
    /// `number - flagged neighbors`. Negative when over-flagged; `None`
    /// when this is not a numbered cell.
    pub fn num_flags_left(&self) -> Option<i8> {
        let number = self.number()? as i8;
        let flagged = self.get_neighbors(&[CellFilter::is(CellPredicate::Flagged)]);
        Some(number - flagged.len() as i8)
    }

    fn control_addr(&self) -> *const () {
        self.control as *const dyn Control as *const ()
    }
}

impl PartialEq for Cell<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.control_addr() == other.control_addr()
            && self.x == other.x
            && self.y == other.y
            && self.kind == other.kind
    }
}

impl Eq for Cell<'_> {}

impl Hash for Cell<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.control_addr().hash(state);
        self.x.hash(state);
        self.y.hash(state);
        self.kind.hash(state);
    }
}

impl fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell(x={}, y={}, type={})", self.x, self.y, self.kind)
    }
}

impl fmt::Debug for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{self}>")
    }
}
