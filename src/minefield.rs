use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::types::apply_delta;
use crate::*;

/// Authoritative mine placement for one board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Minefield {
    mines: Array2<bool>,
    count: CellCount,
}

impl Minefield {
    pub fn from_mine_mask(mines: Array2<bool>) -> Self {
        let count = mines
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .expect("mine count exceeds cell count range");
        Self { mines, count }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mines: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mines[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mines))
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (width, height) = self.size();
        if coords.0 < width && coords.1 < height {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        crate::types::grid_size(&self.mines)
    }

    pub fn total_cells(&self) -> CellCount {
        let (width, height) = self.size();
        mult(width, height)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.count
    }

    pub fn mine_count(&self) -> CellCount {
        self.count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.mines[coords.to_nd_index()]
    }

    /// Mines among the up to eight cells surrounding `coords`.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self.contains_mine(pos))
            .count()
            .try_into()
            .expect("more than eight neighbors")
    }

    /// In-bounds coordinates of the up to eight cells surrounding `coords`.
    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + use<> {
        let bounds = self.size();
        NEIGHBOR_DELTAS
            .into_iter()
            .filter_map(move |delta| apply_delta(coords, delta, bounds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_mine_coords_rejects_out_of_bounds() {
        assert_eq!(
            Minefield::from_mine_coords((3, 3), &[(3, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn counts_are_derived_from_the_mask() {
        let field = Minefield::from_mine_coords((4, 3), &[(0, 0), (2, 1)]).unwrap();
        assert_eq!(field.mine_count(), 2);
        assert_eq!(field.total_cells(), 12);
        assert_eq!(field.safe_cell_count(), 10);
        assert!(field.contains_mine((2, 1)));
        assert!(!field.contains_mine((1, 1)));
    }

    #[test]
    fn adjacent_mine_count_scans_all_eight_directions() {
        let field =
            Minefield::from_mine_coords((3, 3), &[(0, 0), (1, 0), (2, 0), (0, 1)]).unwrap();
        assert_eq!(field.adjacent_mine_count((1, 1)), 4);
        assert_eq!(field.adjacent_mine_count((2, 2)), 0);
        assert_eq!(field.adjacent_mine_count((1, 2)), 1);
    }

    #[test]
    fn neighbor_iteration_clips_at_corners() {
        let field = Minefield::from_mine_coords((3, 3), &[]).unwrap();
        assert_eq!(field.iter_neighbors((0, 0)).count(), 3);
        assert_eq!(field.iter_neighbors((1, 1)).count(), 8);
    }
}
