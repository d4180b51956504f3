use ndarray::Array2;
use rand::prelude::*;

use crate::types::apply_delta;

use super::*;

/// Purely random placement, optionally keeping the starting cell safe or
/// even zero.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
    start: Coord2,
    start_cell: StartCell,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64, start: Coord2, start_cell: StartCell) -> Self {
        Self {
            seed,
            start,
            start_cell,
        }
    }

    /// The coordinates reserved for the requested start-cell protection.
    fn protected_coords(&self, actual: StartCell, bounds: Coord2) -> Vec<Coord2> {
        match actual {
            StartCell::Random => Vec::new(),
            StartCell::SimpleSafe => vec![self.start],
            StartCell::AlwaysZero => {
                let mut coords = vec![self.start];
                coords.extend(
                    NEIGHBOR_DELTAS
                        .into_iter()
                        .filter_map(|delta| apply_delta(self.start, delta, bounds)),
                );
                coords
            }
        }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Minefield {
        use StartCell::*;

        let total_cells = config.total_cells();

        // A full board leaves nothing to randomize.
        if config.mines >= total_cells {
            if config.mines > total_cells {
                log::warn!(
                    "minefield already full, requested {} but only {} fit",
                    config.mines,
                    total_cells
                );
            }
            return Minefield::from_mine_mask(Array2::from_elem(
                config.size.to_nd_index(),
                true,
            ));
        }

        let actual_start_cell = match self.start_cell {
            Random => Random,
            SimpleSafe | AlwaysZero if config.mines + 1 > total_cells => {
                log::warn!("cannot make start cell safe, falling back to random");
                Random
            }
            SimpleSafe => SimpleSafe,
            AlwaysZero if config.mines + 9 > total_cells => {
                log::warn!("cannot make start cell zero, falling back to simple safe");
                SimpleSafe
            }
            AlwaysZero => AlwaysZero,
        };

        let protected = self.protected_coords(actual_start_cell, config.size);

        let mut open_coords: Vec<Coord2> = Vec::with_capacity(total_cells.into());
        let (width, height) = config.size;
        for x in 0..width {
            for y in 0..height {
                let coords = (x, y);
                if !protected.contains(&coords) {
                    open_coords.push(coords);
                }
            }
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut mines_placed = 0;
        while mines_placed < config.mines && !open_coords.is_empty() {
            let pick = rng.random_range(0..open_coords.len());
            let coords = open_coords.swap_remove(pick);
            mines[coords.to_nd_index()] = true;
            mines_placed += 1;
        }

        if mines_placed != config.mines {
            log::warn!(
                "generated minefield count mismatch, actual: {}, requested: {}",
                mines_placed,
                config.mines
            );
        }

        Minefield::from_mine_mask(mines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_the_requested_number_of_mines() {
        let config = GameConfig::new((9, 9), 10);
        let field = RandomMinefieldGenerator::new(7, (4, 4), StartCell::Random).generate(config);
        assert_eq!(field.mine_count(), 10);
        assert_eq!(field.size(), (9, 9));
    }

    #[test]
    fn is_deterministic_per_seed() {
        let config = GameConfig::new((9, 9), 10);
        let first = RandomMinefieldGenerator::new(42, (0, 0), StartCell::Random).generate(config);
        let second = RandomMinefieldGenerator::new(42, (0, 0), StartCell::Random).generate(config);
        assert_eq!(first, second);
    }

    #[test]
    fn simple_safe_start_is_never_a_mine() {
        let config = GameConfig::new((4, 4), 15);
        let field =
            RandomMinefieldGenerator::new(3, (2, 2), StartCell::SimpleSafe).generate(config);
        assert!(!field.contains_mine((2, 2)));
        assert_eq!(field.mine_count(), 15);
    }

    #[test]
    fn always_zero_start_has_no_adjacent_mines() {
        let config = GameConfig::new((9, 9), 30);
        let field =
            RandomMinefieldGenerator::new(11, (4, 4), StartCell::AlwaysZero).generate(config);
        assert!(!field.contains_mine((4, 4)));
        assert_eq!(field.adjacent_mine_count((4, 4)), 0);
        assert_eq!(field.mine_count(), 30);
    }

    #[test]
    fn over_constrained_boards_fall_back() {
        // 2x2 with 3 mines cannot keep a zero start; it degrades to a
        // simple safe start.
        let config = GameConfig::new((2, 2), 3);
        let field =
            RandomMinefieldGenerator::new(5, (0, 0), StartCell::AlwaysZero).generate(config);
        assert!(!field.contains_mine((0, 0)));
        assert_eq!(field.mine_count(), 3);
    }
}
