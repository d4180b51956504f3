use rand::prelude::*;
use std::rc::Rc;

use crate::*;

/// Baseline strategy that probes a uniformly random unrevealed cell each
/// turn. Useful as a benchmark opponent and for exercising schedulers.
pub struct RandomDirector {
    control: Option<Rc<dyn Control>>,
    seed: u64,
    rng: SmallRng,
}

impl RandomDirector {
    pub fn new(seed: u64) -> Self {
        Self {
            control: None,
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    fn control(&self) -> &dyn Control {
        self.control
            .as_deref()
            .expect("act() called on an unbound director")
    }
}

impl Default for RandomDirector {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Director for RandomDirector {
    fn name(&self) -> &'static str {
        "random"
    }

    fn set_control(&mut self, control: Rc<dyn Control>) {
        self.control = Some(control);
    }

    fn reset(&mut self) {
        self.rng = SmallRng::seed_from_u64(self.seed);
    }

    fn act(&mut self) {
        let candidates: Vec<Coord2> = self
            .control()
            .get_cells()
            .into_iter()
            .filter(Cell::is_unrevealed)
            .map(|cell| cell.coords())
            .collect();

        if candidates.is_empty() {
            return;
        }

        let coords = candidates[self.rng.random_range(0..candidates.len())];
        log::debug!("randomly probing {coords:?}");
        self.control().click(coords);
    }
}
