use std::rc::Rc;

use crate::*;

/// Single-cell deduction strategy.
///
/// Flags the neighbors of any number whose remaining mines exactly fill its
/// unrevealed neighbors, chords any number whose flags are already placed,
/// and probes the first unrevealed cell when no deduction applies.
#[derive(Default)]
pub struct NaiveDirector {
    control: Option<Rc<dyn Control>>,
}

impl NaiveDirector {
    pub fn new() -> Self {
        Self::default()
    }

    fn control(&self) -> &dyn Control {
        self.control
            .as_deref()
            .expect("act() called on an unbound director")
    }
}

impl Director for NaiveDirector {
    fn name(&self) -> &'static str {
        "naive"
    }

    fn set_control(&mut self, control: Rc<dyn Control>) {
        self.control = Some(control);
    }

    fn act(&mut self) {
        let control = self.control();
        let mut acted = false;

        for cell in control.get_cells() {
            let Some(flags_left) = cell.num_flags_left() else {
                continue;
            };
            let unrevealed = cell.get_neighbors(&[CellFilter::is(CellPredicate::Unrevealed)]);

            if flags_left > 0 && unrevealed.len() == flags_left as usize {
                log::debug!("flagging the remaining mines around {cell}");
                for neighbor in &unrevealed {
                    neighbor.right_click();
                }
                acted = true;
            } else if flags_left == 0 && !unrevealed.is_empty() {
                log::debug!("chording the satisfied {cell}");
                cell.middle_click();
                acted = true;
            }
        }

        if !acted {
            if let Some(cell) = control.get_cells().into_iter().find(Cell::is_unrevealed) {
                log::debug!("no deduction available, probing {cell}");
                cell.click();
            }
        }
    }
}
