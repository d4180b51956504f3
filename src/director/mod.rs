use std::collections::BTreeMap;
use std::rc::Rc;

use crate::*;

pub use naive::*;
pub use random::*;

mod naive;
mod random;

/// A strategy that controls the game, seeing only what a player might see.
///
/// A director starts unbound; [`Director::set_control`] binds it to the
/// control it will observe and act through (calling it again rebinds). The
/// scheduler calls [`Director::act`] once per turn and [`Director::reset`]
/// whenever the board is regenerated. Calling `act` while unbound is a
/// precondition violation and panics.
pub trait Director {
    /// Stable name used for logging and registry assertions.
    fn name(&self) -> &'static str;

    /// Binds this director to `control`. Idempotent; rebinding replaces
    /// the previous control.
    fn set_control(&mut self, control: Rc<dyn Control>);

    /// Called by the scheduler when the board resets. Strategy-local memo
    /// state should be dropped here.
    fn reset(&mut self) {}

    /// Called by the scheduler once per turn. Observe the board and issue
    /// actions here.
    fn act(&mut self);
}

pub type DirectorFactory = Box<dyn Fn() -> Box<dyn Director>>;

/// Explicit slug-to-factory mapping of the available director strategies.
///
/// Constructed once at process start and passed to whatever needs to
/// enumerate strategies; there is no process-wide global. Registering an
/// existing slug silently overwrites it, and nothing unregisters.
#[derive(Default)]
pub struct DirectorRegistry {
    entries: BTreeMap<String, DirectorFactory>,
}

impl DirectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<D>(&mut self, slug: impl Into<String>)
    where
        D: Director + Default + 'static,
    {
        self.register_factory(slug, Box::new(|| Box::new(D::default()) as Box<dyn Director>));
    }

    pub fn register_factory(&mut self, slug: impl Into<String>, factory: DirectorFactory) {
        self.entries.insert(slug.into(), factory);
    }

    /// Instantiates the director registered under `slug`.
    pub fn create(&self, slug: &str) -> Option<Box<dyn Director>> {
        self.entries.get(slug).map(|factory| factory())
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.entries.contains_key(slug)
    }

    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The registry of directors shipped with this crate.
pub fn default_registry() -> DirectorRegistry {
    let mut registry = DirectorRegistry::new();
    registry.register::<NaiveDirector>("naive");
    registry.register::<RandomDirector>("random");
    registry
}
