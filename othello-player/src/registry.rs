//! The list of strategies a front end can choose from.

use crate::strategies::{Manual, MaxCapture, MinOpenness, RandomMove};
use crate::{Scores, Strategy, Version};
use othello_core::{Location, Player, Position};
use std::fmt;
use std::sync::Arc;

/// A strategy listed under a different name.
struct Renamed {
    name: String,
    inner: Arc<dyn Strategy>,
}

impl Strategy for Renamed {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> Version {
        self.inner.version()
    }

    fn decide(&self, position: &Position, player: Player) -> Option<Location> {
        self.inner.decide(position, player)
    }

    fn evaluate(&self, position: &Position, player: Player) -> Option<Scores> {
        self.inner.evaluate(position, player)
    }
}

/// Built-in strategies first, then external ones in registration order.
/// Names are unique: external strategies are listed as "<name> *", with
/// " #2", " #3" and so on appended when that is taken too.
#[derive(Clone)]
pub struct Registry {
    entries: Vec<Arc<dyn Strategy>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl Registry {
    pub fn with_builtins() -> Self {
        Self {
            entries: vec![
                Arc::new(Manual) as Arc<dyn Strategy>,
                Arc::new(RandomMove) as Arc<dyn Strategy>,
                Arc::new(MaxCapture) as Arc<dyn Strategy>,
                Arc::new(MinOpenness) as Arc<dyn Strategy>,
            ],
        }
    }

    /// Add an externally supplied strategy, returning the name it is listed under.
    pub fn register_external(&mut self, strategy: Arc<dyn Strategy>) -> &str {
        let base = format!("{} *", strategy.name());
        let mut name = base.clone();
        let mut suffix = 2;
        while self.contains(&name) {
            name = format!("{} #{}", base, suffix);
            suffix += 1;
        }

        self.entries.push(Arc::new(Renamed {
            name,
            inner: strategy,
        }));
        self.entries[self.entries.len() - 1].name()
    }

    pub fn get(&self, index: usize) -> Option<Arc<dyn Strategy>> {
        self.entries.get(index).cloned()
    }

    pub fn find(&self, name: &str) -> Option<Arc<dyn Strategy>> {
        self.entries.iter().find(|s| s.name() == name).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Strategy>> + '_ {
        self.entries.iter()
    }

    /// Strategies that may take part in automated matches.
    pub fn matchable(&self) -> Vec<Arc<dyn Strategy>> {
        self.iter()
            .filter(|s| !s.version().no_match)
            .cloned()
            .collect()
    }

    /// Strategies that produce evaluation scores.
    pub fn evaluators(&self) -> Vec<Arc<dyn Strategy>> {
        self.iter()
            .filter(|s| !s.version().no_eval)
            .cloned()
            .collect()
    }

    fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|s| s.name() == name)
    }
}

/// One line per strategy: "2: Max capture (2.0.1)".
impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, strategy) in self.entries.iter().enumerate() {
            writeln!(f, "{}: {} ({})", index, strategy.name(), strategy.version())?;
        }
        Ok(())
    }
}
