//! Calculator registry: one shared calculator per algorithm.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::calculator::{Algorithm, Calculator};
use crate::fastdoubling::FastDoublingCalculator;
use crate::iterative::IterativeCalculator;

/// Default factory with lazy creation and cache.
pub struct DefaultFactory {
    cache: RwLock<HashMap<Algorithm, Arc<dyn Calculator>>>,
}

impl DefaultFactory {
    /// Create a new default factory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Get or create the calculator for `algorithm`.
    pub fn for_algorithm(&self, algorithm: Algorithm) -> Arc<dyn Calculator> {
        if let Some(calc) = self.cache.read().get(&algorithm) {
            return Arc::clone(calc);
        }
        let calc = create_calculator(algorithm);
        self.cache
            .write()
            .entry(algorithm)
            .or_insert(calc)
            .clone()
    }
}

/// Build a fresh calculator for `algorithm`.
#[must_use]
pub fn create_calculator(algorithm: Algorithm) -> Arc<dyn Calculator> {
    match algorithm {
        Algorithm::Iterative => Arc::new(IterativeCalculator::new()),
        Algorithm::FastDoubling => Arc::new(FastDoublingCalculator::new()),
    }
}

impl Default for DefaultFactory {
    fn default() -> Self {
        Self::new()
    }
}
