// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use rand::prelude::*;

use crate::config::Config;

/// Upon the insertion of a new entry in the table, the entry is replicated to
/// higher levels with a certain probability as determined by a
/// `LevelGenerator`.
pub trait LevelGenerator {
    /// The total number of levels that are assumed to exist for this level
    /// generator.
    fn total(&self) -> usize;
    /// Generate a random level count for a new entry in the range
    /// `[1, total]`.
    ///
    /// This must never return `0` or a count that is `> self.total()`.
    fn random(&mut self) -> usize;
}

/// A level generator which will produce geometrically distributed level
/// counts.
///
/// Every entry starts with one level and gains another with probability `p`,
/// repeating until a draw fails or the count reaches `total`.
#[derive(Debug)]
pub struct GeometricalLevelGenerator {
    total: usize,
    p: f64,
    rng: SmallRng, // Fast generator
}

impl GeometricalLevelGenerator {
    /// Create a new GeometricalLevelGenerator with `total` number of levels,
    /// and `p` as the probability that a given entry is present in the next
    /// level.
    ///
    /// # Panics
    ///
    /// `p` must be between 0 and 1 and will panic otherwise.  Similarly,
    /// `total` must be at greater or equal to 1.
    pub fn new(total: usize, p: f64) -> Self {
        Self::with_rng(total, p, SmallRng::from_entropy())
    }

    /// Same as [`GeometricalLevelGenerator::new`] but deterministic.
    pub fn with_seed(total: usize, p: f64, seed: u64) -> Self {
        Self::with_rng(total, p, SmallRng::seed_from_u64(seed))
    }

    /// Build from an already validated [`Config`], honouring its seed.
    pub fn from_config(config: &Config) -> Self {
        match config.seed() {
            | Some(seed) => Self::with_seed(config.max_level(), config.p(), seed),
            | None => Self::new(config.max_level(), config.p()),
        }
    }

    fn with_rng(total: usize, p: f64, rng: SmallRng) -> Self {
        if total == 0 {
            panic!("total must be non-zero.");
        }
        if !(p > 0.0 && p < 1.0) {
            panic!("p must be in (0, 1).");
        }
        GeometricalLevelGenerator { total, p, rng }
    }
}

impl Default for GeometricalLevelGenerator {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl LevelGenerator for GeometricalLevelGenerator {
    fn random(&mut self) -> usize {
        let mut h = 1;
        while h < self.total && self.rng.gen::<f64>() < self.p {
            h += 1;
        }
        h
    }

    fn total(&self) -> usize {
        self.total
    }
}
