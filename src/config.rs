// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use getset::CopyGetters;

use crate::errs::{
    SkipTableError,
    SkipTableError::{
        InvalidMaxLevel,
        InvalidProbability,
    },
};

/// The chance that a new entry is promoted one more level. Expected level
/// count of an entry is `1 / (1 - p)`.
pub const DEFAULT_P: f64 = 0.25;

/// The hard cap on how many levels an entry, and therefore the table, can
/// have.
pub const DEFAULT_MAX_LEVEL: usize = 64;

/// Level constants for a [`crate::SkipTable`].
///
/// A table takes its config by value when it's built, so the constants can't
/// change once there are entries in it.
#[derive(Debug, Clone, Copy, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Config {
    p: f64,
    max_level: usize,
    seed: Option<u64>,
}

impl Config {
    pub fn new(p: f64, max_level: usize) -> Result<Self, SkipTableError> {
        // written this way so NaN falls through to the error
        if !(p > 0.0 && p < 1.0) {
            return Err(InvalidProbability(p));
        }
        if max_level == 0 {
            return Err(InvalidMaxLevel(max_level));
        }
        Ok(Self {
            p,
            max_level,
            seed: None,
        })
    }

    /// Fix the level generator's seed so level assignment is reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            p: DEFAULT_P,
            max_level: DEFAULT_MAX_LEVEL,
            seed: None,
        }
    }
}
