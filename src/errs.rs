// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkipTableError {
    #[error("level probability must be in (0, 1), got {0}")]
    InvalidProbability(f64),
    #[error("max level must be at least 1, got {0}")]
    InvalidMaxLevel(usize),
    #[error("score must not be NaN")]
    InvalidScore,
}
