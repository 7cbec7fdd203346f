// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

//! An in-memory ordered index of `(score, payload)` entries.
//!
//! ```
//! use skiptable::SkipTable;
//!
//! let mut table = SkipTable::new();
//! table.insert(3.0, "x");
//! table.insert(1.0, "y");
//! table.insert(2.0, "z");
//!
//! let found = table.find_by_score(2.0).unwrap();
//! assert_eq!(*found[0].payload(), "z");
//! assert!(table.find_by_score(9.0).is_none());
//! ```
//!
//! A table is not synchronized. Callers sharing one across threads need to
//! wrap it in a lock.

/// Level constants for a table.
pub mod config;
pub mod errs;
/// A [`skip list`] ranked by score.
///
/// [`skip list`]: https://en.wikipedia.org/wiki/Skip_list
pub mod skiplist;

pub use config::Config;
pub use errs::SkipTableError;
pub use skiplist::{
    Entry,
    SkipTable,
};
