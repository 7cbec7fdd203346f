//! A skip list ordered by floating-point score, the index underneath a sorted
//! set.
//!
//! SkipLists use a probabilistic distribution of entries over the internal
//! levels, whereby the lowest level (level 0) contains all the entries, and
//! each level `n > 0` will contain a random subset of the entries on level
//! `n - 1`.
//!
//! Most commonly, a geometric distribution is used whereby the chance that an
//! entry occupies level `n` is `p` times the chance of occupying level `n-1`
//! (with `0 < p < 1`).
//!
//! Every link also records its span, the number of level-0 hops it covers.
//! Summing spans along a search path gives an entry's rank without walking
//! level 0.
//!
//! It is very unlikely that this will need to be changed as the default should
//! suffice, but if need be custom level generators can be implemented.

mod entry;
mod iter;
mod level_generator;
mod table;

pub use entry::Entry;
pub use iter::{
    Iter,
    ScoreRange,
};
pub use level_generator::{
    GeometricalLevelGenerator,
    LevelGenerator,
};
pub use table::SkipTable;
