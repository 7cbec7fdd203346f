// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use std::fmt;

use getset::{
    CopyGetters,
    Getters,
};

/// Stable handle to an entry in a table's arena.
///
/// Entries are never removed, so a handle stays valid for the lifetime of the
/// table that issued it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) struct EntryId(usize);

impl EntryId {
    #[inline]
    pub(crate) fn new(idx: usize) -> Self {
        Self(idx)
    }

    #[inline]
    pub(crate) fn idx(self) -> usize {
        self.0
    }
}

/// Per-level link of an entry.
///
/// `span` counts level-0 hops from the owner to `forward`. When `forward` is
/// `None` it counts the entries left after the owner instead, which keeps the
/// arithmetic in [`crate::SkipTable::insert`] uniform at the end of a level.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, CopyGetters)]
#[getset(get_copy = "pub(crate)")]
pub(crate) struct Level {
    pub(crate) forward: Option<EntryId>,
    pub(crate) span: usize,
}

impl Level {
    pub(crate) fn new(forward: Option<EntryId>, span: usize) -> Self {
        Self { forward, span }
    }
}

/// A single indexed record.
#[derive(Getters, CopyGetters)]
pub struct Entry<P> {
    /// The sort key. Not unique.
    #[getset(get_copy = "pub")]
    score: f64,
    /// Caller data, never looked at by the table.
    #[getset(get = "pub")]
    payload: P,
    /// Level-0 predecessor, `None` when this is the first entry.
    pub(crate) backward: Option<EntryId>,
    /// Sized once at creation, never resized.
    pub(crate) levels: Box<[Level]>,
}

impl<P> Entry<P> {
    pub(crate) fn new(score: f64, payload: P, backward: Option<EntryId>, levels: Box<[Level]>) -> Self {
        debug_assert!(!levels.is_empty());
        Self {
            score,
            payload,
            backward,
            levels,
        }
    }

    /// How many levels this entry participates in.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn into_payload(self) -> P {
        self.payload
    }
}

impl<P: fmt::Debug> fmt::Debug for Entry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("score", &self.score)
            .field("payload", &self.payload)
            .field("levels", &self.levels.len())
            .finish()
    }
}
