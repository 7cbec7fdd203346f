// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use std::{
    iter::FusedIterator,
    ops::Bound,
};

use crate::skiplist::entry::{
    Entry,
    EntryId,
};

/// Level-0 traversal of a [`crate::SkipTable`].
///
/// Going forward follows level-0 links from the head, going backward follows
/// backward links from the tail. The two ends meet without overlapping.
pub struct Iter<'a, P> {
    entries: &'a [Entry<P>],
    front: Option<EntryId>,
    back: Option<EntryId>,
    remaining: usize,
}

impl<'a, P> Iter<'a, P> {
    pub(crate) fn new(entries: &'a [Entry<P>], front: Option<EntryId>, back: Option<EntryId>) -> Self {
        Self {
            entries,
            front,
            back,
            remaining: entries.len(),
        }
    }
}

impl<'a, P> Iterator for Iter<'a, P> {
    type Item = &'a Entry<P>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entries = self.entries;
        let entry = &entries[self.front?.idx()];
        self.front = entry.levels[0].forward();
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<P> DoubleEndedIterator for Iter<'_, P> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entries = self.entries;
        let entry = &entries[self.back?.idx()];
        self.back = entry.backward;
        self.remaining -= 1;
        Some(entry)
    }
}

impl<P> ExactSizeIterator for Iter<'_, P> {}

impl<P> FusedIterator for Iter<'_, P> {}

/// Entries from a starting point up to an upper score bound.
pub struct ScoreRange<'a, P> {
    entries: &'a [Entry<P>],
    next: Option<EntryId>,
    end: Bound<f64>,
}

impl<'a, P> ScoreRange<'a, P> {
    pub(crate) fn new(entries: &'a [Entry<P>], next: Option<EntryId>, end: Bound<f64>) -> Self {
        Self { entries, next, end }
    }

    fn in_bounds(&self, score: f64) -> bool {
        match self.end {
            | Bound::Included(max) => score <= max,
            | Bound::Excluded(max) => score < max,
            | Bound::Unbounded => true,
        }
    }
}

impl<'a, P> Iterator for ScoreRange<'a, P> {
    type Item = &'a Entry<P>;

    fn next(&mut self) -> Option<Self::Item> {
        let entries = self.entries;
        let entry = &entries[self.next?.idx()];
        if !self.in_bounds(entry.score()) {
            self.next = None;
            return None;
        }
        self.next = entry.levels[0].forward();
        Some(entry)
    }
}

impl<P> FusedIterator for ScoreRange<'_, P> {}
