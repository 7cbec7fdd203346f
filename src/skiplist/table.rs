// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use std::{
    fmt,
    ops::{
        Bound,
        RangeBounds,
    },
};

use tracing::{
    debug,
    instrument,
    trace,
};

use crate::{
    config::Config,
    errs::{
        SkipTableError,
        SkipTableError::InvalidScore,
    },
    skiplist::{
        entry::{
            Entry,
            EntryId,
            Level,
        },
        iter::{
            Iter,
            ScoreRange,
        },
        level_generator::{
            GeometricalLevelGenerator,
            LevelGenerator,
        },
    },
};

/// A skip list of `(score, payload)` entries ordered by score.
///
/// Entries live in an arena and link to each other by [`EntryId`], so the
/// forward, backward and span relations are plain integers. The head sentinel
/// is not in the arena; a cursor of `None` stands for it. The head always has
/// exactly [`SkipTable::level_count`] levels.
///
/// Duplicate scores are allowed. A new entry is placed in front of every
/// existing entry with the same score.
pub struct SkipTable<P, G = GeometricalLevelGenerator> {
    head: Vec<Level>,
    entries: Vec<Entry<P>>,
    tail: Option<EntryId>,
    generator: G,
}

impl<P> SkipTable<P> {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self::with_generator(GeometricalLevelGenerator::from_config(&config))
    }
}

impl<P> Default for SkipTable<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, G: LevelGenerator> SkipTable<P, G> {
    /// Build an empty table that draws level counts from `generator`. The
    /// generator's [`LevelGenerator::total`] is the table's max level.
    pub fn with_generator(generator: G) -> Self {
        assert!(generator.total() >= 1, "level generator must allow at least one level");
        Self {
            head: vec![Level::default()],
            entries: Vec::new(),
            tail: None,
            generator,
        }
    }

    /// Number of entries, not counting the head.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of levels currently in use. Starts at 1 and only grows.
    pub fn level_count(&self) -> usize {
        self.head.len()
    }

    pub fn max_level(&self) -> usize {
        self.generator.total()
    }

    /// The entry with the lowest score, oldest-inserted last among ties.
    pub fn first(&self) -> Option<&Entry<P>> {
        self.head[0].forward().map(|id| self.entry(id))
    }

    pub fn last(&self) -> Option<&Entry<P>> {
        self.tail.map(|id| self.entry(id))
    }

    /// Walk the entries in level-0 order. Reversing the iterator follows the
    /// backward links from the tail.
    pub fn iter(&self) -> Iter<'_, P> {
        Iter::new(&self.entries, self.head[0].forward(), self.tail)
    }

    /// Insert an entry. Inserting the same pair twice makes two entries.
    ///
    /// # Panics
    ///
    /// If `score` is NaN, or if the level generator hands back a level count
    /// outside `1..=max_level`. Either would leave the links inconsistent.
    #[instrument(level = "trace", skip(self, payload))]
    pub fn insert(&mut self, score: f64, payload: P) {
        assert!(!score.is_nan(), "skip table scores must not be NaN");

        let mut update = vec![None; self.level_count()];
        let mut rank = vec![0; self.level_count()];
        self.descend(score, |level, cursor, skipped| {
            update[level] = cursor;
            rank[level] = skipped;
        });

        let level = self.generator.random();
        assert!(
            (1..=self.max_level()).contains(&level),
            "level generator returned {level}, outside 1..={}",
            self.max_level()
        );
        trace!(level, "drew level count");

        if level > self.level_count() {
            debug!(from = self.level_count(), to = level, "growing table levels");
            for _ in self.level_count()..level {
                // a new level starts empty, so the head spans every entry
                self.head.push(Level::new(None, self.entries.len()));
                update.push(None);
                rank.push(0);
            }
        }

        let id = EntryId::new(self.entries.len());
        let mut levels = Vec::with_capacity(level);
        for i in 0..level {
            let skipped = rank[0] - rank[i];
            let prev = &mut self.links_mut(update[i])[i];
            debug_assert!(prev.span >= skipped);
            levels.push(Level::new(prev.forward, prev.span - skipped));
            prev.forward = Some(id);
            prev.span = skipped + 1;
        }
        for i in level..self.level_count() {
            self.links_mut(update[i])[i].span += 1;
        }

        let successor = levels[0].forward();
        self.entries
            .push(Entry::new(score, payload, update[0], levels.into_boxed_slice()));
        match successor {
            | Some(next) => self.entries[next.idx()].backward = Some(id),
            | None => self.tail = Some(id),
        }
    }

    /// Same as [`SkipTable::insert`], but a NaN score is an error instead of a
    /// panic.
    pub fn try_insert(&mut self, score: f64, payload: P) -> Result<(), SkipTableError> {
        if score.is_nan() {
            return Err(InvalidScore);
        }
        self.insert(score, payload);
        Ok(())
    }

    /// Every entry with exactly `score`, in level-0 order, or `None` when
    /// there are none.
    #[instrument(level = "trace", skip(self))]
    pub fn find_by_score(&self, score: f64) -> Option<Vec<&Entry<P>>> {
        let before = self.descend(score, |_, _, _| {});

        let mut found = Vec::new();
        let mut next = self.links(before)[0].forward();
        while let Some(id) = next {
            let entry = self.entry(id);
            if entry.score() != score {
                break;
            }
            found.push(entry);
            next = entry.levels[0].forward();
        }

        if found.is_empty() {
            None
        } else {
            Some(found)
        }
    }

    /// Entries whose score falls inside `range`, in level-0 order.
    #[instrument(level = "trace", skip(self, range))]
    pub fn range_by_score<R: RangeBounds<f64>>(&self, range: R) -> ScoreRange<'_, P> {
        let start = match range.start_bound() {
            | Bound::Unbounded => self.head[0].forward(),
            | Bound::Included(&min) => {
                let before = self.descend(min, |_, _, _| {});
                self.links(before)[0].forward()
            },
            | Bound::Excluded(&min) => {
                let before = self.descend(min, |_, _, _| {});
                let mut next = self.links(before)[0].forward();
                while let Some(id) = next {
                    if self.entry(id).score() > min {
                        break;
                    }
                    next = self.entry(id).levels[0].forward();
                }
                next
            },
        };
        ScoreRange::new(&self.entries, start, range.end_bound().cloned())
    }

    /// Walk from the head down to level 0. On every level, advance while the
    /// next entry's score is `< score`, then report the level, where the
    /// cursor stopped and how many level-0 hops it took to get there.
    ///
    /// Returns the level-0 cursor: the last entry with a score `< score`, or
    /// `None` for the head.
    fn descend(&self, score: f64, mut on_level: impl FnMut(usize, Option<EntryId>, usize)) -> Option<EntryId> {
        let mut cursor = None;
        let mut rank = 0;
        for level in (0..self.level_count()).rev() {
            while let Some(next) = self.links(cursor)[level].forward() {
                if self.entry(next).score() >= score {
                    break;
                }
                rank += self.links(cursor)[level].span();
                cursor = Some(next);
            }
            on_level(level, cursor, rank);
        }
        cursor
    }

    #[inline]
    pub(crate) fn entry(&self, id: EntryId) -> &Entry<P> {
        &self.entries[id.idx()]
    }

    #[inline]
    pub(crate) fn links(&self, at: Option<EntryId>) -> &[Level] {
        match at {
            | None => &self.head,
            | Some(id) => &self.entries[id.idx()].levels,
        }
    }

    #[inline]
    fn links_mut(&mut self, at: Option<EntryId>) -> &mut [Level] {
        match at {
            | None => &mut self.head,
            | Some(id) => &mut self.entries[id.idx()].levels,
        }
    }

    #[cfg(test)]
    pub(crate) fn tail_id(&self) -> Option<EntryId> {
        self.tail
    }
}

impl<'a, P, G: LevelGenerator> IntoIterator for &'a SkipTable<P, G> {
    type IntoIter = Iter<'a, P>;
    type Item = &'a Entry<P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<P, G: LevelGenerator> Extend<(f64, P)> for SkipTable<P, G> {
    fn extend<I: IntoIterator<Item = (f64, P)>>(&mut self, iter: I) {
        for (score, payload) in iter {
            self.insert(score, payload);
        }
    }
}

impl<P> FromIterator<(f64, P)> for SkipTable<P> {
    fn from_iter<I: IntoIterator<Item = (f64, P)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<P: fmt::Debug, G: LevelGenerator> fmt::Debug for SkipTable<P, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkipTable")
            .field("len", &self.len())
            .field("level_count", &self.level_count())
            .field("entries", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skiplist::test::{
        assert_consistent,
        payloads,
        Scripted,
    };

    #[test]
    fn empty() {
        let table: SkipTable<&str> = SkipTable::new();
        assert_eq!(table.len(), 0);
        assert!(table.is_empty());
        assert_eq!(table.level_count(), 1);
        assert_eq!(table.max_level(), 64);
        assert!(table.first().is_none());
        assert!(table.last().is_none());
        assert!(table.find_by_score(0.0).is_none());
        assert_eq!(table.iter().count(), 0);
        assert_consistent(&table);
    }

    #[test]
    fn scenario() {
        let mut table = SkipTable::with_config(Config::default().with_seed(3));
        table.insert(3.0, "x");
        table.insert(1.0, "y");
        table.insert(2.0, "z");

        let order: Vec<_> = table.iter().map(|e| (e.score(), *e.payload())).collect();
        assert_eq!(order, vec![(1.0, "y"), (2.0, "z"), (3.0, "x")]);
        assert_eq!(payloads(table.find_by_score(2.0)), Some(vec!["z"]));
        assert!(table.find_by_score(9.0).is_none());
        assert_eq!(table.len(), 3);
        assert_consistent(&table);
    }

    #[test]
    fn equal_scores_newest_first() {
        let mut table = SkipTable::with_config(Config::default().with_seed(11));
        table.insert(5.0, "a");
        table.insert(5.0, "b");
        table.insert(5.0, "c");
        assert_eq!(payloads(table.find_by_score(5.0)), Some(vec!["c", "b", "a"]));
        assert_consistent(&table);
    }

    #[test]
    fn duplicates_are_distinct() {
        let mut table = SkipTable::new();
        table.insert(1.0, "same");
        table.insert(1.0, "same");
        assert_eq!(table.len(), 2);
        assert_eq!(payloads(table.find_by_score(1.0)), Some(vec!["same", "same"]));
    }

    #[test]
    fn growth_spans_existing_entries() {
        // the third insert lifts the table to three levels while two entries
        // already sit on level 0
        let mut table = SkipTable::with_generator(Scripted::new(4, [1, 1, 3, 2]));
        table.insert(10.0, "a");
        table.insert(30.0, "c");
        assert_eq!(table.level_count(), 1);

        table.insert(20.0, "b");
        assert_eq!(table.level_count(), 3);
        assert_eq!(table.links(None)[1].span(), 2);
        assert_eq!(table.links(None)[2].span(), 2);
        assert_consistent(&table);

        table.insert(40.0, "d");
        assert_eq!(table.level_count(), 3);
        assert_consistent(&table);

        let order: Vec<_> = table.iter().map(|e| *e.payload()).collect();
        assert_eq!(order, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn insert_at_front_and_back() {
        let mut table = SkipTable::with_generator(Scripted::new(3, [2, 3, 1, 2, 1]));
        for (score, name) in [(5.0, "m"), (1.0, "lo"), (9.0, "hi"), (0.5, "lower"), (10.0, "higher")] {
            table.insert(score, name);
            assert_consistent(&table);
        }
        assert_eq!(*table.first().unwrap().payload(), "lower");
        assert_eq!(*table.last().unwrap().payload(), "higher");
        assert!(table.first().unwrap().backward.is_none());
    }

    #[test]
    #[should_panic(expected = "NaN")]
    fn nan_panics() {
        let mut table = SkipTable::new();
        table.insert(f64::NAN, ());
    }

    #[test]
    fn try_insert_reports_nan() {
        let mut table = SkipTable::new();
        assert_eq!(table.try_insert(f64::NAN, ()), Err(InvalidScore));
        assert!(table.is_empty());
        assert_eq!(table.try_insert(1.0, ()), Ok(()));
        assert_eq!(table.len(), 1);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn generator_overshoot_panics() {
        let mut table = SkipTable::with_generator(Scripted::new(2, [3]));
        table.insert(1.0, ());
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn generator_zero_panics() {
        let mut table = SkipTable::with_generator(Scripted::new(2, [0]));
        table.insert(1.0, ());
    }

    #[test]
    fn nan_probe_is_not_found() {
        let mut table = SkipTable::new();
        table.insert(1.0, ());
        assert!(table.find_by_score(f64::NAN).is_none());
    }

    #[test]
    fn infinities() {
        let mut table = SkipTable::new();
        table.extend([(f64::INFINITY, "inf"), (0.0, "zero"), (f64::NEG_INFINITY, "-inf")]);
        let order: Vec<_> = table.iter().map(|e| *e.payload()).collect();
        assert_eq!(order, vec!["-inf", "zero", "inf"]);
        assert_eq!(payloads(table.find_by_score(f64::INFINITY)), Some(vec!["inf"]));
        assert_consistent(&table);
    }

    #[test]
    fn range_by_score_bounds() {
        fn got(range: ScoreRange<'_, u32>) -> Vec<u32> {
            range.map(|e| *e.payload()).collect()
        }

        let table: SkipTable<u32> = (0..10).map(|i| (i as f64, i)).collect();

        assert_eq!(got(table.range_by_score(3.0..6.0)), vec![3, 4, 5]);
        assert_eq!(got(table.range_by_score(3.0..=6.0)), vec![3, 4, 5, 6]);
        assert_eq!(got(table.range_by_score(..2.0)), vec![0, 1]);
        assert_eq!(got(table.range_by_score(8.5..)), vec![9]);
        assert_eq!(got(table.range_by_score(..)).len(), 10);
        assert_eq!(
            got(table.range_by_score((Bound::Excluded(4.0), Bound::Included(6.0)))),
            vec![5, 6]
        );
        assert!(got(table.range_by_score(20.0..30.0)).is_empty());
        assert!(got(table.range_by_score(6.0..3.0)).is_empty());
    }

    #[test]
    fn range_excluded_skips_ties() {
        let mut table = SkipTable::new();
        table.extend([(1.0, "a"), (2.0, "b"), (2.0, "c"), (2.0, "d"), (3.0, "e")]);
        let got: Vec<_> = table
            .range_by_score((Bound::Excluded(2.0), Bound::Unbounded))
            .map(|e| *e.payload())
            .collect();
        assert_eq!(got, vec!["e"]);
    }

    #[test]
    fn debug_lists_entries() {
        let mut table = SkipTable::new();
        table.insert(1.0, "one");
        let out = format!("{table:?}");
        assert!(out.contains("len: 1"));
        assert!(out.contains("\"one\""));
    }
}
