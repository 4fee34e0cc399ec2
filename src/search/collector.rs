//! Time-limited collection
//!
//! Wraps any Tantivy collector and stops feeding it once a deadline has
//! passed. An expired collection harvests `None` instead of a partial fruit.

use std::time::{Duration, Instant};
use tantivy::collector::{Collector, SegmentCollector};
use tantivy::{DocId, Score, SegmentOrdinal, SegmentReader};

/// Documents collected between clock reads
const CHECK_INTERVAL: u32 = 64;

pub struct TimeLimitCollector<C> {
    inner: C,
    deadline: Instant,
}

impl<C> TimeLimitCollector<C> {
    /// The budget starts counting now
    pub fn new(inner: C, budget: Duration) -> Self {
        Self {
            inner,
            deadline: Instant::now() + budget,
        }
    }
}

impl<C: Collector> Collector for TimeLimitCollector<C> {
    type Fruit = Option<C::Fruit>;
    type Child = TimeLimitSegmentCollector<C::Child>;

    fn for_segment(
        &self,
        segment_local_id: SegmentOrdinal,
        segment: &SegmentReader,
    ) -> tantivy::Result<Self::Child> {
        Ok(TimeLimitSegmentCollector {
            inner: self.inner.for_segment(segment_local_id, segment)?,
            deadline: self.deadline,
            seen: 0,
            expired: Instant::now() >= self.deadline,
        })
    }

    fn requires_scoring(&self) -> bool {
        self.inner.requires_scoring()
    }

    fn merge_fruits(
        &self,
        segment_fruits: Vec<Option<<C::Child as SegmentCollector>::Fruit>>,
    ) -> tantivy::Result<Self::Fruit> {
        let complete: Option<Vec<_>> = segment_fruits.into_iter().collect();
        match complete {
            Some(fruits) => self.inner.merge_fruits(fruits).map(Some),
            None => Ok(None),
        }
    }
}

pub struct TimeLimitSegmentCollector<S> {
    inner: S,
    deadline: Instant,
    seen: u32,
    expired: bool,
}

impl<S: SegmentCollector> SegmentCollector for TimeLimitSegmentCollector<S> {
    type Fruit = Option<S::Fruit>;

    fn collect(&mut self, doc: DocId, score: Score) {
        if self.expired {
            return;
        }
        if self.seen % CHECK_INTERVAL == 0 && Instant::now() >= self.deadline {
            self.expired = true;
            return;
        }
        self.seen = self.seen.wrapping_add(1);
        self.inner.collect(doc, score);
    }

    fn harvest(self) -> Self::Fruit {
        if self.expired {
            None
        } else {
            Some(self.inner.harvest())
        }
    }
}
