//! Ascending sweep of a sorted element list against sorted containers.
//!
//! The element list of one chromosome is a [`SweepLane`]. For every
//! container (a TAD), in ascending order, the lane hands out its head
//! element while the head *touches* the container (`element.start <
//! container.end`). An element ending inside the container is consumed;
//! an element extending past it goes to the carry-over queue and is put
//! back in front of the list by [`SweepLane::rewind`], so the next
//! container sees it again.
//!
//! The touches test does not look at the container start. Elements before
//! the first container, or in a gap between two containers, are handed to
//! the next container.

use std::collections::VecDeque;
use std::ops::{
    Add,
    AddAssign,
};

use crate::data_structs::interval::Span;
use crate::data_structs::typedef::PosType;

/// Counters of one sweep, summed over chromosomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Elements removed from the list because they ended inside a
    /// container.
    pub consumed: usize,
    /// Element to container links created.
    pub links:    usize,
    /// Times an element was moved to the carry-over queue.
    pub carried:  usize,
    /// Elements still in the list when the chromosome ran out of
    /// containers. They are discarded.
    pub leftover: usize,
    /// Elements on chromosomes without any container.
    pub dropped:  usize,
}

impl Add for SweepStats {
    type Output = SweepStats;

    fn add(
        self,
        rhs: Self,
    ) -> Self::Output {
        SweepStats {
            consumed: self.consumed + rhs.consumed,
            links:    self.links + rhs.links,
            carried:  self.carried + rhs.carried,
            leftover: self.leftover + rhs.leftover,
            dropped:  self.dropped + rhs.dropped,
        }
    }
}

impl AddAssign for SweepStats {
    fn add_assign(
        &mut self,
        rhs: Self,
    ) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for SweepStats {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(SweepStats::default(), Add::add)
    }
}

/// Sorted element list of a single chromosome plus its carry-over queue.
///
/// Owned by exactly one chromosome task.
#[derive(Debug)]
pub struct SweepLane<T> {
    pending: VecDeque<T>,
    carry:   Vec<T>,
    stats:   SweepStats,
}

impl<T: Span + Clone> SweepLane<T> {
    /// `items` must be sorted by `(start, end)`.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            pending: VecDeque::from(items),
            carry:   Vec::new(),
            stats:   SweepStats::default(),
        }
    }

    /// True if the head element touches a container ending at
    /// `container_end`.
    pub fn head_touches(
        &self,
        container_end: PosType,
    ) -> bool {
        self.pending
            .front()
            .is_some_and(|head| head.start() < container_end)
    }

    /// Hands out the head element if it touches the container. The element
    /// is consumed if it ends inside the container, and carried over
    /// otherwise.
    pub fn step(
        &mut self,
        container_end: PosType,
    ) -> Option<T> {
        if !self.head_touches(container_end) {
            return None;
        }
        let head = self.pending.pop_front()?;
        if head.end() <= container_end {
            self.stats.consumed += 1;
        }
        else {
            self.stats.carried += 1;
            self.carry.push(head.clone());
        }
        Some(head)
    }

    /// Puts the carried-over elements back in front of the list, in their
    /// original order, and clears the queue.
    pub fn rewind(&mut self) {
        for item in self.carry.drain(..).rev() {
            self.pending.push_front(item);
        }
    }

    pub(crate) fn record_link(&mut self) {
        self.stats.links += 1;
    }

    pub fn remaining(&self) -> usize {
        self.pending.len() + self.carry.len()
    }

    /// Discards what is left and returns the counters.
    pub fn finish(mut self) -> SweepStats {
        self.rewind();
        self.stats.leftover = self.pending.len();
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structs::GenomicInterval;

    fn lane(spans: &[(u32, u32)]) -> SweepLane<GenomicInterval> {
        SweepLane::new(
            spans
                .iter()
                .map(|(s, e)| GenomicInterval::new("chr1", *s, *e))
                .collect(),
        )
    }

    #[test]
    fn consumes_elements_ending_inside() {
        let mut lane = lane(&[(10, 20), (30, 40), (120, 130)]);
        assert_eq!(lane.step(100).map(|i| i.span()), Some((10, 20)));
        assert_eq!(lane.step(100).map(|i| i.span()), Some((30, 40)));
        assert!(lane.step(100).is_none());
        assert_eq!(lane.remaining(), 1);

        let stats = lane.finish();
        assert_eq!(stats.consumed, 2);
        assert_eq!(stats.leftover, 1);
    }

    #[test]
    fn carries_and_rewinds_in_order() {
        let mut lane = lane(&[(50, 150), (60, 170), (90, 95), (110, 120)]);
        let first = (0..)
            .map_while(|_| lane.step(100))
            .map(|i| i.span())
            .collect::<Vec<_>>();
        assert_eq!(first, vec![(50, 150), (60, 170), (90, 95)]);

        lane.rewind();
        let second = (0..)
            .map_while(|_| lane.step(200))
            .map(|i| i.span())
            .collect::<Vec<_>>();
        assert_eq!(second, vec![(50, 150), (60, 170), (110, 120)]);

        let stats = lane.finish();
        assert_eq!(stats.carried, 2);
        assert_eq!(stats.consumed, 4);
        assert_eq!(stats.leftover, 0);
    }

    #[test]
    fn carried_element_left_at_end_is_leftover() {
        let mut lane = lane(&[(50, 150)]);
        assert!(lane.step(100).is_some());
        let stats = lane.finish();
        assert_eq!(stats.leftover, 1);
        assert_eq!(stats.consumed, 0);
    }

    #[test]
    fn stats_sum() {
        let a = SweepStats {
            consumed: 1,
            leftover: 2,
            ..Default::default()
        };
        let b = SweepStats {
            consumed: 3,
            dropped: 4,
            ..Default::default()
        };
        let total: SweepStats = [a, b].into_iter().sum();
        assert_eq!(total.consumed, 4);
        assert_eq!(total.leftover, 2);
        assert_eq!(total.dropped, 4);
    }
}
