use crate::types::SeriesPoint;
use std::collections::VecDeque;

/// Number of points kept by [`RollingSeries`].
pub const SERIES_CAPACITY: usize = 10;

/// Bounded window over the most recent block points, oldest first.
///
/// Once full, every [`append`](RollingSeries::append) evicts the oldest point.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RollingSeries {
    points: VecDeque<SeriesPoint>,
}

impl RollingSeries {
    #[must_use]
    pub fn new() -> Self {
        Self { points: VecDeque::with_capacity(SERIES_CAPACITY + 1) }
    }

    pub fn append(&mut self, point: SeriesPoint) {
        self.points.push_back(point);
        if self.points.len() > SERIES_CAPACITY {
            self.points.pop_front();
        }
    }

    /// Block numbers, used as the chart's x-axis labels.
    #[must_use]
    pub fn labels(&self) -> Vec<u64> {
        self.points.iter().map(|point| point.block_number).collect()
    }

    /// Transaction counts, used as the chart's data.
    #[must_use]
    pub fn values(&self) -> Vec<u64> {
        self.points.iter().map(|point| point.transaction_count).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&SeriesPoint> {
        self.points.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeriesPoint> + '_ {
        self.points.iter()
    }
}
