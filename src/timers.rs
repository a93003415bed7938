//! Wall-clock timing for access checks reported to the metrics sink.

use std::time::{Duration, Instant};

/// Adds the time between [`CheckTimer::start`] and drop to `total`.
///
/// [`AccessEvaluator`](crate::AccessEvaluator) holds one across the
/// collaborator snapshot and the evaluation, so the recorded duration covers
/// store reads as well as the rule chain.
pub struct CheckTimer<'a> {
    started: Instant,
    total: &'a mut Duration,
}

impl<'a> CheckTimer<'a> {
    pub fn start(total: &'a mut Duration) -> Self {
        CheckTimer {
            started: Instant::now(),
            total,
        }
    }
}

impl Drop for CheckTimer<'_> {
    fn drop(&mut self) {
        *self.total += self.started.elapsed();
    }
}
