//! Ordered, batch bounded execution of per segment tasks.
//!
//! Indices `0..total` are split into at most `batches` consecutive ranges of
//! `ceil(total / batches)` indices. All tasks of a range are created and polled
//! together, and the next range starts only once every task of the current one
//! has finished. Results land in slots addressed by index, so the order in which
//! tasks complete never leaks into the output.

use crate::Result;
use futures::future::try_join_all;
use log::debug;
use std::{future::Future, ops::Range};

/// Number of batches a download is split into.
pub const DEFAULT_BATCHES: usize = 10;

/// Number of tasks in every batch but possibly the last.
pub fn batch_size(total: usize, batches: usize) -> usize {
    total.div_ceil(batches.max(1))
}

/// Consecutive index ranges covering `0..total` exactly once.
pub fn partition(total: usize, batches: usize) -> Vec<Range<usize>> {
    let size = batch_size(total, batches);

    if size == 0 {
        return vec![];
    }

    (0..total)
        .step_by(size)
        .map(|start| start..(start + size).min(total))
        .collect()
}

/// Runs `task(index)` for every index in `0..total` batch by batch.
///
/// The first failing task fails the whole run and no later batch is started.
pub async fn run_batches<T, F, Fut>(total: usize, batches: usize, mut task: F) -> Result<Vec<T>>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut slots = (0..total).map(|_| None).collect::<Vec<Option<T>>>();
    let ranges = partition(total, batches);
    let count = ranges.len();

    for (n, range) in ranges.into_iter().enumerate() {
        debug!("batch {}/{}: segments {}..{}", n + 1, count, range.start, range.end);

        let pending = range.map(|index| {
            let future = task(index);
            async move { future.await.map(|value| (index, value)) }
        });

        for (index, value) in try_join_all(pending).await? {
            slots[index] = Some(value);
        }
    }

    // partition covers every index, so no slot is left empty
    Ok(slots.into_iter().flatten().collect())
}
