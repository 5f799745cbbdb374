use crate::sampler::SampleBatch;

/// Cumulative counts for one run.
///
/// Invariant: `inside_total <= samples_done <= target_samples`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunningStatistics {
    samples_done: u64,
    inside_total: u64,
    target_samples: u64,
}

impl RunningStatistics {
    pub fn new(target_samples: u64) -> Self {
        Self {
            samples_done: 0,
            inside_total: 0,
            target_samples,
        }
    }

    pub fn samples_done(&self) -> u64 {
        self.samples_done
    }

    pub fn inside_total(&self) -> u64 {
        self.inside_total
    }

    pub fn target_samples(&self) -> u64 {
        self.target_samples
    }

    pub fn remaining(&self) -> u64 {
        self.target_samples - self.samples_done
    }

    pub fn is_complete(&self) -> bool {
        self.samples_done >= self.target_samples
    }

    /// Fold a batch into the totals. The whole batch counts, not just its preview.
    pub fn apply(&mut self, batch: &SampleBatch) {
        debug_assert!(batch.inside <= batch.produced);
        let produced = batch.produced.min(self.remaining());
        self.samples_done += produced;
        self.inside_total += batch.inside.min(produced);
    }

    /// `4 * inside / done`, or `None` before the first batch.
    pub fn pi_estimate(&self) -> Option<f64> {
        (self.samples_done > 0)
            .then(|| 4.0 * self.inside_total as f64 / self.samples_done as f64)
    }
}
