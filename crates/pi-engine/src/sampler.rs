use glam::DVec2;
use rand::distributions::Uniform;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Number of preview points kept per batch when no override is configured.
pub const DEFAULT_PREVIEW_POINTS: usize = 200;

/// Whether a sample landed inside the unit circle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum Classification {
    Inside,
    Outside,
}

impl Classification {
    pub fn of(position: DVec2) -> Self {
        if position.length_squared() <= 1.0 {
            Self::Inside
        } else {
            Self::Outside
        }
    }

    pub fn is_inside(self) -> bool {
        self == Self::Inside
    }
}

/// A sample point in [-1, 1]² together with its classification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplePoint {
    pub position: DVec2,
    pub class: Classification,
}

impl SamplePoint {
    pub fn new(position: DVec2) -> Self {
        Self {
            position,
            class: Classification::of(position),
        }
    }
}

/// Result of one sampler invocation. Lives for a single tick.
#[derive(Clone, Debug, Default)]
pub struct SampleBatch {
    pub requested: u64,
    pub produced: u64,
    pub inside: u64,
    /// Stride-selected subset of the batch, in generation order.
    pub preview: Vec<SamplePoint>,
}

/// Default batch size for a run of `total` samples.
///
/// Larger runs get larger batches so loop overhead stays small, while
/// small runs keep per-tick latency low.
pub fn default_batch_size(total: u64) -> u64 {
    match total {
        0..=1_000_000 => 10_000,
        1_000_001..=10_000_000 => 100_000,
        10_000_001..=100_000_000 => 1_000_000,
        _ => 5_000_000,
    }
}

/// Preview stride for a batch of `len` points: `max(1, len / preview_points)`.
pub fn subsample_stride(len: u64, preview_points: usize) -> u64 {
    (len / preview_points.max(1) as u64).max(1)
}

/// Draws uniform points in [-1, 1]² and classifies them against the unit circle.
pub struct Sampler<R = SmallRng> {
    rng: R,
    coord: Uniform<f64>,
    preview_points: usize,
}

impl Sampler<SmallRng> {
    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Sampler<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            coord: Uniform::new_inclusive(-1.0, 1.0),
            preview_points: DEFAULT_PREVIEW_POINTS,
        }
    }

    pub fn with_preview_points(mut self, preview_points: usize) -> Self {
        self.preview_points = preview_points.max(1);
        self
    }

    pub fn preview_points(&self) -> usize {
        self.preview_points
    }

    /// One point with two independent uniform coordinates.
    pub fn draw_point(&mut self) -> DVec2 {
        let x = self.rng.sample(self.coord);
        let y = self.rng.sample(self.coord);
        DVec2::new(x, y)
    }

    /// Draw `min(batch_size, remaining)` points.
    ///
    /// Points are classified as they are generated; only the ones at
    /// multiples of the preview stride are retained, so memory stays
    /// bounded by the preview size rather than the batch size.
    pub fn produce_batch(&mut self, remaining: u64, batch_size: u64) -> SampleBatch {
        let count = batch_size.min(remaining);
        let stride = subsample_stride(count, self.preview_points);

        let mut batch = SampleBatch {
            requested: batch_size,
            produced: count,
            inside: 0,
            preview: Vec::with_capacity(count.div_ceil(stride) as usize),
        };

        for i in 0..count {
            let point = SamplePoint::new(self.draw_point());
            if point.class.is_inside() {
                batch.inside += 1;
            }
            if i % stride == 0 {
                batch.preview.push(point);
            }
        }

        batch
    }
}
