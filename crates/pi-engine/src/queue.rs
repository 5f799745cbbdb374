use std::collections::VecDeque;

use crate::sampler::{Classification, SamplePoint};

/// Preview points waiting to be drawn, consumed front to back.
#[derive(Debug, Default)]
pub struct DisplayQueue {
    pending: VecDeque<SamplePoint>,
}

impl DisplayQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn extend(&mut self, points: impl IntoIterator<Item = SamplePoint>) {
        self.pending.extend(points);
    }

    /// Move up to `max` points into `shown`. Returns how many moved.
    pub fn drain_into(&mut self, shown: &mut DisplayedPoints, max: usize) -> usize {
        let count = self.pending.len().min(max);
        for point in self.pending.drain(..count) {
            shown.push(point);
        }
        count
    }
}

/// Everything drawn so far in the current run, as parallel arrays so the
/// renderer can take coordinates and classifications as slices.
#[derive(Debug, Default)]
pub struct DisplayedPoints {
    coords: Vec<[f64; 2]>,
    classes: Vec<Classification>,
}

impl DisplayedPoints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: SamplePoint) {
        self.coords.push(point.position.to_array());
        self.classes.push(point.class);
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn coords(&self) -> &[[f64; 2]] {
        &self.coords
    }

    pub fn classes(&self) -> &[Classification] {
        &self.classes
    }
}
