//! Monte Carlo estimation of π, paced for incremental display.
//!
//! [`Sampler`] draws batches of points in the square [-1, 1]², [`RunningStatistics`]
//! keeps the inside/total counts, and [`Controller`] runs the start/stop/resume/restart
//! state machine that feeds a [`Renderer`] one tick at a time.

pub mod controller;
pub mod error;
pub mod format;
pub mod queue;
pub mod render;
pub mod sampler;
pub mod stats;

pub use controller::{Controller, ControllerState, Pacing, RunConfig, Tick, UserAction};
pub use error::{Error, parse_sample_count};
pub use queue::{DisplayQueue, DisplayedPoints};
pub use render::{Element, Renderer, TextField};
pub use sampler::{
    Classification, SampleBatch, SamplePoint, Sampler, default_batch_size, subsample_stride,
};
pub use stats::RunningStatistics;
