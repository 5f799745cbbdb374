use std::time::Duration;

use crate::sampler::Classification;

/// Visual elements the controller shows and hides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum Element {
    Axes,
    Circle,
    StartButton,
    StopButton,
    ResumeButton,
    RestartButton,
}

/// Text fields the controller writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum TextField {
    PiEstimate,
    Progress,
}

/// The presentation surface driven by [`crate::Controller`].
///
/// Everything runs on one thread: the controller writes, the renderer
/// reads, and `yield_to_host` hands control back to whatever event loop
/// is hosting the renderer.
pub trait Renderer {
    /// Replace the displayed points. Both slices have the same length.
    fn set_points(&mut self, coords: &[[f64; 2]], classes: &[Classification]);

    fn set_text(&mut self, field: TextField, value: String);

    fn set_visibility(&mut self, element: Element, visible: bool);

    /// `false` once the user has closed the display.
    fn is_open(&self) -> bool;

    fn request_redraw(&mut self);

    /// Give the host loop a chance to process input before the next tick.
    fn yield_to_host(&mut self, duration: Duration);
}
