use std::time::Duration;

use crossbeam_channel::Receiver;
use pi_engine::{
    Classification, Controller, ControllerState, Element, Error, Renderer, TextField, Tick,
    UserAction,
};

/// Renderer without a window: remembers the latest captions and point count
/// and sleeps on `yield_to_host`.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    pub pi_estimate: String,
    pub progress: String,
    pub points: usize,
    last_logged: String,
}

impl Renderer for TerminalRenderer {
    fn set_points(&mut self, coords: &[[f64; 2]], _classes: &[Classification]) {
        self.points = coords.len();
    }

    fn set_text(&mut self, field: TextField, value: String) {
        match field {
            TextField::PiEstimate => self.pi_estimate = value,
            TextField::Progress => self.progress = value,
        }
    }

    fn set_visibility(&mut self, _element: Element, _visible: bool) {}

    fn is_open(&self) -> bool {
        true
    }

    fn request_redraw(&mut self) {
        if self.progress != self.last_logged {
            tracing::debug!(progress = %self.progress, estimate = %self.pi_estimate);
            self.last_logged.clone_from(&self.progress);
        }
    }

    fn yield_to_host(&mut self, duration: Duration) {
        spin_sleep::sleep(duration);
    }
}

/// Start a run straight away and tick it to completion.
///
/// `interrupts` is polled once per tick; a message there abandons the run
/// with [`Error::UserInterrupt`].
pub fn run(
    mut controller: Controller,
    renderer: &mut TerminalRenderer,
    interrupts: &Receiver<()>,
) -> Result<(), Error> {
    controller.present(renderer);
    controller.handle(UserAction::Start, renderer);

    while controller.state() != ControllerState::Finished {
        if interrupts.try_recv().is_ok() {
            return Err(Error::UserInterrupt);
        }
        if controller.tick(renderer) == Tick::Closed {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pi_engine::{Pacing, RunConfig, Sampler};

    use super::*;

    fn fast_controller(target: u64, batch: Option<u64>) -> Controller {
        Controller::new(
            RunConfig::new(target, batch),
            Sampler::seeded(21),
            Pacing {
                busy: Duration::ZERO,
                idle: Duration::ZERO,
                drain_per_tick: 100,
            },
        )
    }

    #[test]
    fn runs_to_completion() {
        let (_tx, rx) = crossbeam_channel::bounded(1);
        let mut renderer = TerminalRenderer::default();
        run(fast_controller(250_000, Some(100_000)), &mut renderer, &rx).unwrap();
        assert_eq!(renderer.progress, "Samples: 250,000 / 250,000");
        assert_eq!(renderer.points, 600);
        assert!(renderer.pi_estimate.starts_with("Pi Estimate: 3.1"));
    }

    #[test]
    fn interrupt_abandons_the_run() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        tx.send(()).unwrap();
        let mut renderer = TerminalRenderer::default();
        let result = run(fast_controller(1_000_000, None), &mut renderer, &rx);
        assert_eq!(result, Err(Error::UserInterrupt));
        assert_eq!(renderer.progress, "");
    }
}
