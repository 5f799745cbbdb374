use std::time::Duration;

use rand::Rng;
use rand::rngs::SmallRng;
use strum::IntoEnumIterator;

use crate::format::{pi_text, progress_text};
use crate::queue::{DisplayQueue, DisplayedPoints};
use crate::render::{Element, Renderer, TextField};
use crate::sampler::{Sampler, default_batch_size};
use crate::stats::RunningStatistics;

/// Presentation state of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
pub enum ControllerState {
    #[default]
    Idle,
    Running,
    Paused,
    Finished,
}

/// Button presses the controller understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumIter)]
pub enum UserAction {
    Start,
    Stop,
    Resume,
    Restart,
}

impl ControllerState {
    /// State after `action`. Actions that don't apply leave the state as is;
    /// restart always lands in `Idle`.
    pub fn next(self, action: UserAction) -> Self {
        use ControllerState::*;

        match (self, action) {
            (_, UserAction::Restart) => Idle,
            (Idle, UserAction::Start) => Running,
            (Running, UserAction::Stop) => Paused,
            (Paused, UserAction::Resume) => Running,
            (state, _) => state,
        }
    }

    pub fn is_sampling(self) -> bool {
        self == Self::Running
    }
}

/// Per-tick budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pacing {
    /// Pause after a tick that did work.
    pub busy: Duration,
    /// Pause after a tick in `Idle`, `Paused` or `Finished`.
    pub idle: Duration,
    /// Maximum points moved from the queue to the display per tick.
    pub drain_per_tick: usize,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            busy: Duration::from_millis(1),
            idle: Duration::from_millis(100),
            drain_per_tick: 100,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub target_samples: u64,
    pub batch_size: u64,
}

impl RunConfig {
    /// Uses the default batch size for `target_samples` unless overridden.
    pub fn new(target_samples: u64, batch_size: Option<u64>) -> Self {
        Self {
            target_samples,
            batch_size: batch_size
                .filter(|&b| b > 0)
                .unwrap_or_else(|| default_batch_size(target_samples)),
        }
    }
}

/// Outcome of a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    Continue,
    /// The renderer was closed; the host loop should stop.
    Closed,
}

/// Everything that belongs to one run. Replaced wholesale on restart.
#[derive(Debug)]
struct Run {
    stats: RunningStatistics,
    queue: DisplayQueue,
    shown: DisplayedPoints,
    batches: u64,
}

impl Run {
    fn new(target_samples: u64) -> Self {
        Self {
            stats: RunningStatistics::new(target_samples),
            queue: DisplayQueue::new(),
            shown: DisplayedPoints::new(),
            batches: 0,
        }
    }
}

/// Owns all mutable run state and drives a [`Renderer`].
pub struct Controller<R = SmallRng> {
    config: RunConfig,
    pacing: Pacing,
    sampler: Sampler<R>,
    state: ControllerState,
    run: Run,
}

impl<R: Rng> Controller<R> {
    pub fn new(config: RunConfig, sampler: Sampler<R>, pacing: Pacing) -> Self {
        Self {
            run: Run::new(config.target_samples),
            config,
            pacing,
            sampler,
            state: ControllerState::Idle,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn config(&self) -> RunConfig {
        self.config
    }

    pub fn stats(&self) -> &RunningStatistics {
        &self.run.stats
    }

    pub fn displayed(&self) -> &DisplayedPoints {
        &self.run.shown
    }

    /// Preview points generated but not yet displayed.
    pub fn pending(&self) -> usize {
        self.run.queue.len()
    }

    /// Sampler invocations since the last restart.
    pub fn batches_produced(&self) -> u64 {
        self.run.batches
    }

    /// Push the complete current scene to `renderer`. Used for the first
    /// frame; afterwards the controller only sends what changes.
    pub fn present(&self, renderer: &mut impl Renderer) {
        self.apply_visibility(renderer);
        self.render(renderer);
    }

    /// Apply a user action and return the resulting state.
    pub fn handle(&mut self, action: UserAction, renderer: &mut impl Renderer) -> ControllerState {
        let previous = self.state;
        let next = previous.next(action);

        if action == UserAction::Restart {
            self.run = Run::new(self.config.target_samples);
            self.state = next;
            tracing::info!(%previous, "run restarted");
            self.present(renderer);
            return next;
        }

        if next != previous {
            self.state = next;
            tracing::info!(%action, %previous, %next, "state changed");
            self.apply_visibility(renderer);
            renderer.request_redraw();
        }
        next
    }

    /// One cooperative step: at most one batch, one bounded drain, one render,
    /// then yield back to the host.
    pub fn tick(&mut self, renderer: &mut impl Renderer) -> Tick {
        if !renderer.is_open() {
            return Tick::Closed;
        }

        let wait = if self.state.is_sampling() {
            self.step(renderer);
            self.pacing.busy
        } else {
            self.pacing.idle
        };

        renderer.yield_to_host(wait);
        Tick::Continue
    }

    fn step(&mut self, renderer: &mut impl Renderer) {
        let run = &mut self.run;

        if run.stats.is_complete() {
            // One last bounded drain; anything beyond it stays undrawn.
            run.queue.drain_into(&mut run.shown, self.pacing.drain_per_tick);
            self.state = ControllerState::Finished;
            tracing::info!(
                samples = run.stats.samples_done(),
                inside = run.stats.inside_total(),
                estimate = run.stats.pi_estimate(),
                batches = run.batches,
                "run finished"
            );
            self.render(renderer);
            return;
        }

        if run.queue.is_empty() {
            let batch = self
                .sampler
                .produce_batch(run.stats.remaining(), self.config.batch_size);
            run.stats.apply(&batch);
            run.batches += 1;
            tracing::debug!(
                size = batch.produced,
                inside = batch.inside,
                samples_done = run.stats.samples_done(),
                "batch applied"
            );
            run.queue.extend(batch.preview);
        }

        run.queue.drain_into(&mut run.shown, self.pacing.drain_per_tick);
        self.render(renderer);
    }

    fn render(&self, renderer: &mut impl Renderer) {
        let stats = &self.run.stats;
        renderer.set_points(self.run.shown.coords(), self.run.shown.classes());
        renderer.set_text(TextField::PiEstimate, pi_text(stats.pi_estimate()));
        let progress = if stats.samples_done() > 0 {
            progress_text(stats.samples_done(), stats.target_samples())
        } else {
            String::new()
        };
        renderer.set_text(TextField::Progress, progress);
        renderer.request_redraw();
    }

    fn apply_visibility(&self, renderer: &mut impl Renderer) {
        let started = self.state != ControllerState::Idle;
        for element in Element::iter() {
            let visible = match element {
                Element::StartButton => !started,
                _ => started,
            };
            renderer.set_visibility(element, visible);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::sampler::Classification;

    #[derive(Default)]
    struct Recorder {
        points: usize,
        texts: HashMap<TextField, String>,
        visible: HashMap<Element, bool>,
        closed: bool,
        redraws: usize,
        waits: Vec<Duration>,
    }

    impl Renderer for Recorder {
        fn set_points(&mut self, coords: &[[f64; 2]], classes: &[Classification]) {
            assert_eq!(coords.len(), classes.len());
            self.points = coords.len();
        }

        fn set_text(&mut self, field: TextField, value: String) {
            self.texts.insert(field, value);
        }

        fn set_visibility(&mut self, element: Element, visible: bool) {
            self.visible.insert(element, visible);
        }

        fn is_open(&self) -> bool {
            !self.closed
        }

        fn request_redraw(&mut self) {
            self.redraws += 1;
        }

        fn yield_to_host(&mut self, duration: Duration) {
            self.waits.push(duration);
        }
    }

    fn controller(target: u64, batch: Option<u64>) -> Controller {
        Controller::new(
            RunConfig::new(target, batch),
            Sampler::seeded(5),
            Pacing::default(),
        )
    }

    #[test]
    fn transition_table() {
        use ControllerState::*;
        use UserAction::*;

        assert_eq!(Idle.next(Start), Running);
        assert_eq!(Idle.next(Stop), Idle);
        assert_eq!(Idle.next(Resume), Idle);
        assert_eq!(Running.next(Start), Running);
        assert_eq!(Running.next(Stop), Paused);
        assert_eq!(Running.next(Resume), Running);
        assert_eq!(Paused.next(Stop), Paused);
        assert_eq!(Paused.next(Start), Paused);
        assert_eq!(Paused.next(Resume), Running);
        assert_eq!(Finished.next(Stop), Finished);
        assert_eq!(Finished.next(Resume), Finished);
        assert_eq!(Finished.next(Start), Finished);
        for state in [Idle, Running, Paused, Finished] {
            assert_eq!(state.next(Restart), Idle);
        }
    }

    #[test]
    fn batch_override_and_default() {
        assert_eq!(RunConfig::new(100_000, None).batch_size, 10_000);
        assert_eq!(RunConfig::new(100_000, Some(777)).batch_size, 777);
        assert_eq!(RunConfig::new(100_000, Some(0)).batch_size, 10_000);
    }

    #[test]
    fn present_shows_only_start_when_idle() {
        let c = controller(1_000, None);
        let mut rec = Recorder::default();
        c.present(&mut rec);
        assert_eq!(rec.visible[&Element::StartButton], true);
        for element in Element::iter().filter(|e| *e != Element::StartButton) {
            assert_eq!(rec.visible[&element], false, "{element}");
        }
        assert_eq!(rec.texts[&TextField::PiEstimate], "");
        assert_eq!(rec.texts[&TextField::Progress], "");
    }

    #[test]
    fn start_reveals_plot_and_controls() {
        let mut c = controller(1_000, None);
        let mut rec = Recorder::default();
        c.handle(UserAction::Start, &mut rec);
        assert_eq!(c.state(), ControllerState::Running);
        assert_eq!(rec.visible[&Element::StartButton], false);
        assert_eq!(rec.visible[&Element::Axes], true);
        assert_eq!(rec.visible[&Element::Circle], true);
        assert_eq!(rec.visible[&Element::RestartButton], true);
    }

    #[test]
    fn idle_ticks_do_no_work() {
        let mut c = controller(1_000, None);
        let mut rec = Recorder::default();
        for _ in 0..5 {
            assert_eq!(c.tick(&mut rec), Tick::Continue);
        }
        assert_eq!(c.batches_produced(), 0);
        assert_eq!(rec.redraws, 0);
        assert!(rec.waits.iter().all(|w| *w == Pacing::default().idle));
    }

    #[test]
    fn running_tick_samples_drains_and_renders() {
        let mut c = controller(100_000, None);
        let mut rec = Recorder::default();
        c.handle(UserAction::Start, &mut rec);

        c.tick(&mut rec);
        assert_eq!(c.batches_produced(), 1);
        assert_eq!(c.stats().samples_done(), 10_000);
        assert_eq!(c.displayed().len(), 100);
        assert_eq!(c.pending(), 100);
        assert_eq!(rec.points, 100);
        assert_eq!(
            rec.texts[&TextField::Progress],
            "Samples: 10,000 / 100,000"
        );
        assert!(rec.texts[&TextField::PiEstimate].starts_with("Pi Estimate: "));
        assert_eq!(rec.waits.last(), Some(&Pacing::default().busy));

        // Queue still holds points, so the next tick only drains.
        c.tick(&mut rec);
        assert_eq!(c.batches_produced(), 1);
        assert_eq!(c.displayed().len(), 200);
        assert_eq!(c.pending(), 0);
    }

    #[test]
    fn stop_twice_is_stop_once() {
        let mut c = controller(100_000, None);
        let mut rec = Recorder::default();
        c.handle(UserAction::Start, &mut rec);
        c.tick(&mut rec);
        assert_eq!(c.handle(UserAction::Stop, &mut rec), ControllerState::Paused);
        let done = c.stats().samples_done();
        let shown = c.displayed().len();
        assert_eq!(c.handle(UserAction::Stop, &mut rec), ControllerState::Paused);
        c.tick(&mut rec);
        assert_eq!(c.stats().samples_done(), done);
        assert_eq!(c.displayed().len(), shown);
    }

    #[test]
    fn resume_continues_where_it_paused() {
        let mut c = controller(100_000, None);
        let mut rec = Recorder::default();
        c.handle(UserAction::Start, &mut rec);
        c.tick(&mut rec);
        c.handle(UserAction::Stop, &mut rec);
        c.tick(&mut rec);
        c.handle(UserAction::Resume, &mut rec);
        c.tick(&mut rec);
        assert_eq!(c.stats().samples_done(), 10_000);
        assert_eq!(c.displayed().len(), 200);
    }

    #[test]
    fn finishing_tick_drains_the_last_slice() {
        let mut c = controller(10_000, None);
        let mut rec = Recorder::default();
        c.handle(UserAction::Start, &mut rec);
        c.tick(&mut rec);
        assert_eq!(c.pending(), 100);
        c.tick(&mut rec);
        c.tick(&mut rec);
        assert_eq!(c.state(), ControllerState::Finished);
        assert_eq!(c.pending(), 0);
        assert_eq!(c.displayed().len(), 200);

        // Finished is static.
        c.tick(&mut rec);
        assert_eq!(c.batches_produced(), 1);
        assert_eq!(c.handle(UserAction::Resume, &mut rec), ControllerState::Finished);
    }

    #[test]
    fn finishing_tick_respects_drain_limit() {
        let mut c = Controller::new(
            RunConfig::new(10_000, None),
            Sampler::seeded(5).with_preview_points(1_000),
            Pacing::default(),
        );
        let mut rec = Recorder::default();
        c.handle(UserAction::Start, &mut rec);

        let mut shown = 0;
        let mut largest_step = 0;
        while c.state() != ControllerState::Finished {
            c.tick(&mut rec);
            largest_step = largest_step.max(rec.points - shown);
            shown = rec.points;
        }

        assert_eq!(largest_step, Pacing::default().drain_per_tick);
        assert_eq!(c.batches_produced(), 1);
        assert_eq!(c.stats().samples_done(), 10_000);
        // 1000 queued, 100 per tick: the finishing tick adds one more slice.
        assert_eq!(c.displayed().len(), 200);
        assert_eq!(c.pending(), 800);
    }

    #[test]
    fn restart_discards_everything() {
        let mut c = controller(100_000, None);
        let mut rec = Recorder::default();
        c.handle(UserAction::Start, &mut rec);
        c.tick(&mut rec);
        c.tick(&mut rec);
        c.tick(&mut rec);

        assert_eq!(c.handle(UserAction::Restart, &mut rec), ControllerState::Idle);
        assert_eq!(c.stats().samples_done(), 0);
        assert_eq!(c.stats().inside_total(), 0);
        assert_eq!(c.batches_produced(), 0);
        assert!(c.displayed().is_empty());
        assert_eq!(c.pending(), 0);
        assert_eq!(rec.points, 0);
        assert_eq!(rec.texts[&TextField::PiEstimate], "");
        assert_eq!(rec.texts[&TextField::Progress], "");
        assert_eq!(rec.visible[&Element::StartButton], true);
        assert_eq!(rec.visible[&Element::Axes], false);
    }

    #[test]
    fn closed_renderer_ends_the_loop_in_any_state() {
        let mut c = controller(100_000, None);
        let mut rec = Recorder::default();
        rec.closed = true;
        assert_eq!(c.tick(&mut rec), Tick::Closed);
        c.handle(UserAction::Start, &mut rec);
        assert_eq!(c.tick(&mut rec), Tick::Closed);
        assert_eq!(c.batches_produced(), 0);
    }
}
