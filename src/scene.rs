use std::collections::HashSet;
use std::time::{Duration, Instant};

use pi_engine::{Classification, Element, Renderer, TextField};

/// What the window should show, as last written by the controller.
///
/// The egui pass reads this every frame; the app reads `deadline` and
/// `take_redraw` to schedule the next wake-up.
pub struct Scene {
    pub inside: Vec<[f64; 2]>,
    pub outside: Vec<[f64; 2]>,
    pub pi_estimate: String,
    pub progress: String,
    visible: HashSet<Element>,
    open: bool,
    redraw: bool,
    deadline: Instant,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            inside: Vec::new(),
            outside: Vec::new(),
            pi_estimate: String::new(),
            progress: String::new(),
            visible: HashSet::new(),
            open: true,
            redraw: false,
            deadline: Instant::now(),
        }
    }
}

impl Scene {
    pub fn is_visible(&self, element: Element) -> bool {
        self.visible.contains(&element)
    }

    /// Mark the window as closed; the next tick ends the loop.
    pub fn close(&mut self) {
        self.open = false;
        self.deadline = Instant::now();
    }

    /// When the controller wants its next tick.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Returns true once per redraw request, consuming it.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }
}

impl Renderer for Scene {
    fn set_points(&mut self, coords: &[[f64; 2]], classes: &[Classification]) {
        self.inside.clear();
        self.outside.clear();
        for (coord, class) in coords.iter().zip(classes) {
            match class {
                Classification::Inside => self.inside.push(*coord),
                Classification::Outside => self.outside.push(*coord),
            }
        }
    }

    fn set_text(&mut self, field: TextField, value: String) {
        match field {
            TextField::PiEstimate => self.pi_estimate = value,
            TextField::Progress => self.progress = value,
        }
    }

    fn set_visibility(&mut self, element: Element, visible: bool) {
        if visible {
            self.visible.insert(element);
        } else {
            self.visible.remove(&element);
        }
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn request_redraw(&mut self) {
        self.redraw = true;
    }

    fn yield_to_host(&mut self, duration: Duration) {
        self.deadline = Instant::now() + duration;
    }
}
