use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use crossbeam_channel::Receiver;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use pi_engine::{Controller, Tick};

use crate::config::Settings;
use crate::gpu::GpuState;
use crate::scene::Scene;
use crate::ui::UiState;

/// Why the event loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Exit {
    Closed,
    Interrupted,
}

pub struct App {
    // Drop order matters: the surface inside `gpu` must go before the window
    // it was created from, so `gpu` is declared before `window`.
    gpu: Option<GpuState>,
    ui: Option<UiState>,
    window: Option<Arc<Window>>,
    controller: Controller,
    scene: Scene,
    settings: Settings,
    interrupts: Receiver<()>,
    exit: Option<Exit>,
    failure: Option<anyhow::Error>,
}

impl App {
    pub fn new(controller: Controller, settings: Settings, interrupts: Receiver<()>) -> Self {
        Self {
            gpu: None,
            ui: None,
            window: None,
            controller,
            scene: Scene::default(),
            settings,
            interrupts,
            exit: None,
            failure: None,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_settings = &self.settings.window;
        let attrs = Window::default_attributes()
            .with_title(window_settings.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                window_settings.width,
                window_settings.height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );
        let gpu = GpuState::new(window.clone())?;
        let ui = UiState::new(&window, self.settings.style.clone());

        self.controller.present(&mut self.scene);
        window.request_redraw();

        self.gpu = Some(gpu);
        self.ui = Some(ui);
        self.window = Some(window);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = &self.window else { return };
        let Some(gpu) = &mut self.gpu else { return };
        let Some(ui) = &mut self.ui else { return };

        let (output, actions) = ui.run(window, &self.scene);
        for action in actions {
            self.controller.handle(action, &mut self.scene);
        }

        match gpu.render(&output) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = window.inner_size();
                gpu.resize(size.width, size.height);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                tracing::error!("GPU out of memory");
                self.failure = Some(anyhow::anyhow!("GPU out of memory"));
                event_loop.exit();
            }
            Err(e) => {
                tracing::warn!("Surface error: {e:?}");
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_window(event_loop) {
            tracing::error!("{e:#}");
            self.failure = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(ui) = &mut self.ui
            && let Some(window) = &self.window
        {
            let response = ui.on_event(window, &event);
            if response.repaint {
                window.request_redraw();
            }
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("window closed");
                self.scene.close();
            }
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.interrupts.try_recv().is_ok() {
            self.exit = Some(Exit::Interrupted);
            event_loop.exit();
            return;
        }

        if Instant::now() >= self.scene.deadline()
            && self.controller.tick(&mut self.scene) == Tick::Closed
        {
            self.exit = Some(Exit::Closed);
            event_loop.exit();
            return;
        }

        if self.scene.take_redraw()
            && let Some(window) = &self.window
        {
            window.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.scene.deadline()));
    }
}

/// Open the window and drive `controller` until the window closes.
///
/// An interrupt comes back as [`pi_engine::Error::UserInterrupt`].
pub fn run(
    controller: Controller,
    settings: Settings,
    interrupts: Receiver<()>,
) -> anyhow::Result<()> {
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = App::new(controller, settings, interrupts);
    event_loop.run_app(&mut app).context("event loop error")?;

    if let Some(e) = app.failure {
        return Err(e);
    }
    tracing::info!(
        exit = ?app.exit,
        state = %app.controller.state(),
        samples = app.controller.stats().samples_done(),
        "event loop finished"
    );
    match app.exit {
        Some(Exit::Interrupted) => Err(pi_engine::Error::UserInterrupt.into()),
        _ => Ok(()),
    }
}
