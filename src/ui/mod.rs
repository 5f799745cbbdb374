mod plot;

use winit::window::Window;

use pi_engine::{Element, UserAction};

use crate::config::StyleSettings;
use crate::scene::Scene;

const STOP_FILL: egui::Color32 = egui::Color32::from_rgb(240, 128, 128);
const RESUME_FILL: egui::Color32 = egui::Color32::from_rgb(144, 238, 144);
const RESTART_FILL: egui::Color32 = egui::Color32::from_rgb(173, 216, 230);

/// Fraction of the central area covered by the START button.
const START_BUTTON_SCALE: f32 = 0.4;

pub struct EguiRenderOutput {
    pub primitives: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub screen_descriptor: egui_wgpu::ScreenDescriptor,
}

pub struct UiState {
    ctx: egui::Context,
    winit_state: egui_winit::State,
    style: StyleSettings,
}

impl UiState {
    pub fn new(window: &Window, style: StyleSettings) -> Self {
        let ctx = egui::Context::default();
        ctx.set_visuals(egui::Visuals::light());
        let winit_state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            window.theme(),
            None,
        );

        Self {
            ctx,
            winit_state,
            style,
        }
    }

    pub fn on_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> egui_winit::EventResponse {
        self.winit_state.on_window_event(window, event)
    }

    /// Lay out one frame from `scene`. Returns the tessellated output and
    /// any buttons clicked during the frame.
    pub fn run(&mut self, window: &Window, scene: &Scene) -> (EguiRenderOutput, Vec<UserAction>) {
        let raw_input = self.winit_state.take_egui_input(window);
        let ctx = self.ctx.clone();
        let mut actions = Vec::new();

        let full_output = ctx.run(raw_input, |egui_ctx| {
            egui::TopBottomPanel::top("controls").show(egui_ctx, |ui| {
                ui.horizontal(|ui| {
                    if scene.is_visible(Element::RestartButton)
                        && ui.add(control_button("RESTART", RESTART_FILL)).clicked()
                    {
                        actions.push(UserAction::Restart);
                    }
                    // Right-to-left: the first button added sits at the far right.
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if scene.is_visible(Element::ResumeButton)
                            && ui.add(control_button("RESUME", RESUME_FILL)).clicked()
                        {
                            actions.push(UserAction::Resume);
                        }
                        if scene.is_visible(Element::StopButton)
                            && ui.add(control_button("STOP", STOP_FILL)).clicked()
                        {
                            actions.push(UserAction::Stop);
                        }
                    });
                });
            });

            egui::TopBottomPanel::bottom("status").show(egui_ctx, |ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(&scene.progress);
                });
            });

            egui::CentralPanel::default().show(egui_ctx, |ui| {
                if scene.is_visible(Element::Axes) {
                    ui.vertical_centered(|ui| {
                        ui.heading(&scene.pi_estimate);
                    });
                    plot::sample_plot(ui, scene, self.style.point_radius);
                }

                if scene.is_visible(Element::StartButton) {
                    let area = ui.max_rect();
                    let rect =
                        egui::Rect::from_center_size(area.center(), area.size() * START_BUTTON_SCALE);
                    let start = egui::Button::new(
                        egui::RichText::new("START")
                            .size(32.0)
                            .color(egui::Color32::BLACK),
                    )
                    .fill(egui::Color32::WHITE);
                    if ui.put(rect, start).clicked() {
                        actions.push(UserAction::Start);
                    }
                }
            });
        });

        let egui::FullOutput {
            platform_output,
            shapes,
            pixels_per_point,
            textures_delta,
            ..
        } = full_output;
        self.winit_state
            .handle_platform_output(window, platform_output);
        let output = tessellate_output(&self.ctx, window, shapes, pixels_per_point, textures_delta);
        (output, actions)
    }
}

fn control_button(label: &str, fill: egui::Color32) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(label).color(egui::Color32::BLACK)).fill(fill)
}

fn tessellate_output(
    ctx: &egui::Context,
    window: &Window,
    shapes: Vec<egui::epaint::ClippedShape>,
    pixels_per_point: f32,
    textures_delta: egui::TexturesDelta,
) -> EguiRenderOutput {
    let primitives = ctx.tessellate(shapes, pixels_per_point);
    let size = window.inner_size();
    EguiRenderOutput {
        primitives,
        textures_delta,
        screen_descriptor: egui_wgpu::ScreenDescriptor {
            size_in_pixels: [size.width, size.height],
            pixels_per_point,
        },
    }
}
