use std::f64::consts::TAU;

use egui_plot::{Line, Plot, PlotPoints, Points};
use pi_engine::Element;

use crate::scene::Scene;

// 60% opacity, premultiplied.
const INSIDE_BLUE: egui::Color32 = egui::Color32::from_rgba_premultiplied(0, 0, 153, 153);
const OUTSIDE_RED: egui::Color32 = egui::Color32::from_rgba_premultiplied(153, 0, 0, 153);
const CIRCLE_RED: egui::Color32 = egui::Color32::from_rgb(220, 20, 20);

const CIRCLE_SEGMENTS: usize = 256;

/// Square plot of [-1, 1]² with the drawn samples and the unit circle.
pub fn sample_plot(ui: &mut egui::Ui, scene: &Scene, point_radius: f32) {
    Plot::new("samples")
        .data_aspect(1.0)
        .include_x(-1.0)
        .include_x(1.0)
        .include_y(-1.0)
        .include_y(1.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new("inside", scene.inside.clone())
                    .color(INSIDE_BLUE)
                    .radius(point_radius),
            );
            plot_ui.points(
                Points::new("outside", scene.outside.clone())
                    .color(OUTSIDE_RED)
                    .radius(point_radius),
            );
            if scene.is_visible(Element::Circle) {
                plot_ui.line(
                    Line::new("unit circle", unit_circle())
                        .color(CIRCLE_RED)
                        .width(2.0),
                );
            }
        });
}

fn unit_circle() -> PlotPoints<'static> {
    (0..=CIRCLE_SEGMENTS)
        .map(|i| {
            let t = TAU * i as f64 / CIRCLE_SEGMENTS as f64;
            [t.cos(), t.sin()]
        })
        .collect()
}
