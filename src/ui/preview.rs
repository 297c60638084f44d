// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Preview canvases.
//!
//! A [`PreviewCanvas`] has a fixed pixel size and keeps the last region
//! drawn on it, so the picture stays put between ticks the same way a
//! bitmap canvas would. On screen it is scaled down to fit the panel.

use crate::engine::transport::{DrawRegion, DrawSurface};
use crate::models::rect::Size;

#[derive(Debug, Clone)]
pub struct PreviewCanvas {
    pixel_size: Size,
    region: Option<DrawRegion>,
}

impl PreviewCanvas {
    pub fn new(pixel_size: Size) -> Self {
        Self {
            pixel_size,
            region: None,
        }
    }

    pub fn resize(&mut self, pixel_size: Size) {
        if self.pixel_size != pixel_size {
            self.pixel_size = pixel_size;
            self.region = None;
        }
    }

    pub fn clear(&mut self) {
        self.region = None;
    }

    pub fn region(&self) -> Option<DrawRegion> {
        self.region
    }

    /// Paint the canvas, fitted inside `max_size` points.
    pub fn show(
        &self,
        ui: &mut egui::Ui,
        texture: Option<&egui::TextureHandle>,
        intrinsic: Option<Size>,
        max_size: egui::Vec2,
    ) {
        let scale = fit_scale(self.pixel_size, max_size);
        let (rect, _) = ui.allocate_exact_size(
            egui::vec2(
                (self.pixel_size.width * scale) as f32,
                (self.pixel_size.height * scale) as f32,
            ),
            egui::Sense::hover(),
        );
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, egui::Color32::BLACK);

        if let (Some(region), Some(texture), Some(intrinsic)) = (self.region, texture, intrinsic) {
            let uv = egui::Rect::from_min_max(
                egui::pos2(
                    (region.source.x / intrinsic.width).clamp(0.0, 1.0) as f32,
                    (region.source.y / intrinsic.height).clamp(0.0, 1.0) as f32,
                ),
                egui::pos2(
                    (region.source.right() / intrinsic.width).clamp(0.0, 1.0) as f32,
                    (region.source.bottom() / intrinsic.height).clamp(0.0, 1.0) as f32,
                ),
            );
            let destination = egui::Rect::from_min_size(
                rect.min
                    + egui::vec2(
                        (region.destination.x * scale) as f32,
                        (region.destination.y * scale) as f32,
                    ),
                egui::vec2(
                    (region.destination.width * scale) as f32,
                    (region.destination.height * scale) as f32,
                ),
            );
            painter.image(texture.id(), destination, uv, egui::Color32::WHITE);
        }

        painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, egui::Color32::WHITE));
    }
}

impl DrawSurface for PreviewCanvas {
    fn pixel_size(&self) -> Option<Size> {
        Some(self.pixel_size).filter(Size::is_measurable)
    }

    fn draw_region(&mut self, region: DrawRegion) {
        self.region = Some(region);
    }
}

/// Scale that fits `size` inside `max` without enlarging it.
fn fit_scale(size: Size, max: egui::Vec2) -> f64 {
    if !size.is_measurable() {
        return 0.0;
    }
    let scale_x = max.x as f64 / size.width;
    let scale_y = max.y as f64 / size.height;
    scale_x.min(scale_y).clamp(0.0, 1.0)
}

/// Placeholder shown when there is nothing to preview yet.
pub fn placeholder(ui: &mut egui::Ui, title: &str, detail: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.label(
            egui::RichText::new(title)
                .strong()
                .color(egui::Color32::from_gray(220)),
        );
        ui.label(egui::RichText::new(detail).color(egui::Color32::from_gray(130)));
    });
}
