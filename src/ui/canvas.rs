// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editing canvas: the playing video with the crop region on top.
//!
//! The video is stretched over a container of fixed size, which is the
//! viewport space crop rectangles are expressed in. Pointer positions are
//! reported relative to the container's top-left corner.

use crate::io::media::Frame;
use crate::models::rect::{Point, Rect, Size};

/// Result of canvas interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasAction {
    None,
    BeginDrag(Point),
    Drag(Point),
    EndDrag,
}

/// Upload a decoded frame, reusing the texture when one exists.
pub fn upload_frame(
    ctx: &egui::Context,
    texture: &mut Option<egui::TextureHandle>,
    name: &str,
    frame: &Frame,
) {
    let size = [frame.width as usize, frame.height as usize];
    let image = egui::ColorImage::from_rgba_unmultiplied(size, &frame.pixels);
    match texture {
        Some(handle) => handle.set(image, egui::TextureOptions::LINEAR),
        None => *texture = Some(ctx.load_texture(name, image, egui::TextureOptions::LINEAR)),
    }
}

/// Convert a viewport rectangle into screen space for a container at `origin`.
fn to_screen(origin: egui::Pos2, rect: Rect) -> egui::Rect {
    egui::Rect::from_min_size(
        origin + egui::vec2(rect.x as f32, rect.y as f32),
        egui::vec2(rect.width as f32, rect.height as f32),
    )
}

/// Display the video container and handle crop dragging.
pub fn show(
    ui: &mut egui::Ui,
    texture: &Option<egui::TextureHandle>,
    container: Size,
    crop: Option<Rect>,
) -> CanvasAction {
    let (container_rect, response) = ui.allocate_exact_size(
        egui::vec2(container.width as f32, container.height as f32),
        egui::Sense::drag(),
    );
    let painter = ui.painter_at(container_rect);

    match texture {
        Some(texture) => {
            painter.image(
                texture.id(),
                container_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
        None => {
            painter.rect_filled(container_rect, 0.0, egui::Color32::WHITE);
        }
    }

    let Some(crop) = crop else {
        return CanvasAction::None;
    };

    draw_crop_overlay(&painter, container_rect, to_screen(container_rect.min, crop));

    if response.hovered() && crop_contains(&response, container_rect, crop) {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Move);
    }

    let pointer = response
        .interact_pointer_pos()
        .map(|pos| Point::new((pos.x - container_rect.min.x) as f64, (pos.y - container_rect.min.y) as f64));

    if response.drag_started() {
        if let Some(point) = pointer.filter(|p| crop.contains(*p)) {
            return CanvasAction::BeginDrag(point);
        }
    }
    if response.dragged() {
        if let Some(point) = pointer {
            return CanvasAction::Drag(point);
        }
    }
    if response.drag_stopped() {
        return CanvasAction::EndDrag;
    }
    CanvasAction::None
}

fn crop_contains(response: &egui::Response, container_rect: egui::Rect, crop: Rect) -> bool {
    response
        .hover_pos()
        .map(|pos| {
            crop.contains(Point::new(
                (pos.x - container_rect.min.x) as f64,
                (pos.y - container_rect.min.y) as f64,
            ))
        })
        .unwrap_or(false)
}

/// Dim everything outside the crop and draw its border and 3x3 grid.
fn draw_crop_overlay(painter: &egui::Painter, container: egui::Rect, crop: egui::Rect) {
    let shade = egui::Color32::from_black_alpha(153);

    let bands = [
        egui::Rect::from_min_max(container.min, egui::pos2(container.max.x, crop.min.y)),
        egui::Rect::from_min_max(egui::pos2(container.min.x, crop.max.y), container.max),
        egui::Rect::from_min_max(egui::pos2(container.min.x, crop.min.y), egui::pos2(crop.min.x, crop.max.y)),
        egui::Rect::from_min_max(egui::pos2(crop.max.x, crop.min.y), egui::pos2(container.max.x, crop.max.y)),
    ];
    for band in bands {
        if band.width() > 0.0 && band.height() > 0.0 {
            painter.rect_filled(band, 0.0, shade);
        }
    }

    let grid = egui::Stroke::new(0.5, egui::Color32::from_white_alpha(100));
    for i in 1..3 {
        let fraction = i as f32 / 3.0;
        let x = crop.min.x + crop.width() * fraction;
        let y = crop.min.y + crop.height() * fraction;
        painter.line_segment([egui::pos2(x, crop.min.y), egui::pos2(x, crop.max.y)], grid);
        painter.line_segment([egui::pos2(crop.min.x, y), egui::pos2(crop.max.x, y)], grid);
    }

    painter.rect_stroke(crop, 0.0, egui::Stroke::new(2.0, egui::Color32::WHITE));
}
