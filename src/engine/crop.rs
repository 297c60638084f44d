// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Crop region state and drag handling.
//!
//! The controller owns the crop rectangle in viewport space. Its size is
//! fixed when it is initialized from an aspect ratio; afterwards the user
//! can only move it, and every move is clamped to the container.

use crate::error::GeometryError;
use crate::models::{
    options::AspectRatio,
    rect::{Point, Rect, Size},
};
use crate::util::geometry;

/// In-progress drag: pointer position relative to the rectangle's top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragState {
    offset: Point,
}

#[derive(Debug, Clone)]
pub struct CropRegionController {
    aspect_ratio: AspectRatio,
    container: Option<Size>,
    rect: Option<Rect>,
    drag: Option<DragState>,
}

impl CropRegionController {
    pub fn new(aspect_ratio: AspectRatio) -> Self {
        Self {
            aspect_ratio,
            container: None,
            rect: None,
            drag: None,
        }
    }

    /// Size and center the rectangle for `aspect_ratio` inside `container`.
    ///
    /// Any drag in progress is cancelled since the rectangle it grabbed is gone.
    pub fn initialize(&mut self, aspect_ratio: AspectRatio, container: Size) -> Result<Rect, GeometryError> {
        self.aspect_ratio = aspect_ratio;
        let rect = geometry::fit_centered(aspect_ratio.ratio(), container)?;
        self.container = Some(container);
        self.rect = Some(rect);
        self.drag = None;
        log::debug!(
            "Crop initialized for {} in {}x{}: {:?}",
            aspect_ratio,
            container.width,
            container.height,
            rect
        );
        Ok(rect)
    }

    /// Change the aspect ratio, re-initializing when the container is known.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: AspectRatio) -> Option<Rect> {
        self.aspect_ratio = aspect_ratio;
        let container = self.container?;
        self.initialize(aspect_ratio, container).ok()
    }

    /// Report a (re)measured container. The rectangle is re-initialized only
    /// when the size actually changed or nothing has been initialized yet.
    pub fn set_container(&mut self, container: Size) -> Option<Rect> {
        if self.container == Some(container) && self.rect.is_some() {
            return self.rect;
        }
        match self.initialize(self.aspect_ratio, container) {
            Ok(rect) => Some(rect),
            Err(e) => {
                log::debug!("Crop layout deferred: {}", e);
                None
            }
        }
    }

    /// Grab the rectangle at `pointer`. Returns false when there is no
    /// rectangle to grab yet.
    pub fn begin_drag(&mut self, pointer: Point) -> bool {
        let Some(rect) = self.rect else {
            return false;
        };
        self.drag = Some(DragState {
            offset: Point::new(pointer.x - rect.x, pointer.y - rect.y),
        });
        true
    }

    /// Move the grabbed rectangle so the grab point follows `pointer`,
    /// clamped to the container. `None` when no drag is in progress.
    pub fn continue_drag(&mut self, pointer: Point) -> Option<Rect> {
        let drag = self.drag?;
        let container = self.container?;
        let rect = self.rect.as_mut()?;

        rect.x = clamp_axis(pointer.x - drag.offset.x, container.width - rect.width);
        rect.y = clamp_axis(pointer.y - drag.offset.y, container.height - rect.height);
        Some(*rect)
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// The current crop rectangle in viewport space.
    pub fn current(&self) -> Option<Rect> {
        self.rect
    }

    pub fn container(&self) -> Option<Size> {
        self.container
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    /// Drop the rectangle, e.g. when the cropper is removed.
    pub fn clear(&mut self) {
        self.rect = None;
        self.drag = None;
    }
}

/// Clamp a position to `[0, max]`; a negative `max` pins it to zero.
fn clamp_axis(value: f64, max: f64) -> f64 {
    value.min(max).max(0.0)
}
