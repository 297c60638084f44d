// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module maps rectangles between viewport space (pixels of the
//! container a video is displayed in) and intrinsic space (the video's
//! native pixels). The two axes are scaled independently.

use crate::error::GeometryError;
use crate::models::rect::{Rect, Size};

/// Per-axis factors converting container pixels to intrinsic pixels.
fn scale_factors(container: Size, intrinsic: Size) -> Result<(f64, f64), GeometryError> {
    ensure_measurable("container", container)?;
    ensure_measurable("intrinsic", intrinsic)?;
    Ok((
        intrinsic.width / container.width,
        intrinsic.height / container.height,
    ))
}

fn ensure_measurable(what: &'static str, size: Size) -> Result<(), GeometryError> {
    if size.is_measurable() {
        Ok(())
    } else {
        Err(GeometryError::Indeterminate {
            what,
            width: size.width,
            height: size.height,
        })
    }
}

/// Convert a viewport rectangle into the video's intrinsic pixel space.
pub fn to_intrinsic(rect: Rect, container: Size, intrinsic: Size) -> Result<Rect, GeometryError> {
    let (scale_x, scale_y) = scale_factors(container, intrinsic)?;
    Ok(Rect::new(
        rect.x * scale_x,
        rect.y * scale_y,
        rect.width * scale_x,
        rect.height * scale_y,
    ))
}

/// Convert an intrinsic rectangle back into viewport space.
pub fn to_viewport(rect: Rect, container: Size, intrinsic: Size) -> Result<Rect, GeometryError> {
    let (scale_x, scale_y) = scale_factors(container, intrinsic)?;
    Ok(Rect::new(
        rect.x / scale_x,
        rect.y / scale_y,
        rect.width / scale_x,
        rect.height / scale_y,
    ))
}

/// Largest rectangle of the given aspect ratio (width / height) that fits
/// inside `container`, centered on both axes.
pub fn fit_centered(aspect_ratio: f64, container: Size) -> Result<Rect, GeometryError> {
    ensure_measurable("container", container)?;
    if !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
        return Err(GeometryError::InvalidAspectRatio(aspect_ratio));
    }

    let mut height = container.height;
    let mut width = height * aspect_ratio;
    if width > container.width {
        width = container.width;
        height = width / aspect_ratio;
    }

    Ok(Rect::new(
        (container.width - width) / 2.0,
        (container.height - height) / 2.0,
        width,
        height,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rect_eq(a: Rect, b: Rect) {
        assert!((a.x - b.x).abs() < 0.0001, "{:?} != {:?}", a, b);
        assert!((a.y - b.y).abs() < 0.0001, "{:?} != {:?}", a, b);
        assert!((a.width - b.width).abs() < 0.0001, "{:?} != {:?}", a, b);
        assert!((a.height - b.height).abs() < 0.0001, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_to_intrinsic_scales_each_axis() {
        let container = Size::new(400.0, 300.0);
        let intrinsic = Size::new(1920.0, 1080.0);
        let mapped = to_intrinsic(Rect::new(50.0, 0.0, 300.0, 300.0), container, intrinsic).unwrap();
        assert_rect_eq(mapped, Rect::new(240.0, 0.0, 1440.0, 1080.0));
    }

    #[test]
    fn test_intrinsic_viewport_roundtrip() {
        let container = Size::new(460.0, 307.0);
        let intrinsic = Size::new(1920.0, 1080.0);
        let rect = Rect::new(12.5, 33.25, 153.5, 307.0);

        let intrinsic_rect = to_intrinsic(rect, container, intrinsic).unwrap();
        let back = to_viewport(intrinsic_rect, container, intrinsic).unwrap();
        assert_rect_eq(back, rect);
    }

    #[test]
    fn test_unmeasured_container_is_indeterminate() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let err = to_intrinsic(rect, Size::new(0.0, 0.0), Size::new(1920.0, 1080.0)).unwrap_err();
        assert!(matches!(err, GeometryError::Indeterminate { what: "container", .. }));

        let err = to_intrinsic(rect, Size::new(400.0, 300.0), Size::default()).unwrap_err();
        assert!(matches!(err, GeometryError::Indeterminate { what: "intrinsic", .. }));
    }

    #[test]
    fn test_fit_square_in_landscape() {
        let rect = fit_centered(1.0, Size::new(400.0, 300.0)).unwrap();
        assert_rect_eq(rect, Rect::new(50.0, 0.0, 300.0, 300.0));
    }

    #[test]
    fn test_fit_wide_ratio_is_width_bound() {
        let rect = fit_centered(4.0 / 3.0, Size::new(300.0, 400.0)).unwrap();
        assert_rect_eq(rect, Rect::new(0.0, 87.5, 300.0, 225.0));
    }

    #[test]
    fn test_fit_preserves_ratio_and_centering() {
        let containers = [
            Size::new(460.0, 307.0),
            Size::new(307.0, 460.0),
            Size::new(1.0, 1000.0),
            Size::new(1000.0, 1.0),
        ];
        let ratios = [9.0 / 18.0, 9.0 / 16.0, 4.0 / 3.0, 3.0 / 4.0, 1.0, 4.0 / 5.0];

        for container in containers {
            for ratio in ratios {
                let rect = fit_centered(ratio, container).unwrap();
                assert!((rect.width / rect.height - ratio).abs() < 1e-9);
                assert!((rect.x - (container.width - rect.width) / 2.0).abs() < 1e-9);
                assert!((rect.y - (container.height - rect.height) / 2.0).abs() < 1e-9);
                assert!(rect.width <= container.width + 1e-9);
                assert!(rect.height <= container.height + 1e-9);
            }
        }
    }

    #[test]
    fn test_fit_rejects_bad_ratio() {
        assert!(matches!(
            fit_centered(0.0, Size::new(400.0, 300.0)),
            Err(GeometryError::InvalidAspectRatio(_))
        ));
    }
}
