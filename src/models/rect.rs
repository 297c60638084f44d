// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Basic geometric primitives.
//!
//! All values are floating-point pixels. Whether a rectangle lives in
//! viewport space or intrinsic video space is decided by whoever holds it.

use serde::{Deserialize, Serialize};

/// A 2D point in pixels, typically a pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of a container, canvas or video.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are finite and strictly positive.
    ///
    /// A container that has not been laid out yet, or a video whose
    /// metadata has not loaded, reports a zero size.
    pub fn is_measurable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// An axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering a whole surface of the given size.
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check whether a point lies inside the rectangle (edges included).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Check whether the rectangle lies entirely inside a container of `size`.
    pub fn fits_within(&self, size: Size) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.right() <= size.width && self.bottom() <= size.height
    }

    /// The `[x, y, width, height]` tuple used in exported keyframes.
    pub fn to_array(&self) -> [f64; 4] {
        [self.x, self.y, self.width, self.height]
    }

    pub fn from_array(values: [f64; 4]) -> Self {
        Self::new(values[0], values[1], values[2], values[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmeasured_sizes() {
        assert!(!Size::new(0.0, 300.0).is_measurable());
        assert!(!Size::new(400.0, 0.0).is_measurable());
        assert!(!Size::new(f64::NAN, 300.0).is_measurable());
        assert!(Size::new(400.0, 300.0).is_measurable());
    }

    #[test]
    fn test_contains_and_fits() {
        let rect = Rect::new(50.0, 0.0, 300.0, 300.0);
        assert!(rect.contains(Point::new(50.0, 0.0)));
        assert!(rect.contains(Point::new(350.0, 300.0)));
        assert!(!rect.contains(Point::new(49.0, 10.0)));

        assert!(rect.fits_within(Size::new(400.0, 300.0)));
        assert!(!rect.fits_within(Size::new(340.0, 300.0)));
    }

    #[test]
    fn test_array_conversion() {
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(rect.to_array(), [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(Rect::from_array(rect.to_array()), rect);
    }
}
