// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Seams between the engine and the playback/drawing resources it drives.
//!
//! The engine never owns a decoder or a window. It reads transport state
//! from a [`VideoElement`] and emits [`DrawRegion`]s to a [`DrawSurface`];
//! the application supplies both and can swap them for test doubles.

use crate::models::rect::{Rect, Size};

/// Transport state changes reported by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportEvent {
    Play,
    Pause,
    Ended,
}

/// A playable video: transport readings plus the controls replay applies.
pub trait VideoElement {
    /// Current playback position in seconds, `None` until media is loaded.
    fn current_time(&self) -> Option<f64>;

    /// Output volume in `[0, 1]`.
    fn volume(&self) -> f64;

    fn playback_rate(&self) -> f64;

    /// Native resolution, `None` until metadata is available.
    fn intrinsic_size(&self) -> Option<Size>;

    fn set_volume(&mut self, volume: f64);

    fn set_playback_rate(&mut self, rate: f64);
}

/// A source region of the video drawn into a destination region of a canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRegion {
    /// Region in the video's intrinsic pixels.
    pub source: Rect,
    /// Region in the canvas's pixels.
    pub destination: Rect,
}

/// A canvas the replay engine draws video regions onto.
pub trait DrawSurface {
    /// Pixel dimensions of the canvas, `None` while it is not mounted.
    fn pixel_size(&self) -> Option<Size>;

    /// Clear the canvas and draw `region` of the current video frame.
    fn draw_region(&mut self, region: DrawRegion);
}

#[cfg(test)]
pub mod testing {
    //! Test doubles for the transport traits.

    use super::*;

    #[derive(Debug, Clone)]
    pub struct FakeVideo {
        pub time: Option<f64>,
        pub volume: f64,
        pub rate: f64,
        pub size: Option<Size>,
    }

    impl FakeVideo {
        pub fn new(size: Size) -> Self {
            Self {
                time: Some(0.0),
                volume: 0.8,
                rate: 1.0,
                size: Some(size),
            }
        }
    }

    impl VideoElement for FakeVideo {
        fn current_time(&self) -> Option<f64> {
            self.time
        }

        fn volume(&self) -> f64 {
            self.volume
        }

        fn playback_rate(&self) -> f64 {
            self.rate
        }

        fn intrinsic_size(&self) -> Option<Size> {
            self.size
        }

        fn set_volume(&mut self, volume: f64) {
            self.volume = volume;
        }

        fn set_playback_rate(&mut self, rate: f64) {
            self.rate = rate;
        }
    }

    /// Surface that remembers every region drawn on it.
    #[derive(Debug, Clone, Default)]
    pub struct RecordingSurface {
        pub size: Option<Size>,
        pub drawn: Vec<DrawRegion>,
    }

    impl RecordingSurface {
        pub fn new(size: Size) -> Self {
            Self {
                size: Some(size),
                drawn: Vec::new(),
            }
        }
    }

    impl DrawSurface for RecordingSurface {
        fn pixel_size(&self) -> Option<Size> {
            self.size
        }

        fn draw_region(&mut self, region: DrawRegion) {
            self.drawn.push(region);
        }
    }
}
