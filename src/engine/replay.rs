// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Replays a recorded track against a second, independently playing video.
//!
//! On every tick the engine finds the keyframe in effect at the video's
//! current time, applies its volume and playback rate to the video, and
//! draws the recorded crop region scaled to fill the canvas.
//!
//! Keyframe coordinates were recorded in the display container's space.
//! Here they are re-projected with the canvas as the container, so the
//! output follows whatever canvas size is requested.

use super::scheduler::IntervalTimer;
use super::transport::{DrawRegion, DrawSurface, TransportEvent, VideoElement};
use crate::error::{GeometryError, TrackError};
use crate::models::{
    keyframe::Keyframe,
    rect::{Rect, Size},
    track::Track,
};
use crate::util::geometry;
use std::time::{Duration, Instant};

/// What a single replay tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// A region was drawn using the keyframe at `time_stamp`.
    Drawn { time_stamp: f64, region: DrawRegion },
    /// The current time precedes the first keyframe.
    NoKeyframe,
    /// Canvas or video is not mounted yet.
    Unavailable,
    /// Canvas or video has no usable size yet.
    Indeterminate(GeometryError),
}

#[derive(Debug, Clone)]
pub struct PreviewReplayEngine {
    track: Track,
    timer: IntervalTimer,
}

impl PreviewReplayEngine {
    /// Create an engine for `track`, refusing empty or unordered tracks.
    pub fn new(track: Track, period: Duration) -> Result<Self, TrackError> {
        track.validate()?;
        log::info!(
            "Replay ready: {} keyframes over {:.2}s",
            track.len(),
            track.duration()
        );
        Ok(Self {
            track,
            timer: IntervalTimer::new(period),
        })
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Follow the source video's transport: play starts the redraw loop,
    /// pause and end stop it.
    pub fn handle_transport(&mut self, event: TransportEvent, now: Instant) {
        match event {
            TransportEvent::Play => self.timer.start(now),
            TransportEvent::Pause | TransportEvent::Ended => self.stop(),
        }
    }

    /// Stop redrawing. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.timer.stop();
    }

    /// Poll the redraw loop and render one frame if a tick is due.
    pub fn tick<S, V>(&mut self, now: Instant, surface: Option<&mut S>, source: Option<&mut V>) -> Option<FrameOutcome>
    where
        S: DrawSurface + ?Sized,
        V: VideoElement + ?Sized,
    {
        if !self.timer.poll(now) {
            return None;
        }
        let current_time = source.as_ref().and_then(|v| v.current_time());
        let outcome = match current_time {
            Some(time) => self.render_frame(time, surface, source),
            None => FrameOutcome::Unavailable,
        };
        if !matches!(outcome, FrameOutcome::Drawn { .. }) {
            log::debug!("Replay tick skipped: {:?}", outcome);
        }
        Some(outcome)
    }

    /// Render the frame for `current_time` onto `surface` from `source`.
    pub fn render_frame<S, V>(&self, current_time: f64, surface: Option<&mut S>, source: Option<&mut V>) -> FrameOutcome
    where
        S: DrawSurface + ?Sized,
        V: VideoElement + ?Sized,
    {
        let (Some(surface), Some(source)) = (surface, source) else {
            return FrameOutcome::Unavailable;
        };
        let Some(keyframe) = self.track.keyframe_at(current_time) else {
            return FrameOutcome::NoKeyframe;
        };

        // The keyframe governs transport from here on, drawn or not.
        source.set_volume(keyframe.volume);
        source.set_playback_rate(keyframe.playback_rate);

        let canvas = surface.pixel_size().unwrap_or_default();
        let intrinsic = source.intrinsic_size().unwrap_or_default();
        match replay_region(keyframe, canvas, intrinsic) {
            Ok(region) => {
                surface.draw_region(region);
                FrameOutcome::Drawn {
                    time_stamp: keyframe.time_stamp,
                    region,
                }
            }
            Err(e) => FrameOutcome::Indeterminate(e),
        }
    }

    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.timer.time_until_next(now)
    }
}

/// The source region of `keyframe` in video pixels, drawn over the whole canvas.
pub fn replay_region(keyframe: &Keyframe, canvas: Size, intrinsic: Size) -> Result<DrawRegion, GeometryError> {
    let source = geometry::to_intrinsic(keyframe.rect(), canvas, intrinsic)?;
    Ok(DrawRegion {
        source,
        destination: Rect::from_size(canvas),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::transport::testing::{FakeVideo, RecordingSurface};

    const PERIOD: Duration = Duration::from_millis(17);

    fn track(entries: &[(f64, f64, f64)]) -> Track {
        let mut track = Track::new();
        for &(t, x, rate) in entries {
            track
                .push(Keyframe::new(t, Rect::new(x, 0.0, 200.0, 100.0), 0.5, rate))
                .unwrap();
        }
        track
    }

    fn assert_close(a: Rect, b: Rect) {
        let pairs = [(a.x, b.x), (a.y, b.y), (a.width, b.width), (a.height, b.height)];
        assert!(pairs.iter().all(|(l, r)| (l - r).abs() < 1e-6), "{:?} != {:?}", a, b);
    }

    fn engine() -> PreviewReplayEngine {
        PreviewReplayEngine::new(track(&[(0.0, 0.0, 1.0), (1.0, 10.0, 1.5), (2.0, 20.0, 2.0)]), PERIOD).unwrap()
    }

    #[test]
    fn test_rejects_invalid_tracks() {
        assert!(matches!(
            PreviewReplayEngine::new(Track::new(), PERIOD),
            Err(TrackError::Empty)
        ));

        let unordered: Track = serde_json::from_str(
            r#"[{"timeStamp":1,"coordinates":[0,0,1,1],"volume":1,"playbackRate":1},
                {"timeStamp":0,"coordinates":[0,0,1,1],"volume":1,"playbackRate":1}]"#,
        )
        .unwrap();
        assert!(matches!(
            PreviewReplayEngine::new(unordered, PERIOD),
            Err(TrackError::OutOfOrder { .. })
        ));
    }

    #[test]
    fn test_selects_preceding_keyframe() {
        let engine = engine();
        let mut surface = RecordingSurface::new(Size::new(400.0, 200.0));
        let mut video = FakeVideo::new(Size::new(800.0, 400.0));

        let outcome = engine.render_frame(1.5, Some(&mut surface), Some(&mut video));
        let FrameOutcome::Drawn { time_stamp, region } = outcome.clone() else {
            panic!("expected a drawn frame, got {:?}", outcome);
        };
        assert_eq!(time_stamp, 1.0);
        assert_eq!(region.source, Rect::new(20.0, 0.0, 400.0, 200.0));
        assert_eq!(region.destination, Rect::new(0.0, 0.0, 400.0, 200.0));
        assert_eq!(surface.drawn, vec![region]);
    }

    #[test]
    fn test_applies_transport_of_keyframe() {
        let engine = engine();
        let mut surface = RecordingSurface::new(Size::new(400.0, 200.0));
        let mut video = FakeVideo::new(Size::new(800.0, 400.0));

        engine.render_frame(2.5, Some(&mut surface), Some(&mut video));
        assert_eq!(video.rate, 2.0);
        assert_eq!(video.volume, 0.5);
    }

    #[test]
    fn test_skips_before_first_keyframe() {
        let engine = engine();
        let mut surface = RecordingSurface::new(Size::new(400.0, 200.0));
        let mut video = FakeVideo::new(Size::new(800.0, 400.0));

        let outcome = engine.render_frame(-1.0, Some(&mut surface), Some(&mut video));
        assert_eq!(outcome, FrameOutcome::NoKeyframe);
        assert!(surface.drawn.is_empty());
        assert_eq!(video.rate, 1.0);
        assert_eq!(video.volume, 0.8);
    }

    #[test]
    fn test_missing_resources_are_noops() {
        let engine = engine();
        let mut surface = RecordingSurface::new(Size::new(400.0, 200.0));
        let mut video = FakeVideo::new(Size::new(800.0, 400.0));

        assert_eq!(
            engine.render_frame(1.0, None::<&mut RecordingSurface>, Some(&mut video)),
            FrameOutcome::Unavailable
        );
        assert_eq!(
            engine.render_frame(1.0, Some(&mut surface), None::<&mut FakeVideo>),
            FrameOutcome::Unavailable
        );
        assert!(surface.drawn.is_empty());
    }

    #[test]
    fn test_unloaded_metadata_is_indeterminate() {
        let engine = engine();
        let mut surface = RecordingSurface::new(Size::new(400.0, 200.0));
        let mut video = FakeVideo::new(Size::new(800.0, 400.0));
        video.size = None;

        let outcome = engine.render_frame(1.0, Some(&mut surface), Some(&mut video));
        assert!(matches!(outcome, FrameOutcome::Indeterminate(_)));
        assert!(surface.drawn.is_empty());
    }

    #[test]
    fn test_ticks_follow_transport_events() {
        let mut engine = engine();
        let mut surface = RecordingSurface::new(Size::new(400.0, 200.0));
        let mut video = FakeVideo::new(Size::new(800.0, 400.0));
        let start = Instant::now();

        assert!(engine
            .tick(start + PERIOD, Some(&mut surface), Some(&mut video))
            .is_none());

        engine.handle_transport(TransportEvent::Play, start);
        assert!(engine.is_running());
        let outcome = engine.tick(start + PERIOD, Some(&mut surface), Some(&mut video));
        assert!(matches!(outcome, Some(FrameOutcome::Drawn { time_stamp, .. }) if time_stamp == 0.0));

        engine.handle_transport(TransportEvent::Pause, start + PERIOD);
        assert!(engine
            .tick(start + PERIOD * 5, Some(&mut surface), Some(&mut video))
            .is_none());

        engine.handle_transport(TransportEvent::Play, start + PERIOD * 5);
        engine.handle_transport(TransportEvent::Ended, start + PERIOD * 6);
        engine.stop();
        assert!(!engine.is_running());
        assert_eq!(surface.drawn.len(), 1);
    }

    #[test]
    fn test_canvas_is_the_replay_container() {
        // Same keyframe, different canvas sizes: the source region follows
        // the canvas, not the container the track was captured in.
        let keyframe = Keyframe::new(0.0, Rect::new(50.0, 0.0, 300.0, 300.0), 1.0, 1.0);
        let intrinsic = Size::new(1920.0, 1080.0);

        let small = replay_region(&keyframe, Size::new(400.0, 300.0), intrinsic).unwrap();
        let large = replay_region(&keyframe, Size::new(800.0, 600.0), intrinsic).unwrap();
        assert_close(small.source, Rect::new(240.0, 0.0, 1440.0, 1080.0));
        assert_close(large.source, Rect::new(120.0, 0.0, 720.0, 540.0));
        assert_eq!(large.destination, Rect::new(0.0, 0.0, 800.0, 600.0));
    }
}
