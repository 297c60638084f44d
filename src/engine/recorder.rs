// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Capture loop that turns live playback into a keyframe track.
//!
//! While recording, every tick samples the crop rectangle, volume and
//! playback rate, whether or not anything changed since the last tick.
//! The dense track keeps replay lookups simple when the replay clock
//! drifts from the capture clock.

use super::crop::CropRegionController;
use super::scheduler::IntervalTimer;
use super::transport::VideoElement;
use crate::models::{keyframe::Keyframe, track::Track};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    Idle,
    Recording,
}

#[derive(Debug, Clone)]
pub struct PlaybackRecorder {
    timer: IntervalTimer,
    track: Track,
}

impl PlaybackRecorder {
    pub fn new(period: Duration) -> Self {
        Self {
            timer: IntervalTimer::new(period),
            track: Track::new(),
        }
    }

    pub fn state(&self) -> RecorderState {
        if self.timer.is_running() {
            RecorderState::Recording
        } else {
            RecorderState::Idle
        }
    }

    pub fn is_recording(&self) -> bool {
        self.state() == RecorderState::Recording
    }

    /// Start sampling. Calling this while recording changes nothing.
    pub fn start(&mut self, now: Instant) {
        if !self.is_recording() {
            log::info!("Recording started ({} keyframes so far)", self.track.len());
        }
        self.timer.start(now);
    }

    /// Stop sampling and keep the track. No-op when idle.
    pub fn stop(&mut self) {
        if self.timer.stop() {
            log::info!("Recording stopped with {} keyframes", self.track.len());
        }
    }

    /// Stop and discard the track, ready for a new capture session.
    pub fn reset(&mut self) {
        self.timer.stop();
        self.track = Track::new();
    }

    /// Poll the capture loop. Samples once if a tick is due and returns the
    /// appended keyframe.
    pub fn tick<V: VideoElement + ?Sized>(
        &mut self,
        now: Instant,
        video: &V,
        crop: &CropRegionController,
    ) -> Option<Keyframe> {
        if !self.timer.poll(now) {
            return None;
        }
        self.sample(video, crop)
    }

    /// Append one keyframe built from the current player and crop state.
    ///
    /// Nothing is recorded while the player has no valid position or the
    /// crop is not laid out. A position earlier than the last sample (the
    /// user seeked backwards) is dropped so the track stays ordered.
    pub fn sample<V: VideoElement + ?Sized>(
        &mut self,
        video: &V,
        crop: &CropRegionController,
    ) -> Option<Keyframe> {
        let Some(time) = video.current_time().filter(|t| t.is_finite() && *t >= 0.0) else {
            log::debug!("Skipping sample: no playback position");
            return None;
        };
        let Some(rect) = crop.current() else {
            log::debug!("Skipping sample: crop region not laid out");
            return None;
        };

        let keyframe = Keyframe::new(
            time,
            rect,
            video.volume().clamp(0.0, 1.0),
            video.playback_rate(),
        );

        match self.track.push(keyframe) {
            Ok(()) => Some(keyframe),
            Err(e) => {
                log::debug!("Dropping sample: {}", e);
                None
            }
        }
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Hand the track over, leaving an empty one behind.
    pub fn take_track(&mut self) -> Track {
        std::mem::take(&mut self.track)
    }

    /// Time until the next sample is due, while recording.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.timer.time_until_next(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::transport::testing::FakeVideo;
    use crate::models::{
        options::AspectRatio,
        rect::{Point, Rect, Size},
    };

    const PERIOD: Duration = Duration::from_millis(17);

    fn setup() -> (PlaybackRecorder, FakeVideo, CropRegionController) {
        let mut crop = CropRegionController::new(AspectRatio::Square);
        crop.initialize(AspectRatio::Square, Size::new(400.0, 300.0)).unwrap();
        (
            PlaybackRecorder::new(PERIOD),
            FakeVideo::new(Size::new(1920.0, 1080.0)),
            crop,
        )
    }

    #[test]
    fn test_samples_only_while_recording() {
        let (mut recorder, video, crop) = setup();
        let start = Instant::now();

        assert_eq!(recorder.state(), RecorderState::Idle);
        assert!(recorder.tick(start + PERIOD, &video, &crop).is_none());

        recorder.start(start);
        assert_eq!(recorder.state(), RecorderState::Recording);
        let keyframe = recorder.tick(start + PERIOD, &video, &crop).unwrap();
        assert_eq!(keyframe.coordinates, [50.0, 0.0, 300.0, 300.0]);
        assert_eq!(keyframe.volume, 0.8);
        assert_eq!(keyframe.playback_rate, 1.0);
        assert_eq!(recorder.track().len(), 1);
    }

    #[test]
    fn test_dense_sampling_of_unchanged_state() {
        let (mut recorder, mut video, crop) = setup();
        let start = Instant::now();
        recorder.start(start);

        for i in 1..=5 {
            video.time = Some(i as f64 * 0.017);
            recorder.tick(start + PERIOD * i, &video, &crop);
        }
        assert_eq!(recorder.track().len(), 5);
        assert!(recorder
            .track()
            .keyframes()
            .iter()
            .all(|k| k.coordinates == [50.0, 0.0, 300.0, 300.0]));
    }

    #[test]
    fn test_drag_visible_to_next_tick() {
        let (mut recorder, mut video, mut crop) = setup();
        let start = Instant::now();
        recorder.start(start);

        video.time = Some(0.017);
        recorder.tick(start + PERIOD, &video, &crop);

        crop.begin_drag(Point::new(60.0, 10.0));
        crop.continue_drag(Point::new(40.0, 10.0));

        video.time = Some(0.034);
        let keyframe = recorder.tick(start + PERIOD * 2, &video, &crop).unwrap();
        assert_eq!(keyframe.rect(), Rect::new(30.0, 0.0, 300.0, 300.0));
    }

    #[test]
    fn test_track_stays_ordered_after_backward_seek() {
        let (mut recorder, mut video, crop) = setup();
        let start = Instant::now();
        recorder.start(start);

        let times = [0.1, 0.2, 0.3, 0.15, 0.25, 0.35, 0.35, 0.4];
        for (i, t) in times.iter().enumerate() {
            video.time = Some(*t);
            recorder.tick(start + PERIOD * (i as u32 + 1), &video, &crop);
        }

        let stamps: Vec<f64> = recorder.track().keyframes().iter().map(|k| k.time_stamp).collect();
        assert_eq!(stamps, vec![0.1, 0.2, 0.3, 0.35, 0.35, 0.4]);
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_skips_without_position_or_crop() {
        let (mut recorder, mut video, mut crop) = setup();
        video.time = None;
        assert!(recorder.sample(&video, &crop).is_none());

        video.time = Some(1.0);
        crop.clear();
        assert!(recorder.sample(&video, &crop).is_none());
        assert!(recorder.track().is_empty());
    }

    #[test]
    fn test_volume_is_clamped() {
        let (mut recorder, mut video, crop) = setup();
        video.volume = 1.7;
        let keyframe = recorder.sample(&video, &crop).unwrap();
        assert_eq!(keyframe.volume, 1.0);
    }

    #[test]
    fn test_no_tick_after_stop() {
        let (mut recorder, video, crop) = setup();
        let start = Instant::now();
        recorder.start(start);
        recorder.stop();
        recorder.stop();

        assert!(recorder.tick(start + PERIOD * 4, &video, &crop).is_none());
        assert!(recorder.track().is_empty());
        assert_eq!(recorder.time_until_next(start), None);
    }

    #[test]
    fn test_resume_appends_to_same_track() {
        let (mut recorder, mut video, crop) = setup();
        let start = Instant::now();
        recorder.start(start);
        video.time = Some(0.5);
        recorder.tick(start + PERIOD, &video, &crop);
        recorder.stop();

        recorder.start(start + PERIOD * 10);
        video.time = Some(0.6);
        recorder.tick(start + PERIOD * 11, &video, &crop);
        assert_eq!(recorder.track().len(), 2);

        recorder.reset();
        assert!(recorder.track().is_empty());
        assert!(!recorder.is_recording());
    }

    #[test]
    fn test_take_track_leaves_empty() {
        let (mut recorder, video, crop) = setup();
        recorder.sample(&video, &crop);
        let track = recorder.take_track();
        assert_eq!(track.len(), 1);
        assert!(recorder.track().is_empty());
    }
}
