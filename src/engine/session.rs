// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! One crop editing session.
//!
//! The session ties the crop controller and the recorder to the editing
//! player's transport: recording follows play/pause, the end of the media
//! requests an export, and the finished track is handed to replay.

use super::crop::CropRegionController;
use super::recorder::PlaybackRecorder;
use super::replay::PreviewReplayEngine;
use super::transport::{DrawRegion, TransportEvent, VideoElement};
use crate::config::EditorConfig;
use crate::error::{ExportError, TrackError};
use crate::io::serialization;
use crate::models::{
    keyframe::Keyframe,
    options::{AspectRatio, PlaybackRate},
    rect::{Rect, Size},
    track::Track,
};
use crate::util::geometry;
use std::time::{Duration, Instant};

/// Follow-up the application has to carry out for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    /// The media ended while capturing; the track should be exported.
    ExportRequested,
}

#[derive(Debug, Clone)]
pub struct EditingSession {
    crop: CropRegionController,
    recorder: PlaybackRecorder,
    period: Duration,
    cropper_active: bool,
    playing: bool,
    volume: f64,
    unmute_volume: f64,
    playback_rate: PlaybackRate,
    finished: Option<Track>,
}

impl EditingSession {
    pub fn new(config: &EditorConfig) -> Self {
        let period = config.tick_interval();
        Self {
            crop: CropRegionController::new(config.default_aspect_ratio),
            recorder: PlaybackRecorder::new(period),
            period,
            cropper_active: false,
            playing: false,
            volume: config.default_volume,
            unmute_volume: config.unmute_volume,
            playback_rate: PlaybackRate::from_value(config.default_playback_rate).unwrap_or_default(),
            finished: None,
        }
    }

    /// Show the crop region and begin a new capture with an empty track.
    ///
    /// Returns the initial rectangle, or `None` while the container has no
    /// size yet; it is then laid out on the next [`set_container`](Self::set_container).
    pub fn start_cropper(&mut self, container: Size, now: Instant) -> Option<Rect> {
        self.recorder.reset();
        self.finished = None;
        self.cropper_active = true;
        let rect = self.crop.set_container(container);
        log::info!("Cropper started with aspect ratio {}", self.crop.aspect_ratio());
        if self.playing {
            self.recorder.start(now);
        }
        rect
    }

    /// Hide the crop region and stop recording. The recorded track is kept.
    pub fn remove_cropper(&mut self) {
        self.recorder.stop();
        self.crop.clear();
        self.cropper_active = false;
        log::info!("Cropper removed");
    }

    pub fn cropper_active(&self) -> bool {
        self.cropper_active
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    pub fn crop(&self) -> &CropRegionController {
        &self.crop
    }

    pub fn crop_mut(&mut self) -> &mut CropRegionController {
        &mut self.crop
    }

    /// Track recorded so far in the current capture.
    pub fn track(&self) -> &Track {
        self.finished.as_ref().unwrap_or_else(|| self.recorder.track())
    }

    /// Report the measured display container.
    pub fn set_container(&mut self, container: Size) -> Option<Rect> {
        if !self.cropper_active {
            return None;
        }
        self.crop.set_container(container)
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.crop.aspect_ratio()
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: AspectRatio) -> Option<Rect> {
        let rect = self.crop.set_aspect_ratio(aspect_ratio);
        if !self.cropper_active {
            self.crop.clear();
            return None;
        }
        rect
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Mute, or restore the unmute volume when already muted.
    pub fn toggle_mute(&mut self) {
        self.volume = if self.volume == 0.0 { self.unmute_volume } else { 0.0 };
    }

    pub fn playback_rate(&self) -> PlaybackRate {
        self.playback_rate
    }

    pub fn set_playback_rate(&mut self, rate: PlaybackRate) {
        self.playback_rate = rate;
    }

    /// Push the selected volume and playback rate to the editing player.
    pub fn apply_transport<V: VideoElement + ?Sized>(&self, video: &mut V) {
        video.set_volume(self.volume);
        video.set_playback_rate(self.playback_rate.value());
    }

    /// React to a transport change of the editing player.
    pub fn handle_transport(&mut self, event: TransportEvent, now: Instant) -> Option<SessionAction> {
        match event {
            TransportEvent::Play => {
                self.playing = true;
                if self.cropper_active {
                    self.recorder.start(now);
                }
                None
            }
            TransportEvent::Pause => {
                self.playing = false;
                self.recorder.stop();
                None
            }
            TransportEvent::Ended => {
                self.playing = false;
                let was_capturing = self.cropper_active;
                self.recorder.stop();
                was_capturing.then_some(SessionAction::ExportRequested)
            }
        }
    }

    /// Poll the capture loop.
    pub fn tick<V: VideoElement + ?Sized>(&mut self, now: Instant, video: &V) -> Option<Keyframe> {
        self.recorder.tick(now, video, &self.crop)
    }

    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.recorder.time_until_next(now)
    }

    /// Region of the editing video under the crop, for the live preview
    /// shown while capturing. The display container is the reference frame.
    pub fn live_preview_region<V: VideoElement + ?Sized>(&self, video: &V, canvas: Size) -> Option<DrawRegion> {
        let rect = self.crop.current()?;
        let container = self.crop.container()?;
        let intrinsic = video.intrinsic_size()?;
        match geometry::to_intrinsic(rect, container, intrinsic) {
            Ok(source) if canvas.is_measurable() => Some(DrawRegion {
                source,
                destination: Rect::from_size(canvas),
            }),
            Ok(_) => None,
            Err(e) => {
                log::debug!("Live preview skipped: {}", e);
                None
            }
        }
    }

    /// Stop capturing and hand over the track. An empty capture is refused.
    pub fn finish(&mut self) -> Result<Track, ExportError> {
        self.recorder.stop();
        if self.cropper_active {
            self.remove_cropper();
        }

        if !self.recorder.track().is_empty() {
            self.finished = Some(self.recorder.take_track());
        }
        match &self.finished {
            Some(track) => Ok(track.clone()),
            None => {
                log::warn!("No keyframes recorded, nothing to export");
                Err(TrackError::Empty.into())
            }
        }
    }

    /// Finish the capture and serialize the track as the JSON export document.
    pub fn export_json(&mut self) -> Result<String, ExportError> {
        let track = self.finish()?;
        let json = serialization::to_json_string(&track)?;
        log::info!("Exported {} keyframes", track.len());
        Ok(json)
    }

    /// Build a replay engine over the finished track.
    pub fn replay_engine(&self) -> Result<PreviewReplayEngine, TrackError> {
        let track = self.finished.clone().ok_or(TrackError::Empty)?;
        PreviewReplayEngine::new(track, self.period)
    }

    /// Stop every loop owned by the session.
    pub fn teardown(&mut self) {
        self.recorder.stop();
        self.crop.end_drag();
        self.playing = false;
    }
}
