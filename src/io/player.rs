// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Wall-clock media player.
//!
//! The player advances its position by elapsed time times playback rate
//! each time it is polled, and fetches the matching frame from its media
//! source. Volume is tracked as transport state only; there is no audio
//! output.

use super::media::{Frame, MediaSource};
use crate::engine::transport::{TransportEvent, VideoElement};
use crate::error::MediaError;
use crate::models::rect::Size;
use std::time::Instant;

pub struct MediaPlayer {
    source: Box<dyn MediaSource>,
    position: f64,
    /// Time of the last position update while playing.
    clock: Option<Instant>,
    volume: f64,
    playback_rate: f64,
}

impl MediaPlayer {
    pub fn new(source: Box<dyn MediaSource>) -> Self {
        Self {
            source,
            position: 0.0,
            clock: None,
            volume: 1.0,
            playback_rate: 1.0,
        }
    }

    pub fn duration(&self) -> f64 {
        self.source.duration()
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.clock.is_some()
    }

    /// Start playing. Playing from the end restarts at the beginning.
    pub fn play(&mut self, now: Instant) -> Option<TransportEvent> {
        if self.is_playing() {
            return None;
        }
        if self.position >= self.duration() {
            self.position = 0.0;
        }
        self.clock = Some(now);
        Some(TransportEvent::Play)
    }

    pub fn pause(&mut self, now: Instant) -> Option<TransportEvent> {
        if !self.is_playing() {
            return None;
        }
        self.advance(now);
        self.clock = None;
        Some(TransportEvent::Pause)
    }

    pub fn toggle(&mut self, now: Instant) -> Option<TransportEvent> {
        if self.is_playing() {
            self.pause(now)
        } else {
            self.play(now)
        }
    }

    /// Jump to `time`, clamped to the media length.
    pub fn seek(&mut self, time: f64, now: Instant) {
        self.position = time.clamp(0.0, self.duration());
        if self.is_playing() {
            self.clock = Some(now);
        }
    }

    /// Move the position forward to `now`. Returns `Ended` when the end of
    /// the media is reached, after which the player is stopped.
    pub fn advance(&mut self, now: Instant) -> Option<TransportEvent> {
        let last = self.clock?;
        let elapsed = now.saturating_duration_since(last).as_secs_f64();
        self.position += elapsed * self.playback_rate;
        self.clock = Some(now);

        if self.position >= self.duration() {
            self.position = self.duration();
            self.clock = None;
            log::info!("Playback ended at {:.2}s", self.position);
            return Some(TransportEvent::Ended);
        }
        None
    }

    /// The frame at the current position if it differs from the last one.
    pub fn take_frame(&mut self) -> Result<Option<Frame>, MediaError> {
        self.source.frame_at(self.position)
    }
}

impl VideoElement for MediaPlayer {
    fn current_time(&self) -> Option<f64> {
        Some(self.position)
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn playback_rate(&self) -> f64 {
        self.playback_rate
    }

    fn intrinsic_size(&self) -> Option<Size> {
        Some(self.source.intrinsic_size()).filter(Size::is_measurable)
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn set_playback_rate(&mut self, rate: f64) {
        if rate.is_finite() && rate > 0.0 {
            self.playback_rate = rate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct Clip {
        duration: f64,
    }

    impl MediaSource for Clip {
        fn intrinsic_size(&self) -> Size {
            Size::new(1920.0, 1080.0)
        }

        fn duration(&self) -> f64 {
            self.duration
        }

        fn frame_at(&mut self, _time: f64) -> Result<Option<Frame>, MediaError> {
            Ok(None)
        }
    }

    fn player(duration: f64) -> MediaPlayer {
        MediaPlayer::new(Box::new(Clip { duration }))
    }

    #[test]
    fn test_position_follows_clock_and_rate() {
        let mut player = player(10.0);
        let start = Instant::now();
        assert_eq!(player.play(start), Some(TransportEvent::Play));
        assert_eq!(player.play(start), None);

        player.advance(start + Duration::from_millis(500));
        assert!((player.position() - 0.5).abs() < 1e-9);

        player.set_playback_rate(2.0);
        player.advance(start + Duration::from_millis(1000));
        assert!((player.position() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_pause_freezes_position() {
        let mut player = player(10.0);
        let start = Instant::now();
        player.play(start);
        assert_eq!(player.pause(start + Duration::from_secs(1)), Some(TransportEvent::Pause));
        assert_eq!(player.pause(start + Duration::from_secs(2)), None);
        assert_eq!(player.advance(start + Duration::from_secs(5)), None);
        assert!((player.position() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_reaching_end_reports_ended_once() {
        let mut player = player(1.0);
        let start = Instant::now();
        player.play(start);
        assert_eq!(player.advance(start + Duration::from_secs(2)), Some(TransportEvent::Ended));
        assert_eq!(player.position(), 1.0);
        assert!(!player.is_playing());
        assert_eq!(player.advance(start + Duration::from_secs(3)), None);

        player.play(start + Duration::from_secs(3));
        assert_eq!(player.position(), 0.0);
    }

    #[test]
    fn test_seek_and_transport_setters() {
        let mut player = player(10.0);
        let now = Instant::now();
        player.seek(42.0, now);
        assert_eq!(player.current_time(), Some(10.0));
        player.seek(-1.0, now);
        assert_eq!(player.current_time(), Some(0.0));

        player.set_playback_rate(0.0);
        assert_eq!(player.playback_rate(), 1.0);
        player.set_volume(2.0);
        assert_eq!(player.volume(), 1.0);
        assert_eq!(player.intrinsic_size(), Some(Size::new(1920.0, 1080.0)));
    }
}
