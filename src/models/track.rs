// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Keyframe track.
//!
//! A track is the ordered sequence of keyframes captured in one recording
//! session. Timestamps never decrease, which lets replay find the keyframe
//! in effect at any time with a binary search.

use super::keyframe::Keyframe;
use crate::error::TrackError;
use serde::{Deserialize, Serialize};

/// Ordered, append-only sequence of keyframes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Track {
    keyframes: Vec<Keyframe>,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a track from keyframes supplied from outside the recorder
    /// (e.g. an imported file). The sequence is validated first.
    pub fn from_keyframes(keyframes: Vec<Keyframe>) -> Result<Self, TrackError> {
        let track = Self { keyframes };
        track.validate()?;
        Ok(track)
    }

    /// Append a keyframe, rejecting it if it would break ordering or if
    /// any of its fields is invalid.
    pub fn push(&mut self, keyframe: Keyframe) -> Result<(), TrackError> {
        keyframe.validate()?;
        if let Some(last) = self.keyframes.last() {
            if keyframe.time_stamp < last.time_stamp {
                return Err(TrackError::OutOfOrder {
                    index: self.keyframes.len(),
                    previous: last.time_stamp,
                    current: keyframe.time_stamp,
                });
            }
        }
        self.keyframes.push(keyframe);
        Ok(())
    }

    /// Check that the track is non-empty, ordered and made of valid keyframes.
    pub fn validate(&self) -> Result<(), TrackError> {
        if self.keyframes.is_empty() {
            return Err(TrackError::Empty);
        }
        for keyframe in &self.keyframes {
            keyframe.validate()?;
        }
        for (index, pair) in self.keyframes.windows(2).enumerate() {
            if pair[1].time_stamp < pair[0].time_stamp {
                return Err(TrackError::OutOfOrder {
                    index: index + 1,
                    previous: pair[0].time_stamp,
                    current: pair[1].time_stamp,
                });
            }
        }
        Ok(())
    }

    /// The keyframe in effect at `time`: the last one whose timestamp is
    /// `<= time`, or `None` when `time` precedes every keyframe.
    pub fn keyframe_at(&self, time: f64) -> Option<&Keyframe> {
        // NaN compares false everywhere, which would select the last keyframe.
        if time.is_nan() {
            return None;
        }
        let after = self.keyframes.partition_point(|k| k.time_stamp <= time);
        after.checked_sub(1).map(|index| &self.keyframes[index])
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    pub fn last(&self) -> Option<&Keyframe> {
        self.keyframes.last()
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Time span covered by the track, in seconds.
    pub fn duration(&self) -> f64 {
        match (self.keyframes.first(), self.keyframes.last()) {
            (Some(first), Some(last)) => last.time_stamp - first.time_stamp,
            _ => 0.0,
        }
    }
}
