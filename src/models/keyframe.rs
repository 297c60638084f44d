// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Keyframe data structure.
//!
//! A keyframe is one timestamped sample of the crop rectangle (viewport
//! space) plus the transport state at that moment. Field names and their
//! order form the export format and must not change.

use super::rect::Rect;
use crate::error::TrackError;
use serde::{Deserialize, Serialize};

/// One sample of crop rectangle, volume and playback rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
    /// Playback position in seconds.
    pub time_stamp: f64,
    /// Crop rectangle as `[x, y, width, height]` in viewport pixels.
    pub coordinates: [f64; 4],
    /// Output volume in `[0, 1]`.
    pub volume: f64,
    /// Playback rate multiplier, strictly positive.
    pub playback_rate: f64,
}

impl Keyframe {
    pub fn new(time_stamp: f64, rect: Rect, volume: f64, playback_rate: f64) -> Self {
        Self {
            time_stamp,
            coordinates: rect.to_array(),
            volume,
            playback_rate,
        }
    }

    /// The crop rectangle of this keyframe, in viewport space.
    pub fn rect(&self) -> Rect {
        Rect::from_array(self.coordinates)
    }

    /// Check the per-field constraints of a keyframe.
    pub fn validate(&self) -> Result<(), TrackError> {
        let invalid = |reason: &str| TrackError::InvalidKeyframe {
            time_stamp: self.time_stamp,
            reason: reason.to_string(),
        };

        if !self.time_stamp.is_finite() {
            return Err(invalid("timestamp is not finite"));
        }
        if self.coordinates.iter().any(|c| !c.is_finite()) {
            return Err(invalid("coordinates are not finite"));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(invalid("volume outside [0, 1]"));
        }
        if !(self.playback_rate.is_finite() && self.playback_rate > 0.0) {
            return Err(invalid("playback rate must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_field_names_and_order() {
        let keyframe = Keyframe::new(1.5, Rect::new(10.0, 20.0, 30.0, 40.0), 0.8, 1.0);
        let json = serde_json::to_string(&keyframe).unwrap();
        assert_eq!(
            json,
            r#"{"timeStamp":1.5,"coordinates":[10.0,20.0,30.0,40.0],"volume":0.8,"playbackRate":1.0}"#
        );
    }

    #[test]
    fn test_parses_integer_numbers() {
        let json = r#"{"timeStamp":0,"coordinates":[50,0,300,300],"volume":1,"playbackRate":2}"#;
        let keyframe: Keyframe = serde_json::from_str(json).unwrap();
        assert_eq!(keyframe.rect(), Rect::new(50.0, 0.0, 300.0, 300.0));
        assert_eq!(keyframe.playback_rate, 2.0);
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(Keyframe::new(0.0, rect, 0.5, 1.0).validate().is_ok());
        assert!(Keyframe::new(f64::NAN, rect, 0.5, 1.0).validate().is_err());
        assert!(Keyframe::new(0.0, rect, 1.2, 1.0).validate().is_err());
        assert!(Keyframe::new(0.0, rect, 0.5, 0.0).validate().is_err());
    }
}
