// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Selectable aspect ratios and playback rates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Aspect ratio used to size the crop rectangle when it is initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AspectRatio {
    #[default]
    NineEighteen,
    NineSixteen,
    FourThree,
    ThreeFour,
    Square,
    FourFive,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 6] = [
        AspectRatio::NineEighteen,
        AspectRatio::NineSixteen,
        AspectRatio::FourThree,
        AspectRatio::ThreeFour,
        AspectRatio::Square,
        AspectRatio::FourFive,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AspectRatio::NineEighteen => "9:18",
            AspectRatio::NineSixteen => "9:16",
            AspectRatio::FourThree => "4:3",
            AspectRatio::ThreeFour => "3:4",
            AspectRatio::Square => "1:1",
            AspectRatio::FourFive => "4:5",
        }
    }

    /// Width divided by height.
    pub fn ratio(&self) -> f64 {
        match self {
            AspectRatio::NineEighteen => 9.0 / 18.0,
            AspectRatio::NineSixteen => 9.0 / 16.0,
            AspectRatio::FourThree => 4.0 / 3.0,
            AspectRatio::ThreeFour => 3.0 / 4.0,
            AspectRatio::Square => 1.0,
            AspectRatio::FourFive => 4.0 / 5.0,
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AspectRatio::ALL
            .into_iter()
            .find(|a| a.label() == s.trim())
            .ok_or_else(|| format!("unknown aspect ratio: {}", s))
    }
}

impl TryFrom<String> for AspectRatio {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AspectRatio> for String {
    fn from(value: AspectRatio) -> Self {
        value.label().to_string()
    }
}

/// Playback speed presets offered in the transport controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackRate {
    Half,
    #[default]
    Normal,
    OneAndHalf,
    Double,
}

impl PlaybackRate {
    pub const ALL: [PlaybackRate; 4] = [
        PlaybackRate::Half,
        PlaybackRate::Normal,
        PlaybackRate::OneAndHalf,
        PlaybackRate::Double,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PlaybackRate::Half => "0.5x",
            PlaybackRate::Normal => "1x",
            PlaybackRate::OneAndHalf => "1.5x",
            PlaybackRate::Double => "2x",
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            PlaybackRate::Half => 0.5,
            PlaybackRate::Normal => 1.0,
            PlaybackRate::OneAndHalf => 1.5,
            PlaybackRate::Double => 2.0,
        }
    }

    /// The preset matching a numeric rate, if any.
    pub fn from_value(value: f64) -> Option<Self> {
        PlaybackRate::ALL
            .into_iter()
            .find(|r| (r.value() - value).abs() < f64::EPSILON)
    }
}
