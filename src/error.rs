// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for the crop engine.
//!
//! Geometry and track errors are local and recoverable: callers log them
//! and skip the affected operation. Only a malformed track handed to
//! replay or export is refused outright.

use std::path::PathBuf;

/// Coordinate mapping could not be computed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// A container, canvas or video has no usable size yet.
    #[error("{what} size is not available yet ({width}x{height})")]
    Indeterminate {
        what: &'static str,
        width: f64,
        height: f64,
    },

    #[error("invalid aspect ratio: {0}")]
    InvalidAspectRatio(f64),
}

/// A keyframe or track violates its invariants.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrackError {
    #[error("track contains no keyframes")]
    Empty,

    #[error("keyframe {index} at {current}s precedes previous keyframe at {previous}s")]
    OutOfOrder {
        index: usize,
        previous: f64,
        current: f64,
    },

    #[error("invalid keyframe at {time_stamp}s: {reason}")]
    InvalidKeyframe { time_stamp: f64, reason: String },
}

/// Exporting or importing a track failed.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Track(#[from] TrackError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported track file extension: {0:?}")]
    UnsupportedFormat(Option<String>),
}

/// Opening or decoding media failed.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("unsupported media file: {0}")]
    Unsupported(PathBuf),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error("video decoding error: {0}")]
    Decode(String),
}
