// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media file loading (images and videos).
//!
//! This module opens media files as frame sources that the player can
//! query by playback time. Still images play as a static clip of fixed
//! duration; videos are decoded through OpenCV when the `video-opencv`
//! feature is enabled.

use crate::error::MediaError;
use crate::models::rect::Size;
use std::path::Path;

/// File extensions decoded as still images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "webp", "tiff", "tif"];

/// File extensions decoded as video (requires `video-opencv`).
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "mkv", "webm", "avi", "m4v"];

/// A decoded RGBA8 frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Frame {
    pub fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }
}

/// Something that yields frames by playback time.
pub trait MediaSource: Send {
    /// Native resolution of the media.
    fn intrinsic_size(&self) -> Size;

    /// Length in seconds.
    fn duration(&self) -> f64;

    /// Frame shown at `time`. Returns `None` when it is the same frame as
    /// the one returned by the previous call.
    fn frame_at(&mut self, time: f64) -> Result<Option<Frame>, MediaError>;
}

/// Load an image file into an RGBA frame.
pub fn load_image(path: &Path) -> Result<Frame, MediaError> {
    let img = image::open(path)?.to_rgba8();
    let (width, height) = img.dimensions();
    Ok(Frame {
        width,
        height,
        pixels: img.into_raw(),
    })
}

/// A single image played as a clip of fixed duration.
pub struct StillImage {
    frame: Frame,
    duration: f64,
    delivered: bool,
}

impl StillImage {
    pub fn new(frame: Frame, duration: f64) -> Self {
        Self {
            frame,
            duration,
            delivered: false,
        }
    }
}

impl MediaSource for StillImage {
    fn intrinsic_size(&self) -> Size {
        self.frame.size()
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn frame_at(&mut self, _time: f64) -> Result<Option<Frame>, MediaError> {
        if self.delivered {
            return Ok(None);
        }
        self.delivered = true;
        Ok(Some(self.frame.clone()))
    }
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| extensions.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Open a media file as a frame source.
pub fn open(path: &Path, still_duration: f64) -> Result<Box<dyn MediaSource>, MediaError> {
    if has_extension(path, IMAGE_EXTENSIONS) {
        let frame = load_image(path)?;
        log::info!(
            "Opened still image {} ({}x{}) as a {:.1}s clip",
            path.display(),
            frame.width,
            frame.height,
            still_duration
        );
        return Ok(Box::new(StillImage::new(frame, still_duration)));
    }

    if has_extension(path, VIDEO_EXTENSIONS) {
        return open_video(path);
    }

    Err(MediaError::Unsupported(path.to_path_buf()))
}

#[cfg(feature = "video-opencv")]
fn open_video(path: &Path) -> Result<Box<dyn MediaSource>, MediaError> {
    let video = opencv_video::OpenCvVideo::open(path)?;
    Ok(Box::new(video))
}

#[cfg(not(feature = "video-opencv"))]
fn open_video(path: &Path) -> Result<Box<dyn MediaSource>, MediaError> {
    log::error!("Video support is not compiled in; rebuild with --features video-opencv");
    Err(MediaError::Unsupported(path.to_path_buf()))
}

#[cfg(feature = "video-opencv")]
mod opencv_video {
    use super::{Frame, MediaSource};
    use crate::error::MediaError;
    use crate::models::rect::Size;
    use opencv::{core::Mat, imgproc, prelude::*, videoio};
    use std::path::Path;

    fn decode_error(e: opencv::Error) -> MediaError {
        MediaError::Decode(e.to_string())
    }

    /// Video file decoded frame by frame with OpenCV.
    pub struct OpenCvVideo {
        capture: videoio::VideoCapture,
        fps: f64,
        frame_count: f64,
        size: Size,
        /// Index of the frame the capture will read next.
        next_index: i64,
        last_index: Option<i64>,
    }

    impl OpenCvVideo {
        pub fn open(path: &Path) -> Result<Self, MediaError> {
            let path_str = path.to_string_lossy();
            let capture = videoio::VideoCapture::from_file(&path_str, videoio::CAP_ANY).map_err(decode_error)?;
            if !capture.is_opened().map_err(decode_error)? {
                return Err(MediaError::Decode(format!("cannot open {}", path.display())));
            }

            let fps = capture.get(videoio::CAP_PROP_FPS).map_err(decode_error)?;
            let frame_count = capture.get(videoio::CAP_PROP_FRAME_COUNT).map_err(decode_error)?;
            let width = capture.get(videoio::CAP_PROP_FRAME_WIDTH).map_err(decode_error)?;
            let height = capture.get(videoio::CAP_PROP_FRAME_HEIGHT).map_err(decode_error)?;
            let fps = if fps > 0.0 { fps } else { 30.0 };

            log::info!(
                "Opened video {} ({}x{}, {:.2} fps, {} frames)",
                path.display(),
                width,
                height,
                fps,
                frame_count
            );

            Ok(Self {
                capture,
                fps,
                frame_count,
                size: Size::new(width, height),
                next_index: 0,
                last_index: None,
            })
        }

        fn read_frame(&mut self, index: i64) -> Result<Option<Frame>, MediaError> {
            if index != self.next_index {
                self.capture
                    .set(videoio::CAP_PROP_POS_FRAMES, index as f64)
                    .map_err(decode_error)?;
            }

            let mut bgr = Mat::default();
            if !self.capture.read(&mut bgr).map_err(decode_error)? || bgr.empty() {
                return Ok(None);
            }
            self.next_index = index + 1;

            let mut rgba = Mat::default();
            imgproc::cvt_color(&bgr, &mut rgba, imgproc::COLOR_BGR2RGBA, 0).map_err(decode_error)?;
            let pixels = rgba.data_bytes().map_err(decode_error)?.to_vec();

            Ok(Some(Frame {
                width: rgba.cols() as u32,
                height: rgba.rows() as u32,
                pixels,
            }))
        }
    }

    impl MediaSource for OpenCvVideo {
        fn intrinsic_size(&self) -> Size {
            self.size
        }

        fn duration(&self) -> f64 {
            self.frame_count / self.fps
        }

        fn frame_at(&mut self, time: f64) -> Result<Option<Frame>, MediaError> {
            let last = (self.frame_count as i64 - 1).max(0);
            let index = ((time.max(0.0) * self.fps) as i64).min(last);
            if self.last_index == Some(index) {
                return Ok(None);
            }
            let frame = self.read_frame(index)?;
            if frame.is_some() {
                self.last_index = Some(index);
            }
            Ok(frame)
        }
    }
}
