// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Track serialization and deserialization.
//!
//! The JSON export is an array of keyframe objects with the fields
//! `timeStamp`, `coordinates`, `volume` and `playbackRate`, in that order.
//! YAML uses the same field names. Empty tracks are never written, and
//! imported tracks are validated before use.

use crate::error::ExportError;
use crate::models::{keyframe::Keyframe, track::Track};
use std::path::Path;

/// Serialize a track as the pretty-printed JSON export document.
pub fn to_json_string(track: &Track) -> Result<String, ExportError> {
    track.validate()?;
    Ok(serde_json::to_string_pretty(track)?)
}

/// Serialize a track as YAML.
pub fn to_yaml_string(track: &Track) -> Result<String, ExportError> {
    track.validate()?;
    Ok(serde_yaml::to_string(track)?)
}

/// Parse and validate a JSON track document.
pub fn from_json_str(json: &str) -> Result<Track, ExportError> {
    let keyframes: Vec<Keyframe> = serde_json::from_str(json)?;
    Ok(Track::from_keyframes(keyframes)?)
}

/// Parse and validate a YAML track document.
pub fn from_yaml_str(yaml: &str) -> Result<Track, ExportError> {
    let keyframes: Vec<Keyframe> = serde_yaml::from_str(yaml)?;
    Ok(Track::from_keyframes(keyframes)?)
}

/// Export a track to JSON format.
pub fn export_json(track: &Track, path: &Path) -> Result<(), ExportError> {
    write(path, to_json_string(track)?)
}

/// Export a track to YAML format.
pub fn export_yaml(track: &Track, path: &Path) -> Result<(), ExportError> {
    write(path, to_yaml_string(track)?)
}

/// Import a track from JSON format.
pub fn import_json(path: &Path) -> Result<Track, ExportError> {
    from_json_str(&read(path)?)
}

/// Import a track from YAML format.
pub fn import_yaml(path: &Path) -> Result<Track, ExportError> {
    from_yaml_str(&read(path)?)
}

/// Export using the format implied by the file extension.
pub fn export(track: &Track, path: &Path) -> Result<(), ExportError> {
    match extension(path).as_deref() {
        Some("yaml") | Some("yml") => export_yaml(track, path),
        Some("json") => export_json(track, path),
        other => Err(ExportError::UnsupportedFormat(other.map(str::to_string))),
    }
}

/// Import using the format implied by the file extension.
pub fn import(path: &Path) -> Result<Track, ExportError> {
    match extension(path).as_deref() {
        Some("yaml") | Some("yml") => import_yaml(path),
        Some("json") => import_json(path),
        other => Err(ExportError::UnsupportedFormat(other.map(str::to_string))),
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
}

fn write(path: &Path, contents: String) -> Result<(), ExportError> {
    std::fs::write(path, contents).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read(path: &Path) -> Result<String, ExportError> {
    std::fs::read_to_string(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackError;
    use crate::models::rect::Rect;

    fn sample_track() -> Track {
        let mut track = Track::new();
        track
            .push(Keyframe::new(0.0, Rect::new(50.0, 0.0, 300.0, 300.0), 0.8, 1.0))
            .unwrap();
        track
            .push(Keyframe::new(0.5, Rect::new(40.0, 0.0, 300.0, 300.0), 0.8, 1.5))
            .unwrap();
        track
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("reelcrop-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_json_document_layout() {
        let json = to_json_string(&sample_track()).unwrap();
        assert!(json.starts_with("[\n  {\n    \"timeStamp\": 0.0,\n    \"coordinates\": ["));

        let time = json.find("timeStamp").unwrap();
        let coordinates = json.find("coordinates").unwrap();
        let volume = json.find("volume").unwrap();
        let rate = json.find("playbackRate").unwrap();
        assert!(time < coordinates && coordinates < volume && volume < rate);
    }

    #[test]
    fn test_empty_track_is_not_exported() {
        let path = temp_path("empty.json");
        let err = export_json(&Track::new(), &path).unwrap_err();
        assert!(matches!(err, ExportError::Track(TrackError::Empty)));
        assert!(!path.exists());
    }

    #[test]
    fn test_json_file_roundtrip() {
        let path = temp_path("track.json");
        let track = sample_track();
        export(&track, &path).unwrap();
        let imported = import(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(imported, track);
    }

    #[test]
    fn test_yaml_file_roundtrip() {
        let path = temp_path("track.yaml");
        let track = sample_track();
        export(&track, &path).unwrap();
        let yaml = std::fs::read_to_string(&path).unwrap();
        let imported = import(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(yaml.contains("playbackRate"));
        assert_eq!(imported, track);
    }

    #[test]
    fn test_import_rejects_unordered_track() {
        let json = r#"[
            {"timeStamp": 2, "coordinates": [0, 0, 10, 10], "volume": 0.5, "playbackRate": 1},
            {"timeStamp": 1, "coordinates": [0, 0, 10, 10], "volume": 0.5, "playbackRate": 1}
        ]"#;
        let err = from_json_str(json).unwrap_err();
        assert!(matches!(err, ExportError::Track(TrackError::OutOfOrder { .. })));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = export(&sample_track(), Path::new("track.csv")).unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedFormat(Some(ref ext)) if ext == "csv"));
    }
}
