// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: geometry, keyframes, tracks and selectable options.

pub mod keyframe;
pub mod options;
pub mod rect;
pub mod track;
