// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the cropper application.

pub mod canvas;
pub mod controls;
pub mod preview;
pub mod timeline;
pub mod toolbar;
