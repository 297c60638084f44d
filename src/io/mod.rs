// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for media and track files.

pub mod media;
pub mod player;
pub mod serialization;
