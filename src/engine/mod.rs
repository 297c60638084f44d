// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Crop capture and replay engine.
//!
//! Everything here runs on the UI thread and is driven by polling:
//! the application feeds input events, transport events and the current
//! time, and the engine decides when to sample or redraw.

pub mod crop;
pub mod recorder;
pub mod replay;
pub mod scheduler;
pub mod session;
pub mod transport;
