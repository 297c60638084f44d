// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! ReelCrop - crop-track capture and replay
//!
//! A cross-platform desktop application for recording a moving crop
//! region over a playing video and replaying it as a cropped preview.

mod app;
mod config;
mod engine;
mod error;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::ReelCropApp;
use config::EditorConfig;
use std::path::PathBuf;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = EditorConfig::load_or_default();
    let media = std::env::args_os().nth(1).map(PathBuf::from);

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 640.0])
            .with_min_inner_size([800.0, 480.0])
            .with_title("ReelCrop"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "ReelCrop",
        options,
        Box::new(move |_cc| Ok(Box::new(ReelCropApp::new(config, media)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
