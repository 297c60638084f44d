// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Video timeline scrubber control.
//!
//! This module provides the seek slider and the elapsed/total time
//! readout shown under both players.

/// Format seconds as `m:ss.cc` (minutes, seconds, hundredths).
pub fn format_time(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let minutes = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    let hundredths = ((seconds % 1.0) * 100.0).floor() as u64;
    format!("{}:{:02}.{:02}", minutes, secs, hundredths)
}

/// Display a seek slider. Returns the new position when the user moved it.
pub fn seek_bar(ui: &mut egui::Ui, position: f64, duration: f64) -> Option<f64> {
    let mut value = position;
    let width = ui.available_width();
    let response = ui
        .add_sized(
            [width, 18.0],
            egui::Slider::new(&mut value, 0.0..=duration.max(0.0)).show_value(false),
        )
        .on_hover_text("Seek Video");

    response.changed().then_some(value)
}

/// Display `current / total` in the timeline's format.
pub fn time_display(ui: &mut egui::Ui, position: f64, duration: f64) {
    ui.label(
        egui::RichText::new(format!("{} / {}", format_time(position), format_time(duration)))
            .color(egui::Color32::from_gray(160)),
    );
}
