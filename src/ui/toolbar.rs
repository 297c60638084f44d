// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar and tab selection UI.
//!
//! This module provides the toolbar for switching between capturing a
//! crop session and previewing a recorded one.

use crate::app::Tab;

/// Display the toolbar with tab selection buttons.
pub fn show(ui: &mut egui::Ui, current_tab: &mut Tab) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label(egui::RichText::new("Cropper").strong());

        ui.separator();

        if ui
            .selectable_label(*current_tab == Tab::Generate, "✂ Generate Session")
            .clicked()
        {
            *current_tab = Tab::Generate;
        }

        if ui
            .selectable_label(*current_tab == Tab::Preview, "▶ Preview Session")
            .clicked()
        {
            *current_tab = Tab::Preview;
        }

        ui.separator();

        let hint = match current_tab {
            Tab::Generate => "Start the cropper, then play the video and drag the crop region",
            Tab::Preview => "Play to replay the recorded crop track",
        };

        ui.label(egui::RichText::new(hint).italics().weak());
    });
}
