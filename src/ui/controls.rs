// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Transport controls and session buttons.
//!
//! Widgets here never touch the session directly. They report what the
//! user asked for and the application applies it.

use super::timeline;
use crate::models::options::{AspectRatio, PlaybackRate};

/// Snapshot of the transport state the controls display.
#[derive(Debug, Clone, Copy)]
pub struct TransportView {
    pub playing: bool,
    pub position: f64,
    pub duration: f64,
    pub volume: f64,
    pub playback_rate: PlaybackRate,
    pub aspect_ratio: AspectRatio,
}

/// Result of transport control interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlsAction {
    TogglePlay,
    Seek(f64),
    ToggleMute,
    SetVolume(f64),
    SetPlaybackRate(PlaybackRate),
    SetAspectRatio(AspectRatio),
}

/// Session buttons under the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterAction {
    StartCropper,
    RemoveCropper,
    Export,
    Close,
}

fn play_pause(ui: &mut egui::Ui, playing: bool) -> bool {
    let (label, hint) = if playing { ("⏸", "Pause") } else { ("▶", "Play") };
    ui.button(label).on_hover_text(hint).clicked()
}

/// Play/pause button and seek bar, shared by both players.
pub fn transport_row(ui: &mut egui::Ui, playing: bool, position: f64, duration: f64) -> Option<ControlsAction> {
    let mut action = None;
    ui.horizontal(|ui| {
        if play_pause(ui, playing) {
            action = Some(ControlsAction::TogglePlay);
        }
        if let Some(seek) = timeline::seek_bar(ui, position, duration) {
            action = Some(ControlsAction::Seek(seek));
        }
    });
    action
}

/// Display the editor's transport controls.
pub fn show(ui: &mut egui::Ui, view: &TransportView) -> Vec<ControlsAction> {
    let mut actions = Vec::new();

    actions.extend(transport_row(ui, view.playing, view.position, view.duration));

    ui.horizontal(|ui| {
        timeline::time_display(ui, view.position, view.duration);

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let mut volume = view.volume;
            let slider = ui
                .add_sized([64.0, 18.0], egui::Slider::new(&mut volume, 0.0..=1.0).show_value(false))
                .on_hover_text("Change Volume");
            if slider.changed() {
                actions.push(ControlsAction::SetVolume(volume));
            }

            let (icon, hint) = if view.volume == 0.0 { ("🔇", "Unmute") } else { ("🔊", "Mute") };
            if ui.button(icon).on_hover_text(hint).clicked() {
                actions.push(ControlsAction::ToggleMute);
            }
        });
    });

    ui.horizontal(|ui| {
        let mut rate = view.playback_rate;
        egui::ComboBox::from_label("Playback Speed")
            .selected_text(rate.label())
            .show_ui(ui, |ui| {
                for option in PlaybackRate::ALL {
                    ui.selectable_value(&mut rate, option, option.label());
                }
            });
        if rate != view.playback_rate {
            actions.push(ControlsAction::SetPlaybackRate(rate));
        }

        let mut aspect = view.aspect_ratio;
        egui::ComboBox::from_label("Aspect Ratio")
            .selected_text(aspect.label())
            .show_ui(ui, |ui| {
                for option in AspectRatio::ALL {
                    ui.selectable_value(&mut aspect, option, option.label());
                }
            });
        if aspect != view.aspect_ratio {
            actions.push(ControlsAction::SetAspectRatio(aspect));
        }
    });

    actions
}

/// Display the session buttons.
pub fn footer(ui: &mut egui::Ui, cropper_active: bool, has_keyframes: bool) -> Option<FooterAction> {
    let mut action = None;
    ui.horizontal(|ui| {
        if ui.add_enabled(!cropper_active, egui::Button::new("Start Cropper")).clicked() {
            action = Some(FooterAction::StartCropper);
        }
        if ui.add_enabled(cropper_active, egui::Button::new("Remove Cropper")).clicked() {
            action = Some(FooterAction::RemoveCropper);
        }
        if ui
            .add_enabled(has_keyframes, egui::Button::new("Export Track..."))
            .clicked()
        {
            action = Some(FooterAction::Export);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Cancel").clicked() {
                action = Some(FooterAction::Close);
            }
        });
    });
    action
}
