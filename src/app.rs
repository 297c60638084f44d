// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. It owns both players, feeds UI input and transport
//! events to the editing session and the replay engine, and polls their
//! loops once per frame after input has been handled.

use crate::config::EditorConfig;
use crate::engine::{
    replay::{FrameOutcome, PreviewReplayEngine},
    session::{EditingSession, SessionAction},
    transport::{DrawSurface, TransportEvent, VideoElement},
};
use crate::io::{
    media::{self, MediaSource},
    player::MediaPlayer,
    serialization,
};
use crate::models::rect::Size;
use crate::ui::{
    canvas::{self, CanvasAction},
    controls::{self, ControlsAction, FooterAction, TransportView},
    preview::{self, PreviewCanvas},
    timeline, toolbar,
};
use anyhow::Context;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::time::{Duration, Instant};

/// Currently selected tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Generate,
    Preview,
}

/// Result of background media loading: one source per player.
struct LoadedMedia {
    path: PathBuf,
    editor: Box<dyn MediaSource>,
    preview: Box<dyn MediaSource>,
}

/// The player the crop is captured on.
struct EditorView {
    player: MediaPlayer,
    texture: Option<egui::TextureHandle>,
}

/// The second player the recorded track is replayed against.
struct PreviewView {
    player: MediaPlayer,
    texture: Option<egui::TextureHandle>,
    canvas: PreviewCanvas,
    engine: Option<PreviewReplayEngine>,
}

/// Everything the Generate tab asked for during one frame.
#[derive(Default)]
struct GenerateInput {
    canvas: Option<CanvasAction>,
    controls: Vec<ControlsAction>,
    footer: Option<FooterAction>,
}

/// Main application state.
pub struct ReelCropApp {
    config: EditorConfig,

    /// Currently selected tab
    current_tab: Tab,

    /// File both players were opened from
    media_path: Option<PathBuf>,

    /// Crop capture session for the loaded media
    session: EditingSession,

    editor: Option<EditorView>,

    /// Live preview of the crop while capturing
    live_canvas: PreviewCanvas,

    preview: Option<PreviewView>,

    /// Receiver for background media loading
    media_loader: Option<Receiver<anyhow::Result<LoadedMedia>>>,

    /// Loading state message
    loading_message: Option<String>,

    /// Last user-facing outcome (export, import, errors)
    status: Option<String>,
}

impl ReelCropApp {
    /// Create a new application instance, optionally opening `media` right away.
    pub fn new(config: EditorConfig, media: Option<PathBuf>) -> Self {
        let mut app = Self {
            session: EditingSession::new(&config),
            live_canvas: PreviewCanvas::new(Size::default()),
            current_tab: Tab::Generate,
            media_path: None,
            editor: None,
            preview: None,
            media_loader: None,
            loading_message: None,
            status: None,
            config,
        };
        if let Some(path) = media {
            app.open_media(path);
        }
        app
    }

    /// Open a media file for both players (asynchronously).
    fn open_media(&mut self, path: PathBuf) {
        let (sender, receiver) = channel();
        self.media_loader = Some(receiver);
        self.loading_message = Some("Loading media...".to_string());

        let still_duration = self.config.still_duration_secs;

        // Spawn background thread for loading
        std::thread::spawn(move || {
            let result = (|| -> anyhow::Result<LoadedMedia> {
                let editor = media::open(&path, still_duration)
                    .with_context(|| format!("Failed to open {}", path.display()))?;
                let preview = media::open(&path, still_duration)
                    .with_context(|| format!("Failed to open {} for preview", path.display()))?;
                Ok(LoadedMedia {
                    path,
                    editor,
                    preview,
                })
            })();

            let _ = sender.send(result);
        });
    }

    /// Swap in freshly loaded media and start a new session.
    fn install_media(&mut self, loaded: LoadedMedia) {
        self.close_media();

        let mut editor = MediaPlayer::new(loaded.editor);
        self.session = EditingSession::new(&self.config);
        self.session.apply_transport(&mut editor);

        self.editor = Some(EditorView {
            player: editor,
            texture: None,
        });
        self.preview = Some(PreviewView {
            player: MediaPlayer::new(loaded.preview),
            texture: None,
            canvas: PreviewCanvas::new(self.config.preview_size()),
            engine: None,
        });

        log::info!("Loaded media: {}", loaded.path.display());
        self.media_path = Some(loaded.path);
        self.current_tab = Tab::Generate;
    }

    /// Stop every loop and drop the players.
    fn close_media(&mut self) {
        self.session.teardown();
        if let Some(preview) = &mut self.preview {
            if let Some(engine) = &mut preview.engine {
                engine.stop();
            }
        }
        self.editor = None;
        self.preview = None;
        self.live_canvas.clear();
        self.media_path = None;
        self.session = EditingSession::new(&self.config);
    }

    fn editor_transport(&mut self, event: TransportEvent, now: Instant) {
        if let Some(SessionAction::ExportRequested) = self.session.handle_transport(event, now) {
            self.export_track();
        }
    }

    /// Finish the capture and write the track to a user-chosen file.
    fn export_track(&mut self) {
        if let Some(editor) = &mut self.editor {
            if let Some(event) = editor.player.pause(Instant::now()) {
                self.session.handle_transport(event, Instant::now());
            }
        }

        let track = match self.session.finish() {
            Ok(track) => track,
            Err(e) => {
                log::warn!("Export skipped: {}", e);
                self.status = Some("No data to export".to_string());
                return;
            }
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .add_filter("YAML", &["yaml", "yml"])
            .set_file_name(&self.config.export_file_name)
            .save_file()
        else {
            return;
        };

        match serialization::export(&track, &path) {
            Ok(()) => {
                log::info!("Exported {} keyframes to {}", track.len(), path.display());
                self.status = Some(format!("Exported {} keyframes", track.len()));
            }
            Err(e) => {
                log::error!("Failed to export track: {}", e);
                self.status = Some(format!("Export failed: {}", e));
            }
        }
    }

    /// Put the export document on the clipboard.
    fn copy_track_json(&mut self, ctx: &egui::Context) {
        match self.session.export_json() {
            Ok(json) => {
                ctx.output_mut(|o| o.copied_text = json);
                self.status = Some("Track JSON copied to clipboard".to_string());
            }
            Err(e) => {
                log::warn!("Nothing to copy: {}", e);
                self.status = Some("No data to export".to_string());
            }
        }
    }

    /// Load a previously exported track into the preview tab.
    fn import_track(&mut self, path: PathBuf) {
        let track = match serialization::import(&path) {
            Ok(track) => track,
            Err(e) => {
                log::error!("Failed to import {}: {}", path.display(), e);
                self.status = Some(format!("Import failed: {}", e));
                return;
            }
        };
        log::info!("Imported {} keyframes from {}", track.len(), path.display());

        let now = Instant::now();
        if let Some(editor) = &mut self.editor {
            if let Some(event) = editor.player.pause(now) {
                self.session.handle_transport(event, now);
            }
        }

        match PreviewReplayEngine::new(track, self.config.tick_interval()) {
            Ok(engine) => {
                self.install_replay(engine);
                self.current_tab = Tab::Preview;
            }
            Err(e) => self.status = Some(format!("Import failed: {}", e)),
        }
    }

    fn install_replay(&mut self, engine: PreviewReplayEngine) {
        let Some(preview) = &mut self.preview else {
            self.status = Some("Open the video the track was recorded on first".to_string());
            return;
        };
        if let Some(old) = &mut preview.engine {
            old.stop();
        }
        let now = Instant::now();
        preview.player.pause(now);
        preview.player.seek(0.0, now);
        preview.canvas.clear();
        self.status = Some(format!("Previewing {} keyframes", engine.track().len()));
        preview.engine = Some(engine);
    }

    /// Entering the preview tab ends the capture and replays its track.
    fn prepare_preview(&mut self, now: Instant) {
        if let Some(editor) = &mut self.editor {
            if let Some(event) = editor.player.pause(now) {
                self.session.handle_transport(event, now);
            }
        }

        let has_capture = !self.session.track().is_empty();
        if !has_capture {
            return;
        }
        if self.session.finish().is_err() {
            return;
        }
        match self.session.replay_engine() {
            Ok(engine) => self.install_replay(engine),
            Err(e) => log::warn!("Preview unavailable: {}", e),
        }
    }

    /// Leaving the preview tab pauses the replay.
    fn leave_preview(&mut self, now: Instant) {
        if let Some(preview) = &mut self.preview {
            if let Some(event) = preview.player.pause(now) {
                if let Some(engine) = &mut preview.engine {
                    engine.handle_transport(event, now);
                }
            }
        }
    }

    fn generate_ui(&self, ui: &mut egui::Ui) -> GenerateInput {
        let mut input = GenerateInput::default();
        let Some(editor) = &self.editor else {
            preview::placeholder(ui, "No video loaded", "File → Open Media...");
            return input;
        };

        ui.horizontal_top(|ui| {
            ui.vertical(|ui| {
                ui.set_width(self.config.display_width as f32);
                input.canvas = Some(canvas::show(
                    ui,
                    &editor.texture,
                    self.config.display_size(),
                    self.session.crop().current(),
                ));

                let view = TransportView {
                    playing: editor.player.is_playing(),
                    position: editor.player.position(),
                    duration: editor.player.duration(),
                    volume: self.session.volume(),
                    playback_rate: self.session.playback_rate(),
                    aspect_ratio: self.session.aspect_ratio(),
                };
                input.controls = controls::show(ui, &view);
            });

            ui.separator();

            ui.vertical(|ui| {
                ui.label("Preview");
                if self.session.cropper_active() {
                    let max = ui.available_size();
                    self.live_canvas.show(
                        ui,
                        editor.texture.as_ref(),
                        editor.player.intrinsic_size(),
                        max,
                    );
                } else {
                    preview::placeholder(
                        ui,
                        "Preview not available",
                        "Please click on \"Start Cropper\" and then play video",
                    );
                }
            });
        });

        ui.separator();
        input.footer = controls::footer(
            ui,
            self.session.cropper_active(),
            !self.session.track().is_empty(),
        );
        input
    }

    fn apply_generate_input(&mut self, input: GenerateInput, now: Instant) {
        // Lays out a crop whose start was deferred; no-op once measured.
        self.session.set_container(self.config.display_size());

        // Crop input first so the next sampling tick sees it.
        match input.canvas {
            Some(CanvasAction::BeginDrag(point)) => {
                self.session.crop_mut().begin_drag(point);
            }
            Some(CanvasAction::Drag(point)) => {
                self.session.crop_mut().continue_drag(point);
            }
            Some(CanvasAction::EndDrag) => self.session.crop_mut().end_drag(),
            Some(CanvasAction::None) | None => {}
        }

        for action in input.controls {
            match action {
                ControlsAction::TogglePlay => {
                    let event = self.editor.as_mut().and_then(|e| e.player.toggle(now));
                    if let Some(event) = event {
                        self.editor_transport(event, now);
                    }
                }
                ControlsAction::Seek(time) => {
                    if let Some(editor) = &mut self.editor {
                        editor.player.seek(time, now);
                    }
                }
                ControlsAction::ToggleMute => self.session.toggle_mute(),
                ControlsAction::SetVolume(volume) => self.session.set_volume(volume),
                ControlsAction::SetPlaybackRate(rate) => self.session.set_playback_rate(rate),
                ControlsAction::SetAspectRatio(aspect) => {
                    self.session.set_aspect_ratio(aspect);
                }
            }
        }

        match input.footer {
            Some(FooterAction::StartCropper) => {
                if self.session.start_cropper(self.config.display_size(), now).is_none() {
                    log::warn!("Cropper waiting for the video container to be laid out");
                }
                self.live_canvas.clear();
            }
            Some(FooterAction::RemoveCropper) => {
                self.session.remove_cropper();
                self.live_canvas.clear();
            }
            Some(FooterAction::Export) => self.export_track(),
            Some(FooterAction::Close) => self.close_media(),
            None => {}
        }
    }

    fn preview_ui(&self, ui: &mut egui::Ui) -> Option<ControlsAction> {
        let Some(preview) = &self.preview else {
            preview::placeholder(ui, "Preview not available", "No video found");
            return None;
        };
        if preview.engine.is_none() {
            preview::placeholder(
                ui,
                "Preview not available",
                "Record a session or import a track, then play it here",
            );
            return None;
        }

        ui.vertical_centered(|ui| {
            let max = ui.available_size() - egui::vec2(0.0, 60.0);
            preview.canvas.show(
                ui,
                preview.texture.as_ref(),
                preview.player.intrinsic_size(),
                max,
            );
        });
        let action = controls::transport_row(
            ui,
            preview.player.is_playing(),
            preview.player.position(),
            preview.player.duration(),
        );
        timeline::time_display(ui, preview.player.position(), preview.player.duration());
        action
    }

    fn apply_preview_input(&mut self, action: Option<ControlsAction>, now: Instant) {
        let Some(preview) = &mut self.preview else {
            return;
        };
        match action {
            Some(ControlsAction::TogglePlay) => {
                if let Some(event) = preview.player.toggle(now) {
                    if let Some(engine) = &mut preview.engine {
                        engine.handle_transport(event, now);
                    }
                }
            }
            Some(ControlsAction::Seek(time)) => preview.player.seek(time, now),
            _ => {}
        }
    }

    /// Advance both players and poll the capture and replay loops.
    fn advance(&mut self, ctx: &egui::Context, now: Instant) {
        let mut editor_event = None;
        if let Some(editor) = &mut self.editor {
            self.session.apply_transport(&mut editor.player);
            editor_event = editor.player.advance(now);

            self.session.tick(now, &editor.player);

            if let Some(crop) = self.session.crop().current() {
                self.live_canvas.resize(crop.size());
            }
            if let Some(canvas) = self.live_canvas.pixel_size() {
                if let Some(region) = self.session.live_preview_region(&editor.player, canvas) {
                    self.live_canvas.draw_region(region);
                }
            }

            match editor.player.take_frame() {
                Ok(Some(frame)) => canvas::upload_frame(ctx, &mut editor.texture, "editor_frame", &frame),
                Ok(None) => {}
                Err(e) => log::error!("Failed to decode frame: {}", e),
            }
        }
        if let Some(event) = editor_event {
            self.editor_transport(event, now);
        }

        if let Some(preview) = &mut self.preview {
            let event = preview.player.advance(now);
            if let Some(engine) = &mut preview.engine {
                if let Some(event) = event {
                    engine.handle_transport(event, now);
                }
                if let Some(FrameOutcome::Indeterminate(e)) =
                    engine.tick(now, Some(&mut preview.canvas), Some(&mut preview.player))
                {
                    log::debug!("Replay waiting for geometry: {}", e);
                }
            }

            match preview.player.take_frame() {
                Ok(Some(frame)) => canvas::upload_frame(ctx, &mut preview.texture, "preview_frame", &frame),
                Ok(None) => {}
                Err(e) => log::error!("Failed to decode preview frame: {}", e),
            }
        }
    }

    /// Keep frames coming while anything plays or a loop is scheduled.
    fn schedule_repaint(&self, ctx: &egui::Context, now: Instant) {
        let playing = self.editor.as_ref().map_or(false, |e| e.player.is_playing())
            || self.preview.as_ref().map_or(false, |p| p.player.is_playing());

        let replay_wait = self
            .preview
            .as_ref()
            .and_then(|p| p.engine.as_ref())
            .and_then(|e| e.time_until_next(now));
        let wait: Option<Duration> = [self.session.time_until_next(now), replay_wait]
            .into_iter()
            .flatten()
            .min();

        match (wait, playing) {
            (Some(wait), _) => ctx.request_repaint_after(wait.min(self.config.tick_interval())),
            (None, true) => ctx.request_repaint_after(self.config.tick_interval()),
            (None, false) => {}
        }
    }

    fn toggle_active_player(&mut self, now: Instant) {
        match self.current_tab {
            Tab::Generate => self.apply_generate_input(
                GenerateInput {
                    controls: vec![ControlsAction::TogglePlay],
                    ..GenerateInput::default()
                },
                now,
            ),
            Tab::Preview => self.apply_preview_input(Some(ControlsAction::TogglePlay), now),
        }
    }
}

impl eframe::App for ReelCropApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed media loading
        if let Some(ref receiver) = self.media_loader {
            if let Ok(result) = receiver.try_recv() {
                self.media_loader = None;
                self.loading_message = None;

                match result {
                    Ok(loaded) => self.install_media(loaded),
                    Err(e) => {
                        log::error!("{:#}", e);
                        self.status = Some(format!("{:#}", e));
                    }
                }
            }
        }

        // Request repaint if still loading (to update spinner)
        if self.loading_message.is_some() {
            ctx.request_repaint();
        }

        let now = Instant::now();

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Media...").clicked() {
                        let extensions: Vec<&str> = media::IMAGE_EXTENSIONS
                            .iter()
                            .chain(media::VIDEO_EXTENSIONS)
                            .copied()
                            .collect();
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Media", &extensions[..])
                            .pick_file()
                        {
                            self.open_media(path);
                        }
                        ui.close_menu();
                    }
                    if ui.button("Import Track...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Tracks", &["json", "yaml", "yml"])
                            .pick_file()
                        {
                            self.import_track(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Export Track...").clicked() {
                        self.export_track();
                        ui.close_menu();
                    }
                    if ui.button("Copy Track JSON").clicked() {
                        self.copy_track_json(ctx);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Close Media").clicked() {
                        self.close_media();
                        ui.close_menu();
                    }
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Toolbar
        let previous_tab = self.current_tab;
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            toolbar::show(ui, &mut self.current_tab);
        });
        if self.current_tab != previous_tab {
            match self.current_tab {
                Tab::Preview => self.prepare_preview(now),
                Tab::Generate => self.leave_preview(now),
            }
        }

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match &self.media_path {
                    Some(path) => ui.label(path.display().to_string()),
                    None => ui.label("No file loaded"),
                };
                ui.separator();
                ui.label(format!("Keyframes: {}", self.session.track().len()));
                if self.session.is_recording() {
                    ui.separator();
                    ui.label(egui::RichText::new("● Recording").color(egui::Color32::LIGHT_RED));
                }
                if let Some(status) = &self.status {
                    ui.separator();
                    ui.label(status);
                }
            });
        });

        // Space toggles playback unless a text field has focus
        if !ctx.wants_keyboard_input() && ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            self.toggle_active_player(now);
        }

        // Main area (center)
        let mut generate_input = None;
        let mut preview_action = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(ref message) = self.loading_message {
                ui.centered_and_justified(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(20.0);
                        ui.spinner();
                        ui.add_space(10.0);
                        ui.label(
                            egui::RichText::new(message)
                                .size(16.0)
                                .color(egui::Color32::from_gray(200)),
                        );
                    });
                });
                return;
            }

            match self.current_tab {
                Tab::Generate => generate_input = Some(self.generate_ui(ui)),
                Tab::Preview => preview_action = self.preview_ui(ui),
            }
        });

        if let Some(input) = generate_input {
            self.apply_generate_input(input, now);
        }
        self.apply_preview_input(preview_action, now);

        self.advance(ctx, now);
        self.schedule_repaint(ctx, now);
    }
}
