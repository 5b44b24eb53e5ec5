//! Main application: GeoTrackApp implements eframe::App.

use std::path::Path;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use egui_dock::{DockArea, DockState, Style, TabViewer};
use tracing::info;

use geotrack_core::config::SettingsStore;

use crate::dock::{create_dock_state, PanelId};
use crate::export::{render_view, save_image_dialog, DEFAULT_EXPORT_SIZE};
use crate::icons::ToolbarIcons;
use crate::io;
use crate::panels::attribute_table::show_attribute_table;
use crate::panels::controls::show_controls;
use crate::panels::file_select::show_file_select;
use crate::panels::map_canvas::{show_map_canvas, MapCanvasState};
use crate::panels::modals::{show_point_popup, show_progress};
use crate::panels::welcome::show_welcome;
use crate::state::{AppMessage, AppState, Command, Effect, Screen};
use crate::theme::{self, ThemeStyles};
use crate::toolbar::show_toolbar;

pub const MAIN_TITLE: &str = "GeoTrack Visualizer";
pub const MAIN_SIZE: [f32; 2] = [1200.0, 800.0];

/// Poll interval while a background task is outstanding.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct GeoTrackApp {
    state: AppState,

    /// Dock state for the map/table split.
    dock_state: DockState<PanelId>,

    /// Message channels for background thread communication.
    tx: Sender<AppMessage>,
    rx: Receiver<AppMessage>,

    /// Background tasks whose message has not arrived yet.
    pending: usize,

    settings: SettingsStore,
    icons: ToolbarIcons,
    map_canvas: MapCanvasState,
}

impl GeoTrackApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: SettingsStore, assets_dir: &Path) -> Self {
        theme::apply_global(&cc.egui_ctx, false);

        let (tx, rx) = crossbeam_channel::unbounded();
        info!("Settings file: {}", settings.config_path().display());

        Self {
            state: AppState::default(),
            dock_state: create_dock_state(),
            tx,
            rx,
            pending: 0,
            settings,
            icons: ToolbarIcons::load(&cc.egui_ctx, assets_dir),
            map_canvas: MapCanvasState::default(),
        }
    }

    /// Drain messages from background threads.
    fn process_messages(&mut self, ctx: &egui::Context) {
        while let Ok(msg) = self.rx.try_recv() {
            self.pending = self.pending.saturating_sub(1);
            let command = match msg {
                AppMessage::DirectoryResolved(dir) => Command::DirectoryResolved(dir),
                AppMessage::TiffPicked(generation, path) => {
                    Command::TiffPicked { generation, path }
                }
                AppMessage::GeojsonPicked(generation, path) => {
                    Command::GeojsonPicked { generation, path }
                }
                AppMessage::SceneLoaded(scene) => Command::SceneLoaded(scene),
                AppMessage::ImageSaved(path) => {
                    if path.is_none() {
                        info!("Map image was not saved");
                    }
                    continue;
                }
            };
            self.dispatch(ctx, command);
        }
    }

    fn dispatch(&mut self, ctx: &egui::Context, command: Command) {
        for effect in self.state.apply(command) {
            self.run_effect(ctx, effect);
        }
    }

    fn run_effect(&mut self, ctx: &egui::Context, effect: Effect) {
        match effect {
            Effect::ShowMainWindow => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Title(MAIN_TITLE.to_string()));
                ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(MAIN_SIZE.into()));
            }
            Effect::ResolveDirectory => {
                self.pending += 1;
                io::resolve_directory(self.settings.clone(), self.tx.clone());
            }
            Effect::PickTiff {
                directory,
                generation,
            } => {
                self.pending += 1;
                io::pick_tiff(directory, generation, self.tx.clone());
            }
            Effect::PickGeojson {
                directory,
                generation,
            } => {
                self.pending += 1;
                io::pick_geojson(directory, generation, self.tx.clone());
            }
            Effect::LoadScene { raster, points } => {
                self.pending += 1;
                self.dock_state = create_dock_state();
                io::load_scene(raster, points, self.tx.clone());
            }
            Effect::ApplyTheme { dark } => theme::apply_global(ctx, dark),
            Effect::InvalidateRaster => self.map_canvas.invalidate_texture(),
            Effect::SaveImage => {
                let Some(scene) = self.state.scene.as_ref() else {
                    return;
                };
                let size = self.map_canvas.plot_size.unwrap_or(DEFAULT_EXPORT_SIZE);
                let image = render_view(
                    scene,
                    &self.state.view.view,
                    self.state.map_style,
                    self.state.view.selected,
                    size,
                );
                self.pending += 1;
                save_image_dialog(image, self.state.default_dir.clone(), self.tx.clone());
            }
        }
    }

    fn show_main(&mut self, ctx: &egui::Context, styles: &ThemeStyles, commands: &mut Vec<Command>) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(4.0);
            commands.extend(show_controls(ui, &self.state, styles));
            if self.state.scene.is_some() {
                ui.separator();
                ui.add_enabled_ui(self.state.is_interactive(), |ui| {
                    let action = show_toolbar(ui, self.state.view.tool, &self.icons, styles);
                    commands.extend(action.map(Command::Toolbar));
                });
            }
            ui.add_space(4.0);
        });

        if self.state.scene.is_some() {
            let mut tab_viewer = GeoTrackTabViewer {
                state: &self.state,
                map_canvas: &mut self.map_canvas,
                commands: Vec::new(),
            };
            DockArea::new(&mut self.dock_state)
                .style(Style::from_egui(ctx.style().as_ref()))
                .show(ctx, &mut tab_viewer);
            commands.append(&mut tab_viewer.commands);
        } else {
            egui::CentralPanel::default().show(ctx, |_ui| {});
        }

        if let Some(selection) = &self.state.file_dialog {
            commands.extend(show_file_select(ctx, selection, styles));
        }
        if self.state.loading {
            show_progress(ctx);
        }
        if let Some(popup) = &self.state.popup {
            commands.extend(show_point_popup(ctx, popup));
        }
    }
}

/// Tab viewer that dispatches to the map and table panels.
struct GeoTrackTabViewer<'a> {
    state: &'a AppState,
    map_canvas: &'a mut MapCanvasState,
    commands: Vec<Command>,
}

impl<'a> TabViewer for GeoTrackTabViewer<'a> {
    type Tab = PanelId;

    fn title(&mut self, tab: &mut Self::Tab) -> egui::WidgetText {
        tab.to_string().into()
    }

    fn ui(&mut self, ui: &mut egui::Ui, tab: &mut Self::Tab) {
        match tab {
            PanelId::Map => {
                let commands = show_map_canvas(ui, self.state, self.map_canvas);
                self.commands.extend(commands);
            }
            PanelId::Attributes => {
                self.commands.extend(show_attribute_table(ui, self.state));
            }
        }
    }

    fn closeable(&mut self, _tab: &mut Self::Tab) -> bool {
        false
    }
}

impl eframe::App for GeoTrackApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_messages(ctx);

        if self.pending > 0 {
            ctx.request_repaint_after(POLL_INTERVAL);
        }

        let styles = ThemeStyles::for_mode(self.state.dark_mode);
        let mut commands = Vec::new();

        match self.state.screen {
            Screen::Welcome => {
                if show_welcome(ctx, &styles) {
                    commands.push(Command::StartApplication);
                }
            }
            Screen::Main => self.show_main(ctx, &styles, &mut commands),
        }

        for command in commands {
            self.dispatch(ctx, command);
        }
    }
}
