//! warpgrid - Generative Grid Art
//!
//! This application animates a regular grid of shapes through a catalogue
//! of time-varying distortions and colors it with selectable palettes.
//!
//! ## Keys
//! - Space: next distortion
//! - C: next color scheme
//! - A: toggle color animation
//! - + / -: distortion strength
//! - R: new random parameters
//! - S: save the frame as PNG
//! - H: hide or show the settings panel

use std::path::Path;

use eframe::egui;

mod render;
mod settings;

use render::GridCanvas;
use settings::AppSettings;
use warpgrid::animation::AnimationDriver;
use warpgrid::colors::{grid_colors, ColorScheme, Rgb};
use warpgrid::config::{ConfigError, SceneConfig};
use warpgrid::distortions::DistortionKind;
use warpgrid::export::{export_file_name, render_frame, save_png, ExportError};
use warpgrid::shapes::ShapeKind;

/// Longest frame delta fed to the clock, so a stalled window doesn't jump
const MAX_FRAME_DELTA: f32 = 0.1;
const STRENGTH_STEP: f32 = 0.1;

fn main() -> eframe::Result<()> {
    env_logger::init();
    log::info!("Starting warpgrid");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_title("warpgrid"),
        ..Default::default()
    };

    eframe::run_native(
        "warpgrid",
        options,
        Box::new(|cc| Ok(Box::new(WarpApp::new(cc)?))),
    )
}

/// Main application state
pub struct WarpApp {
    driver: AnimationDriver,
    canvas: GridCanvas,
    show_settings: bool,

    // Look
    color_scheme: ColorScheme,
    shape: ShapeKind,
    color_animation: bool,
    base_color: Rgb,

    // Playback
    animation_speed: f32,
    follow_window: bool,

    // Pending grid edits from the sliders
    dimension: usize,
    cell_size: f32,

    status: String,
}

impl WarpApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Result<Self, ConfigError> {
        let settings = AppSettings::load();
        let grid = match settings.scene.build_grid() {
            Ok(grid) => grid,
            Err(e) => {
                log::warn!("Saved scene is unusable ({}), using the default scene", e);
                SceneConfig::default().build_grid()?
            }
        };
        let driver = AnimationDriver::new(
            grid,
            settings.scene.distortion_type,
            settings.scene.distortion_strength,
        );

        let mut app = Self {
            dimension: driver.grid().dimension(),
            cell_size: driver.grid().cell_size(),
            driver,
            canvas: GridCanvas::new(),
            show_settings: true,
            color_scheme: ColorScheme::default(),
            shape: ShapeKind::default(),
            color_animation: false,
            base_color: [255, 255, 255],
            animation_speed: 1.2,
            follow_window: true,
            status: String::new(),
        };
        settings.apply(&mut app);
        Ok(app)
    }

    /// The current scene, with the grid's actual seed
    pub fn scene(&self) -> SceneConfig {
        SceneConfig::from_grid(self.driver.grid(), self.driver.kind(), self.driver.strength())
    }

    fn colors(&self) -> Vec<Rgb> {
        grid_colors(
            self.driver.grid(),
            self.color_scheme,
            self.base_color,
            self.driver.current_time(),
            self.color_animation,
        )
    }

    fn set_status(&mut self, status: String) {
        log::info!("{}", status);
        self.status = status;
    }

    fn resize_grid(&mut self) {
        if let Err(e) = self.driver.resize(self.dimension, self.cell_size) {
            log::warn!("Cannot resize grid: {}", e);
            self.dimension = self.driver.grid().dimension();
            self.cell_size = self.driver.grid().cell_size();
        }
    }

    fn nudge_strength(&mut self, delta: f32) {
        let strength = (self.driver.strength() + delta).clamp(0.0, 1.0);
        self.driver.set_strength(strength);
    }

    fn save_frame(&self) -> Result<String, ExportError> {
        let (w, h) = self.driver.grid().canvas_size();
        let image = render_frame(
            self.driver.placements(),
            &self.colors(),
            self.shape,
            self.driver.grid().cell_size() * self.canvas.settings.shape_scale,
            (w.round() as u32, h.round() as u32),
            [
                self.canvas.settings.background.r(),
                self.canvas.settings.background.g(),
                self.canvas.settings.background.b(),
            ],
        )?;
        let name = export_file_name(self.driver.kind(), self.driver.current_time());
        save_png(Path::new(&name), &image)?;
        Ok(name)
    }

    fn scene_dialog() -> rfd::FileDialog {
        rfd::FileDialog::new()
            .set_directory(settings::config_dir())
            .add_filter("Scene", &["json"])
    }

    fn save_scene(&mut self) {
        let Some(path) = Self::scene_dialog().set_file_name("scene.json").save_file() else {
            return;
        };
        match self.scene().save(&path) {
            Ok(()) => self.set_status(format!("Saved scene to {}", path.display())),
            Err(e) => self.set_status(format!("Scene not saved: {}", e)),
        }
    }

    fn load_scene(&mut self) {
        let Some(path) = Self::scene_dialog().pick_file() else {
            return;
        };
        let loaded = SceneConfig::load(&path).and_then(|scene| Ok((scene.build_grid()?, scene)));
        match loaded {
            Ok((grid, scene)) => {
                self.driver = AnimationDriver::new(grid, scene.distortion_type, scene.distortion_strength);
                self.dimension = scene.dimension;
                self.cell_size = scene.cell_size;
                self.follow_window = false;
                self.set_status(format!("Loaded scene from {}", path.display()));
            }
            Err(e) => self.set_status(format!("Scene not loaded: {}", e)),
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        let (next_kind, next_scheme, toggle_colors, stronger, weaker, regenerate, save, hide) =
            ctx.input(|i| {
                (
                    i.key_pressed(egui::Key::Space),
                    i.key_pressed(egui::Key::C),
                    i.key_pressed(egui::Key::A),
                    i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals),
                    i.key_pressed(egui::Key::Minus),
                    i.key_pressed(egui::Key::R),
                    i.key_pressed(egui::Key::S),
                    i.key_pressed(egui::Key::H),
                )
            });

        if next_kind {
            self.driver.set_kind(self.driver.kind().next());
        }
        if next_scheme {
            self.color_scheme = self.color_scheme.next();
        }
        if toggle_colors {
            self.color_animation = !self.color_animation;
        }
        if stronger {
            self.nudge_strength(STRENGTH_STEP);
        }
        if weaker {
            self.nudge_strength(-STRENGTH_STEP);
        }
        if regenerate {
            self.driver.regenerate(None);
        }
        if save {
            match self.save_frame() {
                Ok(name) => self.set_status(format!("Saved {}", name)),
                Err(e) => self.set_status(format!("Export failed: {}", e)),
            }
        }
        if hide {
            self.show_settings = !self.show_settings;
        }
    }

    fn settings_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Distortion");
        ui.separator();

        let mut kind = self.driver.kind();
        egui::ComboBox::from_label("Type")
            .selected_text(kind.label())
            .show_ui(ui, |ui| {
                for k in DistortionKind::all() {
                    ui.selectable_value(&mut kind, *k, k.label());
                }
            });
        self.driver.set_kind(kind);

        let mut strength = self.driver.strength();
        if ui.add(egui::Slider::new(&mut strength, 0.0..=1.0).text("Strength")).changed() {
            self.driver.set_strength(strength);
        }
        ui.add(egui::Slider::new(&mut self.animation_speed, 0.0..=5.0).text("Speed"));

        ui.separator();
        ui.heading("Grid");

        let dimension = ui.add(egui::Slider::new(&mut self.dimension, 2..=128).text("Dimension"));
        let cell_size = ui.add(egui::Slider::new(&mut self.cell_size, 2.0..=40.0).text("Cell size"));
        if dimension.changed() || cell_size.changed() {
            self.resize_grid();
        }
        ui.checkbox(&mut self.follow_window, "Fit canvas to window");
        ui.checkbox(&mut self.canvas.settings.show_border, "Show canvas border");

        ui.horizontal(|ui| {
            ui.label(format!("Seed: {}", self.driver.grid().seed()));
            if ui.button("Regenerate").clicked() {
                self.driver.regenerate(None);
            }
        });

        ui.separator();
        ui.heading("Look");

        egui::ComboBox::from_label("Shape")
            .selected_text(self.shape.name())
            .show_ui(ui, |ui| {
                for shape in ShapeKind::all() {
                    ui.selectable_value(&mut self.shape, *shape, shape.name());
                }
            });
        egui::ComboBox::from_label("Colors")
            .selected_text(self.color_scheme.name())
            .show_ui(ui, |ui| {
                for scheme in ColorScheme::all() {
                    ui.selectable_value(&mut self.color_scheme, *scheme, scheme.name());
                }
            });
        ui.checkbox(&mut self.color_animation, "Animate colors");
        ui.add(egui::Slider::new(&mut self.canvas.settings.shape_scale, 0.2..=1.5).text("Shape size"));

        ui.horizontal(|ui| {
            ui.label("Base");
            ui.color_edit_button_srgb(&mut self.base_color);
            ui.label("Background");
            ui.color_edit_button_srgba(&mut self.canvas.settings.background);
        });

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Save PNG").clicked() {
                match self.save_frame() {
                    Ok(name) => self.set_status(format!("Saved {}", name)),
                    Err(e) => self.set_status(format!("Export failed: {}", e)),
                }
            }
            if ui.button("Save scene").clicked() {
                self.save_scene();
            }
            if ui.button("Load scene").clicked() {
                self.load_scene();
            }
        });
    }
}

impl eframe::App for WarpApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.request_repaint();

        self.handle_keys(ctx);

        // Top panel
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("warpgrid");
                ui.separator();
                ui.toggle_value(&mut self.show_settings, "⚙ Settings");
                ui.separator();
                ui.label(format!(
                    "{}  ·  strength {:.1}  ·  t = {:.1}s",
                    self.driver.kind().label(),
                    self.driver.strength(),
                    self.driver.current_time()
                ));
                ui.separator();
                ui.label(&self.status);
            });
        });

        // Settings panel
        if self.show_settings {
            egui::SidePanel::left("settings_panel")
                .min_width(240.0)
                .show(ctx, |ui| self.settings_panel(ui));
        }

        let dt = ctx.input(|i| i.stable_dt).min(MAX_FRAME_DELTA);

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                if self.follow_window {
                    let size = ui.available_size();
                    let target = (size.x.round().max(1.0), size.y.round().max(1.0));
                    if target != self.driver.grid().canvas_size() {
                        if let Err(e) = self.driver.set_canvas_size(target) {
                            log::warn!("Cannot follow window size: {}", e);
                        }
                    }
                }

                self.driver.update(dt * self.animation_speed);
                let colors = self.colors();
                let grid = self.driver.grid();
                self.canvas.show(
                    ui,
                    self.driver.placements(),
                    &colors,
                    self.shape,
                    grid.cell_size(),
                    grid.canvas_size(),
                );
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        AppSettings::from_app(self).save();
    }
}
