//! Grid canvas widget
//!
//! Paints one frame of the distorted grid into an egui rect.
//!
//! ## How it works
//!
//! - The scene canvas is scaled uniformly to fit the widget and centred
//! - Each cell's outline is filled as a triangle fan around its center
//! - Shapes with a hole are filled as a band between the two contours
//! - All cells go into a single mesh, so a frame is one paint call
//!
//! ## Coordinate System
//!
//! Scene positions are canvas pixels with Y growing downwards, the same
//! orientation as the screen, so no flip is needed.

use eframe::egui::{self, Color32, Mesh, Pos2, Rect, Vec2};

use warpgrid::colors::Rgb;
use warpgrid::distortions::Placement;
use warpgrid::shapes::{outline, Outline, ShapeKind};

/// Display settings for the canvas
#[derive(Clone)]
pub struct CanvasSettings {
    pub background: Color32,

    /// Shape width relative to the cell size
    pub shape_scale: f32,

    /// Whether to outline the scene area
    pub show_border: bool,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            background: Color32::from_rgb(10, 10, 20),
            shape_scale: 0.8,
            show_border: false,
        }
    }
}

/// Uniform scale and offset mapping scene pixels into `rect`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fit {
    pub scale: f32,
    pub offset: Vec2,
}

impl Fit {
    pub fn new(canvas_size: (f32, f32), rect: Rect) -> Self {
        let (w, h) = canvas_size;
        let scale = if w > 0.0 && h > 0.0 {
            (rect.width() / w).min(rect.height() / h)
        } else {
            1.0
        };
        let used = Vec2::new(w * scale, h * scale);
        let offset = rect.min.to_vec2() + (rect.size() - used) / 2.0;
        Self { scale, offset }
    }

    pub fn to_screen(&self, p: (f32, f32)) -> Pos2 {
        Pos2::new(p.0 * self.scale, p.1 * self.scale) + self.offset
    }
}

/// Grid canvas widget
pub struct GridCanvas {
    pub settings: CanvasSettings,
}

impl Default for GridCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl GridCanvas {
    pub fn new() -> Self {
        Self {
            settings: CanvasSettings::default(),
        }
    }

    /// Draw the grid into all available space
    ///
    /// `colors` is index-aligned with `placements`.
    pub fn show(
        &self,
        ui: &mut egui::Ui,
        placements: &[Placement],
        colors: &[Rgb],
        shape: ShapeKind,
        cell_size: f32,
        canvas_size: (f32, f32),
    ) -> egui::Response {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::hover());
        let rect = response.rect;

        painter.rect_filled(rect, 0.0, self.settings.background);

        let fit = Fit::new(canvas_size, rect);
        let size = cell_size * self.settings.shape_scale;

        let mut mesh = Mesh::default();
        for (placement, color) in placements.iter().zip(colors) {
            if !placement.is_finite() {
                continue;
            }
            let color = Color32::from_rgb(color[0], color[1], color[2]);
            let placed = outline(shape, (placement.x, placement.y), size, placement.rotation);
            add_outline(&mut mesh, fit.to_screen((placement.x, placement.y)), &placed, &fit, color);
        }
        painter.add(egui::Shape::mesh(mesh));

        if self.settings.show_border {
            let scene = Rect::from_min_max(fit.to_screen((0.0, 0.0)), fit.to_screen(canvas_size));
            painter.rect_stroke(scene, 0.0, egui::Stroke::new(1.0, Color32::from_gray(60)));
        }

        response
    }
}

fn add_outline(mesh: &mut Mesh, center: Pos2, placed: &Outline, fit: &Fit, color: Color32) {
    if placed.has_hole() {
        add_band(mesh, &placed.boundary, &placed.hole, fit, color);
    } else {
        add_fan(mesh, center, &placed.boundary, fit, color);
    }
}

/// Quad strip between an outer contour and a hole with matching points
fn add_band(mesh: &mut Mesh, outer: &[(f32, f32)], inner: &[(f32, f32)], fit: &Fit, color: Color32) {
    if outer.len() < 3 || outer.len() != inner.len() {
        return;
    }
    let base = mesh.vertices.len() as u32;
    for (&o, &i) in outer.iter().zip(inner) {
        mesh.colored_vertex(fit.to_screen(o), color);
        mesh.colored_vertex(fit.to_screen(i), color);
    }
    let n = outer.len() as u32;
    for k in 0..n {
        let next = (k + 1) % n;
        let (o0, i0) = (base + 2 * k, base + 2 * k + 1);
        let (o1, i1) = (base + 2 * next, base + 2 * next + 1);
        mesh.add_triangle(o0, o1, i1);
        mesh.add_triangle(o0, i1, i0);
    }
}

/// Triangle fan from `center` through every outline point
///
/// Every solid cell shape is star-shaped around its center, so the fan
/// covers it exactly, star points included.
fn add_fan(mesh: &mut Mesh, center: Pos2, points: &[(f32, f32)], fit: &Fit, color: Color32) {
    if points.len() < 3 {
        return;
    }
    let base = mesh.vertices.len() as u32;
    mesh.colored_vertex(center, color);
    for &p in points {
        mesh.colored_vertex(fit.to_screen(p), color);
    }
    let n = points.len() as u32;
    for i in 0..n {
        mesh.add_triangle(base, base + 1 + i, base + 1 + (i + 1) % n);
    }
}
