//! PNG export - rasterize one frame of the grid
//!
//! Every cell outline becomes a closed path filled anti-aliased onto a
//! `tiny_skia::Pixmap`, which is then copied into an `image::RgbImage`.
//! Holes are separate contours of the same path, cut out by the even-odd
//! fill rule.

use std::path::Path;

use image::{ImageFormat, Rgb as Pixel, RgbImage};
use thiserror::Error;
use tiny_skia::{Color, FillRule, Paint, Path as SkPath, PathBuilder, Pixmap, Transform};

use crate::colors::Rgb;
use crate::distortions::{DistortionKind, Placement};
use crate::shapes::{outline, Outline, ShapeKind};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Canvas has no pixels")]
    EmptyCanvas,
}

fn add_contour(pb: &mut PathBuilder, contour: &[(f32, f32)]) {
    let Some((&(x0, y0), rest)) = contour.split_first() else {
        return;
    };
    if rest.len() < 2 {
        return;
    }
    pb.move_to(x0, y0);
    for &(x, y) in rest {
        pb.line_to(x, y);
    }
    pb.close();
}

/// Closed path of a placed shape, or `None` when it is degenerate
fn outline_path(outline: &Outline) -> Option<SkPath> {
    if outline.boundary.len() < 3 {
        return None;
    }
    let mut pb = PathBuilder::new();
    add_contour(&mut pb, &outline.boundary);
    add_contour(&mut pb, &outline.hole);
    // Non-finite points leave no valid bounds
    pb.finish()
}

fn to_rgb_image(pixmap: &Pixmap) -> RgbImage {
    let mut image = RgbImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Pixel([c.red(), c.green(), c.blue()]);
    }
    image
}

/// Draw every placement as `shape`, later cells over earlier ones
///
/// `colors` is index-aligned with `placements`; cells without a color are
/// skipped.
pub fn render_frame(
    placements: &[Placement],
    colors: &[Rgb],
    shape: ShapeKind,
    shape_size: f32,
    canvas_size: (u32, u32),
    background: Rgb,
) -> Result<RgbImage, ExportError> {
    let (width, height) = canvas_size;
    if width == 0 || height == 0 {
        return Err(ExportError::EmptyCanvas);
    }

    let mut pixmap = Pixmap::new(width, height).ok_or(ExportError::EmptyCanvas)?;
    pixmap.fill(Color::from_rgba8(background[0], background[1], background[2], 255));

    let mut paint = Paint::default();
    paint.anti_alias = true;
    for (placement, &color) in placements.iter().zip(colors) {
        let placed = outline(shape, (placement.x, placement.y), shape_size, placement.rotation);
        let Some(path) = outline_path(&placed) else {
            continue;
        };
        paint.set_color_rgba8(color[0], color[1], color[2], 255);
        pixmap.fill_path(&path, &paint, FillRule::EvenOdd, Transform::identity(), None);
    }
    Ok(to_rgb_image(&pixmap))
}

pub fn save_png(path: &Path, image: &RgbImage) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    image.save_with_format(path, ImageFormat::Png)?;
    log::info!("Saved {}x{} frame to {}", image.width(), image.height(), path.display());
    Ok(())
}

/// File name for a saved frame, e.g. `warpgrid_swirl_1234.png`
pub fn export_file_name(kind: DistortionKind, time: f32) -> String {
    format!("warpgrid_{}_{}.png", kind.name(), (time.max(0.0) * 100.0) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(boundary: Vec<(f32, f32)>) -> Outline {
        Outline {
            boundary,
            hole: Vec::new(),
        }
    }

    #[test]
    fn test_outline_path_rejects_degenerate() {
        assert!(outline_path(&solid(vec![])).is_none());
        assert!(outline_path(&solid(vec![(0.0, 0.0), (1.0, 1.0)])).is_none());
        assert!(outline_path(&solid(vec![(0.0, 0.0), (f32::NAN, 1.0), (2.0, 0.0)])).is_none());
        assert!(outline_path(&solid(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)])).is_some());
    }

    #[test]
    fn test_ring_leaves_its_hole_empty() {
        let image = render_frame(&[Placement::new(20.0, 20.0, 0.0)], &[[0, 255, 0]], ShapeKind::Ring, 30.0, (40, 40), [0, 0, 0]).unwrap();
        // Band spans radius 9 to 15
        assert_eq!(image.get_pixel(20, 20).0, [0, 0, 0]);
        assert_eq!(image.get_pixel(32, 20).0, [0, 255, 0]);
        assert_eq!(image.get_pixel(38, 20).0, [0, 0, 0]);
    }

    #[test]
    fn test_render_antialiases_edges() {
        // Square spanning 3.5..6.5 covers the edge pixels by half
        let image = render_frame(&[Placement::new(5.0, 5.0, 0.0)], &[[255, 255, 255]], ShapeKind::Square, 3.0, (10, 10), [0, 0, 0]).unwrap();
        assert_eq!(image.get_pixel(5, 5).0, [255, 255, 255]);
        let edge = image.get_pixel(3, 5).0[0];
        assert!(edge > 60 && edge < 200, "edge pixel {}", edge);
        assert_eq!(image.get_pixel(1, 5).0, [0, 0, 0]);
    }

    #[test]
    fn test_render_fills_cells() {
        let placements = [Placement::new(10.0, 10.0, 0.0), Placement::new(30.0, 10.0, 45.0)];
        let colors = [[255, 0, 0], [0, 0, 255]];
        let image = render_frame(&placements, &colors, ShapeKind::Square, 8.0, (40, 20), [0, 0, 0]).unwrap();

        assert_eq!(image.get_pixel(10, 10).0, [255, 0, 0]);
        assert_eq!(image.get_pixel(30, 10).0, [0, 0, 255]);
        assert_eq!(image.get_pixel(20, 10).0, [0, 0, 0]);
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0]);
    }

    #[test]
    fn test_render_clips_to_canvas() {
        let placements = [Placement::new(-2.0, 5.0, 10.0), Placement::new(f32::NAN, 5.0, 0.0)];
        let colors = [[9, 9, 9], [1, 1, 1]];
        let image = render_frame(&placements, &colors, ShapeKind::Circle, 10.0, (10, 10), [0, 0, 0]).unwrap();
        assert_eq!(image.get_pixel(0, 5).0, [9, 9, 9]);
        assert_eq!(image.get_pixel(9, 5).0, [0, 0, 0]);
    }

    #[test]
    fn test_empty_canvas() {
        let err = render_frame(&[], &[], ShapeKind::Square, 5.0, (0, 10), [0, 0, 0]).unwrap_err();
        assert!(matches!(err, ExportError::EmptyCanvas));
    }

    #[test]
    fn test_save_png() {
        let dir = std::env::temp_dir().join(format!("warpgrid-export-{}", std::process::id()));
        let path = dir.join(export_file_name(DistortionKind::Swirl, 12.345));
        assert!(path.ends_with("warpgrid_swirl_1234.png"));

        let image = render_frame(&[Placement::new(4.0, 4.0, 0.0)], &[[200, 100, 50]], ShapeKind::Square, 6.0, (8, 8), [0, 0, 0]).unwrap();
        save_png(&path, &image).unwrap();
        let loaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(loaded.dimensions(), (8, 8));
        assert_eq!(loaded.get_pixel(4, 4).0, [200, 100, 50]);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
