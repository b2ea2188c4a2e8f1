//! Shape trait definition
//!
//! The `Shape` trait is the core abstraction for the outlines drawn at
//! every cell. Shapes live in a unit space centred on the origin and are
//! scaled, rotated and moved into place by [`outline`](super::outline).

/// A closed outline in unit space
///
/// Shapes are defined parametrically - the `sample` method takes a parameter
/// `t` in the range [0, 1) and returns the (x, y) coordinates at that point
/// along the outline.
///
/// ## Coordinate System
///
/// - (0, 0) is the cell center
/// - A size of 1.0 reaches the edge of the cell
/// - Y grows downwards, matching the canvas
pub trait Shape: Send + Sync {
    /// Sample the outline at parameter t in [0, 1)
    fn sample(&self, t: f32) -> (f32, f32);

    /// Get the name of this shape (for UI display)
    fn name(&self) -> &str;

    /// Number of samples that trace the outline well enough to fill
    fn resolution(&self) -> usize {
        32
    }

    /// Outline as a closed polygon, without repeating the first point
    ///
    /// The default samples `resolution()` evenly spaced points; shapes with
    /// straight edges return their corners instead.
    fn points(&self) -> Vec<(f32, f32)> {
        let n = self.resolution().max(3);
        (0..n).map(|i| self.sample(i as f32 / n as f32)).collect()
    }

    /// Inner contour cut out of the shape, empty for solid shapes
    fn hole(&self) -> Vec<(f32, f32)> {
        Vec::new()
    }
}

/// A boxed shape for dynamic dispatch
pub type BoxedShape = Box<dyn Shape>;
