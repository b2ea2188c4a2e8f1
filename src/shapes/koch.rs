//! Koch snowflake
//!
//! Every edge of an equilateral triangle is replaced, `depth` times over,
//! by four edges a third as long with an outward bump in the middle.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, TAU};

use super::traits::Shape;

/// Deepest subdivision accepted; each level multiplies the vertex count by 4
pub const MAX_KOCH_DEPTH: u32 = 6;

#[derive(Clone, Debug)]
pub struct KochSnowflake {
    vertices: Vec<(f32, f32)>,
}

impl KochSnowflake {
    /// Snowflake on a base triangle of circumradius `radius`, first corner up
    pub fn new(radius: f32, depth: u32) -> Self {
        let depth = depth.min(MAX_KOCH_DEPTH);
        let corners: Vec<(f32, f32)> = (0..3)
            .map(|i| {
                let angle = -FRAC_PI_2 + i as f32 * TAU / 3.0;
                (radius * angle.cos(), radius * angle.sin())
            })
            .collect();

        let mut vertices = Vec::with_capacity(3 * 4usize.pow(depth));
        for i in 0..3 {
            subdivide(corners[i], corners[(i + 1) % 3], depth, &mut vertices);
        }
        Self { vertices }
    }

    pub fn vertices(&self) -> &[(f32, f32)] {
        &self.vertices
    }
}

/// Push the Koch curve from `a` towards `b`, excluding `b` itself
fn subdivide(a: (f32, f32), b: (f32, f32), depth: u32, out: &mut Vec<(f32, f32)>) {
    if depth == 0 {
        out.push(a);
        return;
    }
    let (dx, dy) = ((b.0 - a.0) / 3.0, (b.1 - a.1) / 3.0);
    let p = (a.0 + dx, a.1 + dy);
    let q = (a.0 + 2.0 * dx, a.1 + 2.0 * dy);
    // Middle third turned 60° towards the outside of a clockwise outline
    let (sin, cos) = (-FRAC_PI_3).sin_cos();
    let peak = (p.0 + dx * cos - dy * sin, p.1 + dx * sin + dy * cos);

    subdivide(a, p, depth - 1, out);
    subdivide(p, peak, depth - 1, out);
    subdivide(peak, q, depth - 1, out);
    subdivide(q, b, depth - 1, out);
}

impl Shape for KochSnowflake {
    fn sample(&self, t: f32) -> (f32, f32) {
        let n = self.vertices.len();
        let pos = t.rem_euclid(1.0) * n as f32;
        let i = (pos as usize).min(n - 1);
        let local_t = pos - i as f32;
        let (x1, y1) = self.vertices[i];
        let (x2, y2) = self.vertices[(i + 1) % n];
        (x1 + local_t * (x2 - x1), y1 + local_t * (y2 - y1))
    }

    fn name(&self) -> &str {
        "Koch Snowflake"
    }

    fn resolution(&self) -> usize {
        self.vertices.len()
    }

    fn points(&self) -> Vec<(f32, f32)> {
        self.vertices.clone()
    }
}
