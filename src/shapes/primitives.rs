//! Primitive shapes - Circle, Ellipse, Ring, Leaf, Rectangle, Polygon

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use super::traits::Shape;

/// Segments used to approximate a circle
const CIRCLE_SEGMENTS: usize = 24;

/// A circle centered at the origin
///
/// ## Parametric Equation
/// ```text
/// x = radius * cos(t * 2π)
/// y = radius * sin(t * 2π)
/// ```
#[derive(Clone, Debug)]
pub struct Circle {
    pub radius: f32,
}

impl Circle {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }
}

impl Shape for Circle {
    fn sample(&self, t: f32) -> (f32, f32) {
        let angle = t * TAU;
        (self.radius * angle.cos(), self.radius * angle.sin())
    }

    fn name(&self) -> &str {
        "Circle"
    }

    fn resolution(&self) -> usize {
        CIRCLE_SEGMENTS
    }
}

/// An ellipse centered at the origin, major axis along x
#[derive(Clone, Debug)]
pub struct Ellipse {
    pub radius_x: f32,
    pub radius_y: f32,
}

impl Ellipse {
    pub fn new(radius_x: f32, radius_y: f32) -> Self {
        Self { radius_x, radius_y }
    }
}

impl Shape for Ellipse {
    fn sample(&self, t: f32) -> (f32, f32) {
        let angle = t * TAU;
        (self.radius_x * angle.cos(), self.radius_y * angle.sin())
    }

    fn name(&self) -> &str {
        "Ellipse"
    }

    fn resolution(&self) -> usize {
        CIRCLE_SEGMENTS
    }
}

/// A circular band between two radii
///
/// The outline is the outer circle; the inner circle is its hole, sampled
/// at the same angles so the two contours pair up point for point.
#[derive(Clone, Debug)]
pub struct Ring {
    pub outer_radius: f32,
    pub inner_radius: f32,
}

impl Ring {
    pub fn new(outer_radius: f32, inner_radius: f32) -> Self {
        Self {
            outer_radius,
            inner_radius: inner_radius.clamp(0.0, outer_radius),
        }
    }
}

impl Shape for Ring {
    fn sample(&self, t: f32) -> (f32, f32) {
        let angle = t * TAU;
        (self.outer_radius * angle.cos(), self.outer_radius * angle.sin())
    }

    fn name(&self) -> &str {
        "Ring"
    }

    fn resolution(&self) -> usize {
        CIRCLE_SEGMENTS
    }

    fn hole(&self) -> Vec<(f32, f32)> {
        let n = self.resolution();
        (0..n)
            .map(|i| {
                let angle = i as f32 / n as f32 * TAU;
                (self.inner_radius * angle.cos(), self.inner_radius * angle.sin())
            })
            .collect()
    }
}

/// Vesica leaf: the overlap of two discs of `radius` whose centers sit
/// `offset` to either side of the origin
///
/// The tips point up and down and lie on the y axis.
#[derive(Clone, Debug)]
pub struct Leaf {
    pub radius: f32,
    pub offset: f32,
}

impl Leaf {
    pub fn new(radius: f32, offset: f32) -> Self {
        Self {
            radius,
            offset: offset.clamp(0.0, radius),
        }
    }

    /// Half the angle each arc spans about its own disc center
    fn half_arc(&self) -> f32 {
        if self.radius > 0.0 {
            (self.offset / self.radius).acos()
        } else {
            0.0
        }
    }
}

impl Shape for Leaf {
    fn sample(&self, t: f32) -> (f32, f32) {
        let alpha = self.half_arc();
        let t = t.rem_euclid(1.0);
        if t < 0.5 {
            // Right edge, an arc of the left disc
            let angle = -alpha + t * 2.0 * 2.0 * alpha;
            (-self.offset + self.radius * angle.cos(), self.radius * angle.sin())
        } else {
            // Left edge, an arc of the right disc
            let angle = PI - alpha + (t - 0.5) * 2.0 * 2.0 * alpha;
            (self.offset + self.radius * angle.cos(), self.radius * angle.sin())
        }
    }

    fn name(&self) -> &str {
        "Leaf"
    }
}

/// An axis-aligned rectangle centered at the origin
///
/// Traced from the top-left corner, clockwise on screen.
#[derive(Clone, Debug)]
pub struct Rectangle {
    pub half_width: f32,
    pub half_height: f32,
}

impl Rectangle {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            half_width: width / 2.0,
            half_height: height / 2.0,
        }
    }

    pub fn square(size: f32) -> Self {
        Self::new(size, size)
    }

    fn corners(&self) -> [(f32, f32); 4] {
        [
            (-self.half_width, -self.half_height),
            (self.half_width, -self.half_height),
            (self.half_width, self.half_height),
            (-self.half_width, self.half_height),
        ]
    }
}

impl Shape for Rectangle {
    fn sample(&self, t: f32) -> (f32, f32) {
        let corners = self.corners();

        // One quarter of t per edge
        let segment = ((t * 4.0) as usize).min(3);
        let local_t = (t * 4.0).fract();

        let (x1, y1) = corners[segment];
        let (x2, y2) = corners[(segment + 1) % 4];
        (x1 + local_t * (x2 - x1), y1 + local_t * (y2 - y1))
    }

    fn name(&self) -> &str {
        "Rectangle"
    }

    fn points(&self) -> Vec<(f32, f32)> {
        self.corners().to_vec()
    }
}

/// A closed polygon through a list of vertices
#[derive(Clone, Debug)]
pub struct Polygon {
    vertices: Vec<(f32, f32)>,
    /// Cached edge lengths for uniform sampling
    edge_lengths: Vec<f32>,
    total_length: f32,
    name: &'static str,
}

impl Polygon {
    /// Polygon through `vertices`; fewer than three are padded with the origin
    pub fn new(mut vertices: Vec<(f32, f32)>, name: &'static str) -> Self {
        while vertices.len() < 3 {
            vertices.push((0.0, 0.0));
        }

        let n = vertices.len();
        let edge_lengths: Vec<f32> = (0..n)
            .map(|i| {
                let (x1, y1) = vertices[i];
                let (x2, y2) = vertices[(i + 1) % n];
                ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt()
            })
            .collect();
        let total_length = edge_lengths.iter().sum();

        Self {
            vertices,
            edge_lengths,
            total_length,
            name,
        }
    }

    /// Regular polygon with `n` sides and the first vertex pointing up
    pub fn regular(n: usize, radius: f32, name: &'static str) -> Self {
        let n = n.max(3);
        let vertices = (0..n)
            .map(|i| {
                let angle = -FRAC_PI_2 + (i as f32 / n as f32) * TAU;
                (radius * angle.cos(), radius * angle.sin())
            })
            .collect();
        Self::new(vertices, name)
    }

    pub fn triangle(radius: f32) -> Self {
        Self::regular(3, radius, "Triangle")
    }

    pub fn pentagon(radius: f32) -> Self {
        Self::regular(5, radius, "Pentagon")
    }

    pub fn hexagon(radius: f32) -> Self {
        Self::regular(6, radius, "Hexagon")
    }

    /// Square standing on a corner; corners sit at `half_size * √2`
    pub fn diamond(half_size: f32) -> Self {
        let r = half_size * std::f32::consts::SQRT_2;
        Self::new(vec![(0.0, -r), (r, 0.0), (0.0, r), (-r, 0.0)], "Diamond")
    }

    /// Star with `n` points alternating between the two radii
    pub fn star(n: usize, outer_radius: f32, inner_radius: f32) -> Self {
        let total_points = n.max(3) * 2;
        let vertices = (0..total_points)
            .map(|i| {
                let angle = -FRAC_PI_2 + (i as f32 / total_points as f32) * TAU;
                let radius = if i % 2 == 0 { outer_radius } else { inner_radius };
                (radius * angle.cos(), radius * angle.sin())
            })
            .collect();
        Self::new(vertices, "Star")
    }

    pub fn vertices(&self) -> &[(f32, f32)] {
        &self.vertices
    }
}

impl Shape for Polygon {
    fn sample(&self, t: f32) -> (f32, f32) {
        if self.total_length == 0.0 {
            return self.vertices[0];
        }

        let target_dist = t * self.total_length;
        let mut accumulated = 0.0;

        for (i, &edge_len) in self.edge_lengths.iter().enumerate() {
            if accumulated + edge_len >= target_dist || i == self.edge_lengths.len() - 1 {
                let local_t = if edge_len > 0.0 {
                    (target_dist - accumulated) / edge_len
                } else {
                    0.0
                };

                let (x1, y1) = self.vertices[i];
                let (x2, y2) = self.vertices[(i + 1) % self.vertices.len()];
                return (x1 + local_t * (x2 - x1), y1 + local_t * (y2 - y1));
            }
            accumulated += edge_len;
        }

        self.vertices[0]
    }

    fn name(&self) -> &str {
        self.name
    }

    fn resolution(&self) -> usize {
        self.vertices.len()
    }

    fn points(&self) -> Vec<(f32, f32)> {
        self.vertices.clone()
    }
}
