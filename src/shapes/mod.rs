//! Shapes module - the outline drawn at each cell
//!
//! This module provides:
//! - `Shape` trait for abstracting over different outlines
//! - Primitive shapes: Circle, Ellipse, Ring, Leaf, Rectangle, Polygon
//! - Koch snowflake
//! - `ShapeKind`, the closed set of shapes a scene can use
//! - `outline`, which places a shape on the canvas

mod koch;
mod primitives;
mod traits;

pub use koch::{KochSnowflake, MAX_KOCH_DEPTH};
pub use primitives::{Circle, Ellipse, Leaf, Polygon, Rectangle, Ring};
pub use traits::{BoxedShape, Shape};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Star inner radius relative to the outer one
const STAR_INNER_RATIO: f32 = 0.4;
const STAR_POINTS: usize = 5;
/// Ring hole radius relative to the outer one
const RING_INNER_RATIO: f32 = 0.6;
const ELLIPSE_ASPECT: f32 = 0.6;
/// Leaf disc centers, as a fraction of the disc radius
const LEAF_OFFSET: f32 = 0.55;
const KOCH_DEPTH: u32 = 3;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    #[default]
    Square,
    Circle,
    Triangle,
    Diamond,
    Pentagon,
    Hexagon,
    Star,
    Ellipse,
    Ring,
    Leaf,
    KochSnowflake,
}

impl ShapeKind {
    pub const ALL: &[ShapeKind] = &[
        Self::Square,
        Self::Circle,
        Self::Triangle,
        Self::Diamond,
        Self::Pentagon,
        Self::Hexagon,
        Self::Star,
        Self::Ellipse,
        Self::Ring,
        Self::Leaf,
        Self::KochSnowflake,
    ];

    pub fn all() -> &'static [ShapeKind] {
        Self::ALL
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Square => "Square",
            ShapeKind::Circle => "Circle",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Diamond => "Diamond",
            ShapeKind::Pentagon => "Pentagon",
            ShapeKind::Hexagon => "Hexagon",
            ShapeKind::Star => "Star",
            ShapeKind::Ellipse => "Ellipse",
            ShapeKind::Ring => "Ring",
            ShapeKind::Leaf => "Leaf",
            ShapeKind::KochSnowflake => "Koch Snowflake",
        }
    }

    pub fn next(&self) -> Self {
        let i = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Unit outline reaching 1.0 at the cell edge
    pub fn unit_shape(&self) -> BoxedShape {
        match self {
            ShapeKind::Square => Box::new(Rectangle::square(2.0)),
            ShapeKind::Circle => Box::new(Circle::new(1.0)),
            ShapeKind::Triangle => Box::new(Polygon::triangle(1.0)),
            ShapeKind::Diamond => Box::new(Polygon::diamond(1.0)),
            ShapeKind::Pentagon => Box::new(Polygon::pentagon(1.0)),
            ShapeKind::Hexagon => Box::new(Polygon::hexagon(1.0)),
            ShapeKind::Star => Box::new(Polygon::star(STAR_POINTS, 1.0, STAR_INNER_RATIO)),
            ShapeKind::Ellipse => Box::new(Ellipse::new(1.0, ELLIPSE_ASPECT)),
            ShapeKind::Ring => Box::new(Ring::new(1.0, RING_INNER_RATIO)),
            ShapeKind::Leaf => Box::new(Leaf::new(1.0, LEAF_OFFSET)),
            ShapeKind::KochSnowflake => Box::new(KochSnowflake::new(1.0, KOCH_DEPTH)),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A shape placed on the canvas
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outline {
    pub boundary: Vec<(f32, f32)>,
    /// Contour cut out of the boundary, empty for solid shapes
    pub hole: Vec<(f32, f32)>,
}

impl Outline {
    pub fn has_hole(&self) -> bool {
        !self.hole.is_empty()
    }
}

/// Place a shape on the canvas
///
/// `size` is the full width of the shape in pixels, `rotation_degrees`
/// turns it about `center`.
pub fn outline(kind: ShapeKind, center: (f32, f32), size: f32, rotation_degrees: f32) -> Outline {
    let half = size / 2.0;
    let (sin, cos) = rotation_degrees.to_radians().sin_cos();
    let place = |points: Vec<(f32, f32)>| -> Vec<(f32, f32)> {
        points
            .into_iter()
            .map(|(x, y)| {
                let (x, y) = (x * half, y * half);
                (center.0 + x * cos - y * sin, center.1 + x * sin + y * cos)
            })
            .collect()
    };
    let shape = kind.unit_shape();
    Outline {
        boundary: place(shape.points()),
        hole: place(shape.hole()),
    }
}
