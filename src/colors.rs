//! Color schemes - per-cell colors from grid coordinates
//!
//! Colors depend only on where a cell sits in the grid, never on where the
//! distortion moved it, so a scheme stays stable while the grid animates.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::GridModel;

pub type Rgb = [u8; 3];

const WHITE: Rgb = [255, 255, 255];
const BLACK: Rgb = [0, 0, 0];

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    #[default]
    Monochrome,
    Gradient,
    Rainbow,
    Complementary,
    Temperature,
    Pastel,
    Neon,
    Ocean,
    Fire,
    Forest,
    Analogous,
    BlackWhiteRadial,
    BlackWhiteAlternating,
    Cyberpunk,
    AuroraBorealis,
    InfraredThermal,
    DuotoneAccent,
    Desert,
    Metallics,
    Reggae,
    Sunset,
    PopArt,
    Vaporwave,
    CandyShop,
}

impl ColorScheme {
    pub const ALL: &[ColorScheme] = &[
        Self::Monochrome,
        Self::Gradient,
        Self::Rainbow,
        Self::Complementary,
        Self::Temperature,
        Self::Pastel,
        Self::Neon,
        Self::Ocean,
        Self::Fire,
        Self::Forest,
        Self::Analogous,
        Self::BlackWhiteRadial,
        Self::BlackWhiteAlternating,
        Self::Cyberpunk,
        Self::AuroraBorealis,
        Self::InfraredThermal,
        Self::DuotoneAccent,
        Self::Desert,
        Self::Metallics,
        Self::Reggae,
        Self::Sunset,
        Self::PopArt,
        Self::Vaporwave,
        Self::CandyShop,
    ];

    pub fn all() -> &'static [ColorScheme] {
        Self::ALL
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorScheme::Monochrome => "Monochrome",
            ColorScheme::Gradient => "Gradient",
            ColorScheme::Rainbow => "Rainbow",
            ColorScheme::Complementary => "Complementary",
            ColorScheme::Temperature => "Temperature",
            ColorScheme::Pastel => "Pastel",
            ColorScheme::Neon => "Neon",
            ColorScheme::Ocean => "Ocean",
            ColorScheme::Fire => "Fire",
            ColorScheme::Forest => "Forest",
            ColorScheme::Analogous => "Analogous",
            ColorScheme::BlackWhiteRadial => "Black & White Radial",
            ColorScheme::BlackWhiteAlternating => "Black & White Alternating",
            ColorScheme::Cyberpunk => "Cyberpunk",
            ColorScheme::AuroraBorealis => "Aurora Borealis",
            ColorScheme::InfraredThermal => "Infrared Thermal",
            ColorScheme::DuotoneAccent => "Duotone Accent",
            ColorScheme::Desert => "Desert",
            ColorScheme::Metallics => "Metallics",
            ColorScheme::Reggae => "Reggae",
            ColorScheme::Sunset => "Sunset",
            ColorScheme::PopArt => "Pop Art",
            ColorScheme::Vaporwave => "Vaporwave",
            ColorScheme::CandyShop => "Candy Shop",
        }
    }

    /// The scheme after this one, wrapping around
    pub fn next(&self) -> Self {
        let i = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// HSV in 0.0 to 1.0 to 8-bit RGB, truncating each channel
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb {
    let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0) as u8;
    if s <= 0.0 {
        let c = to_byte(v);
        return [c, c, c];
    }
    let h = h.rem_euclid(1.0) * 6.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match sector as u32 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    [to_byte(r), to_byte(g), to_byte(b)]
}

/// Linear mix of two colors, `t` clamped to 0.0 to 1.0
pub fn blend(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    [0, 1, 2].map(|i| (a[i] as f32 + (b[i] as f32 - a[i] as f32) * t) as u8)
}

/// Three equal segments through four stops
fn ramp(stops: [Rgb; 4], t: f32) -> Rgb {
    if t < 0.33 {
        blend(stops[0], stops[1], t / 0.33)
    } else if t < 0.66 {
        blend(stops[1], stops[2], (t - 0.33) / 0.33)
    } else {
        blend(stops[2], stops[3], (t - 0.66) / 0.34)
    }
}

/// Hue, saturation and value of the thermal camera ramp, cold at `t = 0`
fn thermal_hsv(t: f32) -> (f32, f32, f32) {
    if t < 0.16 {
        let p = t / 0.16;
        (0.66 - p * 0.08, 1.0, 0.3 + p * 0.4)
    } else if t < 0.33 {
        let p = (t - 0.16) / 0.17;
        (0.58 - p * 0.25, 1.0, 0.7 + p * 0.3)
    } else if t < 0.5 {
        let p = (t - 0.33) / 0.17;
        (0.33 - p * 0.17, 1.0, 1.0)
    } else if t < 0.66 {
        let p = (t - 0.5) / 0.16;
        (0.16 - p * 0.08, 1.0, 1.0)
    } else if t < 0.83 {
        let p = (t - 0.66) / 0.17;
        (0.08 - p * 0.08, 1.0, 1.0)
    } else if t < 0.92 {
        let p = (t - 0.83) / 0.09;
        (0.0, 1.0 - p * 0.3, 1.0)
    } else {
        let p = (t - 0.92) / 0.08;
        (0.0, 0.7 - p * 0.7, 1.0)
    }
}

/// Two-tone pattern with a sparse accent, from grid coordinates only
fn duotone(row: usize, col: usize) -> Rgb {
    const BLUE: Rgb = [30, 144, 255];
    const PINK: Rgb = [255, 105, 180];
    const ACCENT: Rgb = [255, 255, 0];

    if (row * 73 + col * 151 + row * col * 23) % 997 < 40 {
        return ACCENT;
    }
    let blocks = (row / 2 + col / 2) % 2;
    let stripes = (row + col) % 3;
    let scatter = ((row * 3) % 7 + (col * 2) % 5) % 2;
    if (blocks + stripes + scatter) % 2 == 0 {
        BLUE
    } else {
        PINK
    }
}

fn three_zones(distance_to_center: f32, zones: [Rgb; 3]) -> Rgb {
    if distance_to_center < 0.33 {
        zones[0]
    } else if distance_to_center < 0.66 {
        zones[1]
    } else {
        zones[2]
    }
}

/// Color of one cell
///
/// `x_norm`, `y_norm` and `distance_to_center` come from
/// [`GridModel::color_inputs`](crate::grid::GridModel::color_inputs);
/// `index` is the flat row-major index.
pub fn color_for_position(
    scheme: ColorScheme,
    base_color: Rgb,
    x_norm: f32,
    y_norm: f32,
    distance_to_center: f32,
    index: usize,
    dimension: usize,
) -> Rgb {
    let dimension = dimension.max(1);
    match scheme {
        ColorScheme::Monochrome => base_color,
        ColorScheme::BlackWhiteRadial => {
            if distance_to_center < 0.3 {
                WHITE
            } else if distance_to_center > 0.7 {
                BLACK
            } else if index % 2 == 0 {
                WHITE
            } else {
                BLACK
            }
        }
        ColorScheme::BlackWhiteAlternating => {
            let row = index / dimension;
            let col = index % dimension;
            if (row + col) % 2 == 0 {
                WHITE
            } else {
                BLACK
            }
        }
        ColorScheme::Gradient => {
            let t = (x_norm + y_norm) / 2.0;
            [
                (50.0 + t * 205.0) as u8,
                (100.0 + t * 155.0) as u8,
                (200.0 - t * 100.0) as u8,
            ]
        }
        ColorScheme::Rainbow => hsv_to_rgb(x_norm + y_norm * 0.5, 0.8, 0.9),
        ColorScheme::Complementary => {
            if (index + index / dimension) % 2 == 0 {
                [255, 100, 50]
            } else {
                [50, 150, 255]
            }
        }
        ColorScheme::Temperature => {
            let temp = 1.0 - distance_to_center;
            if temp > 0.7 {
                hsv_to_rgb(0.1, 0.8, 1.0)
            } else if temp > 0.4 {
                hsv_to_rgb(0.05, 0.9, 0.9)
            } else {
                hsv_to_rgb(0.6 + temp * 0.2, 0.7, 0.8)
            }
        }
        ColorScheme::Pastel => hsv_to_rgb(x_norm * 0.3 + y_norm * 0.7, 0.3, 0.9),
        ColorScheme::Neon => hsv_to_rgb(distance_to_center + x_norm * 0.5, 1.0, 1.0),
        ColorScheme::Ocean => {
            if distance_to_center < 0.3 {
                [64, 224, 208]
            } else if distance_to_center < 0.7 {
                [0, 119, 190]
            } else {
                [25, 25, 112]
            }
        }
        ColorScheme::Fire => {
            let intensity = 1.0 - distance_to_center + y_norm * 0.3;
            if intensity > 0.8 {
                [255, 255, 100]
            } else if intensity > 0.5 {
                [255, 140, 0]
            } else {
                [220, 20, 60]
            }
        }
        ColorScheme::Forest => {
            let green = 0.3 + distance_to_center * 0.7 + x_norm * 0.2;
            if green > 0.8 {
                [144, 238, 144]
            } else if green > 0.5 {
                [34, 139, 34]
            } else {
                [0, 100, 0]
            }
        }
        ColorScheme::Analogous => {
            let hue = 0.3 + (x_norm - 0.5) * 0.3 + (y_norm - 0.5) * 0.3;
            let saturation = 0.5 + 0.5 * (0.5 - distance_to_center);
            let value = 0.7 + 0.3 * (index as f32 * 0.1).sin();
            hsv_to_rgb(hue, saturation, value)
        }
        ColorScheme::Cyberpunk => {
            let hue = if (index + index / dimension) % 2 == 0 { 0.83 } else { 0.5 };
            let hue = hue + (x_norm - 0.5) * 0.1 + (y_norm - 0.5) * 0.1;
            hsv_to_rgb(hue, 1.0, 0.6 + 0.4 * (1.0 - distance_to_center))
        }
        ColorScheme::AuroraBorealis => {
            let center = 0.4 + ((x_norm + y_norm + distance_to_center) * 4.0).sin() * 0.1;
            let hue = center + (index as f32 * 0.05).sin() * 0.15;
            let saturation = 0.7 + 0.3 * (y_norm * 5.0 + distance_to_center * 3.0).sin();
            let value = 0.6 + 0.4 * (x_norm * 4.0 + distance_to_center * 2.0).cos();
            hsv_to_rgb(hue, saturation, value)
        }
        ColorScheme::InfraredThermal => {
            let (h, s, v) = thermal_hsv(1.0 - distance_to_center);
            hsv_to_rgb(h, s, v)
        }
        ColorScheme::DuotoneAccent => duotone(index / dimension, index % dimension),
        ColorScheme::Desert => three_zones(distance_to_center, [[237, 201, 175], [210, 125, 45], [102, 51, 0]]),
        ColorScheme::Metallics => ramp(
            [[212, 175, 55], [192, 192, 192], [205, 127, 50], [212, 175, 55]],
            (x_norm + y_norm) / 2.0,
        ),
        ColorScheme::Reggae => three_zones(distance_to_center, [[0, 153, 51], [255, 204, 0], [204, 0, 0]]),
        ColorScheme::Sunset => ramp(
            [[255, 223, 0], [255, 140, 0], [255, 105, 180], [128, 0, 128]],
            y_norm,
        ),
        ColorScheme::PopArt => {
            const PRIMARIES: [Rgb; 4] = [[255, 0, 0], [0, 0, 255], [255, 255, 0], [0, 255, 0]];
            let row = index / dimension;
            let col = index % dimension;
            if row % 5 == 0 || col % 5 == 0 {
                if (row + col) % 2 == 0 {
                    BLACK
                } else {
                    WHITE
                }
            } else {
                PRIMARIES[(row + col) % PRIMARIES.len()]
            }
        }
        ColorScheme::Vaporwave => ramp(
            [[255, 113, 206], [185, 103, 255], [1, 205, 254], [5, 255, 161]],
            (x_norm + 1.0 - y_norm) / 2.0,
        ),
        ColorScheme::CandyShop => {
            const CANDY: [Rgb; 3] = [[255, 105, 180], [152, 255, 152], [255, 250, 102]];
            CANDY[(index / dimension + index % dimension) % CANDY.len()]
        }
    }
}

/// Brightness pulse travelling through the grid by index
pub fn animated_color(base: Rgb, index: usize, time: f32, enabled: bool) -> Rgb {
    if !enabled {
        return base;
    }
    let pulse = ((time * 2.0 + index as f32 * 0.1).sin() * 0.2 + 1.0).clamp(0.5, 1.5);
    base.map(|c| (c as f32 * pulse).min(255.0) as u8)
}

/// Colors of every cell in grid order, animated when `animate` is set
pub fn grid_colors(grid: &GridModel, scheme: ColorScheme, base_color: Rgb, time: f32, animate: bool) -> Vec<Rgb> {
    grid.cells()
        .iter()
        .map(|cell| {
            let index = cell.index(grid.dimension());
            let (x_norm, y_norm, distance) = grid.color_inputs(cell);
            let color = color_for_position(scheme, base_color, x_norm, y_norm, distance, index, grid.dimension());
            animated_color(color, index, time, animate)
        })
        .collect()
}
