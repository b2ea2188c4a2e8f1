//! Seeded gradient noise shared by the noise-driven distortions
//!
//! Wraps two independent Perlin permutation tables. The tables are built
//! once per grid generation and only read afterwards, so a `NoiseField`
//! can be shared freely between dispatch passes.

use noise::{NoiseFn, Perlin};

/// Seed offset of the second table, so the two channels are uncorrelated
const SECONDARY_SEED_OFFSET: u32 = 7919;

/// Finite-difference step for gradients, in noise space
const GRADIENT_EPS: f64 = 1e-3;

#[derive(Clone, Debug)]
pub struct NoiseField {
    primary: Perlin,
    secondary: Perlin,
    seed: u32,
}

impl NoiseField {
    pub fn new(seed: u32) -> Self {
        Self {
            primary: Perlin::new(seed),
            secondary: Perlin::new(seed.wrapping_add(SECONDARY_SEED_OFFSET)),
            seed,
        }
    }

    /// Derive the noise seed from a 64-bit grid seed
    pub fn from_grid_seed(seed: u64) -> Self {
        Self::new((seed ^ (seed >> 32)) as u32)
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Scalar noise in roughly -1.0 to 1.0
    pub fn sample(&self, x: f32, y: f32, z: f32) -> f32 {
        self.primary.get([x as f64, y as f64, z as f64]) as f32
    }

    /// Two independent noise channels at the same point
    pub fn sample_pair(&self, x: f32, y: f32, z: f32) -> (f32, f32) {
        let p = [x as f64, y as f64, z as f64];
        (self.primary.get(p) as f32, self.secondary.get(p) as f32)
    }

    /// Sum of `octaves` layers, each doubling frequency and halving amplitude
    ///
    /// Normalized by the total amplitude so the range matches a single layer.
    pub fn fractal(&self, x: f32, y: f32, z: f32, octaves: u32) -> (f32, f32) {
        let (sum_x, sum_y, total, _, _) = (0..octaves.max(1)).fold(
            (0.0f64, 0.0f64, 0.0f64, 1.0f64, 1.0f64),
            |(sx, sy, total, amp, freq), _| {
                let p = [x as f64 * freq, y as f64 * freq, z as f64 * freq];
                (
                    sx + self.primary.get(p) * amp,
                    sy + self.secondary.get(p) * amp,
                    total + amp,
                    amp * 0.5,
                    freq * 2.0,
                )
            },
        );
        ((sum_x / total) as f32, (sum_y / total) as f32)
    }

    /// Curl of the primary channel treated as a stream function
    ///
    /// `(dF/dy, -dF/dx)` is divergence free, so advecting along it swirls
    /// without bunching cells together.
    pub fn curl(&self, x: f32, y: f32, z: f32) -> (f32, f32) {
        let (x, y, z) = (x as f64, y as f64, z as f64);
        let df_dy = (self.primary.get([x, y + GRADIENT_EPS, z])
            - self.primary.get([x, y - GRADIENT_EPS, z]))
            / (2.0 * GRADIENT_EPS);
        let df_dx = (self.primary.get([x + GRADIENT_EPS, y, z])
            - self.primary.get([x - GRADIENT_EPS, y, z]))
            / (2.0 * GRADIENT_EPS);
        (df_dy as f32, -df_dx as f32)
    }
}
