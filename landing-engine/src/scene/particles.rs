// particles.rs - Falling sprite particles
//
// Structure-of-Arrays layout for cache-friendly iteration.
// The count is fixed at construction: a particle that drops below the
// floor re-enters at the ceiling instead of being removed.

use serde::{Deserialize, Serialize};

use super::buffer::PositionBuffer;

/// Box the particles live in, in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleBounds {
    pub half_width: f32,
    pub half_depth: f32,
    pub upper: f32,
    pub lower: f32,
    /// Fall speed range, units per second.
    pub min_speed: f32,
    pub max_speed: f32,
}

impl Default for ParticleBounds {
    fn default() -> Self {
        Self {
            half_width: 10.0,
            half_depth: 10.0,
            upper: 10.0,
            lower: -10.0,
            min_speed: 0.4,
            max_speed: 1.6,
        }
    }
}

pub struct ParticleField {
    // Position
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub z: Vec<f32>,

    // Velocity (y only, particles fall straight)
    pub v: Vec<f32>,

    bounds: ParticleBounds,
    rng: u32,
}

impl ParticleField {
    pub fn new(count: usize, bounds: ParticleBounds) -> Self {
        let mut field = Self {
            x: vec![0.0; count],
            y: vec![0.0; count],
            z: vec![0.0; count],
            v: vec![0.0; count],
            bounds,
            rng: 0xDEADBEEF,
        };
        for i in 0..count {
            field.scatter(i);
            // spread the initial heights over the whole box
            field.y[i] = lerp(bounds.lower, bounds.upper, rand(&mut field.rng));
        }
        field
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Advance by `dt` seconds, wrapping anything that fell through the floor.
    pub fn update(&mut self, dt: f32) {
        for i in 0..self.len() {
            let y = self.y[i] - self.v[i] * dt;
            if y < self.bounds.lower {
                self.scatter(i);
                self.y[i] = self.bounds.upper;
                continue;
            }
            self.y[i] = y;
        }
    }

    pub fn write_positions(&self, out: &mut PositionBuffer) {
        out.clear();
        for i in 0..self.len() {
            out.push(self.x[i], self.y[i], self.z[i]);
        }
    }

    // New column and speed for particle i; height is left to the caller.
    fn scatter(&mut self, i: usize) {
        let b = self.bounds;
        self.x[i] = (rand(&mut self.rng) * 2.0 - 1.0) * b.half_width;
        self.z[i] = (rand(&mut self.rng) * 2.0 - 1.0) * b.half_depth;
        self.v[i] = lerp(b.min_speed, b.max_speed, rand(&mut self.rng));
    }
}

// Random number generator (xorshift32)
#[inline(always)]
fn rand(rng: &mut u32) -> f32 {
    *rng ^= *rng << 13;
    *rng ^= *rng >> 17;
    *rng ^= *rng << 5;
    (*rng >> 8) as f32 * (1.0 / 16777216.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
