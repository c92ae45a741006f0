// Sinusoidal height field.
//
// Column heights come from `floor(a * (sin(x * s) + cos(y * s)) + a)` where
// `s` is the frequency scale and `a` the amplitude, clamped at zero. The
// result is the number of stacked layers at that column. Hex and square
// grids sample the same function with their own integer coordinates; only
// the mapping to world space differs.
//
// Evaluated in f64 so the floor boundary does not wobble with f32 rounding.
//
// See also: `config.rs` for `HeightParams`, `terrain.rs` which samples the
// field once per column.
//
// **Critical constraint: determinism.** A pure function. No state, no seed.

use crate::config::HeightParams;

/// Number of layers stacked at grid coordinate `(x, y)`.
pub fn column_height(x: i32, y: i32, scale: f32, amplitude: f32) -> u32 {
    let scale = f64::from(scale);
    let amplitude = f64::from(amplitude);
    let wave = (f64::from(x) * scale).sin() + (f64::from(y) * scale).cos();
    let h = (amplitude * wave + amplitude).floor();
    if h.is_finite() && h > 0.0 {
        h as u32
    } else {
        0
    }
}

/// A `HeightParams` bound to the sampling function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightField {
    scale: f32,
    amplitude: f32,
}

impl HeightField {
    pub fn new(params: &HeightParams) -> Self {
        Self {
            scale: params.scale,
            amplitude: params.amplitude,
        }
    }

    pub fn sample(&self, x: i32, y: i32) -> u32 {
        column_height(x, y, self.scale, self.amplitude)
    }

    /// Tallest column the field can produce: `floor(3a)`.
    pub fn max_height(&self) -> u32 {
        let h = (3.0 * f64::from(self.amplitude)).floor();
        if h.is_finite() && h > 0.0 { h as u32 } else { 0 }
    }
}
