//! Fractal simplex-noise heightfield for the demo terrain.

use noise::{NoiseFn, Simplex};
use strata_terrain::HeightField;

/// Octave settings for [`FbmHeightField`].
#[derive(Clone, Debug)]
pub(crate) struct FbmParams {
    pub seed: u32,
    pub octaves: u32,
    /// Frequency multiplier between octaves.
    pub lacunarity: f64,
    /// Amplitude multiplier between octaves.
    pub persistence: f64,
    /// Frequency of the broadest octave, in cycles per sample.
    pub base_frequency: f64,
    /// Amplitude of the broadest octave, in height units.
    pub amplitude: f64,
}

impl Default for FbmParams {
    fn default() -> Self {
        Self {
            seed: 7,
            octaves: 5,
            lacunarity: 2.0,
            persistence: 0.5,
            base_frequency: 1.0 / 512.0,
            amplitude: 120.0,
        }
    }
}

/// Sums `octaves` layers of simplex noise, each at double the frequency and
/// half the amplitude of the last.
pub(crate) struct FbmHeightField {
    noise: Simplex,
    params: FbmParams,
}

impl FbmHeightField {
    pub(crate) fn new(params: FbmParams) -> Self {
        Self {
            noise: Simplex::new(params.seed),
            params,
        }
    }

    /// Upper bound on `|sample|`.
    pub(crate) fn max_amplitude(&self) -> f64 {
        (0..self.params.octaves)
            .map(|i| self.params.amplitude * self.params.persistence.powi(i as i32))
            .sum()
    }
}

impl HeightField for FbmHeightField {
    fn sample(&self, x: f64, y: f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = self.params.base_frequency;
        let mut amplitude = self.params.amplitude;
        for _ in 0..self.params.octaves {
            total += self.noise.get([x * frequency, y * frequency]) * amplitude;
            frequency *= self.params.lacunarity;
            amplitude *= self.params.persistence;
        }
        total
    }
}
