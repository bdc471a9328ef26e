use std::num::NonZeroU32;

use bon::bon;

use crate::{
    geometry::{FloatType, WorldPoint, WorldVector},
    noise::{perlin_noise, perlin_noise_3d},
};

const DEFAULT_OCTAVES: NonZeroU32 = NonZeroU32::new(8).unwrap();

/// Fractal noise field over world space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Turbulence {
    /// Output scale, per channel for `evaluate_3d`. `evaluate` uses only the x component.
    amplitude: WorldVector,
    /// Componentwise scale of the input position
    frequency: WorldVector,
    /// Added to the input position after scaling
    offset: WorldVector,
    lacunarity: FloatType,
    /// Weight ratio between consecutive octaves
    gain: FloatType,
    octaves: NonZeroU32,
}

#[bon]
impl Turbulence {
    #[builder]
    pub fn new(
        #[builder(default = WorldVector::repeat(1.0))] amplitude: WorldVector,
        #[builder(default = WorldVector::repeat(1.0))] frequency: WorldVector,
        #[builder(default = WorldVector::zeros())] offset: WorldVector,
        #[builder(default = 2.0)] lacunarity: FloatType,
        #[builder(default = 0.5)] gain: FloatType,
        #[builder(default = DEFAULT_OCTAVES)] octaves: NonZeroU32,
    ) -> Self {
        Turbulence {
            amplitude,
            frequency,
            offset,
            lacunarity,
            gain,
            octaves,
        }
    }
}

impl Turbulence {
    pub fn amplitude(&self) -> &WorldVector {
        &self.amplitude
    }

    pub fn frequency(&self) -> &WorldVector {
        &self.frequency
    }

    pub fn offset(&self) -> &WorldVector {
        &self.offset
    }

    pub fn lacunarity(&self) -> FloatType {
        self.lacunarity
    }

    pub fn gain(&self) -> FloatType {
        self.gain
    }

    pub fn octaves(&self) -> NonZeroU32 {
        self.octaves
    }

    fn noise_position(&self, position: &WorldPoint) -> WorldPoint {
        WorldPoint::from(position.coords.component_mul(&self.frequency) + self.offset)
    }

    pub fn evaluate(&self, position: &WorldPoint) -> FloatType {
        let p = self.noise_position(position);
        perlin_noise(&p, self.lacunarity, self.gain, self.octaves.get()) * self.amplitude.x
    }

    pub fn evaluate_3d(&self, position: &WorldPoint) -> WorldVector {
        let p = self.noise_position(position);
        perlin_noise_3d(&p, self.lacunarity, self.gain, self.octaves.get()).component_mul(&self.amplitude)
    }
}

impl Default for Turbulence {
    fn default() -> Self {
        Turbulence::builder().build()
    }
}
