//! Noise settings and builder
//!
//! Settings are immutable for the duration of one noise invocation and drive
//! the octave loop of fractal summation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, Result};

/// Smallest accepted octave count
pub const MIN_OCTAVES: u32 = 1;
/// Largest accepted octave count
pub const MAX_OCTAVES: u32 = 6;
/// Smallest accepted lacunarity
pub const MIN_LACUNARITY: u32 = 2;
/// Largest accepted lacunarity
pub const MAX_LACUNARITY: u32 = 4;
/// Largest accepted base frequency
///
/// The last octave's frequency `frequency * lacunarity^(octaves - 1)` must
/// fit in an `i32` lattice coordinate for every accepted setting.
pub const MAX_FREQUENCY: u32 = i32::MAX as u32 / MAX_LACUNARITY.pow(MAX_OCTAVES - 1);

/// Configuration for fractal noise evaluation
///
/// The same settings, domain and coordinates always produce bit-identical
/// samples.
///
/// # Example
///
/// ```rust
/// use procedural_meshes::*;
///
/// let settings = NoiseSettingsBuilder::new()
///     .seed(42)
///     .frequency(8)
///     .unwrap()
///     .octaves(3)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&settings).unwrap();
/// let restored: NoiseSettings = serde_json::from_str(&json).unwrap();
/// assert_eq!(settings, restored);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseSettings {
    /// Seed fed to the hash before any lattice coordinate
    pub seed: i32,

    /// Lattice frequency of the first octave (1..=`MAX_FREQUENCY`)
    pub frequency: u32,

    /// Number of octaves summed (1..=6)
    pub octaves: u32,

    /// Frequency multiplier per octave (2..=4)
    pub lacunarity: u32,

    /// Amplitude multiplier per octave (0..=1)
    pub persistence: f32,
}

impl NoiseSettings {
    /// Check every field against its documented range
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_FREQUENCY).contains(&self.frequency) {
            return Err(MeshError::InvalidConfig(format!(
                "frequency must be in 1..={} (got {})",
                MAX_FREQUENCY, self.frequency
            )));
        }
        if !(MIN_OCTAVES..=MAX_OCTAVES).contains(&self.octaves) {
            return Err(MeshError::InvalidConfig(format!(
                "octaves must be in {}..={} (got {})",
                MIN_OCTAVES, MAX_OCTAVES, self.octaves
            )));
        }
        if !(MIN_LACUNARITY..=MAX_LACUNARITY).contains(&self.lacunarity) {
            return Err(MeshError::InvalidConfig(format!(
                "lacunarity must be in {}..={} (got {})",
                MIN_LACUNARITY, MAX_LACUNARITY, self.lacunarity
            )));
        }
        if !(0.0..=1.0).contains(&self.persistence) {
            return Err(MeshError::InvalidConfig(format!(
                "persistence must be in 0..=1 (got {})",
                self.persistence
            )));
        }
        Ok(())
    }
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            frequency: 4,
            octaves: 1,
            lacunarity: 2,
            persistence: 0.5,
        }
    }
}

/// Builder for creating NoiseSettings with validation
///
/// # Example
///
/// ```rust
/// use procedural_meshes::*;
///
/// // Defaults with a fixed seed
/// let settings = NoiseSettingsBuilder::new().seed(7).build().unwrap();
/// assert_eq!(settings.frequency, 4);
///
/// // Out of range values are rejected eagerly
/// assert!(NoiseSettingsBuilder::new().octaves(7).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct NoiseSettingsBuilder {
    seed: Option<i32>,
    frequency: u32,
    octaves: u32,
    lacunarity: u32,
    persistence: f32,
}

impl NoiseSettingsBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random (generated from thread_rng)
    /// - frequency: 4
    /// - octaves: 1
    /// - lacunarity: 2
    /// - persistence: 0.5
    pub fn new() -> Self {
        let defaults = NoiseSettings::default();
        Self {
            seed: None,
            frequency: defaults.frequency,
            octaves: defaults.octaves,
            lacunarity: defaults.lacunarity,
            persistence: defaults.persistence,
        }
    }

    /// Set the hash seed
    pub fn seed(mut self, seed: i32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the base lattice frequency
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if frequency is outside 1..=`MAX_FREQUENCY`
    pub fn frequency(mut self, frequency: u32) -> Result<Self> {
        if !(1..=MAX_FREQUENCY).contains(&frequency) {
            return Err(MeshError::InvalidConfig(format!(
                "frequency must be in 1..={} (got {})",
                MAX_FREQUENCY, frequency
            )));
        }
        self.frequency = frequency;
        Ok(self)
    }

    /// Set the number of octaves
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if octaves is outside 1..=6
    pub fn octaves(mut self, octaves: u32) -> Result<Self> {
        if !(MIN_OCTAVES..=MAX_OCTAVES).contains(&octaves) {
            return Err(MeshError::InvalidConfig(format!(
                "octaves must be in {}..={} (got {})",
                MIN_OCTAVES, MAX_OCTAVES, octaves
            )));
        }
        self.octaves = octaves;
        Ok(self)
    }

    /// Set the per-octave frequency multiplier
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if lacunarity is outside 2..=4
    pub fn lacunarity(mut self, lacunarity: u32) -> Result<Self> {
        if !(MIN_LACUNARITY..=MAX_LACUNARITY).contains(&lacunarity) {
            return Err(MeshError::InvalidConfig(format!(
                "lacunarity must be in {}..={} (got {})",
                MIN_LACUNARITY, MAX_LACUNARITY, lacunarity
            )));
        }
        self.lacunarity = lacunarity;
        Ok(self)
    }

    /// Set the per-octave amplitude multiplier
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if persistence is outside 0..=1 or NaN
    pub fn persistence(mut self, persistence: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&persistence) {
            return Err(MeshError::InvalidConfig(format!(
                "persistence must be in 0..=1 (got {})",
                persistence
            )));
        }
        self.persistence = persistence;
        Ok(self)
    }

    /// Build the settings
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    pub fn build(self) -> Result<NoiseSettings> {
        let settings = NoiseSettings {
            seed: self.seed.unwrap_or_else(rand::random),
            frequency: self.frequency,
            octaves: self.octaves,
            lacunarity: self.lacunarity,
            persistence: self.persistence,
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl Default for NoiseSettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = NoiseSettings::default();
        assert_eq!(settings.seed, 0);
        assert_eq!(settings.frequency, 4);
        assert_eq!(settings.octaves, 1);
        assert_eq!(settings.lacunarity, 2);
        assert_eq!(settings.persistence, 0.5);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_builder_custom() {
        let settings = NoiseSettingsBuilder::new()
            .seed(-12)
            .frequency(16)
            .unwrap()
            .octaves(6)
            .unwrap()
            .lacunarity(3)
            .unwrap()
            .persistence(0.25)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(settings.seed, -12);
        assert_eq!(settings.frequency, 16);
        assert_eq!(settings.octaves, 6);
        assert_eq!(settings.lacunarity, 3);
        assert_eq!(settings.persistence, 0.25);
    }

    #[test]
    fn test_builder_random_seed_still_valid() {
        let settings = NoiseSettingsBuilder::new().build().unwrap();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_builder_rejects_out_of_range() {
        assert!(NoiseSettingsBuilder::new().frequency(0).is_err());
        assert!(NoiseSettingsBuilder::new().octaves(0).is_err());
        assert!(NoiseSettingsBuilder::new().octaves(7).is_err());
        assert!(NoiseSettingsBuilder::new().lacunarity(1).is_err());
        assert!(NoiseSettingsBuilder::new().lacunarity(5).is_err());
        assert!(NoiseSettingsBuilder::new().persistence(-0.1).is_err());
        assert!(NoiseSettingsBuilder::new().persistence(1.5).is_err());
        assert!(NoiseSettingsBuilder::new().persistence(f32::NAN).is_err());
    }

    #[test]
    fn test_validate_catches_hand_built_settings() {
        let settings = NoiseSettings {
            octaves: 9,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(MeshError::InvalidConfig(_))));

        let settings = NoiseSettings {
            frequency: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_frequency_upper_bound() {
        assert_eq!(MAX_FREQUENCY, 2_097_151);
        assert!(NoiseSettingsBuilder::new().frequency(MAX_FREQUENCY).is_ok());
        assert!(NoiseSettingsBuilder::new().frequency(MAX_FREQUENCY + 1).is_err());

        let settings = NoiseSettings {
            frequency: 1 << 30,
            octaves: 2,
            lacunarity: 4,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(MeshError::InvalidConfig(_))));

        // The highest accepted octave frequency still fits an i32 lattice
        let last = MAX_FREQUENCY as u64 * (MAX_LACUNARITY as u64).pow(MAX_OCTAVES - 1);
        assert!(last <= i32::MAX as u64);
    }

    #[test]
    fn test_boundary_values_accepted() {
        let settings = NoiseSettings {
            seed: i32::MIN,
            frequency: 1,
            octaves: 1,
            lacunarity: 4,
            persistence: 0.0,
        };
        assert!(settings.validate().is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_settings_serialization() {
        let settings = NoiseSettingsBuilder::new().seed(3).build().unwrap();
        let json = serde_json::to_string(&settings).unwrap();
        let restored: NoiseSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, restored);
    }
}
