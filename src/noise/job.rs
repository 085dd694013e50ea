//! Batched noise evaluation and runtime noise selection

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use glam::{Vec3, Vec4};
use log::debug;

use super::gradient::{Gradient, Perlin, Simplex, Smoothstep, Turbulence, Value};
use super::lattice::{Lattice, Lattice1D, Lattice2D, Lattice3D, LatticeNormal, LatticeTiling};
use super::{fractal_noise4, Noise, Point4, Sample4, SpaceTrs};
use crate::config::NoiseSettings;
use crate::error::{MeshError, Result};
use crate::jobs::JobScheduler;

/// Monomorphised fractal noise over four points
pub type FractalFn = fn(Point4, &NoiseSettings) -> Sample4;

/// Gradient kernel families selectable at runtime
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NoiseType {
    #[default]
    Perlin,
    PerlinSmoothTurbulence,
    PerlinTurbulence,
    Value,
    ValueTurbulence,
    Simplex,
    SimplexTurbulence,
}

impl NoiseType {
    pub const ALL: [NoiseType; 7] = [
        NoiseType::Perlin,
        NoiseType::PerlinSmoothTurbulence,
        NoiseType::PerlinTurbulence,
        NoiseType::Value,
        NoiseType::ValueTurbulence,
        NoiseType::Simplex,
        NoiseType::SimplexTurbulence,
    ];
}

/// Kernel, lattice kind and dimension chosen at runtime
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoiseSelection {
    pub kind: NoiseType,
    pub tiling: bool,
    /// 1, 2 or 3
    pub dimensions: u32,
}

impl Default for NoiseSelection {
    fn default() -> Self {
        Self {
            kind: NoiseType::Perlin,
            tiling: false,
            dimensions: 3,
        }
    }
}

fn fractal<N: Noise>() -> FractalFn {
    fractal_noise4::<N>
}

fn by_dimension<L: Lattice, G: Gradient>(dimensions: u32) -> Option<FractalFn> {
    match dimensions {
        1 => Some(fractal::<Lattice1D<L, G>>()),
        2 => Some(fractal::<Lattice2D<L, G>>()),
        3 => Some(fractal::<Lattice3D<L, G>>()),
        _ => None,
    }
}

fn by_lattice<G: Gradient>(tiling: bool, dimensions: u32) -> Option<FractalFn> {
    if tiling {
        by_dimension::<LatticeTiling, G>(dimensions)
    } else {
        by_dimension::<LatticeNormal, G>(dimensions)
    }
}

impl NoiseSelection {
    /// Resolve the selection to a concrete noise function
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `dimensions` is not 1, 2 or 3
    pub fn resolve(&self) -> Result<FractalFn> {
        let (tiling, dimensions) = (self.tiling, self.dimensions);
        let resolved = match self.kind {
            NoiseType::Perlin => by_lattice::<Perlin>(tiling, dimensions),
            NoiseType::PerlinSmoothTurbulence => {
                by_lattice::<Smoothstep<Turbulence<Perlin>>>(tiling, dimensions)
            }
            NoiseType::PerlinTurbulence => by_lattice::<Turbulence<Perlin>>(tiling, dimensions),
            NoiseType::Value => by_lattice::<Value>(tiling, dimensions),
            NoiseType::ValueTurbulence => by_lattice::<Turbulence<Value>>(tiling, dimensions),
            NoiseType::Simplex => by_lattice::<Simplex>(tiling, dimensions),
            NoiseType::SimplexTurbulence => by_lattice::<Turbulence<Simplex>>(tiling, dimensions),
        };
        resolved.ok_or_else(|| {
            MeshError::InvalidConfig(format!(
                "noise dimensions must be 1, 2 or 3 (got {})",
                dimensions
            ))
        })
    }
}

/// Samples fractal noise for batches of four positions
///
/// Each batch is transformed into noise space by the domain and written as
/// four values in `[-1, 1]` (or `[0, 1]` for turbulence).
pub struct NoiseJob;

impl NoiseJob {
    /// Evaluate `N` for every batch of positions
    pub fn run<N: Noise, J: JobScheduler>(
        positions: &[[Vec3; 4]],
        settings: &NoiseSettings,
        domain: &SpaceTrs,
        batch_size: usize,
        scheduler: &J,
    ) -> Result<Vec<Vec4>> {
        Self::run_with(fractal_noise4::<N>, positions, settings, domain, batch_size, scheduler)
    }

    /// Evaluate a runtime-selected noise for every batch of positions
    pub fn run_with<J: JobScheduler>(
        noise: FractalFn,
        positions: &[[Vec3; 4]],
        settings: &NoiseSettings,
        domain: &SpaceTrs,
        batch_size: usize,
        scheduler: &J,
    ) -> Result<Vec<Vec4>> {
        settings.validate()?;
        let matrix = domain.matrix();
        debug!(
            "sampling noise for {} batches (seed {}, {} octaves)",
            positions.len(),
            settings.seed,
            settings.octaves
        );

        Ok(scheduler.map(positions.len(), batch_size, |index| {
            let points = Point4::from_points(positions[index]).transformed(&matrix);
            noise(points, settings).v
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::Sequential;

    fn batches() -> Vec<[Vec3; 4]> {
        (0..8)
            .map(|i| {
                let f = i as f32 * 0.13;
                [
                    Vec3::new(f, 0.0, -f),
                    Vec3::new(-f, 0.25, f * 0.5),
                    Vec3::new(0.5, f, 0.1),
                    Vec3::splat(f - 0.4),
                ]
            })
            .collect()
    }

    #[test]
    fn test_selection_matches_generic() {
        let settings = NoiseSettings {
            seed: 12,
            octaves: 3,
            ..Default::default()
        };
        let domain = SpaceTrs::from_scale(2.0);
        let selection = NoiseSelection {
            kind: NoiseType::ValueTurbulence,
            tiling: true,
            dimensions: 2,
        };
        let selected = NoiseJob::run_with(
            selection.resolve().unwrap(),
            &batches(),
            &settings,
            &domain,
            4,
            &Sequential,
        )
        .unwrap();
        let generic = NoiseJob::run::<Lattice2D<LatticeTiling, Turbulence<Value>>, _>(
            &batches(),
            &settings,
            &domain,
            4,
            &Sequential,
        )
        .unwrap();
        assert_eq!(selected, generic);
    }

    #[test]
    fn test_every_selection_resolves() {
        for kind in NoiseType::ALL {
            for tiling in [false, true] {
                for dimensions in 1..=3 {
                    let selection = NoiseSelection {
                        kind,
                        tiling,
                        dimensions,
                    };
                    assert!(selection.resolve().is_ok(), "{selection:?}");
                }
            }
        }
    }

    #[test]
    fn test_bad_dimension_rejected() {
        for dimensions in [0, 4] {
            let selection = NoiseSelection {
                dimensions,
                ..Default::default()
            };
            assert!(matches!(selection.resolve(), Err(MeshError::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = NoiseSettings {
            lacunarity: 9,
            ..Default::default()
        };
        let result = NoiseJob::run::<Lattice3D<LatticeNormal, Perlin>, _>(
            &batches(),
            &settings,
            &SpaceTrs::default(),
            1,
            &Sequential,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_turbulence_non_negative() {
        let values = NoiseJob::run::<Lattice3D<LatticeNormal, Turbulence<Perlin>>, _>(
            &batches(),
            &NoiseSettings::default(),
            &SpaceTrs::from_scale(3.0),
            2,
            &Sequential,
        )
        .unwrap();
        assert_eq!(values.len(), 8);
        assert!(values.iter().all(|v| v.min_element() >= 0.0));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_identical() {
        use crate::jobs::Parallel;
        let settings = NoiseSettings {
            octaves: 4,
            ..Default::default()
        };
        let run = |parallel: bool| {
            let fractal = NoiseSelection::default().resolve().unwrap();
            if parallel {
                NoiseJob::run_with(fractal, &batches(), &settings, &SpaceTrs::default(), 1, &Parallel::new())
            } else {
                NoiseJob::run_with(fractal, &batches(), &settings, &SpaceTrs::default(), 1, &Sequential)
            }
            .unwrap()
        };
        assert_eq!(run(true), run(false));
    }
}
