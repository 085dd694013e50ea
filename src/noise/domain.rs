//! Noise domain transform

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use glam::{Affine3A, Mat3, Quat, Vec3};

/// Translation, rotation and scale applied to positions before sampling
///
/// Rotation is given in degrees and applied in Z, then X, then Y order.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaceTrs {
    pub translation: Vec3,
    /// Euler angles in degrees
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for SpaceTrs {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl SpaceTrs {
    /// Uniform scale without rotation or translation
    pub fn from_scale(scale: f32) -> Self {
        Self {
            scale: Vec3::splat(scale),
            ..Default::default()
        }
    }

    pub fn rotation_quat(&self) -> Quat {
        let radians = Vec3::new(
            self.rotation.x.to_radians(),
            self.rotation.y.to_radians(),
            self.rotation.z.to_radians(),
        );
        Quat::from_rotation_y(radians.y)
            * Quat::from_rotation_x(radians.x)
            * Quat::from_rotation_z(radians.z)
    }

    /// Affine map from input space into noise space
    pub fn matrix(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation_quat(), self.translation)
    }

    /// Matrix taking noise-space derivatives back to input space
    ///
    /// For `q = M p + t` the chain rule gives `∇p = Mᵀ ∇q`, so this is the
    /// transpose of the linear part of [`SpaceTrs::matrix`].
    pub fn derivative_matrix(&self) -> Mat3 {
        (Mat3::from_quat(self.rotation_quat()) * Mat3::from_diagonal(self.scale)).transpose()
    }
}
