//! Error types for mesh and noise generation

use thiserror::Error;

/// Errors that can occur while configuring or running a generator
///
/// All of these are caller contract violations detected before any job
/// runs. Generation itself is deterministic and never fails halfway.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Resolution must be at least 1
    #[error("invalid resolution: {0} (must be >= 1)")]
    InvalidResolution(u32),
    /// Output stream cannot hold everything the generator writes
    #[error("{what} buffer too small: requires {required}, has {available}")]
    BufferTooSmall {
        /// Which buffer ("vertex" or "triangle")
        what: &'static str,
        /// Number of slots the generator writes
        required: usize,
        /// Number of slots the sink provides
        available: usize,
    },
}

/// Result type alias for mesh and noise operations
pub type Result<T> = std::result::Result<T, MeshError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            MeshError::InvalidResolution(0).to_string(),
            "invalid resolution: 0 (must be >= 1)"
        );
        let err = MeshError::BufferTooSmall {
            what: "vertex",
            required: 25,
            available: 16,
        };
        assert_eq!(err.to_string(), "vertex buffer too small: requires 25, has 16");
    }
}
