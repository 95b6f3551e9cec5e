//! Error types for spark-pool.
//!
//! Only configuration can fail. Once a [`ParticleSimulator`](crate::ParticleSimulator)
//! has been built, every per-frame operation is infallible: an exhausted pool
//! skips the spawn and a degenerate direction sample falls back to a fixed axis.

use crate::emitter::EmissionVolume;

/// Errors that can occur while loading or validating a [`ParticleConfig`](crate::ParticleConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The pool must hold at least one particle.
    #[error("Pool size must be at least 1")]
    InvalidPoolSize,
    /// Lifespan must be a positive, finite number of milliseconds.
    #[error("Lifespan must be positive and finite, got {0} ms")]
    InvalidLifespan(f32),
    /// Emission rate must be a positive, finite number of particles per second.
    #[error("Emission rate must be positive and finite, got {0} Hz")]
    InvalidEmissionRate(f32),
    /// The selected emission volume has no sampling rule.
    #[error("Emission volume {0:?} is not supported. Use Sphere or Cone.")]
    UnsupportedEmissionVolume(EmissionVolume),
    /// Failed to read or write a config file.
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    /// Config file is not valid JSON for a particle config.
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_volume_message_names_kind() {
        let err = ConfigError::UnsupportedEmissionVolume(EmissionVolume::Cylinder);
        let msg = err.to_string();
        assert!(msg.contains("Cylinder"));
    }

    #[test]
    fn test_json_error_converts() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: ConfigError = json_err.into();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
