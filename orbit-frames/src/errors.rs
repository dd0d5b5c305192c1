use orbit_core::CoreError;
use orbit_time::TimeError;
use thiserror::Error;

/// Convenience alias for `Result<T, FrameError>`.
pub type FrameResult<T> = Result<T, FrameError>;

/// Error type for frame and element transforms.
#[derive(Error, Debug)]
pub enum FrameError {
    /// Mathematically undefined input: degenerate orbit, zero-magnitude
    /// vector where a direction is required, non-elliptic energy.
    #[error("domain error in {operation}: {message}")]
    Domain { operation: String, message: String },

    /// An iterative solver exhausted its bounded iteration budget.
    #[error("{operation} failed to converge within {iterations} iterations (tolerance {tolerance:e})")]
    Convergence {
        operation: String,
        iterations: usize,
        tolerance: f64,
    },

    /// The requested quantity is geometrically undefined for an orbit this
    /// close to circular or equatorial.
    #[error("near-singular geometry in {operation}: {message}")]
    NearSingular { operation: String, message: String },

    /// Time-system failure while evaluating an epoch-dependent transform.
    #[error("time error: {source}")]
    Time {
        #[from]
        source: TimeError,
    },

    /// Core math failure propagated from the primitives layer.
    #[error("core math error: {source}")]
    Core {
        #[from]
        source: CoreError,
    },
}

impl FrameError {
    pub fn domain(operation: &str, message: &str) -> Self {
        Self::Domain {
            operation: operation.to_string(),
            message: message.to_string(),
        }
    }

    pub fn near_singular(operation: &str, message: &str) -> Self {
        Self::NearSingular {
            operation: operation.to_string(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = FrameError::domain("cartesian_to_elements", "position vector is zero");
        assert!(err.to_string().contains("cartesian_to_elements"));
        assert!(err.to_string().contains("position vector is zero"));

        let err = FrameError::Convergence {
            operation: "anomaly_mean_to_eccentric".to_string(),
            iterations: 25,
            tolerance: 1e-12,
        };
        assert!(err.to_string().contains("25 iterations"));
    }

    #[test]
    fn test_from_time_error() {
        let time_err = TimeError::ParseError("bad".to_string());
        let err: FrameError = time_err.into();
        assert!(matches!(err, FrameError::Time { .. }));
    }

    #[test]
    fn test_send_sync() {
        fn _assert_send<T: Send>() {}
        fn _assert_sync<T: Sync>() {}
        _assert_send::<FrameError>();
        _assert_sync::<FrameError>();
    }
}
