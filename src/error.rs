//! Error types for the estimator

use thiserror::Error;

/// Every way a single estimation call can fail.
///
/// Failures are local to one invocation; nothing here is fatal to the process.
#[derive(Error, Debug)]
pub enum EstimatorError {
    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameters {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Unknown {kind}: {value:?}")]
    InvalidCategory { kind: &'static str, value: String },

    #[error("At least 2 points are required to measure an area, got {got}")]
    InsufficientPoints { got: usize },

    #[error("Payback period is undefined: annual savings are zero")]
    DivisionSentinel,

    #[error("Export error: {0}")]
    Export(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EstimatorError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &str) -> Self {
        EstimatorError::InvalidParameters {
            name,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn category(kind: &'static str, value: &str) -> Self {
        EstimatorError::InvalidCategory {
            kind,
            value: value.to_string(),
        }
    }
}

/// Result type alias for estimator operations
pub type Result<T> = std::result::Result<T, EstimatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_reason() {
        let e = EstimatorError::invalid("roof_tilt_deg", 95.0, "must be within [0, 90]");
        assert_eq!(
            e.to_string(),
            "Invalid parameter: roof_tilt_deg = 95 (must be within [0, 90])"
        );

        let e = EstimatorError::category("shading", "partial");
        assert_eq!(e.to_string(), "Unknown shading: \"partial\"");

        let e = EstimatorError::InsufficientPoints { got: 1 };
        assert!(e.to_string().contains("got 1"));
    }
}
