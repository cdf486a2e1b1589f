use thiserror::Error;

/// Reasons a nesting call can fail.
/// A failed call never carries a partial layout: callers keep their previous shape positions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NestError {
    #[error("shape {id} has fewer than 2 points")]
    DegenerateShape { id: String },
    #[error("shape {id} is invalid: {reason}")]
    InvalidShape { id: String, reason: String },
    #[error("shape id {id} is used more than once")]
    DuplicateId { id: String },
    #[error("invalid sheet dimensions {width}x{height}")]
    InvalidSheet { width: f64, height: f64 },
    #[error("invalid spacing {spacing}, must be a finite non-negative number")]
    InvalidSpacing { spacing: f64 },
    #[error("invalid rotation policy: {reason}")]
    InvalidRotation { reason: String },
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
    #[error(
        "shape {id} is too large for the {sheet_width}x{sheet_height} sheet in every allowed rotation, need {width:.1}x{height:.1} mm"
    )]
    ShapeTooLarge {
        id: String,
        width: f64,
        height: f64,
        sheet_width: f64,
        sheet_height: f64,
    },
    #[error("all strategies failed, last reason: {reason}")]
    AllStrategiesFailed { reason: String },
    #[error("nesting was cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_large_message_names_shape_and_need() {
        let err = NestError::ShapeTooLarge {
            id: "bracket".into(),
            width: 400.0,
            height: 400.0,
            sheet_width: 300.0,
            sheet_height: 300.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("bracket"));
        assert!(msg.contains("too large"));
        assert!(msg.contains("need 400.0x400.0"));
    }
}
