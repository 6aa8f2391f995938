// Frametime validation
//
// A negative or non-finite frametime is never fatal: callers validate it,
// log the problem and continue with a zero-length tick.

use log::warn;

/// Invalid per-tick input handed to the simulation
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("Negative frametime: {0}s")]
    NegativeFrametime(f32),

    #[error("Frametime is not a finite number")]
    NonFiniteFrametime,
}

/// Check that a frametime can be used to advance the simulation
pub fn validate_frametime(dt: f32) -> Result<f32, InputError> {
    if !dt.is_finite() {
        return Err(InputError::NonFiniteFrametime);
    }
    if dt < 0.0 {
        return Err(InputError::NegativeFrametime(dt));
    }
    Ok(dt)
}

/// Validate a frametime, clamping anything unusable to zero
pub fn sanitize_frametime(dt: f32) -> f32 {
    validate_frametime(dt).unwrap_or_else(|err| {
        warn!("{}, clamping to 0", err);
        0.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_frametime() {
        assert_eq!(validate_frametime(0.0), Ok(0.0));
        assert_eq!(validate_frametime(0.016), Ok(0.016));
    }

    #[test]
    fn test_negative_frametime_rejected() {
        assert_eq!(
            validate_frametime(-0.1),
            Err(InputError::NegativeFrametime(-0.1))
        );
    }

    #[test]
    fn test_non_finite_frametime_rejected() {
        assert_eq!(
            validate_frametime(f32::NAN),
            Err(InputError::NonFiniteFrametime)
        );
        assert_eq!(
            validate_frametime(f32::INFINITY),
            Err(InputError::NonFiniteFrametime)
        );
    }

    #[test]
    fn test_sanitize_clamps_to_zero() {
        assert_eq!(sanitize_frametime(-5.0), 0.0);
        assert_eq!(sanitize_frametime(f32::NAN), 0.0);
        assert_eq!(sanitize_frametime(0.5), 0.5);
    }

    #[test]
    fn test_input_error_display() {
        let err = InputError::NegativeFrametime(-1.0);
        assert_eq!(err.to_string(), "Negative frametime: -1s");
    }
}
