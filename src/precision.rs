use chrono::Utc;
use thiserror::Error;

/// Default rounding resolution for lengths, metres.
pub const DEFAULT_LENGTH_TOLERANCE_M: f64 = 1e-5;
/// Default rounding resolution for angles, radians.
pub const DEFAULT_ANGLE_TOLERANCE_RAD: f64 = 1e-9;

/// Every timestamp is stored with this zone attached.
pub const CANONICAL_TIMEZONE: Utc = Utc;

#[derive(Debug, Error, PartialEq)]
pub enum PrecisionError {
    #[error("{name} must be a positive finite power of ten, got {value}")]
    NotPowerOfTen { name: &'static str, value: f64 },
}

/// How much precision the domain cares about.
///
/// Differences below the tolerance are treated as sensor or computation
/// noise: values are rounded to that resolution so they compare equal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Precision {
    length_tolerance_m: f64,
    angle_tolerance_rad: f64,
    length_digits: i32,
    angle_digits: i32,
}

impl Precision {
    pub fn new(length_tolerance_m: f64, angle_tolerance_rad: f64) -> Result<Self, PrecisionError> {
        Ok(Self {
            length_tolerance_m,
            angle_tolerance_rad,
            length_digits: digits_for("length_tolerance_m", length_tolerance_m)?,
            angle_digits: digits_for("angle_tolerance_rad", angle_tolerance_rad)?,
        })
    }

    pub fn length_tolerance_m(&self) -> f64 {
        self.length_tolerance_m
    }

    pub fn angle_tolerance_rad(&self) -> f64 {
        self.angle_tolerance_rad
    }

    /// Decimal digits kept for lengths (5 for the default tolerance).
    pub fn length_digits(&self) -> i32 {
        self.length_digits
    }

    /// Decimal digits kept for angles (9 for the default tolerance).
    pub fn angle_digits(&self) -> i32 {
        self.angle_digits
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self {
            length_tolerance_m: DEFAULT_LENGTH_TOLERANCE_M,
            angle_tolerance_rad: DEFAULT_ANGLE_TOLERANCE_RAD,
            length_digits: 5,
            angle_digits: 9,
        }
    }
}

/// `log10(1 / tolerance)` taken to the nearest integer: `1.0 / 1e-5` is
/// `99999.99999999999` in binary floating point.
fn digits_for(name: &'static str, tolerance: f64) -> Result<i32, PrecisionError> {
    let err = PrecisionError::NotPowerOfTen {
        name,
        value: tolerance,
    };
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(err);
    }
    let exponent = (1.0 / tolerance).log10();
    let digits = exponent.round();
    if (exponent - digits).abs() > 1e-9 {
        return Err(err);
    }
    Ok(digits as i32)
}

/// Engine-wide knobs, injected rather than read from process globals.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Policy {
    pub precision: Precision,
    /// Reject state vectors whose frame is not one of the known codes.
    /// Off by default.
    pub enforce_frame_codes: bool,
}

impl Policy {
    pub fn new(precision: Precision) -> Self {
        Self {
            precision,
            enforce_frame_codes: false,
        }
    }

    pub fn with_frame_codes_enforced(mut self, enforce: bool) -> Self {
        self.enforce_frame_codes = enforce;
        self
    }
}
