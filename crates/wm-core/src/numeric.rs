use crate::CoreError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Parse a number typed by the user into a finite [`Real`].
///
/// Surrounding whitespace is ignored. Empty text, text that is not a number,
/// and textual infinities/NaN are all rejected.
pub fn parse_number(input: &str, what: &'static str) -> Result<Real, CoreError> {
    let trimmed = input.trim();
    let value: Real = trimmed.parse().map_err(|_| CoreError::NotANumber {
        what,
        input: input.to_string(),
    })?;
    ensure_finite(value, what)
}
