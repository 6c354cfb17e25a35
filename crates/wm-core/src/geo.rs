use crate::{CoreResult, Real, ensure_finite};

/// A `(latitude, longitude)` pair in degrees.
///
/// With the `serde` feature it is stored as a two-element array `[lat, lng]`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "(Real, Real)", into = "(Real, Real)"))]
pub struct Coords {
    pub lat: Real,
    pub lng: Real,
}

impl Coords {
    /// Checked constructor; both components must be finite.
    pub fn new(lat: Real, lng: Real) -> CoreResult<Self> {
        Ok(Self {
            lat: ensure_finite(lat, "latitude")?,
            lng: ensure_finite(lng, "longitude")?,
        })
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl From<(Real, Real)> for Coords {
    fn from((lat, lng): (Real, Real)) -> Self {
        Self { lat, lng }
    }
}

impl From<Coords> for (Real, Real) {
    fn from(c: Coords) -> Self {
        (c.lat, c.lng)
    }
}
